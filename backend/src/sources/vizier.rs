//! Hipparcos star catalog served by VizieR.
//!
//! Queries the ASU-TSV endpoint and parses the tab-separated table it returns.
//! Every failure on this path is reported as [`CatalogOutcome::Unavailable`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use super::{CatalogOutcome, StarCatalogSource};
use crate::models::StarRecord;

pub const DEFAULT_VIZIER_URL: &str = "https://vizier.cds.unistra.fr/viz-bin/asu-tsv";
pub const DEFAULT_CATALOG: &str = "I/239/hip_main";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const ID_COLUMNS: &[&str] = &["HIP"];
const RA_COLUMNS: &[&str] = &["RAICRS", "_RA.icrs", "_RAJ2000"];
const DEC_COLUMNS: &[&str] = &["DEICRS", "_DE.icrs", "_DEJ2000"];
const MAG_COLUMNS: &[&str] = &["Vmag"];

/// VizieR-backed star catalog.
pub struct VizierCatalog {
    client: reqwest::Client,
    base_url: String,
    catalog: String,
}

impl VizierCatalog {
    pub fn new(
        base_url: impl Into<String>,
        catalog: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sky-map/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            catalog: catalog.into(),
        })
    }

    /// Hipparcos main catalog on the CDS mirror.
    pub fn hipparcos() -> reqwest::Result<Self> {
        Self::new(
            DEFAULT_VIZIER_URL,
            DEFAULT_CATALOG,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    async fn fetch_table(&self, magnitude_limit: f64) -> Result<String, String> {
        let constraint = format!("<{}", magnitude_limit);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("-source", self.catalog.as_str()),
                ("-out", "HIP,RAICRS,DEICRS,Vmag"),
                ("-out.max", "unlimited"),
                ("Vmag", constraint.as_str()),
            ])
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", self.base_url, e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP error {} from {}", response.status(), self.base_url));
        }

        response
            .text()
            .await
            .map_err(|e| format!("failed to read VizieR response body: {}", e))
    }
}

#[async_trait]
impl StarCatalogSource for VizierCatalog {
    async fn query(&self, magnitude_limit: f64) -> CatalogOutcome {
        let body = match self.fetch_table(magnitude_limit).await {
            Ok(body) => body,
            Err(reason) => {
                warn!("VizieR query failed: {}", reason);
                return CatalogOutcome::unavailable(reason);
            }
        };

        match parse_tsv(&body) {
            Ok(stars) => {
                debug!(
                    "VizieR returned {} stars brighter than {}",
                    stars.len(),
                    magnitude_limit
                );
                CatalogOutcome::Available(stars)
            }
            Err(reason) => {
                warn!("VizieR response unusable: {}", reason);
                CatalogOutcome::unavailable(reason)
            }
        }
    }
}

fn column_index(header: &[&str], names: &[&str]) -> Option<usize> {
    header.iter().position(|column| names.contains(column))
}

/// Parse an ASU-TSV table into star records.
///
/// Comment lines start with `#`. The first other line is the header; the unit
/// and dash rows that follow it fail numeric parsing and are skipped along with
/// any row with a blank field.
pub fn parse_tsv(body: &str) -> Result<Vec<StarRecord>, String> {
    let mut lines = body
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'));

    let header_line = lines
        .next()
        .ok_or_else(|| "response contains no table header".to_string())?;
    let header: Vec<&str> = header_line.split('\t').map(str::trim).collect();

    let missing = |what: &str| format!("response header lacks a {} column: {:?}", what, header);
    let id_idx = column_index(&header, ID_COLUMNS).ok_or_else(|| missing("HIP"))?;
    let ra_idx = column_index(&header, RA_COLUMNS).ok_or_else(|| missing("RA"))?;
    let dec_idx = column_index(&header, DEC_COLUMNS).ok_or_else(|| missing("Dec"))?;
    let mag_idx = column_index(&header, MAG_COLUMNS).ok_or_else(|| missing("Vmag"))?;

    let mut stars = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let field = |idx: usize| fields.get(idx).copied().unwrap_or("");

        let id = field(id_idx);
        let parsed = (
            id.parse::<u64>(),
            field(ra_idx).parse::<f64>(),
            field(dec_idx).parse::<f64>(),
            field(mag_idx).parse::<f64>(),
        );
        match parsed {
            (Ok(_), Ok(ra), Ok(dec), Ok(mag))
                if ra.is_finite() && mag.is_finite() && (-90.0..=90.0).contains(&dec) =>
            {
                stars.push(StarRecord::new(id, ra, dec, mag));
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} non-data rows in VizieR table", skipped);
    }
    Ok(stars)
}
