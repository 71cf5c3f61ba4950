//! Constellation figure document: remote download, local persistence, parsing.
//!
//! The document is the d3-celestial `constellations.lines.json` GeoJSON
//! FeatureCollection. Each `MultiLineString` feature is one figure whose
//! coordinates are `[ra, dec]` pairs in degrees, with RA published in
//! (-180, 180].

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;

use super::{FigureSource, FigureStore};
use crate::error::{SkyError, SkyResult};
use crate::models::{constellation_name, ConstellationFigure, EquatorialPosition};

pub const DEFAULT_FIGURES_URL: &str =
    "https://raw.githubusercontent.com/ofrohn/d3-celestial/master/data/constellations.lines.json";
pub const DEFAULT_CACHE_PATH: &str = "data/constellations.lines.json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Downloads the figure document over HTTP.
pub struct HttpFigureSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFigureSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sky-map/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The d3-celestial document on GitHub.
    pub fn d3_celestial() -> reqwest::Result<Self> {
        Self::new(
            DEFAULT_FIGURES_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
    }
}

#[async_trait]
impl FigureSource for HttpFigureSource {
    async fn fetch(&self) -> SkyResult<String> {
        info!("Downloading constellation figures from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SkyError::CatalogFetchFailed(format!("GET {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(SkyError::CatalogFetchFailed(format!(
                "HTTP error {} for {}",
                response.status(),
                self.url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SkyError::CatalogFetchFailed(format!("reading body of {}: {}", self.url, e)))
    }
}

/// Figure document kept as a file on local disk.
#[derive(Debug, Clone)]
pub struct FileFigureStore {
    path: PathBuf,
}

impl FileFigureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl FigureStore for FileFigureStore {
    async fn exists(&self) -> SkyResult<bool> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    async fn read(&self) -> SkyResult<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SkyError::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }

    /// Write to a sibling file, then rename it over the target.
    async fn write(&self, document: &str) -> SkyResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let staging = self.staging_path();
        tokio::fs::write(&staging, document).await.map_err(|e| {
            SkyError::Storage(format!("Failed to write {}: {}", staging.display(), e))
        })?;
        tokio::fs::rename(&staging, &self.path).await.map_err(|e| {
            SkyError::Storage(format!("Failed to move figures into {}: {}", self.path.display(), e))
        })?;
        debug!("Persisted constellation figures to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

fn feature_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse the figure document into figures, in document order.
///
/// Features that are not `MultiLineString` or carry no id are ignored.
pub fn parse_figure_document(document: &str) -> SkyResult<Vec<ConstellationFigure>> {
    let collection: FeatureCollection = serde_json::from_str(document)
        .map_err(|e| SkyError::Parse(format!("Invalid constellation figure document: {}", e)))?;

    let mut figures = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        if geometry.kind != "MultiLineString" {
            continue;
        }
        let Some(id) = feature_id(&feature.id) else {
            continue;
        };

        let raw: Vec<Vec<Vec<f64>>> = serde_json::from_value(geometry.coordinates).map_err(|e| {
            SkyError::Parse(format!("Invalid coordinates for constellation {}: {}", id, e))
        })?;

        let mut segments = Vec::with_capacity(raw.len());
        for line in raw {
            let mut segment = Vec::with_capacity(line.len());
            for vertex in line {
                match vertex.as_slice() {
                    [ra, dec, ..] => segment.push(EquatorialPosition::new(*ra, *dec)),
                    _ => {
                        return Err(SkyError::Parse(format!(
                            "Constellation {} has a vertex with fewer than two coordinates",
                            id
                        )))
                    }
                }
            }
            segments.push(segment);
        }

        figures.push(ConstellationFigure {
            name: constellation_name(&id).to_string(),
            id,
            segments,
        });
    }

    Ok(figures)
}
