//! Visible star selection with the bright-star fallback.

use log::{debug, warn};

use crate::algorithms::{equatorial_to_horizontal, SiderealFrame};
use crate::error::SkyResult;
use crate::models::{HorizontalPosition, SkyObject};
use crate::sources::{CatalogOutcome, StarCatalogSource};

/// Placeholder stars returned when the catalog is unavailable.
///
/// Positions are hand-assigned and not recomputed for the observer or instant.
/// Tuples are `(name, alt_deg, az_deg, magnitude)`.
pub const FALLBACK_STARS: [(&str, f64, f64, f64); 10] = [
    ("Sirius", 45.0, 180.0, -1.46),
    ("Canopus", 30.0, 190.0, -0.74),
    ("Rigil Kentaurus", 20.0, 170.0, -0.27),
    ("Arcturus", 60.0, 90.0, -0.05),
    ("Vega", 70.0, 270.0, 0.03),
    ("Capella", 50.0, 320.0, 0.08),
    ("Rigel", 40.0, 200.0, 0.13),
    ("Procyon", 55.0, 150.0, 0.34),
    ("Betelgeuse", 42.0, 195.0, 0.50),
    ("Altair", 65.0, 290.0, 0.77),
];

/// The fixed degraded-mode star list.
pub fn fallback_stars() -> Vec<SkyObject> {
    FALLBACK_STARS
        .iter()
        .map(|&(name, alt, az, magnitude)| {
            SkyObject::star(name, HorizontalPosition::new(alt, az), magnitude)
        })
        .collect()
}

/// Stars brighter than `magnitude_limit` that are above the horizon.
///
/// Catalog unavailability is answered with [`fallback_stars`] regardless of the
/// limit. A catalog entry that cannot be transformed is a hard error.
pub async fn get_visible_stars(
    source: &dyn StarCatalogSource,
    frame: &SiderealFrame,
    magnitude_limit: f64,
) -> SkyResult<Vec<SkyObject>> {
    let records = match source.query(magnitude_limit).await {
        CatalogOutcome::Available(records) => records,
        CatalogOutcome::Unavailable { reason } => {
            warn!(
                "Star catalog unavailable ({}); serving {} fallback stars",
                reason,
                FALLBACK_STARS.len()
            );
            return Ok(fallback_stars());
        }
    };

    let total = records.len();
    let mut visible = Vec::new();
    for record in records.iter().filter(|r| r.magnitude < magnitude_limit) {
        let position = equatorial_to_horizontal(&record.equatorial, frame)?;
        if position.is_above_horizon() {
            visible.push(SkyObject::star(record.display_name(), position, record.magnitude));
        }
    }

    debug!("{} of {} catalog stars above the horizon", visible.len(), total);
    Ok(visible)
}
