//! Sky snapshot assembly.
//!
//! [`SkyEngine`] owns the capabilities and composes the star, constellation
//! and solar-system branches for one `(Observer, Instant)` pair. The branches
//! share nothing mutable and run concurrently.

use std::sync::Arc;

use log::info;

use crate::algorithms::SiderealFrame;
use crate::error::SkyResult;
use crate::models::{Instant, Observer, SkySnapshot, SnapshotMetadata};
use crate::sources::{EphemerisProvider, StarCatalogSource};

use super::constellations::get_constellations;
use super::figure_cache::FigureCache;
use super::solar_system::get_solar_system_objects;
use super::stars::get_visible_stars;

pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 6.0;

/// Parameters of one sky computation.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyRequest {
    pub lat: f64,
    pub lon: f64,
    /// ISO-8601 or `YYYY-MM-DD HH:MM:SS`, UTC
    pub datetime_utc: String,
    pub magnitude_limit: f64,
    /// Keep constellation segments that are entirely below the horizon
    pub force_all_constellations: bool,
    /// Keep solar-system bodies that are below the horizon
    pub include_all_solar_objects: bool,
}

impl SkyRequest {
    pub fn new(lat: f64, lon: f64, datetime_utc: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            datetime_utc: datetime_utc.into(),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
            force_all_constellations: true,
            include_all_solar_objects: true,
        }
    }

    pub fn with_magnitude_limit(mut self, magnitude_limit: f64) -> Self {
        self.magnitude_limit = magnitude_limit;
        self
    }

    pub fn with_force_all_constellations(mut self, force: bool) -> Self {
        self.force_all_constellations = force;
        self
    }

    pub fn with_include_all_solar_objects(mut self, include: bool) -> Self {
        self.include_all_solar_objects = include;
        self
    }
}

/// Composes the sky components over injected capabilities.
#[derive(Clone)]
pub struct SkyEngine {
    stars: Arc<dyn StarCatalogSource>,
    figures: Arc<FigureCache>,
    ephemeris: Arc<dyn EphemerisProvider>,
}

impl SkyEngine {
    pub fn new(
        stars: Arc<dyn StarCatalogSource>,
        figures: Arc<FigureCache>,
        ephemeris: Arc<dyn EphemerisProvider>,
    ) -> Self {
        Self {
            stars,
            figures,
            ephemeris,
        }
    }

    pub fn figure_cache(&self) -> &FigureCache {
        &self.figures
    }

    /// Compute a fresh snapshot. Only star catalog unavailability is recovered;
    /// every other failure is returned unchanged.
    pub async fn generate_sky(&self, request: &SkyRequest) -> SkyResult<SkySnapshot> {
        let observer = Observer::new(request.lat, request.lon)?;
        let instant = Instant::parse(&request.datetime_utc)?;
        let frame = SiderealFrame::new(&observer, &instant);

        let (stars, constellations, solar_system) = tokio::try_join!(
            get_visible_stars(self.stars.as_ref(), &frame, request.magnitude_limit),
            get_constellations(&self.figures, &frame, request.force_all_constellations),
            get_solar_system_objects(
                self.ephemeris.as_ref(),
                &instant,
                &frame,
                request.include_all_solar_objects,
            ),
        )?;

        info!(
            "Sky for lat={} lon={} at {}: {} stars, {} bodies, {} constellations",
            request.lat,
            request.lon,
            instant.datetime(),
            stars.len(),
            solar_system.len(),
            constellations.len()
        );

        Ok(SkySnapshot {
            metadata: SnapshotMetadata {
                lat: request.lat,
                lon: request.lon,
                datetime_utc: request.datetime_utc.clone(),
            },
            stars,
            solar_system,
            constellations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = SkyRequest::new(20.689, -88.201, "2026-01-25 16:51:00");
        assert_eq!(request.magnitude_limit, 6.0);
        assert!(request.force_all_constellations);
        assert!(request.include_all_solar_objects);

        let request = request
            .with_magnitude_limit(4.0)
            .with_force_all_constellations(false)
            .with_include_all_solar_objects(false);
        assert_eq!(request.magnitude_limit, 4.0);
        assert!(!request.force_all_constellations);
        assert!(!request.include_all_solar_objects);
    }
}
