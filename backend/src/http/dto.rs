//! Data Transfer Objects for the HTTP API.
//!
//! Responses reuse [`SkySnapshot`](crate::models::SkySnapshot) directly; only
//! the request body and the health payload are defined here.

use serde::{Deserialize, Serialize};

use crate::services::SkyRequest;

/// Request body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Observer latitude in degrees, north positive
    pub lat: f64,
    /// Observer longitude in degrees, east positive
    pub lon: f64,
    /// UTC instant, ISO-8601 or `YYYY-MM-DD HH:MM:SS`
    pub datetime_utc: String,
    /// Faintest magnitude to include (server default when omitted)
    #[serde(default, alias = "magnitude_limit")]
    pub mag_limit: Option<f64>,
    #[serde(default)]
    pub force_all_constellations: Option<bool>,
    #[serde(default)]
    pub include_all_solar_objects: Option<bool>,
}

impl GenerateRequest {
    /// Resolve omitted fields against the engine defaults.
    pub fn into_sky_request(self, default_magnitude_limit: f64) -> SkyRequest {
        let mut request = SkyRequest::new(self.lat, self.lon, self.datetime_utc)
            .with_magnitude_limit(self.mag_limit.unwrap_or(default_magnitude_limit));
        if let Some(force) = self.force_all_constellations {
            request = request.with_force_all_constellations(force);
        }
        if let Some(include) = self.include_all_solar_objects {
            request = request.with_include_all_solar_objects(include);
        }
        request
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether constellation figures are already loaded in memory
    pub figures_loaded: bool,
}
