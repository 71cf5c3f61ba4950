//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::{SkyEngine, DEFAULT_MAGNITUDE_LIMIT};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Engine shared by every request
    pub engine: Arc<SkyEngine>,
    /// Magnitude limit used when a request omits `mag_limit`
    pub default_magnitude_limit: f64,
}

impl AppState {
    pub fn new(engine: Arc<SkyEngine>) -> Self {
        Self {
            engine,
            default_magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
        }
    }

    pub fn with_default_magnitude_limit(mut self, magnitude_limit: f64) -> Self {
        self.default_magnitude_limit = magnitude_limit;
        self
    }
}
