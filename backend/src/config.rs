//! Service configuration file support.
//!
//! Settings are read from a `sky.toml` file; every key has a default, so an
//! empty file (or no file at all) yields a working configuration. A handful
//! of environment variables override the file afterwards.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SkyError, SkyResult};
use crate::services::{FigureCache, SkyEngine, DEFAULT_MAGNITUDE_LIMIT};
use crate::sources::figures::{DEFAULT_CACHE_PATH, DEFAULT_FIGURES_URL};
use crate::sources::vizier::{DEFAULT_CATALOG, DEFAULT_VIZIER_URL};
use crate::sources::{FileFigureStore, HttpFigureSource, KeplerianEphemeris, VizierCatalog};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkyConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub stars: StarSettings,
    #[serde(default)]
    pub constellations: ConstellationSettings,
    #[serde(default)]
    pub defaults: RequestDefaults,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote star catalog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSettings {
    #[serde(default = "default_vizier_url")]
    pub vizier_url: String,
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default = "default_star_timeout")]
    pub timeout_secs: u64,
}

/// Constellation figure download and cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationSettings {
    #[serde(default = "default_figures_url")]
    pub source_url: String,
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default = "default_figure_timeout")]
    pub timeout_secs: u64,
}

/// Defaults applied to requests that omit optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDefaults {
    #[serde(default = "default_magnitude_limit")]
    pub magnitude_limit: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_vizier_url() -> String {
    DEFAULT_VIZIER_URL.to_string()
}

fn default_catalog() -> String {
    DEFAULT_CATALOG.to_string()
}

fn default_star_timeout() -> u64 {
    30
}

fn default_figures_url() -> String {
    DEFAULT_FIGURES_URL.to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_figure_timeout() -> u64 {
    60
}

fn default_magnitude_limit() -> f64 {
    DEFAULT_MAGNITUDE_LIMIT
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            vizier_url: default_vizier_url(),
            catalog: default_catalog(),
            timeout_secs: default_star_timeout(),
        }
    }
}

impl Default for ConstellationSettings {
    fn default() -> Self {
        Self {
            source_url: default_figures_url(),
            cache_path: default_cache_path(),
            timeout_secs: default_figure_timeout(),
        }
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            magnitude_limit: default_magnitude_limit(),
        }
    }
}

impl SkyConfig {
    /// Parse a configuration document and validate it.
    pub fn from_toml_str(content: &str) -> SkyResult<Self> {
        let config: SkyConfig = toml::from_str(content).map_err(|e| {
            SkyError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SkyResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SkyError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the first `sky.toml` found.
    ///
    /// Searches, in order:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to [`SkyConfig::default`] when no file exists.
    pub fn from_default_location() -> SkyResult<Self> {
        let search_paths = [
            PathBuf::from("sky.toml"),
            PathBuf::from("backend/sky.toml"),
            PathBuf::from("../sky.toml"),
        ];

        for path in search_paths.iter() {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(path);
            }
        }

        log::debug!("No sky.toml found in standard locations, using defaults");
        Ok(Self::default())
    }

    /// Apply overrides from the process environment.
    ///
    /// # Environment Variables
    /// - `HOST`, `PORT`: listener address
    /// - `SKY_CACHE_PATH`: local constellation figure document
    /// - `SKY_VIZIER_URL`: VizieR ASU-TSV endpoint
    /// - `SKY_FIGURES_URL`: constellation figure document URL
    pub fn apply_env_overrides(self) -> SkyResult<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, keyed like the environment.
    pub fn apply_overrides<F>(mut self, lookup: F) -> SkyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                SkyError::Configuration(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }
        if let Some(path) = lookup("SKY_CACHE_PATH") {
            self.constellations.cache_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("SKY_VIZIER_URL") {
            self.stars.vizier_url = url;
        }
        if let Some(url) = lookup("SKY_FIGURES_URL") {
            self.constellations.source_url = url;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values no engine could run with.
    pub fn validate(&self) -> SkyResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(SkyError::Configuration("server.host must not be empty".into()));
        }
        if self.stars.timeout_secs == 0 || self.constellations.timeout_secs == 0 {
            return Err(SkyError::Configuration("timeout_secs must be positive".into()));
        }
        if self.stars.vizier_url.trim().is_empty() || self.constellations.source_url.trim().is_empty()
        {
            return Err(SkyError::Configuration("source URLs must not be empty".into()));
        }
        if self.constellations.cache_path.as_os_str().is_empty() {
            return Err(SkyError::Configuration(
                "constellations.cache_path must not be empty".into(),
            ));
        }
        if !self.defaults.magnitude_limit.is_finite() {
            return Err(SkyError::Configuration(
                "defaults.magnitude_limit must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Listener address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build an engine wired to the configured remote sources, the on-disk
    /// figure store and the built-in ephemeris.
    pub fn build_engine(&self) -> SkyResult<SkyEngine> {
        let stars = VizierCatalog::new(
            self.stars.vizier_url.clone(),
            self.stars.catalog.clone(),
            Duration::from_secs(self.stars.timeout_secs),
        )
        .map_err(|e| SkyError::Configuration(format!("Failed to build catalog client: {}", e)))?;

        let figure_source = HttpFigureSource::new(
            self.constellations.source_url.clone(),
            Duration::from_secs(self.constellations.timeout_secs),
        )
        .map_err(|e| SkyError::Configuration(format!("Failed to build figure client: {}", e)))?;
        let figure_store = FileFigureStore::new(self.constellations.cache_path.clone());

        Ok(SkyEngine::new(
            Arc::new(stars),
            Arc::new(FigureCache::new(
                Arc::new(figure_source),
                Arc::new(figure_store),
            )),
            Arc::new(KeplerianEphemeris::new()),
        ))
    }
}
