//! Error types for sky snapshot computation.

use thiserror::Error;

/// Result type for sky engine operations
pub type SkyResult<T> = std::result::Result<T, SkyError>;

/// Errors that can occur while computing a sky snapshot
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkyError {
    /// Malformed instant string or out-of-range observer input
    #[error("Parse error: {0}")]
    Parse(String),

    /// Star catalog or ephemeris query failed
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// Constellation figures could not be fetched and no local copy exists
    #[error("Constellation catalog fetch failed: {0}")]
    CatalogFetchFailed(String),

    /// Declination outside [-90, 90] or non-finite coordinates
    #[error("Transform range error: {0}")]
    TransformRange(String),

    /// Local figure store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration file or environment override
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SkyError {
    /// Short machine-readable code used by the HTTP boundary.
    pub fn code(&self) -> &'static str {
        match self {
            SkyError::Parse(_) => "PARSE_ERROR",
            SkyError::DataSourceUnavailable(_) => "DATA_SOURCE_UNAVAILABLE",
            SkyError::CatalogFetchFailed(_) => "CATALOG_FETCH_FAILED",
            SkyError::TransformRange(_) => "TRANSFORM_RANGE_ERROR",
            SkyError::Storage(_) => "STORAGE_ERROR",
            SkyError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SkyError::Parse(_))
    }
}

impl From<std::io::Error> for SkyError {
    fn from(err: std::io::Error) -> Self {
        SkyError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_message() {
        let err = SkyError::TransformRange("dec=91".into());
        assert_eq!(err.to_string(), "Transform range error: dec=91");
    }

    #[test]
    fn test_only_parse_is_client_error() {
        assert!(SkyError::Parse("x".into()).is_client_error());
        assert!(!SkyError::CatalogFetchFailed("x".into()).is_client_error());
        assert!(!SkyError::DataSourceUnavailable("x".into()).is_client_error());
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SkyError = io.into();
        assert_eq!(err.code(), "STORAGE_ERROR");
    }
}
