//! Capabilities the sky engine consumes, and their implementations.
//!
//! The engine never talks to a network or a disk directly. It is handed boxed
//! capabilities so synthetic positions can stand in for real providers.
//!
//! # Implementations
//! - `vizier`: Hipparcos star catalog over the VizieR ASU-TSV endpoint
//! - `figures`: remote figure document download and the on-disk figure store
//! - `ephemeris`: built-in low-precision Keplerian ephemeris
//! - `local`: in-memory implementations for tests and offline development

use async_trait::async_trait;

use crate::error::SkyResult;
use crate::models::{EquatorialPosition, Instant, StarRecord};

pub mod ephemeris;
pub mod figures;
pub mod local;
pub mod vizier;

pub use ephemeris::KeplerianEphemeris;
pub use figures::{FileFigureStore, HttpFigureSource};
pub use local::{InMemoryFigureStore, InMemoryStarCatalog, StaticEphemeris, StaticFigureSource};
pub use vizier::VizierCatalog;

/// Outcome of a star catalog query.
///
/// Unavailability is a value, not an error: the caller decides how to degrade.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome {
    Available(Vec<StarRecord>),
    Unavailable { reason: String },
}

impl CatalogOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        CatalogOutcome::Unavailable {
            reason: reason.into(),
        }
    }
}

/// A queryable star catalog.
#[async_trait]
pub trait StarCatalogSource: Send + Sync {
    /// All entries with magnitude strictly below `magnitude_limit`.
    async fn query(&self, magnitude_limit: f64) -> CatalogOutcome;
}

/// Remote origin of the constellation figure document.
#[async_trait]
pub trait FigureSource: Send + Sync {
    /// Download the raw figure document.
    async fn fetch(&self) -> SkyResult<String>;
}

/// Persistent local copy of the constellation figure document.
#[async_trait]
pub trait FigureStore: Send + Sync {
    async fn exists(&self) -> SkyResult<bool>;

    async fn read(&self) -> SkyResult<String>;

    async fn write(&self, document: &str) -> SkyResult<()>;
}

/// Bodies of the solar system the engine places on the sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Fixed query order of the solar-system aggregation.
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Lowercase identifier understood by ephemeris providers.
    pub fn id(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
        }
    }

    /// Capitalized display name.
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }
}

impl std::str::FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.id() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown body '{}'", s))
    }
}

/// Equatorial positions of solar-system bodies.
#[async_trait]
pub trait EphemerisProvider: Send + Sync {
    async fn position(&self, body: Body, instant: &Instant) -> SkyResult<EquatorialPosition>;
}
