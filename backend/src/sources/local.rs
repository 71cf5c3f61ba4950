//! In-memory implementations of every source capability.
//!
//! These are suitable for unit testing and offline development: positions and
//! documents are supplied up front, and failures can be injected.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Body, CatalogOutcome, EphemerisProvider, FigureSource, FigureStore, StarCatalogSource};
use crate::error::{SkyError, SkyResult};
use crate::models::{EquatorialPosition, Instant, StarRecord};

/// Star catalog backed by a fixed list of records.
#[derive(Debug, Clone)]
pub struct InMemoryStarCatalog {
    stars: Vec<StarRecord>,
    unavailable: Option<String>,
    queries: Arc<AtomicUsize>,
}

impl InMemoryStarCatalog {
    pub fn new(stars: Vec<StarRecord>) -> Self {
        Self {
            stars,
            unavailable: None,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A catalog whose every query reports unavailability.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            stars: Vec::new(),
            unavailable: Some(reason.into()),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of queries served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StarCatalogSource for InMemoryStarCatalog {
    async fn query(&self, magnitude_limit: f64) -> CatalogOutcome {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.unavailable {
            return CatalogOutcome::unavailable(reason.clone());
        }
        CatalogOutcome::Available(
            self.stars
                .iter()
                .filter(|star| star.magnitude < magnitude_limit)
                .cloned()
                .collect(),
        )
    }
}

/// Ephemeris returning preset positions.
#[derive(Debug, Clone, Default)]
pub struct StaticEphemeris {
    positions: HashMap<Body, EquatorialPosition>,
    failure: Option<String>,
}

impl StaticEphemeris {
    pub fn new(positions: HashMap<Body, EquatorialPosition>) -> Self {
        Self {
            positions,
            failure: None,
        }
    }

    /// Every body at the same position.
    pub fn uniform(position: EquatorialPosition) -> Self {
        Self::new(Body::ALL.iter().map(|body| (*body, position)).collect())
    }

    /// An ephemeris whose every lookup fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            positions: HashMap::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn with_position(mut self, body: Body, position: EquatorialPosition) -> Self {
        self.positions.insert(body, position);
        self
    }
}

#[async_trait]
impl EphemerisProvider for StaticEphemeris {
    async fn position(&self, body: Body, _instant: &Instant) -> SkyResult<EquatorialPosition> {
        if let Some(reason) = &self.failure {
            return Err(SkyError::DataSourceUnavailable(reason.clone()));
        }
        self.positions.get(&body).copied().ok_or_else(|| {
            SkyError::DataSourceUnavailable(format!("no position for {}", body.id()))
        })
    }
}

/// Figure source serving a fixed document, counting downloads.
#[derive(Debug, Clone)]
pub struct StaticFigureSource {
    document: Option<String>,
    delay: Duration,
    fetches: Arc<AtomicUsize>,
}

impl StaticFigureSource {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            delay: Duration::ZERO,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose downloads always fail.
    pub fn unreachable() -> Self {
        Self {
            document: None,
            delay: Duration::ZERO,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep before answering, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FigureSource for StaticFigureSource {
    async fn fetch(&self) -> SkyResult<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.document
            .clone()
            .ok_or_else(|| SkyError::CatalogFetchFailed("figure source unreachable".to_string()))
    }
}

/// Figure store held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFigureStore {
    document: Arc<RwLock<Option<String>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryFigureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(document.into()))),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn document(&self) -> Option<String> {
        self.document.read().clone()
    }
}

#[async_trait]
impl FigureStore for InMemoryFigureStore {
    async fn exists(&self) -> SkyResult<bool> {
        Ok(self.document.read().is_some())
    }

    async fn read(&self) -> SkyResult<String> {
        self.document
            .read()
            .clone()
            .ok_or_else(|| SkyError::Storage("no figure document stored".to_string()))
    }

    async fn write(&self, document: &str) -> SkyResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.document.write() = Some(document.to_string());
        Ok(())
    }
}
