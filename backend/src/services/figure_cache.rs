//! Process-wide cache of constellation figures.
//!
//! The figure document is fetched at most once: the first access that finds no
//! local copy downloads it, validates it, and persists it. Later accesses, in
//! this process or after a restart, read the local copy.

use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::error::{SkyError, SkyResult};
use crate::models::ConstellationFigure;
use crate::sources::figures::parse_figure_document;
use crate::sources::{FigureSource, FigureStore};

/// Parsed figures shared by every request.
pub type FigureCatalog = Arc<Vec<ConstellationFigure>>;

pub struct FigureCache {
    source: Arc<dyn FigureSource>,
    store: Arc<dyn FigureStore>,
    loaded: RwLock<Option<FigureCatalog>>,
    /// Held for the whole exists/fetch/write/read sequence.
    populate: Mutex<()>,
}

impl FigureCache {
    pub fn new(source: Arc<dyn FigureSource>, store: Arc<dyn FigureStore>) -> Self {
        Self {
            source,
            store,
            loaded: RwLock::new(None),
            populate: Mutex::new(()),
        }
    }

    /// The figure catalog, loading it on first use.
    pub async fn figures(&self) -> SkyResult<FigureCatalog> {
        if let Some(catalog) = self.cached() {
            return Ok(catalog);
        }

        let _guard = self.populate.lock().await;
        // Another caller may have finished loading while we waited.
        if let Some(catalog) = self.cached() {
            return Ok(catalog);
        }

        let figures = if self.store.exists().await? {
            debug!("Reading constellation figures from local store");
            parse_figure_document(&self.store.read().await?)?
        } else {
            self.download().await?
        };

        info!("Loaded {} constellation figures", figures.len());
        let catalog: FigureCatalog = Arc::new(figures);
        self.store_loaded(Arc::clone(&catalog));
        Ok(catalog)
    }

    fn cached(&self) -> Option<FigureCatalog> {
        self.loaded.read().clone()
    }

    async fn download(&self) -> SkyResult<Vec<ConstellationFigure>> {
        let document = self.source.fetch().await.map_err(|e| match e {
            SkyError::CatalogFetchFailed(_) => e,
            other => SkyError::CatalogFetchFailed(other.to_string()),
        })?;
        let figures = parse_figure_document(&document).map_err(|e| {
            SkyError::CatalogFetchFailed(format!("downloaded figure document is unusable: {}", e))
        })?;
        self.store.write(&document).await?;
        info!("Persisted freshly downloaded constellation figures");
        Ok(figures)
    }

    fn store_loaded(&self, catalog: FigureCatalog) {
        *self.loaded.write() = Some(catalog);
    }

    /// Whether figures have been loaded in this process.
    pub fn is_loaded(&self) -> bool {
        self.loaded.read().is_some()
    }
}
