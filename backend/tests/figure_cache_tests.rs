mod support;

use std::sync::Arc;

use sky_map::services::FigureCache;
use sky_map::sources::{FigureStore, FileFigureStore, StaticFigureSource};
use sky_map::SkyError;

use support::*;

#[tokio::test]
async fn test_download_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache").join("constellations.lines.json");

    let source = Arc::new(StaticFigureSource::new(FIGURES));
    let first_run = FigureCache::new(source.clone(), Arc::new(FileFigureStore::new(&path)));
    let figures = first_run.figures().await.unwrap();
    assert_eq!(figures.len(), 4);
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), FIGURES);
    assert!(!path.with_file_name("constellations.lines.json.part").exists());

    // A fresh cache over the same file must not touch the network
    let offline = Arc::new(StaticFigureSource::unreachable());
    let second_run = FigureCache::new(offline.clone(), Arc::new(FileFigureStore::new(&path)));
    let reloaded = second_run.figures().await.unwrap();
    assert_eq!(reloaded.as_slice(), figures.as_slice());
    assert_eq!(offline.fetch_count(), 0);
}

#[tokio::test]
async fn test_engine_reuses_local_copy_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("constellations.lines.json");
    let request = merida_request();

    let online = engine(
        sky_map::sources::InMemoryStarCatalog::new(synthetic_stars(&request)),
        Arc::new(StaticFigureSource::new(FIGURES)),
        Arc::new(FileFigureStore::new(&path)),
        zenith_ephemeris(&request),
    );
    let before = online.generate_sky(&request).await.unwrap();

    let offline = engine(
        sky_map::sources::InMemoryStarCatalog::new(synthetic_stars(&request)),
        Arc::new(StaticFigureSource::unreachable()),
        Arc::new(FileFigureStore::new(&path)),
        zenith_ephemeris(&request),
    );
    let after = offline.generate_sky(&request).await.unwrap();
    assert_eq!(before.constellations, after.constellations);
}

#[tokio::test]
async fn test_corrupt_local_copy_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("constellations.lines.json");
    std::fs::write(&path, "{ not json").unwrap();

    let source = Arc::new(StaticFigureSource::new(FIGURES));
    let cache = FigureCache::new(source.clone(), Arc::new(FileFigureStore::new(&path)));
    let err = cache.figures().await.unwrap_err();
    assert!(matches!(err, SkyError::Parse(_)));
    assert_eq!(source.fetch_count(), 0);
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileFigureStore::new(dir.path().join("nested").join("figures.json"));

    assert!(!store.exists().await.unwrap());
    store.write("{\"features\": []}").await.unwrap();
    assert!(store.exists().await.unwrap());
    assert_eq!(store.read().await.unwrap(), "{\"features\": []}");

    store.write(FIGURES).await.unwrap();
    assert_eq!(store.read().await.unwrap(), FIGURES);
}
