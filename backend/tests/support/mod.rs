//! Shared fixtures for the integration tests: synthetic capabilities and a
//! small constellation figure document.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use sky_map::algorithms::SiderealFrame;
use sky_map::models::{EquatorialPosition, Instant, Observer, StarRecord};
use sky_map::services::{FigureCache, SkyEngine, SkyRequest};
use sky_map::sources::{
    EphemerisProvider, FigureSource, FigureStore, InMemoryFigureStore, InMemoryStarCatalog,
    StarCatalogSource, StaticEphemeris, StaticFigureSource,
};

pub const MERIDA_LAT: f64 = 20.689;
pub const MERIDA_LON: f64 = -88.201;
pub const MERIDA_TIME: &str = "2026-01-25 16:51:00";

/// Four figures in the d3-celestial layout (RA in (-180, 180]).
///
/// `Oct` hugs the south celestial pole and never rises at Mérida.
pub const FIGURES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "id": "Ori", "properties": {"rank": "1"},
     "geometry": {"type": "MultiLineString", "coordinates": [
       [[88.7929, 7.4071], [81.2828, 6.3497], [83.0017, -0.2991], [78.6345, -8.2016]],
       [[84.0534, -1.2019], [85.1897, -1.9426], [86.9391, -9.6696]]
     ]}},
    {"type": "Feature", "id": "UMa", "properties": {"rank": "1"},
     "geometry": {"type": "MultiLineString", "coordinates": [
       [[165.932, 61.751], [165.4603, 56.3824], [178.4577, 53.6948], [-176.1435, 57.0326],
        [-166.4927, 55.9598], [-159.0186, 54.9254], [-153.0513, 49.3133]]
     ]}},
    {"type": "Feature", "id": "Cru", "properties": {"rank": "1"},
     "geometry": {"type": "MultiLineString", "coordinates": [
       [[-173.3608, -63.0991], [-172.2096, -57.1132]],
       [[-168.0645, -59.6888], [-176.0969, -58.7489]]
     ]}},
    {"type": "Feature", "id": "Oct", "properties": {"rank": "3"},
     "geometry": {"type": "MultiLineString", "coordinates": [
       [[-34.2164, -77.39], [-143.1887, -83.6679], [-18.3616, -81.3816], [-34.2164, -77.39]]
     ]}}
  ]
}"#;

pub fn merida_request() -> SkyRequest {
    SkyRequest::new(MERIDA_LAT, MERIDA_LON, MERIDA_TIME)
}

/// Sidereal frame for a request, computed the way the engine does.
pub fn frame_for(request: &SkyRequest) -> SiderealFrame {
    let observer = Observer::new(request.lat, request.lon).unwrap();
    let instant = Instant::parse(&request.datetime_utc).unwrap();
    SiderealFrame::new(&observer, &instant)
}

/// Equatorial position of the observer's zenith.
pub fn zenith_of(request: &SkyRequest) -> EquatorialPosition {
    let frame = frame_for(request);
    EquatorialPosition::new(frame.lst().value(), frame.latitude().value())
}

/// An ephemeris that puts every body at the observer's zenith.
pub fn zenith_ephemeris(request: &SkyRequest) -> StaticEphemeris {
    StaticEphemeris::uniform(zenith_of(request))
}

/// A small star list: one at the zenith, one that never rises at Mérida, one
/// too faint for the default limit, and a spread along the celestial equator.
pub fn synthetic_stars(request: &SkyRequest) -> Vec<StarRecord> {
    let zenith = zenith_of(request);
    let mut stars = vec![
        StarRecord::new("1", zenith.ra_deg(), zenith.dec_deg(), 1.0),
        StarRecord::new("2", 120.0, -85.0, 2.0),
        StarRecord::new("3", zenith.ra_deg(), zenith.dec_deg(), 7.5),
    ];
    stars.extend((0..12).map(|i| StarRecord::new(format!("{}", 100 + i), i as f64 * 30.0, 0.0, 4.0)));
    stars
}

pub fn engine(
    stars: impl StarCatalogSource + 'static,
    source: Arc<dyn FigureSource>,
    store: Arc<dyn FigureStore>,
    ephemeris: impl EphemerisProvider + 'static,
) -> SkyEngine {
    SkyEngine::new(
        Arc::new(stars),
        Arc::new(FigureCache::new(source, store)),
        Arc::new(ephemeris),
    )
}

/// Engine over synthetic stars, the fixture figures and a zenith ephemeris.
pub fn merida_engine(request: &SkyRequest) -> SkyEngine {
    engine(
        InMemoryStarCatalog::new(synthetic_stars(request)),
        Arc::new(StaticFigureSource::new(FIGURES)),
        Arc::new(InMemoryFigureStore::new()),
        zenith_ephemeris(request),
    )
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `Some(v)` sets the variable to `v`, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
