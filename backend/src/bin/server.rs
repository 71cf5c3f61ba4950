//! Sky Map HTTP Server Binary
//!
//! Main entry point for the sky snapshot REST API. Loads `sky.toml`, wires the
//! remote catalog, figure cache and ephemeris into a [`SkyEngine`], and serves
//! the router.
//!
//! # Usage
//!
//! ```bash
//! # Configuration from ./sky.toml (or built-in defaults)
//! cargo run --bin sky-server
//!
//! # Explicit configuration file
//! cargo run --bin sky-server -- /etc/sky/sky.toml
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `SKY_CACHE_PATH`: Local constellation figure document
//! - `SKY_VIZIER_URL`: VizieR ASU-TSV endpoint
//! - `SKY_FIGURES_URL`: Constellation figure document URL
//! - `RUST_LOG`: Log level (default: info)
//!
//! [`SkyEngine`]: sky_map::SkyEngine

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sky_map::config::SkyConfig;
use sky_map::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Sky Map HTTP Server");

    let config = match env::args().nth(1) {
        Some(path) => SkyConfig::from_file(path)?,
        None => SkyConfig::from_default_location()?,
    }
    .apply_env_overrides()?;

    let engine = config.build_engine()?;
    info!(
        "Engine ready (catalog {} via {}, figures cached at {})",
        config.stars.catalog,
        config.stars.vizier_url,
        config.constellations.cache_path.display()
    );

    let state = AppState::new(Arc::new(engine))
        .with_default_magnitude_limit(config.defaults.magnitude_limit);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
