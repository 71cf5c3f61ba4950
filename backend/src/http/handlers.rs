//! HTTP handlers for the REST API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::dto::{GenerateRequest, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::SkySnapshot;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        figures_loaded: state.engine.figure_cache().is_loaded(),
    }))
}

/// POST /generate
///
/// Compute a sky snapshot for the observer and instant in the body.
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> HandlerResult<SkySnapshot> {
    let Json(body) = body?;
    let request = body.into_sky_request(state.default_magnitude_limit);
    let snapshot = state.engine.generate_sky(&request).await?;
    Ok(Json(snapshot))
}
