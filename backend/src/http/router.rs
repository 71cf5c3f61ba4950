//! Router configuration for the HTTP API.
//!
//! Sets up the routes and middleware (CORS, compression, tracing).

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The rendering client is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/generate", post(handlers::generate))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::models::EquatorialPosition;
    use crate::services::{FigureCache, SkyEngine};
    use crate::sources::{
        InMemoryFigureStore, InMemoryStarCatalog, StaticEphemeris, StaticFigureSource,
    };

    const FIGURES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","id":"Ori","geometry":{"type":"MultiLineString",
         "coordinates":[[[88.79,7.41],[81.28,6.35]]]}}]}"#;

    fn test_router() -> Router {
        let engine = SkyEngine::new(
            Arc::new(InMemoryStarCatalog::new(Vec::new())),
            Arc::new(FigureCache::new(
                Arc::new(StaticFigureSource::new(FIGURES)),
                Arc::new(InMemoryFigureStore::new()),
            )),
            Arc::new(StaticEphemeris::uniform(EquatorialPosition::new(0.0, 0.0))),
        );
        create_router(AppState::new(Arc::new(engine)))
    }

    fn post_generate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["figures_loaded"], false);
    }

    #[tokio::test]
    async fn test_generate_returns_snapshot() {
        let response = test_router()
            .oneshot(post_generate(
                r#"{"lat": 20.689, "lon": -88.201, "datetime_utc": "2026-01-25 16:51:00"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["metadata"]["datetime_utc"], "2026-01-25 16:51:00");
        assert_eq!(body["solar_system"].as_array().unwrap().len(), 9);
        assert_eq!(body["constellations"][0]["id"], "Ori");
        assert_eq!(body["constellations"][0]["name"], "Orion");
    }

    #[tokio::test]
    async fn test_bad_datetime_is_client_error() {
        let response = test_router()
            .oneshot(post_generate(
                r#"{"lat": 0.0, "lon": 0.0, "datetime_utc": "yesterday"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_missing_field_is_client_error() {
        let response = test_router()
            .oneshot(post_generate(r#"{"lat": 0.0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "Invalid request body");
        assert!(body["details"].as_str().unwrap().contains("lon"));
    }

    #[tokio::test]
    async fn test_figure_fetch_failure_is_server_error() {
        let engine = SkyEngine::new(
            Arc::new(InMemoryStarCatalog::new(Vec::new())),
            Arc::new(FigureCache::new(
                Arc::new(StaticFigureSource::unreachable()),
                Arc::new(InMemoryFigureStore::new()),
            )),
            Arc::new(StaticEphemeris::uniform(EquatorialPosition::new(0.0, 0.0))),
        );
        let response = create_router(AppState::new(Arc::new(engine)))
            .oneshot(post_generate(
                r#"{"lat": 0.0, "lon": 0.0, "datetime_utc": "2024-03-20T12:00:00Z"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["code"], "CATALOG_FETCH_FAILED");
    }
}
