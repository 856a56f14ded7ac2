//! Welcome, status, and health endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /
async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to my personal website backend!" }))
}

/// GET /status
async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/status", get(status))
        .route("/health", get(health))
}
