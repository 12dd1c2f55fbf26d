//! Unauthenticated liveness probe.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// `GET /health` -> `{ "status": "ok" }`.
pub fn router() -> Router<crate::state::AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
