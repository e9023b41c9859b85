//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`
///
/// Fixed payload, no side effects, no dependency on the upstream API.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
