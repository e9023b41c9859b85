//! The study-aid generation endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::generate::{self, GenerateError, GenerateRequest, GenerateResponse};
use crate::server::AppState;

/// Error response for the HTTP surface.
///
/// Upstream failure detail is logged server-side and never echoed to the
/// caller; only the generic message leaves the process.
#[derive(Debug)]
pub enum ApiError {
    /// The request was invalid (HTTP 400).
    BadRequest(String),
    /// A completion call failed (HTTP 500).
    Upstream,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Upstream => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream completion call failed".to_string(),
            ),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// `POST /api/generate`
///
/// Body: `{"text": string, "mode": "summary"|"quiz"|"assignments"|"all"}`
/// (mode defaults to `all`). On success every requested field is populated
/// and the others are explicit nulls; on any upstream failure the whole
/// request fails with a generic 500 and no partial fields.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    match generate::generate(&state.client, request).await {
        Ok(response) => Ok(Json(response)),
        Err(GenerateError::EmptyText) => {
            warn!("rejected generation request with blank text");
            Err(ApiError::BadRequest("text must not be empty".to_string()))
        }
        Err(GenerateError::Completion(err)) => {
            error!(error = %err, "study aid generation failed");
            Err(ApiError::Upstream)
        }
    }
}
