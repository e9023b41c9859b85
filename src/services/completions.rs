//! Chat completions service.
//!
//! Sends a single completion request to the upstream API and maps error
//! responses to the [`SolarError`] taxonomy. No retries and no throttling:
//! every failure propagates to the caller unchanged.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::auth::AuthProvider;
use crate::errors::{ApiErrorResponse, SolarError};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::types::chat::{ChatRequest, ChatResponse};

/// Chat completions service.
pub struct CompletionService {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
}

impl CompletionService {
    /// Creates a new completions service.
    pub fn new(transport: Arc<dyn HttpTransport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { transport, auth }
    }

    /// Creates a chat completion.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create(&self, request: ChatRequest) -> Result<ChatResponse, SolarError> {
        request.validate()?;

        let http_request = self.build_request(&request)?;

        let response = self
            .transport
            .send(http_request)
            .await
            .map_err(map_transport_error)?;

        self.parse_response(response)
    }

    /// Builds an HTTP request from a chat request.
    fn build_request(&self, request: &ChatRequest) -> Result<HttpRequest, SolarError> {
        let body = serde_json::to_vec(request).map_err(|e| SolarError::Validation {
            message: format!("Failed to serialize request: {}", e),
            param: None,
        })?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        self.auth.apply_auth(&mut headers);

        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: "chat/completions".to_string(),
            headers,
            body: Some(body),
            timeout: None,
        })
    }

    /// Parses the HTTP response.
    fn parse_response(&self, response: HttpResponse) -> Result<ChatResponse, SolarError> {
        if response.status != 200 {
            return Err(self.parse_error_response(&response));
        }

        serde_json::from_slice(&response.body).map_err(|e| SolarError::Server {
            message: format!("Failed to parse response: {}", e),
            status_code: response.status,
            request_id: response.headers.get("x-request-id").cloned(),
        })
    }

    /// Parses an error response.
    fn parse_error_response(&self, response: &HttpResponse) -> SolarError {
        let request_id = response.headers.get("x-request-id").cloned();

        if let Ok(error_body) = serde_json::from_slice::<ApiErrorResponse>(&response.body) {
            return map_api_error(response.status, error_body, request_id, &response.headers);
        }

        map_error_status(response.status, &response.headers)
    }
}

/// Maps an API error body to the internal error type.
fn map_api_error(
    status: u16,
    error: ApiErrorResponse,
    request_id: Option<String>,
    headers: &HashMap<String, String>,
) -> SolarError {
    let error_type = error.error.error_type.as_deref().unwrap_or("");

    match (status, error_type) {
        (401, _) | (_, "invalid_api_key") => SolarError::Authentication {
            message: error.error.message,
            api_key_hint: None,
        },
        (400, _) | (_, "invalid_request_error") => SolarError::Validation {
            message: error.error.message,
            param: error.error.param,
        },
        (429, _) => SolarError::RateLimit {
            message: error.error.message,
            retry_after: parse_retry_after(headers),
        },
        _ => SolarError::Server {
            message: error.error.message,
            status_code: status,
            request_id,
        },
    }
}

/// Maps a status code to an error when the body is not a structured error.
fn map_error_status(status: u16, headers: &HashMap<String, String>) -> SolarError {
    let request_id = headers.get("x-request-id").cloned();

    match status {
        401 => SolarError::Authentication {
            message: "Invalid API key".to_string(),
            api_key_hint: None,
        },
        429 => SolarError::RateLimit {
            message: "Rate limit exceeded".to_string(),
            retry_after: parse_retry_after(headers),
        },
        500..=599 => SolarError::Server {
            message: format!("Server error: {}", status),
            status_code: status,
            request_id,
        },
        _ => SolarError::Server {
            message: format!("Unexpected status: {}", status),
            status_code: status,
            request_id,
        },
    }
}

fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn map_transport_error(err: TransportError) -> SolarError {
    match err {
        TransportError::Timeout { timeout } => SolarError::Timeout {
            message: format!("request timed out after {timeout:?}"),
        },
        TransportError::Connection { message } => SolarError::Network {
            message,
            cause: None,
        },
        TransportError::InvalidResponse { message } => SolarError::Network {
            message,
            cause: None,
        },
    }
}

impl std::fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionService").finish()
    }
}
