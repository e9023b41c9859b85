//! Error types for the Solar client.
//!
//! Provides the error taxonomy for the completion client covering
//! configuration, authentication, validation, API, and transport failures.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for Solar operations.
pub type SolarResult<T> = Result<T, SolarError>;

/// Error type for Solar client operations.
#[derive(Debug, Error)]
pub enum SolarError {
    /// Configuration error (invalid API key, base URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Authentication error (invalid or missing API key).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message from the API.
        message: String,
        /// Hint about the API key (last 4 chars).
        api_key_hint: Option<String>,
    },

    /// Validation error (request validation failed).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The parameter that caused the error.
        param: Option<String>,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message.
        message: String,
        /// Duration to wait before retrying, if the API provided one.
        retry_after: Option<Duration>,
    },

    /// Server error (5xx status codes).
    #[error("Server error (HTTP {status_code}): {message}")]
    Server {
        /// Error message.
        message: String,
        /// HTTP status code.
        status_code: u16,
        /// Request ID for debugging.
        request_id: Option<String>,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
        /// Underlying cause.
        cause: Option<String>,
    },

    /// Timeout error.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Unknown error.
    #[error("Unknown error (HTTP {status}): {message}")]
    Unknown {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Raw response body.
        body: Option<String>,
    },
}

impl SolarError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SolarError::Validation {
            message: message.into(),
            param: None,
        }
    }

    /// Creates a validation error with parameter.
    pub fn validation_param(message: impl Into<String>, param: impl Into<String>) -> Self {
        SolarError::Validation {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        SolarError::Authentication {
            message: message.into(),
            api_key_hint: None,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        SolarError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a server error.
    pub fn server(status_code: u16, message: impl Into<String>) -> Self {
        SolarError::Server {
            message: message.into(),
            status_code,
            request_id: None,
        }
    }

    /// Returns the retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            SolarError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// API error response from the completion API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// The error details.
    pub error: ApiErrorDetail,
}

/// Detailed API error information.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// The error type.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// The error message.
    pub message: String,
    /// The parameter that caused the error.
    pub param: Option<String>,
    /// The error code.
    pub code: Option<String>,
}

impl From<reqwest::Error> for SolarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SolarError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            SolarError::Network {
                message: err.to_string(),
                cause: None,
            }
        } else {
            SolarError::Unknown {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: err.to_string(),
                body: None,
            }
        }
    }
}

impl From<serde_json::Error> for SolarError {
    fn from(err: serde_json::Error) -> Self {
        SolarError::Serialization {
            message: err.to_string(),
        }
    }
}
