//! Configuration module for the Solar client.
//!
//! Provides configuration management including the API key, base URL,
//! model identifier, and request timeout.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::errors::{SolarError, SolarResult};

/// Default base URL for the Upstage Solar API.
pub const DEFAULT_BASE_URL: &str = "https://api.upstage.ai/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "solar-pro2";

/// Default request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the required API key.
pub const API_KEY_ENV: &str = "UPSTAGE_API_KEY";

/// Configuration for the Solar client.
#[derive(Clone)]
pub struct SolarConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests.
    pub base_url: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl SolarConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SolarConfigBuilder {
        SolarConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `UPSTAGE_API_KEY` (required): API key for authentication
    /// - `UPSTAGE_BASE_URL` (optional): Custom base URL
    /// - `UPSTAGE_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> SolarResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| SolarError::Configuration {
            message: format!("{API_KEY_ENV} environment variable not set"),
        })?;

        let mut builder = SolarConfigBuilder::new().api_key(api_key);

        if let Ok(base_url) = std::env::var("UPSTAGE_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("UPSTAGE_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        if key.len() > 4 {
            format!("...{}", &key[key.len() - 4..])
        } else {
            "****".to_string()
        }
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for SolarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolarConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for `SolarConfig`.
#[derive(Default)]
pub struct SolarConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
}

impl SolarConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SolarResult<SolarConfig> {
        let api_key = self.api_key.ok_or_else(|| SolarError::Configuration {
            message: "API key is required".to_string(),
        })?;

        if api_key.trim().is_empty() {
            return Err(SolarError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        // HTTPS required, except loopback hosts used by local test servers
        if !base_url.starts_with("https://") && !is_loopback_url(&base_url) {
            return Err(SolarError::Configuration {
                message: "Base URL must use HTTPS".to_string(),
            });
        }

        Ok(SolarConfig {
            api_key: SecretString::new(api_key),
            base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

fn is_loopback_url(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("http://") else {
        return false;
    };
    if rest.starts_with("[::1]") {
        return true;
    }
    let host = rest.split(['/', ':']).next().unwrap_or_default();
    host == "127.0.0.1" || host == "localhost"
}
