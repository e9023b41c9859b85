//! Solar API client.
//!
//! Provides the main client interface for the Upstage Solar completion API.

use std::sync::Arc;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{SolarConfig, SolarConfigBuilder};
use crate::errors::{SolarError, SolarResult};
use crate::generate::SamplingProfile;
use crate::services::CompletionService;
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::chat::ChatRequest;

/// The main Solar client.
///
/// Wraps the completion API behind a single reusable call: a system/user
/// prompt pair with fixed sampling parameters in, generated text out.
///
/// # Example
///
/// ```rust,no_run
/// use studyaid::client::SolarClient;
/// use studyaid::generate::SamplingProfile;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SolarClient::builder()
///         .api_key("up_your_api_key")
///         .build()?;
///
///     let text = client
///         .complete(
///             "You are a teaching assistant.",
///             "Summarize: photosynthesis converts light into chemical energy.",
///             SamplingProfile { temperature: 0.3, max_tokens: 1024 },
///         )
///         .await?;
///     println!("{text}");
///     Ok(())
/// }
/// ```
pub struct SolarClient {
    config: SolarConfig,
    completions: CompletionService,
}

impl SolarClient {
    /// Creates a new client builder.
    pub fn builder() -> SolarClientBuilder {
        SolarClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `UPSTAGE_API_KEY` and optionally `UPSTAGE_BASE_URL` and
    /// `UPSTAGE_TIMEOUT`. Fails when the API key is missing.
    pub fn from_env() -> SolarResult<Self> {
        let config = SolarConfig::from_env()?;
        SolarClientBuilder::new().config(config).build()
    }

    /// Returns the completions service.
    pub fn completions(&self) -> &CompletionService {
        &self.completions
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SolarConfig {
        &self.config
    }

    /// Sends one completion request and returns the generated text.
    ///
    /// Builds a system/user message pair against the configured model with
    /// the given sampling profile, and extracts the first-choice content.
    /// Errors from the transport or the API propagate to the caller; a
    /// well-formed response without content is an error as well.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        sampling: SamplingProfile,
    ) -> SolarResult<String> {
        let request = ChatRequest::builder()
            .model(self.config.model.clone())
            .system(system_prompt)
            .user(user_prompt)
            .temperature(sampling.temperature)
            .max_tokens(sampling.max_tokens)
            .build()?;

        let response = self.completions.create(request).await?;

        response
            .content()
            .map(str::to_owned)
            .ok_or_else(|| SolarError::Serialization {
                message: "completion response contained no message content".to_string(),
            })
    }
}

impl std::fmt::Debug for SolarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolarClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the Solar client.
#[derive(Default)]
pub struct SolarClientBuilder {
    config_builder: SolarConfigBuilder,
    config: Option<SolarConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl SolarClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing configuration.
    pub fn config(mut self, config: SolarConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.model(model);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the client.
    pub fn build(self) -> SolarResult<SolarClient> {
        let config = match self.config {
            Some(c) => c,
            None => self.config_builder.build()?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout).map_err(|e| {
                    SolarError::Configuration {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let completions = CompletionService::new(transport, auth);

        Ok(SolarClient {
            config,
            completions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::SamplingProfile;
    use crate::mocks::{fixtures, MockTransport};

    fn client_with(transport: Arc<MockTransport>) -> SolarClient {
        SolarClient::builder()
            .api_key("up_test_key_12345")
            .transport(transport)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = SolarClientBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_with_api_key() {
        let client = SolarClient::builder()
            .api_key("up_test_key_12345")
            .build()
            .unwrap();

        assert_eq!(client.config().model, crate::config::DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_text() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::chat_completion_body("Here is a summary."));

        let client = client_with(Arc::clone(&transport));
        let text = client
            .complete(
                "system prompt",
                "user prompt",
                SamplingProfile {
                    temperature: 0.3,
                    max_tokens: 1024,
                },
            )
            .await
            .unwrap();

        assert_eq!(text, "Here is a summary.");

        let body: serde_json::Value =
            serde_json::from_slice(&transport.last_request().unwrap().body.unwrap()).unwrap();
        assert_eq!(body["model"], crate::config::DEFAULT_MODEL);
        assert_eq!(body["messages"][0]["content"], "system prompt");
        assert_eq!(body["messages"][1]["content"], "user prompt");
    }

    #[tokio::test]
    async fn test_complete_errors_on_empty_choices() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&serde_json::json!({
            "id": "chatcmpl-empty",
            "object": "chat.completion",
            "created": 1699999999,
            "model": "solar-pro2",
            "choices": []
        }));

        let client = client_with(transport);
        let err = client
            .complete(
                "system",
                "user",
                SamplingProfile {
                    temperature: 0.3,
                    max_tokens: 1024,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SolarError::Serialization { .. }));
    }
}
