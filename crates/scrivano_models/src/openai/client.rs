//! OpenAI completions API client.

use super::conversion::{from_openai_response, to_openai_request};
use super::dto::{OpenAiCompletionRequest, OpenAiCompletionResponse};
use crate::{OpenAiConfig, RequestLimiter, RetryPolicy};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scrivano_core::{CompletionRequest, CompletionResponse};
use scrivano_error::{BackendError, ConfigError, ScrivanoResult};
use scrivano_interface::TextGenerator;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, instrument, warn};

/// OpenAI completions API client.
///
/// The client is stateless per call; clones share the HTTP connection pool
/// and the requests-per-minute limiter, so independent executions can use
/// one client concurrently.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    api_url: String,
    retry: Option<RetryPolicy>,
    limiter: RequestLimiter,
}

impl OpenAiClient {
    /// Creates a new client with an explicit API key.
    ///
    /// Retry and throttling behavior come from `config`; a zero
    /// `retry.max_attempts` disables retrying entirely.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    #[instrument(skip(api_key, config), fields(model = %config.model))]
    pub fn with_api_key(api_key: impl Into<String>, config: &OpenAiConfig) -> ScrivanoResult<Self> {
        debug!("Creating new OpenAI client");

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {e}")))?;

        let retry = (config.retry.max_attempts > 0).then(|| RetryPolicy::from(&config.retry));

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_url: config.api_url.clone(),
            retry,
            limiter: RequestLimiter::new(config.requests_per_minute),
        })
    }

    /// Creates a new client reading the key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an `Auth` error if the variable is not set.
    #[instrument(skip(config), fields(model = %config.model))]
    pub fn from_env(config: &OpenAiConfig) -> ScrivanoResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|e| BackendError::auth(format!("OPENAI_API_KEY not set: {e}")))?;
        Self::with_api_key(api_key, config)
    }

    /// Sends one request to the completions endpoint.
    async fn send_completion(
        &self,
        request: &OpenAiCompletionRequest,
    ) -> Result<OpenAiCompletionResponse, BackendError> {
        debug!("Sending request to OpenAI completions API");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                if e.is_timeout() {
                    BackendError::timeout(format!("Request timed out: {e}"))
                } else {
                    BackendError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    BackendError::auth(format!("Status {status}: {body}"))
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    BackendError::quota(format!("Status {status}: {body}"))
                }
                _ => BackendError::network(format!("Status {status}: {body}")),
            });
        }

        response
            .json::<OpenAiCompletionResponse>()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to parse OpenAI response");
                BackendError::network(format!("Failed to parse completion response: {e}"))
            })
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("retry", &self.retry)
            .field("limiter", &self.limiter)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &CompletionRequest) -> ScrivanoResult<CompletionResponse> {
        let wire = to_openai_request(req, &self.model, self.max_tokens)?;

        self.limiter.acquire().await;

        let response = match &self.retry {
            Some(policy) => {
                Retry::spawn(policy.strategy(), || async {
                    self.send_completion(&wire).await.map_err(|e| {
                        if e.kind().is_transient() {
                            warn!(error = %e, "Completion request failed, will retry");
                            RetryError::Transient {
                                err: e,
                                retry_after: None,
                            }
                        } else {
                            RetryError::Permanent(e)
                        }
                    })
                })
                .await?
            }
            None => self.send_completion(&wire).await?,
        };

        let completion = from_openai_response(&response)?;
        debug!(
            finish_reason = ?completion.finish_reason(),
            "Received completion from OpenAI"
        );
        Ok(completion)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
