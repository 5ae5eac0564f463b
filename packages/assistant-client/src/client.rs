//! Assistant HTTP client implementation

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use reprezzent_shared_config::AssistantConfig;
use tracing::{debug, instrument, warn};

use crate::error::{AssistantError, AssistantResult};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Maximum error body size carried in an error variant
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Default number of retry attempts for transient failures
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Base delay for exponential backoff (milliseconds)
const RETRY_BASE_DELAY_MS: u64 = 250;

/// Assistant API client
#[derive(Clone)]
pub struct AssistantClient {
    http_client: Client,
    config: AssistantConfig,
    max_retries: u32,
}

impl fmt::Debug for AssistantClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl AssistantClient {
    /// Create a new assistant client from configuration
    ///
    /// # Errors
    /// Returns `AssistantError::MissingApiKey` if the configured key is empty.
    pub fn new(config: &AssistantConfig) -> AssistantResult<Self> {
        if config.api_key.is_empty() {
            return Err(AssistantError::MissingApiKey);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("Reprezzent/1.0")
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Execute an operation with retry logic for transient failures
    async fn with_retry<T, F, Fut>(&self, operation: F) -> AssistantResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = AssistantResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay_ms = RETRY_BASE_DELAY_MS * 2u64.pow(attempt);
                    warn!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "assistant request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Truncate an error body so error variants stay bounded
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }
        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);
        format!("{}... (truncated)", &body[..truncate_at])
    }

    async fn complete_once(&self, prompt: &str) -> AssistantResult<String> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .http_client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else {
                    AssistantError::Http(e)
                }
            })?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(AssistantError::RateLimited),
            status if !status.is_success() => {
                let body = Self::truncate_error_body(response.text().await.unwrap_or_default());
                return Err(AssistantError::Api {
                    status: status.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let text = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&text)?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AssistantError::EmptyCompletion)
    }

    /// Ask the model for a single completion of a prompt
    #[instrument(skip(self, prompt))]
    pub async fn complete(&self, prompt: &str) -> AssistantResult<String> {
        debug!(prompt_len = prompt.len(), "requesting completion");
        let answer = self.with_retry(|| self.complete_once(prompt)).await?;
        debug!(answer_len = answer.len(), "received completion");
        Ok(answer)
    }
}
