//! Assistant API error types

use thiserror::Error;

/// Assistant client errors
#[derive(Error, Debug)]
pub enum AssistantError {
    /// API key is missing
    #[error("an API key is required for assistant access")]
    MissingApiKey,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("failed to parse assistant response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Assistant returned a non-success status
    #[error("assistant error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The model produced no completion text
    #[error("assistant returned an empty completion")]
    EmptyCompletion,

    /// Rate limited by the assistant service
    #[error("rate limited by the assistant service")]
    RateLimited,

    /// Request timed out
    #[error("request to the assistant timed out")]
    Timeout,
}

impl AssistantError {
    /// Check if this error is retryable (transient failure)
    pub fn is_retryable(&self) -> bool {
        match self {
            AssistantError::Timeout | AssistantError::RateLimited => true,
            AssistantError::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                matches!(e.status(), Some(status) if status.is_server_error())
            }
            AssistantError::Api { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

/// Result type for assistant operations
pub type AssistantResult<T> = Result<T, AssistantError>;
