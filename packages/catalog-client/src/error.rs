//! Catalog API error types

use thiserror::Error;

/// Music catalog client errors
///
/// Any variant reaching the command router means "catalog unavailable";
/// logical not-found outcomes inside the navigator are represented as
/// `Option`/`bool` returns, never as errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Access token is missing
    #[error("an access token is required for catalog access")]
    MissingToken,

    /// Access token was rejected by the catalog
    #[error("catalog rejected the access token")]
    Unauthorized,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog returned a non-success status
    #[error("catalog error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Rate limited by the catalog
    #[error("rate limited by the catalog")]
    RateLimited,

    /// Request timed out
    #[error("request to the catalog timed out")]
    Timeout,

    /// Persisting a downloaded payload failed
    #[error("failed to persist download: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Check if this error is retryable (transient failure)
    ///
    /// Retries on timeouts, rate limiting, transport errors, and server
    /// errors (5xx). Does NOT retry on auth or client errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Timeout | CatalogError::RateLimited => true,
            CatalogError::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                matches!(e.status(), Some(status) if status.is_server_error())
            }
            CatalogError::Api { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
