//! Novelty text generation via the Balaboba API
//!
//! Two-step flow: list the available text styles, then continue the query
//! with the first one. The service needs no credentials; it is enabled by
//! configuring its base URL.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://yandex.ru";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum BalabobaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text generation API returned status {0}")]
    Api(u16),

    #[error("the query was rejected by the content filter")]
    FilteredQuery,

    #[error("the generator produced no text")]
    EmptyGeneration,
}

pub type BalabobaResult<T> = Result<T, BalabobaError>;

// Wire types. A text style entry is `[id, name, description]`; only the
// id is consumed.

#[derive(Debug, Deserialize)]
struct TextStylesResponse {
    intros: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    bad_query: u8,
}

/// Balaboba text generation client
#[derive(Debug, Clone)]
pub struct BalabobaClient {
    http_client: Client,
    base_url: String,
}

impl BalabobaClient {
    pub fn new() -> BalabobaResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> BalabobaResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("Reprezzent/1.0")
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    fn check_status(response: &reqwest::Response) -> BalabobaResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(BalabobaError::Api(response.status().as_u16()))
        }
    }

    /// The default text style id, from the style listing
    async fn default_style(&self) -> BalabobaResult<u64> {
        let url = format!("{}/lab/api/yalm/intros?lang=en", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        Self::check_status(&response)?;
        let styles: TextStylesResponse = response.json().await?;

        Ok(styles
            .intros
            .first()
            .and_then(|entry| entry.get(0))
            .and_then(|id| id.as_u64())
            .unwrap_or(0))
    }

    /// Continue `query` with generated text
    #[instrument(skip(self, query))]
    pub async fn generate(&self, query: &str) -> BalabobaResult<String> {
        let style = self.default_style().await?;
        debug!(style, query_len = query.len(), "requesting text generation");

        let url = format!("{}/lab/api/yalm/text3", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({
                "query": query,
                "intro": style,
                "filter": 1,
            }))
            .send()
            .await?;
        Self::check_status(&response)?;
        let generation: GenerationResponse = response.json().await?;

        if generation.bad_query != 0 {
            return Err(BalabobaError::FilteredQuery);
        }
        if generation.text.trim().is_empty() {
            return Err(BalabobaError::EmptyGeneration);
        }
        Ok(generation.text)
    }
}
