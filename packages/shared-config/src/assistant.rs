//! Assistant (language model) configuration types

use crate::{get_env_or_default, get_required_env, parse_env, ConfigResult};

/// Assistant service configuration
///
/// Points at any OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Assistant API base URL
    pub base_url: String,

    /// API key for the assistant service
    pub api_key: String,

    /// Model identifier (e.g. gpt-4o-mini)
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens for a single completion
    pub max_tokens: u32,

    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,
}

impl AssistantConfig {
    /// Load assistant configuration from environment variables
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` when `ASSISTANT_API_KEY` is not
    /// set; the assistant integration is optional and callers treat this as
    /// "not configured".
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            base_url: get_env_or_default("ASSISTANT_URL", "https://api.openai.com"),
            api_key: get_required_env("ASSISTANT_API_KEY")?,
            model: get_env_or_default("ASSISTANT_MODEL", "gpt-4o-mini"),
            timeout_secs: parse_env("ASSISTANT_TIMEOUT", 60)?,
            max_tokens: parse_env("ASSISTANT_MAX_TOKENS", 256)?,
            temperature: parse_env("ASSISTANT_TEMPERATURE", 0.0)?,
        })
    }

    /// Create a configuration with a custom URL and key (useful for testing)
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
            max_tokens: 256,
            temperature: 0.0,
        }
    }

    /// Get the full URL for the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}
