//! Bot error types

use reprezzent_assistant_client::AssistantError;
use reprezzent_catalog_client::CatalogError;
use thiserror::Error;

use crate::services::{BalabobaError, WeatherError};

#[derive(Error, Debug)]
pub enum BotError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("assistant error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("text generation error: {0}")]
    Balaboba(#[from] BalabobaError),

    #[error("configuration error: {0}")]
    Config(#[from] reprezzent_shared_config::ConfigError),

    #[error("no catalog session; connect with /connect <token> first")]
    NotConnected,
}

pub type BotResult<T> = Result<T, BotError>;

impl BotError {
    /// Short reply shown to the actor; full detail goes to the log only
    pub fn user_message(&self) -> String {
        match self {
            BotError::Catalog(CatalogError::Unauthorized) => {
                "Your catalog token was rejected. Reconnect with /connect <token>.".to_string()
            }
            BotError::Catalog(_) => {
                "The music catalog is unavailable right now. Try again in a moment.".to_string()
            }
            BotError::Assistant(_) => {
                "The assistant is unavailable right now. Try again in a moment.".to_string()
            }
            BotError::Weather(_) => "Could not fetch the weather for that city.".to_string(),
            BotError::Balaboba(BalabobaError::FilteredQuery) => {
                "The generator refused that text. Try a different one.".to_string()
            }
            BotError::Balaboba(_) => {
                "Text generation is unavailable right now. Try again in a moment.".to_string()
            }
            BotError::Config(e) => format!("Configuration problem: {}", e),
            BotError::NotConnected => {
                "No catalog session. Connect with /connect <token> first.".to_string()
            }
        }
    }
}
