//! Language model client for Reprezzent chat dialogs
//!
//! The bot's dialog mode forwards free text to any OpenAI-compatible
//! chat-completions endpoint through this narrow interface.
//!
//! # Example
//!
//! ```rust,no_run
//! use reprezzent_assistant_client::AssistantClient;
//! use reprezzent_shared_config::AssistantConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AssistantClient::new(&AssistantConfig::from_env()?)?;
//! let answer = client.complete("what is a playlist?").await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::AssistantClient;
pub use error::{AssistantError, AssistantResult};
