//! Reprezzent bot library
//!
//! This module exposes the bot's components for use in integration tests
//! and as a library: the browsing navigator, the per-actor session
//! registry, and the command router.

pub mod browser;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod services;
pub mod sessions;

// Re-export commonly used types
pub use browser::{BrowseMode, Frame, Navigator, PageItems};
pub use commands::Router;
pub use error::{BotError, BotResult};
pub use sessions::{ActorId, SessionRegistry};
