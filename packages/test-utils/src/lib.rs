//! Shared test utilities for the Reprezzent workspace
//!
//! This crate provides mock implementations of the external services the
//! bot talks to, for testing without network dependencies.
//!
//! # Mock Services
//!
//! - [`MockCatalogServer`] - Mock music catalog for navigator and download tests
//! - [`MockAssistantServer`] - Mock chat-completions endpoint for dialog tests
//!
//! # Example
//!
//! ```rust,ignore
//! use reprezzent_test_utils::{MockCatalogServer, PlaylistFixture};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let catalog = MockCatalogServer::start().await;
//!     catalog
//!         .mock_playlists_success(vec![PlaylistFixture::named("pl-1", "Road Trip", 12)])
//!         .await;
//!
//!     // Point your CatalogConfig at catalog.url()
//! }
//! ```

mod assistant;
mod catalog;

pub use assistant::MockAssistantServer;
pub use catalog::{MockCatalogServer, PlaylistFixture, TrackFixture};
