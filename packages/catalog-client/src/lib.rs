//! Music catalog API client for Reprezzent
//!
//! This crate adapts the external music catalog into the shapes the
//! browsing navigator consumes:
//! - Listing the authenticated actor's playlists
//! - Materializing a playlist's lightweight track stubs into full tracks
//! - Downloading audio payloads into a shared content directory
//!
//! # Example
//!
//! ```rust,no_run
//! use reprezzent_catalog_client::CatalogClient;
//! use reprezzent_shared_config::{CatalogConfig, DownloadsConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::from_env()?;
//! let downloads = DownloadsConfig::from_env()?;
//! let client = CatalogClient::new(&config, downloads, "actor-token")?;
//!
//! for playlist in client.list_user_playlists().await? {
//!     println!("{} ({} tracks)", playlist.title, playlist.track_count);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod download;
mod error;
mod models;

pub use client::CatalogClient;
pub use download::{DownloadHandle, DownloadStore};
pub use error::{CatalogError, CatalogResult};
pub use models::{Playlist, Track};
