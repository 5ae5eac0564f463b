//! Music catalog configuration types

use crate::{get_env_or_default, parse_env, ConfigResult};

/// Music catalog service configuration
///
/// Actor credentials are supplied separately when a session is bound;
/// this struct only carries the connection-level settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl CatalogConfig {
    /// Load catalog configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            base_url: get_env_or_default("CATALOG_URL", "https://catalog.reprezzent.dev"),
            timeout_secs: parse_env("CATALOG_TIMEOUT", 15)?,
            connect_timeout_secs: parse_env("CATALOG_CONNECT_TIMEOUT", 5)?,
        })
    }

    /// Create a configuration with a custom base URL (useful for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }

    /// Get the full URL for the authenticated-user playlists endpoint
    pub fn playlists_url(&self) -> String {
        format!("{}/api/v1/me/playlists", self.base_url.trim_end_matches('/'))
    }

    /// Get the full URL for a playlist's track list endpoint
    pub fn playlist_tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{}/api/v1/playlists/{}/tracks",
            self.base_url.trim_end_matches('/'),
            playlist_id
        )
    }

    /// Get the full URL for a single track endpoint
    pub fn track_url(&self, track_id: &str) -> String {
        format!(
            "{}/api/v1/tracks/{}",
            self.base_url.trim_end_matches('/'),
            track_id
        )
    }

    /// Get the full URL for a track's audio payload endpoint
    pub fn track_download_url(&self, track_id: &str) -> String {
        format!(
            "{}/api/v1/tracks/{}/download",
            self.base_url.trim_end_matches('/'),
            track_id
        )
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://catalog.reprezzent.dev".to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }
}
