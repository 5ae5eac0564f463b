//! Download directory configuration types

use std::path::PathBuf;

use crate::{get_env_or_default, ConfigResult};

/// Download directory configuration
///
/// The download root is shared across actors. Playlist downloads land in a
/// subdirectory named after the playlist title; standalone track downloads
/// land in a flat default subdirectory.
#[derive(Debug, Clone)]
pub struct DownloadsConfig {
    /// Root directory for downloaded audio
    pub root: PathBuf,

    /// Subdirectory for standalone track downloads
    pub default_folder: String,
}

impl DownloadsConfig {
    /// Load download configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            root: PathBuf::from(get_env_or_default("DOWNLOAD_DIR", "downloads")),
            default_folder: get_env_or_default("DOWNLOAD_DEFAULT_FOLDER", "tracks"),
        })
    }

    /// Create a configuration rooted at a specific directory (useful for testing)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_folder: "tracks".to_string(),
        }
    }
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("downloads"),
            default_folder: "tracks".to_string(),
        }
    }
}
