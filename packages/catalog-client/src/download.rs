//! On-disk download store
//!
//! Downloads are keyed by a deterministic filename derived from the track
//! title and artist list. The store is shared across actors, so the write
//! path avoids check-then-create races: payloads are written to a unique
//! temp file in the target directory and renamed into place atomically.
//! Two racing writers of the same track both end with a complete file.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::Track;
use reprezzent_shared_config::DownloadsConfig;

/// Characters not allowed in derived filenames
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];

/// Handle to a downloaded audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHandle {
    /// Absolute or root-relative path of the audio file
    pub path: PathBuf,
    /// Whether this call fetched the payload (false: file already existed)
    pub freshly_fetched: bool,
}

/// Store for downloaded audio files
#[derive(Debug, Clone)]
pub struct DownloadStore {
    config: DownloadsConfig,
}

impl DownloadStore {
    /// Create a store over the configured download root
    pub fn new(config: DownloadsConfig) -> Self {
        Self { config }
    }

    /// Derive the stable filename for a track
    ///
    /// Tracks with identical title and artist list map to the same file;
    /// that collision is accepted.
    pub fn file_name(track: &Track) -> String {
        let base = if track.artists.is_empty() {
            track.title.clone()
        } else {
            format!("{} - {}", track.title, track.artist_line())
        };
        let sanitized = sanitize_component(&base);
        if sanitized.is_empty() {
            format!("{}.mp3", track.id)
        } else {
            format!("{}.mp3", sanitized)
        }
    }

    /// The directory a download lands in for the given folder key
    pub fn folder_dir(&self, folder: Option<&str>) -> PathBuf {
        let component = sanitize_component(folder.unwrap_or(&self.config.default_folder));
        let component = if component.is_empty() {
            self.config.default_folder.clone()
        } else {
            component
        };
        self.config.root.join(component)
    }

    /// The full path a track resolves to for the given folder key
    pub fn path_for(&self, track: &Track, folder: Option<&str>) -> PathBuf {
        self.folder_dir(folder).join(Self::file_name(track))
    }

    /// Resolve a download, fetching the payload only when no local copy exists
    ///
    /// Directory creation is create-if-absent. The fetch closure runs only
    /// on a miss; its result is persisted via temp file + atomic rename.
    pub async fn resolve<F, Fut>(
        &self,
        track: &Track,
        folder: Option<&str>,
        fetch: F,
    ) -> CatalogResult<DownloadHandle>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogResult<Vec<u8>>>,
    {
        let dir = self.folder_dir(folder);
        fs::create_dir_all(&dir).await?;

        let path = dir.join(Self::file_name(track));
        if fs::try_exists(&path).await? {
            debug!(path = %path.display(), "download already present");
            return Ok(DownloadHandle {
                path,
                freshly_fetched: false,
            });
        }

        let payload = fetch().await?;
        write_atomic(&dir, &path, &payload).await?;
        info!(
            track = %track.title,
            path = %path.display(),
            bytes = payload.len(),
            "downloaded track"
        );

        Ok(DownloadHandle {
            path,
            freshly_fetched: true,
        })
    }
}

/// Write a payload to a unique temp file in `dir`, then rename onto `path`
async fn write_atomic(dir: &Path, path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let tmp = dir.join(format!(".{}.part", Uuid::new_v4()));
    fs::write(&tmp, payload).await?;
    match fs::rename(&tmp, path).await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Leave no partial files behind on a failed rename.
            let _ = fs::remove_file(&tmp).await;
            Err(e)
        }
    }
}

/// Strip path-hostile characters from a single path component
fn sanitize_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
