//! Catalog HTTP client implementation

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures_util::future::try_join_all;
use reqwest::{Client, StatusCode};
use reprezzent_shared_config::{CatalogConfig, DownloadsConfig};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::download::{DownloadHandle, DownloadStore};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Playlist, PlaylistsResponse, RawTrack, Track, TrackStubsResponse};

/// Maximum error body size carried in an error variant
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Default number of retry attempts for transient failures
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds)
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Music catalog API client
///
/// One client is bound per actor; the access token is supplied once at
/// construction, never per call. The client itself holds no browsing
/// state and is cheap to clone.
#[derive(Clone)]
pub struct CatalogClient {
    http_client: Client,
    config: CatalogConfig,
    token: String,
    downloads: DownloadStore,
    max_retries: u32,
    retry_base_delay_ms: u64,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.config.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl CatalogClient {
    /// Create a new catalog client for one actor
    ///
    /// # Errors
    /// Returns `CatalogError::MissingToken` if the token is empty.
    pub fn new(
        config: &CatalogConfig,
        downloads: DownloadsConfig,
        token: impl Into<String>,
    ) -> CatalogResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(CatalogError::MissingToken);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("Reprezzent/1.0")
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
            token,
            downloads: DownloadStore::new(downloads),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: RETRY_BASE_DELAY_MS,
        })
    }

    /// Set retry configuration
    pub fn with_retry_config(mut self, max_retries: u32, base_delay_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_base_delay_ms = base_delay_ms;
        self
    }

    /// Execute an operation with retry logic for transient failures
    async fn with_retry<T, F, Fut>(&self, operation: F) -> CatalogResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay_ms = self.retry_base_delay_ms * 2u64.pow(attempt);
                    warn!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "catalog request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Truncate an error body so error variants stay bounded
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }
        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);
        format!("{}... (truncated)", &body[..truncate_at])
    }

    /// Make an authenticated GET request and classify failure statuses
    async fn get_response(&self, url: &str) -> CatalogResult<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout
                } else {
                    CatalogError::Http(e)
                }
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CatalogError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("catalog API rate limited");
                Err(CatalogError::RateLimited)
            }
            status if !status.is_success() => {
                let body = Self::truncate_error_body(response.text().await.unwrap_or_default());
                Err(CatalogError::Api {
                    status: status.as_u16(),
                    body,
                })
            }
            _ => Ok(response),
        }
    }

    /// Make an authenticated GET request and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> CatalogResult<T> {
        let text = self.get_response(url).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch all playlists owned by the authenticated actor
    ///
    /// # Errors
    /// Any remote or auth failure; the caller treats every error as
    /// "catalog unavailable".
    #[instrument(skip(self))]
    pub async fn list_user_playlists(&self) -> CatalogResult<Vec<Playlist>> {
        debug!("fetching user playlists from catalog");

        let url = self.config.playlists_url();
        let response: PlaylistsResponse = self.with_retry(|| self.get_json(&url)).await?;

        let playlists: Vec<Playlist> = response.playlists.into_iter().map(Into::into).collect();
        debug!(playlist_count = playlists.len(), "fetched user playlists");
        Ok(playlists)
    }

    /// Fetch a single fully resolved track
    #[instrument(skip(self))]
    pub async fn fetch_track(&self, track_id: &str) -> CatalogResult<Track> {
        let url = self.config.track_url(track_id);
        let raw: RawTrack = self.with_retry(|| self.get_json(&url)).await?;
        Ok(raw.into())
    }

    /// Materialize the full, ordered track list of a playlist
    ///
    /// The catalog's playlist-tracks endpoint returns lightweight stubs;
    /// every stub is resolved into a full [`Track`] before returning.
    /// If any single stub fails to resolve, the whole operation fails and
    /// no partial list is returned.
    #[instrument(skip(self), fields(playlist = %playlist.title))]
    pub async fn materialize_tracks(&self, playlist: &Playlist) -> CatalogResult<Vec<Track>> {
        debug!(playlist_id = %playlist.id, "materializing playlist tracks");

        let url = self.config.playlist_tracks_url(&playlist.id);
        let stubs: TrackStubsResponse = self.with_retry(|| self.get_json(&url)).await?;

        // One failed stub invalidates the batch; try_join_all short-circuits.
        let tracks = try_join_all(
            stubs
                .tracks
                .iter()
                .map(|stub| self.fetch_track(&stub.id)),
        )
        .await?;

        debug!(
            playlist_id = %playlist.id,
            track_count = tracks.len(),
            "materialized playlist tracks"
        );
        Ok(tracks)
    }

    /// Fetch a track's raw audio payload
    async fn fetch_audio(&self, track: &Track) -> CatalogResult<Vec<u8>> {
        let response = self
            .get_response(&self.config.track_download_url(&track.id))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Resolve a downloadable audio file for a track
    ///
    /// Idempotent: if a file already exists under the derived name, its
    /// handle is returned without touching the network. Otherwise the
    /// payload is fetched and persisted atomically. Playlist downloads pass
    /// the playlist title as `folder`; standalone downloads pass `None` and
    /// land in the flat default directory.
    #[instrument(skip(self), fields(track = %track.title))]
    pub async fn resolve_download(
        &self,
        track: &Track,
        folder: Option<&str>,
    ) -> CatalogResult<DownloadHandle> {
        self.downloads
            .resolve(track, folder, || self.fetch_audio(track))
            .await
    }

    /// The download store backing this client
    pub fn downloads(&self) -> &DownloadStore {
        &self.downloads
    }
}
