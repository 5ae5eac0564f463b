//! Per-actor browser session
//!
//! Couples the pure [`Navigator`] with a [`CatalogClient`] and serializes
//! all navigation for one actor. The navigator lives behind a std mutex
//! that is only held around pure, non-suspending operations; catalog
//! fetches run outside the lock and their results are applied under a
//! generation check so a cancel issued mid-fetch wins over the late
//! result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use reprezzent_catalog_client::{
    CatalogClient, CatalogResult, DownloadHandle, Playlist, Track,
};
use tracing::{debug, instrument, warn};

use super::frame::{BrowseMode, Frame, Titled};
use super::navigator::{find_by_title, Navigator, PageCursor};

/// Concrete items the current frame resolves to, typed by kind
///
/// Used both for the full visible list and for a single page slice of it.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItems {
    Playlists(Vec<Playlist>),
    Tracks(Vec<Track>),
}

impl PageItems {
    pub fn len(&self) -> usize {
        match self {
            PageItems::Playlists(items) => items.len(),
            PageItems::Tracks(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Titles of the items, in order
    pub fn titles(&self) -> Vec<String> {
        match self {
            PageItems::Playlists(items) => items.iter().map(|p| p.title.clone()).collect(),
            PageItems::Tracks(items) => items.iter().map(|t| t.title.clone()).collect(),
        }
    }

    fn page(&self, cursor: &PageCursor) -> PageItems {
        match self {
            PageItems::Playlists(items) => {
                PageItems::Playlists(cursor.slice(items).to_vec())
            }
            PageItems::Tracks(items) => PageItems::Tracks(cursor.slice(items).to_vec()),
        }
    }
}

/// One actor's browsing state plus the catalog access it needs
///
/// Owned behind an `Arc` in the session registry; all methods take
/// `&self` and are safe to call concurrently, with the navigator mutex
/// serializing state changes per actor.
#[derive(Debug)]
pub struct BrowserSession {
    catalog: CatalogClient,
    navigator: Mutex<Navigator>,
    generation: AtomicU64,
}

impl BrowserSession {
    /// Create a fresh session over an authenticated catalog client
    pub fn new(catalog: CatalogClient, page_size: usize) -> Self {
        Self {
            catalog,
            navigator: Mutex::new(Navigator::new(page_size)),
            generation: AtomicU64::new(0),
        }
    }

    /// The catalog client bound to this session
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    fn lock(&self) -> MutexGuard<'_, Navigator> {
        // A poisoned lock only means a panic mid-pure-op; the stack itself
        // is still valid.
        self.navigator.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Run `f` on the navigator only if no cancel happened since
    /// `generation` was sampled; returns `None` for a stale result
    fn apply_if_current<R>(
        &self,
        generation: u64,
        f: impl FnOnce(&mut Navigator) -> R,
    ) -> Option<R> {
        let mut nav = self.lock();
        if self.current_generation() != generation {
            warn!(generation, "discarding stale fetch result after cancel");
            return None;
        }
        Some(f(&mut nav))
    }

    /// Drop all browsing state and invalidate in-flight fetches
    ///
    /// Always succeeds, also on an already-idle session. A fetch started
    /// before this call still completes, but its result is discarded
    /// instead of repopulating the stack.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let mut nav = self.lock();
        nav.clear();
        debug!("browsing state cleared");
    }

    /// The current browse mode
    pub fn mode(&self) -> BrowseMode {
        self.lock().mode()
    }

    /// Whether anything is being browsed
    pub fn is_browsing(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Current page number, for replies
    pub fn page_number(&self) -> usize {
        self.lock().cursor().page_number()
    }

    /// Fetch the actor's playlists and enter the playlist list
    ///
    /// Returns the first visible page. A cancel racing the fetch wins:
    /// the fetched list is discarded and `None` is returned.
    #[instrument(skip(self))]
    pub async fn open_playlists(&self) -> CatalogResult<Option<PageItems>> {
        let generation = self.current_generation();
        let playlists = self.catalog.list_user_playlists().await?;

        Ok(self.apply_if_current(generation, |nav| {
            let items = PageItems::Playlists(playlists.clone());
            nav.push(Frame::Playlists(playlists));
            nav.set_mode(BrowseMode::BrowsingPlaylists);
            items.page(nav.cursor())
        }))
    }

    /// Resolve the current frame into its concrete item list
    ///
    /// A single-playlist frame is materialized on the fly into its track
    /// list without growing the stack; collection frames resolve to their
    /// own items. `None` for an empty stack or a single-track frame.
    #[instrument(skip(self))]
    pub async fn visible_items(&self) -> CatalogResult<Option<PageItems>> {
        let frame = self.lock().current().cloned();
        match frame {
            None | Some(Frame::Track(_)) => Ok(None),
            Some(Frame::Playlists(playlists)) => Ok(Some(PageItems::Playlists(playlists))),
            Some(Frame::Tracks(tracks)) => Ok(Some(PageItems::Tracks(tracks))),
            Some(Frame::Playlist(playlist)) => {
                let tracks = self.catalog.materialize_tracks(&playlist).await?;
                Ok(Some(PageItems::Tracks(tracks)))
            }
        }
    }

    /// The slice of the visible items on the current page
    pub async fn current_page(&self) -> CatalogResult<Option<PageItems>> {
        let items = match self.visible_items().await? {
            Some(items) => items,
            None => return Ok(None),
        };
        Ok(Some(items.page(self.lock().cursor())))
    }

    /// Advance one page over the visible items
    ///
    /// Returns the new page, or `None` when the request was rejected:
    /// nothing open, already on the last page, or cancelled mid-fetch.
    #[instrument(skip(self))]
    pub async fn page_forward(&self) -> CatalogResult<Option<PageItems>> {
        let generation = self.current_generation();
        let items = match self.visible_items().await? {
            Some(items) => items,
            None => return Ok(None),
        };

        Ok(self
            .apply_if_current(generation, |nav| {
                if nav.page_forward(items.len()) {
                    Some(items.page(nav.cursor()))
                } else {
                    None
                }
            })
            .flatten())
    }

    /// Retreat one page over the visible items
    ///
    /// The visible items are resolved before the cursor moves, so a failed
    /// materialization leaves the page number where it was. Returns the new
    /// page, or `None` when already on page 1, nothing is open, or a
    /// cancel raced the fetch.
    #[instrument(skip(self))]
    pub async fn page_back(&self) -> CatalogResult<Option<PageItems>> {
        let generation = self.current_generation();
        let items = match self.visible_items().await? {
            Some(items) => items,
            None => return Ok(None),
        };

        Ok(self
            .apply_if_current(generation, |nav| {
                if nav.page_back() {
                    Some(items.page(nav.cursor()))
                } else {
                    None
                }
            })
            .flatten())
    }

    /// Open the playlist with the given title from the visible page
    ///
    /// Pure: the playlist value already lives in the current frame, so no
    /// fetch is needed. The lookup is scoped to the current page, matching
    /// what the actor can see. `None` when no playlist list is current or
    /// the title matches nothing.
    #[instrument(skip(self))]
    pub fn open_playlist_by_title(&self, title: &str) -> Option<Playlist> {
        let mut nav = self.lock();
        let playlist = match nav.current() {
            Some(Frame::Playlists(playlists)) => {
                find_by_title(nav.cursor().slice(playlists), title).cloned()
            }
            _ => None,
        }?;

        nav.push(Frame::Playlist(playlist.clone()));
        nav.set_mode(BrowseMode::ViewingPlaylist);
        Some(playlist)
    }

    /// Open the track with the given title from the visible page
    ///
    /// Viewing a single playlist counts: its track list is materialized
    /// first. The lookup is scoped to the current page. `None` when no
    /// track list is visible, the title matches nothing, or a cancel
    /// raced the fetch.
    #[instrument(skip(self))]
    pub async fn open_track_by_title(&self, title: &str) -> CatalogResult<Option<Track>> {
        let generation = self.current_generation();
        let tracks = match self.visible_items().await? {
            Some(PageItems::Tracks(tracks)) => tracks,
            _ => return Ok(None),
        };
        let page = self.lock().cursor().slice(&tracks).to_vec();
        let track = match find_by_title(&page, title) {
            Some(track) => track.clone(),
            None => return Ok(None),
        };

        Ok(self
            .apply_if_current(generation, |nav| {
                nav.push(Frame::Track(track.clone()));
                nav.set_mode(BrowseMode::ViewingTrack);
                track
            }))
    }

    /// Pop the current frame and return to the one beneath
    ///
    /// The mode is recomputed from the newly exposed frame. Returns the
    /// revealed frame, or `None` when the stack emptied (or already was).
    pub fn back(&self) -> Option<Frame> {
        let mut nav = self.lock();
        nav.pop()?;
        let mode = match nav.current() {
            Some(Frame::Playlists(_)) => BrowseMode::BrowsingPlaylists,
            Some(Frame::Playlist(_) | Frame::Tracks(_)) => BrowseMode::ViewingPlaylist,
            Some(Frame::Track(_)) => BrowseMode::ViewingTrack,
            None => BrowseMode::Idle,
        };
        nav.set_mode(mode);
        nav.current().cloned()
    }

    /// Download whatever the current frame addresses
    ///
    /// A single track lands in the flat default directory; a playlist is
    /// materialized and every track lands in a directory keyed by the
    /// playlist title. Already-present files are not re-fetched.
    #[instrument(skip(self))]
    pub async fn download_current(&self) -> CatalogResult<Vec<DownloadHandle>> {
        let target = self.lock().current().cloned();
        match target {
            Some(Frame::Track(track)) => {
                let handle = self.catalog.resolve_download(&track, None).await?;
                Ok(vec![handle])
            }
            Some(Frame::Playlist(playlist)) => {
                let tracks = self.catalog.materialize_tracks(&playlist).await?;
                self.download_all(&tracks, Some(&playlist.title)).await
            }
            Some(Frame::Tracks(tracks)) => self.download_all(&tracks, None).await,
            Some(Frame::Playlists(_)) | None => Ok(Vec::new()),
        }
    }

    async fn download_all(
        &self,
        tracks: &[Track],
        folder: Option<&str>,
    ) -> CatalogResult<Vec<DownloadHandle>> {
        let mut handles = Vec::with_capacity(tracks.len());
        for track in tracks {
            handles.push(self.catalog.resolve_download(track, folder).await?);
        }
        Ok(handles)
    }

    /// Title of the item the current frame addresses, for replies
    pub fn current_title(&self) -> Option<String> {
        let nav = self.lock();
        match nav.current()? {
            Frame::Playlist(playlist) => Some(playlist.title().to_string()),
            Frame::Track(track) => Some(track.title().to_string()),
            Frame::Playlists(_) | Frame::Tracks(_) => None,
        }
    }
}
