//! Browsing frames and modes

use reprezzent_catalog_client::{Playlist, Track};

/// One addressable browsing level
///
/// Value equality (not identity) drives the navigator's idempotent push,
/// and every consumption site matches exhaustively so a new frame kind
/// cannot be silently ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The actor's playlists, in catalog order
    Playlists(Vec<Playlist>),
    /// A single playlist; its tracks are materialized on demand
    Playlist(Playlist),
    /// An ordered, fully materialized track list
    Tracks(Vec<Track>),
    /// A single track
    Track(Track),
}

impl Frame {
    /// Short name of the frame kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Playlists(_) => "playlists",
            Frame::Playlist(_) => "playlist",
            Frame::Tracks(_) => "tracks",
            Frame::Track(_) => "track",
        }
    }
}

/// How the current frame was reached
///
/// A plain read/write slot the router consults to interpret free text;
/// the navigator itself is mode-agnostic and only stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseMode {
    #[default]
    Idle,
    BrowsingPlaylists,
    ViewingPlaylist,
    ViewingTrack,
}

impl std::fmt::Display for BrowseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::BrowsingPlaylists => write!(f, "browsing-playlists"),
            Self::ViewingPlaylist => write!(f, "viewing-playlist"),
            Self::ViewingTrack => write!(f, "viewing-track"),
        }
    }
}

/// Items addressable by title within a visible page
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for Playlist {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for Track {
    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: &str, title: &str) -> Playlist {
        Playlist {
            id: id.to_string(),
            title: title.to_string(),
            track_count: 0,
            cover_url: None,
        }
    }

    #[test]
    fn test_frame_value_equality() {
        let a = Frame::Playlist(playlist("pl-1", "Road Trip"));
        let b = Frame::Playlist(playlist("pl-1", "Road Trip"));
        let c = Frame::Playlist(playlist("pl-2", "Focus"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Frame::Playlists(vec![playlist("pl-1", "Road Trip")]));
    }

    #[test]
    fn test_frame_kind_names() {
        assert_eq!(Frame::Playlists(vec![]).kind(), "playlists");
        assert_eq!(Frame::Tracks(vec![]).kind(), "tracks");
    }

    #[test]
    fn test_default_mode_is_idle() {
        assert_eq!(BrowseMode::default(), BrowseMode::Idle);
    }
}
