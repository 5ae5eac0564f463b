//! Catalog API response models

use serde::{Deserialize, Serialize};

/// A playlist owned by the authenticated actor
///
/// Playlists own no tracks directly; tracks are materialized on demand via
/// [`crate::CatalogClient::materialize_tracks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Catalog playlist identifier
    pub id: String,
    /// Playlist title (lookup key within a visible page)
    pub title: String,
    /// Declared number of tracks
    pub track_count: u32,
    /// Cover art URL (if any)
    pub cover_url: Option<String>,
}

/// A fully resolved track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track identifier
    pub id: String,
    /// Track title (lookup key within a visible page)
    pub title: String,
    /// Artist names, in catalog order
    pub artists: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Cover art URL (if any)
    pub cover_url: Option<String>,
}

impl Track {
    /// Returns the artist list joined for display (e.g. "A, B")
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }

    /// Returns a formatted duration (e.g. "3:07")
    pub fn formatted_duration(&self) -> String {
        let total_seconds = self.duration_ms / 1000;
        format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
    }
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistsResponse {
    pub playlists: Vec<RawPlaylist>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlaylist {
    pub id: String,
    pub title: String,
    #[serde(rename = "trackCount", default)]
    pub track_count: u32,
    #[serde(rename = "coverUrl", default)]
    pub cover_url: Option<String>,
}

impl From<RawPlaylist> for Playlist {
    fn from(raw: RawPlaylist) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            track_count: raw.track_count,
            cover_url: raw.cover_url.filter(|s| !s.is_empty()),
        }
    }
}

/// Lightweight track entry from the playlist-tracks endpoint
///
/// Stubs are an internal detail; every stub is resolved into a full
/// [`Track`] before leaving this crate.
#[derive(Debug, Deserialize)]
pub(crate) struct TrackStubsResponse {
    pub tracks: Vec<RawTrackStub>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrackStub {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(rename = "durationMs", default)]
    pub duration_ms: u64,
    #[serde(rename = "coverUrl", default)]
    pub cover_url: Option<String>,
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            artists: raw.artists,
            duration_ms: raw.duration_ms,
            cover_url: raw.cover_url.filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_playlist_conversion() {
        let raw = RawPlaylist {
            id: "pl-1".to_string(),
            title: "Road Trip".to_string(),
            track_count: 12,
            cover_url: Some("".to_string()),
        };

        let playlist: Playlist = raw.into();
        assert_eq!(playlist.id, "pl-1");
        assert_eq!(playlist.title, "Road Trip");
        assert_eq!(playlist.track_count, 12);
        assert!(playlist.cover_url.is_none());
    }

    #[test]
    fn test_raw_track_defaults() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "tr-1",
            "title": "Intro"
        }))
        .unwrap();

        let track: Track = raw.into();
        assert_eq!(track.id, "tr-1");
        assert!(track.artists.is_empty());
        assert_eq!(track.duration_ms, 0);
    }

    #[test]
    fn test_track_display_helpers() {
        let track = Track {
            id: "tr-1".to_string(),
            title: "Duet".to_string(),
            artists: vec!["Alpha".to_string(), "Beta".to_string()],
            duration_ms: 187_000,
            cover_url: None,
        };

        assert_eq!(track.artist_line(), "Alpha, Beta");
        assert_eq!(track.formatted_duration(), "3:07");
    }
}
