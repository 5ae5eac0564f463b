//! Mock music catalog server for navigator and download tests
//!
//! Provides a [`MockCatalogServer`] that simulates the catalog API
//! endpoints the bot consumes: the actor's playlists, a playlist's track
//! stubs, single-track resolution, and audio payload downloads.

use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock catalog server
///
/// Wraps a [`wiremock::MockServer`] with convenience methods for the
/// catalog responses the client expects, including error scenarios.
///
/// # Example
///
/// ```rust,ignore
/// let server = MockCatalogServer::start().await;
/// let tracks = vec![TrackFixture::named("tr-1", "Intro", &["Alpha"])];
/// server.mock_playlist_tracks("pl-1", &tracks).await;
/// ```
pub struct MockCatalogServer {
    server: MockServer,
    token: String,
}

impl MockCatalogServer {
    /// Start a new mock catalog server with the default actor token
    pub async fn start() -> Self {
        Self::start_with_token("test-token").await
    }

    /// Start a new mock catalog server with a custom actor token
    pub async fn start_with_token(token: &str) -> Self {
        let server = MockServer::start().await;
        Self {
            server,
            token: token.to_string(),
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get the actor token the mocks expect
    pub fn token(&self) -> &str {
        &self.token
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Mount a mock for a successful playlist listing
    pub async fn mock_playlists_success(&self, playlists: Vec<PlaylistFixture>) {
        let playlists_json: Vec<serde_json::Value> =
            playlists.into_iter().map(|p| p.to_json()).collect();

        Mock::given(method("GET"))
            .and(path("/api/v1/me/playlists"))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "playlists": playlists_json })),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for an empty playlist listing
    pub async fn mock_playlists_empty(&self) {
        self.mock_playlists_success(Vec::new()).await;
    }

    /// Mount a playlist listing that responds after a fixed delay,
    /// for racing a cancel against an in-flight fetch
    pub async fn mock_playlists_delayed(&self, playlists: Vec<PlaylistFixture>, delay_ms: u64) {
        let playlists_json: Vec<serde_json::Value> =
            playlists.into_iter().map(|p| p.to_json()).collect();

        Mock::given(method("GET"))
            .and(path("/api/v1/me/playlists"))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_millis(delay_ms))
                    .set_body_json(json!({ "playlists": playlists_json })),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount mocks for a playlist's track list: the stub listing plus one
    /// full-track endpoint per fixture
    pub async fn mock_playlist_tracks(&self, playlist_id: &str, tracks: &[TrackFixture]) {
        self.mock_track_stubs(playlist_id, tracks).await;
        for track in tracks {
            self.mock_track_success(track).await;
        }
    }

    /// Mount only the stub listing for a playlist (full tracks mocked separately)
    pub async fn mock_track_stubs(&self, playlist_id: &str, tracks: &[TrackFixture]) {
        let stubs: Vec<serde_json::Value> =
            tracks.iter().map(|t| json!({ "id": t.id })).collect();

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/playlists/{}/tracks", playlist_id)))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracks": stubs })))
            .mount(&self.server)
            .await;
    }

    /// Mount a stub listing that only answers the first `matches` requests,
    /// then falls through to the server's unmatched-request 404, for tests
    /// that need the catalog to fail partway through a session
    pub async fn mock_track_stubs_up_to(
        &self,
        playlist_id: &str,
        tracks: &[TrackFixture],
        matches: u64,
    ) {
        let stubs: Vec<serde_json::Value> =
            tracks.iter().map(|t| json!({ "id": t.id })).collect();

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/playlists/{}/tracks", playlist_id)))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracks": stubs })))
            .up_to_n_times(matches)
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for a single fully resolved track
    pub async fn mock_track_success(&self, track: &TrackFixture) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/tracks/{}", track.id)))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(track.to_json()))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for a track the catalog cannot resolve
    pub async fn mock_track_missing(&self, track_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/tracks/{}", track_id)))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "track not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for a track's audio payload, asserting it is fetched
    /// exactly `expected_fetches` times
    pub async fn mock_download(&self, track_id: &str, payload: &[u8], expected_fetches: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/tracks/{}/download", track_id)))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.to_vec()))
            .expect(expected_fetches)
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for authentication failure with a specific bad token
    ///
    /// Only requests carrying the given invalid token match, so mocks using
    /// the valid token keep working.
    pub async fn mock_auth_failure(&self, bad_token: &str) {
        Mock::given(method("GET"))
            .and(path_regex("/api/v1/.*"))
            .and(header(
                "Authorization",
                format!("Bearer {}", bad_token).as_str(),
            ))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "unauthorized"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for a server error on every catalog endpoint
    pub async fn mock_server_error(&self, error_message: &str) {
        Mock::given(method("GET"))
            .and(path_regex("/api/v1/.*"))
            .and(header("Authorization", self.auth_header().as_str()))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": error_message
            })))
            .mount(&self.server)
            .await;
    }
}

/// Fixture for creating catalog playlist responses
#[derive(Debug, Clone)]
pub struct PlaylistFixture {
    pub id: String,
    pub title: String,
    pub track_count: u32,
    pub cover_url: Option<String>,
}

impl PlaylistFixture {
    /// Create a playlist fixture
    pub fn named(id: &str, title: &str, track_count: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            track_count,
            cover_url: Some(format!("https://example.com/covers/{}.jpg", id)),
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "trackCount": self.track_count,
            "coverUrl": self.cover_url
        })
    }
}

/// Fixture for creating catalog track responses
#[derive(Debug, Clone)]
pub struct TrackFixture {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub duration_ms: u64,
    pub cover_url: Option<String>,
}

impl TrackFixture {
    /// Create a track fixture
    pub fn named(id: &str, title: &str, artists: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            duration_ms: 200_000,
            cover_url: Some(format!("https://example.com/covers/{}.jpg", id)),
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "artists": self.artists,
            "durationMs": self.duration_ms,
            "coverUrl": self.cover_url
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog_server_starts() {
        let server = MockCatalogServer::start().await;
        assert!(!server.url().is_empty());
        assert_eq!(server.token(), "test-token");
    }

    #[tokio::test]
    async fn test_mock_playlists() {
        let server = MockCatalogServer::start().await;
        server
            .mock_playlists_success(vec![
                PlaylistFixture::named("pl-1", "Road Trip", 12),
                PlaylistFixture::named("pl-2", "Focus", 30),
            ])
            .await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/api/v1/me/playlists", server.url()))
            .bearer_auth(server.token())
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["playlists"].as_array().unwrap().len(), 2);
        assert_eq!(body["playlists"][0]["title"], "Road Trip");
    }

    #[tokio::test]
    async fn test_mock_auth_failure_does_not_interfere_with_valid_token() {
        let server = MockCatalogServer::start().await;
        server.mock_auth_failure("wrong-token").await;
        server.mock_playlists_empty().await;

        let client = reqwest::Client::new();

        let valid = client
            .get(format!("{}/api/v1/me/playlists", server.url()))
            .bearer_auth(server.token())
            .send()
            .await
            .unwrap();
        assert!(valid.status().is_success());

        let invalid = client
            .get(format!("{}/api/v1/me/playlists", server.url()))
            .bearer_auth("wrong-token")
            .send()
            .await
            .unwrap();
        assert_eq!(invalid.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_mock_playlist_tracks_mounts_full_tracks() {
        let server = MockCatalogServer::start().await;
        let tracks = vec![
            TrackFixture::named("tr-1", "Intro", &["Alpha"]),
            TrackFixture::named("tr-2", "Outro", &["Alpha", "Beta"]),
        ];
        server.mock_playlist_tracks("pl-1", &tracks).await;

        let client = reqwest::Client::new();
        let stubs: serde_json::Value = client
            .get(format!("{}/api/v1/playlists/pl-1/tracks", server.url()))
            .bearer_auth(server.token())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(stubs["tracks"].as_array().unwrap().len(), 2);

        let track: serde_json::Value = client
            .get(format!("{}/api/v1/tracks/tr-2", server.url()))
            .bearer_auth(server.token())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(track["title"], "Outro");
        assert_eq!(track["artists"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_playlist_fixture_to_json() {
        let fixture = PlaylistFixture::named("pl-1", "Road Trip", 12);
        let json = fixture.to_json();
        assert_eq!(json["id"], "pl-1");
        assert_eq!(json["title"], "Road Trip");
        assert_eq!(json["trackCount"], 12);
    }

    #[test]
    fn test_track_fixture_to_json() {
        let fixture = TrackFixture::named("tr-1", "Intro", &["Alpha"]);
        let json = fixture.to_json();
        assert_eq!(json["id"], "tr-1");
        assert_eq!(json["durationMs"], 200_000);
        assert_eq!(json["artists"][0], "Alpha");
    }
}
