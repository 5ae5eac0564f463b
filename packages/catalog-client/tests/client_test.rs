//! Integration tests for the catalog client
//!
//! Exercises playlist listing, playlist materialization (including the
//! all-or-nothing batch behavior), and idempotent audio downloads against
//! a wiremock catalog.

use reprezzent_catalog_client::{CatalogClient, CatalogError};
use reprezzent_shared_config::{CatalogConfig, DownloadsConfig};
use reprezzent_test_utils::{MockCatalogServer, PlaylistFixture, TrackFixture};

fn client_for(server: &MockCatalogServer, downloads_root: &std::path::Path) -> CatalogClient {
    CatalogClient::new(
        &CatalogConfig::with_base_url(server.url()),
        DownloadsConfig::with_root(downloads_root),
        server.token(),
    )
    .unwrap()
    // Keep failure tests fast: no backoff sleeps.
    .with_retry_config(0, 1)
}

#[tokio::test]
async fn test_list_user_playlists() {
    let server = MockCatalogServer::start().await;
    server
        .mock_playlists_success(vec![
            PlaylistFixture::named("pl-1", "Road Trip", 12),
            PlaylistFixture::named("pl-2", "Focus", 30),
        ])
        .await;

    let downloads = tempfile::tempdir().unwrap();
    let client = client_for(&server, downloads.path());

    let playlists = client.list_user_playlists().await.unwrap();
    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].title, "Road Trip");
    assert_eq!(playlists[0].track_count, 12);
    assert_eq!(playlists[1].id, "pl-2");
}

#[tokio::test]
async fn test_list_user_playlists_empty() {
    let server = MockCatalogServer::start().await;
    server.mock_playlists_empty().await;

    let downloads = tempfile::tempdir().unwrap();
    let client = client_for(&server, downloads.path());

    let playlists = client.list_user_playlists().await.unwrap();
    assert!(playlists.is_empty());
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let server = MockCatalogServer::start().await;
    server.mock_auth_failure("wrong-token").await;

    let downloads = tempfile::tempdir().unwrap();
    let client = CatalogClient::new(
        &CatalogConfig::with_base_url(server.url()),
        DownloadsConfig::with_root(downloads.path()),
        "wrong-token",
    )
    .unwrap()
    .with_retry_config(0, 1);

    let result = client.list_user_playlists().await;
    assert!(matches!(result, Err(CatalogError::Unauthorized)));
}

#[tokio::test]
async fn test_server_error_surfaces_as_api_error() {
    let server = MockCatalogServer::start().await;
    server.mock_server_error("catalog down").await;

    let downloads = tempfile::tempdir().unwrap();
    let client = client_for(&server, downloads.path());

    let result = client.list_user_playlists().await;
    match result {
        Err(CatalogError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_materialize_tracks_resolves_every_stub_in_order() {
    let server = MockCatalogServer::start().await;
    let tracks = vec![
        TrackFixture::named("tr-1", "Intro", &["Alpha"]),
        TrackFixture::named("tr-2", "Middle", &["Alpha"]),
        TrackFixture::named("tr-3", "Outro", &["Alpha", "Beta"]),
    ];
    server.mock_playlist_tracks("pl-1", &tracks).await;
    server
        .mock_playlists_success(vec![PlaylistFixture::named("pl-1", "Road Trip", 3)])
        .await;

    let downloads = tempfile::tempdir().unwrap();
    let client = client_for(&server, downloads.path());

    let playlist = client.list_user_playlists().await.unwrap().remove(0);
    let materialized = client.materialize_tracks(&playlist).await.unwrap();

    assert_eq!(materialized.len(), 3);
    assert_eq!(materialized[0].title, "Intro");
    assert_eq!(materialized[1].title, "Middle");
    assert_eq!(materialized[2].title, "Outro");
    assert_eq!(materialized[2].artists, vec!["Alpha", "Beta"]);
}

#[tokio::test]
async fn test_materialize_tracks_fails_whole_batch_on_one_bad_stub() {
    let server = MockCatalogServer::start().await;
    let good: Vec<TrackFixture> = (1..=4)
        .map(|i| TrackFixture::named(&format!("tr-{}", i), &format!("Track {}", i), &["Alpha"]))
        .collect();

    // Five stubs, only four resolvable.
    let mut all = good.clone();
    all.push(TrackFixture::named("tr-5", "Ghost", &["Alpha"]));
    server.mock_track_stubs("pl-1", &all).await;
    for track in &good {
        server.mock_track_success(track).await;
    }
    server.mock_track_missing("tr-5").await;

    let downloads = tempfile::tempdir().unwrap();
    let client = client_for(&server, downloads.path());

    let playlist = reprezzent_catalog_client::Playlist {
        id: "pl-1".to_string(),
        title: "Road Trip".to_string(),
        track_count: 5,
        cover_url: None,
    };

    let result = client.materialize_tracks(&playlist).await;
    match result {
        Err(CatalogError::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_download_fetches_payload_once() {
    let server = MockCatalogServer::start().await;
    let fixture = TrackFixture::named("tr-1", "Intro", &["Alpha"]);
    server.mock_track_success(&fixture).await;
    // The mock asserts on drop that the payload endpoint is hit exactly once.
    server.mock_download("tr-1", b"audio-bytes", 1).await;

    let downloads = tempfile::tempdir().unwrap();
    let client = client_for(&server, downloads.path());

    let track = client.fetch_track("tr-1").await.unwrap();

    let first = client.resolve_download(&track, None).await.unwrap();
    assert!(first.freshly_fetched);
    assert_eq!(std::fs::read(&first.path).unwrap(), b"audio-bytes");

    let second = client.resolve_download(&track, None).await.unwrap();
    assert!(!second.freshly_fetched);
    assert_eq!(first.path, second.path);
}

#[tokio::test]
async fn test_resolve_download_keys_directory_by_playlist_title() {
    let server = MockCatalogServer::start().await;
    let fixture = TrackFixture::named("tr-1", "Intro", &["Alpha"]);
    server.mock_track_success(&fixture).await;
    server.mock_download("tr-1", b"audio-bytes", 1).await;

    let downloads = tempfile::tempdir().unwrap();
    let client = client_for(&server, downloads.path());

    let track = client.fetch_track("tr-1").await.unwrap();
    let handle = client
        .resolve_download(&track, Some("Road Trip"))
        .await
        .unwrap();

    assert!(handle.path.starts_with(downloads.path().join("Road Trip")));
}
