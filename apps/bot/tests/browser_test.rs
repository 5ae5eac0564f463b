//! Browser session integration tests against a mock catalog

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reprezzent_bot::browser::{BrowseMode, BrowserSession, Frame, PageItems};
use reprezzent_catalog_client::CatalogClient;
use reprezzent_shared_config::{CatalogConfig, DownloadsConfig};
use reprezzent_test_utils::{MockCatalogServer, PlaylistFixture, TrackFixture};

fn session_for(server: &MockCatalogServer, root: &Path, page_size: usize) -> BrowserSession {
    let config = CatalogConfig::with_base_url(server.url());
    let catalog = CatalogClient::new(&config, DownloadsConfig::with_root(root), server.token())
        .expect("valid client")
        .with_retry_config(0, 1);
    BrowserSession::new(catalog, page_size)
}

fn playlist_fixtures(count: usize) -> Vec<PlaylistFixture> {
    (1..=count)
        .map(|n| PlaylistFixture::named(&format!("pl-{}", n), &format!("Playlist {}", n), 10))
        .collect()
}

#[tokio::test]
async fn test_pagination_over_25_playlists() {
    let server = MockCatalogServer::start().await;
    server.mock_playlists_success(playlist_fixtures(25)).await;
    let dir = tempfile::tempdir().unwrap();
    let session = session_for(&server, dir.path(), 10);

    let first = session.open_playlists().await.unwrap().unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(session.page_number(), 1);

    session.page_forward().await.unwrap().unwrap();
    let third = session.page_forward().await.unwrap().unwrap();
    assert_eq!(session.page_number(), 3);
    assert_eq!(third.len(), 5);
    assert_eq!(
        third.titles(),
        (21..=25)
            .map(|n| format!("Playlist {}", n))
            .collect::<Vec<_>>()
    );

    // Past the last page: rejected, page number unchanged.
    assert!(session.page_forward().await.unwrap().is_none());
    assert_eq!(session.page_number(), 3);
}

#[tokio::test]
async fn test_playlist_materializes_on_view_and_pop_reveals_playlists() {
    let server = MockCatalogServer::start().await;
    server
        .mock_playlists_success(vec![PlaylistFixture::named("pl-1", "Road Trip", 2)])
        .await;
    let tracks = vec![
        TrackFixture::named("tr-1", "Intro", &["Alpha"]),
        TrackFixture::named("tr-2", "Outro", &["Alpha", "Beta"]),
    ];
    server.mock_playlist_tracks("pl-1", &tracks).await;
    let dir = tempfile::tempdir().unwrap();
    let session = session_for(&server, dir.path(), 10);

    session.open_playlists().await.unwrap();
    let playlist = session.open_playlist_by_title("Road Trip").unwrap();
    assert_eq!(playlist.id, "pl-1");
    assert_eq!(session.mode(), BrowseMode::ViewingPlaylist);

    // Viewing the playlist resolves its tracks without growing the stack.
    let visible = session.visible_items().await.unwrap().unwrap();
    match visible {
        PageItems::Tracks(tracks) => {
            assert_eq!(tracks.len(), 2);
            assert_eq!(tracks[0].title, "Intro");
        }
        other => panic!("expected tracks, got {:?}", other),
    }

    // Pop returns to the playlist listing underneath.
    let revealed = session.back().unwrap();
    assert!(matches!(revealed, Frame::Playlists(ref p) if p.len() == 1));
    assert_eq!(session.mode(), BrowseMode::BrowsingPlaylists);

    // Popping the last frame empties the stack.
    assert!(session.back().is_none());
    assert!(!session.is_browsing());
    assert_eq!(session.mode(), BrowseMode::Idle);
}

#[tokio::test]
async fn test_title_lookup_is_scoped_to_the_visible_page() {
    let server = MockCatalogServer::start().await;
    server.mock_playlists_success(playlist_fixtures(25)).await;
    let dir = tempfile::tempdir().unwrap();
    let session = session_for(&server, dir.path(), 10);

    session.open_playlists().await.unwrap();

    // Playlist 15 lives on page 2.
    assert!(session.open_playlist_by_title("Playlist 15").is_none());
    session.page_forward().await.unwrap();
    assert!(session.open_playlist_by_title("Playlist 15").is_some());
}

#[tokio::test]
async fn test_cancel_discards_in_flight_fetch() {
    let server = MockCatalogServer::start().await;
    server
        .mock_playlists_delayed(playlist_fixtures(3), 200)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let session = Arc::new(session_for(&server, dir.path(), 10));

    let fetching = Arc::clone(&session);
    let handle = tokio::spawn(async move { fetching.open_playlists().await });

    // Cancel while the listing is still in flight.
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.cancel();

    let result = handle.await.unwrap().unwrap();
    assert!(result.is_none());
    assert!(!session.is_browsing());
    assert_eq!(session.mode(), BrowseMode::Idle);
}

#[tokio::test]
async fn test_download_current_track_lands_in_flat_directory() {
    let server = MockCatalogServer::start().await;
    server
        .mock_playlists_success(vec![PlaylistFixture::named("pl-1", "Road Trip", 1)])
        .await;
    let tracks = vec![TrackFixture::named("tr-1", "Intro", &["Alpha"])];
    server.mock_playlist_tracks("pl-1", &tracks).await;
    server.mock_download("tr-1", b"audio-bytes", 1).await;
    let dir = tempfile::tempdir().unwrap();
    let session = session_for(&server, dir.path(), 10);

    session.open_playlists().await.unwrap();
    session.open_playlist_by_title("Road Trip").unwrap();
    let track = session.open_track_by_title("Intro").await.unwrap().unwrap();
    assert_eq!(track.id, "tr-1");
    assert_eq!(session.mode(), BrowseMode::ViewingTrack);

    let handles = session.download_current().await.unwrap();
    assert_eq!(handles.len(), 1);
    assert!(handles[0].freshly_fetched);
    assert!(handles[0].path.starts_with(dir.path().join("tracks")));
    assert_eq!(
        tokio::fs::read(&handles[0].path).await.unwrap(),
        b"audio-bytes"
    );

    // Second download of the same track reuses the file; the mock's
    // expected fetch count asserts a single remote hit.
    let again = session.download_current().await.unwrap();
    assert_eq!(again[0].path, handles[0].path);
    assert!(!again[0].freshly_fetched);
}

#[tokio::test]
async fn test_download_playlist_lands_in_title_keyed_directory() {
    let server = MockCatalogServer::start().await;
    server
        .mock_playlists_success(vec![PlaylistFixture::named("pl-1", "Road Trip", 2)])
        .await;
    let tracks = vec![
        TrackFixture::named("tr-1", "Intro", &["Alpha"]),
        TrackFixture::named("tr-2", "Outro", &["Beta"]),
    ];
    server.mock_playlist_tracks("pl-1", &tracks).await;
    server.mock_download("tr-1", b"one", 1).await;
    server.mock_download("tr-2", b"two", 1).await;
    let dir = tempfile::tempdir().unwrap();
    let session = session_for(&server, dir.path(), 10);

    session.open_playlists().await.unwrap();
    session.open_playlist_by_title("Road Trip").unwrap();

    let handles = session.download_current().await.unwrap();
    assert_eq!(handles.len(), 2);
    for handle in &handles {
        assert!(handle.path.starts_with(dir.path().join("Road Trip")));
    }
}

#[tokio::test]
async fn test_failed_page_back_leaves_cursor_in_place() {
    let server = MockCatalogServer::start().await;
    server
        .mock_playlists_success(vec![PlaylistFixture::named("pl-1", "Road Trip", 3)])
        .await;
    let tracks = vec![
        TrackFixture::named("tr-1", "Intro", &["Alpha"]),
        TrackFixture::named("tr-2", "Middle", &["Alpha"]),
        TrackFixture::named("tr-3", "Outro", &["Alpha"]),
    ];
    // The stub listing answers exactly once; the catalog is down afterwards.
    server.mock_track_stubs_up_to("pl-1", &tracks, 1).await;
    for track in &tracks {
        server.mock_track_success(track).await;
    }
    let dir = tempfile::tempdir().unwrap();
    let session = session_for(&server, dir.path(), 2);

    session.open_playlists().await.unwrap();
    session.open_playlist_by_title("Road Trip").unwrap();

    // Page 2 of the materialized tracks.
    let page = session.page_forward().await.unwrap().unwrap();
    assert_eq!(page.titles(), vec!["Outro"]);
    assert_eq!(session.page_number(), 2);

    // Paging back re-resolves the playlist; the catalog failure must not
    // move the cursor.
    assert!(session.page_back().await.is_err());
    assert_eq!(session.page_number(), 2);
}

#[tokio::test]
async fn test_catalog_failure_leaves_stack_untouched() {
    let server = MockCatalogServer::start().await;
    server.mock_server_error("catalog down").await;
    let dir = tempfile::tempdir().unwrap();
    let session = session_for(&server, dir.path(), 10);

    assert!(session.open_playlists().await.is_err());
    assert!(!session.is_browsing());
    assert_eq!(session.mode(), BrowseMode::Idle);
}
