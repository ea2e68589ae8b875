// tests/test_image_cache.rs

use std::sync::Arc;

use nestmark::application::services::image_service::ImageService;
use nestmark::application::ImageServiceImpl;
use nestmark::infrastructure::http::image_fetcher::ReqwestImageFetcher;
use nestmark::infrastructure::image_cache::FileImageCache;
use tempfile::TempDir;

fn service_in(dir: &TempDir) -> ImageServiceImpl {
    ImageServiceImpl::new(
        FileImageCache::new(dir.path()),
        Arc::new(ReqwestImageFetcher::new()),
    )
}

#[test]
fn given_item_image_when_served_twice_then_remote_hit_once() {
    let mut server = mockito::Server::new();
    let remote = server
        .mock("GET", "/cover.png")
        .with_header("content-type", "image/png")
        .with_body(b"png payload".as_slice())
        .expect(1)
        .create();
    let url = format!("{}/cover.png", server.url());
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let first = service.serve_image(&url, Some(12)).unwrap();
    let second = service.serve_image(&url, Some(12)).unwrap();

    assert_eq!(first.bytes, b"png payload");
    assert_eq!(first.cache_minutes, 10_080);
    assert_eq!(second.bytes, b"png payload");
    assert_eq!(second.cache_minutes, 10_080);
    remote.assert();

    // The entry landed on disk under the item id and the hashed URL.
    assert!(FileImageCache::new(dir.path()).entry_path(&url, 12).is_file());
}

#[test]
fn given_missing_remote_image_with_item_when_served_then_short_failure_duration() {
    let mut server = mockito::Server::new();
    let _gone = server.mock("GET", "/gone.png").with_status(404).create();
    let url = format!("{}/gone.png", server.url());
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let served = service.serve_image(&url, Some(3)).unwrap();

    assert!(served.bytes.is_empty());
    assert_eq!(served.cache_minutes, 60);
    assert_eq!(
        std::fs::read_dir(dir.path()).unwrap().count(),
        0,
        "a failed fetch leaves no cache entry"
    );
}

#[test]
fn given_missing_remote_image_without_item_when_served_then_zero_duration() {
    let mut server = mockito::Server::new();
    let _gone = server.mock("GET", "/gone.png").with_status(404).create();
    let url = format!("{}/gone.png", server.url());
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let served = service.serve_image(&url, None).unwrap();

    assert!(served.bytes.is_empty());
    assert_eq!(served.cache_minutes, 0);
}

#[test]
fn given_preview_request_when_served_twice_then_fetched_each_time() {
    let mut server = mockito::Server::new();
    let remote = server
        .mock("GET", "/preview.png")
        .with_body(b"preview bytes".as_slice())
        .expect(2)
        .create();
    let url = format!("{}/preview.png", server.url());
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let first = service.serve_image(&url, None).unwrap();
    let second = service.serve_image(&url, None).unwrap();

    assert_eq!(first.bytes, b"preview bytes");
    assert_eq!(first.cache_minutes, 0);
    assert_eq!(second.bytes, b"preview bytes");
    remote.assert();
    assert_eq!(
        std::fs::read_dir(dir.path()).unwrap().count(),
        0,
        "previews never reach the cache directory"
    );
}
