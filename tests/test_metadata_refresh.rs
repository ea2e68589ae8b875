// tests/test_metadata_refresh.rs

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use nestmark::application::services::metadata_service::MetadataService;
use nestmark::application::MetadataServiceImpl;
use nestmark::domain::item::NewItem;
use nestmark::domain::repositories::item_store::ItemStore;
use nestmark::domain::services::page_fetcher::PageFetcher;
use nestmark::infrastructure::http::page_fetcher::ReqwestPageFetcher;
use nestmark::infrastructure::repositories::sqlite::repository::SqliteItemStore;
use nestmark::util::testing::setup_test_db;
use serial_test::serial;

fn page_body(title: &str) -> String {
    format!(
        r#"<html><head>
        <meta property="og:title" content="{title}">
        <meta property="og:description" content="A description">
        <meta property="og:image" content="cover.png">
        </head><body></body></html>"#
    )
}

fn seed(store: &SqliteItemStore, url: &str) -> i32 {
    store
        .create_item(&NewItem {
            title: "stale".to_string(),
            url: url.to_string(),
            ..NewItem::default()
        })
        .unwrap()
}

#[test]
#[serial]
fn given_mixed_batch_when_refreshed_then_successes_written_and_failures_isolated() {
    let mut server = mockito::Server::new();
    let ok_one = server
        .mock("GET", "/ok-one")
        .with_body(page_body("First"))
        .create();
    let ok_two = server
        .mock("GET", "/ok-two")
        .with_body(page_body("Second"))
        .create();
    let gone = server.mock("GET", "/gone").with_status(404).create();
    // The slow endpoint gets its own server, so stalling it cannot delay
    // the responses of the other three.
    let mut slow_server = mockito::Server::new();
    let _slow = slow_server
        .mock("GET", "/slow")
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_secs(2));
            writer.write_all(b"too late")
        })
        .create();

    let (store, _dir) = setup_test_db();
    let store = Arc::new(store);
    let ids = vec![
        seed(&store, &format!("{}/ok-one", server.url())),
        seed(&store, &format!("{}/ok-two", server.url())),
        seed(&store, &format!("{}/gone", server.url())),
        seed(&store, &format!("{}/slow", slow_server.url())),
    ];

    let fetcher =
        ReqwestPageFetcher::with_timeouts(Duration::from_secs(5), Duration::from_millis(500));
    let service = MetadataServiceImpl::new(store.clone(), Arc::new(fetcher));

    let message = service.refresh_items(&ids).unwrap();

    assert_eq!(
        message,
        "Successfully refetched 2 items. Failed to refetch 2 items"
    );

    let items = store.get_items().unwrap();
    let first = items.iter().find(|i| i.url.ends_with("/ok-one")).unwrap();
    assert_eq!(first.title, "First");
    assert_eq!(first.description, "A description");
    assert_eq!(
        first.image,
        format!("{}/cover.png", server.url()),
        "the relative image URL is resolved against the page"
    );
    let second = items.iter().find(|i| i.url.ends_with("/ok-two")).unwrap();
    assert_eq!(second.title, "Second");

    for url_suffix in ["/gone", "/slow"] {
        let untouched = items.iter().find(|i| i.url.ends_with(url_suffix)).unwrap();
        assert_eq!(untouched.title, "stale", "{} must stay stale", url_suffix);
        assert!(untouched.updated_at.is_none());
    }

    ok_one.assert();
    ok_two.assert();
    gone.assert();
}

#[test]
fn given_error_and_empty_responses_when_batch_fetched_then_reasons_recorded() {
    let mut server = mockito::Server::new();
    let _page = server
        .mock("GET", "/page")
        .with_body(page_body("Only"))
        .create();
    let _gone = server.mock("GET", "/gone").with_status(404).create();
    let _blank = server.mock("GET", "/blank").with_body("").create();

    let page_url = format!("{}/page", server.url());
    let gone_url = format!("{}/gone", server.url());
    let blank_url = format!("{}/blank", server.url());
    let urls = vec![page_url.clone(), gone_url.clone(), blank_url.clone()];

    let batch = ReqwestPageFetcher::new().fetch_batch(&urls).unwrap();

    assert_eq!(batch.pages.len(), 1);
    assert!(batch.pages.contains_key(&page_url));
    assert_eq!(batch.failures.len(), 2);
    assert_eq!(batch.failures[&gone_url], "HTTP error code: 404");
    assert_eq!(batch.failures[&blank_url], "Page content is empty");
}

#[test]
fn given_duplicate_urls_when_batch_fetched_then_remote_hit_once() {
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/page")
        .with_body(page_body("Once"))
        .expect(1)
        .create();
    let url = format!("{}/page", server.url());

    let batch = ReqwestPageFetcher::new()
        .fetch_batch(&[url.clone(), url.clone()])
        .unwrap();

    assert_eq!(batch.pages.len(), 1);
    page.assert();
}

#[test]
#[serial]
fn given_items_sharing_a_url_when_refreshed_then_both_rows_updated() {
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/shared")
        .with_body(page_body("Shared"))
        .expect(1)
        .create();

    let (store, _dir) = setup_test_db();
    let store = Arc::new(store);
    let url = format!("{}/shared", server.url());
    let ids = vec![seed(&store, &url), seed(&store, &url)];
    let service =
        MetadataServiceImpl::new(store.clone(), Arc::new(ReqwestPageFetcher::new()));

    let message = service.refresh_items(&ids).unwrap();

    assert_eq!(message, "Successfully refetched 2 items");
    for item in store.get_items().unwrap() {
        assert_eq!(item.title, "Shared");
    }
    page.assert();
}
