// src/application/services/metadata_service_impl.rs
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::metadata_service::MetadataService;
use crate::domain::metadata::RefreshOutcome;
use crate::domain::repositories::item_store::ItemStore;
use crate::domain::services::page_fetcher::PageFetcher;
use crate::infrastructure::html::page_meta::extract_page_metadata;

pub struct MetadataServiceImpl<S: ItemStore> {
    store: Arc<S>,
    fetcher: Arc<dyn PageFetcher>,
}

impl<S: ItemStore> MetadataServiceImpl<S> {
    pub fn new(store: Arc<S>, fetcher: Arc<dyn PageFetcher>) -> Self {
        debug!("Creating new MetadataServiceImpl");
        Self { store, fetcher }
    }

    /// Core refresh over resolved (item id, url) pairs. Fetch and extraction
    /// failures are isolated per URL; a write covers every item sharing the
    /// URL and fails as one unit.
    fn refresh(&self, pairs: &[(i32, String)]) -> ApplicationResult<RefreshOutcome> {
        let urls: Vec<String> = pairs.iter().map(|(_, url)| url.clone()).collect();
        let batch = self.fetcher.fetch_batch(&urls)?;

        let mut outcome = RefreshOutcome {
            total: pairs.len(),
            failures: batch.failures,
            ..RefreshOutcome::default()
        };

        for (url, body) in &batch.pages {
            let metadata = extract_page_metadata(body, url);
            if !metadata.is_complete() {
                outcome
                    .failures
                    .insert(url.clone(), "Failed to extract metadata".to_string());
                continue;
            }

            let ids: Vec<i32> = pairs
                .iter()
                .filter(|(_, item_url)| item_url == url)
                .map(|(id, _)| *id)
                .collect();
            match self.store.update_items_metadata(
                metadata.title.as_deref().unwrap_or(""),
                metadata.description.as_deref().unwrap_or(""),
                metadata.image.as_deref().unwrap_or(""),
                &ids,
            ) {
                Ok(()) => outcome.updated += ids.len(),
                Err(err) => {
                    warn!("Metadata write for {} failed: {}", url, err);
                    outcome.failures.insert(
                        url.clone(),
                        "Failed to update item metadata in database".to_string(),
                    );
                }
            }
        }

        Ok(outcome)
    }

    /// Summary built from the outcome counts, each part pluralized by its
    /// own count and the parts joined by ". ".
    fn refresh_message(outcome: &RefreshOutcome) -> String {
        let mut parts = Vec::new();
        if outcome.updated > 0 {
            parts.push(format!(
                "Successfully refetched {} {}",
                outcome.updated,
                if outcome.updated == 1 { "item" } else { "items" }
            ));
        }
        let failed = outcome.failed();
        if failed > 0 {
            parts.push(format!(
                "Failed to refetch {} {}",
                failed,
                if failed == 1 { "item" } else { "items" }
            ));
        }
        parts.join(". ")
    }
}

impl<S: ItemStore> MetadataService for MetadataServiceImpl<S> {
    #[instrument(skip(self), level = "debug")]
    fn refresh_items(&self, item_ids: &[i32]) -> ApplicationResult<String> {
        if item_ids.is_empty() {
            return Err(ApplicationError::Validation(
                "Item IDs not provided or invalid".to_string(),
            ));
        }

        let pairs = self.store.get_item_urls(item_ids)?;
        let outcome = self.refresh(&pairs)?;
        debug!(
            "Refreshed {}/{} item(s), {} failure(s)",
            outcome.updated,
            outcome.total,
            outcome.failures.len()
        );

        let message = Self::refresh_message(&outcome);
        if outcome.updated == 0 {
            return Err(ApplicationError::Other(message));
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainResult;
    use crate::domain::item::NewItem;
    use crate::domain::metadata::FetchBatch;
    use crate::util::testing::{init_test_env, InMemoryItemStore};
    use std::collections::HashMap;

    const COMPLETE_PAGE: &str = r#"<html><head>
        <meta property="og:title" content="Fetched title">
        <meta property="og:description" content="Fetched description">
        <meta property="og:image" content="https://cdn.example/cover.png">
    </head><body></body></html>"#;

    /// Canned per-URL outcomes standing in for the real fetch pool.
    #[derive(Default)]
    struct StubPageFetcher {
        pages: HashMap<String, String>,
        failures: HashMap<String, String>,
    }

    impl StubPageFetcher {
        fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn with_failure(mut self, url: &str, reason: &str) -> Self {
            self.failures.insert(url.to_string(), reason.to_string());
            self
        }
    }

    impl PageFetcher for StubPageFetcher {
        fn fetch_batch(&self, urls: &[String]) -> DomainResult<FetchBatch> {
            let mut batch = FetchBatch::default();
            for url in urls {
                if let Some(body) = self.pages.get(url) {
                    batch.pages.insert(url.clone(), body.clone());
                } else if let Some(reason) = self.failures.get(url) {
                    batch.failures.insert(url.clone(), reason.clone());
                }
            }
            Ok(batch)
        }
    }

    fn seed_item(store: &InMemoryItemStore, url: &str) -> i32 {
        store
            .create_item(&NewItem {
                title: "stale".to_string(),
                url: url.to_string(),
                ..NewItem::default()
            })
            .unwrap()
    }

    #[test]
    fn given_no_ids_when_refreshed_then_validation_error() {
        // Arrange
        init_test_env();
        let store = Arc::new(InMemoryItemStore::new());
        let service = MetadataServiceImpl::new(store, Arc::new(StubPageFetcher::default()));

        // Act
        let result = service.refresh_items(&[]);

        // Assert
        match result {
            Err(ApplicationError::Validation(msg)) => {
                assert_eq!(msg, "Item IDs not provided or invalid");
            }
            other => panic!("Expected a Validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn given_complete_pages_when_refreshed_then_items_updated() {
        // Arrange
        init_test_env();
        let store = Arc::new(InMemoryItemStore::new());
        let first = seed_item(&store, "https://one.example/");
        let second = seed_item(&store, "https://two.example/");
        let fetcher = StubPageFetcher::default()
            .with_page("https://one.example/", COMPLETE_PAGE)
            .with_page("https://two.example/", COMPLETE_PAGE);
        let service = MetadataServiceImpl::new(store.clone(), Arc::new(fetcher));

        // Act
        let message = service.refresh_items(&[first, second]).unwrap();

        // Assert
        assert_eq!(message, "Successfully refetched 2 items");
        for item in store.items() {
            assert_eq!(item.title, "Fetched title");
            assert_eq!(item.description, "Fetched description");
            assert_eq!(item.image, "https://cdn.example/cover.png");
            assert!(item.updated_at.is_some());
        }
    }

    #[test]
    fn given_mixed_outcomes_when_refreshed_then_both_counts_reported() {
        // Arrange
        init_test_env();
        let store = Arc::new(InMemoryItemStore::new());
        let ok_id = seed_item(&store, "https://ok.example/");
        let bad_id = seed_item(&store, "https://gone.example/");
        let fetcher = StubPageFetcher::default()
            .with_page("https://ok.example/", COMPLETE_PAGE)
            .with_failure("https://gone.example/", "HTTP error code: 404");
        let service = MetadataServiceImpl::new(store.clone(), Arc::new(fetcher));

        // Act
        let message = service.refresh_items(&[ok_id, bad_id]).unwrap();

        // Assert
        assert_eq!(
            message,
            "Successfully refetched 1 item. Failed to refetch 1 item"
        );
        let items = store.items();
        assert_eq!(items[0].title, "Fetched title");
        assert_eq!(items[1].title, "stale", "failed URL leaves the item untouched");
    }

    #[test]
    fn given_incomplete_metadata_when_refreshed_then_error_with_failure_message() {
        // Arrange
        init_test_env();
        let store = Arc::new(InMemoryItemStore::new());
        let id = seed_item(&store, "https://bare.example/");
        // No description meta in any form, so extraction is incomplete.
        let fetcher = StubPageFetcher::default().with_page(
            "https://bare.example/",
            "<html><head><title>Bare</title>\
             <meta property=\"og:image\" content=\"https://x.example/i.png\"></head></html>",
        );
        let service = MetadataServiceImpl::new(store.clone(), Arc::new(fetcher));

        // Act
        let result = service.refresh_items(&[id]);

        // Assert
        match result {
            Err(ApplicationError::Other(msg)) => {
                assert_eq!(msg, "Failed to refetch 1 item");
            }
            other => panic!("Expected an Other error, got {:?}", other.err()),
        }
        assert_eq!(store.items()[0].title, "stale");
    }

    #[test]
    fn given_write_failure_when_refreshed_then_counted_as_failed() {
        // Arrange
        init_test_env();
        let store = Arc::new(InMemoryItemStore::new());
        let id = seed_item(&store, "https://ok.example/");
        store.set_fail_updates(true);
        let fetcher = StubPageFetcher::default().with_page("https://ok.example/", COMPLETE_PAGE);
        let service = MetadataServiceImpl::new(store.clone(), Arc::new(fetcher));

        // Act
        let outcome = service.refresh(&[(id, "https://ok.example/".to_string())]).unwrap();

        // Assert
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.failed(), 1);
        assert_eq!(
            outcome.failures["https://ok.example/"],
            "Failed to update item metadata in database"
        );
    }

    #[test]
    fn given_items_sharing_a_url_when_refreshed_then_one_write_updates_all() {
        // Arrange
        init_test_env();
        let store = Arc::new(InMemoryItemStore::new());
        let first = seed_item(&store, "https://shared.example/");
        let second = seed_item(&store, "https://shared.example/");
        let fetcher =
            StubPageFetcher::default().with_page("https://shared.example/", COMPLETE_PAGE);
        let service = MetadataServiceImpl::new(store.clone(), Arc::new(fetcher));

        // Act
        let message = service.refresh_items(&[first, second]).unwrap();

        // Assert
        assert_eq!(message, "Successfully refetched 2 items");
    }
}
