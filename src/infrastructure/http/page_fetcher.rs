// src/infrastructure/http/page_fetcher.rs
//! Bounded-concurrency page retrieval backing the metadata refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::metadata::FetchBatch;
use crate::domain::services::page_fetcher::PageFetcher;

const MAX_IN_FLIGHT: usize = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ReqwestPageFetcher {
    pub fn new() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Custom timeouts, used by tests exercising the timeout path.
    pub fn with_timeouts(connect_timeout: Duration, request_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            request_timeout,
        }
    }

    async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, String> {
        let response = client.get(url).send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP error code: {}", status.as_u16()));
        }

        let body = response.text().await.map_err(|e| e.to_string())?;
        if body.is_empty() {
            return Err("Page content is empty".to_string());
        }

        Ok(body)
    }
}

impl Default for ReqwestPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for ReqwestPageFetcher {
    /// Fans out over the deduplicated URLs, at most 10 requests in flight,
    /// and blocks until every spawned fetch has landed in one of the two
    /// result maps. A single failed URL never aborts the batch.
    #[instrument(skip_all, level = "debug")]
    fn fetch_batch(&self, urls: &[String]) -> DomainResult<FetchBatch> {
        let mut unique_urls: Vec<String> = Vec::new();
        for url in urls {
            if !unique_urls.contains(url) {
                unique_urls.push(url.clone());
            }
        }

        if unique_urls.is_empty() {
            return Ok(FetchBatch::default());
        }

        let client = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| DomainError::CannotFetchMetadata(e.to_string()))?;

        let runtime = Runtime::new().map_err(DomainError::Io)?;

        let batch = runtime.block_on(async {
            let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT));
            let mut tasks = JoinSet::new();

            for url in unique_urls {
                let client = client.clone();
                let semaphore = Arc::clone(&semaphore);
                tasks.spawn(async move {
                    // The semaphore is never closed, so the permit always
                    // arrives; it is held for the whole fetch.
                    let _permit = semaphore.acquire_owned().await.ok();
                    let outcome = Self::fetch_page(&client, &url).await;
                    (url, outcome)
                });
            }

            let mut batch = FetchBatch::default();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((url, Ok(body))) => {
                        batch.pages.insert(url, body);
                    }
                    Ok((url, Err(reason))) => {
                        debug!("Fetch failed for {}: {}", url, reason);
                        batch.failures.insert(url, reason);
                    }
                    Err(e) => warn!("Fetch task aborted: {}", e),
                }
            }
            batch
        });

        debug!(
            "Fetched {} page(s), {} failure(s)",
            batch.pages.len(),
            batch.failures.len()
        );
        Ok(batch)
    }
}
