// src/infrastructure/http/image_fetcher.rs

use std::time::Duration;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::services::image_fetcher::ImageFetcher;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Single-image retrieval over a blocking client. A fetch succeeds only on
/// a 2xx status; the body may be empty.
#[derive(Debug, Clone, Default)]
pub struct ReqwestImageFetcher;

impl ReqwestImageFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl ImageFetcher for ReqwestImageFetcher {
    #[instrument(skip_all, level = "debug")]
    fn fetch_image(&self, url: &str) -> DomainResult<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::CannotFetchImage(e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| DomainError::CannotFetchImage(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::CannotFetchImage(format!(
                "HTTP error code: {}",
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| DomainError::CannotFetchImage(e.to_string()))?;

        debug!("Fetched {} byte(s) from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
