// src/domain/services/image_fetcher.rs
use crate::domain::error::DomainResult;

/// Single-image retrieval for the image cache. Succeeds only on a 2xx
/// response; the body may be empty.
pub trait ImageFetcher: Send + Sync {
    fn fetch_image(&self, url: &str) -> DomainResult<Vec<u8>>;
}
