// src/domain/services/page_fetcher.rs
use crate::domain::error::DomainResult;
use crate::domain::metadata::FetchBatch;

/// Batch page retrieval with bounded concurrency. Implementations block
/// until every dispatched request has completed; per-URL outcomes land in
/// the returned batch, and a single failed URL never aborts the call.
pub trait PageFetcher: Send + Sync {
    fn fetch_batch(&self, urls: &[String]) -> DomainResult<FetchBatch>;
}
