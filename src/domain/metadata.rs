// src/domain/metadata.rs
use std::collections::HashMap;

/// Outcome of one bounded-concurrency page-fetch batch. Every requested URL
/// lands in exactly one of the two maps, never both.
#[derive(Debug, Default)]
pub struct FetchBatch {
    /// url -> raw page body
    pub pages: HashMap<String, String>,
    /// url -> human-readable failure reason
    pub failures: HashMap<String, String>,
}

/// Metadata extracted from one fetched page. `None` means the field could
/// not be found; an empty string counts as extracted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl PageMetadata {
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.description.is_some() && self.image.is_some()
    }
}

/// Result of one metadata-refresh call over a set of items.
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    pub updated: usize,
    pub total: usize,
    pub failures: HashMap<String, String>,
}

impl RefreshOutcome {
    pub fn failed(&self) -> usize {
        self.total - self.updated
    }
}
