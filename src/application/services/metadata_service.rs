// src/application/services/metadata_service.rs
use crate::application::error::ApplicationResult;

/// Service interface for refreshing stored item metadata from the live web
pub trait MetadataService: Send + Sync {
    /// Refetch title, description and image for the given items and write
    /// them back; returns the combined summary message
    fn refresh_items(&self, item_ids: &[i32]) -> ApplicationResult<String>;
}
