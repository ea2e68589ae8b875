// src/application/services/image_service.rs
use crate::application::error::ApplicationResult;

/// An image payload plus the cache lifetime the caller should honor.
/// Zero minutes means the response must not be cached at all.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedImage {
    pub bytes: Vec<u8>,
    pub cache_minutes: u32,
}

/// Service interface for the caching image proxy
pub trait ImageService: Send + Sync {
    /// Serve an image, from the cache when possible; `item_id` selects the
    /// cache slot and is absent for previews of not-yet-saved items
    fn serve_image(&self, image_url: &str, item_id: Option<i32>) -> ApplicationResult<CachedImage>;
}
