// src/application/services/image_service_impl.rs
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error::ApplicationResult;
use crate::application::services::image_service::{CachedImage, ImageService};
use crate::domain::services::image_fetcher::ImageFetcher;
use crate::infrastructure::image_cache::FileImageCache;

const WEEK_CACHE_MINUTES: u32 = 10_080;
const FAILURE_CACHE_MINUTES: u32 = 60;

pub struct ImageServiceImpl {
    cache: FileImageCache,
    fetcher: Arc<dyn ImageFetcher>,
}

impl ImageServiceImpl {
    pub fn new(cache: FileImageCache, fetcher: Arc<dyn ImageFetcher>) -> Self {
        debug!("Creating new ImageServiceImpl");
        Self { cache, fetcher }
    }
}

impl ImageService for ImageServiceImpl {
    #[instrument(skip(self), level = "debug")]
    fn serve_image(&self, image_url: &str, item_id: Option<i32>) -> ApplicationResult<CachedImage> {
        if let Some(id) = item_id {
            if let Some(bytes) = self.cache.load(image_url, id) {
                debug!("Cache hit for item {}", id);
                return Ok(CachedImage {
                    bytes,
                    cache_minutes: WEEK_CACHE_MINUTES,
                });
            }
        }

        match self.fetcher.fetch_image(image_url) {
            Ok(bytes) => match item_id {
                Some(id) => {
                    self.cache.store(image_url, id, &bytes);
                    Ok(CachedImage {
                        bytes,
                        cache_minutes: WEEK_CACHE_MINUTES,
                    })
                }
                // A preview image has no cache slot and must not be cached
                // downstream either.
                None => Ok(CachedImage {
                    bytes,
                    cache_minutes: 0,
                }),
            },
            Err(err) => {
                debug!("Image fetch for {} failed: {}", image_url, err);
                let cache_minutes = if item_id.is_some() {
                    FAILURE_CACHE_MINUTES
                } else {
                    0
                };
                Ok(CachedImage {
                    bytes: Vec::new(),
                    cache_minutes,
                })
            }
        }
    }
}
