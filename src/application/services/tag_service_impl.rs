// src/application/services/tag_service_impl.rs
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error::ApplicationResult;
use crate::application::services::tag_resolver::TagPathResolver;
use crate::application::services::tag_service::TagService;
use crate::domain::repositories::item_store::ItemStore;
use crate::domain::tag::{split_tag_path, Tag};

pub struct TagServiceImpl<S: ItemStore> {
    store: Arc<S>,
    resolver: TagPathResolver<S>,
}

impl<S: ItemStore> TagServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        debug!("Creating new TagServiceImpl");
        let resolver = TagPathResolver::new(store.clone());
        Self { store, resolver }
    }
}

impl<S: ItemStore> TagService for TagServiceImpl<S> {
    #[instrument(skip(self), level = "debug")]
    fn create_tag_path(&self, title: &str) -> ApplicationResult<i32> {
        let segments = split_tag_path(title);
        let tags = self.store.get_tags()?;
        let leaf = self.resolver.resolve_path(&tags, &segments, "")?;
        Ok(leaf)
    }

    #[instrument(skip(self), level = "debug")]
    fn list_tags(&self) -> ApplicationResult<Vec<Tag>> {
        let tags = self.store.get_tags()?;
        Ok(tags)
    }
}
