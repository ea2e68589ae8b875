// src/domain/repositories/item_store.rs
use crate::domain::error::DomainResult;
use crate::domain::item::NewItem;
use crate::domain::tag::Tag;

/// Persistence boundary for items, tags and their associations. Methods
/// speak in domain terms; the SQLite implementation lives in the
/// infrastructure layer.
pub trait ItemStore: std::fmt::Debug + Send + Sync {
    /// All stored tags, ordered by title.
    fn get_tags(&self) -> DomainResult<Vec<Tag>>;

    /// Inserts an item and returns its id. A missing `created_at` defaults
    /// to the time of the insert.
    fn create_item(&self, item: &NewItem) -> DomainResult<i32>;

    /// Associates every given item with every given tag. An empty tag set
    /// is a no-op.
    fn attach_item_tags(&self, item_ids: &[i32], tag_ids: &[i32]) -> DomainResult<()>;

    /// Inserts a tag under `parent` and returns its id.
    fn create_tag(
        &self,
        title: &str,
        description: &str,
        parent: i32,
        color: &str,
        pinned: bool,
    ) -> DomainResult<i32>;

    /// Overwrites title/description/image for all given items and stamps
    /// `updated_at`.
    fn update_items_metadata(
        &self,
        title: &str,
        description: &str,
        image: &str,
        item_ids: &[i32],
    ) -> DomainResult<()>;

    /// (id, url) pairs for the given ids; unknown ids are silently absent.
    fn get_item_urls(&self, ids: &[i32]) -> DomainResult<Vec<(i32, String)>>;
}
