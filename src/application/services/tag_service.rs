// src/application/services/tag_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::tag::Tag;

/// Service interface for tag inspection and manual tag creation
pub trait TagService: Send + Sync {
    /// Resolve a `/`-separated tag path, creating missing levels, and
    /// return the leaf tag id (0 for a path without usable segments)
    fn create_tag_path(&self, title: &str) -> ApplicationResult<i32>;

    /// All stored tags, ordered by title
    fn list_tags(&self) -> ApplicationResult<Vec<Tag>>;
}
