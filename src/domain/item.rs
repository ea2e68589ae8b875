// src/domain/item.rs
use chrono::{DateTime, Utc};

/// A stored bookmark item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub comments: String,
    pub image: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Creation payload for an item. A missing `created_at` becomes the time of
/// the insert.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub comments: String,
    pub image: String,
    pub created_at: Option<DateTime<Utc>>,
}
