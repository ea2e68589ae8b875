// src/domain/import.rs
//! Transient records produced by the import parsers. They live for one
//! import call and are discarded once items and tags are persisted.
use crate::domain::tag::TagNameMap;
use chrono::{DateTime, Utc};
use itertools::Itertools;

pub const IMPORTED_FROM_BROWSER_TAG: &str = "Imported from browser";
pub const BROWSER_TAG_DESCRIPTION: &str = "Tag imported from browser";
pub const IMPORTED_FROM_POCKET_TAG: &str = "Imported from Pocket";
pub const POCKET_TAG_DESCRIPTION: &str = "Tag imported from Pocket";
pub const COLLECTIONS_PARENT_TAG: &str = "Collections";
pub const COLLECTIONS_PARENT_DESCRIPTION: &str = "Pocket collections";
pub const STATUS_PARENT_TAG: &str = "Status";
pub const STATUS_PARENT_DESCRIPTION: &str = "Pocket read status: unread or archive";

/// One bookmark extracted from a browser export, prior to persistence.
/// `folder_paths` holds root-to-leaf tag-name chains; the leaf tag of
/// every chain is attached to the item.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRecord {
    pub title: String,
    pub url: String,
    pub folder_paths: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct ParsedBookmarks {
    pub records: Vec<BookmarkRecord>,
    pub skipped: usize,
}

/// Per-URL data contributed by Pocket collection documents: a title
/// override, an excerpt, one note per collection, and the list of
/// collection memberships in encounter order.
#[derive(Debug, Clone, Default)]
pub struct CollectionOverride {
    pub title: String,
    pub excerpt: String,
    notes: Vec<(String, String)>,
    pub collections: Vec<String>,
}

impl CollectionOverride {
    /// A later note from the same collection replaces the earlier one but
    /// keeps its position.
    pub fn set_note(&mut self, collection: &str, note: &str) {
        if let Some(entry) = self.notes.iter_mut().find(|(c, _)| c == collection) {
            entry.1 = note.to_string();
        } else {
            self.notes.push((collection.to_string(), note.to_string()));
        }
    }

    pub fn add_membership(&mut self, collection: &str) {
        self.collections.push(collection.to_string());
    }

    /// Merges the collection notes into one comments string. Empty notes are
    /// dropped; a single surviving note is used as-is; multiple notes become
    /// captioned blocks separated by a blank line, in collection order.
    pub fn merged_comments(&self) -> String {
        let non_empty: Vec<_> = self.notes.iter().filter(|(_, note)| !note.is_empty()).collect();
        if non_empty.len() == 1 {
            return non_empty[0].1.clone();
        }
        non_empty
            .iter()
            .map(|(collection, note)| {
                format!("Note from Pocket collection \"{}\":\n{}", collection, note)
            })
            .join("\n\n")
    }
}

/// One row of a Pocket CSV table, already merged with collection data.
#[derive(Debug, Clone)]
pub struct PocketRecord {
    pub title: String,
    pub description: String,
    pub url: String,
    pub comments: String,
    pub tags: Vec<String>,
    pub status: String,
    pub collections: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything extracted from one Pocket archive directory.
#[derive(Debug, Default)]
pub struct PocketArchive {
    pub records: Vec<PocketRecord>,
    pub tag_descriptions: TagNameMap,
    pub statuses: TagNameMap,
    pub collections: TagNameMap,
}
