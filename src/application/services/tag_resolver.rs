// src/application/services/tag_resolver.rs
//! Resolution of tag-name chains and flat tag groups against an existing
//! snapshot, creating what is missing through the item store.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::error::DomainResult;
use crate::domain::repositories::item_store::ItemStore;
use crate::domain::tag::{normalize_title, Tag, TagNameMap};

pub struct TagPathResolver<S: ItemStore> {
    store: Arc<S>,
}

impl<S: ItemStore> TagPathResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves one root-to-leaf chain and returns the leaf tag id, or 0
    /// for an empty chain. Lookup is case-insensitive per hierarchy level.
    /// Once one level had to be created, the rest of the chain is created
    /// without further lookups: nothing below a fresh tag can exist yet,
    /// assuming no concurrent writer.
    #[instrument(skip_all, level = "debug", fields(segments = segments.len()))]
    pub fn resolve_path(
        &self,
        existing_tags: &[Tag],
        segments: &[String],
        default_description: &str,
    ) -> DomainResult<i32> {
        let mut parent = 0;
        let mut check_existing = true;

        for segment in segments {
            if check_existing {
                if let Some(tag) = existing_tags.iter().find(|tag| tag.matches(segment, parent)) {
                    parent = tag.id;
                    continue;
                }
            }

            parent = self
                .store
                .create_tag(segment, default_description, parent, "", false)?;
            check_existing = false;
        }

        debug!("Resolved chain to leaf tag {}", parent);
        Ok(parent)
    }

    /// Flat variant: resolves a set of (name, description) entries under one
    /// parent. Every name is checked against the snapshot (no shortcut);
    /// the result maps normalized name -> tag id.
    #[instrument(skip_all, level = "debug", fields(entries = entries.len()))]
    pub fn resolve_group(
        &self,
        existing_tags: &[Tag],
        entries: &TagNameMap,
        parent: i32,
    ) -> DomainResult<HashMap<String, i32>> {
        let existing: HashMap<String, i32> = existing_tags
            .iter()
            .filter(|tag| tag.parent == parent)
            .map(|tag| (normalize_title(&tag.title), tag.id))
            .collect();

        let mut resolved = HashMap::new();
        for (title, description) in entries.iter() {
            let key = normalize_title(title);
            let id = match existing.get(&key) {
                Some(&id) => id,
                None => self.store.create_tag(title, description, parent, "", false)?,
            };
            resolved.insert(key, id);
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{make_tag, InMemoryItemStore};

    fn segments(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_empty_segments_when_resolved_then_zero() {
        let store = Arc::new(InMemoryItemStore::new());
        let resolver = TagPathResolver::new(store.clone());

        let leaf = resolver.resolve_path(&[], &[], "").unwrap();

        assert_eq!(leaf, 0);
        assert_eq!(store.created_tag_count(), 0);
    }

    #[test]
    fn given_existing_chain_when_resolved_then_found_case_insensitively() {
        let store = Arc::new(InMemoryItemStore::new());
        let resolver = TagPathResolver::new(store.clone());
        let existing = vec![make_tag(1, "News", 0), make_tag(2, "Politics", 1)];

        let leaf = resolver
            .resolve_path(&existing, &segments(&["news", "POLITICS"]), "")
            .unwrap();

        assert_eq!(leaf, 2);
        assert_eq!(store.created_tag_count(), 0);
    }

    #[test]
    fn given_missing_tail_when_resolved_then_created_under_found_parent() {
        let store = Arc::new(InMemoryItemStore::new());
        let resolver = TagPathResolver::new(store.clone());
        let existing = vec![make_tag(1, "News", 0)];

        let leaf = resolver
            .resolve_path(&existing, &segments(&["News", "Sports", "Tennis"]), "desc")
            .unwrap();

        assert_eq!(store.created_tag_count(), 2);
        let created = store.tags();
        assert_eq!(created[0].title, "Sports");
        assert_eq!(created[0].parent, 1);
        assert_eq!(created[0].description, "desc");
        assert_eq!(created[1].title, "Tennis");
        assert_eq!(created[1].parent, created[0].id);
        assert_eq!(leaf, created[1].id);
    }

    #[test]
    fn given_created_level_when_resolving_rest_then_no_further_lookups() {
        let store = Arc::new(InMemoryItemStore::new());
        let resolver = TagPathResolver::new(store.clone());
        // The empty store assigns id 1 to the first created tag, so this
        // snapshot entry would match "Politics" under the fresh "Fresh" tag
        // if lookups continued past the first creation.
        let existing = vec![make_tag(9, "Politics", 1)];

        resolver
            .resolve_path(&existing, &segments(&["Fresh", "Politics"]), "")
            .unwrap();

        assert_eq!(store.created_tag_count(), 2);
    }

    #[test]
    fn given_same_snapshot_twice_when_resolved_then_same_leaf_and_no_duplicates() {
        let store = Arc::new(InMemoryItemStore::new());
        let resolver = TagPathResolver::new(store.clone());

        let first = resolver
            .resolve_path(&[], &segments(&["Work", "Projects"]), "")
            .unwrap();
        let snapshot = store.tags();
        let created_after_first = store.created_tag_count();

        let second = resolver
            .resolve_path(&snapshot, &segments(&["Work", "Projects"]), "")
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.created_tag_count(), created_after_first);
    }

    #[test]
    fn given_group_entries_when_resolved_then_existing_matched_and_missing_created() {
        let store = Arc::new(InMemoryItemStore::new());
        let resolver = TagPathResolver::new(store.clone());
        let existing = vec![make_tag(3, "Rust", 7), make_tag(4, "Rust", 0)];

        let mut entries = TagNameMap::new();
        entries.insert("rust", "ignored for existing");
        entries.insert("News", "fresh description");

        let resolved = resolver.resolve_group(&existing, &entries, 7).unwrap();

        // "rust" matches the tag under parent 7, not the root one.
        assert_eq!(resolved["rust"], 3);
        assert_eq!(store.created_tag_count(), 1);
        let created = &store.tags()[0];
        assert_eq!(created.title, "News");
        assert_eq!(created.parent, 7);
        assert_eq!(created.description, "fresh description");
        assert_eq!(resolved["news"], created.id);
    }
}
