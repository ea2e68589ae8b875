// src/application/services/import_service_impl.rs
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::import_service::ImportService;
use crate::application::services::tag_resolver::TagPathResolver;
use crate::domain::error::DomainError;
use crate::domain::import::{
    PocketRecord, BROWSER_TAG_DESCRIPTION, COLLECTIONS_PARENT_DESCRIPTION,
    COLLECTIONS_PARENT_TAG, IMPORTED_FROM_BROWSER_TAG, STATUS_PARENT_DESCRIPTION,
    STATUS_PARENT_TAG,
};
use crate::domain::item::NewItem;
use crate::domain::repositories::item_store::ItemStore;
use crate::domain::tag::normalize_title;
use crate::infrastructure::html::netscape::parse_bookmark_html;
use crate::infrastructure::pocket::archive::stage_zip_archive;
use crate::infrastructure::pocket::reader::read_pocket_dir;

pub struct ImportServiceImpl<S: ItemStore> {
    store: Arc<S>,
    resolver: TagPathResolver<S>,
}

impl<S: ItemStore> ImportServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        debug!("Creating new ImportServiceImpl");
        let resolver = TagPathResolver::new(store.clone());
        Self { store, resolver }
    }

    /// Format problems in the uploaded data are validation failures; anything
    /// else passes through as a domain error.
    fn classify(err: DomainError) -> ApplicationError {
        match err {
            DomainError::InvalidFormat(message) => ApplicationError::Validation(message),
            other => ApplicationError::Domain(other),
        }
    }

    /// Collects the record's tag ids keyed by normalized name. A collection
    /// wins over a free tag of the same name, and the status wins over both.
    fn record_tag_ids(
        record: &PocketRecord,
        free_ids: &HashMap<String, i32>,
        collection_ids: &HashMap<String, i32>,
        status_ids: &HashMap<String, i32>,
    ) -> Vec<i32> {
        let mut by_name: HashMap<String, i32> = HashMap::new();
        for tag in &record.tags {
            let key = normalize_title(tag);
            if let Some(&id) = free_ids.get(&key) {
                by_name.insert(key, id);
            }
        }
        for collection in &record.collections {
            let key = normalize_title(collection);
            if let Some(&id) = collection_ids.get(&key) {
                by_name.insert(key, id);
            }
        }
        let status_key = normalize_title(&record.status);
        if let Some(&id) = status_ids.get(&status_key) {
            by_name.insert(status_key, id);
        }

        let mut ids: Vec<i32> = by_name.into_values().collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: ItemStore> ImportService for ImportServiceImpl<S> {
    #[instrument(skip_all, level = "debug")]
    fn import_browser_html(&self, html: &str) -> ApplicationResult<(usize, usize)> {
        let parsed = parse_bookmark_html(html);

        // The fixed path is registered even for a document without usable
        // anchors; derived paths follow in encounter order.
        let mut unique_paths: Vec<Vec<String>> =
            vec![vec![IMPORTED_FROM_BROWSER_TAG.to_string()]];
        for record in &parsed.records {
            for path in &record.folder_paths {
                if !unique_paths.contains(path) {
                    unique_paths.push(path.clone());
                }
            }
        }

        // Each path resolves against a fresh snapshot, so a chain created
        // for one path is found again by the next.
        let mut leaf_ids: HashMap<Vec<String>, i32> = HashMap::new();
        for path in &unique_paths {
            let tags = self.store.get_tags()?;
            let leaf = self
                .resolver
                .resolve_path(&tags, path, BROWSER_TAG_DESCRIPTION)?;
            leaf_ids.insert(path.clone(), leaf);
        }

        for record in &parsed.records {
            let item_id = self.store.create_item(&NewItem {
                title: record.title.clone(),
                url: record.url.clone(),
                ..NewItem::default()
            })?;
            let tag_ids: Vec<i32> = record
                .folder_paths
                .iter()
                .filter_map(|path| leaf_ids.get(path).copied())
                .unique()
                .collect();
            self.store.attach_item_tags(&[item_id], &tag_ids)?;
        }

        debug!(
            "Imported {} bookmark(s), skipped {}",
            parsed.records.len(),
            parsed.skipped
        );
        Ok((parsed.records.len(), parsed.skipped))
    }

    #[instrument(skip_all, level = "debug", fields(path = %path.display()))]
    fn import_pocket_archive(&self, path: &Path) -> ApplicationResult<usize> {
        let is_zip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("zip"))
            .unwrap_or(false);
        // The staged directory lives until the end of this call; dropping it
        // removes the extracted files on every exit path.
        let staged = if is_zip {
            Some(stage_zip_archive(path).map_err(Self::classify)?)
        } else {
            None
        };
        let dir = staged.as_ref().map(|tmp| tmp.path()).unwrap_or(path);

        let archive = read_pocket_dir(dir).map_err(Self::classify)?;

        // One snapshot covers the whole write phase. Tags created below stay
        // invisible to later lookups, so everything resolves against the
        // pre-import state.
        let tags = self.store.get_tags()?;

        let collection_ids = if archive.collections.is_empty() {
            HashMap::new()
        } else {
            let parent = self.resolver.resolve_path(
                &tags,
                &[COLLECTIONS_PARENT_TAG.to_string()],
                COLLECTIONS_PARENT_DESCRIPTION,
            )?;
            self.resolver
                .resolve_group(&tags, &archive.collections, parent)?
        };

        let free_ids = self
            .resolver
            .resolve_group(&tags, &archive.tag_descriptions, 0)?;

        let status_parent = self.resolver.resolve_path(
            &tags,
            &[STATUS_PARENT_TAG.to_string()],
            STATUS_PARENT_DESCRIPTION,
        )?;
        let status_ids = self
            .resolver
            .resolve_group(&tags, &archive.statuses, status_parent)?;

        for record in &archive.records {
            let item_id = self.store.create_item(&NewItem {
                title: record.title.clone(),
                description: record.description.clone(),
                url: record.url.clone(),
                comments: record.comments.clone(),
                image: String::new(),
                created_at: Some(record.created_at),
            })?;

            let tag_ids = Self::record_tag_ids(record, &free_ids, &collection_ids, &status_ids);
            self.store.attach_item_tags(&[item_id], &tag_ids)?;
        }

        debug!("Imported {} Pocket record(s)", archive.records.len());
        Ok(archive.records.len())
    }
}
