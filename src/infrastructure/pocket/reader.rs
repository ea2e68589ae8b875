// src/infrastructure/pocket/reader.rs
//! Reader for an extracted Pocket export: `part_*.csv` tables plus an
//! optional `collections/` directory of per-collection JSON documents.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::import::{
    CollectionOverride, PocketArchive, PocketRecord, IMPORTED_FROM_POCKET_TAG,
    POCKET_TAG_DESCRIPTION,
};
use crate::domain::tag::TagNameMap;

const EXPECTED_HEADER: [&str; 5] = ["title", "url", "time_added", "tags", "status"];

/// Reads a whole export directory. Any format violation aborts with an
/// error before a single record reaches the caller; rows from multiple
/// `part_*` files accumulate.
#[instrument(skip_all, level = "debug")]
pub fn read_pocket_dir(dir: &Path) -> DomainResult<PocketArchive> {
    let (collections, overrides) = read_collections(dir)?;

    let mut archive = PocketArchive {
        collections,
        ..PocketArchive::default()
    };

    for path in find_part_files(dir)? {
        read_part_file(&path, &overrides, &mut archive)?;
    }

    debug!(
        "Read {} record(s), {} tag name(s), {} status value(s)",
        archive.records.len(),
        archive.tag_descriptions.len(),
        archive.statuses.len()
    );
    Ok(archive)
}

/// Collection documents, in file-name order. Each contributes a collection
/// title/description plus per-URL overrides.
fn read_collections(
    dir: &Path,
) -> DomainResult<(TagNameMap, HashMap<String, CollectionOverride>)> {
    let mut collections = TagNameMap::new();
    let mut overrides: HashMap<String, CollectionOverride> = HashMap::new();

    let collections_dir = dir.join("collections");
    if !collections_dir.is_dir() {
        return Ok((collections, overrides));
    }

    for path in sorted_files(&collections_dir, |name| name.ends_with(".json"))? {
        let text = fs::read_to_string(&path)?;
        let document: Value =
            serde_json::from_str(&text).map_err(|_| invalid_collection(&path))?;

        let title = document
            .get("title")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid_collection(&path))?;
        let items = document
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid_collection(&path))?;
        let description = document
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("");

        collections.insert(title, description);

        for item in items {
            let url = item.get("url").and_then(Value::as_str);
            let item_title = item.get("title").and_then(Value::as_str);
            let (url, item_title) = match (url, item_title) {
                (Some(url), Some(item_title)) => (url, item_title),
                _ => return Err(invalid_item(item)),
            };

            let entry = overrides.entry(url.to_string()).or_default();
            entry.title = item_title.to_string();
            entry.excerpt = item
                .get("excerpt")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            entry.set_note(title, item.get("note").and_then(Value::as_str).unwrap_or(""));
            entry.add_membership(title);
        }
    }

    Ok((collections, overrides))
}

fn find_part_files(dir: &Path) -> DomainResult<Vec<PathBuf>> {
    let files = sorted_files(dir, |name| name.starts_with("part_") && name.ends_with(".csv"))?;
    if files.is_empty() {
        return Err(DomainError::InvalidFormat(
            "No CSV files found in the archive".to_string(),
        ));
    }
    Ok(files)
}

fn sorted_files<F>(dir: &Path, keep: F) -> DomainResult<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| keep(name));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// One tabular file. The header must match the Pocket export format
/// exactly; every row carries exactly 5 fields with an integer epoch.
fn read_part_file(
    path: &Path,
    overrides: &HashMap<String, CollectionOverride>,
    archive: &mut PocketArchive,
) -> DomainResult<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .escape(Some(b'\\'))
        .from_path(path)
        .map_err(|_| {
            DomainError::InvalidFormat(format!("Failed to open CSV file: {}", path.display()))
        })?;

    let mut rows = reader.records();

    let header = match rows.next() {
        Some(Ok(record)) => record,
        _ => return Err(invalid_csv(path)),
    };
    if !header.iter().eq(EXPECTED_HEADER) {
        return Err(invalid_csv(path));
    }

    for row in rows {
        let row = row.map_err(|_| invalid_row(path))?;
        if row.len() != 5 {
            return Err(invalid_row(path));
        }

        let url = &row[1];
        let epoch: i64 = row[2].parse().map_err(|_| invalid_row(path))?;
        let created_at =
            DateTime::<Utc>::from_timestamp(epoch, 0).ok_or_else(|| invalid_row(path))?;
        let status = &row[4];

        let mut tags: Vec<String> = row[3]
            .split('|')
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        tags.push(IMPORTED_FROM_POCKET_TAG.to_string());

        let override_entry = overrides.get(url);
        let title = match override_entry {
            Some(entry) if !entry.title.is_empty() && entry.title != url => entry.title.clone(),
            _ => row[0].to_string(),
        };
        let description = override_entry
            .map(|entry| entry.excerpt.clone())
            .unwrap_or_default();
        let comments = override_entry
            .map(|entry| entry.merged_comments())
            .unwrap_or_default();
        let memberships = override_entry
            .map(|entry| entry.collections.clone())
            .unwrap_or_default();

        for tag in &tags {
            archive.tag_descriptions.insert(tag, POCKET_TAG_DESCRIPTION);
        }
        archive.statuses.insert(status, "");

        archive.records.push(PocketRecord {
            title,
            description,
            url: url.to_string(),
            comments,
            tags,
            status: status.to_string(),
            collections: memberships,
            created_at,
        });
    }

    Ok(())
}

fn invalid_collection(path: &Path) -> DomainError {
    DomainError::InvalidFormat(format!(
        "Invalid collection data in file: {}",
        path.display()
    ))
}

fn invalid_item(item: &Value) -> DomainError {
    let rendered = serde_json::to_string(item).unwrap_or_default();
    DomainError::InvalidFormat(format!("Invalid item data in collection: {}", rendered))
}

fn invalid_csv(path: &Path) -> DomainError {
    DomainError::InvalidFormat(format!("Invalid CSV format in file: {}", path.display()))
}

fn invalid_row(path: &Path) -> DomainError {
    DomainError::InvalidFormat(format!("Invalid CSV row format in file: {}", path.display()))
}
