// src/domain/tag.rs
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A stored tag. Tags form a hierarchy through `parent` (0 = root); the pair
/// (title, parent) is unique regardless of case.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub color: String,
    pub parent: i32,
    pub pinned: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tag {
    pub fn is_root(&self) -> bool {
        self.parent == 0
    }

    /// Case-insensitive match against a (title, parent) lookup key.
    pub fn matches(&self, title: &str, parent: i32) -> bool {
        self.parent == parent && self.title.eq_ignore_ascii_case(title)
    }
}

/// Lookup normalization for tag titles. SQLite's NOCASE collation folds
/// ASCII only, so the in-process normalization must not fold further.
pub fn normalize_title(title: &str) -> String {
    title.to_ascii_lowercase()
}

/// Splits a tag title into hierarchy segments on `/`. The two-character
/// sequence `\/` stands for a literal slash inside one segment. Segments
/// that are empty after trimming are dropped; kept segments stay verbatim.
pub fn split_tag_path(title: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = title.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'/') => {
                chars.next();
                current.push('/');
            }
            '/' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments.retain(|segment| !segment.trim().is_empty());
    segments
}

/// Accumulates (tag title, description) pairs keyed by the normalized
/// lowercased title. The first-seen spelling and insertion order are
/// retained; later case variants of the same name are ignored.
#[derive(Debug, Clone, Default)]
pub struct TagNameMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TagNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: &str, description: &str) {
        let key = normalize_title(title);
        if !self.index.contains_key(&key) {
            self.index.insert(key, self.entries.len());
            self.entries.push((title.to_string(), description.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Pairs of (first-seen spelling, description) in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }
}
