// src/util/testing.rs

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};
use tracing::debug;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::{Item, NewItem};
use crate::domain::repositories::item_store::ItemStore;
use crate::domain::tag::Tag;
use crate::infrastructure::repositories::sqlite::repository::SqliteItemStore;
use chrono::Utc;
use tempfile::TempDir;

static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes logging for tests exactly once.
pub fn init_test_env() {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
    });
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "debug");
    }

    let noisy_modules = ["html5ever", "reqwest", "mio", "want", "hyper_util"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Saves the nestmark environment variables on creation and restores them on
/// drop, so env-mutating tests cannot leak into each other.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    db_url: Option<String>,
    image_cache_dir: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            db_url: env::var("NESTMARK_DB_URL").ok(),
            image_cache_dir: env::var("NESTMARK_IMAGE_CACHE_DIR").ok(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var("NESTMARK_DB_URL");
        env::remove_var("NESTMARK_IMAGE_CACHE_DIR");
        if let Some(val) = &self.db_url {
            env::set_var("NESTMARK_DB_URL", val);
        }
        if let Some(val) = &self.image_cache_dir {
            env::set_var("NESTMARK_IMAGE_CACHE_DIR", val);
        }
    }
}

/// Creates a migrated store in a fresh temporary directory. The returned
/// TempDir must stay alive for as long as the store is used.
pub fn setup_test_db() -> (SqliteItemStore, TempDir) {
    init_test_env();
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("nestmark-test.db");
    let store = SqliteItemStore::from_url(db_path.to_string_lossy().as_ref())
        .expect("Failed to create SqliteItemStore");
    (store, temp_dir)
}

pub fn make_tag(id: i32, title: &str, parent: i32) -> Tag {
    Tag {
        id,
        title: title.to_string(),
        description: String::new(),
        color: String::new(),
        parent,
        pinned: false,
        created_at: None,
        updated_at: None,
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    tags: Vec<Tag>,
    items: Vec<Item>,
    associations: Vec<(i32, i32)>,
    next_tag_id: i32,
    next_item_id: i32,
    created_tags: usize,
}

/// In-memory ItemStore double for service-level unit tests.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    state: Mutex<InMemoryState>,
    fail_updates: AtomicBool,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::with_tags(Vec::new())
    }

    pub fn with_tags(tags: Vec<Tag>) -> Self {
        let next_tag_id = tags.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(InMemoryState {
                tags,
                next_tag_id,
                next_item_id: 1,
                ..InMemoryState::default()
            }),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent metadata update fail, to exercise the
    /// isolated-write-failure path.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.state.lock().unwrap().tags.clone()
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.lock().unwrap().items.clone()
    }

    pub fn associations(&self) -> Vec<(i32, i32)> {
        self.state.lock().unwrap().associations.clone()
    }

    pub fn created_tag_count(&self) -> usize {
        self.state.lock().unwrap().created_tags
    }
}

impl ItemStore for InMemoryItemStore {
    fn get_tags(&self) -> DomainResult<Vec<Tag>> {
        let mut tags = self.state.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(tags)
    }

    fn create_item(&self, item: &NewItem) -> DomainResult<i32> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_item_id;
        state.next_item_id += 1;
        state.items.push(Item {
            id,
            title: item.title.clone(),
            description: item.description.clone(),
            url: item.url.clone(),
            comments: item.comments.clone(),
            image: item.image.clone(),
            created_at: Some(item.created_at.unwrap_or_else(Utc::now)),
            updated_at: None,
        });
        Ok(id)
    }

    fn attach_item_tags(&self, item_ids: &[i32], tag_ids: &[i32]) -> DomainResult<()> {
        if item_ids.is_empty() || tag_ids.is_empty() {
            return Ok(());
        }
        let mut state = self.state.lock().unwrap();
        for item_id in item_ids {
            for tag_id in tag_ids {
                state.associations.push((*item_id, *tag_id));
            }
        }
        Ok(())
    }

    fn create_tag(
        &self,
        title: &str,
        description: &str,
        parent: i32,
        color: &str,
        pinned: bool,
    ) -> DomainResult<i32> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_tag_id;
        state.next_tag_id += 1;
        state.created_tags += 1;
        state.tags.push(Tag {
            id,
            title: title.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            parent,
            pinned,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        });
        Ok(id)
    }

    fn update_items_metadata(
        &self,
        title: &str,
        description: &str,
        image: &str,
        item_ids: &[i32],
    ) -> DomainResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("simulated write failure".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        for item in state.items.iter_mut() {
            if item_ids.contains(&item.id) {
                item.title = title.to_string();
                item.description = description.to_string();
                item.image = image.to_string();
                item.updated_at = Some(Utc::now());
            }
        }
        Ok(())
    }

    fn get_item_urls(&self, ids: &[i32]) -> DomainResult<Vec<(i32, String)>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .map(|item| (item.id, item.url.clone()))
            .collect())
    }
}
