// src/infrastructure/di/service_container.rs
use std::path::Path;
use std::sync::Arc;

use crossterm::style::Stylize;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::image_service::ImageService;
use crate::application::services::import_service::ImportService;
use crate::application::services::metadata_service::MetadataService;
use crate::application::services::tag_service::TagService;
use crate::application::{
    ImageServiceImpl, ImportServiceImpl, MetadataServiceImpl, TagServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::http::image_fetcher::ReqwestImageFetcher;
use crate::infrastructure::http::page_fetcher::ReqwestPageFetcher;
use crate::infrastructure::image_cache::FileImageCache;
use crate::infrastructure::repositories::sqlite::repository::SqliteItemStore;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub store: Arc<SqliteItemStore>,
    pub import_service: Arc<dyn ImportService>,
    pub metadata_service: Arc<dyn MetadataService>,
    pub image_service: Arc<dyn ImageService>,
    pub tag_service: Arc<dyn TagService>,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let store = Self::create_store(&config.db_url)?;

        let import_service = Arc::new(ImportServiceImpl::new(store.clone()));

        let metadata_service = Arc::new(MetadataServiceImpl::new(
            store.clone(),
            Arc::new(ReqwestPageFetcher::new()),
        ));

        let image_service = Arc::new(ImageServiceImpl::new(
            FileImageCache::new(&config.image_cache_dir),
            Arc::new(ReqwestImageFetcher::new()),
        ));

        let tag_service = Arc::new(TagServiceImpl::new(store.clone()));

        Ok(Self {
            store,
            import_service,
            metadata_service,
            image_service,
            tag_service,
        })
    }

    fn create_store(db_url: &str) -> ApplicationResult<Arc<SqliteItemStore>> {
        // Check if the database file exists before wiring any services
        if !Path::new(db_url).exists() {
            eprintln!("{}", "Error: Database not found.".red());
            eprintln!("No database configured or the configured database does not exist.");
            eprintln!("Either:");
            eprintln!(
                "  1. Set NESTMARK_DB_URL environment variable to point to an existing database"
            );
            eprintln!("  2. Create a database using 'nestmark create-db <path>'");
            eprintln!("  3. Ensure the default database at '~/.config/nestmark/nestmark.db' exists");
            std::process::exit(1);
        }

        // Opening the store runs all pending migrations
        let store = SqliteItemStore::from_url(db_url).map_err(|e| {
            ApplicationError::Other(format!("Failed to create SQLite item store: {}", e))
        })?;

        Ok(Arc::new(store))
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("store", &"Arc<SqliteItemStore>")
            .field("import_service", &"Arc<dyn ImportService>")
            .field("metadata_service", &"Arc<dyn MetadataService>")
            .field("image_service", &"Arc<dyn ImageService>")
            .field("tag_service", &"Arc<dyn TagService>")
            .finish()
    }
}
