// src/cli/db_commands.rs
use std::path::Path;
use std::{fs, io};

use tracing::instrument;

use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::repositories::sqlite::migration;
use crate::infrastructure::repositories::sqlite::repository::SqliteItemStore;

#[instrument(level = "debug")]
pub fn create_db(path: &str) -> CliResult<()> {
    // Check if the database file already exists
    if Path::new(path).exists() {
        return Err(CliError::InvalidInput(format!(
            "Database already exists at: {}. Please choose a different path or delete the existing file.",
            path
        )));
    }

    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::Io(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to create parent directories: {}", e),
                ))
            })?;
        }
    }

    println!("Creating new database at: {}", path);

    // Create the store with the new path
    let store = SqliteItemStore::from_url(path)?;

    // Run migrations from a clean slate to set up the schema
    let mut conn = store.get_connection()?;
    migration::init_db(&mut conn)?;

    println!("Database created successfully at: {}", path);
    Ok(())
}
