// src/infrastructure/repositories/sqlite/migration.rs
use crate::infrastructure::repositories::sqlite::error::SqliteStoreError;
use diesel::sqlite::Sqlite;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Initializes a database from scratch: reverts anything already applied,
/// then runs every migration.
pub fn init_db(connection: &mut impl MigrationHarness<Sqlite>) -> Result<(), SqliteStoreError> {
    connection.revert_all_migrations(MIGRATIONS).map_err(|e| {
        SqliteStoreError::MigrationError(format!("Failed to revert migrations: {}", e))
    })?;

    let pending = connection.pending_migrations(MIGRATIONS).map_err(|e| {
        SqliteStoreError::MigrationError(format!("Failed to get pending migrations: {}", e))
    })?;

    pending.iter().for_each(|m| {
        debug!("Pending Migration: {}", m.name());
    });

    connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        SqliteStoreError::MigrationError(format!("Failed to run pending migrations: {}", e))
    })?;

    Ok(())
}
