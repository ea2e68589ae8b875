// src/cli/import_commands.rs
use std::fs;
use std::path::Path;

use tracing::instrument;

use crate::application::error::ApplicationError;
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;

#[instrument(skip(services), level = "debug")]
pub fn import_html(services: &ServiceContainer, file: &Path) -> CliResult<()> {
    let html = fs::read_to_string(file).map_err(|e| {
        CliError::InvalidInput(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let (imported, skipped) = services.import_service.import_browser_html(&html)?;

    // Tags created while scanning the document stay in place; only the
    // zero-items outcome is reported as a failure.
    if imported == 0 {
        return Err(CliError::Application(ApplicationError::Validation(
            "No bookmarks found in the uploaded file".to_string(),
        )));
    }

    println!(
        "{} bookmarks imported successfully, {} bookmarks skipped.",
        imported, skipped
    );
    Ok(())
}

#[instrument(skip(services), level = "debug")]
pub fn import_pocket(services: &ServiceContainer, archive: &Path) -> CliResult<()> {
    let imported = services.import_service.import_pocket_archive(archive)?;

    println!("{} Pocket bookmarks imported successfully", imported);
    Ok(())
}
