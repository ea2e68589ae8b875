// src/cli/item_commands.rs
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::instrument;
use url::Url;

use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;
use crate::util::helper::ensure_int_vector;

// Helper function to get and validate IDs
fn get_ids(ids: &str) -> CliResult<Vec<i32>> {
    let string_vec: Vec<String> = ids.split(',').map(|s| s.trim().to_string()).collect();
    ensure_int_vector(&string_vec)
        .ok_or_else(|| CliError::InvalidIdFormat(format!("Invalid ID format: {}", ids)))
}

#[instrument(skip(services), level = "debug")]
pub fn refresh(services: &ServiceContainer, ids: String) -> CliResult<()> {
    let item_ids = get_ids(&ids)?;

    let message = services.metadata_service.refresh_items(&item_ids)?;
    println!("{}", message);
    Ok(())
}

#[instrument(skip(services), level = "debug")]
pub fn image(
    services: &ServiceContainer,
    url: String,
    item_id: Option<i32>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    if Url::parse(&url).is_err() {
        return Err(CliError::InvalidInput(format!("Invalid image URL: {}", url)));
    }

    let served = services.image_service.serve_image(&url, item_id)?;

    match output {
        Some(path) => {
            fs::write(&path, &served.bytes)?;
            println!("Wrote {} bytes to {}", served.bytes.len(), path.display());
            println!("Cache duration: {} minutes", served.cache_minutes);
        }
        None => {
            // Keep stdout clean for piping; the duration goes to stderr.
            let mut stdout = std::io::stdout();
            stdout.write_all(&served.bytes)?;
            stdout.flush()?;
            eprintln!("Cache duration: {} minutes", served.cache_minutes);
        }
    }
    Ok(())
}
