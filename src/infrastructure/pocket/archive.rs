// src/infrastructure/pocket/archive.rs
//! ZIP staging for Pocket exports. The extracted tree lives in a scoped
//! temp dir that is removed on drop, covering every exit path.

use std::fs::File;
use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, instrument};
use zip::ZipArchive;

use crate::domain::error::{DomainError, DomainResult};

/// Extracts a Pocket ZIP export into a fresh temporary directory. The
/// returned guard owns the directory; dropping it removes the staged tree.
#[instrument(skip_all, level = "debug")]
pub fn stage_zip_archive(path: &Path) -> DomainResult<TempDir> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|_| DomainError::InvalidFormat("Failed to open ZIP archive".to_string()))?;

    let staging = TempDir::with_prefix("pocket_import_")?;
    archive
        .extract(staging.path())
        .map_err(|e| DomainError::InvalidFormat(format!("Failed to extract ZIP archive: {}", e)))?;

    debug!(
        "Staged {} archive entries into {}",
        archive.len(),
        staging.path().display()
    );
    Ok(staging)
}
