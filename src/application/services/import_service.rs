// src/application/services/import_service.rs
use std::path::Path;

use crate::application::error::ApplicationResult;

/// Service interface for bookmark imports
pub trait ImportService: Send + Sync {
    /// Import a Netscape bookmark export; returns (imported, skipped)
    fn import_browser_html(&self, html: &str) -> ApplicationResult<(usize, usize)>;

    /// Import a Pocket export, given either as a ZIP archive or as an
    /// already extracted directory; returns the number of imported items
    fn import_pocket_archive(&self, path: &Path) -> ApplicationResult<usize>;
}
