// src/infrastructure/image_cache.rs
//! File-backed cache for proxied item images, one file per
//! (image_url, item_id) pair.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct FileImageCache {
    cache_dir: PathBuf,
}

impl FileImageCache {
    pub fn new<P: Into<PathBuf>>(cache_dir: P) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Cache file for one (image_url, item_id) pair.
    pub fn entry_path(&self, image_url: &str, item_id: i32) -> PathBuf {
        let digest = md5::compute(image_url.as_bytes());
        self.cache_dir.join(format!("{}_{:x}", item_id, digest))
    }

    /// Cached bytes. A missing, unreadable or empty entry reads as absent,
    /// so the caller falls through to a refetch.
    pub fn load(&self, image_url: &str, item_id: i32) -> Option<Vec<u8>> {
        let path = self.entry_path(image_url, item_id);
        match fs::read(&path) {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            _ => None,
        }
    }

    /// Persists one entry. A write failure is logged and swallowed; the
    /// caller still serves the bytes it fetched.
    pub fn store(&self, image_url: &str, item_id: i32, bytes: &[u8]) {
        let path = self.entry_path(image_url, item_id);
        let written = fs::create_dir_all(&self.cache_dir).and_then(|_| fs::write(&path, bytes));
        if let Err(e) = written {
            warn!("Failed to cache image at {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_url_and_item_when_addressed_then_file_name_is_id_and_md5_hex() {
        let cache = FileImageCache::new("/var/cache/nestmark");

        let path = cache.entry_path("https://cdn.example/pic.png", 42);

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!(
                "42_{:x}",
                md5::compute("https://cdn.example/pic.png".as_bytes())
            )
        );
        assert!(path.starts_with("/var/cache/nestmark"));
    }

    #[test]
    fn given_stored_entry_when_loaded_then_same_bytes_return() {
        let dir = TempDir::new().unwrap();
        let cache = FileImageCache::new(dir.path());

        assert!(cache.load("https://cdn.example/a.png", 1).is_none());

        cache.store("https://cdn.example/a.png", 1, b"png bytes");
        assert_eq!(
            cache.load("https://cdn.example/a.png", 1).as_deref(),
            Some(b"png bytes".as_slice())
        );

        // A different item id addresses a different entry.
        assert!(cache.load("https://cdn.example/a.png", 2).is_none());
    }

    #[test]
    fn given_empty_cached_file_when_loaded_then_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let cache = FileImageCache::new(dir.path());

        cache.store("https://cdn.example/empty.png", 7, b"");

        assert!(cache.load("https://cdn.example/empty.png", 7).is_none());
    }
}
