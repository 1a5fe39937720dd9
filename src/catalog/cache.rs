//! File-based cache for catalog responses.

use crate::model::LifecycleRecord;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File-based cache with TTL support.
///
/// One JSON file per (api base, product) pair, so switching catalogs never
/// serves stale data from another source.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    /// Cache directory
    cache_dir: PathBuf,
    /// Time-to-live for cached entries
    ttl: Duration,
}

impl CatalogCache {
    /// Create a cache rooted at `cache_dir`. The directory is created lazily.
    #[must_use]
    pub const fn new(cache_dir: PathBuf, ttl: Duration) -> Self {
        Self { cache_dir, ttl }
    }

    /// Directory holding the cache files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path_for(&self, base_url: &str, product: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(format!("base:{base_url}|product:{product}"));
        let hash = hasher.finalize();
        self.cache_dir.join(format!("{hash:x}.json"))
    }

    /// Get cached cycles for a product.
    ///
    /// Returns None if not cached, expired or unreadable.
    pub fn get(&self, base_url: &str, product: &str) -> Option<Vec<LifecycleRecord>> {
        let path = self.path_for(base_url, product);

        let metadata = fs::metadata(&path).ok()?;
        let age = metadata.modified().ok()?.elapsed().ok()?;
        if age > self.ttl {
            let _ = fs::remove_file(&path);
            return None;
        }

        let data = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Store cycles for a product.
    pub fn put(&self, base_url: &str, product: &str, records: &[LifecycleRecord]) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        let data = serde_json::to_string(records).map_err(io::Error::other)?;
        fs::write(self.path_for(base_url, product), data)
    }

    /// Remove every cached entry, returning how many files were deleted.
    pub fn clear(&self) -> io::Result<usize> {
        let mut removed = 0;
        if !self.cache_dir.exists() {
            return Ok(removed);
        }
        for entry in fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") && fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
