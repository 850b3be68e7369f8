//! The result cache consulted before running an analysis.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::fingerprint::Fingerprint;
use crate::store::{CacheStore, DirStore, MemoryStore};
use crate::CacheError;

/// Record of fingerprints whose analysis finished without findings.
///
/// Entries are only ever created; nothing here updates or removes them.
#[derive(Debug)]
pub struct ResultCache<S> {
    store: S,
}

impl<S: CacheStore> ResultCache<S> {
    /// Wraps a storage backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the storage backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns whether a passing analysis was recorded for `fingerprint`.
    ///
    /// An unknown fingerprint is `Ok(false)`. A store that cannot be queried
    /// is an error, never a miss.
    pub async fn has_cached(&self, fingerprint: &Fingerprint) -> Result<bool, CacheError> {
        let hit = self.store.contains(fingerprint.as_str()).await?;
        debug!(
            "Cache {} for {}",
            if hit { "hit" } else { "miss" },
            fingerprint
        );
        Ok(hit)
    }

    /// Records a passing analysis for `fingerprint`. Recording it again is a no-op.
    pub async fn add_cached(&self, fingerprint: &Fingerprint) -> Result<(), CacheError> {
        self.store.insert(fingerprint.as_str()).await?;
        debug!("Cached {}", fingerprint);
        Ok(())
    }
}

impl ResultCache<DirStore> {
    /// Opens the on-disk cache stored under `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let store = DirStore::new(dir);
        info!("Using cache at {}", store.root().display());
        Self::new(store)
    }
}

impl ResultCache<MemoryStore> {
    /// Creates a cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{Globals, Options, fingerprint};
    use tempfile::tempdir;

    fn sample() -> Fingerprint {
        fingerprint("var x = 1;\n", &Options::new(), &Globals::new())
    }

    #[tokio::test]
    async fn test_has_cached_unknown_fingerprint() {
        let cache = ResultCache::in_memory();

        assert!(!cache.has_cached(&sample()).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_cached_then_has_cached() {
        let cache = ResultCache::in_memory();
        let fp = sample();

        cache.add_cached(&fp).await.unwrap();

        assert!(cache.has_cached(&fp).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_cached_is_idempotent() {
        let cache = ResultCache::in_memory();
        let fp = sample();

        cache.add_cached(&fp).await.unwrap();
        assert!(cache.has_cached(&fp).await.unwrap());

        cache.add_cached(&fp).await.unwrap();
        assert!(cache.has_cached(&fp).await.unwrap());
        assert_eq!(cache.store().len(), 1);
    }

    #[tokio::test]
    async fn test_no_false_hits() {
        let cache = ResultCache::in_memory();
        cache.add_cached(&sample()).await.unwrap();

        let other = fingerprint("var y = 2;\n", &Options::new(), &Globals::new());

        assert!(!cache.has_cached(&other).await.unwrap());
    }

    #[tokio::test]
    async fn test_open_on_disk_cache() {
        let temp_dir = tempdir().unwrap();
        let fp = sample();

        ResultCache::open(temp_dir.path()).add_cached(&fp).await.unwrap();

        let reopened = ResultCache::open(temp_dir.path());
        assert!(reopened.has_cached(&fp).await.unwrap());
        assert_eq!(reopened.store().len().await.unwrap(), 1);
    }
}
