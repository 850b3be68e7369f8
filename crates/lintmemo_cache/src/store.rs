//! Storage backends for the result cache.

use std::collections::HashSet;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::fs;
use tracing::{debug, info};

use crate::CacheError;

/// A set of opaque string keys supporting membership tests and inserts.
///
/// Implementations must tolerate concurrent calls through a shared reference.
/// Inserting a key that is already present succeeds without changing anything.
pub trait CacheStore: Send + Sync {
    /// Returns whether `key` has been inserted.
    fn contains(&self, key: &str) -> impl Future<Output = Result<bool, CacheError>> + Send;

    /// Inserts `key`.
    fn insert(&self, key: &str) -> impl Future<Output = Result<(), CacheError>> + Send;
}

/// Process-local store. Entries are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keys: RwLock<HashSet<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    /// Returns true if no key has been stored.
    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

impl CacheStore for MemoryStore {
    async fn contains(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.keys.read().contains(key))
    }

    async fn insert(&self, key: &str) -> Result<(), CacheError> {
        self.keys.write().insert(key.to_string());
        Ok(())
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Durable store keeping one marker file per key.
///
/// Layout: `<root>/<first two chars of key>/<key>`. A marker becomes visible
/// only through an atomic rename, so an interrupted insert leaves at most a
/// hidden temp file behind, never a partial entry.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Creates a store rooted at `root`. Nothing is created on disk until the first insert.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `(shard_dir, entry_path)` for a key.
    fn locate(&self, key: &str) -> Result<(PathBuf, PathBuf), CacheError> {
        let is_safe = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !is_safe {
            return Err(CacheError::InvalidKey(key.to_string()));
        }

        let shard = self.root.join(&key[..key.len().min(2)]);
        let entry = shard.join(key);
        Ok((shard, entry))
    }

    /// Counts committed entries. Leftover temp files are not counted.
    pub async fn len(&self) -> Result<usize, CacheError> {
        let mut shards = match fs::read_dir(&self.root).await {
            Ok(shards) => shards,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CacheError::read(format!("{}: {}", self.root.display(), e))),
        };

        let mut count = 0;
        while let Some(shard) = shards.next_entry().await? {
            if !shard.file_type().await?.is_dir() {
                continue;
            }
            let mut entries = fs::read_dir(shard.path()).await?;
            while let Some(entry) = entries.next_entry().await? {
                let hidden = entry.file_name().to_string_lossy().starts_with('.');
                if !hidden && entry.file_type().await?.is_file() {
                    count += 1;
                }
            }
        }

        Ok(count)
    }

    /// Returns true if the store holds no committed entries.
    pub async fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len().await? == 0)
    }

    /// Deletes the whole store.
    pub async fn clear(&self) -> Result<(), CacheError> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                info!("Cleared cache at {}", self.root.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::write(format!("{}: {}", self.root.display(), e))),
        }
    }
}

async fn is_entry(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_file())
}

impl CacheStore for DirStore {
    async fn contains(&self, key: &str) -> Result<bool, CacheError> {
        let (_, entry) = self.locate(key)?;

        match fs::metadata(&entry).await {
            Ok(meta) if meta.is_file() => Ok(true),
            Ok(_) => Err(CacheError::corrupted(format!(
                "{} is not a cache entry",
                entry.display()
            ))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::read(format!("{}: {}", entry.display(), e))),
        }
    }

    async fn insert(&self, key: &str) -> Result<(), CacheError> {
        let (shard, entry) = self.locate(key)?;

        if is_entry(&entry).await {
            debug!("Cache entry {} already present", key);
            return Ok(());
        }

        fs::create_dir_all(&shard)
            .await
            .map_err(|e| CacheError::write(format!("{}: {}", shard.display(), e)))?;

        let temp = shard.join(format!(
            ".{}.{}-{}.tmp",
            key,
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = fs::write(&temp, key.as_bytes()).await {
            let _ = fs::remove_file(&temp).await;
            return Err(CacheError::write(format!("{}: {}", temp.display(), e)));
        }

        if let Err(e) = fs::rename(&temp, &entry).await {
            let _ = fs::remove_file(&temp).await;
            // A concurrent insert of the same key may have won the rename.
            if is_entry(&entry).await {
                return Ok(());
            }
            return Err(CacheError::write(format!("{}: {}", entry.display(), e)));
        }

        Ok(())
    }
}
