//! Cache error types.

use thiserror::Error;

/// Errors that can occur in the cache system.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to query the cache store.
    #[error("Failed to read cache: {0}")]
    ReadError(String),

    /// Failed to record an entry in the cache store.
    #[error("Failed to write cache: {0}")]
    WriteError(String),

    /// Cache store layout is not what the store expects.
    #[error("Corrupted cache: {0}")]
    Corrupted(String),

    /// Key cannot be stored by this backend.
    #[error("Invalid cache key: {0:?}")]
    InvalidKey(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Creates a read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::ReadError(message.into())
    }

    /// Creates a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::WriteError(message.into())
    }

    /// Creates a corrupted cache error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}
