//! Analyzer error types.

use std::path::{Path, PathBuf};

use lintmemo_cache::CacheError;
use thiserror::Error;

/// Errors that stop the analysis of a file.
///
/// A file with findings is not an error; see [`crate::Verdict::Failed`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cache could not be queried.
    #[error("Cache lookup failed for {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: CacheError,
    },

    /// The file passed but the cache could not record it.
    #[error("Failed to cache passing result for {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: CacheError,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns the file this error belongs to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. }
            | Self::CacheRead { path, .. }
            | Self::CacheWrite { path, .. } => Some(path.as_path()),
            Self::Config(_) => None,
        }
    }
}
