//! # lintmemo_cache
//!
//! Result cache for lintmemo.
//!
//! This crate remembers which (content, configuration) pairs have already been
//! analyzed without findings, so unchanged files can skip re-analysis.
//!
//! ## Cache Strategy
//!
//! 1. **Content-addressed**: the key is a fingerprint of the file content
//! 2. **Config-aware**: rule options and globals are part of the fingerprint
//! 3. **Pass-only**: only clean runs are recorded, so presence means "known good"
//!
//! ## Storage
//!
//! Entries live behind the [`CacheStore`] trait. [`DirStore`] keeps one marker
//! file per fingerprint on disk and survives across runs; [`MemoryStore`] is
//! process-local.

mod cache;
mod error;
pub mod fingerprint;
mod store;

pub use cache::ResultCache;
pub use error::CacheError;
pub use fingerprint::{Fingerprint, Globals, Options, fingerprint};
pub use store::{CacheStore, DirStore, MemoryStore};
