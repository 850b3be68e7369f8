//! # lintmemo_core
//!
//! Cached file analysis for lintmemo.
//!
//! This crate provides:
//! - The [`FileAnalyzer`] that skips files already known to pass
//! - The [`AnalysisEngine`] boundary any linter can implement
//! - Configuration loading
//! - Concurrent analysis of many files
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintmemo_core::{AnalyzerConfig, FileAnalyzer, analyze_files};
//!
//! let config = AnalyzerConfig::from_file(".lintmemo.json")?;
//! let analyzer = FileAnalyzer::new(my_engine, config.open_cache());
//!
//! let requests = paths.iter().map(|p| config.request(p)).collect::<Vec<_>>();
//! let (results, failures) = analyze_files(&analyzer, requests, 16).await;
//! for result in results {
//!     println!("{}: {} issues", result.path.display(), result.diagnostics().len());
//! }
//! ```

mod analyzer;
mod config;
mod diagnostic;
mod engine;
mod error;
mod parallel_analyzer;
mod request;
mod result;

pub use analyzer::FileAnalyzer;
pub use config::{AnalyzerConfig, CacheConfig};
pub use diagnostic::{Diagnostic, Severity};
pub use engine::{AnalysisEngine, EngineOutcome};
pub use error::AnalyzerError;
pub use parallel_analyzer::{AnalyzeFilesResult, DEFAULT_CONCURRENCY, analyze_files};
pub use request::AnalysisRequest;
pub use result::{AnalysisResult, AnalysisSummary, Verdict};

pub use lintmemo_cache::{
    CacheError, CacheStore, DirStore, Fingerprint, Globals, MemoryStore, Options, ResultCache,
    fingerprint,
};
