//! Per-file analysis requests.

use std::path::{Path, PathBuf};

use lintmemo_cache::{Globals, Options};

/// Everything needed to analyze one file.
///
/// Built once per file per run; the fields cannot change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    path: PathBuf,
    options: Options,
    globals: Globals,
    caching_enabled: bool,
}

impl AnalysisRequest {
    /// Creates a request with empty options and globals, caching enabled.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: Options::new(),
            globals: Globals::new(),
            caching_enabled: true,
        }
    }

    /// Sets the rule options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Sets the allowed globals.
    pub fn with_globals(mut self, globals: Globals) -> Self {
        self.globals = globals;
        self
    }

    /// Enables or disables the cache for this request.
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.caching_enabled = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching_enabled
    }
}
