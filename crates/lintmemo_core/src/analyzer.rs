//! Single file analysis with the cache fast path.

use std::path::Path;

use lintmemo_cache::{CacheStore, ResultCache, fingerprint};
use tokio::fs;
use tracing::debug;

use crate::engine::{AnalysisEngine, EngineOutcome};
use crate::error::AnalyzerError;
use crate::request::AnalysisRequest;
use crate::result::AnalysisResult;

/// Analyzes files, skipping those already known to pass with the same configuration.
///
/// One analyzer is shared by every in-flight analysis; it holds no per-file state.
pub struct FileAnalyzer<E, S> {
    engine: E,
    cache: ResultCache<S>,
}

impl<E, S> FileAnalyzer<E, S>
where
    E: AnalysisEngine,
    S: CacheStore,
{
    /// Creates an analyzer running `engine` and remembering passes in `cache`.
    pub fn new(engine: E, cache: ResultCache<S>) -> Self {
        Self { engine, cache }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the result cache.
    pub fn cache(&self) -> &ResultCache<S> {
        &self.cache
    }

    /// Analyzes one file.
    ///
    /// With caching enabled, a file whose fingerprint was recorded by an earlier
    /// pass is reported as passed without running the engine, and a new pass is
    /// recorded before it is reported. Findings are returned as data and never
    /// cached. Read and cache failures end the analysis with an error.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzerError> {
        let path = request.path();
        let content = read_contents(path).await?;

        if !request.caching_enabled() {
            let outcome = self.run_engine(&content, request);
            return Ok(AnalysisResult::from_outcome(path.to_path_buf(), outcome));
        }

        let fingerprint = fingerprint(&content, request.options(), request.globals());

        let cached = self
            .cache
            .has_cached(&fingerprint)
            .await
            .map_err(|source| AnalyzerError::CacheRead {
                path: path.to_path_buf(),
                source,
            })?;
        if cached {
            debug!("Using cached result for {}", path.display());
            return Ok(AnalysisResult::cached(path.to_path_buf()));
        }

        match self.run_engine(&content, request) {
            EngineOutcome::Pass => {
                self.cache
                    .add_cached(&fingerprint)
                    .await
                    .map_err(|source| AnalyzerError::CacheWrite {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Ok(AnalysisResult::passed(path.to_path_buf()))
            }
            outcome => Ok(AnalysisResult::from_outcome(path.to_path_buf(), outcome)),
        }
    }

    fn run_engine(&self, content: &str, request: &AnalysisRequest) -> EngineOutcome {
        debug!("Analyzing {}", request.path().display());
        self.engine
            .analyze(content, request.options(), request.globals())
    }
}

async fn read_contents(path: &Path) -> Result<String, AnalyzerError> {
    let bytes = fs::read(path).await.map_err(|source| AnalyzerError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
