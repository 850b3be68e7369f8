//! Concurrent analysis of many files.

use std::path::PathBuf;

use futures::stream::{self, StreamExt};
use lintmemo_cache::CacheStore;
use tracing::{info, warn};

use crate::analyzer::FileAnalyzer;
use crate::engine::AnalysisEngine;
use crate::error::AnalyzerError;
use crate::request::AnalysisRequest;
use crate::result::{AnalysisResult, AnalysisSummary};

/// Results in completion order, plus the files that could not be analyzed.
pub type AnalyzeFilesResult = (Vec<AnalysisResult>, Vec<(PathBuf, AnalyzerError)>);

/// Number of files analyzed at once when the caller has no preference.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// Analyzes every request with at most `concurrency` files in flight.
///
/// Files are independent: one file's error does not stop the others, and
/// results arrive in whatever order the analyses finish.
pub async fn analyze_files<E, S>(
    analyzer: &FileAnalyzer<E, S>,
    requests: Vec<AnalysisRequest>,
    concurrency: usize,
) -> AnalyzeFilesResult
where
    E: AnalysisEngine,
    S: CacheStore,
{
    let outcomes: Vec<Result<AnalysisResult, (PathBuf, AnalyzerError)>> = stream::iter(requests)
        .map(|request| async move {
            analyzer
                .analyze(&request)
                .await
                .map_err(|e| (request.path().to_path_buf(), e))
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(result) => successes.push(result),
            Err((path, error)) => {
                warn!("Failed to analyze {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }

    let summary = AnalysisSummary::from_results(&successes);
    info!(
        "Analyzed {} files ({} from cache, {} with findings, {} errors)",
        summary.files_checked,
        summary.files_from_cache,
        summary.files_failed,
        failures.len()
    );

    (successes, failures)
}
