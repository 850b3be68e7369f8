//! Analysis result types.

use std::path::PathBuf;

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::engine::EngineOutcome;

/// Outcome of analyzing a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// No findings.
    Passed {
        /// True when the pass was recorded by an earlier run and the engine was skipped.
        from_cache: bool,
    },
    /// The engine reported findings. Failing runs are never cached.
    Failed {
        diagnostics: Vec<Diagnostic>,
        metadata: Value,
    },
}

/// Result of analyzing a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Path to the analyzed file.
    pub path: PathBuf,

    /// Whether the file passed.
    pub verdict: Verdict,
}

impl AnalysisResult {
    /// Creates a result for a pass verified by the engine just now.
    pub fn passed(path: PathBuf) -> Self {
        Self {
            path,
            verdict: Verdict::Passed { from_cache: false },
        }
    }

    /// Creates a result for a pass taken from the cache.
    pub fn cached(path: PathBuf) -> Self {
        Self {
            path,
            verdict: Verdict::Passed { from_cache: true },
        }
    }

    /// Creates a failing result.
    pub fn failed(path: PathBuf, diagnostics: Vec<Diagnostic>, metadata: Value) -> Self {
        Self {
            path,
            verdict: Verdict::Failed {
                diagnostics,
                metadata,
            },
        }
    }

    /// Converts an engine outcome, which never comes from the cache.
    pub fn from_outcome(path: PathBuf, outcome: EngineOutcome) -> Self {
        match outcome {
            EngineOutcome::Pass => Self::passed(path),
            EngineOutcome::Fail {
                diagnostics,
                metadata,
            } => Self::failed(path, diagnostics, metadata),
        }
    }

    /// Returns true if the file passed.
    pub fn success(&self) -> bool {
        matches!(self.verdict, Verdict::Passed { .. })
    }

    /// Returns true if the pass came from the cache.
    pub fn from_cache(&self) -> bool {
        matches!(self.verdict, Verdict::Passed { from_cache: true })
    }

    /// Diagnostics of a failing run; empty when the file passed.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.verdict {
            Verdict::Failed { diagnostics, .. } => diagnostics,
            Verdict::Passed { .. } => &[],
        }
    }

    /// Engine metadata of a failing run.
    pub fn metadata(&self) -> Option<&Value> {
        match &self.verdict {
            Verdict::Failed { metadata, .. } => Some(metadata),
            Verdict::Passed { .. } => None,
        }
    }
}

/// Summary of analyzing multiple files.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// Total files analyzed.
    pub files_checked: usize,

    /// Files whose pass came from the cache.
    pub files_from_cache: usize,

    /// Files with findings.
    pub files_failed: usize,

    /// Total diagnostics found.
    pub total_diagnostics: usize,
}

impl AnalysisSummary {
    /// Creates a summary from results.
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            summary.files_checked += 1;
            if result.from_cache() {
                summary.files_from_cache += 1;
            }
            if !result.success() {
                summary.files_failed += 1;
            }
            summary.total_diagnostics += result.diagnostics().len();
        }

        summary
    }
}
