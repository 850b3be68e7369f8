//! The boundary to the analysis engine.

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use lintmemo_cache::{Globals, Options};

/// What an engine reports for one piece of source text.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutcome {
    /// No findings.
    Pass,
    /// At least one finding.
    Fail {
        /// Findings in the order the engine reported them.
        diagnostics: Vec<Diagnostic>,
        /// Engine-specific data describing the analyzed source.
        metadata: Value,
    },
}

impl EngineOutcome {
    /// Creates a failing outcome.
    pub fn fail(diagnostics: Vec<Diagnostic>, metadata: Value) -> Self {
        Self::Fail {
            diagnostics,
            metadata,
        }
    }

    /// Returns true if the engine found nothing.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// A linter that analyzes source text against a configuration.
///
/// Each call returns its own outcome; implementations must not hand results
/// back through shared state, since many files are analyzed at once.
pub trait AnalysisEngine: Send + Sync {
    /// Analyzes `source` with the given rule options and allowed globals.
    fn analyze(&self, source: &str, options: &Options, globals: &Globals) -> EngineOutcome;
}

impl<F> AnalysisEngine for F
where
    F: Fn(&str, &Options, &Globals) -> EngineOutcome + Send + Sync,
{
    fn analyze(&self, source: &str, options: &Options, globals: &Globals) -> EngineOutcome {
        self(source, options, globals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_engine() {
        let engine = |source: &str, _: &Options, _: &Globals| {
            if source.contains("debugger") {
                EngineOutcome::fail(
                    vec![Diagnostic::new("Forgotten 'debugger' statement?", 1, 1)],
                    Value::Null,
                )
            } else {
                EngineOutcome::Pass
            }
        };

        assert!(
            engine
                .analyze("var x = 1;", &Options::new(), &Globals::new())
                .is_pass()
        );
        assert!(
            !engine
                .analyze("debugger;", &Options::new(), &Globals::new())
                .is_pass()
        );
    }
}
