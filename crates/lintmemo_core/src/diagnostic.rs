//! Diagnostic types reported by analysis engines.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
    /// Info - informational message.
    Info,
}

/// A single issue found by an analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line of the issue.
    pub line: u32,

    /// 1-based column of the issue.
    pub column: u32,

    /// The diagnostic message.
    pub message: String,

    /// Engine-specific code, e.g. `W033`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// The offending source line, when the engine reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            code: None,
            severity: Severity::Error,
            evidence: None,
        }
    }

    /// Sets the engine-specific code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the offending source line.
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}
