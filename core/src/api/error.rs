//! Public error types for the Formulet API.
//!
//! Internal errors are converted to these types at API boundaries. Evaluation errors pass
//! through untouched so that host failures reach the caller exactly as raised.

use core::fmt;

use thiserror::Error;

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};

/// Public error type for all Formulet operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid API usage (e.g., a malformed JSON tree).
    #[error("API error: {0}")]
    Api(String),

    /// Compilation errors.
    ///
    /// Contains one or more diagnostics with source locations, plus the source text (`src`)
    /// they refer to.
    #[error("Compilation failed with {} error(s)", error_count(.diagnostics))]
    Compilation {
        diagnostics: Vec<Diagnostic>,
        src: String,
    },

    /// Evaluation failed.
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count()
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            src: err.source,
        }
    }
}

/// A diagnostic message with source location and context.
///
/// Diagnostics are designed to be rendered by error reporting libraries
/// (ariadne in the `formulet` facade).
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "opened here").
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}
