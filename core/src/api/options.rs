//! Configuration options for compilation and execution.

use crate::evaluator::EvaluatorOptions;
use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use formulet_core::api::CompilationOptions;
///
/// let options = CompilationOptions { max_parse_depth: 64 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Maximum nesting (brackets, prefix operators, open conditionals) accepted by the parser.
    ///
    /// Default: 128
    pub max_parse_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            max_parse_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration options for expression execution.
///
/// These options control resource limits during evaluation.
///
/// # Example
///
/// ```
/// use formulet_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions { max_depth: 500 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum evaluation depth (for recursion protection).
    ///
    /// Default: 128
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_depth: EvaluatorOptions::default().max_depth,
        }
    }
}

impl From<ExecutionOptions> for EvaluatorOptions {
    fn from(options: ExecutionOptions) -> Self {
        EvaluatorOptions {
            max_depth: options.max_depth,
        }
    }
}
