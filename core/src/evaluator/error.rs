//! Runtime evaluation errors.
//!
//! Unknown node kinds and calls to non-callable values are not errors: both evaluate to
//! `undefined`. Everything else that can go wrong during evaluation is listed here.
//!
//! # Error Categories
//!
//! - **Host errors**: raised by host functions or resolvers. They reach the caller exactly
//!   as the host produced them.
//! - **Native errors**: operations the value semantics reject, such as reading a property
//!   of `undefined`.
//! - **Contract violations**: operator symbols missing from the operator tables.
//! - **Resource exceeded errors**: nesting deeper than the configured limit.

use std::error::Error as StdError;

use thiserror::Error;

/// Runtime evaluation error.
#[derive(Debug, Error)]
pub enum EvalError {
    /// An operator symbol not present in the operator tables.
    #[error("unknown operator '{operator}'")]
    UnknownOperator { operator: String },

    /// Property read on `undefined` or `null`.
    #[error("cannot read properties of {base} (reading '{property}')")]
    NullishProperty { property: String, base: String },

    /// A synchronous evaluation called a function that can only complete asynchronously.
    #[error("asynchronous function called from synchronous evaluation")]
    AsyncFunctionInSyncContext,

    /// Evaluation recursion depth exceeded.
    #[error("evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },

    /// Failure raised by a host function or resolver.
    #[error(transparent)]
    Host(Box<dyn StdError + Send + Sync>),
}

impl EvalError {
    /// Wrap a host failure.
    ///
    /// ```
    /// use formulet_core::evaluator::EvalError;
    ///
    /// let err = EvalError::host("connection refused");
    /// assert_eq!(err.to_string(), "connection refused");
    /// ```
    pub fn host(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        EvalError::Host(error.into())
    }

    pub fn is_host(&self) -> bool {
        matches!(self, EvalError::Host(_))
    }
}
