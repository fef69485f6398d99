//! Tree-walking expression evaluators.
//!
//! Two evaluators share one node dispatch and one set of operator tables:
//!
//! - [`Evaluator`] runs synchronously and never suspends.
//! - [`AsyncEvaluator`] returns futures, so host functions and resolvers may themselves be
//!   asynchronous. Independent sub-expressions are issued together and joined.
//!
//! ## Design Principles
//!
//! - **Permissive on shape**: unknown node kinds and calls to non-functions yield `undefined`
//! - **Transparent on failure**: host errors reach the caller exactly as raised
//! - **Stack-safe**: depth tracking prevents stack overflow from deeply nested expressions
//!
//! ## Example
//!
//! ```
//! use formulet_core::{Context, Value, evaluator, parser};
//!
//! let ast = parser::parse("list[1 + 2]").unwrap();
//! let ctx = Context::builder()
//!     .register("list", Value::array((1..=5).map(Value::from)))
//!     .build();
//!
//! assert_eq!(evaluator::evaluate(&ast, &ctx).unwrap(), Value::from(4));
//! ```

mod error;
mod eval;
mod eval_async;
pub mod operators;


pub use error::EvalError;
pub use eval::Evaluator;
pub use eval_async::AsyncEvaluator;

use crate::{ast::Node, context::Context, values::Value};

/// Evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum nesting depth of evaluated nodes.
    ///
    /// Default: 128, which both walkers complete on a default 2 MiB thread stack.
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Evaluate `node` against `context` with default limits.
pub fn evaluate(node: &Node, context: &Context) -> Result<Value, EvalError> {
    evaluate_with_options(node, context, EvaluatorOptions::default())
}

/// Evaluate `node` against `context` with custom limits.
pub fn evaluate_with_options(
    node: &Node,
    context: &Context,
    options: EvaluatorOptions,
) -> Result<Value, EvalError> {
    Evaluator::new(options, context).eval(node)
}

/// Evaluate a member expression to its `(receiver, value)` pair.
pub fn evaluate_member(node: &Node, context: &Context) -> Result<(Value, Value), EvalError> {
    Evaluator::new(EvaluatorOptions::default(), context).eval_member(node)
}

/// Evaluate `node` against `context`, awaiting asynchronous host functions.
pub async fn evaluate_async(node: &Node, context: &Context) -> Result<Value, EvalError> {
    evaluate_async_with_options(node, context, EvaluatorOptions::default()).await
}

/// Asynchronous evaluation with custom limits.
pub async fn evaluate_async_with_options(
    node: &Node,
    context: &Context,
    options: EvaluatorOptions,
) -> Result<Value, EvalError> {
    AsyncEvaluator::new(options, context).eval(node).await
}
