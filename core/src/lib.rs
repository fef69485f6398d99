//! Evaluation of JavaScript-like expression trees against caller-supplied contexts.
//!
//! The crate parses expressions into ESTree-shaped [`Node`] trees, evaluates them either
//! synchronously or asynchronously, and statically lists the names an expression reads.

pub mod analyzer;
pub mod api;
pub mod ast;
pub mod context;
pub mod evaluator;
pub mod parser;
pub mod values;

pub use api::{AsyncCompiledExpression, CompiledExpression, Error, compile, compile_async};
pub use ast::{Literal, Node};
pub use context::{Context, ContextBuilder};
pub use evaluator::{EvalError, evaluate, evaluate_async};
pub use values::Value;
