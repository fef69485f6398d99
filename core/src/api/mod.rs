//! Public API for compiling and running expressions.
//!
//! Compilation parses once; the resulting expression is reusable across contexts and cheap
//! to clone.
//!
//! # Example
//!
//! ```
//! use formulet_core::{Context, Value, api::compile_async};
//!
//! let expr = compile_async("lookup(key) + 1").unwrap();
//! let ctx = Context::builder()
//!     .async_function("lookup", |_this, args| async move {
//!         Ok(Value::from(args.len()))
//!     })
//!     .register("key", Value::from("k"))
//!     .build();
//!
//! let result = futures::executor::block_on(expr.evaluate(&ctx)).unwrap();
//! assert_eq!(result, Value::from(2));
//! ```

pub mod error;
pub mod expression;
pub mod options;

pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use expression::{AsyncCompiledExpression, CompiledExpression};
pub use options::{CompilationOptions, ExecutionOptions};

#[cfg(test)]
mod expression_test;

use tracing::debug;

use crate::parser::parse_with_max_depth;

/// Parse `source` once and bind it to the synchronous evaluator.
pub fn compile(source: &str) -> Result<CompiledExpression, Error> {
    compile_with_options(source, CompilationOptions::default())
}

pub fn compile_with_options(
    source: &str,
    options: CompilationOptions,
) -> Result<CompiledExpression, Error> {
    debug!(len = source.len(), "compiling expression");
    let ast = parse_with_max_depth(source, options.max_parse_depth)?;
    Ok(CompiledExpression::new(ast, source))
}

/// Parse `source` once and bind it to the asynchronous evaluator.
pub fn compile_async(source: &str) -> Result<AsyncCompiledExpression, Error> {
    compile_async_with_options(source, CompilationOptions::default())
}

pub fn compile_async_with_options(
    source: &str,
    options: CompilationOptions,
) -> Result<AsyncCompiledExpression, Error> {
    debug!(len = source.len(), "compiling async expression");
    let ast = parse_with_max_depth(source, options.max_parse_depth)?;
    Ok(AsyncCompiledExpression::new(ast, source))
}
