//! Formulet - evaluate JavaScript-like formulas against host data
//!
//! # Overview
//!
//! Formulet lets an application accept short user formulas (arithmetic, comparisons,
//! member access, conditionals, logical operators and function calls) and evaluate them
//! against its own data without embedding a full scripting language. Common uses:
//!
//! - Computed fields and spreadsheet-like cells
//! - Feature flags and conditional rules
//! - Template bindings that re-evaluate when their inputs change
//!
//! # Quick Start
//!
//! ```
//! use formulet::{Context, Value, compile};
//!
//! let expr = compile("qty > 0 ? price * qty : fallback").unwrap();
//! let ctx = Context::builder()
//!     .register("price", Value::from(12.5))
//!     .register("qty", Value::from(10))
//!     .build();
//!
//! assert_eq!(expr.evaluate(&ctx).unwrap(), Value::from(125));
//! assert_eq!(expr.identifiers().unwrap(), ["price", "qty", "fallback"]);
//! ```
//!
//! [`CompiledExpression::identifiers`] lists the names read by the branches of a
//! conditional but not those of its condition.
//!
//! # Host functions
//!
//! Functions receive the call receiver (`this`) and their arguments:
//!
//! ```
//! use formulet::{Context, Value, compile, values::property::get_property};
//!
//! let ctx = Context::builder()
//!     .register(
//!         "user",
//!         Value::object([
//!             ("name", Value::from("ada")),
//!             ("get", Value::function(|this, args| get_property(this, &args[0]))),
//!         ]),
//!     )
//!     .build();
//!
//! let expr = compile("user.get('name')").unwrap();
//! assert_eq!(expr.evaluate(&ctx).unwrap(), Value::from("ada"));
//! ```
//!
//! Asynchronous host functions are registered with [`Value::async_function`] and awaited
//! by expressions compiled with [`compile_async`].

mod error_renderer;

// Re-export public API from formulet_core
pub use formulet_core::api::{
    AsyncCompiledExpression, CompilationOptions, CompiledExpression, Diagnostic, Error,
    ExecutionOptions, RelatedInfo, Severity, compile, compile_async, compile_async_with_options,
    compile_with_options,
};

// Re-export commonly used types and values
pub use formulet_core::ast::{self, Literal, Node};
pub use formulet_core::context::{Context, ContextBuilder, Fallback};
pub use formulet_core::values::{self, AsyncFunction, Function, NativeFunction, Object, Value};

// Re-export evaluation entry points and errors
pub use formulet_core::analyzer::{read_identifiers, unique_identifiers};
pub use formulet_core::evaluator::{
    EvalError, EvaluatorOptions, evaluate, evaluate_async, evaluate_async_with_options,
    evaluate_with_options,
};
pub use formulet_core::parser::{self, ParseError, parse};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
