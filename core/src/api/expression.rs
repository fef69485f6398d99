//! Compiled expressions.

use std::sync::Arc;

use super::{Error, ExecutionOptions};
use crate::analyzer::read_identifiers;
use crate::ast::Node;
use crate::context::Context;
use crate::evaluator::{EvalError, evaluate_async_with_options, evaluate_with_options};
use crate::values::Value;

/// Shared state of both compiled expression flavours.
#[derive(Debug, Clone)]
struct Compiled {
    ast: Arc<Node>,
    source: Option<Arc<str>>,
    options: ExecutionOptions,
}

impl Compiled {
    fn new(ast: Node, source: Option<&str>) -> Self {
        Self {
            ast: Arc::new(ast),
            source: source.map(Arc::from),
            options: ExecutionOptions::default(),
        }
    }

    fn from_json(json: &str) -> Result<Self, Error> {
        let ast: Node = serde_json::from_str(json)
            .map_err(|err| Error::Api(format!("invalid expression tree: {err}")))?;
        Ok(Self::new(ast, None))
    }
}

/// A parsed expression bound to the synchronous evaluator.
///
/// Cheap to clone and reusable: every call to [`evaluate`](Self::evaluate) walks the same
/// tree against a fresh context.
///
/// # Example
///
/// ```
/// use formulet_core::{Context, Value, api::compile};
///
/// let expr = compile("price * (1 + rate)").unwrap();
/// let ctx = Context::builder()
///     .register("price", Value::from(200))
///     .register("rate", Value::from(0.25))
///     .build();
///
/// assert_eq!(expr.evaluate(&ctx).unwrap(), Value::from(250));
/// assert_eq!(expr.identifiers().unwrap(), ["price", "rate"]);
/// ```
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    inner: Compiled,
}

impl CompiledExpression {
    pub(crate) fn new(ast: Node, source: &str) -> Self {
        Self {
            inner: Compiled::new(ast, Some(source)),
        }
    }

    /// Bind a tree produced elsewhere (e.g. by another jsep-compatible parser).
    pub fn from_ast(ast: Node) -> Self {
        Self {
            inner: Compiled::new(ast, None),
        }
    }

    /// Bind a tree given in its ESTree JSON form.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(Self {
            inner: Compiled::from_json(json)?,
        })
    }

    /// Replace the execution limits used by subsequent evaluations.
    pub fn with_options(mut self, options: ExecutionOptions) -> Self {
        self.inner.options = options;
        self
    }

    /// Evaluate against `context`.
    pub fn evaluate(&self, context: &Context) -> Result<Value, EvalError> {
        evaluate_with_options(&self.inner.ast, context, self.inner.options.into())
    }

    /// Names the expression may read from a context, in visiting order.
    pub fn identifiers(&self) -> Result<Vec<String>, EvalError> {
        read_identifiers(&self.inner.ast, None)
    }

    /// Like [`identifiers`](Self::identifiers), resolving `getValue(..)` arguments against
    /// `context`.
    pub fn identifiers_in(&self, context: &Context) -> Result<Vec<String>, EvalError> {
        read_identifiers(&self.inner.ast, Some(context))
    }

    pub fn ast(&self) -> &Node {
        &self.inner.ast
    }

    /// Source text, when compiled from source.
    pub fn source(&self) -> Option<&str> {
        self.inner.source.as_deref()
    }

    pub fn options(&self) -> ExecutionOptions {
        self.inner.options
    }

    /// Rebind the same tree to the asynchronous evaluator.
    pub fn into_async(self) -> AsyncCompiledExpression {
        AsyncCompiledExpression { inner: self.inner }
    }
}

/// A parsed expression bound to the asynchronous evaluator.
///
/// Host functions registered with [`Value::async_function`] are awaited; independent
/// sub-expressions run concurrently.
#[derive(Debug, Clone)]
pub struct AsyncCompiledExpression {
    inner: Compiled,
}

impl AsyncCompiledExpression {
    pub(crate) fn new(ast: Node, source: &str) -> Self {
        Self {
            inner: Compiled::new(ast, Some(source)),
        }
    }

    pub fn from_ast(ast: Node) -> Self {
        Self {
            inner: Compiled::new(ast, None),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(Self {
            inner: Compiled::from_json(json)?,
        })
    }

    pub fn with_options(mut self, options: ExecutionOptions) -> Self {
        self.inner.options = options;
        self
    }

    /// Evaluate against `context`, awaiting host futures.
    pub async fn evaluate(&self, context: &Context) -> Result<Value, EvalError> {
        evaluate_async_with_options(&self.inner.ast, context, self.inner.options.into()).await
    }

    pub fn identifiers(&self) -> Result<Vec<String>, EvalError> {
        read_identifiers(&self.inner.ast, None)
    }

    pub fn identifiers_in(&self, context: &Context) -> Result<Vec<String>, EvalError> {
        read_identifiers(&self.inner.ast, Some(context))
    }

    pub fn ast(&self) -> &Node {
        &self.inner.ast
    }

    pub fn source(&self) -> Option<&str> {
        self.inner.source.as_deref()
    }

    pub fn options(&self) -> ExecutionOptions {
        self.inner.options
    }
}
