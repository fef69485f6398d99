//! Evaluation contexts.
//!
//! A context is the set of names an expression can see. Own properties are always consulted
//! first; a context may additionally carry a resolver that is asked for every name that is not
//! an own property. Whether a resolver exists is fixed when the context is built.

use std::sync::Arc;

use crate::evaluator::EvalError;
use crate::values::{AsyncFunction, Function, NativeFunction, Object, Value};

/// Name of the own property [`Context::from_object`] installs as the resolver.
pub const RESOLVER_PROPERTY: &str = "getValue";

/// How names missing from the scope are resolved.
#[derive(Clone, Default)]
pub enum Fallback {
    /// Missing names evaluate to `undefined`.
    #[default]
    None,
    /// Missing names are passed to this function. The call receiver is the scope object
    /// and the only argument is the name.
    Resolver(Arc<dyn Function>),
}

/// Caller-supplied evaluation context.
///
/// # Example
///
/// ```
/// use formulet_core::{Context, Value};
///
/// let ctx = Context::builder()
///     .register("one", Value::from(1))
///     .resolver(|name| Ok(Value::from(name.len())))
///     .build();
///
/// assert_eq!(ctx.get_own("one"), Some(&Value::from(1)));
/// assert!(ctx.has_resolver());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    scope: Object,
    fallback: Fallback,
}

impl Context {
    /// Plain mapping: no resolver.
    pub fn new(scope: impl Into<Object>) -> Self {
        Self {
            scope: scope.into(),
            fallback: Fallback::None,
        }
    }

    /// A context with no names at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mapping with a synchronous resolver for names that are not own properties.
    pub fn with_resolver<F>(scope: impl Into<Object>, resolver: F) -> Self
    where
        F: Fn(&str) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Self {
            scope: scope.into(),
            fallback: Fallback::Resolver(Arc::new(resolver_function(resolver))),
        }
    }

    /// Mapping with an asynchronous resolver. Only the asynchronous evaluator can consult
    /// it; synchronous evaluation of an unresolved name fails with
    /// [`EvalError::AsyncFunctionInSyncContext`].
    pub fn with_async_resolver<F, Fut>(scope: impl Into<Object>, resolver: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, EvalError>> + Send + 'static,
    {
        let resolver = Arc::new(resolver);
        let function = AsyncFunction::new(move |_this, args| {
            let resolver = Arc::clone(&resolver);
            let name = name_argument(&args);
            async move { resolver(name).await }
        });
        Self {
            scope: scope.into(),
            fallback: Fallback::Resolver(Arc::new(function)),
        }
    }

    /// Build a context from an object, installing its own `getValue` function property (if
    /// any) as the resolver. The object is inspected once, here.
    pub fn from_object(scope: impl Into<Object>) -> Self {
        let scope = scope.into();
        let fallback = match scope.get(RESOLVER_PROPERTY) {
            Some(Value::Function(f)) => Fallback::Resolver(Arc::clone(f)),
            _ => Fallback::None,
        };
        Self { scope, fallback }
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// Own-property lookup.
    pub fn get_own(&self, name: &str) -> Option<&Value> {
        self.scope.get(name)
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    pub fn has_resolver(&self) -> bool {
        matches!(self.fallback, Fallback::Resolver(_))
    }

    pub fn scope(&self) -> &Object {
        &self.scope
    }

    /// The value `this` evaluates to: the scope object.
    pub fn this_value(&self) -> Value {
        Value::Object(self.scope.clone())
    }
}

fn name_argument(args: &[Value]) -> String {
    args.first().map(|name| name.to_string()).unwrap_or_default()
}

fn resolver_function<F>(resolver: F) -> NativeFunction
where
    F: Fn(&str) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    NativeFunction::new(move |_this, args| resolver(&name_argument(args)))
}

/// Builder for constructing contexts.
pub struct ContextBuilder {
    scope: Object,
    fallback: Fallback,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            scope: Object::new(),
            fallback: Fallback::None,
        }
    }

    /// Register an own property. Registering a name twice keeps the last value.
    pub fn register(mut self, name: impl Into<String>, value: Value) -> Self {
        self.scope.insert(name, value);
        self
    }

    /// Register a synchronous host function.
    pub fn function<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.register(name, Value::function(f))
    }

    /// Register an asynchronous host function.
    pub fn async_function<F, Fut>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, EvalError>> + Send + 'static,
    {
        self.register(name, Value::async_function(f))
    }

    pub fn resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.fallback = Fallback::Resolver(Arc::new(resolver_function(resolver)));
        self
    }

    pub fn build(self) -> Context {
        Context {
            scope: self.scope,
            fallback: self.fallback,
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Object> for Context {
    fn from(scope: Object) -> Self {
        Context::new(scope)
    }
}
