//! Callable host values.
//!
//! This module defines the `Function` trait which represents callable values in expressions.
//! The host supplies functions through the context; expressions can only call them.

use futures::future::{self, BoxFuture, FutureExt};

use super::Value;
use crate::evaluator::EvalError;

/// Trait for callable values.
///
/// Every function receives the call receiver as `this`. For `obj.method(x)` the receiver
/// is `obj`; for a plain `f(x)` it is [`Value::Undefined`].
pub trait Function: Send + Sync {
    /// Call the function synchronously.
    ///
    /// Functions that can only complete asynchronously return
    /// [`EvalError::AsyncFunctionInSyncContext`].
    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, EvalError>;

    /// Call the function, returning a future of its result.
    ///
    /// The default runs [`Function::call`] immediately and wraps the result in a
    /// ready future.
    fn call_async(&self, this: Value, args: Vec<Value>) -> BoxFuture<'static, Result<Value, EvalError>> {
        future::ready(self.call(&this, &args)).boxed()
    }

    /// Whether the function needs the asynchronous evaluator.
    fn is_async(&self) -> bool {
        false
    }
}

/// Type alias for synchronous host closures.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, EvalError> + Send + Sync;

/// Wrapper for synchronous Rust closures.
///
/// # Example
///
/// ```
/// use formulet_core::values::{Function, NativeFunction, Value};
///
/// let add_one = NativeFunction::new(|_this, args| {
///     let x = args.first().and_then(Value::as_number).unwrap_or(f64::NAN);
///     Ok(Value::from(x + 1.0))
/// });
/// assert_eq!(add_one.call(&Value::Undefined, &[Value::from(1)]).unwrap(), Value::from(2));
/// ```
pub struct NativeFunction {
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

impl Function for NativeFunction {
    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(this, args)
    }
}

/// Type alias for asynchronous host closures.
pub type AsyncNativeFn =
    dyn Fn(Value, Vec<Value>) -> BoxFuture<'static, Result<Value, EvalError>> + Send + Sync;

/// Wrapper for Rust closures returning a future.
///
/// Such functions can only be called by the asynchronous evaluator.
pub struct AsyncFunction {
    func: Box<AsyncNativeFn>,
}

impl AsyncFunction {
    pub fn new<F, Fut>(func: F) -> Self
    where
        F: Fn(Value, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, EvalError>> + Send + 'static,
    {
        Self {
            func: Box::new(move |this, args| func(this, args).boxed()),
        }
    }
}

impl Function for AsyncFunction {
    fn call(&self, _this: &Value, _args: &[Value]) -> Result<Value, EvalError> {
        Err(EvalError::AsyncFunctionInSyncContext)
    }

    fn call_async(&self, this: Value, args: Vec<Value>) -> BoxFuture<'static, Result<Value, EvalError>> {
        (self.func)(this, args)
    }

    fn is_async(&self) -> bool {
        true
    }
}
