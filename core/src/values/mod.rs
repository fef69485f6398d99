//! Runtime values and the native operator semantics they follow.

pub mod coercion;
pub mod function;
mod object;
pub mod property;
mod value;

pub use function::{AsyncFunction, AsyncNativeFn, Function, NativeFn, NativeFunction};
pub use object::Object;
pub use value::Value;

#[cfg(test)]
mod value_test;
