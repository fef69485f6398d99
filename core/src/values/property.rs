//! Property reads on values.

use super::{Value, coercion::to_js_string};
use crate::evaluator::EvalError;

/// Read `receiver[key]`.
pub fn get_property(receiver: &Value, key: &Value) -> Result<Value, EvalError> {
    if let (Value::Array(items), Some(index)) = (receiver, array_index(key)) {
        return Ok(items.get(index).cloned().unwrap_or_default());
    }
    get_named_property(receiver, &property_key(key))
}

/// Read `receiver.name`.
pub fn get_named_property(receiver: &Value, name: &str) -> Result<Value, EvalError> {
    match receiver {
        Value::Undefined | Value::Null => Err(EvalError::NullishProperty {
            property: name.to_string(),
            base: to_js_string(receiver),
        }),
        Value::Object(object) => Ok(object.get(name).cloned().unwrap_or_default()),
        Value::Array(items) => {
            if name == "length" {
                Ok(Value::from(items.len()))
            } else if let Some(index) = canonical_index(name) {
                Ok(items.get(index).cloned().unwrap_or_default())
            } else {
                Ok(Value::Undefined)
            }
        }
        Value::String(s) => {
            if name == "length" {
                Ok(Value::from(s.encode_utf16().count()))
            } else if let Some(index) = canonical_index(name) {
                Ok(s.encode_utf16()
                    .nth(index)
                    .map(|unit| Value::from(String::from_utf16_lossy(&[unit])))
                    .unwrap_or_default())
            } else {
                Ok(Value::Undefined)
            }
        }
        Value::Bool(_) | Value::Number(_) | Value::Function(_) => Ok(Value::Undefined),
    }
}

/// The string a value becomes when used as a property key.
pub fn property_key(key: &Value) -> String {
    to_js_string(key)
}

fn array_index(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n < u32::MAX as f64 => {
            Some(*n as usize)
        }
        Value::String(s) => canonical_index(s),
        _ => None,
    }
}

/// `"3"` is an index, `"03"` and `"3.0"` are not.
fn canonical_index(name: &str) -> Option<usize> {
    let index: u32 = name.parse().ok()?;
    if index == u32::MAX || index.to_string() != name {
        return None;
    }
    Some(index as usize)
}
