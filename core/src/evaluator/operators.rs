//! Binary and unary operator tables.
//!
//! Both evaluators share these tables. Operators never fail on any pair of values; the only
//! error here is a symbol missing from the table.

use hashbrown::HashMap;
use lazy_static::lazy_static;

use crate::evaluator::EvalError;
use crate::values::{
    Value,
    coercion::{
        add, less_than, loose_equals, strict_equals, to_boolean, to_int32, to_number, to_uint32,
    },
};

pub type BinaryFn = fn(&Value, &Value) -> Value;
pub type UnaryFn = fn(&Value) -> Value;

fn numeric(a: &Value, b: &Value, op: fn(f64, f64) -> f64) -> Value {
    Value::Number(op(to_number(a), to_number(b)))
}

fn int32(a: &Value, b: &Value, op: fn(i32, i32) -> i32) -> Value {
    Value::Number(op(to_int32(a), to_int32(b)) as f64)
}

lazy_static! {
    static ref BINARY_OPERATORS: HashMap<&'static str, BinaryFn> = {
        let mut table: HashMap<&'static str, BinaryFn> = HashMap::new();
        // Both operands are already evaluated when these run.
        table.insert("||", |a, b| if to_boolean(a) { a.clone() } else { b.clone() });
        table.insert("&&", |a, b| if to_boolean(a) { b.clone() } else { a.clone() });
        table.insert("|", |a, b| int32(a, b, |x, y| x | y));
        table.insert("^", |a, b| int32(a, b, |x, y| x ^ y));
        table.insert("&", |a, b| int32(a, b, |x, y| x & y));
        table.insert("==", |a, b| Value::Bool(loose_equals(a, b)));
        table.insert("!=", |a, b| Value::Bool(!loose_equals(a, b)));
        table.insert("===", |a, b| Value::Bool(strict_equals(a, b)));
        table.insert("!==", |a, b| Value::Bool(!strict_equals(a, b)));
        table.insert("<", |a, b| Value::Bool(less_than(a, b) == Some(true)));
        table.insert(">", |a, b| Value::Bool(less_than(b, a) == Some(true)));
        table.insert("<=", |a, b| Value::Bool(less_than(b, a) == Some(false)));
        table.insert(">=", |a, b| Value::Bool(less_than(a, b) == Some(false)));
        table.insert("<<", |a, b| {
            Value::Number(to_int32(a).wrapping_shl(to_uint32(b) & 31) as f64)
        });
        table.insert(">>", |a, b| {
            Value::Number(to_int32(a).wrapping_shr(to_uint32(b) & 31) as f64)
        });
        table.insert(">>>", |a, b| {
            Value::Number(to_uint32(a).wrapping_shr(to_uint32(b) & 31) as f64)
        });
        table.insert("+", add);
        table.insert("-", |a, b| numeric(a, b, |x, y| x - y));
        table.insert("*", |a, b| numeric(a, b, |x, y| x * y));
        table.insert("/", |a, b| numeric(a, b, |x, y| x / y));
        table.insert("%", |a, b| numeric(a, b, |x, y| x % y));
        table
    };

    static ref UNARY_OPERATORS: HashMap<&'static str, UnaryFn> = {
        let mut table: HashMap<&'static str, UnaryFn> = HashMap::new();
        table.insert("-", |a| Value::Number(-to_number(a)));
        table.insert("+", |a| Value::Number(to_number(a)));
        table.insert("~", |a| Value::Number(!to_int32(a) as f64));
        table.insert("!", |a| Value::Bool(!to_boolean(a)));
        table
    };
}

/// Look up a binary operator by symbol.
pub fn binary_operator(operator: &str) -> Result<BinaryFn, EvalError> {
    BINARY_OPERATORS
        .get(operator)
        .copied()
        .ok_or_else(|| EvalError::UnknownOperator {
            operator: operator.to_string(),
        })
}

/// Look up a unary operator by symbol.
pub fn unary_operator(operator: &str) -> Result<UnaryFn, EvalError> {
    UNARY_OPERATORS
        .get(operator)
        .copied()
        .ok_or_else(|| EvalError::UnknownOperator {
            operator: operator.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn binary(op: &str, a: impl Into<Value>, b: impl Into<Value>) -> Value {
        binary_operator(op).unwrap()(&a.into(), &b.into())
    }

    fn unary(op: &str, a: impl Into<Value>) -> Value {
        unary_operator(op).unwrap()(&a.into())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(binary("+", 1, 2), Value::from(3));
        assert_eq!(binary("-", 2, 1), Value::from(1));
        assert_eq!(binary("*", 2, 2), Value::from(4));
        assert_eq!(binary("/", 6, 3), Value::from(2));
        assert_eq!(binary("%", 10, 6), Value::from(4));
        assert_eq!(binary("%", -7, 3), Value::from(-1));
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let result = binary("/", 10, 0).as_number().unwrap();
        assert!(result.is_infinite() && result.is_sign_positive());
        assert!(binary("/", 0, 0).as_number().unwrap().is_nan());
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(binary("|", 5, 3), Value::from(7));
        assert_eq!(binary("&", 5, 3), Value::from(1));
        assert_eq!(binary("^", 5, 3), Value::from(6));
        assert_eq!(binary("<<", 4, 2), Value::from(16));
        assert_eq!(binary(">>", 256, 4), Value::from(16));
        assert_eq!(binary(">>", -16, 2), Value::from(-4));
        assert_eq!(binary(">>>", -14, 2), Value::from(1073741820));
        assert_eq!(binary("<<", 1, 33), Value::from(2));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(binary("<", 1, 2), Value::from(true));
        assert_eq!(binary(">", 1, 2), Value::from(false));
        assert_eq!(binary("<=", 2, 2), Value::from(true));
        assert_eq!(binary(">=", 1, 2), Value::from(false));
        assert_eq!(binary("<=", Value::Undefined, 2), Value::from(false));
        assert_eq!(binary(">=", Value::Undefined, 2), Value::from(false));
    }

    #[test]
    fn test_equality() {
        assert_eq!(binary("==", 1, "1"), Value::from(true));
        assert_eq!(binary("!=", 2, "2"), Value::from(false));
        assert_eq!(binary("===", 1.234, 1.234), Value::from(true));
        assert_eq!(binary("!==", 123, "123"), Value::from(true));
    }

    #[test]
    fn test_logical_operators_in_table_return_operands() {
        assert_eq!(binary("||", 0, "x"), Value::from("x"));
        assert_eq!(binary("&&", 0, "x"), Value::from(0));
    }

    #[test]
    fn test_unary() {
        assert_eq!(unary("-", 1), Value::from(-1));
        assert_eq!(unary("+", "2"), Value::from(2));
        assert_eq!(unary("~", 15), Value::from(-16));
        assert_eq!(unary("!", false), Value::from(true));
        assert_eq!(unary("!", "x"), Value::from(false));
    }

    #[test]
    fn test_unknown_operator() {
        assert!(matches!(
            binary_operator("**"),
            Err(EvalError::UnknownOperator { ref operator }) if operator == "**"
        ));
        assert!(unary_operator("typeof").is_err());
    }
}
