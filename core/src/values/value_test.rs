use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::values::{Object, Value};

#[test]
fn test_array_value() {
    let array_value = Value::array([Value::from(1), Value::from(2), Value::from(3)]);

    let array = array_value.as_array().unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array[0].as_number().unwrap(), 1.0);
    assert_eq!(array_value.type_name(), "object");
}

#[test]
fn test_object_value() {
    let value = Value::object([("bar", Value::from("baz")), ("n", Value::from(1))]);

    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object.get("bar"), Some(&Value::from("baz")));
    assert_eq!(object.get("missing"), None);
    assert_eq!(object.sorted_keys(), vec!["bar", "n"]);
}

#[test]
fn test_object_insert_copies_shared_storage() {
    let mut a: Object = [("x", Value::from(1))].into_iter().collect();
    let b = a.clone();
    assert!(a.ptr_eq(&b));

    a.insert("y", Value::from(2));
    assert!(!a.ptr_eq(&b));
    assert_eq!(b.len(), 1);
    assert_eq!(a.len(), 2);
}

#[test]
fn test_structural_equality() {
    assert_eq!(Value::from(1), Value::from(1.0));
    assert_ne!(Value::from(1), Value::from("1"));
    assert_ne!(Value::Null, Value::Undefined);
    assert_eq!(
        Value::array([Value::from("a")]),
        Value::array([Value::from("a")])
    );
    assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
}

#[test]
fn test_functions_compare_by_identity() {
    let f = Value::function(|_, _| Ok(Value::Undefined));
    let g = Value::function(|_, _| Ok(Value::Undefined));
    assert_eq!(f, f.clone());
    assert_ne!(f, g);
    assert_eq!(f.type_name(), "function");
}

#[test]
fn test_display() {
    assert_eq!(Value::from(3).to_string(), "3");
    assert_eq!(Value::from(0.5).to_string(), "0.5");
    assert_eq!(Value::Undefined.to_string(), "undefined");
    assert_eq!(
        Value::array([Value::from(1), Value::from("two")]).to_string(),
        "1,two"
    );
    assert_eq!(Value::object([("a", Value::Null)]).to_string(), "[object Object]");
}

#[test]
fn test_debug() {
    let value = Value::object([
        ("list", Value::array([Value::from(1), Value::Null])),
        ("name", Value::from("x")),
    ]);
    assert_eq!(format!("{:?}", value), r#"{"list": [1, null], "name": "x"}"#);
}

#[test]
fn test_conversions() {
    assert_eq!(Value::from(String::from("s")), Value::String(Arc::from("s")));
    assert_eq!(Value::from(vec![Value::Null]), Value::array([Value::Null]));
    assert_eq!(Value::from(7usize).as_number(), Some(7.0));
    assert_eq!(Value::from(false).as_bool(), Some(false));
    assert!(Value::default().is_undefined());
}
