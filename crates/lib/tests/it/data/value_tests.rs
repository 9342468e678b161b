use strata::{Key, Map, Value};

use crate::helpers::*;

#[test]
fn test_json_roundtrip_preserves_order() {
    let text = r#"{"z":1,"a":[true,null,1.5],"m":{"k":"v"}}"#;
    assert_eq!(json(text).to_json_string(), text);
}

#[test]
fn test_type_names() {
    let record = Value::Record(Map::new());
    let cases = [
        (Value::Null, "null"),
        (Value::Bool(true), "bool"),
        (Value::Int(1), "int"),
        (Value::Float(1.0), "float"),
        (Value::from("s"), "text"),
        (json("[]"), "map"),
        (record, "record"),
        (Value::from(container("{}")), "container"),
    ];
    for (value, name) in cases {
        assert_eq!(value.type_name(), name);
    }
}

#[test]
fn test_option_conversion() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::from("x"));
}

#[test]
fn test_container_values_compare_by_contents() {
    let a = Value::from(container(r#"{"k": 1}"#));
    let b = Value::from(container(r#"{"k": 1}"#));
    let c = Value::from(container(r#"{"k": 2}"#));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, json(r#"{"k": 1}"#));
}

#[test]
fn test_key_from_value() {
    assert_eq!(Key::try_from(&Value::Int(4)).unwrap(), Key::Int(4));
    assert_eq!(Key::try_from(&Value::from("name")).unwrap(), Key::from("name"));
    assert!(Key::try_from(&json("[]")).is_err());
}

#[test]
fn test_malformed_json_is_a_serialization_error() {
    let err = Value::from_json("{\"a\":").unwrap_err();
    assert!(err.is_serialization_error());
}
