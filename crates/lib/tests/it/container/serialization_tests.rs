use strata::{Container, ContainerConfig, Value};

use crate::helpers::*;

#[test]
fn test_list_projection_serializes_as_array() {
    assert_eq!(container("[10, 20, 30]").to_string(), "[10,20,30]");
    assert_eq!(Container::default().to_string(), "[]");
}

#[test]
fn test_hiding_trailing_index_keeps_array() {
    let mut c = container(r#"["a", "b", "c"]"#);
    c.set_hidden([2]);
    assert_eq!(c.to_string(), r#"["a","b"]"#);
}

#[test]
fn test_hiding_middle_index_becomes_object() {
    let mut c = container(r#"["a", "b", "c"]"#);
    c.set_hidden([1]);
    assert_eq!(c.to_string(), r#"{"0":"a","2":"c"}"#);
}

#[test]
fn test_out_of_order_integer_keys_become_object() {
    assert_eq!(container(r#"{"1": 10, "0": 20}"#).to_string(), r#"{"1":10,"0":20}"#);
}

#[test]
fn test_nested_containers_serialize_their_own_projection() {
    let mut inner = container(r#"{"name": "x", "token": "t"}"#);
    inner.set_hidden(["token"]);
    let outer: Container = [("user", Value::from(inner.clone()))].into_iter().collect();

    // Owning construction copies the nested container without its visibility lists
    assert_eq!(outer.to_string(), r#"{"user":{"name":"x","token":"t"}}"#);

    let shared = Container::shared(&outer.store(), &ContainerConfig::default());
    shared.set("user", inner).unwrap();
    assert_eq!(outer.to_string(), r#"{"user":{"name":"x"}}"#);
}

#[test]
fn test_strings_are_escaped() {
    let c: Container = [("quote", "say \"hi\"\n")].into_iter().collect();
    assert_eq!(c.to_string(), r#"{"quote":"say \"hi\"\n"}"#);
}

#[test]
fn test_serde_roundtrip() {
    let c = container(r#"{"a": [1, 2], "b": {"c": null}}"#);
    let text = serde_json::to_string(&c).unwrap();
    let back: Container = serde_json::from_str(&text).unwrap();
    assert_eq!(back, c);
    assert_eq!(c.to_json_string(), text);
}
