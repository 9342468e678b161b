use strata::{Container, Key, Map, Value};

use crate::helpers::*;

#[test]
fn test_string_and_integer_keys_are_the_same_entry() {
    let mut map = Map::new();
    map.insert("0", "from string");
    map.insert(0, "from int");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("0"), Some(&Value::from("from int")));
}

#[test]
fn test_non_canonical_numbers_stay_strings() {
    for text in ["007", "-0", "+1", "1.5", " 1", "99999999999999999999"] {
        assert_eq!(Key::from(text), Key::Str(text.to_string()), "{text} should stay a string");
    }
    assert_eq!(Key::from("-7"), Key::Int(-7));
}

#[test]
fn test_json_object_keys_normalise() {
    let c = container(r#"{"0": "a", "1": "b"}"#);
    assert!(c.is_list());
    assert_eq!(c.to_string(), r#"["a","b"]"#);
}

#[test]
fn test_keys_serialize_as_json_keys() {
    let c: Container = [(Key::Int(2), "two"), (Key::from("x"), "ex")].into_iter().collect();
    assert_eq!(c.to_string(), r#"{"2":"two","x":"ex"}"#);
    assert_eq!(keys_of(&c.all()), vec![Key::Int(2), Key::from("x")]);
}
