use strata::{Container, ContainerConfig, Key};

use crate::helpers::*;

#[test]
fn test_hidden_keys_are_excluded_in_order() {
    let mut c = container(r#"{"a": 1, "secret": 2, "b": 3}"#);
    c.set_hidden(["secret"]);
    assert_eq!(c.visible_keys(), keys(&["a", "b"]));
    assert_eq!(c.to_string(), r#"{"a":1,"b":3}"#);
    assert_eq!(c.get_hidden().len(), 1);
}

#[test]
fn test_visible_list_is_exclusive() {
    let config = ContainerConfig::default()
        .with_hidden(["a"])
        .with_visible(["a"]);
    let c = Container::with_config(json_map(r#"{"a": 1, "b": 2}"#), &config);
    assert_eq!(c.to_string(), r#"{"a":1}"#);
}

#[test]
fn test_projection_follows_store_order() {
    let config = ContainerConfig::default().with_visible(["c", "a"]);
    let c = Container::with_config(json_map(r#"{"a": 1, "b": 2, "c": 3}"#), &config);
    assert_eq!(keys_of(&c.get_visible()), keys(&["a", "c"]));
}

#[test]
fn test_visible_keys_returned_verbatim() {
    let config = ContainerConfig::default().with_visible(["ghost"]);
    let c = Container::with_config(json_map(r#"{"a": 1}"#), &config);
    assert_eq!(c.visible_keys(), keys(&["ghost"]));
    assert!(c.get_visible().is_empty());
}

#[test]
fn test_set_visible_narrows_and_unset_visible_widens() {
    let config = ContainerConfig::default().with_visible(["a", "b"]);
    let mut c = Container::with_config(json_map(r#"{"a": 1, "b": 2, "c": 3}"#), &config);

    c.set_visible(["b"]);
    assert_eq!(c.visible_keys(), keys(&["a"]));

    c.unset_visible(["c", "a"]);
    assert_eq!(c.visible_keys(), keys(&["a", "c"]));

    // Emptying the list falls back to everything not hidden
    c.set_visible(["a", "c"]);
    assert_eq!(c.visible_keys(), keys(&["a", "b", "c"]));
}

#[test]
fn test_unset_hidden() {
    let mut c = container(r#"{"a": 1, "b": 2}"#);
    c.set_hidden(["a", "b"]).unset_hidden(["b"]);
    assert_eq!(c.hidden_keys(), &[Key::from("a")]);
    assert_eq!(c.to_string(), r#"{"b":2}"#);
}

#[test]
fn test_hiding_nothing_changes_no_data() {
    let mut c = container(r#"{"a": 1}"#);
    c.set_hidden(["a"]);
    assert!(c.has("a"));
    assert_eq!(c.count(), 1);
}
