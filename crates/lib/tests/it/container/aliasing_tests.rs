use strata::{Container, ContainerConfig, Key, SharedMap, Value};

use crate::helpers::*;

#[test]
fn test_aliases_observe_each_others_push() {
    let store = SharedMap::new(json_map("[1]"));
    let left = Container::shared(&store, &ContainerConfig::default());
    let right = Container::shared(&store, &ContainerConfig::default());

    left.push(2).unwrap();
    assert_eq!(right.count(), 2);
    right.push(3).unwrap();
    assert_eq!(left.to_string(), "[1,2,3]");
    assert_eq!(store.len(), 3);
}

#[test]
fn test_aliases_keep_their_own_policy_and_cursor() {
    let store = SharedMap::new(json_map(r#"{"a": 1, "b": 2}"#));
    let writer = Container::shared(&store, &ContainerConfig::default());
    let reader = Container::shared(&store, &ContainerConfig::locked());

    assert!(reader.set("a", 5).is_err());
    writer.set("a", 5).unwrap();
    assert_eq!(reader.get("a"), Some(Value::Int(5)));

    writer.next();
    assert_eq!(writer.key(), Some(Key::from("b")));
    assert_eq!(reader.key(), Some(Key::from("a")));
}

#[test]
fn test_snapshot_survives_writes_through_aliases() {
    let store = SharedMap::new(json_map(r#"{"a": 1}"#));
    let writer = Container::shared(&store, &ContainerConfig::default());

    let before = store.snapshot();
    writer.set("b", 2).unwrap();
    writer.remove("a").unwrap();

    assert_eq!(keys_of(&before), keys(&["a"]));
    assert_eq!(keys_of(&store.snapshot()), keys(&["b"]));
}

#[test]
fn test_container_cannot_hold_itself() {
    let c = container(r#"{"a": 1}"#);

    assert!(c.set("self", c.clone()).unwrap_err().is_self_reference());
    assert!(c.push(c.clone()).unwrap_err().is_self_reference());
    assert!(c.set("", c.clone()).unwrap_err().is_self_reference());

    let wrapped = Value::Map([("inner", Value::from(c.clone()))].into_iter().collect());
    assert!(c.set("wrapped", wrapped).unwrap_err().is_self_reference());

    let alias = Container::shared(&c.store(), &ContainerConfig::default());
    assert!(c.set("alias", alias).unwrap_err().is_self_reference());

    assert_eq!(c.all(), json_map(r#"{"a": 1}"#));
    assert_eq!(c.to_string(), r#"{"a":1}"#);
}

#[test]
fn test_indirect_cycle_is_refused() {
    let outer = container("{}");
    let inner = container("{}");
    outer.set("inner", inner.clone()).unwrap();

    assert!(inner.set("outer", outer.clone()).unwrap_err().is_self_reference());
    assert!(inner.is_empty());

    let held = outer.get("inner").unwrap();
    assert!(held.as_container().unwrap().aliases(&inner));
    assert_eq!(outer.to_string(), r#"{"inner":[]}"#);
}

#[test]
fn test_deep_copy_reaches_containers_inside_raw_maps() {
    let leaf = container(r#"{"x": 1}"#);
    let c = container("{}");
    c.set("group", Value::Map([("leaf", Value::from(leaf.clone()))].into_iter().collect()))
        .unwrap();

    let copy = c.deep_copy();
    let copied = strata::path::get(&Value::from(copy), "group.leaf", ());
    copied.as_container().unwrap().set("x", 2).unwrap();
    assert_eq!(leaf.get("x"), Some(Value::Int(1)));
}

#[test]
fn test_clone_aliases_store() {
    let c = container(r#"{"a": 1}"#);
    let alias = c.clone();
    alias.set("b", 2).unwrap();
    assert!(c.has("b"));
    assert!(alias.aliases(&c));
}

#[test]
fn test_deep_copy_detaches() {
    let c = container(r#"{"a": 1}"#);
    let copy = c.deep_copy();
    copy.set("b", 2).unwrap();
    assert!(!c.has("b"));
    assert_eq!(copy.policy(), c.policy());
}

#[test]
fn test_store_handle_round_trip() {
    let c = container("[]");
    let other = Container::shared(&c.store(), &ContainerConfig::default());
    other.push("x").unwrap();
    assert_eq!(c.first().unwrap(), Value::from("x"));
    assert!(store_is_shared(&c, &other));
}

fn store_is_shared(a: &Container, b: &Container) -> bool {
    a.store().ptr_eq(&b.store())
}
