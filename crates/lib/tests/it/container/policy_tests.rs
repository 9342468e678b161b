use strata::{Container, ContainerConfig, DataError, PolicyKind, Value, data::Mutation};

use crate::helpers::*;

#[test]
fn test_locked_rejects_every_mutation_and_keeps_store() {
    let c = Container::locked(json_map(r#"{"a": 1}"#));
    let before = c.all();

    for _ in 0..2 {
        assert!(c.set("a", 2).unwrap_err().is_mutation_rejected());
        assert!(c.set("new", 2).unwrap_err().is_mutation_rejected());
        assert!(c.set("", 2).unwrap_err().is_mutation_rejected());
        assert!(c.push(2).unwrap_err().is_mutation_rejected());
        assert!(c.remove("a").unwrap_err().is_mutation_rejected());
        assert!(c.remove("missing").unwrap_err().is_mutation_rejected());
    }

    assert_eq!(c.all(), before);
}

#[test]
fn test_rejection_carries_key_and_value() {
    let c = Container::locked(json_map("{}"));
    let err = c.set("name", "Bob").unwrap_err();
    let data_err = err.as_data().unwrap();

    assert_eq!(data_err.mutation(), Some(Mutation::Set));
    assert_eq!(data_err.key(), Some("name"));
    match data_err {
        DataError::MutationRejected { policy, value, .. } => {
            assert_eq!(*policy, PolicyKind::Locked);
            assert_eq!(value.as_deref(), Some(r#""Bob""#));
        }
        other => panic!("Expected MutationRejected, got: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        r#"attempted to set [name] => ["Bob"] under the locked policy"#
    );
}

#[test]
fn test_allowlisted_set_and_remove() {
    let c = Container::allowlisted(json_map(r#"{"x": 0, "y": 0}"#), ["x"]);
    c.set("x", 1).unwrap();
    assert!(c.set("y", 1).unwrap_err().is_mutation_rejected());
    assert!(c.remove("y").unwrap_err().is_mutation_rejected());
    assert_eq!(c.remove("x").unwrap(), Some(Value::Int(1)));
    assert_eq!(c.get("y"), Some(Value::Int(0)));
}

#[test]
fn test_allowlisted_push_gate() {
    let mut c = Container::allowlisted(json_map("[]"), Vec::<&str>::new());
    assert!(!c.is_pushable());
    assert!(c.push("a").unwrap_err().is_mutation_rejected());

    c.set_pushable(true).unwrap();
    c.push("a").unwrap();
    c.set("", "b").unwrap();
    assert_eq!(c.to_string(), r#"["a","b"]"#);
}

#[test]
fn test_allow_and_deny() {
    let mut c = Container::allowlisted(json_map("{}"), ["a"]);
    c.allow(["b", "c"]).unwrap().deny(["a"]).unwrap();
    assert_eq!(c.fillable(), &keys(&["b", "c"])[..]);

    assert!(c.set("a", 1).is_err());
    c.set("b", 1).unwrap();
}

#[test]
fn test_allowlist_operations_need_allowlisted_policy() {
    let mut open = Container::default();
    assert!(open.allow(["a"]).unwrap_err().is_policy_mismatch());
    assert!(open.set_pushable(true).unwrap_err().is_policy_mismatch());

    let mut locked = Container::locked(json_map("{}"));
    assert!(locked.deny(["a"]).unwrap_err().is_policy_mismatch());
    assert!(locked.fillable().is_empty());
    assert!(!locked.is_pushable());
}

#[test]
fn test_config_builds_allowlisted_container() {
    let config = ContainerConfig::from_json(
        r#"{"policy": "allowlisted", "fillable": ["name"], "pushable": true}"#,
    )
    .unwrap();
    let c = Container::with_config(json_map("{}"), &config);

    assert_eq!(c.policy().kind(), PolicyKind::Allowlisted);
    c.set("name", "ok").unwrap();
    c.push(1).unwrap();
    assert!(c.set("other", 1).is_err());
}

#[test]
fn test_nested_containers_take_parent_policy_variant() {
    let inner = container(r#"{"k": 1}"#);
    let map = [("inner", Value::from(inner.clone()))].into_iter().collect::<strata::Map>();
    let outer = Container::locked(map);

    let copied = outer.get("inner").unwrap();
    let copied = copied.as_container().unwrap();
    assert_eq!(copied.policy().kind(), PolicyKind::Locked);
    assert!(copied.set("k", 2).is_err());
    assert!(!copied.aliases(&inner));

    // The original stays open
    inner.set("k", 3).unwrap();
    assert_eq!(copied.get("k"), Some(Value::Int(1)));
}

#[test]
fn test_nested_copies_open_without_preserve_policy() {
    let inner = container(r#"{"k": 1}"#);
    let map = [("inner", Value::from(inner))].into_iter().collect::<strata::Map>();
    let config = ContainerConfig::locked().with_preserve_policy(false);
    let outer = Container::with_config(map, &config);

    let copied = outer.get("inner").unwrap();
    copied.as_container().unwrap().set("k", 2).unwrap();
    assert!(outer.set("inner", 0).is_err());
}

#[test]
fn test_wrap_nested_maps() {
    let config = ContainerConfig::allowlisted(["a"]).with_wrap_nested(true);
    let c = Container::with_config(json_map(r#"{"a": {"b": {"c": 1}}, "n": 1}"#), &config);

    let a = c.get("a").unwrap();
    let a = a.as_container().unwrap();
    assert_eq!(a.policy().kind(), PolicyKind::Allowlisted);
    assert!(a.fillable().is_empty());
    assert!(a.get("b").unwrap().as_container().is_some());
    assert_eq!(c.get("n"), Some(Value::Int(1)));
}
