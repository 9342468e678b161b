use std::{cell::Cell, rc::Rc};

use strata::{Fallback, Value, value_of};

use crate::helpers::*;

#[test]
fn test_value_of_literal_and_producer() {
    assert_eq!(value_of("lit"), Value::from("lit"));
    assert_eq!(value_of(Fallback::lazy(|| Value::Int(3))), Value::Int(3));
    assert_eq!(value_of(()), Value::Null);
}

#[test]
fn test_producer_not_invoked_on_hit() {
    let c = container(r#"{"present": null}"#);
    let calls = Rc::new(Cell::new(0));

    let counter = calls.clone();
    let value = c.get_or(
        "present",
        Fallback::lazy(move || {
            counter.set(counter.get() + 1);
            Value::from("default")
        }),
    );
    assert_eq!(value, Value::Null);
    assert_eq!(calls.get(), 0);

    let counter = calls.clone();
    let value = c.get_or(
        "absent",
        Fallback::lazy(move || {
            counter.set(counter.get() + 1);
            Value::from("default")
        }),
    );
    assert_eq!(value, Value::from("default"));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_args_producer() {
    let greet = Fallback::with_args(|args| {
        let name = args.first().and_then(Value::as_text).unwrap_or("stranger");
        Value::from(format!("hello {name}"))
    });
    assert_eq!(greet.resolve_with(&[Value::from("ada")]), Value::from("hello ada"));
}
