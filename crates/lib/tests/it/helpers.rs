use strata::{Container, Key, Map, Value};

/// Parse JSON test fixtures, panicking on malformed input
pub fn json(text: &str) -> Value {
    Value::from_json(text).expect("fixture should be valid JSON")
}

/// Parse a JSON object or array fixture into a raw map
pub fn json_map(text: &str) -> Map {
    match json(text) {
        Value::Map(map) => map,
        other => panic!("Expected a map fixture, got: {other:?}"),
    }
}

/// Build an open container from a JSON fixture
pub fn container(text: &str) -> Container {
    Container::new(json_map(text))
}

/// Collect the keys of a map in order
pub fn keys_of(map: &Map) -> Vec<Key> {
    map.keys().cloned().collect()
}

/// Build a key list from string literals
pub fn keys(names: &[&str]) -> Vec<Key> {
    names.iter().map(|name| Key::from(*name)).collect()
}
