//! Values stored in maps and containers.
//!
//! [`Value`] is a closed set of variants so the path functions can match on
//! every shape they may meet while walking nested data.

use std::{borrow::Cow, fmt};

use crate::{Container, data::DataError};

use super::{Key, Map};

/// Any value that can live in a [`Map`] or [`Container`].
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Float`], [`Value::Text`]
///
/// ## Indexable values
/// - [`Value::Map`] - raw nested mapping or sequence
/// - [`Value::Container`] - a container handle; cloning it aliases the same store
///
/// ## Records
/// - [`Value::Record`] - named fields reachable through
///   [`data_get`](crate::path::data_get) member lookup, but not indexable
///
/// # Direct Comparisons
///
/// ```
/// # use strata::Value;
/// assert!(Value::from("hello") == "hello");
/// assert!(Value::Int(42) == 42);
/// assert!(!(Value::Int(42) == "42"));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Raw nested mapping or sequence
    Map(Map),
    /// Named fields, not indexable
    Record(Map),
    /// Shared container handle
    Container(Container),
}

impl Value {
    /// Parses JSON text into a value, keeping object key order.
    pub fn from_json(json: &str) -> crate::Result<Value> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if keys can be looked up on this value (maps and containers)
    pub fn is_indexable(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Container(_))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Container(_) => "container",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to borrow a raw map
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to mutably borrow a raw map
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to borrow a container handle
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Value::Container(container) => Some(container),
            _ => None,
        }
    }

    /// Returns true if `key` is present on an indexable value.
    ///
    /// Presence, not truthiness: a stored `Null` or `0` counts.
    pub fn exists(&self, key: &Key) -> bool {
        match self {
            Value::Map(map) => map.contains_key(key),
            Value::Container(container) => container.has(key),
            _ => false,
        }
    }

    /// Looks up `key` on an indexable value.
    ///
    /// Map children are borrowed; container children are cloned out of the
    /// shared store.
    pub fn lookup(&self, key: &Key) -> Option<Cow<'_, Value>> {
        match self {
            Value::Map(map) => map.get(key).map(Cow::Borrowed),
            Value::Container(container) => container.get(key).map(Cow::Owned),
            _ => None,
        }
    }

    /// Looks up a named field on a record
    pub fn field(&self, key: &Key) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Consumes the value and returns its child under `key`, falling back to
    /// record fields.
    pub(crate) fn into_child(self, key: &Key) -> Option<Value> {
        match self {
            Value::Map(mut map) | Value::Record(mut map) => map.take(key),
            Value::Container(container) => container.get(key),
            _ => None,
        }
    }

    /// First key of an indexable value
    pub fn first_key(&self) -> Option<Key> {
        match self {
            Value::Map(map) => map.first_key().cloned(),
            Value::Container(container) => container.first_key().ok(),
            _ => None,
        }
    }

    /// Last key of an indexable value
    pub fn last_key(&self) -> Option<Key> {
        match self {
            Value::Map(map) => map.last_key().cloned(),
            Value::Container(container) => container.last_key(),
            _ => None,
        }
    }

    /// Returns the raw entries of an indexable value.
    ///
    /// Containers are coerced to a copy of their full store.
    pub fn to_map(&self) -> Option<Cow<'_, Map>> {
        match self {
            Value::Map(map) => Some(Cow::Borrowed(map)),
            Value::Container(container) => Some(Cow::Owned(container.all())),
            _ => None,
        }
    }

    /// Pushes every leaf of this value, depth first, onto `out`.
    ///
    /// Maps and containers are descended; everything else is a leaf.
    pub(crate) fn collect_leaves(&self, out: &mut Vec<Value>) {
        match self {
            Value::Map(map) => map.values().for_each(|v| v.collect_leaves(out)),
            Value::Container(container) => {
                container.all().values().for_each(|v| v.collect_leaves(out))
            }
            leaf => out.push(leaf.clone()),
        }
    }

    /// A copy that shares no store with `self`: every container handle,
    /// however deeply nested in maps or records, is deep copied.
    pub fn detached(&self) -> Value {
        match self {
            Value::Map(map) => Value::Map(map.detached()),
            Value::Record(fields) => Value::Record(fields.detached()),
            Value::Container(container) => Value::Container(container.deep_copy()),
            other => other.clone(),
        }
    }

    /// Returns true if `container`'s store is reachable from this value
    pub(crate) fn reaches(&self, container: &Container) -> bool {
        match self {
            Value::Map(map) | Value::Record(map) => map.values().any(|v| v.reaches(container)),
            Value::Container(inner) => {
                inner.aliases(container)
                    || inner.with_store(|map| map.values().any(|v| v.reaches(container)))
            }
            _ => false,
        }
    }

    /// Renders the value as JSON text.
    ///
    /// Containers render their visible projection.
    pub fn to_json_string(&self) -> String {
        // Serializing a Value cannot fail: keys are always strings and
        // non-finite floats become null.
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Container(a), Value::Container(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            other => write!(f, "{}", other.to_json_string()),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(n) => Value::Int(n),
            Key::Str(s) => Value::Text(s),
        }
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Container> for Value {
    fn from(value: Container) -> Self {
        Value::Container(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Map(Map::from(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<&Value> for Key {
    type Error = DataError;

    /// Scalars that can key a map: integers, text and booleans (as 0/1).
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(Key::Int(*n)),
            Value::Text(s) => Ok(Key::from(s.as_str())),
            Value::Bool(b) => Ok(Key::Int(*b as i64)),
            other => Err(DataError::TypeMismatch {
                expected: "key".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::{Serialize, ser::SerializeMap};

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Map(map) => map.serialize(serializer),
            Value::Record(fields) => {
                let mut out = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields.iter() {
                    out.serialize_entry(&key.to_string(), value)?;
                }
                out.end()
            }
            Value::Container(container) => container.serialize(serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "any JSON-like value")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: serde::Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut map = Map::new();
        let mut index = 0i64;
        while let Some(value) = seq.next_element::<Value>()? {
            map.insert(index, value);
            index += 1;
        }
        Ok(Value::Map(map))
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::new();
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> serde::Deserialize<'de> for Map {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match deserializer.deserialize_any(ValueVisitor)? {
            Value::Map(map) => Ok(map),
            other => Err(serde::de::Error::custom(format!(
                "expected a map or sequence, found {}",
                other.type_name()
            ))),
        }
    }
}
