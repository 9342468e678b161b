//! Insertion-ordered raw nested mapping.
//!
//! [`Map`] is the raw structure stored inside containers and addressed by the
//! path functions. A sequence is simply a `Map` whose keys are the dense
//! integers `0..len`.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};

use super::{DataError, Key, Value};

/// An insertion-ordered `Key -> Value` table.
///
/// Re-inserting an existing key keeps its original position. Integer keys
/// drive a "next index" counter used by [`Map::push`], so pushing after
/// `insert(5, ..)` lands on key `6`.
///
/// # Examples
///
/// ```
/// # use strata::{Key, Map, Value};
/// let mut map = Map::new();
/// map.insert("name", "Alice");
/// map.insert(5, true);
/// assert_eq!(map.push(1)?, Key::Int(6));
///
/// map.insert("name", "Bob");
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec![Key::from("name"), Key::Int(5), Key::Int(6)]);
/// # Ok::<(), strata::DataError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: IndexMap<Key, Value>,
    next_index: i64,
}

impl Map {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence keyed `0..n` from the given values
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut map = Map::new();
        for (index, value) in values.into_iter().enumerate() {
            map.insert(index as i64, value);
        }
        map
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the key is present, whatever its value
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Gets the value stored under `key`
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    /// Gets a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.entries.get_mut(&key.into())
    }

    /// Gets the entry at a position in insertion order
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.entries.get_index(index)
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let Key::Int(n) = key
            && n >= self.next_index
        {
            self.next_index = n.saturating_add(1);
        }
        self.entries.insert(key, value.into())
    }

    /// Appends `value` under the next integer key and returns that key.
    ///
    /// The counter stops at `i64::MAX`. Once that key is taken, pushing fails
    /// with [`DataError::IndexOccupied`] and the map is left unchanged.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<Key, DataError> {
        let key = Key::Int(self.next_index);
        if self.entries.contains_key(&key) {
            return Err(DataError::IndexOccupied {
                index: self.next_index,
            });
        }
        self.insert(key.clone(), value);
        Ok(key)
    }

    /// Removes `key`, keeping the order of the remaining entries
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.shift_remove(&key.into())
    }

    /// Returns the indexable child under `key`, creating an empty map when the
    /// key is absent or holds a non-indexable value.
    pub(crate) fn branch_mut(&mut self, key: Key) -> &mut Value {
        if let Key::Int(n) = key
            && n >= self.next_index
        {
            self.next_index = n.saturating_add(1);
        }
        let slot = self
            .entries
            .entry(key)
            .or_insert_with(|| Value::Map(Map::new()));
        if !slot.is_indexable() {
            *slot = Value::Map(Map::new());
        }
        slot
    }

    /// Moves a value out without preserving order. Only used on maps that are
    /// about to be discarded.
    pub(crate) fn take(&mut self, key: &Key) -> Option<Value> {
        self.entries.swap_remove(key)
    }

    /// A copy whose nested container handles are deep copied
    pub(crate) fn detached(&self) -> Map {
        let mut copy = self.clone();
        for value in copy.values_mut() {
            *value = value.detached();
        }
        copy
    }

    /// Returns the first key in insertion order
    pub fn first_key(&self) -> Option<&Key> {
        self.entries.first().map(|(k, _)| k)
    }

    /// Returns the last key in insertion order
    pub fn last_key(&self) -> Option<&Key> {
        self.entries.last().map(|(k, _)| k)
    }

    /// Iterates over the keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterates over the values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Iterates mutably over the values in insertion order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.values_mut()
    }

    /// Iterates over the entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Returns true iff the keys are exactly `0, 1, .., len - 1` in order.
    ///
    /// An empty map is a list.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, key)| *key == Key::Int(i as i64))
    }

    /// Negation of [`Map::is_list`]
    pub fn is_associative(&self) -> bool {
        !self.is_list()
    }

    /// Keeps the entries whose key is listed. Order follows this map, not `keys`.
    pub fn only<'a, I>(&self, keys: I) -> Map
    where
        I: IntoIterator<Item = &'a Key>,
    {
        let wanted: Vec<&Key> = keys.into_iter().collect();
        self.iter()
            .filter(|(key, _)| wanted.contains(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Merges `other` into this map with concatenation semantics.
    ///
    /// Integer-keyed entries are appended under fresh keys, string-keyed
    /// entries overwrite. Stops at the first append that finds its key taken;
    /// entries merged before that point stay.
    pub fn append(&mut self, other: Map) -> Result<(), DataError> {
        for (key, value) in other {
            match key {
                Key::Int(_) => {
                    self.push(value)?;
                }
                key @ Key::Str(_) => {
                    self.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

impl PartialEq for Map {
    /// Order-sensitive: two maps are equal when they hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl From<Vec<Value>> for Map {
    fn from(values: Vec<Value>) -> Self {
        Map::from_values(values)
    }
}

impl IntoIterator for Map {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl serde::Serialize for Map {
    /// Lists serialize as sequences, everything else as a map with string keys.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}
