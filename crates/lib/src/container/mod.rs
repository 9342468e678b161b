//! Ordered containers with mutation policies and visibility projection.
//!
//! A [`Container`] wraps a [`Map`] behind a shared handle. It adds three
//! things on top of the raw map:
//!
//! - a [`MutationPolicy`] consulted by every `set`, `push` and `remove`
//! - `hidden`/`visible` key lists that shape what serialization emits
//! - a cursor for external `current`/`next`/`rewind` style iteration
//!
//! # Owning vs aliasing
//!
//! [`Container::new`] and [`Container::with_config`] take ownership of a map
//! and deep copy any nested containers inside it. [`Container::shared`] wraps
//! an existing [`SharedMap`] instead, so several containers observe the same
//! entries. Cloning a `Container` also aliases its store.
//!
//! # Usage
//!
//! ```
//! use strata::{Container, ContainerConfig};
//!
//! let user: Container = [("name", "Alice"), ("password", "hunter2")]
//!     .into_iter()
//!     .collect();
//!
//! let mut user = Container::with_config(user.all(), &ContainerConfig::locked());
//! user.set_hidden(["password"]);
//!
//! assert!(user.set("name", "Bob").is_err());
//! assert_eq!(user.to_string(), r#"{"name":"Alice"}"#);
//! ```

use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::Rc,
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    data::{DataError, Fallback, Key, Map, Value},
};

pub mod config;
pub mod policy;
pub mod projection;

pub use config::ContainerConfig;
pub use policy::{Allowlist, MutationPolicy, PolicyKind};

/// A reference-counted handle to a map shared by several containers.
///
/// All handles see each other's writes immediately. There is no locking: at
/// most one logical writer should use a shared store at a time, otherwise the
/// last write wins. Reads from outside the crate go through
/// [`SharedMap::snapshot`], so no borrow outlives a call.
#[derive(Debug, Clone, Default)]
pub struct SharedMap(Rc<RefCell<Map>>);

impl SharedMap {
    /// Wraps `map` in a new shared handle
    pub fn new(map: Map) -> Self {
        SharedMap(Rc::new(RefCell::new(map)))
    }

    /// Copies out the current entries
    pub fn snapshot(&self) -> Map {
        self.0.borrow().clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Map> {
        self.0.borrow()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut Map) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Returns true if both handles point at the same map
    pub fn ptr_eq(&self, other: &SharedMap) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Map> for SharedMap {
    fn from(map: Map) -> Self {
        SharedMap::new(map)
    }
}

/// An ordered key/value container.
///
/// The cursor (`current`, `next`, `rewind`, ...) is per instance and not
/// re-entrant: walking the same instance from two places at once moves a
/// single shared position. Clones get their own cursor over the shared store.
#[derive(Debug, Clone)]
pub struct Container {
    store: SharedMap,
    hidden: Vec<Key>,
    visible: Vec<Key>,
    policy: MutationPolicy,
    cursor: Cell<usize>,
}

impl Container {
    /// Creates an open container owning `map`
    pub fn new(map: impl Into<Map>) -> Self {
        Self::with_config(map, &ContainerConfig::default())
    }

    /// Creates a locked container owning `map`
    pub fn locked(map: impl Into<Map>) -> Self {
        Self::with_config(map, &ContainerConfig::locked())
    }

    /// Creates an allowlisted container owning `map`, with the given fillable keys
    pub fn allowlisted<I, K>(map: impl Into<Map>, fillable: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self::with_config(map, &ContainerConfig::allowlisted(fillable))
    }

    /// Creates a container owning `map`.
    ///
    /// Nested containers found among the entries are deep copied. With
    /// `preserve_policy` the copies carry this container's policy variant
    /// (with empty allowlist parameters), otherwise they are open. With
    /// `wrap_nested`, raw nested maps become containers the same way.
    pub fn with_config(map: impl Into<Map>, config: &ContainerConfig) -> Self {
        let policy = config.policy();
        let nested = config.nested(&policy);
        let mut map = map.into();
        for value in map.values_mut() {
            match value {
                Value::Container(inner) => {
                    let copy = inner.copy_with(&nested);
                    *value = Value::Container(copy);
                }
                Value::Map(raw) if nested.wrap_nested => {
                    let raw = std::mem::take(raw);
                    *value = Value::Container(Container::with_config(raw, &nested));
                }
                _ => {}
            }
        }
        Self::from_parts(SharedMap::new(map), config, policy)
    }

    /// Creates a container aliasing `store`.
    ///
    /// Writes through any container sharing the store are visible through all
    /// of them; keep to a single writer at a time. Nested values are taken as
    /// they are, nothing is copied.
    pub fn shared(store: &SharedMap, config: &ContainerConfig) -> Self {
        tracing::trace!(policy = %config.policy, "aliasing shared store");
        Self::from_parts(store.clone(), config, config.policy())
    }

    fn from_parts(store: SharedMap, config: &ContainerConfig, policy: MutationPolicy) -> Self {
        Self {
            store,
            hidden: config.hidden.clone(),
            visible: config.visible.clone(),
            policy,
            cursor: Cell::new(0),
        }
    }

    /// Parses a JSON object or array into an open container
    pub fn from_json(json: &str) -> Result<Self> {
        let map: Map = serde_json::from_str(json)?;
        Ok(Container::new(map))
    }

    fn copy_with(&self, config: &ContainerConfig) -> Container {
        tracing::trace!(policy = %config.policy, len = self.count(), "copying nested container");
        Container::with_config(self.all(), config)
    }

    /// Returns an independent copy: same policy and visibility, new store,
    /// nested containers copied recursively, including those inside raw maps.
    pub fn deep_copy(&self) -> Container {
        let map = self.store.borrow().detached();
        Container {
            store: SharedMap::new(map),
            hidden: self.hidden.clone(),
            visible: self.visible.clone(),
            policy: self.policy.clone(),
            cursor: Cell::new(0),
        }
    }

    /// A handle to the backing store, for building aliasing containers
    pub fn store(&self) -> SharedMap {
        self.store.clone()
    }

    /// Returns true if both containers share one store
    pub fn aliases(&self, other: &Container) -> bool {
        self.store.ptr_eq(&other.store)
    }

    /// The mutation policy
    pub fn policy(&self) -> &MutationPolicy {
        &self.policy
    }

    pub(crate) fn with_store<R>(&self, f: impl FnOnce(&Map) -> R) -> R {
        f(&self.store.borrow())
    }

    fn check_not_self(&self, value: &Value) -> Result<()> {
        if value.reaches(self) {
            tracing::debug!("refusing to store a container inside itself");
            return Err(DataError::SelfReference.into());
        }
        Ok(())
    }

    // ===== Reads =====

    /// Gets the value stored under exactly `key`.
    ///
    /// No dot-path decomposition happens here; use [`crate::path`] for that.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.store.borrow().get(key).cloned()
    }

    /// Gets the value under `key`, resolving `default` when the key is absent.
    ///
    /// A stored `Null` is returned as-is.
    pub fn get_or(&self, key: impl Into<Key>, default: impl Into<Fallback>) -> Value {
        match self.get(key) {
            Some(value) => value,
            None => default.into().resolve(),
        }
    }

    /// Copies out the whole raw store, bypassing the visibility projection
    pub fn all(&self) -> Map {
        self.store.borrow().clone()
    }

    /// Returns true if `key` is present, whatever its value
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.store.borrow().contains_key(key)
    }

    /// Number of entries
    pub fn count(&self) -> usize {
        self.store.borrow().len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    /// First key in insertion order.
    ///
    /// # Errors
    /// [`DataError::EmptyContainer`] when there are no entries.
    pub fn first_key(&self) -> Result<Key> {
        self.store
            .borrow()
            .first_key()
            .cloned()
            .ok_or_else(|| DataError::EmptyContainer.into())
    }

    /// First value in insertion order.
    ///
    /// # Errors
    /// [`DataError::EmptyContainer`] when there are no entries.
    pub fn first(&self) -> Result<Value> {
        let store = self.store.borrow();
        store
            .get_index(0)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| DataError::EmptyContainer.into())
    }

    /// Last key in insertion order
    pub fn last_key(&self) -> Option<Key> {
        self.store.borrow().last_key().cloned()
    }

    /// Returns true iff the keys are not exactly `0..count` in order
    pub fn is_associative(&self) -> bool {
        self.store.borrow().is_associative()
    }

    /// Returns true iff the keys are exactly `0..count` in order
    pub fn is_list(&self) -> bool {
        self.store.borrow().is_list()
    }

    /// Snapshot iteration over the entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Key, Value)> + use<> {
        self.all().into_iter()
    }

    /// A new container holding every leaf of this one, depth first and
    /// renumbered `0..n`. Intermediate keys are dropped.
    pub fn flat(&self) -> Container {
        let mut leaves = Vec::new();
        for value in self.store.borrow().values() {
            value.collect_leaves(&mut leaves);
        }
        Container {
            store: SharedMap::new(Map::from_values(leaves)),
            hidden: Vec::new(),
            visible: Vec::new(),
            policy: self.policy.fresh(),
            cursor: Cell::new(0),
        }
    }

    // ===== Writes =====

    /// Assigns `value` to `key`, returning the previous value.
    ///
    /// An empty string key appends instead, as [`Container::push`].
    ///
    /// # Errors
    /// [`DataError::MutationRejected`] when the policy refuses the write, and
    /// [`DataError::SelfReference`] when `value` holds a handle to this
    /// container's store. The store is left unchanged either way. An empty
    /// key fails as [`Container::push`] does.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = key.into();
        let value = value.into();
        if key.is_empty() {
            self.push(value)?;
            return Ok(None);
        }
        self.policy.check_set(&key, &value)?;
        self.check_not_self(&value)?;
        Ok(self.store.update(|map| map.insert(key, value)))
    }

    /// Appends `value` under the next integer key and returns that key.
    ///
    /// # Errors
    /// [`DataError::MutationRejected`] when the policy refuses the push,
    /// [`DataError::SelfReference`] as for [`Container::set`], and
    /// [`DataError::IndexOccupied`] once the integer keys are exhausted.
    pub fn push(&self, value: impl Into<Value>) -> Result<Key> {
        let value = value.into();
        self.policy.check_push(&value)?;
        self.check_not_self(&value)?;
        Ok(self.store.update(|map| map.push(value))?)
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// # Errors
    /// [`DataError::MutationRejected`] when the policy refuses the removal,
    /// whether or not the key is present.
    pub fn remove(&self, key: impl Into<Key>) -> Result<Option<Value>> {
        let key = key.into();
        self.policy.check_remove(&key)?;
        Ok(self.store.update(|map| map.remove(key)))
    }

    // ===== Allowlist =====

    fn allowlist_mut(&mut self, operation: &'static str) -> Result<&mut Allowlist> {
        let policy = self.policy.kind();
        match self.policy.allowlist_mut() {
            Some(list) => Ok(list),
            None => {
                tracing::warn!(operation, %policy, "allowlist operation on a container without an allowlist");
                Err(DataError::PolicyMismatch { operation, policy }.into())
            }
        }
    }

    /// Adds keys to the fillable set.
    ///
    /// # Errors
    /// [`DataError::PolicyMismatch`] unless the policy is allowlisted.
    pub fn allow<I, K>(&mut self, keys: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.allowlist_mut("allow")?
            .allow(keys.into_iter().map(Into::into));
        Ok(self)
    }

    /// Removes keys from the fillable set.
    ///
    /// # Errors
    /// [`DataError::PolicyMismatch`] unless the policy is allowlisted.
    pub fn deny<I, K>(&mut self, keys: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.allowlist_mut("deny")?
            .deny(keys.into_iter().map(Into::into));
        Ok(self)
    }

    /// Toggles the push gate.
    ///
    /// # Errors
    /// [`DataError::PolicyMismatch`] unless the policy is allowlisted.
    pub fn set_pushable(&mut self, pushable: bool) -> Result<&mut Self> {
        self.allowlist_mut("set_pushable")?.set_pushable(pushable);
        Ok(self)
    }

    /// Keys that may be set or removed; empty unless allowlisted
    pub fn fillable(&self) -> &[Key] {
        self.policy
            .allowlist()
            .map(Allowlist::fillable)
            .unwrap_or_default()
    }

    /// Whether the allowlisted push gate is open
    pub fn is_pushable(&self) -> bool {
        self.policy.allowlist().is_some_and(Allowlist::is_pushable)
    }

    // ===== Visibility =====

    /// Keys excluded from the visible projection
    pub fn hidden_keys(&self) -> &[Key] {
        &self.hidden
    }

    /// The entries whose keys are hidden, in store order
    pub fn get_hidden(&self) -> Map {
        projection::project(&self.store.borrow(), &self.hidden)
    }

    /// Adds keys to the hidden list
    pub fn set_hidden<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        union_into(&mut self.hidden, keys);
        self
    }

    /// Removes keys from the hidden list
    pub fn unset_hidden<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        difference_from(&mut self.hidden, keys);
        self
    }

    /// Keys the projection emits: the visible list when non-empty, otherwise
    /// every stored key that is not hidden
    pub fn visible_keys(&self) -> Vec<Key> {
        projection::visible_keys(self.store.borrow().keys(), &self.hidden, &self.visible)
    }

    /// The visible projection, in store order
    pub fn get_visible(&self) -> Map {
        projection::project(&self.store.borrow(), &self.visible_keys())
    }

    /// Removes keys from the visible list.
    ///
    /// This narrows an explicit allowlist; once it is empty the projection
    /// falls back to "everything not hidden".
    pub fn set_visible<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        difference_from(&mut self.visible, keys);
        self
    }

    /// Adds keys to the visible list, turning it into an exclusive allowlist.
    pub fn unset_visible<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        union_into(&mut self.visible, keys);
        self
    }

    // ===== Cursor =====

    /// Value at the cursor
    pub fn current(&self) -> Option<Value> {
        let store = self.store.borrow();
        store.get_index(self.cursor.get()).map(|(_, v)| v.clone())
    }

    /// Key at the cursor
    pub fn key(&self) -> Option<Key> {
        let store = self.store.borrow();
        store.get_index(self.cursor.get()).map(|(k, _)| k.clone())
    }

    /// Advances the cursor
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) {
        self.cursor.set(self.cursor.get() + 1);
    }

    /// Moves the cursor back to the first entry
    pub fn rewind(&self) {
        self.cursor.set(0);
    }

    /// Returns true while the cursor points at an entry
    pub fn valid(&self) -> bool {
        self.cursor.get() < self.count()
    }

    /// Renders the visible projection as JSON text
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

fn union_into<I, K>(list: &mut Vec<Key>, keys: I)
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    for key in keys.into_iter().map(Into::into) {
        if !list.contains(&key) {
            list.push(key);
        }
    }
}

fn difference_from<I, K>(list: &mut Vec<Key>, keys: I)
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    let removed: Vec<Key> = keys.into_iter().map(Into::into).collect();
    list.retain(|key| !removed.contains(key));
}

impl Default for Container {
    fn default() -> Self {
        Container::new(Map::new())
    }
}

impl PartialEq for Container {
    /// Containers are equal when their stores hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.aliases(other) || *self.store.borrow() == *other.store.borrow()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Container {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Container::new(iter.into_iter().collect::<Map>())
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.all().into_iter()
    }
}

impl Serialize for Container {
    /// Emits the visible projection: a JSON array when it is a list, an object otherwise.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.get_visible().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Container {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Container::new)
    }
}
