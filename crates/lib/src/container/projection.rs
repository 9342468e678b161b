//! Visibility projection used when a container is serialized.
//!
//! A non-empty `visible` list is an exclusive allowlist. Otherwise every key
//! not listed in `hidden` is visible.

use crate::data::{Key, Map};

/// Keys that a projection emits.
///
/// With a non-empty `visible` list it is returned verbatim, even if it names
/// keys the store does not hold. Otherwise the result is `all - hidden` in
/// store order.
pub fn visible_keys<'a>(
    all: impl IntoIterator<Item = &'a Key>,
    hidden: &[Key],
    visible: &[Key],
) -> Vec<Key> {
    if !visible.is_empty() {
        return visible.to_vec();
    }
    all.into_iter()
        .filter(|key| !hidden.contains(key))
        .cloned()
        .collect()
}

/// Projects `map` down to `keys`, keeping the order of `map`.
pub fn project(map: &Map, keys: &[Key]) -> Map {
    map.only(keys)
}
