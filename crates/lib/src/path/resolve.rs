//! Reading and writing nested values by path.
//!
//! Reads never fail: a miss resolves the caller's [`Fallback`]. Writes return
//! a [`Result`] because containers on the way may refuse them.

use std::borrow::Cow;

use super::{KeyPath, Segment};
use crate::{
    Result,
    data::{Fallback, Key, Map, Value},
};

/// Steps from `current` into its child under `key`.
///
/// With `members`, record fields are reachable as well.
fn descend<'a>(current: Cow<'a, Value>, key: &Key, members: bool) -> Option<Cow<'a, Value>> {
    match current {
        Cow::Borrowed(value) => value
            .lookup(key)
            .or_else(|| members.then(|| value.field(key).map(Cow::Borrowed)).flatten()),
        Cow::Owned(value) => {
            if !members && !value.is_indexable() {
                return None;
            }
            value.into_child(key).map(Cow::Owned)
        }
    }
}

/// Gets a value by plain dot path.
///
/// An empty path returns `target` itself. When the whole path is also a key of
/// `target`, that entry wins over splitting on `.`. Operators are not
/// interpreted here; see [`data_get`].
///
/// ```rust
/// # use strata::{Value, path};
/// let data = Value::from_json(r#"{"a.b": 1, "a": {"b": 2}}"#)?;
/// assert_eq!(path::get(&data, "a.b", ()), 1);
/// assert_eq!(path::get(&data, "a.c", "none"), "none");
/// # Ok::<(), strata::Error>(())
/// ```
pub fn get(target: &Value, path: impl Into<KeyPath>, default: impl Into<Fallback>) -> Value {
    let path = path.into();
    if path.is_empty() {
        return target.clone();
    }
    if !target.is_indexable() {
        return default.into().resolve();
    }
    if let Some(key) = path.verbatim()
        && let Some(found) = target.lookup(&key)
    {
        return found.into_owned();
    }

    let mut current = Cow::Borrowed(target);
    for raw in path.raw_segments() {
        match descend(current, &Key::from(raw.as_str()), false) {
            Some(next) => current = next,
            None => return default.into().resolve(),
        }
    }
    current.into_owned()
}

/// Gets a value by dot path, with operators and record fields.
///
/// - `*` maps the rest of the path over every element of the current target
///   and returns the results as a list. When the rest of the path holds
///   another `*`, the per-element lists are collapsed one level.
/// - `{first}`/`{last}` take the first/last key of the current target.
/// - `\*`, `\{first}` and `\{last}` are literal keys.
/// - A key missing from a record is looked up among its fields.
///
/// Lookups inside a fan-out use a `Null` default; `default` only applies to
/// the outer walk.
pub fn data_get(target: &Value, path: impl Into<KeyPath>, default: impl Into<Fallback>) -> Value {
    let path = path.into();
    walk(Cow::Borrowed(target), path.raw_segments(), default.into())
}

fn walk(mut current: Cow<'_, Value>, segments: &[String], default: Fallback) -> Value {
    for (i, raw) in segments.iter().enumerate() {
        let key = match Segment::parse(raw) {
            Segment::Wildcard => return fan_out(&current, &segments[i + 1..], default),
            Segment::Key(key) => Key::from(key),
            Segment::First => match current.first_key() {
                Some(key) => key,
                None => return default.resolve(),
            },
            Segment::Last => match current.last_key() {
                Some(key) => key,
                None => return default.resolve(),
            },
        };
        current = match descend(current, &key, true) {
            Some(next) => next,
            None => return default.resolve(),
        };
    }
    current.into_owned()
}

fn fan_out(current: &Value, rest: &[String], default: Fallback) -> Value {
    let Some(items) = current.to_map() else {
        return default.resolve();
    };
    let results: Vec<Value> = items
        .values()
        .map(|item| walk(Cow::Borrowed(item), rest, Fallback::none()))
        .collect();

    if rest.iter().any(|raw| Segment::parse(raw) == Segment::Wildcard) {
        Value::Map(collapse(&results))
    } else {
        Value::from(results)
    }
}

/// Sets a value by dot path.
///
/// An empty path replaces `target`. A single-segment path, or a path that is
/// already a key of `target`, assigns directly. Otherwise intermediate maps are
/// created as needed and non-indexable intermediates are replaced.
///
/// Writes into a container go through its mutation policy. A raw map held by a
/// container is edited on a copy and written back with
/// [`Container::set`](crate::Container::set) under its top-level key.
///
/// # Errors
/// Returns the first policy rejection met on the way.
pub fn set(target: &mut Value, path: impl Into<KeyPath>, value: impl Into<Value>) -> Result<()> {
    let path = path.into();
    let value = value.into();
    if let Some(key) = path.verbatim()
        && (path.len() == 1 || target.exists(&key))
    {
        return assign(target, key, value);
    }
    set_segments(target, path.raw_segments(), value)
}

fn assign(target: &mut Value, key: Key, value: Value) -> Result<()> {
    match target {
        Value::Map(map) => {
            map.insert(key, value);
            Ok(())
        }
        Value::Container(container) => container.set(key, value).map(|_| ()),
        _ => {
            let mut map = Map::new();
            map.insert(key, value);
            *target = Value::Map(map);
            Ok(())
        }
    }
}

fn set_segments(target: &mut Value, segments: &[String], value: Value) -> Result<()> {
    let Some((first, rest)) = segments.split_first() else {
        *target = value;
        return Ok(());
    };
    let key = Key::from(first.as_str());
    if rest.is_empty() {
        return assign(target, key, value);
    }

    match target {
        Value::Map(map) => set_segments(map.branch_mut(key), rest, value),
        Value::Container(container) => {
            let mut child = container
                .get(key.clone())
                .filter(Value::is_indexable)
                .unwrap_or_default();
            if let Value::Container(_) = child {
                // Shares the store, so the write lands in place
                return set_segments(&mut child, rest, value);
            }
            set_segments(&mut child, rest, value)?;
            container.set(key, child).map(|_| ())
        }
        _ => {
            *target = Value::Map(Map::new());
            set_segments(target, segments, value)
        }
    }
}

/// Removes values by dot path.
///
/// Each path is resolved from `target` independently. A path that is a key of
/// `target` is removed verbatim; otherwise the path is walked and the last
/// segment removed from whatever it reaches. Paths through missing or
/// non-indexable intermediates are skipped.
///
/// # Errors
/// Returns the first policy rejection from a container on the way.
pub fn forget<I, P>(target: &mut Value, paths: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: Into<KeyPath>,
{
    for path in paths {
        let path = path.into();
        if let Some(key) = path.verbatim()
            && target.exists(&key)
        {
            remove_key(target, key)?;
            continue;
        }
        forget_segments(target, path.raw_segments())?;
    }
    Ok(())
}

fn remove_key(target: &mut Value, key: Key) -> Result<bool> {
    match target {
        Value::Map(map) => Ok(map.remove(key).is_some()),
        Value::Container(container) => Ok(container.remove(key)?.is_some()),
        _ => Ok(false),
    }
}

/// Returns whether anything was removed.
fn forget_segments(target: &mut Value, segments: &[String]) -> Result<bool> {
    let Some((first, rest)) = segments.split_first() else {
        return Ok(false);
    };
    let key = Key::from(first.as_str());
    if rest.is_empty() {
        return remove_key(target, key);
    }

    match target {
        Value::Map(map) => match map.get_mut(key) {
            Some(child) if child.is_indexable() => forget_segments(child, rest),
            _ => Ok(false),
        },
        Value::Container(container) => match container.get(key.clone()) {
            Some(mut child @ Value::Container(_)) => forget_segments(&mut child, rest),
            Some(mut child @ Value::Map(_)) => {
                let removed = forget_segments(&mut child, rest)?;
                if removed {
                    container.set(key, child)?;
                }
                Ok(removed)
            }
            _ => Ok(false),
        },
        _ => Ok(false),
    }
}

/// Flattens a list of maps one level.
///
/// Integer keys are renumbered and string keys overwrite, as in
/// [`Map::append`]. Containers contribute their whole store; non-indexable
/// elements are skipped. If the integer keys run out at `i64::MAX`, the
/// entries merged so far are returned.
pub fn collapse<'a>(values: impl IntoIterator<Item = &'a Value>) -> Map {
    let mut out = Map::new();
    for value in values {
        if let Some(entries) = value.to_map()
            && let Err(err) = out.append(entries.into_owned())
        {
            tracing::warn!(error = %err, "collapse stopped early");
            break;
        }
    }
    out
}

/// The entries of `target` whose key is listed, in `target`'s order.
///
/// Keys are matched verbatim, never as paths.
pub fn only<I, K>(target: &Value, keys: I) -> Map
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    target
        .to_map()
        .map(|entries| entries.only(&keys))
        .unwrap_or_default()
}

/// A copy of `target` with the given paths removed, using [`forget`].
///
/// A container is copied to a raw map first. Nested containers are deep
/// copied, so `target` is never modified; a path reaching into one removes
/// from the copy under the copy's policy.
///
/// # Errors
/// Returns the first policy rejection from a nested container.
pub fn except<I, P>(target: &Value, paths: I) -> Result<Value>
where
    I: IntoIterator<Item = P>,
    P: Into<KeyPath>,
{
    let mut copy = match target {
        Value::Container(container) => Value::Map(container.all()).detached(),
        other => other.detached(),
    };
    forget(&mut copy, paths)?;
    Ok(copy)
}

/// Extracts one value per element of `items`.
///
/// With `key_path`, each result is keyed by the element's value at that path
/// (later duplicates overwrite); otherwise results are pushed in order.
///
/// ```rust
/// # use strata::{Value, path};
/// let rows = Value::from_json(r#"[{"id": 3, "name": "a"}, {"id": 5, "name": "b"}]"#)?;
/// let names = path::pluck(&rows, "name", Some("id"));
/// assert_eq!(names.get(5), Some(&Value::from("b")));
/// # Ok::<(), strata::Error>(())
/// ```
pub fn pluck<P, K>(items: &Value, value_path: P, key_path: Option<K>) -> Map
where
    P: Into<KeyPath>,
    K: Into<KeyPath>,
{
    let value_path = value_path.into();
    let key_path = key_path.map(Into::into);
    let mut results = Map::new();
    let Some(entries) = items.to_map() else {
        return results;
    };

    for (position, item) in entries.values().enumerate() {
        let value = data_get(item, &value_path, ());
        match &key_path {
            None => {
                results.insert(position as i64, value);
            }
            Some(key_path) => {
                let key = key_of(&data_get(item, key_path, ()));
                results.insert(key, value);
            }
        }
    }
    results
}

/// Renders a looked-up value as a map key; `Null` becomes the empty key.
fn key_of(value: &Value) -> Key {
    match value {
        Value::Null => Key::from(""),
        other => Key::try_from(other).unwrap_or_else(|_| Key::from(other.to_string())),
    }
}

/// Returns true if keys can be looked up on `value`
pub fn accessible(value: &Value) -> bool {
    value.is_indexable()
}

/// Returns true if `key` is present on `value`, whatever it holds
pub fn exists(value: &Value, key: impl Into<Key>) -> bool {
    value.exists(&key.into())
}
