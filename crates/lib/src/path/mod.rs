//! Dot-path addressing for nested data.
//!
//! A path such as `users.*.name` is split on `.` into segments. Most segments
//! are literal keys; three are operators understood by [`data_get`]:
//!
//! - `*` fans out over every element of the current map or container
//! - `{first}` and `{last}` resolve to the first/last key of the current target
//!
//! The escaped forms `\*`, `\{first}` and `\{last}` address the literal keys
//! `*`, `{first}` and `{last}`.
//!
//! # Usage
//!
//! ```rust
//! use strata::{Value, path};
//!
//! let data = Value::from_json(r#"{"users": [{"name": "a"}, {"name": "b"}]}"#)?;
//! let names = path::data_get(&data, "users.*.name", ());
//! assert_eq!(names.to_json_string(), r#"["a","b"]"#);
//!
//! let first = path::data_get(&data, "users.{first}.name", "nobody");
//! assert_eq!(first, "a");
//! # Ok::<(), strata::Error>(())
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use crate::data::Key;

mod resolve;

pub use resolve::{accessible, collapse, data_get, except, exists, forget, get, only, pluck, set};

/// Splits a path on `.`, keeping empty segments.
///
/// ```rust
/// # use strata::path::split;
/// assert_eq!(split("a..b").collect::<Vec<_>>(), vec!["a", "", "b"]);
/// ```
pub fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('.')
}

/// One classified path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A literal key, with any escape already removed
    Key(&'a str),
    /// `*`
    Wildcard,
    /// `{first}`
    First,
    /// `{last}`
    Last,
}

impl<'a> Segment<'a> {
    /// Classifies a raw segment
    pub fn parse(raw: &'a str) -> Self {
        match raw {
            "*" => Segment::Wildcard,
            "{first}" => Segment::First,
            "{last}" => Segment::Last,
            "\\*" => Segment::Key("*"),
            "\\{first}" => Segment::Key("{first}"),
            "\\{last}" => Segment::Key("{last}"),
            other => Segment::Key(other),
        }
    }

    /// Returns true for `*`, `{first}` and `{last}`
    pub fn is_operator(&self) -> bool {
        !matches!(self, Segment::Key(_))
    }
}

/// An owned dot-path.
///
/// Built from a string, a path keeps the full text so lookups can try it as a
/// single verbatim key before decomposing it. Built from pre-split segments,
/// it is never re-split and has no verbatim form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    source: Option<String>,
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path, which addresses the target itself
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw segments, escapes intact
    pub fn raw_segments(&self) -> &[String] {
        &self.segments
    }

    /// Classified segments
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.segments.iter().map(|s| Segment::parse(s))
    }

    /// Returns true if any segment is an unescaped `*`
    pub fn has_wildcard(&self) -> bool {
        self.segments().any(|s| s == Segment::Wildcard)
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the empty path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The whole path as one key, when it was built from a single string
    pub fn verbatim(&self) -> Option<Key> {
        self.source.as_deref().map(Key::from)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "(empty path)")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KeyPath::from(s))
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        if path.is_empty() {
            return KeyPath::new();
        }
        KeyPath {
            source: Some(path.to_string()),
            segments: split(path).map(str::to_string).collect(),
        }
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        KeyPath::from(path.as_str())
    }
}

impl From<&String> for KeyPath {
    fn from(path: &String) -> Self {
        KeyPath::from(path.as_str())
    }
}

impl From<Key> for KeyPath {
    fn from(key: Key) -> Self {
        KeyPath::from(key.to_string())
    }
}

impl From<&Key> for KeyPath {
    fn from(key: &Key) -> Self {
        KeyPath::from(key.to_string())
    }
}

impl From<i64> for KeyPath {
    fn from(index: i64) -> Self {
        KeyPath::from(Key::Int(index))
    }
}

impl From<i32> for KeyPath {
    fn from(index: i32) -> Self {
        KeyPath::from(Key::Int(index as i64))
    }
}

impl<S: Into<String>> From<Vec<S>> for KeyPath {
    fn from(segments: Vec<S>) -> Self {
        KeyPath {
            source: None,
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}
