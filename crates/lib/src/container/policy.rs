//! Mutation policies for containers.
//!
//! A policy is chosen when a container is built and never changes variant
//! afterwards. Only the allowlist parameters of [`MutationPolicy::Allowlisted`]
//! can be edited later.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{DataError, Key, Mutation, Value};

/// Which policy variant a container carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Every mutation goes through
    #[default]
    Open,
    /// Every mutation is rejected
    Locked,
    /// `set`/`remove` need a fillable key, `push` needs the pushable flag
    Allowlisted,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Open => write!(f, "open"),
            PolicyKind::Locked => write!(f, "locked"),
            PolicyKind::Allowlisted => write!(f, "allowlisted"),
        }
    }
}

/// Parameters of the allowlisted policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    fillable: Vec<Key>,
    pushable: bool,
}

impl Allowlist {
    /// Creates an allowlist
    pub fn new(fillable: impl IntoIterator<Item = Key>, pushable: bool) -> Self {
        let mut list = Allowlist {
            fillable: Vec::new(),
            pushable,
        };
        list.allow(fillable);
        list
    }

    /// Keys that may be set or removed
    pub fn fillable(&self) -> &[Key] {
        &self.fillable
    }

    /// Whether keyless appends are allowed
    pub fn is_pushable(&self) -> bool {
        self.pushable
    }

    /// Returns true if `key` may be set or removed
    pub fn permits(&self, key: &Key) -> bool {
        self.fillable.contains(key)
    }

    /// Adds keys to the fillable set
    pub fn allow(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            if !self.fillable.contains(&key) {
                self.fillable.push(key);
            }
        }
    }

    /// Removes keys from the fillable set
    pub fn deny(&mut self, keys: impl IntoIterator<Item = Key>) {
        let denied: Vec<Key> = keys.into_iter().collect();
        self.fillable.retain(|key| !denied.contains(key));
    }

    /// Toggles the push gate
    pub fn set_pushable(&mut self, pushable: bool) {
        self.pushable = pushable;
    }
}

/// Decides whether `set`, `push` and `remove` reach the store.
///
/// # Examples
///
/// ```
/// # use strata::{Allowlist, Key, MutationPolicy, Value};
/// let policy = MutationPolicy::Allowlisted(Allowlist::new([Key::from("x")], false));
/// assert!(policy.check_set(&Key::from("x"), &Value::Int(1)).is_ok());
/// assert!(policy.check_set(&Key::from("y"), &Value::Int(1)).is_err());
/// assert!(policy.check_push(&Value::Int(1)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationPolicy {
    /// No restriction
    #[default]
    Open,
    /// Immutable
    Locked,
    /// Mutable only within the allowlist
    Allowlisted(Allowlist),
}

impl MutationPolicy {
    /// Returns the variant
    pub fn kind(&self) -> PolicyKind {
        match self {
            MutationPolicy::Open => PolicyKind::Open,
            MutationPolicy::Locked => PolicyKind::Locked,
            MutationPolicy::Allowlisted(_) => PolicyKind::Allowlisted,
        }
    }

    /// A policy of the same variant with default parameters.
    ///
    /// Used for nested containers copied under a parent's policy.
    pub fn fresh(&self) -> Self {
        match self {
            MutationPolicy::Open => MutationPolicy::Open,
            MutationPolicy::Locked => MutationPolicy::Locked,
            MutationPolicy::Allowlisted(_) => MutationPolicy::Allowlisted(Allowlist::default()),
        }
    }

    /// The allowlist, when this is the allowlisted variant
    pub fn allowlist(&self) -> Option<&Allowlist> {
        match self {
            MutationPolicy::Allowlisted(list) => Some(list),
            _ => None,
        }
    }

    /// Mutable access to the allowlist, when this is the allowlisted variant
    pub fn allowlist_mut(&mut self) -> Option<&mut Allowlist> {
        match self {
            MutationPolicy::Allowlisted(list) => Some(list),
            _ => None,
        }
    }

    /// Checks an assignment of `value` to `key`
    pub fn check_set(&self, key: &Key, value: &Value) -> Result<(), DataError> {
        let allowed = match self {
            MutationPolicy::Open => true,
            MutationPolicy::Locked => false,
            MutationPolicy::Allowlisted(list) => list.permits(key),
        };
        self.verdict(allowed, Mutation::Set, Some(key), Some(value))
    }

    /// Checks a keyless append of `value`
    pub fn check_push(&self, value: &Value) -> Result<(), DataError> {
        let allowed = match self {
            MutationPolicy::Open => true,
            MutationPolicy::Locked => false,
            MutationPolicy::Allowlisted(list) => list.is_pushable(),
        };
        self.verdict(allowed, Mutation::Push, None, Some(value))
    }

    /// Checks a removal of `key`
    pub fn check_remove(&self, key: &Key) -> Result<(), DataError> {
        let allowed = match self {
            MutationPolicy::Open => true,
            MutationPolicy::Locked => false,
            MutationPolicy::Allowlisted(list) => list.permits(key),
        };
        self.verdict(allowed, Mutation::Remove, Some(key), None)
    }

    fn verdict(
        &self,
        allowed: bool,
        operation: Mutation,
        key: Option<&Key>,
        value: Option<&Value>,
    ) -> Result<(), DataError> {
        if allowed {
            return Ok(());
        }
        tracing::debug!(
            %operation,
            policy = %self.kind(),
            key = ?key,
            "mutation rejected"
        );
        Err(DataError::MutationRejected {
            operation,
            policy: self.kind(),
            key: key.map(ToString::to_string),
            value: value.map(Value::to_json_string),
        })
    }
}
