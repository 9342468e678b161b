//! Construction options for containers.

use serde::{Deserialize, Serialize};

use super::{
    PolicyKind,
    policy::{Allowlist, MutationPolicy},
};
use crate::data::Key;

/// Options applied when a [`Container`](super::Container) is built.
///
/// Every field has a default, so a config can be written sparsely:
///
/// ```
/// # use strata::{ContainerConfig, Key, PolicyKind};
/// let config = ContainerConfig::from_json(r#"{
///     "policy": "allowlisted",
///     "fillable": ["name"],
///     "hidden": ["password"]
/// }"#).unwrap();
///
/// assert_eq!(config.policy, PolicyKind::Allowlisted);
/// assert_eq!(config.fillable, vec![Key::from("name")]);
/// assert!(config.preserve_policy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Mutation policy variant
    pub policy: PolicyKind,
    /// Keys excluded from the visible projection
    pub hidden: Vec<Key>,
    /// Exclusive allowlist for the visible projection when non-empty
    pub visible: Vec<Key>,
    /// Keys that may be set or removed under the allowlisted policy
    pub fillable: Vec<Key>,
    /// Whether `push` is allowed under the allowlisted policy
    pub pushable: bool,
    /// Nested containers copied during construction take this container's
    /// policy variant; otherwise they are open.
    pub preserve_policy: bool,
    /// Convert raw nested maps into containers during construction
    pub wrap_nested: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Open,
            hidden: Vec::new(),
            visible: Vec::new(),
            fillable: Vec::new(),
            pushable: false,
            preserve_policy: true,
            wrap_nested: false,
        }
    }
}

impl ContainerConfig {
    /// Loads a config from JSON text
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Config for an open container
    pub fn open() -> Self {
        Self::default()
    }

    /// Config for a locked container
    pub fn locked() -> Self {
        Self {
            policy: PolicyKind::Locked,
            ..Default::default()
        }
    }

    /// Config for an allowlisted container with the given fillable keys
    pub fn allowlisted<I, K>(fillable: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self {
            policy: PolicyKind::Allowlisted,
            fillable: fillable.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Builder method to set the hidden keys
    pub fn with_hidden<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.hidden = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the visible keys
    pub fn with_visible<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.visible = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to toggle the push gate
    pub fn with_pushable(mut self, pushable: bool) -> Self {
        self.pushable = pushable;
        self
    }

    /// Builder method to toggle policy preservation for nested copies
    pub fn with_preserve_policy(mut self, preserve: bool) -> Self {
        self.preserve_policy = preserve;
        self
    }

    /// Builder method to toggle wrapping of raw nested maps
    pub fn with_wrap_nested(mut self, wrap: bool) -> Self {
        self.wrap_nested = wrap;
        self
    }

    /// The policy this config describes
    pub fn policy(&self) -> MutationPolicy {
        match self.policy {
            PolicyKind::Open => MutationPolicy::Open,
            PolicyKind::Locked => MutationPolicy::Locked,
            PolicyKind::Allowlisted => MutationPolicy::Allowlisted(Allowlist::new(
                self.fillable.iter().cloned(),
                self.pushable,
            )),
        }
    }

    /// Config for a nested copy built under this config and `policy`.
    ///
    /// Visibility lists do not carry over.
    pub(crate) fn nested(&self, policy: &MutationPolicy) -> Self {
        let policy = if self.preserve_policy {
            policy.kind()
        } else {
            PolicyKind::Open
        };
        Self {
            policy,
            preserve_policy: self.preserve_policy,
            wrap_nested: self.wrap_nested,
            ..Default::default()
        }
    }
}
