//! Error types for container and nested-data operations.
//!
//! Lookup misses are never errors: they resolve through a
//! [`Fallback`](super::Fallback). The variants here cover mutations a policy
//! refuses, hard failures on empty containers, and type mismatches.

use std::fmt;

use thiserror::Error;

use crate::container::PolicyKind;

/// The kind of mutation a policy was asked to allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Set,
    Push,
    Remove,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Set => write!(f, "set"),
            Mutation::Push => write!(f, "push"),
            Mutation::Remove => write!(f, "remove"),
        }
    }
}

/// Structured error types for nested-data operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DataError {
    /// A locked or allowlisted policy refused a mutation
    #[error(
        "attempted to {operation} {} under the {policy} policy",
        describe_target(.key, .value)
    )]
    MutationRejected {
        operation: Mutation,
        policy: PolicyKind,
        key: Option<String>,
        value: Option<String>,
    },

    /// `first()` or `first_key()` on a container with no entries
    #[error("container is empty")]
    EmptyContainer,

    /// A value had a different shape than the operation needs
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// An allowlist operation on a container whose policy has no allowlist
    #[error("cannot {operation} under the {policy} policy")]
    PolicyMismatch {
        operation: &'static str,
        policy: PolicyKind,
    },

    /// `push` found its next integer key already taken
    #[error("cannot append: next index {index} is already occupied")]
    IndexOccupied { index: i64 },

    /// A container handle stored somewhere inside its own store
    #[error("cannot store a container inside itself")]
    SelfReference,
}

fn describe_target(key: &Option<String>, value: &Option<String>) -> String {
    match (key, value) {
        (Some(key), Some(value)) => format!("[{key}] => [{value}]"),
        (Some(key), None) => format!("[{key}]"),
        (None, Some(value)) => format!("[{value}]"),
        (None, None) => "an entry".to_string(),
    }
}

impl DataError {
    /// Check if a policy refused a mutation
    pub fn is_mutation_rejected(&self) -> bool {
        matches!(self, DataError::MutationRejected { .. })
    }

    /// Check if this is an empty-container failure
    pub fn is_empty_container(&self) -> bool {
        matches!(self, DataError::EmptyContainer)
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, DataError::TypeMismatch { .. })
    }

    /// Check if an allowlist operation hit the wrong policy
    pub fn is_policy_mismatch(&self) -> bool {
        matches!(self, DataError::PolicyMismatch { .. })
    }

    /// Check if an append ran out of free integer keys
    pub fn is_index_occupied(&self) -> bool {
        matches!(self, DataError::IndexOccupied { .. })
    }

    /// Check if a write would have made a container contain itself
    pub fn is_self_reference(&self) -> bool {
        matches!(self, DataError::SelfReference)
    }

    /// Get the refused mutation if this is a rejection
    pub fn mutation(&self) -> Option<Mutation> {
        match self {
            DataError::MutationRejected { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Get the attempted key if this is a rejection that carries one
    pub fn key(&self) -> Option<&str> {
        match self {
            DataError::MutationRejected { key, .. } => key.as_deref(),
            _ => None,
        }
    }
}

// Conversion from DataError to the main Error type
impl From<DataError> for crate::Error {
    fn from(err: DataError) -> Self {
        crate::Error::Data(err)
    }
}
