//!
//! Strata: ordered nested data with dot-path access and guarded mutation.
//!
//! ## Core Concepts
//!
//! * **Values (`data::Value`)**: A closed set of variants covering scalars, raw nested maps
//!   (`data::Map`), named-field records and container handles.
//! * **Paths (`path`)**: Free functions that read, write and remove values inside nested data
//!   using dot paths such as `users.*.name`, with wildcard fan-out and the `{first}`/`{last}`
//!   positional aliases.
//! * **Containers (`container::Container`)**: Ordered key/value stores carrying:
//!     * a **mutation policy** (`container::MutationPolicy`): open, locked, or allowlisted;
//!     * a **visibility projection** (`container::projection`) applied on serialization;
//!     * an optional **shared store** (`container::SharedMap`) for aliasing wrappers.
//! * **Fallbacks (`data::Fallback`)**: Literal or lazily produced defaults returned whenever a
//!   lookup misses.

pub mod container;
pub mod data;
pub mod path;

pub use container::{
    Allowlist, Container, ContainerConfig, MutationPolicy, PolicyKind, SharedMap, projection,
};
pub use data::{DataError, Fallback, Key, Map, Value, value_of};
pub use path::KeyPath;

/// Result type used throughout the Strata library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Strata library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured data errors from the data module
    #[error(transparent)]
    Data(data::DataError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Data(_) => "data",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error is a policy rejecting a mutation.
    pub fn is_mutation_rejected(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_mutation_rejected(),
            _ => false,
        }
    }

    /// Check if this error comes from reading the ends of an empty container.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_empty_container(),
            _ => false,
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is an allowlist operation on a container without an allowlist.
    pub fn is_policy_mismatch(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_policy_mismatch(),
            _ => false,
        }
    }

    /// Check if this error is an append whose next integer key was taken.
    pub fn is_index_occupied(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_index_occupied(),
            _ => false,
        }
    }

    /// Check if this error is a container being stored inside itself.
    pub fn is_self_reference(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_self_reference(),
            _ => false,
        }
    }

    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// The underlying data error, if any.
    pub fn as_data(&self) -> Option<&data::DataError> {
        match self {
            Error::Data(data_err) => Some(data_err),
            _ => None,
        }
    }
}
