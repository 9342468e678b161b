//! Nested data primitives.
//!
//! # Core Types
//!
//! - [`Key`] - integer or string key, with canonical integer strings normalised
//! - [`Map`] - insertion-ordered raw mapping; sequences are maps keyed `0..n`
//! - [`Value`] - closed set of scalars, maps, records and container handles
//! - [`Fallback`] - literal or lazily produced default for lookup misses
//! - [`DataError`] - structured errors for mutations and type mismatches

pub mod errors;
pub mod fallback;
pub mod key;
pub mod map;
pub mod value;

pub use errors::{DataError, Mutation};
pub use fallback::{Fallback, value_of};
pub use key::Key;
pub use map::Map;
pub use value::Value;
