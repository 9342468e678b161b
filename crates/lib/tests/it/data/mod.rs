//! Data integration tests
//!
//! Keys, maps, values and fallbacks as seen from outside the crate.

mod fallback_tests;
mod key_tests;
mod value_tests;
