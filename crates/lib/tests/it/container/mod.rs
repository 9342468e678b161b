//! Container integration tests
//!
//! Organized by concern: plain access, mutation policies, visibility
//! projection, serialization and shared-store aliasing.

mod aliasing_tests;
mod policy_tests;
mod projection_tests;
mod serialization_tests;
