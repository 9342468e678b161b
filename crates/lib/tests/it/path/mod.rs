//! Dot-path integration tests
//!
//! Reads (`get`, `data_get`, `pluck`) and writes (`set`, `forget`, `except`)
//! over raw maps and containers.
