/*! Integration tests for Strata.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - path: Tests for dot-path reads, writes, removals and wildcard fan-out
 * - container: Tests for the Container type, its policies, projection and aliasing
 * - data: Tests for keys, maps, values and fallbacks
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("strata=info".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

mod container;
mod data;
mod helpers;
mod path;
