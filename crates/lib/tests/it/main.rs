/*! Integration tests for gridmeta.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - container: Tests for the insertion-ordered immutable Map and Set
 * - reactive: Tests for the observable notification contract
 * - status: Tests for request statuses and row-status reconciliation
 * - params: Tests for the view-parameter objects and their compact forms
 * - view: End-to-end tests for the ViewState aggregate
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("gridmeta=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod container;
mod params;
mod view;
