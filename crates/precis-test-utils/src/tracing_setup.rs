//! Tracing initialisation helpers for tests.
//!
//! The subscriber is initialised at most once per process, so it is safe to
//! call [`init_test_tracing`] from every test function.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_TEST_FILTER: &str = "precis_core=debug,info";

/// Install a subscriber that writes to the test-harness writer and honors
/// `RUST_LOG`, falling back to [`DEFAULT_TEST_FILTER`].
///
/// # Example
///
/// ```ignore
/// #[test]
/// fn my_test() {
///     precis_test_utils::tracing_setup::init_test_tracing();
///     tracing::info!("visible under --nocapture");
/// }
/// ```
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER)),
        )
        .with_test_writer()
        .try_init();
}
