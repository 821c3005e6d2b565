//! Shared helpers for integration tests.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a test-friendly subscriber once per test binary.
///
/// Output goes through the libtest capture and is filtered by `RUST_LOG`,
/// e.g. `RUST_LOG=netmock_harness=trace cargo test`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(filter)
        .try_init();
}
