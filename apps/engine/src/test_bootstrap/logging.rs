#![cfg(test)]

//! Test logging initialization for the engine's unit tests.
//!
//! Installs one test-writer subscriber for the whole test binary. The filter
//! comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`, so
//! rejected-action warnings stay visible while the per-action debug noise
//! needs `TEST_LOG=debug`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent; safe to call from any test.
///
/// ```bash
/// TEST_LOG=debug cargo test -p mousel -- tests_scenario
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
