//! Unified test logging initialization.
//!
//! One entry point for unit and integration tests. A one-time guard prevents
//! double initialization and output goes through the test writer so cargo
//! captures it.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. Level precedence:
///
/// 1. `TEST_LOG`
/// 2. `RUST_LOG`
/// 3. `"warn"`
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
