//! Tracing setup for tests
//!
//! Output is captured by the test harness and filtered with `RUST_LOG`
//! (default `warn`), e.g. `RUST_LOG=domain_chart=debug`.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static TRACING: OnceCell<()> = OnceCell::new();

/// Installs a test-writer subscriber once per process
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        // another harness may already have installed a subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
