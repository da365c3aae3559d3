#![allow(dead_code)]
//! Shared integration test utilities.

use std::sync::Once;
use threadweave::{Event, EventSequence};

static INIT_LOGGING: Once = Once::new();

/// Initializes tracing output for a test binary. Safe to call from every
/// test; only the first call installs the subscriber.
///
/// Set `RUST_LOG` (e.g. `RUST_LOG=threadweave=trace`) to see harness
/// internals while debugging a failing interleaving.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// One BEGIN/END pair for `operation` on `thread`.
pub fn operation_pair(thread: &str, operation: &str) -> EventSequence {
    vec![Event::begin(thread, operation), Event::end(thread, operation)]
}
