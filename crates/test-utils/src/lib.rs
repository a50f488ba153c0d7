//! Shared helpers for the integration tests: a scripted executor, a config
//! builder and log capture.

pub mod builders;
pub mod fake_executor;

use std::sync::Once;

use supervisor_tasks::logging::{LOG_ENV, build_filter};
use tracing_subscriber::fmt;

static INIT: Once = Once::new();

/// Route `tracing` output through the test harness's capture.
///
/// Reads the same `SUPERVISOR_TASKS_LOG` directives as the binary but
/// defaults to `warn`, so passing tests stay quiet and a failing one shows
/// the hints and failures that led up to it.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env = std::env::var(LOG_ENV).ok();
        let _ = fmt()
            .with_env_filter(build_filter(None, env.as_deref(), "warn"))
            .with_test_writer()
            .try_init();
    });
}
