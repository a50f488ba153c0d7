// src/logging.rs

//! Logging setup for `supervisor-tasks` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` CLI flag (one level for everything)
//! 2. `SUPERVISOR_TASKS_LOG`, any `EnvFilter` directive list, e.g.
//!    `info,supervisor_tasks::exec=debug` to see remote command output
//! 3. `info`
//!
//! Logs go to stderr; stdout carries task progress and `status` output.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "SUPERVISOR_TASKS_LOG";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref(), "info");

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

/// Filter for `cli_level`, else the `env` directives, else `default`.
///
/// Unparseable or blank directives fall back to `default` rather than
/// silencing everything.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>, default: &str) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }

    env.map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_overrides_env_directives() {
        let filter = build_filter(Some(LogLevel::Debug), Some("warn"), "info");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn env_directives_can_target_modules() {
        let filter = build_filter(None, Some("warn,supervisor_tasks::exec=debug"), "info");
        let rendered = filter.to_string();
        assert!(rendered.contains("supervisor_tasks::exec=debug"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn blank_env_falls_back_to_default() {
        assert_eq!(build_filter(None, Some("  "), "info").to_string(), "info");
        assert_eq!(build_filter(None, None, "warn").to_string(), "warn");
    }
}
