// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `supervisor-tasks`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "supervisor-tasks",
    version,
    about = "Configure and control a supervisord program on remote servers.",
    long_about = None
)]
pub struct CliArgs {
    /// Tasks to run, as `namespace:name` (e.g. `svr:restart`).
    ///
    /// Tasks hooked onto them run too. With no task, the whole pipeline runs.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Path to the deployment config file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SUPERVISOR_TASKS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the commands that would run instead of connecting to servers.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the resolved task pipeline and exit.
    #[arg(long)]
    pub list: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
