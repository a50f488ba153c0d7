// src/errors.rs

//! Crate-wide error type.
//!
//! Remote command failures are the common case; everything else is either a
//! configuration problem (bad TOML, bad hook graph) or a programming error in
//! a provider (unknown task id, recursive invocation).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    /// The command ran on the host but exited unsuccessfully.
    ///
    /// The message ends with whatever the command printed, since that is
    /// usually the only explanation of the failure.
    #[error(
        "command `{command}` failed on {host} ({}){}",
        describe_code(.code),
        describe_output(.output)
    )]
    CommandFailed {
        host: String,
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// The command could not be run at all (ssh missing, spawn error, ...).
    #[error("could not run command on {host}: {source}")]
    Transport {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Duplicate task: {0}")]
    DuplicateTask(String),

    #[error("Task '{0}' invoked itself while already running")]
    RecursiveInvocation(String),

    #[error("Invalid task id '{0}' (expected `namespace:name`)")]
    InvalidTaskId(String),

    #[error("task '{task}' hooks onto unknown task '{target}'")]
    UnknownHookTarget { task: String, target: String },

    #[error("Cycle detected in hook graph: {0}")]
    HookCycle(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid output pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn describe_output(output: &str) -> String {
    match output.trim() {
        "" => String::new(),
        trimmed => format!(":\n{trimmed}"),
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
