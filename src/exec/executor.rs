// src/exec/executor.rs

//! Pluggable remote executor abstraction.
//!
//! Task bodies never talk to a transport directly; they go through a
//! [`Host`](crate::exec::Host), which owns some `RemoteExecutor`. Production
//! code uses [`SshExecutor`](crate::exec::SshExecutor); dry runs use
//! [`DryRunExecutor`](crate::exec::DryRunExecutor); tests provide their own
//! implementation that records commands and replies from a script.

/// Raw result of one remote command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Combined stdout + stderr.
    pub output: String,
}

impl CommandOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            output: output.into(),
        }
    }

    pub fn failure(code: i32, output: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            output: output.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a single command string on one remote host.
///
/// Implementations return `Ok` whenever the command actually ran, whatever
/// its exit code; `Err` is reserved for transport failures where no command
/// output exists.
pub trait RemoteExecutor {
    fn run(&mut self, command: &str) -> std::io::Result<CommandOutput>;
}
