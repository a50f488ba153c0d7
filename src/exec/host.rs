// src/exec/host.rs

use tracing::{debug, info};

use crate::errors::{Result, TaskError};
use crate::exec::executor::{CommandOutput, RemoteExecutor};
use crate::exec::matcher::{OutputMatcher, apply_matchers};

/// A named remote host plus the executor that reaches it.
///
/// This is what task bodies receive as "the server": every remote command a
/// task issues goes through one of the methods below.
pub struct Host {
    name: String,
    executor: Box<dyn RemoteExecutor>,
}

impl Host {
    pub fn new(name: impl Into<String>, executor: impl RemoteExecutor + 'static) -> Self {
        Self {
            name: name.into(),
            executor: Box::new(executor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `command` and return its raw output regardless of exit status.
    ///
    /// Only transport failures are errors here; callers that need to tell
    /// exit codes apart (e.g. `grep`'s "no match") use this directly.
    pub fn capture(&mut self, command: &str) -> Result<CommandOutput> {
        info!(host = %self.name, command = %command, "running remote command");

        let output = self
            .executor
            .run(command)
            .map_err(|source| TaskError::Transport {
                host: self.name.clone(),
                source,
            })?;

        debug!(
            host = %self.name,
            exit_code = ?output.code,
            output = %output.output.trim_end(),
            "remote command finished"
        );
        Ok(output)
    }

    /// Run `command`, failing with [`TaskError::CommandFailed`] on a non-zero
    /// exit.
    pub fn execute(&mut self, command: &str) -> Result<String> {
        self.execute_with_matchers(command, &[])
    }

    /// Run `command`, check its output against every matcher, then fail on a
    /// non-zero exit.
    ///
    /// Matchers run whether or not the command succeeded, so a recognised
    /// failure signature is reported before the error propagates.
    pub fn execute_with_matchers(
        &mut self,
        command: &str,
        matchers: &[OutputMatcher],
    ) -> Result<String> {
        let output = self.capture(command)?;
        apply_matchers(matchers, &output.output);

        if output.is_success() {
            Ok(output.output)
        } else {
            Err(TaskError::CommandFailed {
                host: self.name.clone(),
                command: command.to_string(),
                code: output.code,
                output: output.output,
            })
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").field("name", &self.name).finish_non_exhaustive()
    }
}
