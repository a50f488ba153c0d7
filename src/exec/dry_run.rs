// src/exec/dry_run.rs

use crate::exec::executor::{CommandOutput, RemoteExecutor};

/// Prints each command instead of running it and reports success with empty
/// output.
///
/// Probes that branch on output (such as the `chown=` grep in
/// `dependencies`) therefore always take their "already present" path.
#[derive(Debug, Clone)]
pub struct DryRunExecutor {
    host: String,
}

impl DryRunExecutor {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl RemoteExecutor for DryRunExecutor {
    fn run(&mut self, command: &str) -> std::io::Result<CommandOutput> {
        println!("  [{}] $ {}", self.host, command);
        Ok(CommandOutput::success(""))
    }
}
