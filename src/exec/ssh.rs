// src/exec/ssh.rs

use std::process::{Command, Stdio};

use crate::config::ServerConfig;
use crate::exec::executor::{CommandOutput, RemoteExecutor};

/// Executes commands on a server through the system `ssh` client.
///
/// The command string is handed to ssh as a single argument and interpreted
/// by the remote user's shell. stdout and stderr are captured separately and
/// joined (stdout first), so their relative interleaving is not preserved.
#[derive(Debug, Clone)]
pub struct SshExecutor {
    server: ServerConfig,
}

impl SshExecutor {
    pub fn new(server: ServerConfig) -> Self {
        Self { server }
    }

    /// Arguments passed to `ssh` for `command`.
    pub fn ssh_args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(port) = self.server.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(identity) = &self.server.identity_file {
            args.push("-i".to_string());
            args.push(identity.clone());
        }
        args.push(self.server.destination());
        args.push(command.to_string());
        args
    }
}

impl RemoteExecutor for SshExecutor {
    fn run(&mut self, command: &str) -> std::io::Result<CommandOutput> {
        let output = Command::new("ssh")
            .args(self.ssh_args(command))
            .stdin(Stdio::null())
            .output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            code: output.status.code(),
            output: combined,
        })
    }
}
