use std::cell::RefCell;
use std::rc::Rc;

use supervisor_tasks::exec::{CommandOutput, Host, RemoteExecutor};

/// Scripted reply for commands starting with a given prefix.
#[derive(Debug, Clone)]
pub enum Reply {
    Output(CommandOutput),
    /// The transport fails; no output exists.
    Unreachable,
}

#[derive(Debug, Default)]
struct State {
    commands: Vec<String>,
    replies: Vec<(String, Reply)>,
}

/// A fake executor that:
/// - records every command it is asked to run
/// - answers from a prefix-matched script (first matching rule wins)
/// - reports success with empty output for anything unscripted.
///
/// Clones share state, so a test can keep one handle while a `Host` owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    state: Rc<RefCell<State>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `output`.
    ///
    /// Replacing an existing rule for the same prefix keeps its position.
    pub fn respond(&self, prefix: &str, output: CommandOutput) {
        self.set_reply(prefix, Reply::Output(output));
    }

    pub fn unreachable(&self, prefix: &str) {
        self.set_reply(prefix, Reply::Unreachable);
    }

    fn set_reply(&self, prefix: &str, reply: Reply) {
        let mut state = self.state.borrow_mut();
        match state.replies.iter().position(|(p, _)| p == prefix) {
            Some(pos) => state.replies[pos].1 = reply,
            None => state.replies.push((prefix.to_string(), reply)),
        }
    }

    /// Commands run so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.state.borrow().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// A `Host` named `name` backed by this executor.
    pub fn host(&self, name: &str) -> Host {
        Host::new(name, self.clone())
    }
}

impl RemoteExecutor for FakeExecutor {
    fn run(&mut self, command: &str) -> std::io::Result<CommandOutput> {
        let mut state = self.state.borrow_mut();
        state.commands.push(command.to_string());

        let reply = state
            .replies
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Unreachable) => Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "fake host unreachable",
            )),
            None => Ok(CommandOutput::success("")),
        }
    }
}
