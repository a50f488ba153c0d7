// src/task/context.rs

use tracing::info;

use crate::config::Config;
use crate::errors::{Result, TaskError};
use crate::exec::Host;
use crate::task::TaskRegistry;

/// What a task body sees while it runs on one host.
///
/// The context is created per (task, host) by the runner. Sub-invocations
/// through [`invoke`](Self::invoke) reuse it, so a nested task runs on the
/// same host with the same configuration.
pub struct TaskContext<'a> {
    registry: &'a TaskRegistry,
    config: &'a Config,
    host: &'a mut Host,
    /// Ids currently executing on this context, outermost first.
    stack: Vec<String>,
}

impl<'a> TaskContext<'a> {
    pub fn new(registry: &'a TaskRegistry, config: &'a Config, host: &'a mut Host) -> Self {
        Self {
            registry,
            config,
            host,
            stack: Vec::new(),
        }
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    pub fn host(&mut self) -> &mut Host {
        &mut *self.host
    }

    pub fn host_name(&self) -> &str {
        self.host.name()
    }

    /// Ids of the tasks currently running here, outermost first.
    pub fn call_stack(&self) -> &[String] {
        &self.stack
    }

    /// Look up `id` and run its body to completion right now.
    ///
    /// Every call runs the body again; nothing is cached. A failure in the
    /// invoked task is returned unchanged, so `?` at the call site skips the
    /// caller's remaining steps.
    pub fn invoke(&mut self, id: &str) -> Result<()> {
        let registry = self.registry;
        let task = registry
            .get(id)
            .ok_or_else(|| TaskError::UnknownTask(id.to_string()))?;

        if self.stack.iter().any(|running| running == id) {
            return Err(TaskError::RecursiveInvocation(id.to_string()));
        }

        info!(
            task = %id,
            host = %self.host.name(),
            depth = self.stack.len(),
            "running task"
        );

        self.stack.push(id.to_string());
        let result = task.run(self);
        self.stack.pop();
        result
    }
}
