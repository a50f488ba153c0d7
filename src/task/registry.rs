// src/task/registry.rs

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{Result, TaskError};
use crate::task::{Task, TaskProvider};

/// Every task known to a run, keyed by qualified id.
///
/// Registration order is preserved; the scheduler uses it as the default
/// sequence for tasks that no hook constrains.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: Task) -> Result<()> {
        let id = task.qualified_name();
        if self.index.contains_key(&id) {
            return Err(TaskError::DuplicateTask(id));
        }
        debug!(task = %id, hooks = ?task.hooks(), "registered task");
        self.index.insert(id, self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    pub fn register_provider(&mut self, provider: &dyn TaskProvider) -> Result<()> {
        for task in provider.create_tasks() {
            self.register(task)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index.get(id).map(|&i| &self.tasks[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Registration index of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
