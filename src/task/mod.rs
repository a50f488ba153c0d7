// src/task/mod.rs

//! Tasks: named, hookable units of remote work.
//!
//! A task is a plain struct holding its qualified id, its ordering hooks and
//! a stored body closure. Providers build their tasks once and hand them to a
//! [`TaskRegistry`]; bodies receive a [`TaskContext`] through which they reach
//! the host, the configuration and other tasks.

pub mod command;
pub mod context;
pub mod registry;

use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, TaskError};

pub use command::CommandTasks;
pub use context::TaskContext;
pub use registry::TaskRegistry;

/// Fully-qualified task identity, displayed as `namespace:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    pub namespace: String,
    pub name: String,
}

impl TaskId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for TaskId {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
                Ok(TaskId::new(namespace, name))
            }
            _ => Err(TaskError::InvalidTaskId(s.to_string())),
        }
    }
}

/// Ordering constraint relative to another task, referenced by qualified id.
///
/// Targets are opaque strings here; whether they exist is decided when the
/// pipeline is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hook {
    Before(String),
    After(String),
}

impl Hook {
    pub fn before(target: impl Into<String>) -> Self {
        Hook::Before(target.into())
    }

    pub fn after(target: impl Into<String>) -> Self {
        Hook::After(target.into())
    }

    pub fn target(&self) -> &str {
        match self {
            Hook::Before(target) | Hook::After(target) => target,
        }
    }
}

pub type TaskBody = Box<dyn Fn(&mut TaskContext<'_>) -> Result<()>>;

pub struct Task {
    id: TaskId,
    hooks: Vec<Hook>,
    body: TaskBody,
}

impl Task {
    pub fn new(id: TaskId, body: impl Fn(&mut TaskContext<'_>) -> Result<()> + 'static) -> Self {
        Self {
            id,
            hooks: Vec::new(),
            body: Box::new(body),
        }
    }

    pub fn with_hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn namespace(&self) -> &str {
        &self.id.namespace
    }

    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn qualified_name(&self) -> String {
        self.id.to_string()
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// Execute the body once. Use [`TaskContext::invoke`] to run a task by id.
    pub fn run(&self, ctx: &mut TaskContext<'_>) -> Result<()> {
        (self.body)(ctx)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id.to_string())
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

/// A cohesive family of tasks, usually sharing a namespace.
pub trait TaskProvider {
    /// Tasks in their default order; the order breaks ties when the pipeline
    /// is resolved.
    fn create_tasks(&self) -> Vec<Task>;
}
