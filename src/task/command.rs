// src/task/command.rs

use crate::config::{CommandTaskConfig, Config};
use crate::errors::Result;
use crate::task::{Hook, Task, TaskId, TaskProvider};

/// Tasks declared in `[task."<namespace>:<name>"]` sections.
///
/// Each one runs its `cmd` on the host. This is how host-framework steps such
/// as `deploy:link` enter the pipeline so provider hooks can attach to them.
#[derive(Debug, Clone, Default)]
pub struct CommandTasks {
    tasks: Vec<(TaskId, CommandTaskConfig)>,
}

impl CommandTasks {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let tasks = cfg
            .task
            .iter()
            .map(|(id, task)| Ok((id.parse::<TaskId>()?, task.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tasks })
    }
}

impl TaskProvider for CommandTasks {
    fn create_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .map(|(id, cfg)| {
                let cmd = cfg.cmd.clone();
                let task = Task::new(id.clone(), move |ctx| {
                    ctx.host().execute(&cmd)?;
                    Ok(())
                });
                let task = cfg
                    .before
                    .iter()
                    .fold(task, |task, target| task.with_hook(Hook::before(target)));
                cfg.after
                    .iter()
                    .fold(task, |task, target| task.with_hook(Hook::after(target)))
            })
            .collect()
    }
}
