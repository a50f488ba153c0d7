// src/engine/runner.rs

use colored::Colorize;
use tracing::{error, info};

use crate::config::Config;
use crate::errors::Result;
use crate::exec::Host;
use crate::task::{TaskContext, TaskRegistry};

pub struct Runner<'a> {
    registry: &'a TaskRegistry,
    config: &'a Config,
}

impl<'a> Runner<'a> {
    pub fn new(registry: &'a TaskRegistry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    /// Run every task of `plan` on every host, task-major.
    pub fn run(&self, plan: &[String], hosts: &mut [Host]) -> Result<()> {
        info!(tasks = plan.len(), hosts = hosts.len(), "starting run");

        for id in plan {
            for host in hosts.iter_mut() {
                println!("    {}\ton {}", id.bold().green(), host.name());
                let mut ctx = TaskContext::new(self.registry, self.config, host);
                if let Err(err) = ctx.invoke(id) {
                    error!(task = %id, host = %host.name(), error = %err, "task failed");
                    return Err(err);
                }
            }
        }

        info!("run complete");
        Ok(())
    }
}
