// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod supervisord;
pub mod task;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Config, load_and_validate};
use crate::dag::Scheduler;
use crate::engine::Runner;
use crate::errors::Result;
use crate::exec::{DryRunExecutor, Host, SshExecutor};
use crate::supervisord::{DefaultSupervisord, SupervisordTasks};
use crate::task::{CommandTasks, TaskRegistry};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - task registration (config-declared tasks, then supervisord)
/// - pipeline resolution
/// - one host per `[[server]]` (ssh, or dry-run printing)
/// - the runner
pub fn run(args: CliArgs) -> Result<()> {
    let require_servers = !(args.dry_run || args.list);
    let cfg = load_and_validate(&args.config, require_servers)?;

    let registry = build_registry(&cfg)?;
    let scheduler = Scheduler::from_registry(&registry)?;

    if args.list {
        print_pipeline(&scheduler);
        return Ok(());
    }

    let plan = if args.tasks.is_empty() {
        scheduler.pipeline().to_vec()
    } else {
        scheduler.plan(&args.tasks)?
    };
    info!(?plan, "execution plan");

    let mut hosts = connect_hosts(&cfg, args.dry_run);
    Runner::new(&registry, &cfg).run(&plan, &mut hosts)
}

/// Register every task this binary knows about.
///
/// Config-declared command tasks come first so that, between unconstrained
/// tasks, host-framework steps precede the supervisord ones.
pub fn build_registry(cfg: &Config) -> Result<TaskRegistry> {
    let mut registry = TaskRegistry::new();
    registry.register_provider(&CommandTasks::from_config(cfg)?)?;
    registry.register_provider(&SupervisordTasks::new(DefaultSupervisord::new(
        cfg.supervisord.namespace.clone(),
    )))?;
    debug!(tasks = registry.len(), "task registry built");
    Ok(registry)
}

fn connect_hosts(cfg: &Config, dry_run: bool) -> Vec<Host> {
    if dry_run {
        let mut hosts: Vec<Host> = cfg
            .server
            .iter()
            .map(|s| Host::new(s.destination(), DryRunExecutor::new(s.destination())))
            .collect();
        if hosts.is_empty() {
            hosts.push(Host::new("dry-run", DryRunExecutor::new("dry-run")));
        }
        return hosts;
    }

    cfg.server
        .iter()
        .map(|s| Host::new(s.destination(), SshExecutor::new(s.clone())))
        .collect()
}

fn print_pipeline(scheduler: &Scheduler) {
    println!("supervisor-tasks pipeline ({} tasks):", scheduler.pipeline().len());
    for id in scheduler.pipeline() {
        println!("  - {id}");
        let before = scheduler.graph().predecessors_of(id);
        if !before.is_empty() {
            println!("      after: {:?}", before);
        }
    }
}
