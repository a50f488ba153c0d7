// tests/pipeline_hooks.rs

use std::error::Error;

use supervisor_tasks::build_registry;
use supervisor_tasks::dag::Scheduler;
use supervisor_tasks::errors::TaskError;
use supervisor_tasks::supervisord::{DefaultSupervisord, SupervisordTasks};
use supervisor_tasks::task::{Hook, Task, TaskContext, TaskId, TaskRegistry};
use supervisor_tasks_test_utils::builders::ConfigBuilder;
use supervisor_tasks_test_utils::fake_executor::FakeExecutor;

type TestResult = Result<(), Box<dyn Error>>;

fn noop(id: &str) -> Task {
    Task::new(id.parse().expect("valid task id"), |_| Ok(()))
}

fn position(order: &[String], id: &str) -> usize {
    order
        .iter()
        .position(|t| t == id)
        .unwrap_or_else(|| panic!("{id} missing from {order:?}"))
}

#[test]
fn unhooked_tasks_keep_registration_order() -> TestResult {
    let mut registry = TaskRegistry::new();
    for id in ["c:third", "a:first", "b:second"] {
        registry.register(noop(id))?;
    }

    let scheduler = Scheduler::from_registry(&registry)?;

    assert_eq!(scheduler.pipeline(), &["c:third", "a:first", "b:second"]);
    Ok(())
}

#[test]
fn before_and_after_hooks_hold_simultaneously() -> TestResult {
    let mut registry = TaskRegistry::new();
    registry.register(noop("deploy:a"))?;
    registry.register(noop("deploy:b"))?;
    registry.register(
        noop("svr:mid")
            .with_hook(Hook::before("deploy:a"))
            .with_hook(Hook::after("deploy:b")),
    )?;

    let scheduler = Scheduler::from_registry(&registry)?;
    let order = scheduler.pipeline();

    assert!(position(order, "deploy:b") < position(order, "svr:mid"));
    assert!(position(order, "svr:mid") < position(order, "deploy:a"));
    assert_eq!(order, &["deploy:b", "svr:mid", "deploy:a"]);
    Ok(())
}

#[test]
fn default_pipeline_places_supervisord_tasks_around_host_tasks() -> TestResult {
    let cfg = ConfigBuilder::new("myapp")
        .command_task("tools:dependencies", "sudo apt-get -qq update")
        .command_task("deploy:link", "ln -sfn /home/deploy/myapp/releases/1 /home/deploy/myapp/current")
        .build();
    let registry = build_registry(&cfg)?;

    let scheduler = Scheduler::from_registry(&registry)?;

    assert_eq!(
        scheduler.pipeline(),
        &[
            "tools:dependencies",
            "deploy:link",
            "svr:dependencies",
            "svr:write-conf",
            "svr:start",
            "svr:stop",
            "svr:restart",
            "svr:status",
        ]
    );
    assert_eq!(scheduler.graph().predecessors_of("svr:restart"), vec!["deploy:link"]);
    assert_eq!(scheduler.graph().successors_of("tools:dependencies"), vec!["svr:dependencies"]);
    Ok(())
}

#[test]
fn unknown_hook_target_is_reported() {
    let mut registry = TaskRegistry::new();
    registry
        .register_provider(&SupervisordTasks::new(DefaultSupervisord::new("svr")))
        .unwrap();

    match Scheduler::from_registry(&registry) {
        Err(TaskError::UnknownHookTarget { task, target }) => {
            assert_eq!(task, "svr:dependencies");
            assert_eq!(target, "tools:dependencies");
        }
        Err(e) => panic!("Expected UnknownHookTarget, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn hook_cycle_is_reported() {
    let mut registry = TaskRegistry::new();
    registry
        .register(noop("x:a").with_hook(Hook::before("x:b")))
        .unwrap();
    registry
        .register(noop("x:b").with_hook(Hook::before("x:a")))
        .unwrap();

    match Scheduler::from_registry(&registry) {
        Err(TaskError::HookCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("x:a") || msg.contains("x:b"));
        }
        Err(e) => panic!("Expected HookCycle, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn plan_pulls_in_hooked_tasks_transitively() -> TestResult {
    let cfg = ConfigBuilder::new("myapp")
        .command_task("tools:dependencies", "sudo apt-get -qq update")
        .command_task("deploy:link", "ln -sfn a b")
        .build();
    let mut registry = build_registry(&cfg)?;
    registry.register(noop("notify:restarted").with_hook(Hook::after("svr:restart")))?;

    let scheduler = Scheduler::from_registry(&registry)?;

    assert_eq!(
        scheduler.plan(["deploy:link"])?,
        vec!["deploy:link", "svr:restart", "notify:restarted"]
    );
    assert_eq!(scheduler.plan(["svr:stop"])?, vec!["svr:stop"]);
    assert_eq!(
        scheduler.plan(["svr:status", "tools:dependencies"])?,
        vec!["tools:dependencies", "svr:dependencies", "svr:status"]
    );
    Ok(())
}

#[test]
fn plan_rejects_unknown_targets() -> TestResult {
    let cfg = ConfigBuilder::new("myapp")
        .command_task("tools:dependencies", "true")
        .command_task("deploy:link", "true")
        .build();
    let scheduler = Scheduler::from_registry(&build_registry(&cfg)?)?;

    assert!(matches!(
        scheduler.plan(["svr:deploy"]),
        Err(TaskError::UnknownTask(id)) if id == "svr:deploy"
    ));
    Ok(())
}

#[test]
fn invoking_unknown_task_is_an_error() -> TestResult {
    let cfg = ConfigBuilder::new("myapp").build();
    let mut registry = TaskRegistry::new();
    registry.register(Task::new(TaskId::new("app", "outer"), |ctx| {
        ctx.invoke("app:missing")?;
        ctx.host().execute("echo unreachable")?;
        Ok(())
    }))?;
    let fake = FakeExecutor::new();
    let mut host = fake.host("web1");

    let err = TaskContext::new(&registry, &cfg, &mut host)
        .invoke("app:outer")
        .unwrap_err();

    assert!(matches!(err, TaskError::UnknownTask(id) if id == "app:missing"));
    assert!(fake.commands().is_empty());
    Ok(())
}

#[test]
fn recursive_invocation_is_rejected() -> TestResult {
    let cfg = ConfigBuilder::new("myapp").build();
    let mut registry = TaskRegistry::new();
    registry.register(Task::new(TaskId::new("app", "ping"), |ctx| ctx.invoke("app:pong")))?;
    registry.register(Task::new(TaskId::new("app", "pong"), |ctx| ctx.invoke("app:ping")))?;
    let fake = FakeExecutor::new();
    let mut host = fake.host("web1");

    let err = TaskContext::new(&registry, &cfg, &mut host)
        .invoke("app:ping")
        .unwrap_err();

    assert!(matches!(err, TaskError::RecursiveInvocation(id) if id == "app:ping"));
    Ok(())
}

#[test]
fn nested_invocation_sees_call_stack() -> TestResult {
    let cfg = ConfigBuilder::new("myapp").build();
    let mut registry = TaskRegistry::new();
    registry.register(Task::new(TaskId::new("app", "outer"), |ctx| ctx.invoke("app:inner")))?;
    registry.register(Task::new(TaskId::new("app", "inner"), |ctx| {
        let stack = ctx.call_stack().join(" > ");
        ctx.host().execute(&format!("echo '{stack}'"))?;
        Ok(())
    }))?;
    let fake = FakeExecutor::new();
    let mut host = fake.host("web1");

    TaskContext::new(&registry, &cfg, &mut host).invoke("app:outer")?;

    assert_eq!(fake.commands(), vec!["echo 'app:outer > app:inner'"]);
    Ok(())
}
