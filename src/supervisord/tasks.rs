// src/supervisord/tasks.rs

use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use crate::errors::{Result, TaskError};
use crate::exec::{Host, OutputMatcher};
use crate::supervisord::{SUPERVISORD_CONF, SupervisordProvider};
use crate::task::{Hook, Task, TaskId};

/// Install supervisor, hand the control socket and our program file to the
/// configured user, then restart the daemon.
pub fn dependencies<P: SupervisordProvider + 'static>(provider: Rc<P>) -> Task {
    let id = TaskId::new(provider.task_namespace(), "dependencies");
    Task::new(id, move |ctx| {
        let config = ctx.config();
        let conf_path = provider.conf_file_path(config);
        let host = ctx.host();

        host.execute("sudo apt-get -qq install supervisor")?;

        if let Some(user) = config.supervisord_user() {
            ensure_socket_owner(host, user)?;
            host.execute(&format!("sudo touch {conf_path}"))?;

            host.execute_with_matchers(
                &format!("sudo chown {user} {conf_path}"),
                &[missing_user_hint(user)?],
            )?;
        }

        host.execute("sudo service supervisor restart")?;
        Ok(())
    })
    .with_hook(Hook::after("tools:dependencies"))
}

/// Add `chown=<user>` under `[unix_http_server]` unless it is already there.
///
/// grep exits 1 when the line is absent; any other failure is a real error.
fn ensure_socket_owner(host: &mut Host, user: &str) -> Result<()> {
    let chown_line = format!("chown={user}");
    let probe_cmd = format!("sudo grep \"{chown_line}\" < {SUPERVISORD_CONF}");
    let probe = host.capture(&probe_cmd)?;

    match probe.code {
        Some(0) => {
            debug!(user = %user, "supervisord socket owner already configured");
            Ok(())
        }
        Some(1) => {
            info!(user = %user, "adding socket owner to supervisord.conf");
            host.execute(&format!(
                "sudo sed -i '/\\[unix_http_server\\]/a {chown_line}' {SUPERVISORD_CONF}"
            ))?;
            Ok(())
        }
        code => Err(TaskError::CommandFailed {
            host: host.name().to_string(),
            command: probe_cmd,
            code,
            output: probe.output,
        }),
    }
}

/// Render the program file, upload it, and make supervisord pick it up.
pub fn write_conf<P: SupervisordProvider + 'static>(provider: Rc<P>) -> Task {
    let id = TaskId::new(provider.task_namespace(), "write-conf");
    Task::new(id, move |ctx| {
        let config = ctx.config();
        let conf_path = provider.conf_file_path(config);

        // supervisord will not create missing log directories itself
        let output_parent = parent_directory(&config.output_log());
        let error_parent = parent_directory(&config.error_log());
        if let Some(dir) = &output_parent {
            ctx.host().execute(&format!("mkdir -p {dir}"))?;
        }
        if let Some(dir) = &error_parent {
            if error_parent != output_parent {
                ctx.host().execute(&format!("mkdir -p {dir}"))?;
            }
        }

        let mut conf = provider.conf_file(config, ctx.host());
        if let Some(vars) = config.environment_variables() {
            conf.environment = Some(vars.clone());
        }

        ctx.host().execute_with_matchers(
            &format!("echo \"{}\" > {conf_path}", escape_double_quoted(&conf.render())),
            &[conf_write_hint(&conf_path)?],
        )?;

        supervisorctl(ctx.host(), "reread")?;
        supervisorctl(ctx.host(), "update")?;
        Ok(())
    })
}

pub fn start<P: SupervisordProvider + 'static>(provider: Rc<P>) -> Task {
    let namespace = provider.task_namespace().to_string();
    let id = TaskId::new(&namespace, "start");
    Task::new(id, move |ctx| {
        ctx.invoke(&format!("{namespace}:write-conf"))?;
        let name = provider.supervisord_name(ctx.config());
        supervisorctl(ctx.host(), &format!("start {name}:*"))?;
        Ok(())
    })
}

pub fn stop<P: SupervisordProvider + 'static>(provider: Rc<P>) -> Task {
    let id = TaskId::new(provider.task_namespace(), "stop");
    Task::new(id, move |ctx| {
        let name = provider.supervisord_name(ctx.config());
        supervisorctl(ctx.host(), &format!("stop {name}:*"))?;
        Ok(())
    })
}

pub fn restart<P: SupervisordProvider + 'static>(provider: Rc<P>) -> Task {
    let namespace = provider.task_namespace().to_string();
    let id = TaskId::new(&namespace, "restart");
    Task::new(id, move |ctx| {
        ctx.invoke(&format!("{namespace}:write-conf"))?;
        let name = provider.supervisord_name(ctx.config());
        supervisorctl(ctx.host(), &format!("restart {name}:*"))?;
        Ok(())
    })
    .with_hook(Hook::after("deploy:link"))
}

pub fn status<P: SupervisordProvider + 'static>(provider: Rc<P>) -> Task {
    let id = TaskId::new(provider.task_namespace(), "status");
    Task::new(id, move |ctx| {
        let name = provider.supervisord_name(ctx.config());
        let output = supervisorctl(ctx.host(), &format!("status {name}:*"))?;
        let output = output.trim_end();
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    })
}

fn supervisorctl(host: &mut Host, command: &str) -> Result<String> {
    host.execute_with_matchers(
        &format!("supervisorctl {command}"),
        &[supervisorctl_permission_hint()?],
    )
}

/// `chown` reports `invalid user: 'name'` for an account that does not exist.
pub fn missing_user_hint(user: &str) -> Result<OutputMatcher> {
    OutputMatcher::hint(
        "invalid user:",
        format!(
            "{user} ([supervisord].user) must already exist on the server before running the dependencies task"
        ),
    )
}

/// The shell redirect into `conf_path` was refused.
pub fn conf_write_hint(conf_path: &str) -> Result<OutputMatcher> {
    OutputMatcher::hint(
        "Permission denied",
        format!("Make sure this user has write access to {conf_path}"),
    )
}

/// supervisorctl could not open the control socket.
pub fn supervisorctl_permission_hint() -> Result<OutputMatcher> {
    OutputMatcher::hint(
        "Permission denied:",
        "Make sure this user has the ability to run supervisorctl commands \
         (set [supervisord].user and run the dependencies task)",
    )
}

/// Directory containing `path`, if it has a non-empty one.
fn parent_directory(path: &str) -> Option<String> {
    Path::new(path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
}

/// Escape text for use inside a double-quoted shell word.
fn escape_double_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_directory_of_log_paths() {
        assert_eq!(
            parent_directory("/var/log/myapp/output.log").as_deref(),
            Some("/var/log/myapp")
        );
        assert_eq!(parent_directory("/output.log").as_deref(), Some("/"));
        assert_eq!(parent_directory("output.log"), None);
    }

    #[test]
    fn missing_user_hint_matches_chown_error() {
        let hint = missing_user_hint("ghost").unwrap();
        assert!(hint.check("chown: invalid user: 'ghost'\n"));
        assert!(!hint.check("chown: cannot access '/x': No such file or directory"));
    }

    #[test]
    fn conf_write_hint_matches_redirect_error() {
        let hint = conf_write_hint("/etc/supervisor/conf.d/myapp.conf").unwrap();
        assert!(hint.check("bash: line 1: /etc/supervisor/conf.d/myapp.conf: Permission denied"));
        assert!(!hint.check(""));
    }

    #[test]
    fn supervisorctl_hint_matches_socket_error() {
        let hint = supervisorctl_permission_hint().unwrap();
        assert!(hint.check(
            "error: <class 'PermissionError'>, [Errno 13] Permission denied: \
             file: /usr/lib/python3/dist-packages/supervisor/xmlrpc.py line: 560"
        ));
        assert!(!hint.check("myapp:00   RUNNING   pid 4242, uptime 0:01:10"));
    }

    #[test]
    fn escaping_protects_shell_specials() {
        assert_eq!(
            escape_double_quoted(r#"A="x y" $HOME `id` \n"#),
            r#"A=\"x y\" \$HOME \`id\` \\n"#
        );
        assert_eq!(escape_double_quoted("%(process_num)s"), "%(process_num)s");
    }
}
