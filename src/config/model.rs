// src/config/model.rs

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level deployment configuration as read from a TOML file.
///
/// ```toml
/// [project]
/// name = "myapp"
///
/// [supervisord]
/// user = "deploy"
///
/// [environment]
/// PORT = "8080"
///
/// [[server]]
/// host = "example.com"
/// user = "deploy"
///
/// [task."deploy:link"]
/// cmd = "ln -sfn /home/deploy/myapp/releases/1 /home/deploy/myapp/current"
/// ```
///
/// Everything except `[project].name` has a default. The file is read once
/// before any task runs and handed to task bodies by reference; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project: ProjectSection,

    #[serde(default)]
    pub supervisord: SupervisordSection,

    /// Environment variables exported to the supervised program.
    ///
    /// A `BTreeMap` keeps the rendered `environment=` line stable across runs.
    #[serde(default)]
    pub environment: Option<BTreeMap<String, String>>,

    /// Hosts every task runs on, in order.
    #[serde(default)]
    pub server: Vec<ServerConfig>,

    /// Host-framework tasks expressed as plain shell commands, keyed by their
    /// qualified id (e.g. `"deploy:link"`).
    ///
    /// Kept in file order: tasks without hooks run in the order they are
    /// written.
    #[serde(default)]
    pub task: IndexMap<String, CommandTaskConfig>,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    pub name: String,

    /// Root directory projects are deployed under on the remote host.
    #[serde(default = "default_deploy_directory")]
    pub deploy_directory: String,

    /// Directory the supervised program runs in.
    ///
    /// Defaults to `<deploy_directory>/<name>/current`.
    #[serde(default)]
    pub current_directory: Option<String>,

    /// Path of the built executable on the remote host.
    ///
    /// Defaults to `<current_directory>/.build/release/<name>`.
    #[serde(default)]
    pub executable: Option<String>,

    /// Defaults to `/var/log/<name>/output.log`.
    #[serde(default)]
    pub output_log: Option<String>,

    /// Defaults to `/var/log/<name>/error.log`.
    #[serde(default)]
    pub error_log: Option<String>,
}

fn default_deploy_directory() -> String {
    "/home/deploy".to_string()
}

/// `[supervisord]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SupervisordSection {
    /// Program name override; falls back to `[project].name`.
    #[serde(default)]
    pub name: Option<String>,

    /// Unix user that should own supervisord's control socket.
    #[serde(default)]
    pub user: Option<String>,

    /// Namespace the supervisord tasks are registered under.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    "svr".to_string()
}

impl Default for SupervisordSection {
    fn default() -> Self {
        Self {
            name: None,
            user: None,
            namespace: default_namespace(),
        }
    }
}

/// `[[server]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub identity_file: Option<String>,
}

impl ServerConfig {
    /// `user@host`, or just `host` when no user is configured.
    pub fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}@{}", self.host),
            None => self.host.clone(),
        }
    }
}

/// `[task."<namespace>:<name>"]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandTaskConfig {
    /// Shell command run on every server.
    pub cmd: String,

    /// Qualified ids this task must run before.
    #[serde(default)]
    pub before: Vec<String>,

    /// Qualified ids this task must run after.
    #[serde(default)]
    pub after: Vec<String>,
}

impl Config {
    pub fn project_name(&self) -> &str {
        &self.project.name
    }

    pub fn current_directory(&self) -> String {
        self.project.current_directory.clone().unwrap_or_else(|| {
            format!(
                "{}/{}/current",
                self.project.deploy_directory.trim_end_matches('/'),
                self.project.name
            )
        })
    }

    pub fn executable(&self) -> String {
        self.project.executable.clone().unwrap_or_else(|| {
            format!(
                "{}/.build/release/{}",
                self.current_directory(),
                self.project.name
            )
        })
    }

    pub fn output_log(&self) -> String {
        self.project
            .output_log
            .clone()
            .unwrap_or_else(|| format!("/var/log/{}/output.log", self.project.name))
    }

    pub fn error_log(&self) -> String {
        self.project
            .error_log
            .clone()
            .unwrap_or_else(|| format!("/var/log/{}/error.log", self.project.name))
    }

    pub fn supervisord_name(&self) -> Option<&str> {
        self.supervisord.name.as_deref()
    }

    pub fn supervisord_user(&self) -> Option<&str> {
        self.supervisord.user.as_deref()
    }

    pub fn environment_variables(&self) -> Option<&BTreeMap<String, String>> {
        self.environment.as_ref()
    }
}
