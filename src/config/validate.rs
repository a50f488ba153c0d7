// src/config/validate.rs

use crate::config::model::Config;
use crate::errors::{Result, TaskError};
use crate::task::TaskId;

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - the project name is usable as a program name and in a file path
/// - log paths are absolute
/// - environment keys can be rendered into an `environment=` line
/// - config-declared task ids have a `namespace:name` shape
/// - at least one server exists, when `require_servers` is set
///
/// It does **not** check hook targets; those may point at tasks owned by
/// providers and are resolved by the scheduler.
pub fn validate_config(cfg: &Config, require_servers: bool) -> Result<()> {
    validate_project(cfg)?;
    validate_environment(cfg)?;
    validate_tasks(cfg)?;
    if require_servers {
        ensure_has_servers(cfg)?;
    }
    Ok(())
}

fn validate_project(cfg: &Config) -> Result<()> {
    let name = cfg.project_name();
    if name.trim().is_empty() {
        return Err(TaskError::ConfigError(
            "[project].name must not be empty".to_string(),
        ));
    }
    if name.contains(char::is_whitespace) || name.contains('/') {
        return Err(TaskError::ConfigError(format!(
            "[project].name '{name}' must not contain whitespace or '/'"
        )));
    }
    if let Some(program) = cfg.supervisord_name() {
        if program.trim().is_empty()
            || program.contains(char::is_whitespace)
            || program.contains('/')
        {
            return Err(TaskError::ConfigError(format!(
                "[supervisord].name '{program}' must be a non-empty word without '/'"
            )));
        }
    }

    for (field, path) in [("output_log", cfg.output_log()), ("error_log", cfg.error_log())] {
        if !path.starts_with('/') {
            return Err(TaskError::ConfigError(format!(
                "[project].{field} must be an absolute path (got '{path}')"
            )));
        }
    }
    Ok(())
}

fn validate_environment(cfg: &Config) -> Result<()> {
    let Some(vars) = cfg.environment_variables() else {
        return Ok(());
    };
    for (key, value) in vars {
        if key.is_empty() || key.contains('=') || key.contains(',') {
            return Err(TaskError::ConfigError(format!(
                "[environment] key '{key}' must be non-empty and contain no '=' or ','"
            )));
        }
        // values with commas are rendered inside double quotes
        if value.contains('"') {
            return Err(TaskError::ConfigError(format!(
                "[environment] value of '{key}' must not contain '\"'"
            )));
        }
    }
    Ok(())
}

fn validate_tasks(cfg: &Config) -> Result<()> {
    for (id, task) in cfg.task.iter() {
        id.parse::<TaskId>()?;
        if task.cmd.trim().is_empty() {
            return Err(TaskError::ConfigError(format!(
                "task '{id}' has an empty `cmd`"
            )));
        }
    }
    Ok(())
}

fn ensure_has_servers(cfg: &Config) -> Result<()> {
    if cfg.server.is_empty() {
        return Err(TaskError::ConfigError(
            "config must contain at least one [[server]] section".to_string(),
        ));
    }
    Ok(())
}
