// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::Config;
use crate::config::validate::validate_config;
use crate::errors::{Result, TaskError};

/// Load a configuration file from a given path and return the raw `Config`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        TaskError::ConfigError(format!("reading config file at {:?}: {e}", path))
    })?;

    let config: Config = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// `require_servers` is false for dry runs and `--list`, where no host is
/// contacted.
pub fn load_and_validate(path: impl AsRef<Path>, require_servers: bool) -> Result<Config> {
    let config = load_from_path(&path)?;
    validate_config(&config, require_servers)?;
    Ok(config)
}

/// `Deploy.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Deploy.toml")
}
