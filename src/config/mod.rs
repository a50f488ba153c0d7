// src/config/mod.rs

//! Deployment configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CommandTaskConfig, Config, ProjectSection, ServerConfig, SupervisordSection};
pub use validate::validate_config;
