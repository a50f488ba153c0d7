// src/exec/mod.rs

//! Remote execution layer.
//!
//! - [`executor`] defines the `RemoteExecutor` transport seam.
//! - [`host`] wraps an executor with logging, exit-status checks and output
//!   matchers; this is the handle task bodies use.
//! - [`matcher`] holds the regex-driven diagnostic side channel.
//! - [`ssh`] and [`dry_run`] are the two built-in executors.

pub mod dry_run;
pub mod executor;
pub mod host;
pub mod matcher;
pub mod ssh;

pub use dry_run::DryRunExecutor;
pub use executor::{CommandOutput, RemoteExecutor};
pub use host::Host;
pub use matcher::{OutputMatcher, apply_matchers};
pub use ssh::SshExecutor;
