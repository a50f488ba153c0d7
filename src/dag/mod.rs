// src/dag/mod.rs

//! Hook resolution.
//!
//! - [`graph`] turns the hooks of every registered task into a petgraph
//!   ordering graph and validates it (unknown targets, cycles).
//! - [`scheduler`] derives the global pipeline order from it and selects
//!   the tasks a request needs.

pub mod graph;
pub mod scheduler;

pub use graph::HookGraph;
pub use scheduler::Scheduler;
