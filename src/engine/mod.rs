// src/engine/mod.rs

//! Plan execution.
//!
//! [`runner`] walks a resolved plan strictly in order, one task at a time,
//! running each task on every host before moving on. There is no retry and
//! no parallelism: the first failure ends the run.

pub mod runner;

pub use runner::Runner;
