// src/dag/scheduler.rs

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use crate::dag::graph::HookGraph;
use crate::errors::{Result, TaskError};
use crate::task::TaskRegistry;

/// Resolves the global pipeline and per-request execution plans.
///
/// The pipeline is computed once from the registry; plans are subsets of it.
#[derive(Debug, Clone)]
pub struct Scheduler {
    graph: HookGraph,
    pipeline: Vec<String>,
}

impl Scheduler {
    pub fn from_registry(registry: &TaskRegistry) -> Result<Self> {
        let graph = HookGraph::from_registry(registry)?;
        let pipeline = graph.stable_order();
        info!(tasks = pipeline.len(), "resolved task pipeline");
        debug!(?pipeline, "pipeline order");
        Ok(Self { graph, pipeline })
    }

    /// Every registered task in execution order.
    pub fn pipeline(&self) -> &[String] {
        &self.pipeline
    }

    pub fn graph(&self) -> &HookGraph {
        &self.graph
    }

    /// Tasks to run for the requested `targets`.
    ///
    /// The plan holds each target plus every task hooked onto it, followed
    /// transitively (a task hooked onto a hooked task comes along too), in
    /// pipeline order.
    pub fn plan<I, S>(&self, targets: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        for target in targets {
            let target = target.as_ref();
            let known = self
                .pipeline
                .iter()
                .find(|id| id.as_str() == target)
                .ok_or_else(|| TaskError::UnknownTask(target.to_string()))?;
            queue.push_back(known.as_str());
        }

        while let Some(id) = queue.pop_front() {
            if !selected.insert(id) {
                continue;
            }
            for hooked in self.graph.attached_to(id) {
                if !selected.contains(hooked.as_str()) {
                    queue.push_back(hooked.as_str());
                }
            }
        }

        let plan: Vec<String> = self
            .pipeline
            .iter()
            .filter(|id| selected.contains(id.as_str()))
            .cloned()
            .collect();

        debug!(?plan, "resolved plan for requested tasks");
        Ok(plan)
    }
}
