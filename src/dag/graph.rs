// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::errors::{Result, TaskError};
use crate::task::{Hook, TaskRegistry};

/// Ordering graph derived from every registered task's hooks.
///
/// Edge direction is "runs before": `Before(A)` on task T adds `T -> A`,
/// `After(B)` adds `B -> T`. Node indices equal registration positions, which
/// is what lets [`stable_order`](Self::stable_order) fall back to provider
/// order between unconstrained tasks.
#[derive(Debug, Clone)]
pub struct HookGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
    /// Tasks whose hooks name the key as their target.
    attached: HashMap<String, Vec<String>>,
}

impl HookGraph {
    /// Build the graph, rejecting unknown hook targets and cycles.
    pub fn from_registry(registry: &TaskRegistry) -> Result<Self> {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut nodes = HashMap::new();

        for task in registry.tasks() {
            let id = task.qualified_name();
            let idx = graph.add_node(id.clone());
            nodes.insert(id, idx);
        }

        let mut attached: HashMap<String, Vec<String>> = HashMap::new();
        for task in registry.tasks() {
            let id = task.qualified_name();
            let this = nodes[&id];
            for hook in task.hooks() {
                let target = nodes.get(hook.target()).copied().ok_or_else(|| {
                    TaskError::UnknownHookTarget {
                        task: id.clone(),
                        target: hook.target().to_string(),
                    }
                })?;
                match hook {
                    Hook::Before(_) => graph.add_edge(this, target, ()),
                    Hook::After(_) => graph.add_edge(target, this, ()),
                };
                attached
                    .entry(hook.target().to_string())
                    .or_default()
                    .push(id.clone());
            }
        }

        if let Err(cycle) = toposort(&graph, None) {
            return Err(TaskError::HookCycle(format!(
                "cycle detected in task hooks involving task '{}'",
                graph[cycle.node_id()]
            )));
        }

        Ok(Self {
            graph,
            nodes,
            attached,
        })
    }

    /// Tasks that declared a hook on `id`, in registration order.
    pub fn attached_to(&self, id: &str) -> &[String] {
        self.attached.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Ids that must run immediately before `id`.
    pub fn predecessors_of(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Ids that must run immediately after `id`.
    pub fn successors_of(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Vec<&str> {
        self.nodes
            .get(id)
            .map(|&idx| {
                self.graph
                    .neighbors_directed(idx, dir)
                    .map(|n| self.graph[n].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Topological order that prefers the earliest-registered ready task.
    ///
    /// Kahn's algorithm with a min-heap keyed by registration index, so the
    /// result is deterministic and identical to registration order when no
    /// hooks exist. The graph is known to be acyclic.
    pub fn stable_order(&self) -> Vec<String> {
        use std::cmp::Reverse;
        use std::collections::BinaryHeap;

        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|n| self.graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(Reverse(i)) = ready.pop() {
            let idx = NodeIndex::new(i);
            order.push(self.graph[idx].clone());
            for next in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                let deg = &mut in_degree[next.index()];
                *deg -= 1;
                if *deg == 0 {
                    ready.push(Reverse(next.index()));
                }
            }
        }
        order
    }
}
