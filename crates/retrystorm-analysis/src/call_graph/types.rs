//! Call graph types: service nodes, call edges, stats.

use std::time::Duration;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use retrystorm_core::types::collections::{FxHashMap, SmallVec8};
use serde::{Deserialize, Serialize};

use super::paths::entry_points;

/// The call graph: exactly the declared caller → callee edges, nothing implied.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    /// The underlying petgraph DiGraph.
    pub graph: DiGraph<ServiceNode, CallEdge>,
    /// Map from service name → NodeIndex for O(1) lookup.
    pub node_index: FxHashMap<String, NodeIndex>,
}

impl CallGraph {
    /// Create an empty call graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up a node by service name.
    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// The service stored at `idx`. Panics on an index from another graph.
    pub fn service(&self, idx: NodeIndex) -> &ServiceNode {
        &self.graph[idx]
    }

    /// Add a service node, returning its NodeIndex. Re-adding a name is a no-op.
    pub fn add_service(&mut self, node: ServiceNode) -> NodeIndex {
        if let Some(&existing) = self.node_index.get(&node.name) {
            return existing;
        }
        let name = node.name.clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(name, idx);
        idx
    }

    /// Add a call edge. `edge.ordinal` fixes its position among the caller's calls.
    pub fn add_edge(&mut self, caller: NodeIndex, callee: NodeIndex, edge: CallEdge) {
        self.graph.add_edge(caller, callee, edge);
    }

    /// Outbound callees of `idx` in declared call-list order.
    ///
    /// petgraph walks adjacency lists newest-first, so edges are re-sorted by ordinal.
    pub fn callees(&self, idx: NodeIndex) -> SmallVec8<NodeIndex> {
        let mut edges: SmallVec8<(usize, NodeIndex)> = self
            .graph
            .edges(idx)
            .map(|e| (e.weight().ordinal, e.target()))
            .collect();
        edges.sort_unstable_by_key(|(ordinal, _)| *ordinal);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// All declared edges as (caller, callee), callers in name order and
    /// callees in declared order.
    pub fn edges_in_order(&self) -> Vec<(NodeIndex, NodeIndex)> {
        self.nodes_by_name()
            .into_iter()
            .flat_map(|caller| {
                self.callees(caller)
                    .into_iter()
                    .map(move |callee| (caller, callee))
            })
            .collect()
    }

    pub fn has_incoming(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .is_some()
    }

    /// All nodes sorted by service name.
    pub fn nodes_by_name(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        nodes.sort_by(|a, b| self.graph[*a].name.cmp(&self.graph[*b].name));
        nodes
    }

    /// Service names along a sequence of nodes.
    pub fn names(&self, nodes: &[NodeIndex]) -> Vec<String> {
        nodes.iter().map(|n| self.graph[*n].name.clone()).collect()
    }
}

/// A service node in the call graph: the resilience-relevant slice of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceNode {
    pub name: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub has_circuit_breaker: bool,
}

/// A call edge in the call graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    /// Position of the callee in the caller's declared call list.
    pub ordinal: usize,
}

/// Statistics from a call graph build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallGraphStats {
    pub total_services: usize,
    pub total_edges: usize,
    pub entry_points: usize,
    pub self_loops: usize,
}

impl CallGraphStats {
    pub fn of(graph: &CallGraph) -> Self {
        Self {
            total_services: graph.service_count(),
            total_edges: graph.edge_count(),
            entry_points: entry_points(graph).len(),
            self_loops: graph
                .graph
                .edge_references()
                .filter(|e| e.source() == e.target())
                .count(),
        }
    }
}
