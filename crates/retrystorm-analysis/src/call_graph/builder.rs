//! Graph Builder: converts a validated topology into a [`CallGraph`].

use retrystorm_core::errors::ConfigError;

use super::types::{CallEdge, CallGraph, CallGraphStats, ServiceNode};
use crate::topology::Topology;

/// Builds call graphs from topologies.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallGraphBuilder;

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the graph: one node per service, one edge per call-list entry.
    ///
    /// Fails with [`ConfigError::UndeclaredService`] if any call names a
    /// service the topology does not declare.
    pub fn build(&self, topology: &Topology) -> Result<(CallGraph, CallGraphStats), ConfigError> {
        let mut graph = CallGraph::new();

        // Phase 1: nodes
        for service in topology.services() {
            graph.add_service(ServiceNode {
                name: service.name.clone(),
                timeout: service.timeout,
                max_attempts: service.retry.max_attempts,
                has_circuit_breaker: service.has_circuit_breaker(),
            });
        }

        // Phase 2: edges, in declared order
        for service in topology.services() {
            let Some(caller) = graph.get_node(&service.name) else {
                continue;
            };
            for (ordinal, callee_name) in service.calls.iter().enumerate() {
                let callee = graph.get_node(callee_name).ok_or_else(|| {
                    ConfigError::UndeclaredService {
                        caller: service.name.clone(),
                        callee: callee_name.clone(),
                    }
                })?;
                graph.add_edge(caller, callee, CallEdge { ordinal });
            }
        }

        let stats = CallGraphStats::of(&graph);
        tracing::debug!(
            services = stats.total_services,
            edges = stats.total_edges,
            entry_points = stats.entry_points,
            "call graph built"
        );
        Ok((graph, stats))
    }
}
