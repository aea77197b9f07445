//! Circuit Breaker Analyzer: one finding per unprotected calling service.

use crate::call_graph::CallGraph;
use crate::findings::{Evidence, Finding, FindingKind, FindingSubject};

#[derive(Debug, Clone, Copy, Default)]
pub struct CircuitBreakerAnalyzer;

impl CircuitBreakerAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, graph: &CallGraph) -> Vec<Finding> {
        let mut findings = Vec::new();
        for idx in graph.nodes_by_name() {
            let service = graph.service(idx);
            if service.has_circuit_breaker {
                continue;
            }
            let callees = graph.callees(idx);
            if callees.is_empty() {
                continue;
            }

            let mut targets: Vec<String> = Vec::with_capacity(callees.len());
            for callee in callees {
                let name = &graph.service(callee).name;
                if !targets.contains(name) {
                    targets.push(name.clone());
                }
            }

            findings.push(Finding::new(
                FindingKind::CircuitBreakerGap,
                FindingSubject::service(&service.name),
                format!(
                    "'{}' calls [{}] without circuit breaker",
                    service.name,
                    targets.join(", ")
                ),
                Evidence::CircuitBreakerGap {
                    unprotected_targets: targets,
                },
            ));
        }
        findings
    }
}
