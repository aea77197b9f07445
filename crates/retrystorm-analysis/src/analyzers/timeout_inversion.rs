//! Timeout Inversion Analyzer: pairwise, per declared edge.

use crate::call_graph::CallGraph;
use crate::findings::{Evidence, Finding, FindingKind, FindingSubject};
use crate::topology::format_duration;

/// Flags edges where the caller's timeout is strictly shorter than the callee's.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutInversionAnalyzer;

impl TimeoutInversionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, graph: &CallGraph) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (caller_idx, callee_idx) in graph.edges_in_order() {
            let caller = graph.service(caller_idx);
            let callee = graph.service(callee_idx);
            if caller.timeout >= callee.timeout {
                continue;
            }

            let caller_timeout = format_duration(caller.timeout);
            let callee_timeout = format_duration(callee.timeout);
            findings.push(Finding::new(
                FindingKind::TimeoutInversion,
                FindingSubject::edge(&caller.name, &callee.name),
                format!(
                    "{} timeout ({caller_timeout}) < {} timeout ({callee_timeout}): {} gives up \
                     before {} can finish, even on a zero-retry best case",
                    caller.name, callee.name, caller.name, callee.name
                ),
                Evidence::TimeoutInversion {
                    caller_timeout_ms: caller.timeout.as_secs_f64() * 1000.0,
                    callee_timeout_ms: callee.timeout.as_secs_f64() * 1000.0,
                },
            ));
        }
        findings
    }
}
