//! Amplification Analyzer: flags call paths whose compounded retry
//! attempts exceed a threshold.
//!
//! Every service on the path contributes its `max_attempts`, including the
//! entry and the last service. A cycle-boundary path is scored on its
//! non-repeating services only.

use crate::call_graph::{CallGraph, CallPath, PathEnd};
use crate::findings::{Evidence, Finding, FindingKind, FindingSubject, RetryFactor};

/// Product of `max_attempts` along `path`, saturating at `u64::MAX`.
pub fn amplification_factor(graph: &CallGraph, path: &CallPath) -> u64 {
    path.nodes.iter().fold(1u64, |acc, node| {
        acc.saturating_mul(u64::from(graph.service(*node).max_attempts))
    })
}

/// Flags paths with factor strictly greater than `threshold`.
#[derive(Debug, Clone, Copy)]
pub struct AmplificationAnalyzer {
    threshold: u64,
}

impl AmplificationAnalyzer {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Score a single path. Paths of fewer than two services never amplify.
    pub fn analyze_path(&self, graph: &CallGraph, path: &CallPath) -> Option<Finding> {
        if path.len() < 2 {
            return None;
        }
        let factor = amplification_factor(graph, path);
        if factor <= self.threshold {
            return None;
        }

        let breakdown: Vec<RetryFactor> = path
            .nodes
            .iter()
            .map(|n| {
                let svc = graph.service(*n);
                RetryFactor {
                    service: svc.name.clone(),
                    max_attempts: svc.max_attempts,
                }
            })
            .collect();
        let services = path.names(graph);
        let cycle_boundary = match path.end {
            PathEnd::CycleBoundary(node) => Some(graph.service(node).name.clone()),
            _ => None,
        };
        let depth_limited = path.end == PathEnd::DepthLimit;

        let product = breakdown
            .iter()
            .map(|f| f.max_attempts.to_string())
            .collect::<Vec<_>>()
            .join(" x ");
        let mut message = format!(
            "Retry amplification {factor}x along {} ({product}) exceeds threshold {}",
            services.join(" -> "),
            self.threshold
        );
        if let Some(ref back_to) = cycle_boundary {
            message.push_str(&format!("; path cycles back to {back_to}"));
        }
        if depth_limited {
            message.push_str("; path cut at max path length");
        }

        Some(Finding::new(
            FindingKind::AmplificationRisk,
            FindingSubject::path(services),
            message,
            Evidence::Amplification {
                factor,
                threshold: self.threshold,
                breakdown,
                cycle_boundary,
                depth_limited,
            },
        ))
    }

    /// Score every path from `paths`, keeping only those over the threshold.
    pub fn analyze_paths<I>(&self, graph: &CallGraph, paths: I) -> Vec<Finding>
    where
        I: IntoIterator<Item = CallPath>,
    {
        paths
            .into_iter()
            .filter_map(|path| self.analyze_path(graph, &path))
            .collect()
    }
}
