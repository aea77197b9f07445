//! Analysis pipeline: topology → call graph → analyzers → aggregated report.
//!
//! A pure function of (topology, options). Running it twice on the same
//! inputs yields identical ordered findings.

use retrystorm_core::config::AnalysisConfig;
use retrystorm_core::errors::ConfigError;
use serde::Serialize;

use crate::analyzers::{AmplificationAnalyzer, CircuitBreakerAnalyzer, TimeoutInversionAnalyzer};
use crate::call_graph::{CallGraph, CallGraphBuilder, CallGraphStats, PathEnumerator, PathLimits};
use crate::findings::{FindingAggregator, FindingReport};
use crate::topology::Topology;

/// Explicit analysis settings. Built from configuration; never read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub amplification_threshold: u64,
    pub limits: PathLimits,
}

impl AnalysisOptions {
    pub fn new(amplification_threshold: u64) -> Self {
        Self {
            amplification_threshold,
            limits: PathLimits::unbounded(),
        }
    }

    pub fn with_limits(mut self, limits: PathLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            amplification_threshold: config.effective_amplification_threshold(),
            limits: PathLimits {
                max_paths: config.max_paths,
                max_path_length: config.max_path_length,
            },
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

/// Counters describing one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub graph: CallGraphStats,
    pub paths_enumerated: usize,
    /// True if `max_paths` stopped enumeration before all paths were seen.
    pub paths_truncated: bool,
    pub duplicates_dropped: usize,
}

/// Findings plus run statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub report: FindingReport,
    pub stats: AnalysisStats,
}

/// Build the call graph for `topology` and analyze it.
///
/// The only failure is a [`ConfigError`] from graph construction; findings
/// are never errors.
pub fn analyze(topology: &Topology, options: &AnalysisOptions) -> Result<AnalysisReport, ConfigError> {
    let (graph, _) = CallGraphBuilder::new().build(topology)?;
    Ok(analyze_graph(&graph, options))
}

/// Run all analyzers over an already built graph.
pub fn analyze_graph(graph: &CallGraph, options: &AnalysisOptions) -> AnalysisReport {
    let span = tracing::info_span!("analyze", services = graph.service_count());
    let _enter = span.enter();

    let mut aggregator = FindingAggregator::new();

    let amplification = AmplificationAnalyzer::new(options.amplification_threshold);
    let mut paths = PathEnumerator::new(graph, options.limits);
    aggregator.extend(amplification.analyze_paths(graph, &mut paths));
    let paths_enumerated = paths.paths_emitted();
    let paths_truncated = paths.is_truncated();
    tracing::info!(paths = paths_enumerated, truncated = paths_truncated, "paths enumerated");

    aggregator.extend(TimeoutInversionAnalyzer::new().analyze(graph));
    aggregator.extend(CircuitBreakerAnalyzer::new().analyze(graph));

    let duplicates_dropped = aggregator.duplicates();
    let report = aggregator.finish();
    tracing::info!(
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        duplicates = duplicates_dropped,
        "findings aggregated"
    );

    AnalysisReport {
        report,
        stats: AnalysisStats {
            graph: CallGraphStats::of(graph),
            paths_enumerated,
            paths_truncated,
            duplicates_dropped,
        },
    }
}
