//! retrystorm-analysis: static resilience analysis of service-call topologies.
//!
//! - Topology: validated in-memory model of services, plus the YAML loader
//! - Call Graph: petgraph-backed directed graph with O(1) service lookup
//! - Paths: deterministic, cycle-safe enumeration of maximal call paths
//! - Analyzers: retry amplification, timeout inversion, circuit breaker gaps
//! - Findings: deduplicated, deterministically ordered findings with counts
//! - Reporters: text, JSON, and SARIF 2.1.0 renderings of a finding report

pub mod analyzers;
pub mod call_graph;
pub mod engine;
pub mod findings;
pub mod reporters;
pub mod topology;

pub use call_graph::{CallGraph, CallGraphBuilder, CallPath, PathEnd, PathEnumerator, PathLimits};
pub use engine::{analyze, analyze_graph, AnalysisOptions, AnalysisReport, AnalysisStats};
pub use findings::{
    Evidence, Finding, FindingAggregator, FindingKind, FindingReport, FindingSubject,
    FindingSummary, Outcome, Severity,
};
pub use topology::{load_topology_file, load_topology_str, parse_duration, Service, Topology};
