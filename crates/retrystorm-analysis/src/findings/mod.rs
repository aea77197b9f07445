//! Findings (the analysis output) and the aggregator that orders and
//! deduplicates them.

pub mod aggregator;
pub mod types;

pub use aggregator::{FindingAggregator, FindingReport, FindingSummary, Outcome};
pub use types::{Evidence, Finding, FindingKind, FindingSubject, RetryFactor, Severity};
