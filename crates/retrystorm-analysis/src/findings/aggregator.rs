//! Finding Aggregator: merges analyzer output into one deduplicated,
//! deterministically ordered report.

use std::cmp::Ordering;

use retrystorm_core::constants::{EXIT_FAILED, EXIT_PASSED};
use retrystorm_core::types::collections::FxHashSet;
use serde::Serialize;

use super::types::{Finding, Severity};

/// Collects findings, dropping any whose id was already seen.
#[derive(Debug, Default)]
pub struct FindingAggregator {
    findings: Vec<Finding>,
    seen: FxHashSet<String>,
    duplicates: usize,
}

impl FindingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one finding. Returns false if its id was already present.
    pub fn add(&mut self, finding: Finding) -> bool {
        if !self.seen.insert(finding.id.clone()) {
            self.duplicates += 1;
            tracing::trace!(id = %finding.id, "duplicate finding dropped");
            return false;
        }
        self.findings.push(finding);
        true
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.add(finding);
        }
    }

    /// Number of findings dropped as duplicates so far.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Sort (severity, kind, subject, id) and compute summary counts.
    pub fn finish(self) -> FindingReport {
        let mut findings = self.findings;
        findings.sort_by(compare_findings);
        let summary = FindingSummary::of(&findings);
        FindingReport { findings, summary }
    }
}

fn compare_findings(a: &Finding, b: &Finding) -> Ordering {
    a.severity
        .cmp(&b.severity)
        .then(a.kind.cmp(&b.kind))
        .then_with(|| a.subject.cmp(&b.subject))
        .then_with(|| a.id.cmp(&b.id))
}

/// The final, ordered findings handed to reporters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindingReport {
    pub findings: Vec<Finding>,
    pub summary: FindingSummary,
}

impl FindingReport {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }
}

/// Error and warning counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FindingSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl FindingSummary {
    pub fn of(findings: &[Finding]) -> Self {
        let errors = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        Self {
            errors,
            warnings: findings.len() - errors,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }

    /// Strict: any finding fails. Otherwise only errors fail.
    pub fn outcome(&self, strict: bool) -> Outcome {
        let failing = if strict { self.total() } else { self.errors };
        if failing > 0 {
            Outcome::Failed
        } else {
            Outcome::Passed
        }
    }
}

/// Pass/fail classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Passed => EXIT_PASSED,
            Self::Failed => EXIT_FAILED,
        }
    }
}
