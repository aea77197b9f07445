//! Core finding types.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Finding severity. Declaration order is report order: errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// SARIF `level` for this severity.
    pub fn sarif_level(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// The three classes of latent resilience defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    #[serde(rename = "retry-amplification")]
    AmplificationRisk,
    #[serde(rename = "timeout-inversion")]
    TimeoutInversion,
    #[serde(rename = "circuit-breaker-gap")]
    CircuitBreakerGap,
}

impl FindingKind {
    /// Stable rule id, used in ids, JSON and SARIF.
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::AmplificationRisk => "retry-amplification",
            Self::TimeoutInversion => "timeout-inversion",
            Self::CircuitBreakerGap => "circuit-breaker-gap",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::AmplificationRisk => "Retry Amplification",
            Self::TimeoutInversion => "Timeout Inversion",
            Self::CircuitBreakerGap => "Circuit Breaker Gap",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::AmplificationRisk => {
                "Compounding retry policies multiply request volume along a call chain"
            }
            Self::TimeoutInversion => {
                "A caller gives up before its callee's own timeout can elapse"
            }
            Self::CircuitBreakerGap => {
                "A service calls downstream dependencies without a circuit breaker"
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::AmplificationRisk => Severity::Error,
            Self::TimeoutInversion | Self::CircuitBreakerGap => Severity::Warning,
        }
    }

    pub fn all() -> &'static [FindingKind] {
        &[
            Self::AmplificationRisk,
            Self::TimeoutInversion,
            Self::CircuitBreakerGap,
        ]
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule_id())
    }
}

/// What a finding points at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FindingSubject {
    Path { services: Vec<String> },
    Edge { caller: String, callee: String },
    Service { name: String },
}

impl FindingSubject {
    pub fn path(services: Vec<String>) -> Self {
        Self::Path { services }
    }

    pub fn edge(caller: impl Into<String>, callee: impl Into<String>) -> Self {
        Self::Edge {
            caller: caller.into(),
            callee: callee.into(),
        }
    }

    pub fn service(name: impl Into<String>) -> Self {
        Self::Service { name: name.into() }
    }

    /// Compact key used inside finding ids.
    ///
    /// Segments are escaped so that distinct subjects never share a key,
    /// even when service names themselves contain `->`.
    pub fn key(&self) -> String {
        match self {
            Self::Path { services } => services
                .iter()
                .map(|s| escape_segment(s))
                .collect::<Vec<_>>()
                .join("->"),
            Self::Edge { caller, callee } => {
                format!("{}->{}", escape_segment(caller), escape_segment(callee))
            }
            Self::Service { name } => escape_segment(name),
        }
    }

    /// Services named by this subject, in order.
    pub fn services(&self) -> Vec<&str> {
        match self {
            Self::Path { services } => services.iter().map(String::as_str).collect(),
            Self::Edge { caller, callee } => vec![caller.as_str(), callee.as_str()],
            Self::Service { name } => vec![name.as_str()],
        }
    }
}

/// `\` and `>` are backslash-escaped; an unescaped `>` only ever appears in a separator.
fn escape_segment(segment: &str) -> String {
    if !segment.contains(['\\', '>']) {
        return segment.to_string();
    }
    let mut escaped = String::with_capacity(segment.len() + 2);
    for c in segment.chars() {
        if c == '\\' || c == '>' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl fmt::Display for FindingSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path { services } => f.write_str(&services.join(" -> ")),
            Self::Edge { caller, callee } => write!(f, "{caller} -> {callee}"),
            Self::Service { name } => f.write_str(name),
        }
    }
}

/// One service's contribution to an amplification factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryFactor {
    pub service: String,
    pub max_attempts: u32,
}

/// Kind-specific structured data behind a finding's message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evidence {
    Amplification {
        factor: u64,
        threshold: u64,
        breakdown: Vec<RetryFactor>,
        /// Service the path would have revisited, if it ends at a cycle.
        cycle_boundary: Option<String>,
        depth_limited: bool,
    },
    TimeoutInversion {
        caller_timeout_ms: f64,
        callee_timeout_ms: f64,
    },
    CircuitBreakerGap {
        unprotected_targets: Vec<String>,
    },
}

/// A single resilience finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable identity: "{rule_id}:{subject key}".
    pub id: String,
    /// xxh3 of `id`, hex; stable across runs and tool versions.
    pub fingerprint: String,
    pub kind: FindingKind,
    pub severity: Severity,
    pub subject: FindingSubject,
    pub message: String,
    pub evidence: Evidence,
}

impl Finding {
    /// Build a finding with the kind's standard severity and a derived id.
    pub fn new(
        kind: FindingKind,
        subject: FindingSubject,
        message: String,
        evidence: Evidence,
    ) -> Self {
        let id = format!("{}:{}", kind.rule_id(), subject.key());
        let fingerprint = format!("{:016x}", xxh3_64(id.as_bytes()));
        Self {
            id,
            fingerprint,
            kind,
            severity: kind.severity(),
            subject,
            message,
            evidence,
        }
    }
}
