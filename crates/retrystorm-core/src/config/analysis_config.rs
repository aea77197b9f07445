//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AMPLIFICATION_THRESHOLD;

/// Configuration for the graph analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cumulative retry factor above which a path is flagged. Default: 10.
    pub amplification_threshold: Option<u64>,
    /// Cap on the number of call paths enumerated. Default: unbounded.
    pub max_paths: Option<usize>,
    /// Cap on the number of services in a single call path. Default: unbounded.
    pub max_path_length: Option<usize>,
}

impl AnalysisConfig {
    /// Returns the effective amplification threshold, defaulting to 10.
    pub fn effective_amplification_threshold(&self) -> u64 {
        self.amplification_threshold
            .unwrap_or(DEFAULT_AMPLIFICATION_THRESHOLD)
    }
}
