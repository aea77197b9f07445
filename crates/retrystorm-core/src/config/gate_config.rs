//! Pass/fail gate configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STRICT;

/// Controls how findings map to a pass/fail outcome. Never changes which
/// findings are produced.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Strict mode: warnings fail the run too. Default: false.
    pub strict: Option<bool>,
}

impl GateConfig {
    pub fn effective_strict(&self) -> bool {
        self.strict.unwrap_or(DEFAULT_STRICT)
    }
}
