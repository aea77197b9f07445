//! Configuration system for RetryStorm.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod analysis_config;
pub mod gate_config;
pub mod retrystorm_config;

pub use analysis_config::AnalysisConfig;
pub use gate_config::GateConfig;
pub use retrystorm_config::{CliOverrides, RetryStormConfig};
