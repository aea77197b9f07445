//! retrystorm-core: shared foundation for the RetryStorm topology analyzer.
//!
//! - Errors: one `thiserror` enum per concern, with error codes and exit classes
//! - Config: TOML-based, layered resolution (CLI > env > project > defaults)
//! - Tracing: `tracing-subscriber` setup driven by `RETRYSTORM_LOG`
//! - Types: collection aliases used by the graph engine

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::{AnalysisConfig, CliOverrides, GateConfig, RetryStormConfig};
pub use errors::{ConfigError, ErrorCode};
