//! Resilience analyzers. Each is a pure function of the call graph (and,
//! for amplification, the enumerated paths) to findings.

pub mod amplification;
pub mod circuit_breaker;
pub mod timeout_inversion;

pub use amplification::{amplification_factor, AmplificationAnalyzer};
pub use circuit_breaker::CircuitBreakerAnalyzer;
pub use timeout_inversion::TimeoutInversionAnalyzer;
