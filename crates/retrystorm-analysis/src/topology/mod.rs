//! Topology model (validated services and their outbound calls) plus the
//! YAML loader that produces it.

pub mod duration;
pub mod loader;
pub mod types;

pub use duration::{format_duration, parse_duration, DurationError};
pub use loader::{load_topology_file, load_topology_str};
pub use types::{CircuitBreaker, RetryPolicy, Service, Topology};
