//! Call Graph: petgraph DiGraph over services, O(1) name lookup, and a lazy
//! cycle-safe path enumerator.

pub mod builder;
pub mod paths;
pub mod types;

pub use builder::CallGraphBuilder;
pub use paths::{entry_points, CallPath, PathEnd, PathEnumerator, PathLimits};
pub use types::{CallEdge, CallGraph, CallGraphStats, ServiceNode};
