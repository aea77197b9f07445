//! Collection aliases shared by the graph engine.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet, SmallVec8};
