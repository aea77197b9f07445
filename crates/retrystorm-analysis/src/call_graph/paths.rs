//! Path Enumerator: lazy, deterministic, cycle-safe enumeration of maximal
//! call paths.
//!
//! Cycle detection is local to the current path: a service may appear in
//! many paths but never twice in one. Reaching a service already on the
//! path ends that path at a cycle boundary.

use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use retrystorm_core::types::collections::{FxHashSet, SmallVec8};

use super::types::CallGraph;

/// Optional resource bounds on enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathLimits {
    /// Stop after this many paths.
    pub max_paths: Option<usize>,
    /// Never extend a path beyond this many services.
    pub max_path_length: Option<usize>,
}

impl PathLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Why a path stopped where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathEnd {
    /// The last service calls nothing.
    Terminal,
    /// The last service calls this service, which is already on the path.
    CycleBoundary(NodeIndex),
    /// `max_path_length` was reached while the last service still had calls.
    DepthLimit,
}

/// A maximal call path. Never contains the same service twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPath {
    pub nodes: Vec<NodeIndex>,
    pub end: PathEnd,
}

impl CallPath {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn names(&self, graph: &CallGraph) -> Vec<String> {
        graph.names(&self.nodes)
    }
}

/// Traversal roots: services without callers, in name order.
///
/// If every service has a caller (fully cyclic graph), every service is an
/// entry. Otherwise services unreachable from any root (a detached cycle)
/// are covered by adding the first unreached service by name, repeatedly.
pub fn entry_points(graph: &CallGraph) -> Vec<NodeIndex> {
    let by_name = graph.nodes_by_name();
    let mut entries: Vec<NodeIndex> = by_name
        .iter()
        .copied()
        .filter(|n| !graph.has_incoming(*n))
        .collect();
    if entries.is_empty() {
        return by_name;
    }

    let mut covered: FxHashSet<NodeIndex> = FxHashSet::default();
    for &root in &entries {
        mark_reachable(graph, root, &mut covered);
    }
    for &node in &by_name {
        if !covered.contains(&node) {
            entries.push(node);
            mark_reachable(graph, node, &mut covered);
        }
    }

    entries.sort_by(|a, b| graph.service(*a).name.cmp(&graph.service(*b).name));
    entries
}

fn mark_reachable(graph: &CallGraph, start: NodeIndex, covered: &mut FxHashSet<NodeIndex>) {
    let mut dfs = Dfs::new(&graph.graph, start);
    while let Some(node) = dfs.next(&graph.graph) {
        covered.insert(node);
    }
}

/// One level of the explicit DFS stack.
struct Frame {
    node: NodeIndex,
    callees: SmallVec8<NodeIndex>,
    next: usize,
}

/// Iterator over all maximal call paths from a set of entries.
///
/// Entries are visited in name order and callees in declared order, so the
/// sequence is identical across runs on the same graph.
pub struct PathEnumerator<'g> {
    graph: &'g CallGraph,
    entries: std::vec::IntoIter<NodeIndex>,
    stack: Vec<Frame>,
    on_path: FxHashSet<NodeIndex>,
    limits: PathLimits,
    emitted: usize,
    truncated: bool,
}

impl<'g> PathEnumerator<'g> {
    /// Enumerate from [`entry_points`].
    pub fn new(graph: &'g CallGraph, limits: PathLimits) -> Self {
        Self::with_entries(graph, entry_points(graph), limits)
    }

    /// Enumerate from explicit entries (sorted by name, duplicates dropped).
    pub fn with_entries(graph: &'g CallGraph, mut entries: Vec<NodeIndex>, limits: PathLimits) -> Self {
        entries.sort_by(|a, b| graph.service(*a).name.cmp(&graph.service(*b).name));
        entries.dedup();
        Self {
            graph,
            entries: entries.into_iter(),
            stack: Vec::new(),
            on_path: FxHashSet::default(),
            limits,
            emitted: 0,
            truncated: false,
        }
    }

    /// Number of paths produced so far.
    pub fn paths_emitted(&self) -> usize {
        self.emitted
    }

    /// True once `max_paths` cut enumeration short with paths remaining.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Callees in declared order; a service listed twice is followed once.
    fn unique_callees(&self, node: NodeIndex) -> SmallVec8<NodeIndex> {
        let mut unique = SmallVec8::new();
        for callee in self.graph.callees(node) {
            if !unique.contains(&callee) {
                unique.push(callee);
            }
        }
        unique
    }

    fn current_path(&self, end: PathEnd) -> CallPath {
        CallPath {
            nodes: self.stack.iter().map(|f| f.node).collect(),
            end,
        }
    }

    fn pop(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.on_path.remove(&frame.node);
        }
    }

    /// Push `node`; if the path must end here, return it and pop again.
    ///
    /// At the length limit, a node whose callees are all already on the path
    /// is not cut: its frame stays so each callee yields a cycle boundary.
    fn enter(&mut self, node: NodeIndex) -> Option<CallPath> {
        let callees = self.unique_callees(node);
        let is_leaf = callees.is_empty();
        self.on_path.insert(node);
        let extends = callees.iter().any(|c| !self.on_path.contains(c));
        self.stack.push(Frame {
            node,
            callees,
            next: 0,
        });

        let at_limit = self
            .limits
            .max_path_length
            .is_some_and(|max| self.stack.len() >= max)
            && extends;
        let end = if is_leaf {
            PathEnd::Terminal
        } else if at_limit {
            PathEnd::DepthLimit
        } else {
            return None;
        };
        let path = self.current_path(end);
        self.pop();
        Some(path)
    }

    /// Advance the DFS to the next maximal path, ignoring `max_paths`.
    fn advance(&mut self) -> Option<CallPath> {
        loop {
            let step = match self.stack.last_mut() {
                None => Step::NextEntry,
                Some(frame) if frame.next < frame.callees.len() => {
                    let child = frame.callees[frame.next];
                    frame.next += 1;
                    Step::Visit(child)
                }
                Some(_) => Step::Backtrack,
            };

            match step {
                Step::NextEntry => {
                    let entry = self.entries.next()?;
                    if let Some(path) = self.enter(entry) {
                        return Some(path);
                    }
                }
                Step::Backtrack => self.pop(),
                Step::Visit(child) => {
                    if self.on_path.contains(&child) {
                        return Some(self.current_path(PathEnd::CycleBoundary(child)));
                    }
                    if let Some(path) = self.enter(child) {
                        return Some(path);
                    }
                }
            }
        }
    }
}

enum Step {
    NextEntry,
    Backtrack,
    Visit(NodeIndex),
}

impl Iterator for PathEnumerator<'_> {
    type Item = CallPath;

    fn next(&mut self) -> Option<CallPath> {
        if let Some(max) = self.limits.max_paths {
            if self.emitted >= max {
                if !self.truncated && self.advance().is_some() {
                    self.truncated = true;
                    tracing::warn!(max_paths = max, "path enumeration capped; remaining paths skipped");
                }
                self.stack.clear();
                self.on_path.clear();
                self.entries = Vec::new().into_iter();
                return None;
            }
        }

        let path = self.advance()?;
        self.emitted += 1;
        Some(path)
    }
}
