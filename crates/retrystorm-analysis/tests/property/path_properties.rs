use proptest::prelude::*;
use retrystorm_analysis::analyzers::amplification_factor;
use retrystorm_analysis::call_graph::{
    entry_points, CallGraph, CallGraphBuilder, PathEnd, PathEnumerator, PathLimits,
};
use retrystorm_analysis::topology::{Service, Topology};
use retrystorm_analysis::{analyze, AnalysisOptions};

const MAX_SERVICES: usize = 7;

fn name(i: usize) -> String {
    format!("s{i}")
}

/// Topology over `n` services with the given (caller, callee) calls, in order.
fn topology(n: usize, calls: &[(usize, usize)], attempts: &[u32]) -> Topology {
    Topology::from_services((0..n).map(|i| {
        let targets: Vec<String> = calls
            .iter()
            .filter(|(from, _)| *from == i)
            .map(|(_, to)| name(*to))
            .collect();
        Service::new(name(i))
            .with_max_attempts(attempts.get(i).copied().unwrap_or(1))
            .calling(&targets)
    }))
}

fn graph(topology: &Topology) -> CallGraph {
    CallGraphBuilder::new().build(topology).unwrap().0
}

/// Recursive reference enumeration of maximal paths in an acyclic graph.
fn reference_paths(graph: &CallGraph) -> Vec<Vec<String>> {
    fn walk(
        graph: &CallGraph,
        node: petgraph::graph::NodeIndex,
        path: &mut Vec<String>,
        out: &mut Vec<Vec<String>>,
    ) {
        path.push(graph.service(node).name.clone());
        let mut callees = graph.callees(node).to_vec();
        let mut seen = Vec::new();
        callees.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(*c);
                true
            }
        });
        if callees.is_empty() {
            out.push(path.clone());
        }
        for callee in callees {
            walk(graph, callee, path, out);
        }
        path.pop();
    }

    let mut out = Vec::new();
    for entry in entry_points(graph) {
        walk(graph, entry, &mut Vec::new(), &mut out);
    }
    out
}

fn dag_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..=MAX_SERVICES).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..=3 * n).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect::<Vec<_>>()
        });
        (Just(n), edges)
    })
}

fn any_graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<u32>)> {
    (1..=MAX_SERVICES).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..=3 * n),
            prop::collection::vec(1u32..5, n),
        )
    })
}

/// A random graph plus the same calls in shuffled order.
fn reordered_strategy(
) -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<(usize, usize)>, Vec<u32>)> {
    any_graph_strategy().prop_flat_map(|(n, calls, attempts)| {
        let shuffled = Just(calls.clone()).prop_shuffle();
        (Just(n), Just(calls), shuffled, Just(attempts))
    })
}

/// Every enumerated path with its amplification factor, sorted.
fn scored_paths(topology: &Topology) -> Vec<(Vec<String>, u64)> {
    let g = graph(topology);
    let mut scored: Vec<(Vec<String>, u64)> = PathEnumerator::new(&g, PathLimits::unbounded())
        .map(|p| (p.names(&g), amplification_factor(&g, &p)))
        .collect();
    scored.sort();
    scored
}

proptest! {
    #[test]
    fn acyclic_enumeration_matches_reference((n, calls) in dag_strategy()) {
        let topo = topology(n, &calls, &[]);
        let g = graph(&topo);
        let enumerated: Vec<Vec<String>> = PathEnumerator::new(&g, PathLimits::unbounded())
            .map(|p| {
                assert_eq!(p.end, PathEnd::Terminal);
                p.names(&g)
            })
            .collect();
        prop_assert_eq!(&enumerated, &reference_paths(&g));

        let mut deduped = enumerated.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), enumerated.len());
    }

    #[test]
    fn paths_never_repeat_a_service((n, calls, attempts) in any_graph_strategy()) {
        let topo = topology(n, &calls, &attempts);
        let g = graph(&topo);
        for path in PathEnumerator::new(&g, PathLimits::unbounded()) {
            let mut nodes = path.nodes.clone();
            nodes.sort();
            nodes.dedup();
            prop_assert_eq!(nodes.len(), path.nodes.len());
            prop_assert!(path.len() <= n);

            let last = *path.nodes.last().unwrap();
            match path.end {
                PathEnd::Terminal => prop_assert!(g.callees(last).is_empty()),
                PathEnd::CycleBoundary(back) => {
                    prop_assert!(path.nodes.contains(&back));
                    prop_assert!(g.callees(last).contains(&back));
                }
                PathEnd::DepthLimit => prop_assert!(false, "no depth limit configured"),
            }
        }
    }

    #[test]
    fn every_service_lies_on_some_path((n, calls, _attempts) in any_graph_strategy()) {
        let topo = topology(n, &calls, &[]);
        let g = graph(&topo);
        let mut covered = vec![false; n];
        for path in PathEnumerator::new(&g, PathLimits::unbounded()) {
            for node in path.nodes {
                covered[node.index()] = true;
            }
        }
        prop_assert!(covered.iter().all(|c| *c));
    }

    #[test]
    fn path_length_limit_respected((n, calls, _attempts) in any_graph_strategy(), max in 1usize..4) {
        let topo = topology(n, &calls, &[]);
        let g = graph(&topo);
        let limits = PathLimits { max_path_length: Some(max), ..PathLimits::default() };
        for path in PathEnumerator::new(&g, limits) {
            prop_assert!(path.len() <= max);
        }
    }

    #[test]
    fn call_order_does_not_change_factors((n, calls, shuffled, attempts) in reordered_strategy()) {
        let original = scored_paths(&topology(n, &calls, &attempts));
        let reordered = scored_paths(&topology(n, &shuffled, &attempts));
        prop_assert_eq!(original, reordered);
    }

    #[test]
    fn analysis_is_idempotent((n, calls, attempts) in any_graph_strategy()) {
        let topo = topology(n, &calls, &attempts);
        let options = AnalysisOptions::new(4);
        let first = analyze(&topo, &options).unwrap();
        let second = analyze(&topo, &options).unwrap();
        prop_assert_eq!(first, second);
    }
}
