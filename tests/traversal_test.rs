use ai_lab::core::Traversal;
use ai_lab::{BreadthFirst, DepthFirst, Graph, LabError, RecursiveDepthFirst};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn lab_graph() -> Graph {
    Graph::from_edges([
        ("A", &["B", "C"][..]),
        ("B", &["A", "D", "E"][..]),
        ("C", &["A", "F"][..]),
        ("D", &["B"][..]),
        ("E", &["B", "F"][..]),
        ("F", &["C", "E"][..]),
    ])
}

fn node(i: usize) -> String {
    format!("n{}", i)
}

/// 任意有向圖：每個節點的鄰居都指向圖內節點
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0..n, 0..5), n).prop_map(|lists| {
            let adjacency: BTreeMap<String, Vec<String>> = lists
                .into_iter()
                .enumerate()
                .map(|(i, neighbors)| (node(i), neighbors.into_iter().map(node).collect()))
                .collect();
            Graph::new(adjacency)
        })
    })
}

fn reachable(graph: &Graph, start: &str) -> BTreeSet<String> {
    let mut seen = BTreeSet::from([start.to_string()]);
    loop {
        let before = seen.len();
        let frontier: Vec<String> = seen.iter().cloned().collect();
        for n in frontier {
            for m in graph.neighbors(&n).unwrap() {
                seen.insert(m.clone());
            }
        }
        if seen.len() == before {
            return seen;
        }
    }
}

#[test]
fn test_bfs_visits_lab_graph_level_by_level() {
    let outcome = BreadthFirst.traverse(&lab_graph(), "A").unwrap();
    assert_eq!(outcome.order(), vec!["A", "B", "C", "D", "E", "F"]);
}

#[test]
fn test_dfs_visits_lab_graph_in_preorder() {
    let outcome = DepthFirst.traverse(&lab_graph(), "A").unwrap();
    assert_eq!(outcome.order(), vec!["A", "B", "D", "E", "F", "C"]);

    let outcome = RecursiveDepthFirst.traverse(&lab_graph(), "A").unwrap();
    assert_eq!(outcome.order(), vec!["A", "B", "D", "E", "F", "C"]);
}

#[test]
fn test_lab_default_matches_classroom_graph() {
    assert_eq!(Graph::lab_default(), lab_graph());
}

#[test]
fn test_missing_start_reports_node_name() {
    let err = DepthFirst.traverse(&lab_graph(), "G").unwrap_err();
    assert_eq!(err.to_string(), "Unknown graph node: 'G'");
    assert!(matches!(err, LabError::UnknownNode { .. }));
}

#[test]
fn test_self_loops_and_cycles_terminate() {
    let graph = Graph::from_edges([("A", &["A", "B"][..]), ("B", &["C"][..]), ("C", &["A"][..])]);
    assert_eq!(BreadthFirst.traverse(&graph, "A").unwrap().order(), vec!["A", "B", "C"]);
    assert_eq!(DepthFirst.traverse(&graph, "B").unwrap().order(), vec!["B", "C", "A"]);
}

proptest! {
    #[test]
    fn prop_each_reachable_node_visited_exactly_once(graph in arb_graph()) {
        let expected = reachable(&graph, "n0");
        for outcome in [
            BreadthFirst.traverse(&graph, "n0").unwrap(),
            DepthFirst.traverse(&graph, "n0").unwrap(),
            RecursiveDepthFirst.traverse(&graph, "n0").unwrap(),
        ] {
            let order = outcome.order();
            let visited: BTreeSet<String> = order.iter().map(|s| s.to_string()).collect();
            prop_assert_eq!(visited.len(), order.len());
            prop_assert_eq!(&visited, &expected);
            prop_assert_eq!(order[0], "n0");
        }
    }

    #[test]
    fn prop_bfs_distances_never_decrease(graph in arb_graph()) {
        let outcome = BreadthFirst.traverse(&graph, "n0").unwrap();
        let depths: Vec<usize> = outcome.visits.iter().map(|v| v.depth).collect();
        prop_assert!(depths.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(depths.windows(2).all(|w| w[1] <= w[0] + 1));
    }

    #[test]
    fn prop_iterative_and_recursive_dfs_agree(graph in arb_graph()) {
        let iterative = DepthFirst.traverse(&graph, "n0").unwrap();
        let recursive = RecursiveDepthFirst.traverse(&graph, "n0").unwrap();
        prop_assert_eq!(iterative.visits, recursive.visits);
    }
}
