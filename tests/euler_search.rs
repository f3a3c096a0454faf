mod util;
use util::*;

use arcgraph::algs::euler::{ArcMode, EulerPath, EulerPathSearch, find_euler_paths};
use arcgraph::graph_error::GraphError;
use arcgraph::topology::arc::ArcLike;
use arcgraph::topology::graph::Graph;
use itertools::Itertools;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Every undirected edge of `edges` is walked exactly once by `path`.
fn covers_each_edge_once(g: &Graph, path: &EulerPath, edges: &[(&str, &str)]) -> bool {
    let walked: Vec<(String, String)> = path
        .arcs()
        .iter()
        .map(|&a| {
            let arc = g.arc(a).unwrap();
            let (s, f) = (g.name_of(arc.start()).unwrap(), g.name_of(arc.finish()).unwrap());
            (s.min(f).to_owned(), s.max(f).to_owned())
        })
        .sorted()
        .collect();
    let want: Vec<(String, String)> = edges
        .iter()
        .map(|&(a, b)| (a.min(b).to_owned(), a.max(b).to_owned()))
        .sorted()
        .collect();
    walked == want
}

#[test]
fn simple_path_walked_from_both_ends() {
    let g = undirected(&[("A", "B"), ("B", "C"), ("C", "D")]);
    let walks: Vec<_> = find_euler_paths(&g)
        .unwrap()
        .iter()
        .map(|p| walk(&g, p))
        .collect();
    assert_eq!(walks, ["ABCD", "DCBA"]);
}

#[test]
fn koenigsberg_bridges_have_no_path() {
    // four land masses, seven bridges (parallel edges included)
    let g = undirected(&[
        ("A", "B"),
        ("A", "B"),
        ("A", "C"),
        ("A", "C"),
        ("A", "D"),
        ("B", "D"),
        ("C", "D"),
    ]);
    assert_eq!(
        find_euler_paths(&g).unwrap_err(),
        GraphError::NoPathExists { odd_nodes: 4 }
    );
}

#[test]
fn house_of_nikolaus() {
    // square 1-2-3-4 with both diagonals and a roof 3-5-4
    let edges = [
        ("1", "2"),
        ("2", "3"),
        ("3", "4"),
        ("4", "1"),
        ("1", "3"),
        ("2", "4"),
        ("3", "5"),
        ("4", "5"),
    ];
    let g = undirected(&edges);
    let paths = find_euler_paths(&g).unwrap();
    assert_eq!(paths.len(), 88);

    let starts = paths
        .iter()
        .map(|p| p.node_names(&g)[0].clone())
        .counts();
    assert_eq!(starts.len(), 2);
    assert_eq!(starts["1"], 44);
    assert_eq!(starts["2"], 44);

    for p in &paths {
        assert_eq!(p.len(), edges.len());
        assert!(p.is_chained(&g));
        assert!(covers_each_edge_once(&g, p, &edges));
    }
    assert!(paths.iter().all_unique());
}

#[test]
fn every_triangle_arc_starts_a_circuit() {
    let g = undirected(&[("A", "B"), ("B", "C"), ("C", "A")]);
    let search = EulerPathSearch::new(&g);
    for &start in g.arcs() {
        let paths = search.attempt_from(start).unwrap();
        assert_eq!(paths.len(), 1);
        let nodes = paths[0].node_names(&g);
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes.first(), nodes.last());
    }
}

#[test]
fn directed_mode_on_directed_input() {
    let g = directed(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
    let paths = EulerPathSearch::new(&g)
        .mode(ArcMode::Directed)
        .run()
        .unwrap();
    assert_eq!(paths.iter().map(|p| walk(&g, p)).collect::<Vec<_>>(), ["CABCD"]);

    let unbalanced = directed(&[("A", "B"), ("A", "C")]);
    assert!(matches!(
        EulerPathSearch::new(&unbalanced).mode(ArcMode::Directed).run(),
        Err(GraphError::NoPathExists { .. })
    ));
}

#[test]
fn max_paths_stops_early() {
    let g = undirected(&[("A", "B"), ("B", "C"), ("C", "A")]);
    let paths = EulerPathSearch::new(&g).max_paths(Some(1)).run().unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(walk(&g, &paths[0]), "ABCA");
}

#[test]
fn empty_graph_has_no_paths() {
    let g = Graph::new();
    assert!(find_euler_paths(&g).unwrap().is_empty());
}

#[test]
fn cancellation_from_another_thread() {
    // K9: every degree is even and the circuit count is astronomical
    let names: Vec<String> = (0..9).map(|i| format!("k{i}")).collect();
    let edges: Vec<(&str, &str)> = names
        .iter()
        .tuple_combinations()
        .map(|(a, b)| (a.as_str(), b.as_str()))
        .collect();
    let g = undirected(&edges);
    let flag = AtomicBool::new(false);

    let result = std::thread::scope(|s| {
        s.spawn(|| {
            std::thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::Relaxed);
        });
        EulerPathSearch::new(&g).cancel_flag(&flag).run()
    });
    assert_eq!(result.unwrap_err(), GraphError::SearchCancelled);
}
