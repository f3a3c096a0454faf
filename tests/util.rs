#![allow(dead_code)]
use arcgraph::{
    algs::euler::EulerPath,
    topology::graph::Graph,
    topology::ids::{ArcId, NodeId},
    topology::load::Record,
};

/// Build a graph of reciprocal arc pairs from undirected edges.
pub fn undirected(edges: &[(&str, &str)]) -> Graph {
    let mut g = Graph::new();
    g.load(edges.iter().map(|&(a, b)| Ok(Record::edge(a, b))))
        .unwrap();
    g
}

/// Build a graph of directed arcs (u -> v).
pub fn directed(arcs: &[(&str, &str)]) -> Graph {
    let mut g = Graph::new();
    g.load(arcs.iter().map(|&(a, b)| Ok(Record::arc(a, b))))
        .unwrap();
    g
}

pub fn names(g: &Graph, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|&n| g.name_of(n).unwrap().to_owned()).collect()
}

pub fn labels(g: &Graph, ids: &[ArcId]) -> Vec<String> {
    ids.iter().map(|&a| g.arc_label(a).unwrap()).collect()
}

/// Node names along a path, concatenated: `"ABCA"`.
pub fn walk(g: &Graph, path: &EulerPath) -> String {
    path.node_names(g).concat()
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Clone + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
