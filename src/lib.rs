//! # arcgraph
//!
//! arcgraph is a small directed-graph library with two classic traversal
//! algorithms on top of it: Hopcroft–Tarjan articulation points and an
//! exhaustive Euler path search.
//!
//! ## Features
//! - An arena-backed [`Graph`](topology::graph::Graph) of named nodes and
//!   directed arcs, both carrying open typed attribute maps
//! - Deterministic enumeration: nodes sorted by name, arcs by
//!   `(start name, finish name, insertion order)`
//! - A [`GraphFactory`](topology::factory::GraphFactory) hook so clients can
//!   substitute richer node and arc types
//! - Undirected edges modelled as reciprocal arc pairs
//! - A line-oriented text format (`A - B (weight=3)`) in [`io::text`]
//!
//! ## Usage
//! ```rust
//! use arcgraph::prelude::*;
//!
//! let mut g = Graph::new();
//! g.load(parse_records("A - B\nB - C\nC - D")).unwrap();
//! let cuts: Vec<_> = find_articulation_points(&g)
//!     .unwrap()
//!     .into_iter()
//!     .map(|n| g.name_of(n).unwrap().to_owned())
//!     .collect();
//! assert_eq!(cuts, ["C", "B"]);
//! ```
//!
//! ## Invariant checking
//! Every mutation of a [`Graph`](topology::graph::Graph) re-validates the
//! incidence bookkeeping in debug builds. Enable the `strict-invariants` or
//! `check-invariants` feature to keep the checks in release builds.

pub mod algs;
pub mod debug_invariants;
pub mod graph_error;
pub mod io;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use graph_error::GraphError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::articulation::{
        ArticulationOpts, ArticulationPointFinder, ArticulationPoints, ComponentPolicy,
        find_articulation_points, find_articulation_points_with,
    };
    pub use crate::algs::euler::{
        ArcMode, EulerPath, EulerPathSearch, EulerSearchOpts, find_euler_paths,
        find_first_euler_path,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph_error::GraphError;
    pub use crate::io::text::{parse_records, read_graph, scan_options, write_graph};
    pub use crate::io::{GraphReader, GraphWriter};
    pub use crate::topology::arc::{Arc, ArcLike};
    pub use crate::topology::attributes::{AttrValue, Attributed, Attributes};
    pub use crate::topology::factory::{DefaultFactory, GraphFactory};
    pub use crate::topology::graph::{Graph, NodeSpec};
    pub use crate::topology::ids::{ArcId, NodeId};
    pub use crate::topology::load::{LoadSummary, Record};
    pub use crate::topology::node::{Node, NodeLike};
}
