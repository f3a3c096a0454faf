//! Articulation points (cut vertices) via Hopcroft–Tarjan low-link DFS.
//!
//! The search follows outgoing arcs, so an undirected graph is expected to be
//! given as reciprocal arc pairs (which is what an undirected `a - b` line of a
//! graph description produces). The DFS is rooted at the first node in name
//! order.
//!
//! Per-node scratch (visited, depth, low, parent) lives in a table owned by
//! the run and keyed by [`NodeId`]; the graph itself is only borrowed. The
//! traversal uses an explicit frame stack, so deep graphs cannot overflow the
//! call stack.
//!
//! # Output order
//! Cut points are reported in the order their DFS frames finish (post-order),
//! not sorted by name. For the path `A - B - C - D` that is `[C, B]`.
//!
//! # Errors
//! * [`GraphError::Disconnected`]: with [`ComponentPolicy::RequireConnected`]
//!   (the default) the DFS from the root must reach every node.

use crate::graph_error::GraphError;
use crate::topology::arc::ArcLike;
use crate::topology::factory::GraphFactory;
use crate::topology::graph::Graph;
use crate::topology::ids::{ArcId, NodeId};
use std::collections::HashMap;

/// What to do when the graph has more than one connected component.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComponentPolicy {
    /// Fail with [`GraphError::Disconnected`].
    #[default]
    RequireConnected,
    /// Start a new DFS at the first unvisited node (in name order) until every
    /// node is covered; results are concatenated in root order. Arcs from a
    /// later tree into an earlier one (possible with one-way arcs) are
    /// ignored.
    EachComponent,
}

/// Options for [`ArticulationPointFinder`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArticulationOpts {
    pub components: ComponentPolicy,
}

/// Per-node DFS state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DfsMark {
    /// Discovery depth in the DFS tree (root = 0).
    pub depth: usize,
    /// Smallest depth reachable from the subtree through one back arc.
    pub low: usize,
    /// DFS-tree parent; `None` for a root.
    pub parent: Option<NodeId>,
    /// Index into [`ArticulationPoints::roots`] of the tree holding the node.
    pub tree: usize,
}

/// Result of a Hopcroft–Tarjan run.
#[derive(Clone, Debug, Default)]
pub struct ArticulationPoints {
    cut_points: Vec<NodeId>,
    roots: Vec<NodeId>,
    marks: HashMap<NodeId, DfsMark>,
}

impl ArticulationPoints {
    /// Cut vertices in finish order.
    pub fn cut_points(&self) -> &[NodeId] {
        &self.cut_points
    }

    pub fn into_cut_points(self) -> Vec<NodeId> {
        self.cut_points
    }

    /// DFS roots, one per explored component.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// DFS state of `n`, if it was reached.
    pub fn mark(&self, n: NodeId) -> Option<DfsMark> {
        self.marks.get(&n).copied()
    }

    pub fn depth(&self, n: NodeId) -> Option<usize> {
        self.mark(n).map(|m| m.depth)
    }

    pub fn low(&self, n: NodeId) -> Option<usize> {
        self.mark(n).map(|m| m.low)
    }

    pub fn parent(&self, n: NodeId) -> Option<NodeId> {
        self.mark(n).and_then(|m| m.parent)
    }

    pub fn is_cut_point(&self, n: NodeId) -> bool {
        self.cut_points.contains(&n)
    }
}

/// One suspended `visit(node, depth)` call.
struct Frame {
    node: NodeId,
    arcs: Vec<ArcId>,
    next: usize,
    children: usize,
    is_cut: bool,
}

/// Single-pass articulation point search over a borrowed graph.
pub struct ArticulationPointFinder<'g, F: GraphFactory> {
    graph: &'g Graph<F>,
    opts: ArticulationOpts,
}

impl<'g, F: GraphFactory> ArticulationPointFinder<'g, F> {
    pub fn new(graph: &'g Graph<F>) -> Self {
        Self {
            graph,
            opts: ArticulationOpts::default(),
        }
    }

    pub fn opts(mut self, opts: ArticulationOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn each_component(mut self) -> Self {
        self.opts.components = ComponentPolicy::EachComponent;
        self
    }

    pub fn run(self) -> Result<ArticulationPoints, GraphError> {
        let graph = self.graph;
        let mut out = ArticulationPoints::default();
        let order = graph.nodes();
        let Some(&root) = order.first() else {
            return Ok(out);
        };
        log::debug!(
            "articulation search over {} nodes / {} arcs",
            graph.node_count(),
            graph.arc_count()
        );

        self.explore(root, &mut out);
        if out.marks.len() < graph.node_count() {
            match self.opts.components {
                ComponentPolicy::RequireConnected => {
                    return Err(GraphError::Disconnected {
                        reached: out.marks.len(),
                        total: graph.node_count(),
                    });
                }
                ComponentPolicy::EachComponent => {
                    for &n in order {
                        if !out.marks.contains_key(&n) {
                            log::warn!(
                                "graph is disconnected; rerooting DFS at {}",
                                graph.name_of(n).unwrap_or("?")
                            );
                            self.explore(n, &mut out);
                        }
                    }
                }
            }
        }
        log::debug!("found {} articulation points", out.cut_points.len());
        Ok(out)
    }

    /// DFS from `root`, appending cut points as frames finish.
    fn explore(&self, root: NodeId, out: &mut ArticulationPoints) {
        let graph = self.graph;
        let tree = out.roots.len();
        out.roots.push(root);
        out.marks.insert(
            root,
            DfsMark {
                depth: 0,
                low: 0,
                parent: None,
                tree,
            },
        );
        let mut stack = vec![Frame::enter(graph, root)];

        while let Some(top) = stack.last_mut() {
            if let Some(&arc) = top.arcs.get(top.next) {
                top.next += 1;
                let node = top.node;
                let Some(nbr) = graph.arc(arc).map(ArcLike::finish) else {
                    continue;
                };
                let here = out.marks[&node];
                match out.marks.get(&nbr).copied() {
                    None => {
                        out.marks.insert(
                            nbr,
                            DfsMark {
                                depth: here.depth + 1,
                                low: here.depth + 1,
                                parent: Some(node),
                                tree,
                            },
                        );
                        stack.push(Frame::enter(graph, nbr));
                    }
                    // arcs into an earlier tree carry no depth of this one
                    Some(seen) if seen.tree != tree => {}
                    Some(seen) if Some(nbr) != here.parent => {
                        if let Some(m) = out.marks.get_mut(&node) {
                            m.low = m.low.min(seen.depth);
                        }
                    }
                    Some(_) => {}
                }
                continue;
            }

            // all arcs of `top` handled: return from visit(top.node)
            let Some(done) = stack.pop() else { break };
            let mark = out.marks[&done.node];
            let is_cut = if mark.parent.is_none() {
                done.children > 1
            } else {
                done.is_cut
            };
            if is_cut {
                out.cut_points.push(done.node);
            }
            if let Some(caller) = stack.last_mut() {
                caller.children += 1;
                if let Some(pm) = out.marks.get_mut(&caller.node) {
                    if mark.low >= pm.depth {
                        caller.is_cut = true;
                    }
                    pm.low = pm.low.min(mark.low);
                }
            }
        }
    }
}

impl Frame {
    fn enter<F: GraphFactory>(graph: &Graph<F>, node: NodeId) -> Self {
        Frame {
            node,
            arcs: graph.arcs_from(node),
            next: 0,
            children: 0,
            is_cut: false,
        }
    }
}

/// Articulation points of a connected graph, in DFS finish order.
///
/// # Example
/// ```rust
/// use arcgraph::algs::articulation::find_articulation_points;
/// use arcgraph::topology::graph::Graph;
/// use arcgraph::topology::load::Record;
/// let mut g = Graph::new();
/// g.load([Record::edge("A", "B"), Record::edge("B", "C")].map(Ok)).unwrap();
/// let cuts = find_articulation_points(&g).unwrap();
/// assert_eq!(cuts, vec![g.node_id("B").unwrap()]);
/// ```
pub fn find_articulation_points<F: GraphFactory>(
    graph: &Graph<F>,
) -> Result<Vec<NodeId>, GraphError> {
    ArticulationPointFinder::new(graph)
        .run()
        .map(ArticulationPoints::into_cut_points)
}

/// Full run with explicit options.
pub fn find_articulation_points_with<F: GraphFactory>(
    graph: &Graph<F>,
    opts: ArticulationOpts,
) -> Result<ArticulationPoints, GraphError> {
    ArticulationPointFinder::new(graph).opts(opts).run()
}
