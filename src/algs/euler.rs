//! Exhaustive backtracking search for Euler paths.
//!
//! An Euler path uses every edge of the graph exactly once. This module finds
//! them by brute force: every arc is tried as the first step, and from there
//! every still-unused arc leaving the current node is tried in turn. All
//! completed paths are reported, not just the first. The search is exponential
//! in the worst case and meant for small graphs; use
//! [`EulerPathSearch::max_paths`] or a cancellation flag to bound it.
//!
//! # Arc modes
//! * [`ArcMode::Reciprocal`] (default) treats the graph as undirected edges
//!   stored as reciprocal arc pairs. Walking an arc also retires its first
//!   still-unused reverse arc, so each `a - b` edge is walked once, in either
//!   direction. The precondition counts nodes of odd out-degree and rejects
//!   three or more.
//! * [`ArcMode::Directed`] treats every arc as its own edge. The precondition
//!   is the directed balance test: at most one node with `out - in = 1`, at
//!   most one with `in - out = 1`, all others balanced.
//!
//! # Branch isolation
//! Each branch works on its own copy of the remaining-arc set; abandoning a
//! branch never affects a sibling. The shared path is truncated back on every
//! return.

use crate::graph_error::GraphError;
use crate::topology::arc::ArcLike;
use crate::topology::factory::GraphFactory;
use crate::topology::graph::Graph;
use crate::topology::ids::{ArcId, NodeId};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

/// How arcs map onto the edges a path must use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ArcMode {
    /// Reciprocal arc pairs form one undirected edge.
    #[default]
    Reciprocal,
    /// Every arc is a separate directed edge.
    Directed,
}

/// Options for [`EulerPathSearch`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EulerSearchOpts {
    pub mode: ArcMode,
    /// Stop once this many complete paths have been found.
    pub max_paths: Option<usize>,
}

/// A complete path as an ordered sequence of arcs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EulerPath(Vec<ArcId>);

impl EulerPath {
    pub fn arcs(&self) -> &[ArcId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Visited nodes: the start of the first arc, then the finish of every arc.
    pub fn nodes<F: GraphFactory>(&self, graph: &Graph<F>) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.0.len() + 1);
        for (i, a) in self.0.iter().filter_map(|&a| graph.arc(a)).enumerate() {
            if i == 0 {
                out.push(a.start());
            }
            out.push(a.finish());
        }
        out
    }

    /// Visited node names, e.g. `["A", "B", "C", "A"]`.
    pub fn node_names<F: GraphFactory>(&self, graph: &Graph<F>) -> Vec<String> {
        self.nodes(graph)
            .into_iter()
            .filter_map(|n| graph.name_of(n).map(str::to_owned))
            .collect()
    }

    /// `true` if each arc starts where the previous one finished.
    pub fn is_chained<F: GraphFactory>(&self, graph: &Graph<F>) -> bool {
        self.0.windows(2).all(|w| {
            match (graph.arc(w[0]), graph.arc(w[1])) {
                (Some(a), Some(b)) => a.finish() == b.start(),
                _ => false,
            }
        })
    }
}

/// Count the nodes that break the degree condition of `mode`.
///
/// Returns `Err(NoPathExists)` when no Euler path can exist.
pub fn check_degree_condition<F: GraphFactory>(
    graph: &Graph<F>,
    mode: ArcMode,
) -> Result<(), GraphError> {
    match mode {
        ArcMode::Reciprocal => {
            let odd = graph
                .nodes()
                .iter()
                .filter(|&&n| graph.out_degree(n) % 2 == 1)
                .count();
            if odd >= 3 {
                return Err(GraphError::NoPathExists { odd_nodes: odd });
            }
        }
        ArcMode::Directed => {
            let (mut surplus, mut deficit, mut unbalanced) = (0usize, 0usize, 0usize);
            for &n in graph.nodes() {
                let diff = graph.out_degree(n) as i64 - graph.in_degree(n) as i64;
                match diff {
                    0 => {}
                    1 => surplus += 1,
                    -1 => deficit += 1,
                    _ => unbalanced += 1,
                }
            }
            if unbalanced > 0 || surplus > 1 || deficit > 1 || surplus != deficit {
                return Err(GraphError::NoPathExists {
                    odd_nodes: unbalanced + surplus + deficit,
                });
            }
        }
    }
    Ok(())
}

/// One suspended `attempt_from` call: its private remaining set and the
/// candidate arcs still to try.
struct Branch {
    remaining: BTreeSet<ArcId>,
    candidates: Vec<ArcId>,
    next: usize,
}

/// Builder-style Euler path search over a borrowed graph.
pub struct EulerPathSearch<'g, F: GraphFactory> {
    graph: &'g Graph<F>,
    opts: EulerSearchOpts,
    cancel: Option<&'g AtomicBool>,
    /// Sorted outgoing arcs per node, computed once per search.
    outgoing: HashMap<NodeId, Vec<ArcId>>,
}

impl<'g, F: GraphFactory> EulerPathSearch<'g, F> {
    pub fn new(graph: &'g Graph<F>) -> Self {
        let outgoing = graph
            .nodes()
            .iter()
            .map(|&n| (n, graph.arcs_from(n)))
            .collect();
        Self {
            graph,
            opts: EulerSearchOpts::default(),
            cancel: None,
            outgoing,
        }
    }

    pub fn opts(mut self, opts: EulerSearchOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn mode(mut self, mode: ArcMode) -> Self {
        self.opts.mode = mode;
        self
    }

    pub fn max_paths(mut self, limit: Option<usize>) -> Self {
        self.opts.max_paths = limit;
        self
    }

    /// The search polls `flag` before every step and stops with
    /// [`GraphError::SearchCancelled`] once it is set.
    pub fn cancel_flag(mut self, flag: &'g AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Try every arc as the starting arc and collect all complete paths.
    ///
    /// # Errors
    /// * [`GraphError::NoPathExists`] if the degree condition fails; no
    ///   search is attempted.
    /// * [`GraphError::SearchCancelled`] if the cancellation flag is raised.
    pub fn run(&self) -> Result<Vec<EulerPath>, GraphError> {
        check_degree_condition(self.graph, self.opts.mode)?;
        log::debug!(
            "euler search ({:?}) over {} arcs",
            self.opts.mode,
            self.graph.arc_count()
        );
        let mut found = Vec::new();
        for &start in self.graph.arcs() {
            if self.limit_reached(&found) {
                log::warn!(
                    "euler search stopped after {} paths (max_paths)",
                    found.len()
                );
                break;
            }
            self.search(start, &mut found)?;
        }
        log::debug!("euler search found {} paths", found.len());
        Ok(found)
    }

    /// All complete paths that begin with `start`, without the degree check.
    ///
    /// # Errors
    /// [`GraphError::NotFound`] if `start` is not an arc of the graph,
    /// [`GraphError::SearchCancelled`] on cancellation.
    pub fn attempt_from(&self, start: ArcId) -> Result<Vec<EulerPath>, GraphError> {
        if !self.graph.contains_arc(start) {
            return Err(GraphError::NotFound(format!("arc {start}")));
        }
        let mut found = Vec::new();
        self.search(start, &mut found)?;
        Ok(found)
    }

    fn limit_reached(&self, found: &[EulerPath]) -> bool {
        self.opts.max_paths.is_some_and(|m| found.len() >= m)
    }

    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|f| f.load(Ordering::Relaxed))
    }

    fn endpoints(&self, arc: ArcId) -> Option<(NodeId, NodeId)> {
        self.graph.arc(arc).map(ArcLike::endpoints)
    }

    /// First reverse arc of `arc` that is still unused.
    fn mirror_in(&self, arc: ArcId, remaining: &BTreeSet<ArcId>) -> Option<ArcId> {
        let (start, finish) = self.endpoints(arc)?;
        self.outgoing.get(&finish)?.iter().copied().find(|r| {
            *r != arc
                && remaining.contains(r)
                && self.endpoints(*r).is_some_and(|(_, f)| f == start)
        })
    }

    /// Steps 1-3 of one attempt: chain `arc` onto `path`, retire it, and either
    /// record a finished path or return the branch to explore next.
    fn enter(
        &self,
        arc: ArcId,
        mut remaining: BTreeSet<ArcId>,
        path: &mut Vec<ArcId>,
        found: &mut Vec<EulerPath>,
    ) -> Option<Branch> {
        let (start, finish) = self.endpoints(arc)?;
        if let Some(&last) = path.last() {
            if self.endpoints(last).map(|(_, f)| f) != Some(start) {
                return None;
            }
        }
        path.push(arc);
        remaining.remove(&arc);
        if self.opts.mode == ArcMode::Reciprocal {
            if let Some(m) = self.mirror_in(arc, &remaining) {
                remaining.remove(&m);
            }
        }
        if remaining.is_empty() {
            log::trace!("complete path of {} arcs", path.len());
            found.push(EulerPath(path.clone()));
            path.pop();
            return None;
        }
        let candidates = self
            .outgoing
            .get(&finish)
            .map(|v| v.iter().copied().filter(|a| remaining.contains(a)).collect())
            .unwrap_or_default();
        Some(Branch {
            remaining,
            candidates,
            next: 0,
        })
    }

    fn search(&self, start: ArcId, found: &mut Vec<EulerPath>) -> Result<(), GraphError> {
        if self.cancelled() {
            return Err(GraphError::SearchCancelled);
        }
        let all: BTreeSet<ArcId> = self.graph.arcs().iter().copied().collect();
        let mut path = Vec::new();
        let mut stack: Vec<Branch> = self
            .enter(start, all, &mut path, found)
            .into_iter()
            .collect();

        while let Some(top) = stack.last_mut() {
            if self.cancelled() {
                return Err(GraphError::SearchCancelled);
            }
            if self.limit_reached(found) {
                return Ok(());
            }
            if let Some(&arc) = top.candidates.get(top.next) {
                top.next += 1;
                let copy = top.remaining.clone();
                if let Some(branch) = self.enter(arc, copy, &mut path, found) {
                    stack.push(branch);
                }
            } else {
                stack.pop();
                path.pop();
            }
        }
        Ok(())
    }
}

/// All Euler paths of an undirected (reciprocal-pair) graph.
///
/// # Example
/// ```rust
/// use arcgraph::algs::euler::find_euler_paths;
/// use arcgraph::topology::graph::Graph;
/// use arcgraph::topology::load::Record;
/// let mut g = Graph::new();
/// g.load([Record::edge("A", "B"), Record::edge("B", "C")].map(Ok)).unwrap();
/// let paths = find_euler_paths(&g).unwrap();
/// let walks: Vec<_> = paths.iter().map(|p| p.node_names(&g).join("")).collect();
/// assert_eq!(walks, ["ABC", "CBA"]);
/// ```
pub fn find_euler_paths<F: GraphFactory>(graph: &Graph<F>) -> Result<Vec<EulerPath>, GraphError> {
    EulerPathSearch::new(graph).run()
}

/// First Euler path found, in starting-arc order.
pub fn find_first_euler_path<F: GraphFactory>(
    graph: &Graph<F>,
    mode: ArcMode,
) -> Result<Option<EulerPath>, GraphError> {
    let paths = EulerPathSearch::new(graph)
        .mode(mode)
        .max_paths(Some(1))
        .run()?;
    Ok(paths.into_iter().next())
}
