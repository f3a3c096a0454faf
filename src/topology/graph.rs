//! Arena-backed directed multigraph of named nodes.
//!
//! [`Graph`] is the sole owner of its nodes and arcs. Nodes live in one arena,
//! arcs in another; each node slot additionally records the ids of the arcs
//! leaving and entering it. Elements refer to each other only through
//! [`NodeId`] / [`ArcId`], so removing a node or an arc cannot leave a dangling
//! reference behind.
//!
//! # Invariants
//! * Node names are unique; the `name -> NodeId` index agrees with the arena.
//! * An arc is live in the arc arena iff its id appears exactly once in the
//!   outgoing list of its start node and exactly once in the incoming list of
//!   its finish node.
//!
//! Every mutator validates its arguments before touching any state, so a
//! returned error leaves the graph exactly as it was.
//!
//! # Ordering
//! [`Graph::nodes`] is sorted by name and [`Graph::arcs`] by
//! `(start name, finish name, ArcId)`. Both orders are memoised and
//! invalidated by every membership change.

use crate::debug_invariants::DebugInvariants;
use crate::graph_error::GraphError;
use crate::topology::arc::ArcLike;
use crate::topology::cache::InvalidateCache;
use crate::topology::factory::{DefaultFactory, GraphFactory};
use crate::topology::ids::{ArcId, NodeId};
use crate::topology::node::NodeLike;
use itertools::Itertools;
use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// How a caller names a node: by name (created on demand by `add_node`) or by
/// the id of a node already in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeSpec<'a> {
    Name(Cow<'a, str>),
    Id(NodeId),
}

impl<'a> From<&'a str> for NodeSpec<'a> {
    fn from(s: &'a str) -> Self {
        NodeSpec::Name(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for NodeSpec<'a> {
    fn from(s: &'a String) -> Self {
        NodeSpec::Name(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for NodeSpec<'static> {
    fn from(s: String) -> Self {
        NodeSpec::Name(Cow::Owned(s))
    }
}

impl From<NodeId> for NodeSpec<'static> {
    fn from(id: NodeId) -> Self {
        NodeSpec::Id(id)
    }
}

impl fmt::Display for NodeSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeSpec::Name(n) => write!(f, "`{n}`"),
            NodeSpec::Id(id) => write!(f, "{id}"),
        }
    }
}

/// A node plus the ids of its incident arcs.
#[derive(Clone, Debug)]
struct NodeSlot<N> {
    node: N,
    outgoing: Vec<ArcId>,
    incoming: Vec<ArcId>,
}

/// Directed multigraph with named nodes; self-loops and parallel arcs allowed.
///
/// # Type Parameters
/// - `F`: the [`GraphFactory`] that builds node and arc values. Defaults to
///   [`DefaultFactory`] (plain [`Node`](crate::topology::node::Node) /
///   [`Arc`](crate::topology::arc::Arc)).
pub struct Graph<F: GraphFactory = DefaultFactory> {
    factory: F,
    nodes: Vec<Option<NodeSlot<F::Node>>>,
    arcs: Vec<Option<F::Arc>>,
    index: HashMap<String, NodeId>,
    arc_count: usize,
    sorted_nodes: OnceCell<Vec<NodeId>>,
    sorted_arcs: OnceCell<Vec<ArcId>>,
}

impl Graph<DefaultFactory> {
    /// Creates an empty graph of plain nodes and arcs.
    pub fn new() -> Self {
        Self::with_factory(DefaultFactory)
    }
}

impl Default for Graph<DefaultFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: GraphFactory> Graph<F> {
    /// Creates an empty graph whose elements are built by `factory`.
    pub fn with_factory(factory: F) -> Self {
        Graph {
            factory,
            nodes: Vec::new(),
            arcs: Vec::new(),
            index: HashMap::new(),
            arc_count: 0,
            sorted_nodes: OnceCell::new(),
            sorted_arcs: OnceCell::new(),
        }
    }

    /// The factory used for new elements.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Removes every node and arc. Ids restart from zero.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.arcs.clear();
        self.index.clear();
        self.arc_count = 0;
        self.invalidate_cache();
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    #[inline]
    fn slot(&self, id: NodeId) -> Option<&NodeSlot<F::Node>> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    fn slot_mut(&mut self, id: NodeId) -> Option<&mut NodeSlot<F::Node>> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// `true` if `id` names a live node of this graph.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// `true` if `id` names a live arc of this graph.
    #[inline]
    pub fn contains_arc(&self, id: ArcId) -> bool {
        self.arc(id).is_some()
    }

    /// Id of the node called `name`, if any.
    #[inline]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&F::Node> {
        self.slot(id).map(|s| &s.node)
    }

    /// Mutable access to a node, e.g. to update its attributes.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut F::Node> {
        self.slot_mut(id).map(|s| &mut s.node)
    }

    #[inline]
    pub fn node_by_name(&self, name: &str) -> Option<&F::Node> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    /// Name of node `id`, if live.
    #[inline]
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(NodeLike::name)
    }

    #[inline]
    pub fn arc(&self, id: ArcId) -> Option<&F::Arc> {
        self.arcs.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn arc_mut(&mut self, id: ArcId) -> Option<&mut F::Arc> {
        self.arcs.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Resolve a spec to a live node without creating anything.
    pub fn resolve(&self, spec: &NodeSpec<'_>) -> Option<NodeId> {
        match spec {
            NodeSpec::Name(n) => self.node_id(n),
            NodeSpec::Id(id) => self.contains_node(*id).then_some(*id),
        }
    }

    // ------------------------------------------------------------------
    // Ordered enumeration
    // ------------------------------------------------------------------

    fn cmp_names(&self, a: NodeId, b: NodeId) -> Ordering {
        self.name_of(a).cmp(&self.name_of(b))
    }

    fn cmp_arcs(&self, a: ArcId, b: ArcId) -> Ordering {
        match (self.arc(a), self.arc(b)) {
            (Some(x), Some(y)) => self
                .cmp_names(x.start(), y.start())
                .then_with(|| self.cmp_names(x.finish(), y.finish()))
                .then_with(|| a.cmp(&b)),
            _ => a.cmp(&b),
        }
    }

    /// All nodes, sorted by name.
    pub fn nodes(&self) -> &[NodeId] {
        self.sorted_nodes.get_or_init(|| {
            self.index
                .values()
                .copied()
                .sorted_by(|&a, &b| self.cmp_names(a, b))
                .collect()
        })
    }

    /// All arcs, sorted by `(start name, finish name, ArcId)`.
    pub fn arcs(&self) -> &[ArcId] {
        self.sorted_arcs.get_or_init(|| {
            self.arcs
                .iter()
                .enumerate()
                .filter(|(_, a)| a.is_some())
                .map(|(i, _)| ArcId::new(i as u32))
                .sorted_by(|&a, &b| self.cmp_arcs(a, b))
                .collect()
        })
    }

    /// Arcs leaving `n`, in arc order. Empty for an unknown node.
    pub fn arcs_from(&self, n: NodeId) -> Vec<ArcId> {
        self.slot(n)
            .map(|s| {
                s.outgoing
                    .iter()
                    .copied()
                    .sorted_by(|&a, &b| self.cmp_arcs(a, b))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Arcs entering `n`, in arc order. Empty for an unknown node.
    pub fn arcs_to(&self, n: NodeId) -> Vec<ArcId> {
        self.slot(n)
            .map(|s| {
                s.incoming
                    .iter()
                    .copied()
                    .sorted_by(|&a, &b| self.cmp_arcs(a, b))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct nodes reachable from `n` over one arc, sorted by name.
    pub fn neighbors(&self, n: NodeId) -> Vec<NodeId> {
        self.arcs_from(n)
            .into_iter()
            .filter_map(|a| self.arc(a).map(ArcLike::finish))
            .dedup()
            .collect()
    }

    /// `true` if at least one arc runs `from -> to`.
    pub fn is_connected_to(&self, from: NodeId, to: NodeId) -> bool {
        self.slot(from).is_some_and(|s| {
            s.outgoing
                .iter()
                .any(|&a| self.arc(a).is_some_and(|arc| arc.finish() == to))
        })
    }

    #[inline]
    pub fn out_degree(&self, n: NodeId) -> usize {
        self.slot(n).map_or(0, |s| s.outgoing.len())
    }

    #[inline]
    pub fn in_degree(&self, n: NodeId) -> usize {
        self.slot(n).map_or(0, |s| s.incoming.len())
    }

    /// First arc (in arc order) running opposite to `arc`, other than `arc`
    /// itself.
    pub fn reciprocal_of(&self, arc: ArcId) -> Option<ArcId> {
        let a = self.arc(arc)?;
        self.arcs_from(a.finish())
            .into_iter()
            .find(|&r| r != arc && self.arc(r).is_some_and(|b| b.is_reverse_of(a)))
    }

    /// `start -> finish` label of an arc.
    pub fn arc_label(&self, arc: ArcId) -> Option<String> {
        let a = self.arc(arc)?;
        Some(format!(
            "{} -> {}",
            self.name_of(a.start())?,
            self.name_of(a.finish())?
        ))
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Check that `spec` can be passed to [`Graph::add_node`] without error.
    fn check_spec(&self, spec: &NodeSpec<'_>) -> Result<(), GraphError> {
        match spec {
            NodeSpec::Name(n) if n.is_empty() => Err(GraphError::InvalidArgument(
                "node name must not be empty".into(),
            )),
            NodeSpec::Name(_) => Ok(()),
            NodeSpec::Id(id) if self.contains_node(*id) => Ok(()),
            NodeSpec::Id(id) => Err(GraphError::InvalidArgument(format!(
                "{id} is not a node of this graph"
            ))),
        }
    }

    /// Id the node registered `pending` places after the next one will get.
    fn next_node_id(&self, pending: usize) -> Result<NodeId, GraphError> {
        u32::try_from(self.nodes.len() + pending)
            .map(NodeId::new)
            .map_err(|_| GraphError::InvalidArgument("node arena exhausted".into()))
    }

    /// Build a node called `name` through the factory without registering it.
    fn build_node(&self, name: &str) -> Result<F::Node, GraphError> {
        let node = self.factory.create_node(name);
        if node.name() != name {
            return Err(GraphError::InvalidArgument(format!(
                "factory built node `{}` when asked for `{name}`",
                node.name()
            )));
        }
        Ok(node)
    }

    /// Resolve a checked spec to the id it will have, building the node when
    /// the name is new. `pending` counts nodes staged earlier in the same call.
    fn stage_node(
        &self,
        spec: &NodeSpec<'_>,
        pending: usize,
    ) -> Result<(NodeId, Option<F::Node>), GraphError> {
        match spec {
            NodeSpec::Id(id) => Ok((*id, None)),
            NodeSpec::Name(name) => match self.node_id(name) {
                Some(id) => Ok((id, None)),
                None => Ok((self.next_node_id(pending)?, Some(self.build_node(name)?))),
            },
        }
    }

    fn next_arc_id(&self) -> Result<ArcId, GraphError> {
        u32::try_from(self.arcs.len())
            .map(ArcId::new)
            .map_err(|_| GraphError::InvalidArgument("arc arena exhausted".into()))
    }

    fn register_node(&mut self, node: F::Node) -> Result<NodeId, GraphError> {
        let id = self.next_node_id(0)?;
        self.index.insert(node.name().to_owned(), id);
        self.nodes.push(Some(NodeSlot {
            node,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }));
        self.invalidate_cache();
        Ok(id)
    }

    /// Returns the node named by `spec`, creating it through the factory when a
    /// name is not yet present. Adding the same name twice returns the same id.
    ///
    /// # Errors
    /// [`GraphError::InvalidArgument`] for an empty name or an id that is not
    /// a live node of this graph.
    ///
    /// # Example
    /// ```rust
    /// use arcgraph::topology::graph::Graph;
    /// let mut g = Graph::new();
    /// let a = g.add_node("A").unwrap();
    /// assert_eq!(g.add_node("A").unwrap(), a);
    /// assert_eq!(g.node_count(), 1);
    /// ```
    pub fn add_node<'s>(&mut self, spec: impl Into<NodeSpec<'s>>) -> Result<NodeId, GraphError> {
        let spec = spec.into();
        self.check_spec(&spec)?;
        match spec {
            NodeSpec::Id(id) => Ok(id),
            NodeSpec::Name(name) => {
                if let Some(id) = self.node_id(&name) {
                    return Ok(id);
                }
                let node = self.build_node(&name)?;
                let id = self.register_node(node)?;
                crate::debug_invariants!(&*self, "Graph::add_node");
                Ok(id)
            }
        }
    }

    /// Registers a node value built by the caller.
    ///
    /// # Errors
    /// [`GraphError::DuplicateName`] if another node already uses the name,
    /// [`GraphError::InvalidArgument`] for an empty name.
    pub fn insert_node(&mut self, node: F::Node) -> Result<NodeId, GraphError> {
        if node.name().is_empty() {
            return Err(GraphError::InvalidArgument(
                "node name must not be empty".into(),
            ));
        }
        if self.index.contains_key(node.name()) {
            return Err(GraphError::DuplicateName(node.name().to_owned()));
        }
        let id = self.register_node(node)?;
        crate::debug_invariants!(&*self, "Graph::insert_node");
        Ok(id)
    }

    /// Removes a node together with every arc entering or leaving it and
    /// returns the node value.
    ///
    /// # Errors
    /// [`GraphError::NotFound`] if the node is not in the graph; the graph is
    /// left untouched.
    pub fn remove_node<'s>(&mut self, spec: impl Into<NodeSpec<'s>>) -> Result<F::Node, GraphError> {
        let spec = spec.into();
        let id = self
            .resolve(&spec)
            .ok_or_else(|| GraphError::NotFound(format!("node {spec}")))?;

        let incident: Vec<ArcId> = self
            .slot(id)
            .map(|s| {
                s.outgoing
                    .iter()
                    .chain(s.incoming.iter())
                    .copied()
                    .sorted()
                    .dedup()
                    .collect()
            })
            .unwrap_or_default();
        for a in incident {
            self.unlink_arc(a);
        }

        let slot = self.nodes[id.index()]
            .take()
            .ok_or_else(|| GraphError::NotFound(format!("node {spec}")))?;
        self.index.remove(slot.node.name());
        self.invalidate_cache();
        log::trace!("removed node {} and its incident arcs", slot.node.name());
        crate::debug_invariants!(&*self, "Graph::remove_node");
        Ok(slot.node)
    }

    /// Adds an arc `from -> to`, creating either endpoint by name if needed.
    ///
    /// # Errors
    /// [`GraphError::InvalidArgument`] if either spec is malformed or the
    /// factory builds a mismatched element. No node is created on failure.
    ///
    /// # Example
    /// ```rust
    /// use arcgraph::topology::graph::Graph;
    /// let mut g = Graph::new();
    /// g.add_arc("A", "B").unwrap();
    /// g.add_arc("A", "B").unwrap(); // parallel arcs are kept
    /// assert_eq!(g.node_count(), 2);
    /// assert_eq!(g.arc_count(), 2);
    /// assert_eq!(g.to_string(), "<A -> B, A -> B>");
    /// ```
    pub fn add_arc<'a, 'b>(
        &mut self,
        from: impl Into<NodeSpec<'a>>,
        to: impl Into<NodeSpec<'b>>,
    ) -> Result<ArcId, GraphError> {
        let (from, to) = (from.into(), to.into());
        self.check_spec(&from)?;
        self.check_spec(&to)?;
        self.next_arc_id()?;

        // Nothing is registered until both nodes and the arc have been built.
        let (start, new_start) = self.stage_node(&from, 0)?;
        let self_loop = matches!((&from, &to), (NodeSpec::Name(a), NodeSpec::Name(b)) if a == b);
        let (finish, new_finish) = if self_loop {
            (start, None)
        } else {
            self.stage_node(&to, usize::from(new_start.is_some()))?
        };
        let arc = self.factory.create_arc(start, finish);
        if arc.endpoints() != (start, finish) {
            return Err(GraphError::InvalidArgument(
                "factory built an arc with different endpoints".into(),
            ));
        }
        for node in [new_start, new_finish].into_iter().flatten() {
            self.register_node(node)?;
        }
        let id = self.register_arc(arc)?;
        crate::debug_invariants!(&*self, "Graph::add_arc");
        Ok(id)
    }

    /// Registers an arc value built by the caller.
    ///
    /// # Errors
    /// [`GraphError::InvalidArgument`] if either endpoint is not a live node.
    pub fn insert_arc(&mut self, arc: F::Arc) -> Result<ArcId, GraphError> {
        for end in [arc.start(), arc.finish()] {
            if !self.contains_node(end) {
                return Err(GraphError::InvalidArgument(format!(
                    "arc endpoint {end} is not a node of this graph"
                )));
            }
        }
        let id = self.register_arc(arc)?;
        crate::debug_invariants!(&*self, "Graph::insert_arc");
        Ok(id)
    }

    /// Endpoints must already be live.
    fn register_arc(&mut self, arc: F::Arc) -> Result<ArcId, GraphError> {
        let id = self.next_arc_id()?;
        let (start, finish) = arc.endpoints();
        self.arcs.push(Some(arc));
        if let Some(s) = self.slot_mut(start) {
            s.outgoing.push(id);
        }
        if let Some(s) = self.slot_mut(finish) {
            s.incoming.push(id);
        }
        self.arc_count += 1;
        self.invalidate_cache();
        Ok(id)
    }

    /// Removes an arc from the arena and both endpoints' incidence lists and
    /// returns its value.
    ///
    /// # Errors
    /// [`GraphError::NotFound`] if `id` is not a live arc.
    pub fn remove_arc(&mut self, id: ArcId) -> Result<F::Arc, GraphError> {
        if !self.contains_arc(id) {
            return Err(GraphError::NotFound(format!("arc {id}")));
        }
        let arc = self
            .unlink_arc(id)
            .ok_or_else(|| GraphError::NotFound(format!("arc {id}")))?;
        crate::debug_invariants!(&*self, "Graph::remove_arc");
        Ok(arc)
    }

    fn unlink_arc(&mut self, id: ArcId) -> Option<F::Arc> {
        let arc = self.arcs.get_mut(id.index())?.take()?;
        let (start, finish) = arc.endpoints();
        if let Some(s) = self.slot_mut(start) {
            s.outgoing.retain(|&a| a != id);
        }
        if let Some(s) = self.slot_mut(finish) {
            s.incoming.retain(|&a| a != id);
        }
        self.arc_count -= 1;
        self.invalidate_cache();
        Some(arc)
    }
}

impl<F: GraphFactory> InvalidateCache for Graph<F> {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.sorted_nodes.take();
        self.sorted_arcs.take();
    }
}

impl<F: GraphFactory> DebugInvariants for Graph<F> {
    fn validate_invariants(&self) -> Result<(), GraphError> {
        let fail = |msg: String| -> Result<(), GraphError> {
            Err(GraphError::InvariantViolation(msg))
        };

        let live_nodes = self.nodes.iter().flatten().count();
        if live_nodes != self.index.len() {
            return fail(format!(
                "{live_nodes} live nodes but {} indexed names",
                self.index.len()
            ));
        }
        for (name, &id) in &self.index {
            match self.name_of(id) {
                Some(n) if n == name => {}
                Some(n) => return fail(format!("index maps `{name}` to {id} named `{n}`")),
                None => return fail(format!("index maps `{name}` to dead {id}")),
            }
        }

        let live_arcs = self.arcs.iter().flatten().count();
        if live_arcs != self.arc_count {
            return fail(format!(
                "{live_arcs} live arcs but arc_count is {}",
                self.arc_count
            ));
        }
        let (mut outs, mut ins) = (0usize, 0usize);
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(slot) = slot else { continue };
            let here = NodeId::new(i as u32);
            for &a in &slot.outgoing {
                match self.arc(a) {
                    Some(arc) if arc.start() == here => {}
                    Some(_) => return fail(format!("{a} listed as outgoing of {here} but starts elsewhere")),
                    None => return fail(format!("dead {a} listed as outgoing of {here}")),
                }
            }
            for &a in &slot.incoming {
                match self.arc(a) {
                    Some(arc) if arc.finish() == here => {}
                    Some(_) => return fail(format!("{a} listed as incoming of {here} but finishes elsewhere")),
                    None => return fail(format!("dead {a} listed as incoming of {here}")),
                }
            }
            outs += slot.outgoing.len();
            ins += slot.incoming.len();
        }
        // Every listed id is live with matching endpoints, so equal totals
        // mean each arc is listed exactly once per direction.
        if outs != self.arc_count || ins != self.arc_count {
            return fail(format!(
                "{} arcs but {outs} outgoing and {ins} incoming registrations",
                self.arc_count
            ));
        }
        for (i, arc) in self.arcs.iter().enumerate() {
            let Some(arc) = arc else { continue };
            let id = ArcId::new(i as u32);
            let registered = self
                .slot(arc.start())
                .is_some_and(|s| s.outgoing.contains(&id))
                && self
                    .slot(arc.finish())
                    .is_some_and(|s| s.incoming.contains(&id));
            if !registered {
                return fail(format!("{id} is missing from its endpoints' incidence lists"));
            }
        }
        Ok(())
    }
}

impl<F> Clone for Graph<F>
where
    F: GraphFactory + Clone,
    F::Node: Clone,
    F::Arc: Clone,
{
    fn clone(&self) -> Self {
        Graph {
            factory: self.factory.clone(),
            nodes: self.nodes.clone(),
            arcs: self.arcs.clone(),
            index: self.index.clone(),
            arc_count: self.arc_count,
            sorted_nodes: OnceCell::new(),
            sorted_arcs: OnceCell::new(),
        }
    }
}

impl<F> fmt::Debug for Graph<F>
where
    F: GraphFactory,
    F::Node: fmt::Debug,
    F::Arc: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes().iter().map(|&n| self.node(n)).collect::<Vec<_>>())
            .field("arcs", &self.arcs().iter().map(|&a| self.arc(a)).collect::<Vec<_>>())
            .finish()
    }
}

/// `<A -> B, B -> A>` in arc order.
impl<F: GraphFactory> fmt::Display for Graph<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .arcs()
            .iter()
            .filter_map(|&a| self.arc_label(a))
            .join(", ");
        write!(f, "<{body}>")
    }
}
