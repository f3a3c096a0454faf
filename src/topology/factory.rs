//! Element construction hook for [`Graph`](crate::topology::graph::Graph).
//!
//! The graph builds every node and arc it creates on its own (from a name in
//! `add_node`, from two endpoints in `add_arc`, from records in `load`)
//! through a [`GraphFactory`]. Swapping the factory swaps the element types
//! without touching the graph code.

use crate::topology::arc::{Arc, ArcLike};
use crate::topology::ids::NodeId;
use crate::topology::node::{Node, NodeLike};

/// Builds the node and arc values stored in a graph.
pub trait GraphFactory {
    type Node: NodeLike;
    type Arc: ArcLike;

    /// Build a node called `name`. The returned node must report `name`
    /// from [`NodeLike::name`].
    fn create_node(&self, name: &str) -> Self::Node;

    /// Build an arc `start -> finish`. The returned arc must report the same
    /// endpoints from [`ArcLike::start`] / [`ArcLike::finish`].
    fn create_arc(&self, start: NodeId, finish: NodeId) -> Self::Arc;
}

/// Factory for the plain [`Node`] / [`Arc`] types.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultFactory;

impl GraphFactory for DefaultFactory {
    type Node = Node;
    type Arc = Arc;

    #[inline]
    fn create_node(&self, name: &str) -> Node {
        Node::new(name)
    }

    #[inline]
    fn create_arc(&self, start: NodeId, finish: NodeId) -> Arc {
        Arc::new(start, finish)
    }
}
