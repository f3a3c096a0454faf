//! Arc: a directed connection between two nodes of one graph.
//!
//! An arc stores its endpoints as [`NodeId`]s into the owning graph, never as
//! references. An undirected edge of a graph description becomes a reciprocal
//! pair of arcs, one per direction, each with its own attributes; nothing in
//! the model ties the two together.

use crate::topology::attributes::{Attributed, Attributes};
use crate::topology::ids::NodeId;

/// Minimal capability set the graph requires from an arc type.
pub trait ArcLike: Attributed {
    /// Node the arc leaves.
    fn start(&self) -> NodeId;
    /// Node the arc enters.
    fn finish(&self) -> NodeId;

    /// Returns the `(start, finish)` endpoints.
    #[inline]
    fn endpoints(&self) -> (NodeId, NodeId) {
        (self.start(), self.finish())
    }

    /// `true` if `other` runs between the same nodes in the opposite
    /// direction. A self-loop is the reverse of any parallel self-loop.
    #[inline]
    fn is_reverse_of<B: ArcLike>(&self, other: &B) -> bool {
        self.start() == other.finish() && self.finish() == other.start()
    }
}

/// Plain arc produced by [`DefaultFactory`](crate::topology::factory::DefaultFactory).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arc {
    start: NodeId,
    finish: NodeId,
    /// Client attributes (`weight=3, walked=false, ...`).
    pub attributes: Attributes,
}

impl Arc {
    /// Construct an arc `start -> finish` with no attributes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arcgraph::topology::arc::{Arc, ArcLike};
    /// use arcgraph::topology::ids::NodeId;
    /// let a = Arc::new(NodeId::new(0), NodeId::new(1));
    /// assert_eq!(a.endpoints(), (NodeId::new(0), NodeId::new(1)));
    /// ```
    #[inline]
    pub fn new(start: NodeId, finish: NodeId) -> Self {
        Arc {
            start,
            finish,
            attributes: Attributes::new(),
        }
    }
}

impl ArcLike for Arc {
    #[inline]
    fn start(&self) -> NodeId {
        self.start
    }
    #[inline]
    fn finish(&self) -> NodeId {
        self.finish
    }
}

impl Attributed for Arc {
    #[inline]
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    #[inline]
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::attributes::AttrValue;

    fn n(i: u32) -> NodeId {
        NodeId::new(i)
    }

    #[test]
    fn reverse_detection() {
        let ab = Arc::new(n(0), n(1));
        let ba = Arc::new(n(1), n(0));
        let ab2 = Arc::new(n(0), n(1));
        assert!(ab.is_reverse_of(&ba));
        assert!(ba.is_reverse_of(&ab));
        assert!(!ab.is_reverse_of(&ab2));
    }

    #[test]
    fn self_loops_mirror_each_other() {
        let l1 = Arc::new(n(2), n(2));
        let l2 = Arc::new(n(2), n(2));
        assert!(l1.is_reverse_of(&l2));
    }

    #[test]
    fn attributes_are_independent_per_arc() {
        let mut ab = Arc::new(n(0), n(1));
        let ba = Arc::new(n(1), n(0));
        ab.set_attr("walked", true);
        assert_eq!(ab.attr("walked"), Some(&AttrValue::Bool(true)));
        assert_eq!(ba.attr("walked"), None);
    }

    #[test]
    fn serde_arc_roundtrip() {
        let mut a = Arc::new(n(3), n(4));
        a.set_attr("weight", 2.5);
        let json = serde_json::to_string(&a).unwrap();
        let back: Arc = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
