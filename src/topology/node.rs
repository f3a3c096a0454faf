//! Node: a named vertex with an open attribute map.
//!
//! The graph only needs a name from a node (plus attribute access for
//! loading), captured by [`NodeLike`]. Clients that want richer per-node data
//! implement `NodeLike` on their own type and hand the graph a
//! [`GraphFactory`](crate::topology::factory::GraphFactory) that builds it.
//!
//! Incident arcs are not stored on the node value; the graph keeps them beside
//! it and answers [`Graph::arcs_from`](crate::topology::graph::Graph::arcs_from)
//! and [`Graph::arcs_to`](crate::topology::graph::Graph::arcs_to).

use crate::topology::attributes::{Attributed, Attributes};
use std::fmt;

/// Minimal capability set the graph requires from a node type.
pub trait NodeLike: Attributed {
    /// Unique name of the node within its graph.
    fn name(&self) -> &str;
}

/// Plain node produced by [`DefaultFactory`](crate::topology::factory::DefaultFactory).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    name: String,
    /// Client attributes (`x=100, filled=true, ...`).
    pub attributes: Attributes,
}

impl Node {
    /// Construct a node called `name` with no attributes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arcgraph::topology::node::{Node, NodeLike};
    /// let n = Node::new("A");
    /// assert_eq!(n.name(), "A");
    /// assert!(n.attributes.is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }
}

impl NodeLike for Node {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }
}

impl Attributed for Node {
    #[inline]
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    #[inline]
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

/// Prints the name followed by an option block when attributes are present:
/// `A (x=1, y=2)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.attributes.is_empty() {
            write!(
                f,
                " ({})",
                crate::topology::attributes::format_attributes(&self.attributes)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::attributes::AttrValue;

    #[test]
    fn display_with_and_without_attributes() {
        let mut n = Node::new("A");
        assert_eq!(n.to_string(), "A");
        n.set_attr("visited", false);
        n.set_attr("depth", 3i64);
        assert_eq!(n.to_string(), "A (depth=3, visited=false)");
    }

    #[test]
    fn later_attributes_overwrite() {
        let mut n = Node::new("B");
        n.apply_attributes(vec![
            ("x".to_string(), AttrValue::Int(1)),
            ("x".to_string(), AttrValue::Int(2)),
        ]);
        assert_eq!(n.attr("x"), Some(&AttrValue::Int(2)));
    }
}
