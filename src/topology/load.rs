//! Bulk population of a [`Graph`] from parsed records.
//!
//! A record source (for example [`crate::io::text::parse_records`]) turns each
//! logical line of a graph description into a [`Record`]. [`Graph::load`]
//! applies them in order: node declarations create the node and set its
//! attributes, edge declarations create one arc (directed) or a reciprocal
//! pair (undirected), each with its own copy of the attributes.

use crate::graph_error::GraphError;
use crate::topology::attributes::{Attributed, Attributes};
use crate::topology::factory::GraphFactory;
use crate::topology::graph::Graph;
use crate::topology::ids::ArcId;

/// One declaration of a graph description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Record {
    /// `name (k=v, ...)`
    Node { name: String, attrs: Attributes },
    /// `from -> to (k=v, ...)` when `directed`, `from - to (...)` otherwise.
    Edge {
        from: String,
        to: String,
        directed: bool,
        attrs: Attributes,
    },
}

impl Record {
    /// A node declaration without attributes.
    pub fn node(name: impl Into<String>) -> Self {
        Record::Node {
            name: name.into(),
            attrs: Attributes::new(),
        }
    }

    /// A directed edge declaration without attributes.
    pub fn arc(from: impl Into<String>, to: impl Into<String>) -> Self {
        Record::Edge {
            from: from.into(),
            to: to.into(),
            directed: true,
            attrs: Attributes::new(),
        }
    }

    /// An undirected edge declaration without attributes.
    pub fn edge(from: impl Into<String>, to: impl Into<String>) -> Self {
        Record::Edge {
            from: from.into(),
            to: to.into(),
            directed: false,
            attrs: Attributes::new(),
        }
    }

    /// Replace the attributes of this record.
    pub fn with_attrs(mut self, new: Attributes) -> Self {
        match &mut self {
            Record::Node { attrs, .. } | Record::Edge { attrs, .. } => *attrs = new,
        }
        self
    }
}

/// Counts of what a [`Graph::load`] call added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub records: usize,
    pub arcs_added: usize,
}

impl<F: GraphFactory> Graph<F> {
    /// Apply `records` in order.
    ///
    /// The first `Err` yielded by the source is returned unchanged and stops the
    /// load; records applied before it remain in the graph. Each record is
    /// applied atomically, so the graph invariants hold at every point.
    ///
    /// # Example
    /// ```rust
    /// use arcgraph::topology::graph::Graph;
    /// use arcgraph::topology::load::Record;
    /// let mut g = Graph::new();
    /// g.load([Record::edge("A", "B"), Record::arc("B", "C")].map(Ok)).unwrap();
    /// assert_eq!(g.to_string(), "<A -> B, B -> A, B -> C>");
    /// ```
    pub fn load<I>(&mut self, records: I) -> Result<LoadSummary, GraphError>
    where
        I: IntoIterator<Item = Result<Record, GraphError>>,
    {
        let mut summary = LoadSummary::default();
        for record in records {
            summary.arcs_added += self.apply_record(record?)?.len();
            summary.records += 1;
        }
        log::debug!(
            "loaded {} records ({} arcs); graph now has {} nodes and {} arcs",
            summary.records,
            summary.arcs_added,
            self.node_count(),
            self.arc_count()
        );
        Ok(summary)
    }

    /// Apply a single record, returning the arcs it created.
    pub fn apply_record(&mut self, record: Record) -> Result<Vec<ArcId>, GraphError> {
        match record {
            Record::Node { name, attrs } => {
                let id = self.add_node(name)?;
                if let Some(node) = self.node_mut(id) {
                    node.apply_attributes(attrs);
                }
                Ok(Vec::new())
            }
            Record::Edge {
                from,
                to,
                directed,
                attrs,
            } => {
                let mut created = Vec::with_capacity(2);
                let forward = self.add_arc(&from, &to)?;
                created.push(forward);
                if !directed {
                    // add_arc(&from, &to) succeeded, so both names are valid
                    // and this cannot fail half-way.
                    created.push(self.add_arc(&to, &from)?);
                }
                for &a in &created {
                    if let Some(arc) = self.arc_mut(a) {
                        arc.apply_attributes(attrs.clone());
                    }
                }
                Ok(created)
            }
        }
    }
}
