//! Graph description I/O.
//!
//! Readers turn a byte stream into a populated [`Graph`] built through a
//! caller-chosen factory; writers serialize a graph back into the same
//! format. The [`text`] module implements the line-oriented
//! `a -> b (options)` format.

pub mod text;

use crate::graph_error::GraphError;
use crate::topology::factory::GraphFactory;
use crate::topology::graph::Graph;
use std::io::{Read, Write};

/// Trait for readers that build a graph from a description.
pub trait GraphReader {
    /// Parse a description from `reader`, creating elements through `factory`.
    fn read<R: Read, F: GraphFactory>(&self, reader: R, factory: F)
    -> Result<Graph<F>, GraphError>;
}

/// Trait for writers that serialize a graph.
pub trait GraphWriter {
    /// Write `graph` to `writer`.
    fn write<W: Write, F: GraphFactory>(&self, writer: W, graph: &Graph<F>)
    -> Result<(), GraphError>;
}
