//! GraphError: Unified error type for arcgraph public APIs
//!
//! Every fallible operation in the crate (graph mutation, record loading,
//! text parsing and both traversal algorithms) reports failure through this
//! type. Operations validate before they mutate, so an `Err` never leaves a
//! [`Graph`](crate::topology::graph::Graph) half-updated.

use thiserror::Error;

/// Unified error type for graph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Malformed node or arc argument (empty name, foreign id, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Removal or lookup of a node or arc that is not a member of the graph.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Two distinct nodes were registered under the same name.
    #[error("Duplicate node name `{0}` in graph")]
    DuplicateName(String),
    /// Malformed graph description or option string.
    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },
    /// The Euler precondition rejected the graph before any search ran.
    #[error("No Euler path exists: {odd_nodes} nodes violate the degree condition")]
    NoPathExists { odd_nodes: usize },
    /// A DFS rooted at the first node did not reach every node.
    #[error("Graph is disconnected: DFS reached {reached} of {total} nodes")]
    Disconnected { reached: usize, total: usize },
    /// The caller raised the cancellation flag of a running search.
    #[error("Euler path search cancelled")]
    SearchCancelled,
    /// Reading a graph description from disk failed.
    #[error("I/O error: {0}")]
    Io(String),
    /// Internal incidence bookkeeping disagrees with the arc arena.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl GraphError {
    /// Shorthand for a [`GraphError::ParseError`] on `line`.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        GraphError::ParseError {
            line,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for GraphError {
    fn from(e: std::io::Error) -> Self {
        GraphError::Io(e.to_string())
    }
}
