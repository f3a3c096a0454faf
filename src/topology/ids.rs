//! `NodeId` / `ArcId`: strong, zero-cost handles into a graph's arenas
//!
//! A [`Graph`](crate::topology::graph::Graph) owns every node and arc it
//! contains. Callers and the elements themselves refer to each other through
//! these handles instead of references, so there is no Node ↔ Arc ownership
//! cycle and removal can never leave a dangling pointer behind.
//!
//! Ids are handed out monotonically and are never recycled within one graph
//! (until [`Graph::clear`](crate::topology::graph::Graph::clear)); a stale id
//! simply fails to resolve.

use std::fmt;

/// Handle of a node inside one [`Graph`](crate::topology::graph::Graph).
///
/// # Memory layout
/// `repr(transparent)` over `u32`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u32);

/// Handle of an arc inside one [`Graph`](crate::topology::graph::Graph).
///
/// Arc ids double as the stable tiebreak between parallel arcs: a lower id
/// was inserted earlier.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ArcId(u32);

impl NodeId {
    /// Wraps a raw arena index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Returns the raw arena index.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl ArcId {
    /// Wraps a raw arena index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ArcId(raw)
    }

    /// Returns the raw arena index.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.0).finish()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Debug for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArcId").field(&self.0).finish()
    }
}

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// Testing and assertions
// -----------------------------------------------------------------------------
