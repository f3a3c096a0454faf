//! Top-level module for the graph data model.
//!
//! This module provides:
//! - [`ids`]: `NodeId` / `ArcId` handles into the graph arenas
//! - [`attributes`]: typed open attribute maps for nodes and arcs
//! - [`node`] and [`arc`]: the element traits and their plain implementations
//! - [`factory`]: the construction hook that lets clients substitute richer
//!   element types
//! - [`graph`]: the owning `Graph` container
//! - [`load`]: bulk population from parsed records
//!
//! Most users will build a [`graph::Graph`] (directly or through
//! [`crate::io::text`]) and pass it to the algorithms in [`crate::algs`].

pub mod arc;
pub mod attributes;
pub mod cache;
pub mod factory;
pub mod graph;
pub mod ids;
pub mod load;
pub mod node;

pub use cache::InvalidateCache;

#[cfg(test)]
mod tests;
