//! Graph algorithms over a borrowed [`Graph`](crate::topology::graph::Graph).
pub mod articulation;
pub mod euler;

pub use articulation::{find_articulation_points, find_articulation_points_with};
pub use euler::{find_euler_paths, find_first_euler_path};
