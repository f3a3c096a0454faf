//! Structural self-checks for graph containers.
//!
//! [`Graph`](crate::topology::graph::Graph) keeps three views of its arcs in
//! lock step: the arc arena, every node's outgoing list and every node's
//! incoming list. Mutators re-validate those views through
//! [`debug_invariants!`](crate::debug_invariants) when invariant checking is
//! compiled in.

use crate::graph_error::GraphError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), GraphError>;

    /// Panic on the first violated invariant.
    fn debug_assert_invariants(&self) {
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] {e}");
        }
    }
}

/// Validate `$target` and panic with `$ctx` on error when invariant checking
/// is enabled (debug builds, `strict-invariants` or `check-invariants`).
#[macro_export]
macro_rules! debug_invariants {
    ($target:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $crate::debug_invariants::DebugInvariants::validate_invariants($target) {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
