//! Cache invalidation for derived graph views.

/// Anything that memoises a view derived from its membership (sorted node
/// order, ...) implements this.
pub trait InvalidateCache {
    /// Drop every memoised view so the next query recomputes it.
    fn invalidate_cache(&mut self);
}
