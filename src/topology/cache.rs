//! Cache invalidation for derived complex data.

/// Anything that caches data derived from the tree shape (filtration order,
/// keys, ...) implements this.
pub trait InvalidateCache {
    /// Drop every cached derivation so the next query recomputes it.
    fn invalidate_cache(&mut self);
}

