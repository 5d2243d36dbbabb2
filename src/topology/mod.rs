//! Top-level module for the simplicial complex index.
//!
//! This module provides the core types and traits for storing a filtered
//! simplicial complex as a simplex tree. It includes:
//! - Vertex bounds and stable simplex handles
//! - Compile-time storage options (keys, filtrations, coface index, ...)
//! - The [`SimplexTree`] itself, split per engine (insertion, expansion,
//!   filtration order, removal, cofaces, dynamic flag maintenance)
//!
//! Most users will build a [`SimplexTree`] with [`FullFeatured`] options and
//! read it back through `filtration_simplex_range`.

pub(crate) mod _debug_invariants;
pub mod bounds;
pub mod cache;
pub mod handle;
pub mod options;
pub mod simplex_tree;

pub use cache::InvalidateCache;
pub use handle::{Insertion, SiblingId, SimplexHandle};
pub use options::{
    FastPersistence, FullFeatured, Minimal, MorsePersistence, SimplexTreeOptions,
    ZigzagPersistence,
};
pub use simplex_tree::SimplexTree;
