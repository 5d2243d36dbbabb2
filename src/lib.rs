#![cfg_attr(docsrs, feature(doc_cfg))]
//! # simplex-tree
//!
//! simplex-tree is an in-memory index for filtered simplicial complexes, stored
//! as a simplex tree: a trie of sorted vertex lists with one node per simplex.
//! It is the combinatorial substrate persistent (co)homology algorithms run on.
//!
//! ## Features
//! - Insertion of single simplices, of simplices with all their faces, and bulk
//!   loading of a weighted graph
//! - Flag (clique) expansion of a graph, with an optional blocker oracle
//! - Filtration order with dense integer keys, boundary / star / coboundary
//!   queries, skeleton traversal
//! - Pruning above a threshold and removal of maximal simplices
//! - Edge-by-edge flag maintenance for zigzag filtrations, backed by a coface
//!   index keyed by the largest vertex of each simplex
//!
//! ## Configuration
//! Storage is chosen at compile time through
//! [`SimplexTreeOptions`](topology::options::SimplexTreeOptions); disabled
//! slots (keys, filtration values, annotations, ...) are zero-sized. Cargo
//! features:
//! - `rayon`: parallel sort when building the filtration order
//! - `strict-invariants` / `check-invariants`: structural validation after bulk
//!   mutations in release builds (always on in debug builds)
//!
//! ## Usage
//! ```rust
//! use simplex_tree::prelude::*;
//!
//! let mut st = SimplexTree::<FullFeatured>::new();
//! st.insert_graph(
//!     (0..3).map(|v| (v, 0.0)),
//!     [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)],
//! )
//! .unwrap();
//! st.expansion(2).unwrap();
//! assert_eq!(st.num_simplices(), 7);
//! assert_eq!(st.filtration(st.find([0, 1, 2])), 3.0);
//!
//! // faces always come before their cofaces
//! let order = st.filtration_simplex_range().to_vec();
//! assert_eq!(st.key(order[6]), 6);
//! ```
//!
//! ## Determinism
//!
//! Filtration order is a total order (value, then reverse-lexicographic vertex
//! list), so keys do not depend on insertion history. Randomized tests fix
//! their `SmallRng` seeds.

pub mod algs;
pub mod complex_error;
pub mod debug_invariants;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::zigzag::{Direction, FlagZigzagFiltration, ZigzagEdge, ZigzagSimplex};
    pub use crate::complex_error::ComplexError;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::topology::bounds::VertexLike;
    pub use crate::topology::cache::InvalidateCache;
    pub use crate::topology::handle::{Insertion, SiblingId, SimplexHandle};
    pub use crate::topology::options::{
        FastPersistence, FullFeatured, Minimal, MorsePersistence, SimplexTreeOptions,
        ZigzagPersistence,
    };
    pub use crate::topology::simplex_tree::{BlockerVerdict, SimplexRecord, SimplexTree};
}
