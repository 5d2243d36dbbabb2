//! ComplexError: unified error type for simplex-tree public APIs
//!
//! Every contract violation a caller can trigger (stale handles, unsorted
//! vertex lists, removing a non-maximal simplex, ...) surfaces as one of these
//! variants instead of a panic.

use thiserror::Error;

/// Unified error type for simplex-tree operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComplexError {
    /// An operation that needs a real simplex received the null handle.
    #[error("null simplex handle passed to `{0}`")]
    NullSimplex(&'static str),
    /// The handle refers to a sibling set that has been removed, or to a
    /// vertex that is no longer stored in it.
    #[error("stale simplex handle: the simplex is no longer in the complex")]
    StaleHandle,
    /// `remove_maximal_simplex` was called on a simplex with cofaces.
    #[error("simplex {0} has cofaces and cannot be removed as maximal")]
    HasChildren(String),
    /// A pre-sorted API received a vertex list that is not strictly increasing.
    #[error("vertex list {0} is not strictly increasing")]
    UnsortedVertices(String),
    /// The null vertex (-1) was used as a real vertex label.
    #[error("the null vertex cannot label a simplex")]
    NullVertex,
    /// A nonzero filtration value was assigned while filtrations are not stored.
    #[error("filtration values are not stored; cannot assign {0}")]
    FiltrationNotStored(f64),
    /// The operation needs a storage option that this tree was built without.
    #[error("operation requires the `{0}` option")]
    OptionDisabled(&'static str),
    /// `insert_graph` received an edge from a vertex to itself.
    #[error("self-loop on vertex {0} is not simplicial")]
    SelfLoop(String),
    /// `insert_graph` requires an empty complex.
    #[error("complex must be empty (holds {0} simplices)")]
    NotEmpty(usize),
    /// The handle does not name an edge.
    #[error("expected an edge, got a simplex of dimension {0}")]
    NotAnEdge(i32),
    /// Flag expansion was requested on a complex of dimension above one.
    #[error("flag expansion needs a graph, complex has dimension {0}")]
    NotAGraph(i32),
    /// Structural invariant violation found by `validate_invariants`.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
