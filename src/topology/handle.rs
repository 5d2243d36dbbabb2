//! Stable identifiers for sibling sets and simplices.
//!
//! A [`SiblingId`] addresses one sibling set in the tree arena; the generation
//! counter detects reuse of a freed slot. A [`SimplexHandle`] names one
//! `(vertex, node)` entry inside one sibling set. Its identity is the pair
//! `(sibling set, vertex)`; the cached position is only a lookup hint and
//! does not take part in equality or hashing.

use crate::topology::bounds::VertexLike;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Index of a sibling set in the arena, tagged with the slot generation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiblingId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl SiblingId {
    /// The root sibling set (the vertices) always lives in slot 0.
    pub const ROOT: SiblingId = SiblingId { index: 0, generation: 0 };
    /// Sentinel used by null handles.
    pub const NULL: SiblingId = SiblingId { index: u32::MAX, generation: u32::MAX };

    #[inline]
    pub const fn is_root(self) -> bool {
        self.index == 0
    }
}

impl fmt::Debug for SiblingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == SiblingId::NULL {
            f.write_str("SiblingId(null)")
        } else {
            write!(f, "SiblingId({}#{})", self.index, self.generation)
        }
    }
}

/// Stable reference to one simplex of a [`SimplexTree`](crate::topology::SimplexTree).
///
/// Valid while the sibling set holding it has not been collapsed. Handles
/// survive insertions of other simplices; the position hint is refreshed by
/// a binary search when it goes stale.
#[derive(Copy, Clone, Debug)]
pub struct SimplexHandle<V> {
    pub(crate) sib: SiblingId,
    pub(crate) vertex: V,
    pub(crate) hint: u32,
}

impl<V: VertexLike> SimplexHandle<V> {
    #[inline]
    pub(crate) fn new(sib: SiblingId, vertex: V, hint: usize) -> Self {
        Self {
            sib,
            vertex,
            hint: u32::try_from(hint).unwrap_or(u32::MAX),
        }
    }

    /// The handle returned by failed lookups.
    #[inline]
    pub fn null() -> Self {
        Self {
            sib: SiblingId::NULL,
            vertex: V::null_vertex(),
            hint: u32::MAX,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.sib == SiblingId::NULL
    }

    /// Label of the node, i.e. the largest vertex of the simplex.
    #[inline]
    pub fn vertex(&self) -> V {
        self.vertex
    }

    /// Sibling set holding the node.
    #[inline]
    pub fn siblings(&self) -> SiblingId {
        self.sib
    }
}

impl<V: PartialEq> PartialEq for SimplexHandle<V> {
    fn eq(&self, other: &Self) -> bool {
        self.sib == other.sib && self.vertex == other.vertex
    }
}

impl<V: Eq> Eq for SimplexHandle<V> {}

impl<V: Hash> Hash for SimplexHandle<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sib.hash(state);
        self.vertex.hash(state);
    }
}

/// Outcome of inserting a simplex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Insertion<V> {
    /// The simplex was not in the complex and has been created.
    Inserted(SimplexHandle<V>),
    /// The simplex existed with a larger filtration, which was lowered.
    Updated(SimplexHandle<V>),
    /// The simplex existed with a filtration no larger than the requested one.
    Unchanged,
}

impl<V: Copy> Insertion<V> {
    /// Handle of the inserted or updated simplex.
    #[inline]
    pub fn handle(&self) -> Option<SimplexHandle<V>> {
        match *self {
            Insertion::Inserted(h) | Insertion::Updated(h) => Some(h),
            Insertion::Unchanged => None,
        }
    }

    #[inline]
    pub fn is_inserted(&self) -> bool {
        matches!(self, Insertion::Inserted(_))
    }

    #[inline]
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Insertion::Unchanged)
    }
}
