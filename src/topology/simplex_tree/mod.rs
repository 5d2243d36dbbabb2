//! The simplex tree: a trie of sorted vertex lists, one node per simplex.
//!
//! A simplex `{v0 < v1 < ... < vk}` is the path `v0 -> v1 -> ... -> vk`
//! starting at the root sibling set. Nodes sharing a prefix form one sibling
//! set, kept sorted by label. A node that has no materialised coface points
//! its `children` field at its *own* sibling set; [`SimplexTree::has_children`]
//! tells the two cases apart by comparing the child set's parent label with
//! the node's label.
//!
//! The engines operating on the tree are split per file:
//! - `insert`: `insert_simplex`, `insert_simplex_and_subfaces`, `insert_graph`
//! - `expansion`: flag expansion, with and without blockers
//! - `filtration`: filtration order, keys, monotonicity repair, Hasse rows
//! - `removal`: pruning, maximal simplex removal, dimension recomputation
//! - `cofaces`: coface index, star and coboundary queries
//! - `dynamic_flag`: edge-by-edge flag maintenance for zigzag filtrations

pub(crate) mod arena;
pub mod cofaces;
mod dynamic_flag;
mod expansion;
mod filtration;
mod insert;
mod invariants;
pub mod iter;
mod removal;

pub use expansion::BlockerVerdict;
pub use filtration::SimplexRecord;
pub use iter::{BoundaryIter, ComplexSimplexIter, SimplexVertexIter};

use crate::complex_error::ComplexError;
use crate::topology::bounds::VertexLike;
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{SiblingId, SimplexHandle};
use crate::topology::options::{
    AnnotationSlot, CofaceIndexSlot, FiltrationSlot, FullFeatured, KeySlot, PairingSlot,
    SimplexTreeOptions,
};
use arena::{Node, SiblingArena};
use num_traits::ToPrimitive;
use once_cell::sync::OnceCell;
use std::fmt;

/// `{v_k, ..., v_0}` rendering used in error messages.
pub(crate) fn format_simplex<V: fmt::Display>(vertices: &[V]) -> String {
    let inner: Vec<String> = vertices.iter().map(ToString::to_string).collect();
    format!("{{{}}}", inner.join(", "))
}

/// Position of a node: sibling set plus index in its member vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Pos {
    pub(crate) sib: SiblingId,
    pub(crate) idx: usize,
}

/// Filtered simplicial complex stored as a simplex tree.
///
/// # Type Parameters
/// - `O`: storage options, see [`crate::topology::options`].
///
/// # Example
/// ```rust
/// use simplex_tree::prelude::*;
///
/// let mut st = SimplexTree::<FullFeatured>::new();
/// st.insert_simplex_and_subfaces([0, 1, 2], 0.5).unwrap();
/// assert_eq!(st.num_simplices(), 7);
/// assert_eq!(st.filtration(st.find([0, 2])), 0.5);
/// ```
#[derive(Clone)]
pub struct SimplexTree<O: SimplexTreeOptions = FullFeatured> {
    pub(crate) arena: SiblingArena<O>,
    pub(crate) cofaces: O::Cofaces,
    /// Upper bound on the dimension; exact unless `dimension_to_be_lowered`.
    pub(crate) dimension: i32,
    pub(crate) dimension_to_be_lowered: bool,
    /// Handles sorted in filtration order.
    pub(crate) filtration_vect: OnceCell<Vec<SimplexHandle<O::Vertex>>>,
    /// Keys match `filtration_vect`.
    pub(crate) keys_assigned: bool,
}

impl<O: SimplexTreeOptions> Default for SimplexTree<O> {
    fn default() -> Self {
        SimplexTree {
            arena: SiblingArena::new(),
            cofaces: O::Cofaces::default(),
            dimension: -1,
            dimension_to_be_lowered: false,
            filtration_vect: OnceCell::new(),
            keys_assigned: false,
        }
    }
}

impl<O: SimplexTreeOptions> InvalidateCache for SimplexTree<O> {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.filtration_vect.take();
        self.keys_assigned = false;
    }
}

impl<O: SimplexTreeOptions> SimplexTree<O> {
    /// Creates an empty complex.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn null_simplex() -> SimplexHandle<O::Vertex> {
        SimplexHandle::null()
    }

    #[inline]
    pub fn null_vertex() -> O::Vertex {
        O::Vertex::null_vertex()
    }

    #[inline]
    pub fn null_key() -> i64 {
        -1
    }

    /// Drops every simplex.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.cofaces.clear();
        self.dimension = -1;
        self.dimension_to_be_lowered = false;
        self.invalidate_cache();
    }

    // ---------------------------------------------------------------------
    // positions
    // ---------------------------------------------------------------------

    /// Resolve a handle to the current position of its node.
    pub(crate) fn locate(&self, h: SimplexHandle<O::Vertex>) -> Result<Pos, ComplexError> {
        if h.is_null() {
            return Err(ComplexError::NullSimplex("simplex lookup"));
        }
        let sib = self.arena.get(h.sib).ok_or(ComplexError::StaleHandle)?;
        let hint = h.hint as usize;
        let idx = match sib.members.get(hint) {
            Some((v, _)) if *v == h.vertex => hint,
            _ => sib.position(h.vertex).ok_or(ComplexError::StaleHandle)?,
        };
        Ok(Pos { sib: h.sib, idx })
    }

    #[inline]
    pub(crate) fn handle_at(&self, pos: Pos) -> SimplexHandle<O::Vertex> {
        SimplexHandle::new(pos.sib, self.label(pos), pos.idx)
    }

    #[inline]
    pub(crate) fn label(&self, pos: Pos) -> O::Vertex {
        self.arena[pos.sib].members[pos.idx].0
    }

    #[inline]
    pub(crate) fn node(&self, pos: Pos) -> &Node<O> {
        &self.arena[pos.sib].members[pos.idx].1
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, pos: Pos) -> &mut Node<O> {
        &mut self.arena[pos.sib].members[pos.idx].1
    }

    #[inline]
    pub(crate) fn depth(&self, pos: Pos) -> u32 {
        self.arena[pos.sib].depth
    }

    /// Child set of the node, if it has materialised cofaces.
    #[inline]
    pub(crate) fn children_of(&self, pos: Pos) -> Option<SiblingId> {
        let (v, node) = &self.arena[pos.sib].members[pos.idx];
        (self.arena[node.children].parent == *v).then_some(node.children)
    }

    /// Search `v` in `sib`, with the direct index at the root when vertices
    /// are contiguous.
    #[inline]
    pub(crate) fn search_in(&self, sib: SiblingId, v: O::Vertex) -> Option<usize> {
        let s = &self.arena[sib];
        if O::CONTIGUOUS_VERTICES && sib.is_root() {
            if let Some(i) = v.to_usize() {
                if matches!(s.members.get(i), Some((w, _)) if *w == v) {
                    return Some(i);
                }
            }
        }
        s.position(v)
    }

    #[inline]
    pub(crate) fn vertex_pos(&self, v: O::Vertex) -> Option<Pos> {
        self.search_in(SiblingId::ROOT, v)
            .map(|idx| Pos { sib: SiblingId::ROOT, idx })
    }

    /// Position of a strictly increasing vertex list.
    pub(crate) fn find_pos(&self, vs: &[O::Vertex]) -> Option<Pos> {
        let (&last, prefix) = vs.split_last()?;
        let mut sib = SiblingId::ROOT;
        for &v in prefix {
            let idx = self.search_in(sib, v)?;
            sib = self.children_of(Pos { sib, idx })?;
        }
        self.search_in(sib, last).map(|idx| Pos { sib, idx })
    }

    #[inline]
    pub(crate) fn find_child_pos(&self, pos: Pos, v: O::Vertex) -> Option<Pos> {
        let sib = self.children_of(pos)?;
        self.arena[sib].position(v).map(|idx| Pos { sib, idx })
    }

    /// Vertices of the simplex at `pos`, decreasing.
    pub(crate) fn vertices_desc(&self, pos: Pos) -> Vec<O::Vertex> {
        let mut out = Vec::with_capacity(self.depth(pos) as usize);
        out.push(self.label(pos));
        let mut sib = &self.arena[pos.sib];
        while let Some(up) = sib.oncles {
            out.push(sib.parent);
            sib = &self.arena[up];
        }
        out
    }

    // ---------------------------------------------------------------------
    // coface index hooks
    // ---------------------------------------------------------------------

    #[inline]
    pub(crate) fn link_node(&mut self, sib: SiblingId, v: O::Vertex) {
        self.cofaces.link(v, sib);
    }

    #[inline]
    pub(crate) fn unlink_node(&mut self, sib: SiblingId, v: O::Vertex) {
        self.cofaces.unlink(v, sib);
    }

    // ---------------------------------------------------------------------
    // lookup
    // ---------------------------------------------------------------------

    /// Finds a simplex given in any order; returns the null handle if absent.
    pub fn find<I: IntoIterator<Item = O::Vertex>>(&self, vertices: I) -> SimplexHandle<O::Vertex> {
        let mut vs: Vec<O::Vertex> = vertices.into_iter().collect();
        vs.sort_unstable();
        vs.dedup();
        self.find_pos(&vs)
            .map_or_else(SimplexHandle::null, |p| self.handle_at(p))
    }

    /// Finds a simplex given as a strictly increasing vertex list.
    pub fn find_sorted(&self, vertices: &[O::Vertex]) -> Result<SimplexHandle<O::Vertex>, ComplexError> {
        crate::topology::_debug_invariants::ensure_strictly_increasing(vertices)?;
        Ok(self
            .find_pos(vertices)
            .map_or_else(SimplexHandle::null, |p| self.handle_at(p)))
    }

    /// Handle of vertex `v`, or the null handle.
    pub fn find_vertex(&self, v: O::Vertex) -> SimplexHandle<O::Vertex> {
        self.vertex_pos(v)
            .map_or_else(SimplexHandle::null, |p| self.handle_at(p))
    }

    /// The simplex `h ∪ {v}` if it is stored in the subtree of `h`, i.e. when
    /// `v` is larger than every vertex of `h`.
    pub fn find_child(&self, h: SimplexHandle<O::Vertex>, v: O::Vertex) -> SimplexHandle<O::Vertex> {
        self.locate(h)
            .ok()
            .and_then(|p| self.find_child_pos(p, v))
            .map_or_else(SimplexHandle::null, |p| self.handle_at(p))
    }

    /// `true` if the simplex has at least one materialised coface in its
    /// subtree.
    pub fn has_children(&self, h: SimplexHandle<O::Vertex>) -> bool {
        self.locate(h)
            .map(|p| self.children_of(p).is_some())
            .unwrap_or(false)
    }

    /// Dimension of the simplex, `-1` for the null handle.
    pub fn dimension_of(&self, h: SimplexHandle<O::Vertex>) -> i32 {
        self.locate(h)
            .map(|p| self.depth(p) as i32 - 1)
            .unwrap_or(-1)
    }

    /// Filtration value; `+inf` for the null handle.
    pub fn filtration(&self, h: SimplexHandle<O::Vertex>) -> f64 {
        self.locate(h)
            .map(|p| self.node(p).filtration())
            .unwrap_or(f64::INFINITY)
    }

    /// Overwrites the filtration value of a simplex.
    ///
    /// No monotonicity check is made; see
    /// [`make_filtration_non_decreasing`](Self::make_filtration_non_decreasing).
    pub fn assign_filtration(&mut self, h: SimplexHandle<O::Vertex>, value: f64) -> Result<(), ComplexError> {
        if h.is_null() {
            return Err(ComplexError::NullSimplex("assign_filtration"));
        }
        if !O::Filtration::STORED && value != 0.0 {
            return Err(ComplexError::FiltrationNotStored(value));
        }
        let pos = self.locate(h)?;
        self.node_mut(pos).filtration.set(value);
        self.invalidate_cache();
        Ok(())
    }

    /// Key of the simplex, `-1` when absent or not stored.
    pub fn key(&self, h: SimplexHandle<O::Vertex>) -> i64 {
        self.locate(h).map(|p| self.node(p).key.get()).unwrap_or(-1)
    }

    pub fn assign_key(&mut self, h: SimplexHandle<O::Vertex>, key: i64) -> Result<(), ComplexError> {
        if !O::Key::STORED {
            return Err(ComplexError::OptionDisabled("store_key"));
        }
        let pos = self.locate(h)?;
        self.node_mut(pos).key.set(key);
        Ok(())
    }

    /// Simplex with the given key, once the filtration has been initialised.
    pub fn simplex(&self, key: i64) -> SimplexHandle<O::Vertex> {
        let found = usize::try_from(key)
            .ok()
            .and_then(|k| self.filtration_vect.get()?.get(k).copied());
        match found {
            Some(h) if self.key(h) == key || !O::Key::STORED => h,
            _ => SimplexHandle::null(),
        }
    }

    /// The two vertices of an edge, larger first.
    pub fn endpoints(
        &self,
        h: SimplexHandle<O::Vertex>,
    ) -> Result<(SimplexHandle<O::Vertex>, SimplexHandle<O::Vertex>), ComplexError> {
        let pos = self.locate(h)?;
        let dim = self.depth(pos) as i32 - 1;
        if dim != 1 {
            return Err(ComplexError::NotAnEdge(dim));
        }
        let hi = self.label(pos);
        let lo = self.arena[pos.sib].parent;
        Ok((self.find_vertex(hi), self.find_vertex(lo)))
    }

    // ---------------------------------------------------------------------
    // counts
    // ---------------------------------------------------------------------

    pub fn num_vertices(&self) -> usize {
        self.arena[SiblingId::ROOT].members.len()
    }

    /// Number of simplices, the empty simplex excluded.
    pub fn num_simplices(&self) -> usize {
        self.arena
            .ids()
            .map(|id| self.arena[id].members.len())
            .sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }

    /// Vertices of the complex, increasing.
    pub fn complex_vertices(&self) -> impl Iterator<Item = O::Vertex> + '_ {
        self.arena[SiblingId::ROOT].labels()
    }

    /// `true` when the vertices are exactly `0..num_vertices()`.
    pub fn contiguous_vertices(&self) -> bool {
        self.complex_vertices()
            .enumerate()
            .all(|(i, v)| v.to_usize() == Some(i))
    }

    /// Upper bound on the dimension; exact unless simplices were removed
    /// since the last [`dimension`](Self::dimension) call.
    #[inline]
    pub fn upper_bound_dimension(&self) -> i32 {
        self.dimension
    }

    /// Overrides the stored dimension. With `exact == false` the next call to
    /// [`dimension`](Self::dimension) recomputes it.
    pub fn set_dimension(&mut self, dimension: i32, exact: bool) {
        self.dimension = dimension;
        self.dimension_to_be_lowered = !exact;
    }

    /// `true` when the options maintain the coface index.
    #[inline]
    pub fn links_simplices_through_max_vertex(&self) -> bool {
        <O::Cofaces as CofaceIndexSlot<O::Vertex>>::ENABLED
    }

    // ---------------------------------------------------------------------
    // annotation and Morse pairing slots
    // ---------------------------------------------------------------------

    pub fn simplex_annotation(
        &self,
        h: SimplexHandle<O::Vertex>,
    ) -> Result<Option<&<O::Annotation as AnnotationSlot>::Value>, ComplexError> {
        if !O::Annotation::STORED {
            return Err(ComplexError::OptionDisabled("store_annotation_vector"));
        }
        let pos = self.locate(h)?;
        Ok(self.node(pos).annotation.get())
    }

    pub fn assign_simplex_annotation(
        &mut self,
        h: SimplexHandle<O::Vertex>,
        value: <O::Annotation as AnnotationSlot>::Value,
    ) -> Result<(), ComplexError> {
        if !O::Annotation::STORED {
            return Err(ComplexError::OptionDisabled("store_annotation_vector"));
        }
        let pos = self.locate(h)?;
        self.node_mut(pos).annotation.set(value);
        Ok(())
    }

    fn ensure_pairing(&self) -> Result<(), ComplexError> {
        if <O::Pairing as PairingSlot<O::Vertex>>::STORED {
            Ok(())
        } else {
            Err(ComplexError::OptionDisabled("store_morse_pairing"))
        }
    }

    /// Pairs `t` with `s` in the discrete gradient, both ways.
    pub fn assign_morse_pairing(
        &mut self,
        t: SimplexHandle<O::Vertex>,
        s: SimplexHandle<O::Vertex>,
    ) -> Result<(), ComplexError> {
        self.ensure_pairing()?;
        let pt = self.locate(t)?;
        let ps = self.locate(s)?;
        let (ht, hs) = (self.handle_at(pt), self.handle_at(ps));
        self.node_mut(pt).pairing.set(Some(hs));
        self.node_mut(ps).pairing.set(Some(ht));
        Ok(())
    }

    /// Marks the simplex critical (paired with itself).
    pub fn make_critical(&mut self, h: SimplexHandle<O::Vertex>) -> Result<(), ComplexError> {
        self.ensure_pairing()?;
        let pos = self.locate(h)?;
        let me = self.handle_at(pos);
        self.node_mut(pos).pairing.set(Some(me));
        Ok(())
    }

    pub fn morse_pair(
        &self,
        h: SimplexHandle<O::Vertex>,
    ) -> Result<Option<SimplexHandle<O::Vertex>>, ComplexError> {
        self.ensure_pairing()?;
        let pos = self.locate(h)?;
        Ok(self.node(pos).pairing.get())
    }

    pub fn is_critical(&self, h: SimplexHandle<O::Vertex>) -> Result<bool, ComplexError> {
        Ok(self.morse_pair(h)? == Some(h))
    }

    pub fn is_pair(
        &self,
        t: SimplexHandle<O::Vertex>,
        s: SimplexHandle<O::Vertex>,
    ) -> Result<bool, ComplexError> {
        Ok(t != s && self.morse_pair(t)? == Some(s) && self.morse_pair(s)? == Some(t))
    }

    // ---------------------------------------------------------------------
    // structural equality
    // ---------------------------------------------------------------------

    fn rec_equal(&self, mine: SiblingId, other: &Self, theirs: SiblingId) -> bool {
        let a = &self.arena[mine];
        let b = &other.arena[theirs];
        if a.members.len() != b.members.len() {
            return false;
        }
        (0..a.members.len()).all(|idx| {
            let (pa, pb) = (Pos { sib: mine, idx }, Pos { sib: theirs, idx });
            if a.members[idx].0 != b.members[idx].0
                || self.node(pa).filtration() != other.node(pb).filtration()
            {
                return false;
            }
            match (self.children_of(pa), other.children_of(pb)) {
                (None, None) => true,
                (Some(ca), Some(cb)) => self.rec_equal(ca, other, cb),
                _ => false,
            }
        })
    }
}

/// Two complexes are equal when they hold the same simplices with the same
/// filtration values. Keys and arena layout are ignored.
impl<O: SimplexTreeOptions> PartialEq for SimplexTree<O> {
    fn eq(&self, other: &Self) -> bool {
        self.rec_equal(SiblingId::ROOT, other, SiblingId::ROOT)
    }
}

impl<O: SimplexTreeOptions> fmt::Debug for SimplexTree<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplexTree")
            .field("num_vertices", &self.num_vertices())
            .field("num_simplices", &self.num_simplices())
            .field("upper_bound_dimension", &self.dimension)
            .field("sibling_sets", &self.arena.live_count())
            .finish()
    }
}

/// One line per simplex in filtration order: `dim v_k ... v_0 filtration`.
impl<O: SimplexTreeOptions> fmt::Display for SimplexTree<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &h in self.filtration_order() {
            let Ok(pos) = self.locate(h) else { continue };
            write!(f, "{} ", self.depth(pos) - 1)?;
            for v in self.vertices_desc(pos) {
                write!(f, "{v} ")?;
            }
            writeln!(f, "{}", self.node(pos).filtration())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::options::{FastPersistence, Minimal, MorsePersistence};

    fn triangle() -> SimplexTree {
        let mut st = SimplexTree::new();
        st.insert_simplex_and_subfaces([0, 1, 2], 1.0).unwrap();
        st
    }

    #[test]
    fn find_in_any_order() {
        let st = triangle();
        let h = st.find([2, 0, 1]);
        assert!(!h.is_null());
        assert_eq!(h, st.find_sorted(&[0, 1, 2]).unwrap());
        assert_eq!(st.dimension_of(h), 2);
        assert!(st.find([0, 3]).is_null());
        assert!(st.find(Vec::<i32>::new()).is_null());
    }

    #[test]
    fn find_sorted_rejects_unsorted_input() {
        let st = triangle();
        assert!(matches!(
            st.find_sorted(&[1, 0]),
            Err(ComplexError::UnsortedVertices(_))
        ));
    }

    #[test]
    fn null_handle_queries() {
        let mut st = triangle();
        let null = SimplexTree::<FullFeatured>::null_simplex();
        assert_eq!(st.filtration(null), f64::INFINITY);
        assert_eq!(st.dimension_of(null), -1);
        assert_eq!(st.key(null), -1);
        assert!(!st.has_children(null));
        assert_eq!(
            st.assign_filtration(null, 1.0),
            Err(ComplexError::NullSimplex("assign_filtration"))
        );
    }

    #[test]
    fn has_children_distinguishes_leaves() {
        let st = triangle();
        assert!(st.has_children(st.find([0])));
        assert!(st.has_children(st.find([0, 1])));
        assert!(!st.has_children(st.find([0, 1, 2])));
        assert!(!st.has_children(st.find([1, 2])));
        assert!(!st.has_children(st.find([2])));
    }

    #[test]
    fn find_child_and_endpoints() {
        let st = triangle();
        let e = st.find_child(st.find([0]), 2);
        assert_eq!(e, st.find([0, 2]));
        assert!(st.find_child(st.find([1]), 0).is_null());
        let (hi, lo) = st.endpoints(e).unwrap();
        assert_eq!((hi.vertex(), lo.vertex()), (2, 0));
        assert_eq!(st.endpoints(st.find([0])), Err(ComplexError::NotAnEdge(0)));
    }

    #[test]
    fn counts_and_vertices() {
        let st = triangle();
        assert_eq!(st.num_vertices(), 3);
        assert_eq!(st.num_simplices(), 7);
        assert_eq!(st.upper_bound_dimension(), 2);
        assert!(st.contiguous_vertices());
        assert_eq!(st.complex_vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(SimplexTree::<FullFeatured>::new().is_empty());
    }

    #[test]
    fn contiguous_root_lookup() {
        let mut st = SimplexTree::<FastPersistence>::new();
        st.insert_simplex_and_subfaces([0, 1, 2, 3], 0.0).unwrap();
        assert_eq!(st.find_vertex(3).vertex(), 3);
        assert!(st.find_vertex(7).is_null());
        // a gap falls back to binary search
        st.insert_simplex([9], 0.0).unwrap();
        assert!(!st.find_vertex(9).is_null());
        assert!(!st.contiguous_vertices());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = SimplexTree::<FullFeatured>::new();
        let mut b = SimplexTree::<FullFeatured>::new();
        a.insert_simplex_and_subfaces([0, 1, 2], 1.0).unwrap();
        b.insert_simplex_and_subfaces([1, 2], 1.0).unwrap();
        b.insert_simplex_and_subfaces([0, 1, 2], 1.0).unwrap();
        assert_eq!(a, b);
        let c = a.clone();
        assert_eq!(a, c);
        b.assign_filtration(b.find([1, 2]), 0.5).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn minimal_options_reject_filtrations() {
        let mut st = SimplexTree::<Minimal>::new();
        st.insert_simplex_and_subfaces([0, 1], 3.0).unwrap();
        let e = st.find([0, 1]);
        assert_eq!(st.filtration(e), 0.0);
        assert_eq!(
            st.assign_filtration(e, 1.0),
            Err(ComplexError::FiltrationNotStored(1.0))
        );
        assert_eq!(
            st.assign_key(e, 0),
            Err(ComplexError::OptionDisabled("store_key"))
        );
    }

    #[test]
    fn annotations_and_morse_pairing() {
        let mut st = SimplexTree::<MorsePersistence>::new();
        st.insert_simplex_and_subfaces([0, 1], 0.0).unwrap();
        let (v, e) = (st.find([1]), st.find([0, 1]));
        st.assign_simplex_annotation(e, vec![1.0, 0.0]).unwrap();
        assert_eq!(st.simplex_annotation(e).unwrap(), Some(&vec![1.0, 0.0]));
        assert_eq!(st.simplex_annotation(v).unwrap(), None);

        st.assign_morse_pairing(v, e).unwrap();
        assert!(st.is_pair(v, e).unwrap());
        assert_eq!(st.morse_pair(e).unwrap(), Some(v));
        assert_eq!(st.morse_pair(v).unwrap(), Some(e));
        let w = st.find([0]);
        st.make_critical(w).unwrap();
        assert!(st.is_critical(w).unwrap());
        assert!(!st.is_critical(v).unwrap());

        let plain = triangle();
        assert_eq!(
            plain.morse_pair(plain.find([0])),
            Err(ComplexError::OptionDisabled("store_morse_pairing"))
        );
    }

    #[test]
    fn display_lists_filtration_order() {
        let mut st = SimplexTree::<FullFeatured>::new();
        st.insert_simplex_and_subfaces([0, 1], 0.5).unwrap();
        st.assign_filtration(st.find([0]), 0.0).unwrap();
        st.assign_filtration(st.find([1]), 0.0).unwrap();
        assert_eq!(st.to_string(), "0 0 0\n0 1 0\n1 1 0 0.5\n");
    }
}
