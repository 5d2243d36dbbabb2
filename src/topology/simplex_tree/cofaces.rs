//! Coface index and star / coboundary queries.
//!
//! The index maps a vertex `v` to the sibling sets holding a node labelled
//! `v`, i.e. to every simplex whose largest vertex is `v`. Any coface of a
//! simplex `σ` with largest vertex `m` contains `m`, so it lies in the subtree
//! of one of those nodes; the indexed query only visits these subtrees. The
//! brute-force query walks the whole tree and prunes on depth.

use super::{Pos, SimplexTree};
use crate::complex_error::ComplexError;
use crate::topology::bounds::VertexLike;
use crate::topology::handle::{SiblingId, SimplexHandle};
use crate::topology::options::SimplexTreeOptions;
use hashbrown::{HashMap, HashSet};
use std::fmt::Debug;

/// Storage slot for the coface index. Every mutator reports node creation
/// and deletion through `link` / `unlink`.
pub trait CofaceIndexSlot<V>: Clone + Debug + Default + Send + Sync + 'static {
    const ENABLED: bool;
    /// A node labelled `v` now lives in `sib`.
    fn link(&mut self, v: V, sib: SiblingId);
    /// The node labelled `v` in `sib` is gone.
    fn unlink(&mut self, v: V, sib: SiblingId);
    /// Sibling sets holding a node labelled `v`.
    fn holders(&self, v: V) -> Option<&HashSet<SiblingId>>;
    fn clear(&mut self);
    /// Number of linked nodes.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index from the largest vertex of a simplex to the sets holding it.
#[derive(Clone, Debug)]
pub struct MaxVertexIndex<V: VertexLike> {
    by_vertex: HashMap<V, HashSet<SiblingId>>,
    links: usize,
}

impl<V: VertexLike> Default for MaxVertexIndex<V> {
    fn default() -> Self {
        MaxVertexIndex {
            by_vertex: HashMap::new(),
            links: 0,
        }
    }
}

impl<V: VertexLike> CofaceIndexSlot<V> for MaxVertexIndex<V> {
    const ENABLED: bool = true;

    fn link(&mut self, v: V, sib: SiblingId) {
        if self.by_vertex.entry(v).or_default().insert(sib) {
            self.links += 1;
        }
    }

    fn unlink(&mut self, v: V, sib: SiblingId) {
        if let Some(set) = self.by_vertex.get_mut(&v) {
            if set.remove(&sib) {
                self.links -= 1;
            }
            if set.is_empty() {
                self.by_vertex.remove(&v);
            }
        }
    }

    #[inline]
    fn holders(&self, v: V) -> Option<&HashSet<SiblingId>> {
        self.by_vertex.get(&v)
    }

    fn clear(&mut self) {
        self.by_vertex.clear();
        self.links = 0;
    }

    #[inline]
    fn len(&self) -> usize {
        self.links
    }
}

/// No coface index; star queries fall back to the brute-force walk.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoCofaceIndex;

impl<V> CofaceIndexSlot<V> for NoCofaceIndex {
    const ENABLED: bool = false;
    #[inline]
    fn link(&mut self, _v: V, _sib: SiblingId) {}
    #[inline]
    fn unlink(&mut self, _v: V, _sib: SiblingId) {}
    #[inline]
    fn holders(&self, _v: V) -> Option<&HashSet<SiblingId>> {
        None
    }
    fn clear(&mut self) {}
    #[inline]
    fn len(&self) -> usize {
        0
    }
}

/// `true` if the decreasing list `sup` contains every vertex of the
/// decreasing list `sub`.
fn contains_desc<V: Ord>(sup: &[V], sub: &[V]) -> bool {
    let mut it = sup.iter();
    sub.iter().all(|s| it.by_ref().any(|v| v == s))
}

impl<O: SimplexTreeOptions> SimplexTree<O> {
    /// Every simplex containing `h`, `h` included.
    pub fn star(&self, h: SimplexHandle<O::Vertex>) -> Result<Vec<SimplexHandle<O::Vertex>>, ComplexError> {
        self.cofaces(h, 0)
    }

    /// Cofaces of `h` of dimension exactly one more.
    pub fn coboundary(
        &self,
        h: SimplexHandle<O::Vertex>,
    ) -> Result<Vec<SimplexHandle<O::Vertex>>, ComplexError> {
        self.cofaces(h, 1)
    }

    /// Cofaces of `h` of codimension `codim`; `codim == 0` gives the star.
    ///
    /// Uses the coface index when the options maintain one. The order of the
    /// result is unspecified.
    pub fn cofaces(
        &self,
        h: SimplexHandle<O::Vertex>,
        codim: u32,
    ) -> Result<Vec<SimplexHandle<O::Vertex>>, ComplexError> {
        if h.is_null() {
            return Err(ComplexError::NullSimplex("cofaces"));
        }
        if !self.links_simplices_through_max_vertex() {
            return self.cofaces_brute_force(h, codim);
        }
        let pos = self.locate(h)?;
        let simplex = self.vertices_desc(pos);
        let target = (codim > 0).then(|| self.depth(pos) + codim);
        let mut out: Vec<Pos> = Vec::new();
        let Some(holders) = self.cofaces.holders(simplex[0]) else {
            return Ok(Vec::new());
        };
        for &sib in holders {
            let Some(idx) = self.arena[sib].position(simplex[0]) else {
                continue;
            };
            let at = Pos { sib, idx };
            if self.depth(at) < simplex.len() as u32
                || !contains_desc(&self.vertices_desc(at), &simplex)
            {
                continue;
            }
            self.collect_subtree(at, target, &mut out);
        }
        Ok(out.into_iter().map(|p| self.handle_at(p)).collect())
    }

    /// The node at `pos` and its whole subtree, restricted to `target` depth.
    fn collect_subtree(&self, pos: Pos, target: Option<u32>, out: &mut Vec<Pos>) {
        let depth = self.depth(pos);
        if target.is_none_or(|t| t == depth) {
            out.push(pos);
        }
        if target.is_some_and(|t| depth >= t) {
            return;
        }
        if let Some(child) = self.children_of(pos) {
            for idx in 0..self.arena[child].members.len() {
                self.collect_subtree(Pos { sib: child, idx }, target, out);
            }
        }
    }

    /// Same result as [`cofaces`](Self::cofaces) by a walk over the whole
    /// tree, whatever the options.
    pub fn cofaces_brute_force(
        &self,
        h: SimplexHandle<O::Vertex>,
        codim: u32,
    ) -> Result<Vec<SimplexHandle<O::Vertex>>, ComplexError> {
        if h.is_null() {
            return Err(ComplexError::NullSimplex("cofaces_brute_force"));
        }
        let pos = self.locate(h)?;
        let mut simplex = self.vertices_desc(pos);
        simplex.reverse();
        let target = (codim > 0).then(|| self.depth(pos) + codim);
        if target.is_some_and(|t| t as i64 > self.dimension as i64 + 1) {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        self.rec_coface(SiblingId::ROOT, &simplex, target, &mut out);
        Ok(out.into_iter().map(|p| self.handle_at(p)).collect())
    }

    /// `rest` holds the vertices of the query simplex not yet matched on the
    /// current path, increasing.
    fn rec_coface(&self, sib: SiblingId, rest: &[O::Vertex], target: Option<u32>, out: &mut Vec<Pos>) {
        let depth = self.arena[sib].depth;
        if target.is_some_and(|t| depth as usize + rest.len().saturating_sub(1) > t as usize) {
            return;
        }
        for idx in 0..self.arena[sib].members.len() {
            let pos = Pos { sib, idx };
            let label = self.label(pos);
            let remaining = match rest.first() {
                None => rest,
                Some(&m) if label == m => &rest[1..],
                Some(&m) if label > m => return,
                Some(_) => rest,
            };
            let matched = remaining.is_empty();
            if matched && target.is_none_or(|t| t == depth) {
                out.push(pos);
            }
            let go_down = target.is_none_or(|t| depth < t);
            if go_down {
                if let Some(child) = self.children_of(pos) {
                    self.rec_coface(child, remaining, target, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::options::{FullFeatured, ZigzagPersistence};

    fn sorted_vertex_lists<O: SimplexTreeOptions>(
        st: &SimplexTree<O>,
        hs: Vec<SimplexHandle<O::Vertex>>,
    ) -> Vec<Vec<O::Vertex>> {
        let mut out: Vec<Vec<O::Vertex>> = hs
            .into_iter()
            .map(|h| st.simplex_vertex_range(h).unwrap().collect())
            .collect();
        out.sort();
        out
    }

    fn two_tetrahedra<O: SimplexTreeOptions<Vertex = i32>>() -> SimplexTree<O> {
        let mut st = SimplexTree::new();
        st.insert_simplex_and_subfaces([0, 1, 2, 3], 1.0).unwrap();
        st.insert_simplex_and_subfaces([1, 2, 4, 5], 2.0).unwrap();
        st
    }

    #[test]
    fn star_of_edge() {
        let st = two_tetrahedra::<FullFeatured>();
        let star = sorted_vertex_lists(&st, st.star(st.find([1, 2])).unwrap());
        assert_eq!(
            star,
            vec![
                vec![2, 1],
                vec![2, 1, 0],
                vec![3, 2, 1],
                vec![3, 2, 1, 0],
                vec![4, 2, 1],
                vec![5, 2, 1],
                vec![5, 4, 2, 1],
            ]
        );
    }

    #[test]
    fn coboundary_of_vertex() {
        let st = two_tetrahedra::<FullFeatured>();
        let cob = sorted_vertex_lists(&st, st.coboundary(st.find([4])).unwrap());
        assert_eq!(cob, vec![vec![4, 1], vec![4, 2], vec![5, 4]]);
        assert!(st.cofaces(st.find([0, 1, 2, 3]), 1).unwrap().is_empty());
        assert_eq!(st.cofaces(st.find([0]), 3).unwrap().len(), 1);
    }

    #[test]
    fn indexed_matches_brute_force() {
        let st = two_tetrahedra::<ZigzagPersistence>();
        assert!(st.links_simplices_through_max_vertex());
        let all: Vec<_> = st.complex_simplex_range().collect();
        for h in all {
            for codim in 0..4 {
                let fast = sorted_vertex_lists(&st, st.cofaces(h, codim).unwrap());
                let slow = sorted_vertex_lists(&st, st.cofaces_brute_force(h, codim).unwrap());
                assert_eq!(fast, slow, "codim {codim}");
            }
        }
    }

    #[test]
    fn index_tracks_every_node() {
        let mut st = two_tetrahedra::<ZigzagPersistence>();
        assert_eq!(st.cofaces.len(), st.num_simplices());
        st.prune_above_filtration(1.5);
        assert_eq!(st.cofaces.len(), st.num_simplices());
        assert!(st.cofaces.holders(5).is_none());
        st.clear();
        assert!(st.cofaces.is_empty());
    }

    #[test]
    fn null_handle_is_rejected() {
        let st = two_tetrahedra::<FullFeatured>();
        assert_eq!(
            st.star(SimplexTree::<FullFeatured>::null_simplex()),
            Err(ComplexError::NullSimplex("cofaces"))
        );
    }

    #[test]
    fn subset_test_on_decreasing_lists() {
        assert!(contains_desc(&[5, 3, 2, 0], &[3, 0]));
        assert!(!contains_desc(&[5, 3, 2, 0], &[4]));
        assert!(contains_desc::<i32>(&[1], &[]));
    }
}
