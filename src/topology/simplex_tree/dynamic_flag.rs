//! Edge-by-edge maintenance of a flag complex, for zigzag filtrations.
//!
//! Adding the edge `{u, v}` (`u < v`) creates exactly the cliques through
//! that edge. Each of them is a path that visits a node labelled `u` and,
//! later, a node labelled `v`; the coface index gives every node labelled
//! `u` directly. Below each such node that sits next to a `v` sibling, `v` is
//! inserted ("punctual" insertion), the new node is expanded locally, and the
//! insertion is pushed down to the siblings on the left of `v` that are
//! adjacent to it.
//!
//! Removal is lazy: [`SimplexTree::flag_lazy_remove_edge`] only lists the
//! simplices to drop, in an order [`SimplexTree::remove_maximal_simplices`]
//! accepts.

use super::expansion::FiltrationRule;
use super::{Pos, SimplexTree};
use crate::complex_error::ComplexError;
use crate::topology::bounds::VertexLike;
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{SiblingId, SimplexHandle};
use crate::topology::options::{CofaceIndexSlot, SimplexTreeOptions};

type NewNodes<V> = Vec<(SiblingId, V)>;

impl<O: SimplexTreeOptions> SimplexTree<O> {
    fn require_coface_index(&self) -> Result<(), ComplexError> {
        if <O::Cofaces as CofaceIndexSlot<O::Vertex>>::ENABLED {
            Ok(())
        } else {
            Err(ComplexError::OptionDisabled("link_simplices_through_max_vertex"))
        }
    }

    /// Adds the edge `{u, v}` with value `filtration` to a flag complex and
    /// every clique it closes, up to dimension `max_dim`. With `u == v` only
    /// the vertex is added.
    ///
    /// Returns the new simplices in filtration order; they all carry
    /// `filtration`. Nothing happens if the edge is already present.
    ///
    /// Fed with edges in non-decreasing filtration order, this builds the
    /// same complex, values included, as [`insert_graph`](Self::insert_graph)
    /// followed by [`expansion`](Self::expansion). Out of order, a clique gets
    /// the value of the edge that closed it, which can be below the value of
    /// its faces.
    ///
    /// # Errors
    /// [`ComplexError::OptionDisabled`] without the coface index,
    /// [`ComplexError::NullVertex`] if an endpoint is the null vertex.
    pub fn flag_add_edge(
        &mut self,
        u: O::Vertex,
        v: O::Vertex,
        filtration: f64,
        max_dim: i32,
    ) -> Result<Vec<SimplexHandle<O::Vertex>>, ComplexError> {
        self.require_coface_index()?;
        if u.is_null_vertex() || v.is_null_vertex() {
            return Err(ComplexError::NullVertex);
        }
        let (u, v) = if v < u { (v, u) } else { (u, v) };
        let mut created: NewNodes<O::Vertex> = Vec::new();

        let (_, new_v) = self.emplace(SiblingId::ROOT, v, filtration);
        if new_v {
            created.push((SiblingId::ROOT, v));
        }
        if u != v {
            let (_, new_u) = self.emplace(SiblingId::ROOT, u, filtration);
            if new_u {
                created.push((SiblingId::ROOT, u));
            }
        }
        if !created.is_empty() {
            self.dimension = self.dimension.max(0);
        }

        let edge_present = u == v
            || self
                .vertex_pos(u)
                .and_then(|p| self.find_child_pos(p, v))
                .is_some();
        if !edge_present {
            self.dimension = self.dimension.max(max_dim);
            self.dimension_to_be_lowered = true;

            // punctual insertions never add a node labelled `u`
            let holders: Vec<SiblingId> = self
                .cofaces
                .holders(u)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default();
            for sib_u in holders {
                let s = &self.arena[sib_u];
                let (Some(idx), true) = (s.position(u), s.position(v).is_some()) else {
                    continue;
                };
                let pos_u = Pos { sib: sib_u, idx };
                let curr_dim = self.depth(pos_u) as i32 - 1;
                if curr_dim < max_dim {
                    let child = self.ensure_children(pos_u);
                    self.punctual_expansion(v, child, filtration, max_dim - curr_dim - 1, &mut created);
                }
            }
        }

        let mut handles: Vec<SimplexHandle<O::Vertex>> = created
            .into_iter()
            .filter_map(|(sib, w)| {
                self.arena[sib]
                    .position(w)
                    .map(|idx| SimplexHandle::new(sib, w, idx))
            })
            .collect();
        if !handles.is_empty() {
            self.invalidate_cache();
        }
        self.sort_in_filtration_order(&mut handles);
        log::trace!(
            "flag_add_edge({u}, {v}, {filtration}): {} new simplices",
            handles.len()
        );
        crate::step_invariants!(self, "flag_add_edge");
        Ok(handles)
    }

    /// Insert `v` in `sib`, expand the new node, then push the insertion into
    /// the left siblings adjacent to `v`. `k` is the number of dimensions
    /// still allowed above the new node.
    fn punctual_expansion(
        &mut self,
        v: O::Vertex,
        sib: SiblingId,
        filtration: f64,
        k: i32,
        created: &mut NewNodes<O::Vertex>,
    ) {
        let (idx_v, inserted) = self.emplace(sib, v, filtration);
        if !inserted {
            return;
        }
        created.push((sib, v));
        if k == 0 {
            return;
        }
        self.local_expansion(Pos { sib, idx: idx_v }, filtration, k, created);

        for idx in 0..idx_v {
            let pos_x = Pos { sib, idx };
            let x = self.label(pos_x);
            let adjacent = self
                .vertex_pos(x)
                .and_then(|p| self.find_child_pos(p, v))
                .is_some();
            if adjacent {
                let child = self.ensure_children(pos_x);
                self.punctual_expansion(v, child, filtration, k - 1, created);
            }
        }
    }

    /// Subtree of a node just inserted by [`Self::punctual_expansion`]: its
    /// later siblings adjacent to it, then a regular expansion below them.
    fn local_expansion(&mut self, pos_v: Pos, filtration: f64, k: i32, created: &mut NewNodes<O::Vertex>) {
        let v = self.label(pos_v);
        let rule = FiltrationRule::Forced(filtration);
        let inter = self.expansion_candidates(pos_v.sib, pos_v.idx, v, rule);
        if inter.is_empty() {
            return;
        }
        let child = self.attach_children(pos_v, inter);
        created.extend(self.arena[child].labels().map(|w| (child, w)));
        self.siblings_expansion(child, k - 1, rule, Some(created));
    }

    /// Star of the edge `{u, v}` (of the vertex `u` when `u == v`), ordered so
    /// that every simplex comes before its faces. The complex is not
    /// modified; pass the result to
    /// [`remove_maximal_simplices`](Self::remove_maximal_simplices) to commit.
    ///
    /// Empty when the edge or vertex is absent.
    pub fn flag_lazy_remove_edge(
        &self,
        u: O::Vertex,
        v: O::Vertex,
    ) -> Result<Vec<SimplexHandle<O::Vertex>>, ComplexError> {
        self.require_coface_index()?;
        let (u, v) = if v < u { (v, u) } else { (u, v) };
        let Some(pos_u) = self.vertex_pos(u) else {
            return Ok(Vec::new());
        };
        let target = if u == v {
            Some(pos_u)
        } else {
            self.find_child_pos(pos_u, v)
        };
        let Some(target) = target else {
            return Ok(Vec::new());
        };
        let mut star = self.star(self.handle_at(target))?;
        self.sort_in_filtration_order(&mut star);
        star.reverse();
        log::trace!("flag_lazy_remove_edge({u}, {v}): {} simplices", star.len());
        Ok(star)
    }

    /// Every simplex, cofaces before faces: a removal order that empties the
    /// complex. The complex is not modified.
    pub fn flag_lazy_empty_complex(&self) -> Vec<SimplexHandle<O::Vertex>> {
        self.filtration_order().iter().rev().copied().collect()
    }
}
