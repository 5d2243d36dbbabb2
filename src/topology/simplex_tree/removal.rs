//! Removal: threshold pruning, maximal simplex removal, and lazy dimension
//! recomputation.
//!
//! A sibling set that becomes empty is freed and the node above it goes
//! back to pointing at its own set. Removing simplices may lower the
//! dimension; the stored bound stays valid and is tightened on the next
//! [`SimplexTree::dimension`] call.

use super::{Pos, SimplexTree, format_simplex};
use crate::complex_error::ComplexError;
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{SiblingId, SimplexHandle};
use crate::topology::options::SimplexTreeOptions;

impl<O: SimplexTreeOptions> SimplexTree<O> {
    /// Exact dimension, recomputed first if removals may have lowered it.
    pub fn dimension(&mut self) -> i32 {
        if self.dimension_to_be_lowered {
            self.lower_upper_bound_dimension();
        }
        self.dimension
    }

    /// Depth-first scan for the largest simplex. Stops as soon as a simplex
    /// of the recorded bound is seen. Returns `true` if the bound was lowered.
    pub fn lower_upper_bound_dimension(&mut self) -> bool {
        self.dimension_to_be_lowered = false;
        let mut new_dimension = -1;
        let mut it = self.complex_simplex_range();
        while let Some(pos) = it.next_pos() {
            let d = self.depth(pos) as i32 - 1;
            if d >= self.dimension {
                return false;
            }
            new_dimension = new_dimension.max(d);
        }
        log::debug!(
            "lower_upper_bound_dimension: {} -> {new_dimension}",
            self.dimension
        );
        self.dimension = new_dimension;
        true
    }

    /// Point the parent of an emptied set back at the parent's own set and
    /// free the emptied one.
    fn collapse_siblings(&mut self, sib: SiblingId) {
        let (oncles, parent) = {
            let s = &self.arena[sib];
            (s.oncles, s.parent)
        };
        if let Some(up) = oncles {
            if let Some(idx) = self.arena[up].position(parent) {
                self.node_mut(Pos { sib: up, idx }).children = up;
            }
        }
        self.arena.free(sib);
        self.dimension_to_be_lowered = true;
    }

    /// Free a whole subtree, unlinking every node from the coface index.
    fn rec_delete(&mut self, sib: SiblingId) {
        for idx in 0..self.arena[sib].members.len() {
            let pos = Pos { sib, idx };
            if let Some(child) = self.children_of(pos) {
                self.rec_delete(child);
            }
            let v = self.label(pos);
            self.unlink_node(sib, v);
        }
        self.arena.free(sib);
    }

    /// Removes every simplex with filtration value strictly above
    /// `threshold`, together with its cofaces. Returns `true` if anything was
    /// removed.
    ///
    /// With a non-decreasing filtration the result is again a complex.
    pub fn prune_above_filtration(&mut self, threshold: f64) -> bool {
        let before = self.num_simplices();
        let modified = self.rec_prune_above_filtration(SiblingId::ROOT, threshold);
        if modified {
            self.invalidate_cache();
        }
        log::debug!(
            "prune_above_filtration({threshold}): {before} -> {} simplices",
            self.num_simplices()
        );
        crate::debug_invariants!(self, "prune_above_filtration");
        modified
    }

    fn rec_prune_above_filtration(&mut self, sib: SiblingId, threshold: f64) -> bool {
        let doomed: Vec<usize> = self.arena[sib]
            .members
            .iter()
            .enumerate()
            .filter(|(_, (_, n))| n.filtration() > threshold)
            .map(|(i, _)| i)
            .collect();
        for &idx in &doomed {
            let pos = Pos { sib, idx };
            if let Some(child) = self.children_of(pos) {
                self.rec_delete(child);
            }
            let v = self.label(pos);
            self.unlink_node(sib, v);
        }
        let modified = !doomed.is_empty();
        if modified {
            self.dimension_to_be_lowered = true;
            self.arena[sib]
                .members
                .retain(|(_, n)| n.filtration() <= threshold);
        }

        if self.arena[sib].members.is_empty() && !sib.is_root() {
            self.collapse_siblings(sib);
            return true;
        }
        let mut modified = modified;
        for idx in 0..self.arena[sib].members.len() {
            if let Some(child) = self.children_of(Pos { sib, idx }) {
                modified |= self.rec_prune_above_filtration(child, threshold);
            }
        }
        modified
    }

    /// Removes a simplex that has no coface.
    ///
    /// # Errors
    /// [`ComplexError::HasChildren`] when the simplex still has cofaces in
    /// its subtree.
    pub fn remove_maximal_simplex(&mut self, h: SimplexHandle<O::Vertex>) -> Result<(), ComplexError> {
        if h.is_null() {
            return Err(ComplexError::NullSimplex("remove_maximal_simplex"));
        }
        let pos = self.locate(h)?;
        if self.children_of(pos).is_some() {
            return Err(ComplexError::HasChildren(format_simplex(&self.vertices_desc(pos))));
        }
        let v = self.label(pos);
        self.unlink_node(pos.sib, v);
        if self.arena[pos.sib].members.len() > 1 || pos.sib.is_root() {
            self.arena[pos.sib].members.remove(pos.idx);
        } else {
            self.collapse_siblings(pos.sib);
        }
        self.dimension_to_be_lowered = true;
        self.invalidate_cache();
        Ok(())
    }

    /// Removes simplices in the given order; each must be maximal when its
    /// turn comes (e.g. cofaces listed before faces).
    pub fn remove_maximal_simplices(
        &mut self,
        handles: &[SimplexHandle<O::Vertex>],
    ) -> Result<(), ComplexError> {
        for &h in handles {
            self.remove_maximal_simplex(h)?;
        }
        log::trace!("remove_maximal_simplices: removed {}", handles.len());
        crate::step_invariants!(self, "remove_maximal_simplices");
        Ok(())
    }
}
