//! Filtration order, key assignment and filtration repair.
//!
//! Simplices are ordered by filtration value, ties broken by the
//! reverse-lexicographic order of their vertex lists read from the largest
//! vertex down. A proper face always precedes its cofaces: it either has a
//! smaller value or, with equal values, its decreasing vertex list is
//! smaller entry by entry or a prefix.

use super::iter::{BoundaryIter, ComplexSimplexIter};
use super::{Pos, SimplexTree};
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{SiblingId, SimplexHandle};
use crate::topology::options::{FiltrationSlot, KeySlot, SimplexTreeOptions};
use hashbrown::HashMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of the Hasse diagram: a simplex with the filtration ranks of its
/// boundary faces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimplexRecord {
    pub dimension: i32,
    /// Rank of each boundary face, in boundary order.
    pub boundary: Vec<i64>,
    pub filtration: f64,
}

type OrderEntry<V> = (f64, Vec<V>, SimplexHandle<V>);

#[inline]
fn entry_cmp<V: Ord>(a: &OrderEntry<V>, b: &OrderEntry<V>) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

impl<O: SimplexTreeOptions> SimplexTree<O> {
    /// Sort key of the simplex at `pos`.
    pub(crate) fn order_entry(&self, pos: Pos) -> OrderEntry<O::Vertex> {
        (
            self.node(pos).filtration(),
            self.vertices_desc(pos),
            self.handle_at(pos),
        )
    }

    /// Sort handles in filtration order. Stable, so simplices that compare
    /// equal keep their pre-order rank.
    pub(crate) fn sort_in_filtration_order(&self, handles: &mut Vec<SimplexHandle<O::Vertex>>) {
        let mut entries: Vec<OrderEntry<O::Vertex>> = handles
            .iter()
            .filter_map(|&h| self.locate(h).ok())
            .map(|p| self.order_entry(p))
            .collect();
        Self::sort_entries(&mut entries);
        handles.clear();
        handles.extend(entries.into_iter().map(|e| e.2));
    }

    #[cfg(feature = "rayon")]
    fn sort_entries(entries: &mut [OrderEntry<O::Vertex>]) {
        use rayon::prelude::*;
        entries.par_sort_by(entry_cmp);
    }

    #[cfg(not(feature = "rayon"))]
    fn sort_entries(entries: &mut [OrderEntry<O::Vertex>]) {
        entries.sort_by(entry_cmp);
    }

    fn sorted_filtration_handles(&self) -> Vec<SimplexHandle<O::Vertex>> {
        let mut it = ComplexSimplexIter::new(self, u32::MAX);
        let mut entries = Vec::with_capacity(self.num_simplices());
        while let Some(pos) = it.next_pos() {
            entries.push(self.order_entry(pos));
        }
        Self::sort_entries(&mut entries);
        entries.into_iter().map(|e| e.2).collect()
    }

    /// `Less` when `a` comes before `b` in the filtration order.
    pub fn filtration_cmp(
        &self,
        a: SimplexHandle<O::Vertex>,
        b: SimplexHandle<O::Vertex>,
    ) -> Option<Ordering> {
        let pa = self.locate(a).ok()?;
        let pb = self.locate(b).ok()?;
        Some(entry_cmp(&self.order_entry(pa), &self.order_entry(pb)))
    }

    /// Sorts every simplex in filtration order and, when keys are stored,
    /// gives each simplex its rank as key.
    ///
    /// Must be called again after any mutation of the complex.
    pub fn initialize_filtration(&mut self) {
        let handles = self.sorted_filtration_handles();
        if O::Key::STORED {
            for (rank, &h) in handles.iter().enumerate() {
                if let Ok(pos) = self.locate(h) {
                    self.node_mut(pos).key.set(rank as i64);
                }
            }
        }
        log::debug!("initialize_filtration: {} simplices ordered", handles.len());
        self.filtration_vect = OnceCell::with_value(handles);
        self.keys_assigned = true;
    }

    /// Simplices in filtration order, initialising the order and the keys if
    /// the complex changed since the last call.
    pub fn filtration_simplex_range(&mut self) -> &[SimplexHandle<O::Vertex>] {
        if self.filtration_vect.get().is_none() || !self.keys_assigned {
            self.initialize_filtration();
        }
        self.filtration_vect.get().map_or(&[], Vec::as_slice)
    }

    /// Simplices in filtration order without touching the keys.
    ///
    /// The order is computed on first use and cached until the next mutation.
    pub fn filtration_order(&self) -> &[SimplexHandle<O::Vertex>] {
        self.filtration_vect
            .get_or_init(|| self.sorted_filtration_handles())
            .as_slice()
    }

    /// Raises every simplex to the largest filtration value of its faces.
    /// Returns `true` if any value changed.
    pub fn make_filtration_non_decreasing(&mut self) -> bool {
        let mut modified = false;
        // cofaces of a simplex sit in subtrees of larger labels: walk right to left
        for idx in (0..self.num_vertices()).rev() {
            if let Some(child) = self.children_of(Pos { sib: SiblingId::ROOT, idx }) {
                modified |= self.rec_make_filtration_non_decreasing(child);
            }
        }
        if modified {
            self.invalidate_cache();
        }
        log::debug!("make_filtration_non_decreasing: modified = {modified}");
        crate::debug_invariants!(self, "make_filtration_non_decreasing");
        modified
    }

    fn rec_make_filtration_non_decreasing(&mut self, sib: SiblingId) -> bool {
        let mut modified = false;
        for idx in (0..self.arena[sib].members.len()).rev() {
            let pos = Pos { sib, idx };
            let max_face = self.max_face_filtration(pos);
            let node = self.node_mut(pos);
            if node.filtration() < max_face {
                node.filtration.set(max_face);
                modified = true;
            }
            if let Some(child) = self.children_of(pos) {
                modified |= self.rec_make_filtration_non_decreasing(child);
            }
        }
        modified
    }

    fn max_face_filtration(&self, pos: Pos) -> f64 {
        let mut faces = BoundaryIter::at(self, pos);
        let mut max = f64::NEG_INFINITY;
        while let Some(face) = faces.next_pos() {
            if let Some(p) = face {
                max = max.max(self.node(p).filtration());
            }
        }
        max
    }

    /// `true` when no simplex has a smaller value than one of its faces.
    pub fn is_filtration_non_decreasing(&self) -> bool {
        let mut it = ComplexSimplexIter::new(self, u32::MAX);
        while let Some(pos) = it.next_pos() {
            if self.node(pos).filtration() < self.max_face_filtration(pos) {
                return false;
            }
        }
        true
    }

    /// One row per simplex in filtration order, boundary faces given by their
    /// rank in that order (`-1` for a missing face).
    pub fn hasse_diagram(&self) -> Vec<SimplexRecord> {
        let order = self.filtration_order();
        let rank: HashMap<SimplexHandle<O::Vertex>, i64> = order
            .iter()
            .enumerate()
            .map(|(i, &h)| (h, i as i64))
            .collect();
        order
            .iter()
            .filter_map(|&h| self.locate(h).ok())
            .map(|pos| SimplexRecord {
                dimension: self.depth(pos) as i32 - 1,
                boundary: BoundaryIter::at(self, pos)
                    .map(|f| rank.get(&f).copied().unwrap_or(-1))
                    .collect(),
                filtration: self.node(pos).filtration(),
            })
            .collect()
    }
}
