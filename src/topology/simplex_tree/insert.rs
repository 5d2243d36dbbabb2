//! Insertion engine: single simplices, simplices with all their faces, and
//! bulk loading of a graph.

use super::arena::{Node, Siblings};
use super::{Pos, SimplexTree};
use crate::complex_error::ComplexError;
use crate::topology::_debug_invariants::ensure_strictly_increasing;
use crate::topology::bounds::VertexLike;
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{Insertion, SiblingId};
use crate::topology::options::{FiltrationSlot, SimplexTreeOptions};
use hashbrown::HashMap;
use itertools::Itertools;

impl<O: SimplexTreeOptions> SimplexTree<O> {
    /// Insert `v` in `sib` as a leaf unless present. Returns its index and
    /// whether it was created.
    pub(crate) fn emplace(&mut self, sib: SiblingId, v: O::Vertex, filtration: f64) -> (usize, bool) {
        let s = &mut self.arena[sib];
        match s.search(v) {
            Ok(idx) => (idx, false),
            Err(idx) => {
                s.members.insert(idx, (v, Node::leaf(sib, filtration)));
                self.link_node(sib, v);
                (idx, true)
            }
        }
    }

    /// Child set of the node at `pos`, created empty if it has none.
    pub(crate) fn ensure_children(&mut self, pos: Pos) -> SiblingId {
        if let Some(child) = self.children_of(pos) {
            return child;
        }
        let parent = self.label(pos);
        let depth = self.depth(pos) + 1;
        let child = self.arena.alloc(Siblings::new(Some(pos.sib), parent, depth));
        self.node_mut(pos).children = child;
        child
    }

    /// Apply the merge rule to an existing simplex: the filtration is only
    /// ever lowered.
    fn merge_existing(&mut self, pos: Pos, filtration: f64) -> Insertion<O::Vertex> {
        let node = self.node_mut(pos);
        if node.filtration() > filtration {
            node.filtration.set(filtration);
            Insertion::Updated(self.handle_at(pos))
        } else {
            Insertion::Unchanged
        }
    }

    fn check_vertices(vs: &[O::Vertex]) -> Result<(), ComplexError> {
        ensure_strictly_increasing(vs)?;
        if vs.iter().any(|v| v.is_null_vertex()) {
            return Err(ComplexError::NullVertex);
        }
        Ok(())
    }

    fn sorted_input<I: IntoIterator<Item = O::Vertex>>(vertices: I) -> Vec<O::Vertex> {
        vertices.into_iter().sorted_unstable().dedup().collect()
    }

    /// Inserts a simplex given in any order. Faces are **not** inserted.
    ///
    /// If the simplex exists, its filtration is lowered to `filtration` when
    /// that is strictly smaller ([`Insertion::Updated`]) and otherwise left
    /// alone ([`Insertion::Unchanged`]). The empty simplex is never stored.
    pub fn insert_simplex<I: IntoIterator<Item = O::Vertex>>(
        &mut self,
        vertices: I,
        filtration: f64,
    ) -> Result<Insertion<O::Vertex>, ComplexError> {
        self.insert_simplex_sorted(&Self::sorted_input(vertices), filtration)
    }

    /// [`insert_simplex`](Self::insert_simplex) for a strictly increasing
    /// vertex list.
    pub fn insert_simplex_sorted(
        &mut self,
        vertices: &[O::Vertex],
        filtration: f64,
    ) -> Result<Insertion<O::Vertex>, ComplexError> {
        Self::check_vertices(vertices)?;
        let Some((&last, prefix)) = vertices.split_last() else {
            return Ok(Insertion::Unchanged);
        };
        let mut sib = SiblingId::ROOT;
        for &v in prefix {
            let (idx, _) = self.emplace(sib, v, filtration);
            sib = self.ensure_children(Pos { sib, idx });
        }
        let (idx, fresh) = self.emplace(sib, last, filtration);
        let pos = Pos { sib, idx };
        let outcome = if fresh {
            self.dimension = self.dimension.max(vertices.len() as i32 - 1);
            Insertion::Inserted(self.handle_at(pos))
        } else {
            self.merge_existing(pos, filtration)
        };
        if !outcome.is_unchanged() {
            self.invalidate_cache();
        }
        Ok(outcome)
    }

    /// Inserts a simplex together with all its faces. Each face follows the
    /// same merge rule as [`insert_simplex`](Self::insert_simplex).
    ///
    /// The outcome reported is the one of the top simplex.
    pub fn insert_simplex_and_subfaces<I: IntoIterator<Item = O::Vertex>>(
        &mut self,
        vertices: I,
        filtration: f64,
    ) -> Result<Insertion<O::Vertex>, ComplexError> {
        self.insert_simplex_and_subfaces_sorted(&Self::sorted_input(vertices), filtration)
    }

    /// [`insert_simplex_and_subfaces`](Self::insert_simplex_and_subfaces) for
    /// a strictly increasing vertex list.
    pub fn insert_simplex_and_subfaces_sorted(
        &mut self,
        vertices: &[O::Vertex],
        filtration: f64,
    ) -> Result<Insertion<O::Vertex>, ComplexError> {
        Self::check_vertices(vertices)?;
        if vertices.is_empty() {
            return Ok(Insertion::Unchanged);
        }
        self.dimension = self.dimension.max(vertices.len() as i32 - 1);
        let mut changed = false;
        let outcome =
            self.rec_insert_simplex_and_subfaces(SiblingId::ROOT, vertices, filtration, &mut changed);
        if changed {
            self.invalidate_cache();
        }
        Ok(outcome)
    }

    /// To insert `{1,2,3,4}` we insert `{2,3,4}` twice: once below `1` and
    /// once in the current set. Both branches always run, so faces missing
    /// below an existing simplex are filled in too.
    fn rec_insert_simplex_and_subfaces(
        &mut self,
        sib: SiblingId,
        vs: &[O::Vertex],
        filtration: f64,
        changed: &mut bool,
    ) -> Insertion<O::Vertex> {
        let (idx, fresh) = self.emplace(sib, vs[0], filtration);
        let pos = Pos { sib, idx };
        let first = if fresh {
            Insertion::Inserted(self.handle_at(pos))
        } else {
            self.merge_existing(pos, filtration)
        };
        *changed |= !first.is_unchanged();
        let rest = &vs[1..];
        if rest.is_empty() {
            return first;
        }
        let child = self.ensure_children(pos);
        let res = self.rec_insert_simplex_and_subfaces(child, rest, filtration, changed);
        self.rec_insert_simplex_and_subfaces(sib, rest, filtration, changed);
        res
    }

    /// Bulk loads a 1-skeleton into an empty complex.
    ///
    /// - a self-loop is rejected before anything is inserted;
    /// - a repeated vertex or edge keeps its first filtration value;
    /// - an edge endpoint missing from `vertices` is created with the smallest
    ///   filtration among its incident edges.
    pub fn insert_graph<VI, EI>(&mut self, vertices: VI, edges: EI) -> Result<(), ComplexError>
    where
        VI: IntoIterator<Item = (O::Vertex, f64)>,
        EI: IntoIterator<Item = (O::Vertex, O::Vertex, f64)>,
    {
        let held = self.num_simplices();
        if held != 0 {
            return Err(ComplexError::NotEmpty(held));
        }
        let vertices: Vec<(O::Vertex, f64)> = vertices.into_iter().collect();
        let mut normalized: Vec<(O::Vertex, O::Vertex, f64)> = Vec::new();
        for (u, v, f) in edges {
            if u == v {
                return Err(ComplexError::SelfLoop(u.to_string()));
            }
            if u.is_null_vertex() || v.is_null_vertex() {
                return Err(ComplexError::NullVertex);
            }
            normalized.push(if v < u { (v, u, f) } else { (u, v, f) });
        }
        if vertices.iter().any(|(v, _)| v.is_null_vertex()) {
            return Err(ComplexError::NullVertex);
        }

        for &(v, f) in &vertices {
            self.emplace(SiblingId::ROOT, v, f);
        }
        let mut implicit: HashMap<O::Vertex, f64> = HashMap::new();
        for &(u, v, f) in &normalized {
            for w in [u, v] {
                if self.vertex_pos(w).is_none() {
                    implicit
                        .entry(w)
                        .and_modify(|g| *g = g.min(f))
                        .or_insert(f);
                }
            }
        }
        for (w, f) in implicit {
            self.emplace(SiblingId::ROOT, w, f);
        }

        let mut duplicates = 0usize;
        for (u, v, f) in normalized {
            let Some(pu) = self.vertex_pos(u) else { continue };
            let child = self.ensure_children(pu);
            let (_, fresh) = self.emplace(child, v, f);
            if !fresh {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            log::warn!("insert_graph: ignored {duplicates} repeated edge(s), first value kept");
        }

        self.dimension = if self.arena[SiblingId::ROOT]
            .members
            .iter()
            .any(|(v, n)| self.arena[n.children].parent == *v)
        {
            1
        } else if self.num_vertices() > 0 {
            0
        } else {
            -1
        };
        self.invalidate_cache();
        log::debug!(
            "insert_graph: {} vertices, {} simplices",
            self.num_vertices(),
            self.num_simplices()
        );
        crate::debug_invariants!(self, "insert_graph");
        Ok(())
    }
}
