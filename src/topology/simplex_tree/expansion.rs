//! Flag (clique) expansion of a graph stored in the tree.
//!
//! A node `σ ∪ {x}` in sibling set `S` gets as children the members of `S`
//! after `x` that are also neighbours of `x` (the children of the root node
//! `x`). The intersection is a two-pointer merge over two sorted member
//! vectors. The same routine drives both the batch expansion and the
//! edge-by-edge expansion of the dynamic flag complex; only the filtration
//! rule differs.

use super::arena::{Node, Siblings};
use super::iter::BoundaryIter;
use super::{Pos, SimplexTree};
use crate::complex_error::ComplexError;
use crate::topology::cache::InvalidateCache;
use crate::topology::handle::{SiblingId, SimplexHandle};
use crate::topology::options::{FiltrationSlot, SimplexTreeOptions};
use itertools::{EitherOrBoth, Itertools};

/// What the blocker decides for a candidate simplex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlockerVerdict {
    /// Keep the candidate with the value computed from its faces.
    Accept,
    /// Keep the candidate with this filtration value instead.
    AcceptWithFiltration(f64),
    /// Drop the candidate; its cofaces are never explored.
    Block,
}

/// Filtration value of a node created by expansion.
#[derive(Copy, Clone, Debug)]
pub(crate) enum FiltrationRule {
    /// Largest value among the parent simplex and the two merged nodes.
    MaxOfFaces,
    /// Forced value (the edge that triggered a dynamic insertion).
    Forced(f64),
}

impl<O: SimplexTreeOptions> SimplexTree<O> {
    /// Members of `sib` after position `after` that are also children of the
    /// root node `x`, with their filtration under `rule`.
    pub(crate) fn expansion_candidates(
        &self,
        sib: SiblingId,
        after: usize,
        x: O::Vertex,
        rule: FiltrationRule,
    ) -> Vec<(O::Vertex, f64)> {
        let Some(root_x) = self.vertex_pos(x) else {
            return Vec::new();
        };
        let Some(neighbours) = self.children_of(root_x) else {
            return Vec::new();
        };
        let parent_f = self.node(Pos { sib, idx: after }).filtration();
        let later = &self.arena[sib].members[after + 1..];
        let nbrs = &self.arena[neighbours].members;
        later
            .iter()
            .merge_join_by(nbrs.iter(), |a, b| a.0.cmp(&b.0))
            .filter_map(|pair| match pair {
                EitherOrBoth::Both((w, a), (_, b)) => Some((
                    *w,
                    match rule {
                        FiltrationRule::MaxOfFaces => {
                            parent_f.max(a.filtration()).max(b.filtration())
                        }
                        FiltrationRule::Forced(f) => f,
                    },
                )),
                _ => None,
            })
            .collect()
    }

    /// Attach a new child set holding `members` below the node at `pos`.
    /// Every new node is a leaf and is linked into the coface index.
    pub(crate) fn attach_children(
        &mut self,
        pos: Pos,
        members: Vec<(O::Vertex, f64)>,
    ) -> SiblingId {
        let parent = self.label(pos);
        let depth = self.depth(pos) + 1;
        let child = self.arena.alloc(Siblings::new(Some(pos.sib), parent, depth));
        self.arena[child].members = members
            .iter()
            .map(|&(w, f)| (w, Node::leaf(child, f)))
            .collect();
        for &(w, _) in &members {
            self.link_node(child, w);
        }
        self.node_mut(pos).children = child;
        child
    }

    /// Recursive expansion of every member of `sib`, `k` more dimensions.
    /// New simplices are appended to `sink` when given.
    pub(crate) fn siblings_expansion(
        &mut self,
        sib: SiblingId,
        k: i32,
        rule: FiltrationRule,
        mut sink: Option<&mut Vec<(SiblingId, O::Vertex)>>,
    ) {
        if k <= 0 {
            return;
        }
        for idx in 0..self.arena[sib].members.len() {
            let pos = Pos { sib, idx };
            let x = self.label(pos);
            let inter = self.expansion_candidates(sib, idx, x, rule);
            if inter.is_empty() {
                // leaf: children alias the own set
                self.node_mut(pos).children = sib;
                continue;
            }
            let child = self.attach_children(pos, inter);
            let depth = self.arena[child].depth as i32;
            self.dimension = self.dimension.max(depth - 1);
            if let Some(out) = sink.as_deref_mut() {
                out.extend(self.arena[child].labels().map(|w| (child, w)));
            }
            self.siblings_expansion(child, k - 1, rule, sink.as_deref_mut());
        }
    }

    /// Expands the graph held by the complex into its flag complex up to
    /// dimension `max_dim`. A new simplex takes the largest filtration value
    /// of its edges.
    ///
    /// The complex must not hold simplices of dimension above one.
    pub fn expansion(&mut self, max_dim: i32) -> Result<(), ComplexError> {
        let dim = self.dimension();
        if dim > 1 {
            return Err(ComplexError::NotAGraph(dim));
        }
        let before = self.num_simplices();
        for idx in 0..self.num_vertices() {
            if let Some(child) = self.children_of(Pos { sib: SiblingId::ROOT, idx }) {
                self.siblings_expansion(child, max_dim - 1, FiltrationRule::MaxOfFaces, None);
            }
        }
        self.invalidate_cache();
        log::debug!(
            "expansion(max_dim = {max_dim}): {} -> {} simplices, dimension {}",
            before,
            self.num_simplices(),
            self.dimension
        );
        crate::debug_invariants!(self, "expansion");
        Ok(())
    }

    /// Flag expansion where each candidate is submitted to `blocker` once it
    /// is wired into the tree.
    ///
    /// A candidate's filtration value is the largest value among its faces.
    /// The blocker may keep it, keep it with another value, or block it; a
    /// blocked simplex is removed before its cofaces are explored. Several
    /// candidates of the same dimension are inserted together before the
    /// blocker sees them, so the blocker may observe siblings that are not
    /// vetted yet.
    pub fn expansion_with_blockers<B>(&mut self, max_dim: i32, mut blocker: B) -> Result<(), ComplexError>
    where
        B: FnMut(&Self, SimplexHandle<O::Vertex>) -> BlockerVerdict,
    {
        let dim = self.dimension();
        if dim > 1 {
            return Err(ComplexError::NotAGraph(dim));
        }
        // higher dimensional simplices live in the left part of the tree
        for idx in (0..self.num_vertices()).rev() {
            if let Some(child) = self.children_of(Pos { sib: SiblingId::ROOT, idx }) {
                self.siblings_expansion_with_blockers(child, max_dim, max_dim - 1, &mut blocker);
            }
        }
        self.invalidate_cache();
        log::debug!(
            "expansion_with_blockers(max_dim = {max_dim}): {} simplices, dimension {}",
            self.num_simplices(),
            self.dimension
        );
        crate::debug_invariants!(self, "expansion_with_blockers");
        Ok(())
    }

    fn siblings_expansion_with_blockers<B>(
        &mut self,
        sib: SiblingId,
        max_dim: i32,
        k: i32,
        blocker: &mut B,
    ) where
        B: FnMut(&Self, SimplexHandle<O::Vertex>) -> BlockerVerdict,
    {
        self.dimension = self.dimension.max(max_dim - k);
        let n = self.arena[sib].members.len();
        if k <= 0 || n < 2 {
            return;
        }
        for idx in (0..n - 1).rev() {
            let pos = Pos { sib, idx };
            let candidates = self.blocker_candidates(pos);
            if candidates.is_empty() {
                self.node_mut(pos).children = sib;
                continue;
            }
            let child = self.attach_children(pos, candidates);
            let mut blocked = Vec::new();
            for cidx in 0..self.arena[child].members.len() {
                let cpos = Pos { sib: child, idx: cidx };
                match blocker(&*self, self.handle_at(cpos)) {
                    BlockerVerdict::Accept => {}
                    BlockerVerdict::AcceptWithFiltration(f) => self.node_mut(cpos).filtration.set(f),
                    BlockerVerdict::Block => blocked.push(self.label(cpos)),
                }
            }
            if blocked.len() == self.arena[child].members.len() {
                for w in blocked {
                    self.unlink_node(child, w);
                }
                self.arena.free(child);
                self.node_mut(pos).children = sib;
            } else {
                for w in blocked {
                    self.unlink_node(child, w);
                    let members = &mut self.arena[child].members;
                    if let Ok(i) = members.binary_search_by(|(v, _)| v.cmp(&w)) {
                        members.remove(i);
                    }
                }
                self.siblings_expansion_with_blockers(child, max_dim, k - 1, blocker);
            }
        }
    }

    /// Labels `y` after `pos` in its set such that every boundary face of
    /// the simplex at `pos` has a child labelled `y`, with the largest
    /// filtration among the simplex and those children.
    fn blocker_candidates(&self, pos: Pos) -> Vec<(O::Vertex, f64)> {
        let faces: Vec<Option<Pos>> = {
            let mut it = BoundaryIter::at(self, pos);
            std::iter::from_fn(|| it.next_pos()).collect()
        };
        let own = self.node(pos).filtration();
        let later = &self.arena[pos.sib].members[pos.idx + 1..];
        let mut out = Vec::new();
        for (y, _) in later.iter().rev() {
            let mut filt = own;
            let complete = faces.iter().all(|face| {
                match face.and_then(|p| self.find_child_pos(p, *y)) {
                    Some(p) => {
                        filt = filt.max(self.node(p).filtration());
                        true
                    }
                    None => false,
                }
            });
            if complete {
                out.push((*y, filt));
            }
        }
        out.reverse();
        out
    }
}
