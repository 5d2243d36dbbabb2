//! Borrowing iterators over a simplex tree.
//!
//! - [`ComplexSimplexIter`]: every simplex (or a skeleton) in pre-order,
//!   i.e. each simplex before the cofaces stored in its subtree.
//! - [`SimplexVertexIter`]: the vertices of one simplex, decreasing.
//! - [`BoundaryIter`]: the codimension-1 faces of one simplex, obtained by
//!   omitting the largest vertex first and the smallest last.

use super::{Pos, SimplexTree};
use crate::complex_error::ComplexError;
use crate::topology::handle::{SiblingId, SimplexHandle};
use crate::topology::options::SimplexTreeOptions;
use std::iter::FusedIterator;

/// Pre-order traversal of the tree, optionally cut at a maximal depth.
pub struct ComplexSimplexIter<'a, O: SimplexTreeOptions> {
    tree: &'a SimplexTree<O>,
    stack: Vec<(SiblingId, usize)>,
    max_depth: u32,
}

impl<'a, O: SimplexTreeOptions> ComplexSimplexIter<'a, O> {
    pub(crate) fn new(tree: &'a SimplexTree<O>, max_depth: u32) -> Self {
        let stack = if max_depth == 0 {
            Vec::new()
        } else {
            vec![(SiblingId::ROOT, 0)]
        };
        ComplexSimplexIter {
            tree,
            stack,
            max_depth,
        }
    }

    /// Like `next`, but yields the raw position.
    pub(crate) fn next_pos(&mut self) -> Option<Pos> {
        loop {
            let &(sib, idx) = self.stack.last()?;
            let s = &self.tree.arena[sib];
            if idx >= s.members.len() {
                self.stack.pop();
                continue;
            }
            if let Some(top) = self.stack.last_mut() {
                top.1 += 1;
            }
            let pos = Pos { sib, idx };
            if s.depth < self.max_depth {
                if let Some(child) = self.tree.children_of(pos) {
                    self.stack.push((child, 0));
                }
            }
            return Some(pos);
        }
    }
}

impl<O: SimplexTreeOptions> Iterator for ComplexSimplexIter<'_, O> {
    type Item = SimplexHandle<O::Vertex>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.next_pos()?;
        Some(self.tree.handle_at(pos))
    }
}

impl<O: SimplexTreeOptions> FusedIterator for ComplexSimplexIter<'_, O> {}

/// Vertices of a simplex from the largest to the smallest.
pub struct SimplexVertexIter<'a, O: SimplexTreeOptions> {
    tree: &'a SimplexTree<O>,
    cursor: Option<(SiblingId, O::Vertex)>,
}

impl<O: SimplexTreeOptions> Iterator for SimplexVertexIter<'_, O> {
    type Item = O::Vertex;

    fn next(&mut self) -> Option<O::Vertex> {
        let (sib, v) = self.cursor?;
        let s = &self.tree.arena[sib];
        self.cursor = s.oncles.map(|up| (up, s.parent));
        Some(v)
    }
}

impl<O: SimplexTreeOptions> FusedIterator for SimplexVertexIter<'_, O> {}

/// Boundary faces of a simplex.
///
/// The `i`-th face omits the `i`-th largest vertex. A face missing from a
/// complex that is not closed under faces comes out as the null handle.
pub struct BoundaryIter<'a, O: SimplexTreeOptions> {
    tree: &'a SimplexTree<O>,
    /// Vertices of the simplex, increasing.
    vertices: Vec<O::Vertex>,
    /// Parent node: the face without the largest vertex.
    parent: Option<Pos>,
    emitted: usize,
    scratch: Vec<O::Vertex>,
}

impl<'a, O: SimplexTreeOptions> BoundaryIter<'a, O> {
    pub(crate) fn at(tree: &'a SimplexTree<O>, pos: Pos) -> Self {
        let mut vertices = tree.vertices_desc(pos);
        vertices.reverse();
        let s = &tree.arena[pos.sib];
        let parent = s.oncles.and_then(|up| {
            tree.arena[up]
                .position(s.parent)
                .map(|idx| Pos { sib: up, idx })
        });
        BoundaryIter {
            tree,
            vertices,
            parent,
            emitted: 0,
            scratch: Vec::new(),
        }
    }

    /// Number of faces, `d + 1` for a `d`-simplex with `d > 0`.
    fn face_count(&self) -> usize {
        if self.vertices.len() < 2 { 0 } else { self.vertices.len() }
    }

    /// Like `next`, but yields the raw position (`None` inside for a missing
    /// face).
    pub(crate) fn next_pos(&mut self) -> Option<Option<Pos>> {
        if self.emitted >= self.face_count() {
            return None;
        }
        let omit = self.vertices.len() - 1 - self.emitted;
        self.emitted += 1;
        if omit == self.vertices.len() - 1 {
            return Some(self.parent);
        }
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.vertices[..omit]);
        self.scratch.extend_from_slice(&self.vertices[omit + 1..]);
        Some(self.tree.find_pos(&self.scratch))
    }
}

impl<O: SimplexTreeOptions> Iterator for BoundaryIter<'_, O> {
    type Item = SimplexHandle<O::Vertex>;

    fn next(&mut self) -> Option<Self::Item> {
        let face = self.next_pos()?;
        Some(face.map_or_else(SimplexHandle::null, |p| self.tree.handle_at(p)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.face_count().saturating_sub(self.emitted);
        (left, Some(left))
    }
}

impl<O: SimplexTreeOptions> ExactSizeIterator for BoundaryIter<'_, O> {}

impl<O: SimplexTreeOptions> SimplexTree<O> {
    /// Every simplex in pre-order.
    pub fn complex_simplex_range(&self) -> ComplexSimplexIter<'_, O> {
        ComplexSimplexIter::new(self, u32::MAX)
    }

    /// Every simplex of dimension at most `dim`, in pre-order.
    pub fn skeleton_simplex_range(&self, dim: i32) -> ComplexSimplexIter<'_, O> {
        let max_depth = u32::try_from(dim.saturating_add(1)).unwrap_or(0);
        ComplexSimplexIter::new(self, max_depth)
    }

    /// Vertices of a simplex, decreasing.
    pub fn simplex_vertex_range(
        &self,
        h: SimplexHandle<O::Vertex>,
    ) -> Result<SimplexVertexIter<'_, O>, ComplexError> {
        if h.is_null() {
            return Err(ComplexError::NullSimplex("simplex_vertex_range"));
        }
        let pos = self.locate(h)?;
        Ok(SimplexVertexIter {
            tree: self,
            cursor: Some((pos.sib, self.label(pos))),
        })
    }

    /// Codimension-1 faces of a simplex; empty for a vertex.
    pub fn boundary_simplex_range(
        &self,
        h: SimplexHandle<O::Vertex>,
    ) -> Result<BoundaryIter<'_, O>, ComplexError> {
        if h.is_null() {
            return Err(ComplexError::NullSimplex("boundary_simplex_range"));
        }
        let pos = self.locate(h)?;
        Ok(BoundaryIter::at(self, pos))
    }
}
