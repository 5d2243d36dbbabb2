//! Oscillating flag filtration driven by a stream of edge insertions and
//! removals.
//!
//! Each edge event is applied to an owned [`SimplexTree`] with the dynamic
//! flag operations, and the simplices it adds or removes come out as
//! [`ZigzagSimplex`] records: insertions in filtration order, removals with
//! cofaces before faces. Keys are handed out in stream order and a removal
//! carries the key its simplex got when it was inserted.

use crate::complex_error::ComplexError;
use crate::topology::handle::SimplexHandle;
use crate::topology::options::{KeySlot, SimplexTreeOptions, ZigzagPersistence};
use crate::topology::simplex_tree::SimplexTree;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Insertion,
    Removal,
}

/// One event of the input stream. `u == v` stands for the vertex `u`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZigzagEdge<V> {
    pub u: V,
    pub v: V,
    pub filtration: f64,
    pub direction: Direction,
}

impl<V> ZigzagEdge<V> {
    pub fn insert(u: V, v: V, filtration: f64) -> Self {
        ZigzagEdge {
            u,
            v,
            filtration,
            direction: Direction::Insertion,
        }
    }

    pub fn remove(u: V, v: V, filtration: f64) -> Self {
        ZigzagEdge {
            u,
            v,
            filtration,
            direction: Direction::Removal,
        }
    }
}

/// One simplex entering or leaving the complex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZigzagSimplex<V> {
    /// Vertices, decreasing.
    pub vertices: Vec<V>,
    /// Value of the edge event that caused the change.
    pub filtration: f64,
    pub direction: Direction,
    pub key: i64,
}

impl<V> ZigzagSimplex<V> {
    #[inline]
    pub fn dimension(&self) -> i32 {
        self.vertices.len() as i32 - 1
    }
}

/// Iterator over the simplex-level zigzag filtration induced by a stream of
/// [`ZigzagEdge`]s, with flag simplices up to `max_dim`.
///
/// The first error ends the iteration.
///
/// # Example
/// ```rust
/// use simplex_tree::prelude::*;
///
/// let edges = vec![
///     ZigzagEdge::insert(0, 1, 0.0),
///     ZigzagEdge::insert(1, 2, 1.0),
///     ZigzagEdge::insert(0, 2, 2.0),
///     ZigzagEdge::remove(0, 1, 3.0),
/// ];
/// let steps: Vec<ZigzagSimplex<i32>> = FlagZigzagFiltration::<ZigzagPersistence, _>::new(edges, 2)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(steps.len(), 3 + 2 + 2 + 2);
/// assert_eq!(steps.last().unwrap().vertices, vec![1, 0]);
/// ```
pub struct FlagZigzagFiltration<O: SimplexTreeOptions = ZigzagPersistence, I = std::vec::IntoIter<ZigzagEdge<i32>>> {
    tree: SimplexTree<O>,
    edges: I,
    max_dim: i32,
    pending: VecDeque<ZigzagSimplex<O::Vertex>>,
    next_key: i64,
    failed: bool,
}

impl<O, I> FlagZigzagFiltration<O, I>
where
    O: SimplexTreeOptions,
    I: Iterator<Item = ZigzagEdge<O::Vertex>>,
{
    pub fn new<E>(edges: E, max_dim: i32) -> Self
    where
        E: IntoIterator<IntoIter = I>,
    {
        FlagZigzagFiltration {
            tree: SimplexTree::new(),
            edges: edges.into_iter(),
            max_dim,
            pending: VecDeque::new(),
            next_key: 0,
            failed: false,
        }
    }

    /// The complex after the events consumed so far.
    pub fn tree(&self) -> &SimplexTree<O> {
        &self.tree
    }

    pub fn into_tree(self) -> SimplexTree<O> {
        self.tree
    }

    /// Removes every remaining simplex at value `filtration`, cofaces first.
    /// Pending records of the last event come first.
    pub fn close(mut self, filtration: f64) -> Result<Vec<ZigzagSimplex<O::Vertex>>, ComplexError> {
        let mut out: Vec<_> = self.pending.drain(..).collect();
        let all = self.tree.flag_lazy_empty_complex();
        self.record(&all, filtration, Direction::Removal)?;
        self.tree.remove_maximal_simplices(&all)?;
        crate::debug_invariants!(self.tree, "close");
        out.extend(self.pending.drain(..));
        Ok(out)
    }

    fn record(
        &mut self,
        handles: &[SimplexHandle<O::Vertex>],
        filtration: f64,
        direction: Direction,
    ) -> Result<(), ComplexError> {
        for &h in handles {
            let vertices: Vec<O::Vertex> = self.tree.simplex_vertex_range(h)?.collect();
            let key = match direction {
                Direction::Insertion => {
                    let key = self.next_key;
                    self.next_key += 1;
                    if O::Key::STORED {
                        self.tree.assign_key(h, key)?;
                    }
                    key
                }
                Direction::Removal => self.tree.key(h),
            };
            self.pending.push_back(ZigzagSimplex {
                vertices,
                filtration,
                direction,
                key,
            });
        }
        Ok(())
    }

    fn step(&mut self, edge: ZigzagEdge<O::Vertex>) -> Result<(), ComplexError> {
        match edge.direction {
            Direction::Insertion => {
                let added = self
                    .tree
                    .flag_add_edge(edge.u, edge.v, edge.filtration, self.max_dim)?;
                self.record(&added, edge.filtration, Direction::Insertion)
            }
            Direction::Removal => {
                let doomed = self.tree.flag_lazy_remove_edge(edge.u, edge.v)?;
                self.record(&doomed, edge.filtration, Direction::Removal)?;
                self.tree.remove_maximal_simplices(&doomed)
            }
        }
    }
}

impl<O, I> Iterator for FlagZigzagFiltration<O, I>
where
    O: SimplexTreeOptions,
    I: Iterator<Item = ZigzagEdge<O::Vertex>>,
{
    type Item = Result<ZigzagSimplex<O::Vertex>, ComplexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(s) = self.pending.pop_front() {
                return Some(Ok(s));
            }
            if self.failed {
                return None;
            }
            let edge = self.edges.next()?;
            if let Err(e) = self.step(edge) {
                self.failed = true;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::options::FullFeatured;

    #[test]
    fn keys_follow_the_stream() {
        let edges = vec![
            ZigzagEdge::insert(0, 1, 0.0),
            ZigzagEdge::insert(1, 2, 1.0),
            ZigzagEdge::insert(0, 2, 2.0),
            ZigzagEdge::remove(1, 2, 3.0),
        ];
        let steps: Vec<ZigzagSimplex<i32>> = FlagZigzagFiltration::<ZigzagPersistence, _>::new(edges, 2)
            .collect::<Result<_, _>>()
            .unwrap();
        let inserted: Vec<i64> = steps
            .iter()
            .filter(|s| s.direction == Direction::Insertion)
            .map(|s| s.key)
            .collect();
        assert_eq!(inserted, (0..7).collect::<Vec<_>>());

        let removed: Vec<(Vec<i32>, i64)> = steps
            .iter()
            .filter(|s| s.direction == Direction::Removal)
            .map(|s| (s.vertices.clone(), s.key))
            .collect();
        // {1,2} was the 5th simplex in, the triangle the 7th
        assert_eq!(removed, vec![(vec![2, 1, 0], 6), (vec![2, 1], 4)]);
        assert!(steps.iter().rev().take(2).all(|s| s.filtration == 3.0));
    }

    #[test]
    fn close_empties_the_complex() {
        let edges = vec![ZigzagEdge::insert(0, 1, 0.0), ZigzagEdge::insert(2, 2, 0.5)];
        let mut zz = FlagZigzagFiltration::<ZigzagPersistence, _>::new(edges, 1);
        let ins: Vec<_> = zz.by_ref().map(Result::unwrap).collect();
        assert_eq!(ins.len(), 4);
        assert_eq!(zz.tree().num_simplices(), 4);
        let out = zz.close(9.0).unwrap();
        assert_eq!(out.len(), 4);
        // reverse filtration order: the late vertex leaves first
        assert_eq!(out[0].vertices, vec![2]);
        assert_eq!(out[1].dimension(), 1);
        assert!(out.iter().all(|s| s.direction == Direction::Removal && s.filtration == 9.0));
    }

    #[test]
    fn first_error_ends_the_stream() {
        let edges = vec![ZigzagEdge::insert(0, 1, 0.0), ZigzagEdge::insert(1, 2, 0.0)];
        let mut zz = FlagZigzagFiltration::<FullFeatured, _>::new(edges, 1);
        assert_eq!(
            zz.next(),
            Some(Err(ComplexError::OptionDisabled("link_simplices_through_max_vertex")))
        );
        assert!(zz.next().is_none());
    }

    #[test]
    fn records_serialize() {
        let edge = ZigzagEdge::remove(3, 4, 1.5);
        let json = serde_json::to_string(&edge).unwrap();
        let back: ZigzagEdge<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edge);
    }
}
