//! Node and sibling-set storage.
//!
//! Sibling sets live in a slot arena addressed by [`SiblingId`]. Freed slots
//! are recycled through a free list and their generation is bumped, so an id
//! that outlived its set no longer resolves when strong validity is on.

use crate::topology::bounds::VertexLike;
use crate::topology::handle::SiblingId;
use crate::topology::options::{FiltrationSlot, SimplexTreeOptions};
use std::ops::{Index, IndexMut};

/// One simplex. The simplex itself is the vertex path leading to this node.
#[derive(Clone, Debug)]
pub(crate) struct Node<O: SimplexTreeOptions> {
    /// Child set, or the node's own sibling set when it has no cofaces.
    pub(crate) children: SiblingId,
    pub(crate) filtration: O::Filtration,
    pub(crate) key: O::Key,
    pub(crate) annotation: O::Annotation,
    pub(crate) pairing: O::Pairing,
}

impl<O: SimplexTreeOptions> Node<O> {
    /// A leaf node living in `own`.
    #[inline]
    pub(crate) fn leaf(own: SiblingId, filtration: f64) -> Self {
        Node {
            children: own,
            filtration: O::Filtration::new(filtration),
            key: Default::default(),
            annotation: Default::default(),
            pairing: Default::default(),
        }
    }

    #[inline]
    pub(crate) fn filtration(&self) -> f64 {
        self.filtration.get()
    }
}

/// The nodes sharing one prefix, ordered by label.
#[derive(Clone, Debug)]
pub(crate) struct Siblings<O: SimplexTreeOptions> {
    /// Set holding the parent node; `None` only for the root.
    pub(crate) oncles: Option<SiblingId>,
    /// Label of the parent node; the null vertex for the root.
    pub(crate) parent: O::Vertex,
    /// Number of vertices of the simplices stored here.
    pub(crate) depth: u32,
    pub(crate) members: Vec<(O::Vertex, Node<O>)>,
}

impl<O: SimplexTreeOptions> Siblings<O> {
    pub(crate) fn new(oncles: Option<SiblingId>, parent: O::Vertex, depth: u32) -> Self {
        Siblings {
            oncles,
            parent,
            depth,
            members: Vec::new(),
        }
    }

    /// Position of `v` by binary search.
    #[inline]
    pub(crate) fn search(&self, v: O::Vertex) -> Result<usize, usize> {
        self.members.binary_search_by(|(w, _)| w.cmp(&v))
    }

    #[inline]
    pub(crate) fn position(&self, v: O::Vertex) -> Option<usize> {
        self.search(v).ok()
    }

    /// Labels stored in this set, increasing.
    pub(crate) fn labels(&self) -> impl Iterator<Item = O::Vertex> + '_ {
        self.members.iter().map(|(v, _)| *v)
    }
}

#[derive(Clone, Debug)]
struct Slot<O: SimplexTreeOptions> {
    generation: u32,
    siblings: Option<Siblings<O>>,
}

/// Slot arena of sibling sets. Slot 0 is the root and is never freed.
#[derive(Clone, Debug)]
pub(crate) struct SiblingArena<O: SimplexTreeOptions> {
    slots: Vec<Slot<O>>,
    free: Vec<u32>,
}

impl<O: SimplexTreeOptions> SiblingArena<O> {
    pub(crate) fn new() -> Self {
        SiblingArena {
            slots: vec![Slot {
                generation: 0,
                siblings: Some(Siblings::new(None, O::Vertex::null_vertex(), 1)),
            }],
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, siblings: Siblings<O>) -> SiblingId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.siblings = Some(siblings);
            SiblingId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                siblings: Some(siblings),
            });
            SiblingId {
                index,
                generation: 0,
            }
        }
    }

    /// Release a set. Its members must already be unlinked from the coface
    /// index.
    pub(crate) fn free(&mut self, id: SiblingId) -> Option<Siblings<O>> {
        if id.is_root() {
            return None;
        }
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let taken = slot.siblings.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(taken)
    }

    /// Resolve an id coming from outside (a handle). The generation is only
    /// compared when the options ask for strong validity.
    pub(crate) fn get(&self, id: SiblingId) -> Option<&Siblings<O>> {
        let slot = self.slots.get(id.index as usize)?;
        if O::SIMPLEX_HANDLE_STRONG_VALIDITY && slot.generation != id.generation {
            return None;
        }
        slot.siblings.as_ref()
    }

    /// Resolve an internal id, always checking the generation.
    #[inline]
    pub(crate) fn live(&self, id: SiblingId) -> Option<&Siblings<O>> {
        let slot = self.slots.get(id.index as usize)?;
        (slot.generation == id.generation)
            .then_some(slot.siblings.as_ref())
            .flatten()
    }

    /// Ids of every live set, root first.
    pub(crate) fn ids(&self) -> impl Iterator<Item = SiblingId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.siblings.as_ref().map(|_| SiblingId {
                index: i as u32,
                generation: s.generation,
            })
        })
    }

    pub(crate) fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<O: SimplexTreeOptions> Index<SiblingId> for SiblingArena<O> {
    type Output = Siblings<O>;

    #[inline]
    fn index(&self, id: SiblingId) -> &Siblings<O> {
        match self.live(id) {
            Some(s) => s,
            None => panic!("dangling {id:?} in simplex tree arena"),
        }
    }
}

impl<O: SimplexTreeOptions> IndexMut<SiblingId> for SiblingArena<O> {
    #[inline]
    fn index_mut(&mut self, id: SiblingId) -> &mut Siblings<O> {
        let slot = &mut self.slots[id.index as usize];
        match slot.siblings.as_mut() {
            Some(s) if slot.generation == id.generation => s,
            _ => panic!("dangling {id:?} in simplex tree arena"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::options::FullFeatured;

    #[test]
    fn freed_slots_are_recycled_with_new_generation() {
        let mut arena = SiblingArena::<FullFeatured>::new();
        let a = arena.alloc(Siblings::new(Some(SiblingId::ROOT), 0, 2));
        assert!(arena.free(a).is_some());
        assert!(arena.live(a).is_none());
        let b = arena.alloc(Siblings::new(Some(SiblingId::ROOT), 1, 2));
        assert_eq!(a.index, b.index);
        assert_ne!(a.generation, b.generation);
        assert_eq!(arena[b].parent, 1);
        assert_eq!(arena.live_count(), 2);
    }

    #[test]
    fn root_cannot_be_freed() {
        let mut arena = SiblingArena::<FullFeatured>::new();
        assert!(arena.free(SiblingId::ROOT).is_none());
        assert_eq!(arena[SiblingId::ROOT].depth, 1);
        assert_eq!(arena[SiblingId::ROOT].parent, -1);
    }
}
