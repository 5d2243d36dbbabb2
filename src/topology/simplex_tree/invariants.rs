use super::SimplexTree;
use crate::complex_error::ComplexError;
use crate::debug_invariants::DebugInvariants;
use crate::topology::_debug_invariants::{check, is_strictly_increasing};
use crate::topology::bounds::VertexLike;
use crate::topology::options::{CofaceIndexSlot, SimplexTreeOptions};

impl<O: SimplexTreeOptions> DebugInvariants for SimplexTree<O> {
    fn validate_invariants(&self) -> Result<(), ComplexError> {
        let mut max_depth = 0u32;
        let mut nodes = 0usize;

        for sib in self.arena.ids() {
            let s = &self.arena[sib];

            // 1) members sorted, no null label
            let labels: Vec<O::Vertex> = s.labels().collect();
            check(is_strictly_increasing(&labels), || {
                format!("{sib:?} members not strictly increasing: {labels:?}")
            })?;
            check(!labels.iter().any(|v| v.is_null_vertex()), || {
                format!("{sib:?} stores the null vertex")
            })?;

            // 2) only the root may be empty, and a non-root set hangs below
            //    the node it claims as parent
            if !sib.is_root() {
                check(!labels.is_empty(), || format!("empty {sib:?} left in the tree"))?;
                let up = s
                    .oncles
                    .ok_or_else(|| ComplexError::InvariantViolation(format!("{sib:?} has no oncles")))?;
                let up_set = self.arena.live(up).ok_or_else(|| {
                    ComplexError::InvariantViolation(format!("{sib:?} points at dead oncles {up:?}"))
                })?;
                let owner = up_set.position(s.parent).map(|i| up_set.members[i].1.children);
                check(owner == Some(sib), || {
                    format!("{sib:?} is not the child set of node {} in {up:?}", s.parent)
                })?;
                check(up_set.depth + 1 == s.depth, || {
                    format!("{sib:?} depth {} below depth {}", s.depth, up_set.depth)
                })?;
            } else {
                check(s.oncles.is_none() && s.depth == 1, || "malformed root set".to_string())?;
            }

            // 3) children are the own set or a set labelled by this node
            for (v, node) in &s.members {
                if node.children != sib {
                    let child = self.arena.live(node.children).ok_or_else(|| {
                        ComplexError::InvariantViolation(format!(
                            "node {v} in {sib:?} points at dead {:?}",
                            node.children
                        ))
                    })?;
                    check(child.parent == *v && child.oncles == Some(sib), || {
                        format!("node {v} in {sib:?} points at a foreign set {:?}", node.children)
                    })?;
                }
                // 4) coface index knows every node
                if <O::Cofaces as CofaceIndexSlot<O::Vertex>>::ENABLED {
                    let linked = self
                        .cofaces
                        .holders(*v)
                        .is_some_and(|set| set.contains(&sib));
                    check(linked, || format!("node {v} in {sib:?} missing from coface index"))?;
                }
            }

            nodes += labels.len();
            if !labels.is_empty() {
                max_depth = max_depth.max(s.depth);
            }
        }

        if <O::Cofaces as CofaceIndexSlot<O::Vertex>>::ENABLED {
            check(self.cofaces.len() == nodes, || {
                format!("coface index holds {} links for {nodes} simplices", self.cofaces.len())
            })?;
        }

        // 5) the recorded dimension bounds the real one
        let real = max_depth as i32 - 1;
        check(real <= self.dimension, || {
            format!("dimension bound {} below actual dimension {real}", self.dimension)
        })?;
        check(self.dimension_to_be_lowered || real == self.dimension, || {
            format!("dimension {} marked exact, actual {real}", self.dimension)
        })?;
        Ok(())
    }
}
