//! Deep copy of subtrees.

use super::{Children, Tree, TreeError};
use crate::stack::ensure_sufficient_stack;
use crate::NodeId;

impl Tree {
    /// Structurally identical, unparented copy of the subtree at `id`,
    /// trivia and origin included. Symbols are shared: the copy references
    /// the same declarations as the original.
    pub fn try_copy_and_detach(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        ensure_sufficient_stack(|| {
            let node = self.node(id)?;
            let mut kind = node.kind.clone();
            let trivia = node.trivia.clone();
            let origin = node.origin;

            let mut originals = Children::new();
            kind.for_each_slot(&mut |child| originals.push(child));
            let mut copies = Children::with_capacity(originals.len());
            for child in originals {
                copies.push(self.try_copy_and_detach(child)?);
            }
            let mut next = copies.into_iter();
            kind.for_each_slot_mut(&mut |slot| {
                if let Some(copy) = next.next() {
                    *slot = copy;
                }
            });

            let copy = self.try_alloc(kind)?;
            let copied = self.node_mut(copy)?;
            copied.trivia = trivia;
            copied.origin = origin;
            Ok(copy)
        })
    }

    pub fn copy_and_detach(&mut self, id: NodeId) -> NodeId {
        super::fail(self.try_copy_and_detach(id))
    }
}
