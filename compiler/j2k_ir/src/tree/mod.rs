//! Generational arena owning every node of a translation unit.
//!
//! # Ownership
//!
//! A node has at most one parent. `alloc` creates an unparented node and
//! adopts the children named in its kind, which must themselves be
//! unparented. `detach` gives a child back to the caller: the parent's slot
//! keeps the stale reference until the caller either refills it
//! (`replace_child`) or replaces the parent. Child enumeration only yields
//! children whose parent link still points back, so a detached node is never
//! reached through its old parent.
//!
//! # Invalidation
//!
//! `invalidate` frees a node and every descendant still attached to it,
//! bumping the slot generation. Ids held past that point fail with
//! [`TreeError::Stale`]; a reused slot never answers to an old id.
//!
//! Each fallible operation has a `try_` form. The plain form panics: a
//! failure there is a programmer error in a pass, and the pipeline turns the
//! panic into a failed unit.

mod copy;
mod validate;

use smallvec::SmallVec;

use crate::{NodeId, NodeKind, Origin, Trivia};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("stale node id {0:?}: the node was invalidated")]
    Stale(NodeId),
    #[error("{child:?} is not attached to {expected:?} (its parent is {actual:?})")]
    ParentMismatch {
        child: NodeId,
        expected: NodeId,
        actual: Option<NodeId>,
    },
    #[error("{child:?} is already attached to {parent:?}")]
    AlreadyAttached { child: NodeId, parent: NodeId },
    #[error("{child:?} appears in more than one child slot")]
    Shared { child: NodeId },
    #[error("{node:?} ({tag}) has no child list")]
    NotAList { node: NodeId, tag: &'static str },
    #[error("{child:?} does not occupy a child slot of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("index {index} out of bounds for the child list of {parent:?} (len {len})")]
    IndexOutOfBounds {
        parent: NodeId,
        index: usize,
        len: usize,
    },
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    trivia: Trivia,
    origin: Option<Origin>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Child ids gathered from one node.
pub type Children = SmallVec<[NodeId; 8]>;

#[derive(Clone, Debug, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

fn fail<T>(result: Result<T, TreeError>) -> T {
    result.unwrap_or_else(|e| panic!("tree invariant violated: {e}"))
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|slot| slot.generation == id.generation() && slot.node.is_some())
    }

    fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        match self.slots.get(id.index()) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == id.generation() => Ok(node),
            _ => Err(TreeError::Stale(id)),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        match self.slots.get_mut(id.index()) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == id.generation() => Ok(node),
            _ => Err(TreeError::Stale(id)),
        }
    }

    // Construction

    /// Allocate a node. Every child named by `kind` must be alive and
    /// unparented; they become children of the new node.
    pub fn try_alloc(&mut self, kind: NodeKind) -> Result<NodeId, TreeError> {
        let mut children: Children = SmallVec::new();
        kind.for_each_slot(&mut |child| children.push(child));
        for (i, &child) in children.iter().enumerate() {
            if let Some(parent) = self.node(child)?.parent {
                return Err(TreeError::AlreadyAttached { child, parent });
            }
            if children[..i].contains(&child) {
                return Err(TreeError::Shared { child });
            }
        }

        let node = Node {
            kind,
            parent: None,
            trivia: Trivia::default(),
            origin: None,
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = u32::try_from(self.slots.len())
                    .unwrap_or_else(|_| panic!("node arena exceeded u32::MAX slots"));
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(index, 0)
            }
        };
        self.live += 1;

        for child in children {
            self.node_mut(child)?.parent = Some(id);
        }
        Ok(id)
    }

    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        fail(self.try_alloc(kind))
    }

    /// Allocate a node carrying `origin`.
    pub fn alloc_at(&mut self, kind: NodeKind, origin: Origin) -> NodeId {
        let id = self.alloc(kind);
        self.set_origin(id, Some(origin));
        id
    }

    // Accessors

    pub fn try_kind(&self, id: NodeId) -> Result<&NodeKind, TreeError> {
        self.node(id).map(|node| &node.kind)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        fail(self.try_kind(id))
    }

    /// Mutable access to a node's kind.
    ///
    /// Use it for non-structural edits (modifiers, names, symbols, literal
    /// text). Child slots written through it must be paired with
    /// [`attach`](Self::attach) or [`detach`](Self::detach).
    pub fn try_kind_mut(&mut self, id: NodeId) -> Result<&mut NodeKind, TreeError> {
        self.node_mut(id).map(|node| &mut node.kind)
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        fail(self.try_kind_mut(id))
    }

    pub fn try_parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.node(id).map(|node| node.parent)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        fail(self.try_parent(id))
    }

    pub fn trivia(&self, id: NodeId) -> &Trivia {
        fail(self.node(id).map(|node| &node.trivia))
    }

    pub fn trivia_mut(&mut self, id: NodeId) -> &mut Trivia {
        fail(self.node_mut(id).map(|node| &mut node.trivia))
    }

    pub fn origin(&self, id: NodeId) -> Option<Origin> {
        fail(self.node(id).map(|node| node.origin))
    }

    pub fn set_origin(&mut self, id: NodeId, origin: Option<Origin>) {
        fail(self.node_mut(id).map(|node| node.origin = origin));
    }

    /// Children currently attached to `id`, in source order.
    pub fn try_children(&self, id: NodeId) -> Result<Children, TreeError> {
        let node = self.node(id)?;
        let mut children = Children::new();
        node.kind.for_each_slot(&mut |child| {
            if self
                .node(child)
                .is_ok_and(|child_node| child_node.parent == Some(id))
            {
                children.push(child);
            }
        });
        Ok(children)
    }

    pub fn children(&self, id: NodeId) -> Children {
        fail(self.try_children(id))
    }

    /// Attached members of a list node (`Block`, `ClassBody`, ...).
    pub fn try_list(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let node = self.node(id)?;
        let list = node.kind.child_list().ok_or(TreeError::NotAList {
            node: id,
            tag: node.kind.tag(),
        })?;
        Ok(list
            .iter()
            .copied()
            .filter(|&child| {
                self.node(child)
                    .is_ok_and(|child_node| child_node.parent == Some(id))
            })
            .collect())
    }

    pub fn list(&self, id: NodeId) -> Vec<NodeId> {
        fail(self.try_list(id))
    }

    /// All nodes attached below `root` (inclusive), pre-order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let children = self.children(id);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Whether `ancestor` is `id` or one of its parents.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.try_parent(node).ok().flatten();
        }
        false
    }

    // Ownership transfer

    /// Take `child` out of `parent`. Fails unless `child`'s parent is
    /// exactly `parent`.
    pub fn try_detach(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, TreeError> {
        let node = self.node_mut(child)?;
        if node.parent != Some(parent) {
            return Err(TreeError::ParentMismatch {
                child,
                expected: parent,
                actual: node.parent,
            });
        }
        node.parent = None;
        Ok(child)
    }

    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        fail(self.try_detach(parent, child))
    }

    /// Detach `id` from whatever holds it. Used by a pass that wraps the node
    /// it is visiting without knowing the node's parent.
    pub fn unlink(&mut self, id: NodeId) -> NodeId {
        fail(self.node_mut(id).map(|node| node.parent = None));
        id
    }

    /// Adopt `child` into a slot of `parent` that already names it.
    pub fn try_attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let mut found = false;
        self.node(parent)?
            .kind
            .for_each_slot(&mut |slot| found |= slot == child);
        if !found {
            return Err(TreeError::NotAChild { parent, child });
        }
        let node = self.node_mut(child)?;
        if let Some(existing) = node.parent {
            return Err(TreeError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        node.parent = Some(parent);
        Ok(())
    }

    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        fail(self.try_attach(parent, child));
    }

    /// Put `new` in the slot `old` occupies in `parent`.
    ///
    /// `old` is invalidated if it is still attached to `parent`. If the
    /// caller detached it first (typically to reuse it inside `new`), it is
    /// left alone.
    pub fn try_replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), TreeError> {
        if old == new {
            return Ok(());
        }
        if let Some(existing) = self.node(new)?.parent {
            return Err(TreeError::AlreadyAttached {
                child: new,
                parent: existing,
            });
        }
        let mut replaced = false;
        self.node_mut(parent)?.kind.for_each_slot_mut(&mut |slot| {
            if !replaced && *slot == old {
                *slot = new;
                replaced = true;
            }
        });
        if !replaced {
            return Err(TreeError::NotAChild { parent, child: old });
        }
        self.node_mut(new)?.parent = Some(parent);

        if self
            .node(old)
            .is_ok_and(|old_node| old_node.parent == Some(parent))
        {
            self.try_invalidate(old)?;
        }
        Ok(())
    }

    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        fail(self.try_replace_child(parent, old, new));
    }

    // List operations

    pub fn try_insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), TreeError> {
        if let Some(existing) = self.node(child)?.parent {
            return Err(TreeError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        let node = self.node_mut(parent)?;
        let tag = node.kind.tag();
        let list = node.kind.child_list_mut().ok_or(TreeError::NotAList {
            node: parent,
            tag,
        })?;
        if index > list.len() {
            return Err(TreeError::IndexOutOfBounds {
                parent,
                index,
                len: list.len(),
            });
        }
        list.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        fail(self.try_insert_child(parent, index, child));
    }

    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        let len = fail(
            self.node(parent)
                .map(|node| node.kind.child_list().map_or(0, Vec::len)),
        );
        fail(self.try_insert_child(parent, len, child));
    }

    /// Remove `child` from `parent`'s child list and hand it to the caller.
    pub fn try_remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, TreeError> {
        let node = self.node_mut(parent)?;
        let tag = node.kind.tag();
        let list = node.kind.child_list_mut().ok_or(TreeError::NotAList {
            node: parent,
            tag,
        })?;
        let position = list
            .iter()
            .position(|&id| id == child)
            .ok_or(TreeError::NotAChild { parent, child })?;
        list.remove(position);
        self.try_detach(parent, child)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        fail(self.try_remove_child(parent, child))
    }

    /// Empty `parent`'s child list, returning the attached members detached.
    pub fn try_take_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let node = self.node_mut(parent)?;
        let tag = node.kind.tag();
        let list = std::mem::take(node.kind.child_list_mut().ok_or(TreeError::NotAList {
            node: parent,
            tag,
        })?);
        let mut taken = Vec::with_capacity(list.len());
        for child in list {
            if self
                .node(child)
                .is_ok_and(|child_node| child_node.parent == Some(parent))
            {
                self.node_mut(child)?.parent = None;
                taken.push(child);
            }
        }
        Ok(taken)
    }

    pub fn take_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        fail(self.try_take_children(parent))
    }

    // Invalidation

    /// Free `id` and everything still attached below it.
    pub fn try_invalidate(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.node(id)?;
        let mut worklist = vec![id];
        while let Some(current) = worklist.pop() {
            let children = self.children(current);
            worklist.extend(children);

            let slot = &mut self.slots[current.index()];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.live -= 1;
            // A slot whose generation wrapped is retired rather than reused.
            if slot.generation != 0 {
                self.free.push(current.raw_index());
            }
        }
        Ok(())
    }

    pub fn invalidate(&mut self, id: NodeId) {
        fail(self.try_invalidate(id));
    }

    // Trivia

    /// Move `from`'s comments and line breaks onto `to`, outside whatever
    /// `to` already carries.
    pub fn transfer_trivia(&mut self, from: NodeId, to: NodeId) {
        if from == to {
            return;
        }
        let trivia = std::mem::take(self.trivia_mut(from));
        self.trivia_mut(to).absorb(trivia);
    }

    pub fn take_trivia(&mut self, id: NodeId) -> Trivia {
        std::mem::take(self.trivia_mut(id))
    }
}

#[cfg(test)]
mod tests;
