//! Index newtypes for the node arena and the symbol table.

use std::fmt;

/// Generational index of a node in a [`Tree`](crate::Tree).
///
/// The generation is bumped when a node is invalidated, so an id kept past
/// its node's replacement no longer matches the slot and every access through
/// it fails with [`TreeError::Stale`](crate::TreeError::Stale).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        NodeId { index, generation }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) const fn raw_index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

/// Index into a unit's symbol table.
///
/// Nodes store symbols by id. Rebinding a reference means writing a
/// different `SymbolId` into the node, never mutating the symbol it pointed
/// at.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Sentinel for nodes the front-end never bound (type-less literals,
    /// synthetic nodes).
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        SymbolId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            write!(f, "SymbolId::NONE")
        } else {
            write!(f, "SymbolId({})", self.0)
        }
    }
}
