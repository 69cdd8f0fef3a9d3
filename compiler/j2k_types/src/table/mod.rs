//! Per-unit symbol table.
//!
//! Symbols are append-only: rebinding a reference allocates or picks another
//! `SymbolId` and writes it into the referencing node. The only in-place
//! edit is [`SymbolTable::transfer`], which moves a universe symbol to the
//! declaration that replaced its old one.

use rustc_hash::FxHashMap;

use j2k_ir::{Name, NodeId, SymbolId, Tree};

use crate::{MultiverseSymbol, Signature, Symbol, SymbolKind, UniverseSymbol};

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_decl: FxHashMap<NodeId, SymbolId>,
    multiverse_index: FxHashMap<MultiverseSymbol, SymbolId>,
    unresolved_index: FxHashMap<Name, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn push(&mut self, symbol: Symbol) -> SymbolId {
        let raw = u32::try_from(self.symbols.len())
            .ok()
            .filter(|raw| *raw != SymbolId::NONE.raw())
            .unwrap_or_else(|| panic!("symbol table exceeded {} entries", u32::MAX - 1));
        self.symbols.push(symbol);
        SymbolId::new(raw)
    }

    /// Declare a universe symbol for `decl`.
    pub fn declare(&mut self, decl: NodeId, kind: SymbolKind, name: Name, fq_name: Name) -> SymbolId {
        let id = self.push(Symbol::Universe(UniverseSymbol {
            decl,
            kind,
            name,
            fq_name,
        }));
        self.by_decl.insert(decl, id);
        id
    }

    /// Symbol for a multiverse declaration, shared by every reference to
    /// the same declaration within the unit.
    pub fn multiverse(&mut self, fq_name: Name, kind: SymbolKind, signature: Option<Signature>) -> SymbolId {
        let key = MultiverseSymbol {
            fq_name,
            kind,
            signature,
        };
        if let Some(&id) = self.multiverse_index.get(&key) {
            return id;
        }
        let id = self.push(Symbol::Multiverse(key.clone()));
        self.multiverse_index.insert(key, id);
        id
    }

    pub fn unresolved(&mut self, name: Name) -> SymbolId {
        if let Some(&id) = self.unresolved_index.get(&name) {
            return id;
        }
        let id = self.push(Symbol::Unresolved { name });
        self.unresolved_index.insert(name, id);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        if id.is_some() {
            self.symbols.get(id.index())
        } else {
            None
        }
    }

    /// Whether `id` is missing or failed resolution. Passes skip such
    /// references rather than guess.
    pub fn is_unresolved(&self, id: SymbolId) -> bool {
        self.get(id).map_or(true, Symbol::is_unresolved)
    }

    pub fn fq_name(&self, id: SymbolId) -> Option<Name> {
        self.get(id).and_then(Symbol::fq_name)
    }

    pub fn kind(&self, id: SymbolId) -> Option<SymbolKind> {
        self.get(id).and_then(Symbol::kind)
    }

    pub fn signature(&self, id: SymbolId) -> Option<&Signature> {
        self.get(id)
            .and_then(Symbol::as_multiverse)
            .and_then(|s| s.signature.as_ref())
    }

    /// Declaration node of a universe symbol.
    pub fn decl(&self, id: SymbolId) -> Option<NodeId> {
        self.get(id).and_then(Symbol::as_universe).map(|s| s.decl)
    }

    pub fn symbol_of_decl(&self, decl: NodeId) -> Option<SymbolId> {
        self.by_decl.get(&decl).copied()
    }

    /// Move the universe symbol declared by `old_decl` onto `new_decl`.
    /// References keep their `SymbolId` and so follow the move.
    pub fn transfer(&mut self, old_decl: NodeId, new_decl: NodeId) -> Option<SymbolId> {
        let id = self.by_decl.remove(&old_decl)?;
        if let Some(Symbol::Universe(symbol)) = self.symbols.get_mut(id.index()) {
            symbol.decl = new_decl;
        }
        self.by_decl.insert(new_decl, id);
        Some(id)
    }

    /// Point the reference at `node` to `target`. Returns the previous
    /// binding; `None` if `node` has no symbol slot.
    pub fn rebind(&self, tree: &mut Tree, node: NodeId, target: SymbolId) -> Option<SymbolId> {
        debug_assert!(
            self.get(target).is_some(),
            "rebinding to unknown symbol {target:?}"
        );
        let slot = tree.kind_mut(node).symbol_mut()?;
        Some(std::mem::replace(slot, target))
    }

    /// Reference nodes below `root` bound to `symbol` (declarations
    /// excluded).
    pub fn references(&self, tree: &Tree, root: NodeId, symbol: SymbolId) -> Vec<NodeId> {
        use j2k_ir::NodeKind;
        tree.descendants(root)
            .into_iter()
            .filter(|&id| {
                let kind = tree.kind(id);
                matches!(
                    kind,
                    NodeKind::Call { .. }
                        | NodeKind::FieldAccess { .. }
                        | NodeKind::New { .. }
                        | NodeKind::MethodReference { .. }
                        | NodeKind::DelegationCall { .. }
                ) && kind.symbol() == Some(symbol)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
