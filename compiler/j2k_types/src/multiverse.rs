//! Read-only registry of declarations outside the converted scope.
//!
//! Built once per run by the host (Kotlin stdlib, compiled libraries, Java
//! sources that are not being converted) and shared by every unit.

use rustc_hash::FxHashMap;

use j2k_ir::{Name, StringInterner, SymbolId};

use crate::{Signature, SymbolKind, SymbolTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiverseDecl {
    pub fq_name: Name,
    pub kind: SymbolKind,
    pub signature: Option<Signature>,
}

#[derive(Debug, Default)]
pub struct Multiverse {
    decls: FxHashMap<Name, Vec<MultiverseDecl>>,
}

impl Multiverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration. Overloads share a fully-qualified name.
    pub fn register(&mut self, decl: MultiverseDecl) {
        self.decls.entry(decl.fq_name).or_default().push(decl);
    }

    pub fn class(&mut self, interner: &StringInterner, fq_name: &str) {
        self.register(MultiverseDecl {
            fq_name: interner.intern(fq_name),
            kind: SymbolKind::Class,
            signature: None,
        });
    }

    pub fn method(&mut self, interner: &StringInterner, fq_name: &str, signature: Signature) {
        self.register(MultiverseDecl {
            fq_name: interner.intern(fq_name),
            kind: SymbolKind::Method,
            signature: Some(signature),
        });
    }

    pub fn lookup(&self, fq_name: Name) -> &[MultiverseDecl] {
        self.decls.get(&fq_name).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, fq_name: Name) -> bool {
        self.decls.contains_key(&fq_name)
    }

    pub fn len(&self) -> usize {
        self.decls.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Resolve `fq_name` into `symbols`: the overload with `arity`
    /// parameters when given, the first declaration otherwise. Unknown names
    /// resolve to an unresolved symbol.
    pub fn resolve(&self, symbols: &mut SymbolTable, fq_name: Name, arity: Option<usize>) -> SymbolId {
        let decl = self.lookup(fq_name).iter().find(|decl| match arity {
            Some(n) => decl
                .signature
                .as_ref()
                .is_some_and(|sig| sig.parameters.len() == n),
            None => true,
        });
        match decl {
            Some(decl) => symbols.multiverse(decl.fq_name, decl.kind, decl.signature.clone()),
            None => {
                tracing::trace!(fq_name = ?fq_name, "multiverse lookup failed");
                symbols.unresolved(fq_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use j2k_ir::{JkType, PrimitiveType};

    use super::*;

    #[test]
    fn resolve_picks_overload_by_arity() {
        let interner = StringInterner::new();
        let mut multiverse = Multiverse::new();
        let int = JkType::Primitive(PrimitiveType::Int);
        multiverse.method(
            &interner,
            "java.lang.String.substring",
            Signature::new(vec![int.clone()], JkType::Unit),
        );
        multiverse.method(
            &interner,
            "java.lang.String.substring",
            Signature::new(vec![int.clone(), int], JkType::Unit),
        );
        let mut symbols = SymbolTable::new();
        let fq = interner.intern("java.lang.String.substring");
        let two = multiverse.resolve(&mut symbols, fq, Some(2));
        assert_eq!(symbols.signature(two).map(|s| s.parameters.len()), Some(2));
        assert_eq!(multiverse.len(), 2);
    }

    #[test]
    fn unknown_names_resolve_to_unresolved() {
        let interner = StringInterner::new();
        let multiverse = Multiverse::new();
        let mut symbols = SymbolTable::new();
        let id = multiverse.resolve(&mut symbols, interner.intern("nowhere.Foo"), None);
        assert!(symbols.is_unresolved(id));
    }
}
