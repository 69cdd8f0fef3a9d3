//! Declarations visible to code outside the converted scope.
//!
//! Passes that change the shape of a public declaration (rename, merge
//! overloads, move into a companion) record it here so the host can patch
//! external references after the pipeline. Shared by every unit of a run:
//! registration is append-only and concurrent, and no unit reads what
//! another unit registered.

use dashmap::DashMap;

use j2k_ir::{Name, OriginKey, StringInterner};

use crate::SymbolKind;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExternalChange {
    Renamed { to: Name },
    /// Getter/setter pair or field became a Kotlin property.
    BecameProperty { property: Name },
    /// Overloads with these parameter counts now resolve to one declaration.
    MergedOverloads { arities: Vec<usize> },
    MovedToCompanion,
    /// `@JvmOverloads` keeps the merged overloads callable from Java.
    JvmOverloads,
    /// `@JvmStatic` keeps a companion member callable statically from Java.
    JvmStatic,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalDeclaration {
    pub fq_name: Name,
    pub kind: SymbolKind,
    pub key: Option<OriginKey>,
    pub changes: Vec<ExternalChange>,
}

/// One declaration is one `(fq_name, key)` pair: overload families sharing
/// a name stay apart when their origins differ.
type EntryKey = (Name, Option<OriginKey>);

#[derive(Debug, Default)]
pub struct ExternalCodeProcessor {
    entries: DashMap<EntryKey, ExternalDeclaration>,
}

impl ExternalCodeProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `change` for the declaration `fq_name` originating at `key`.
    /// Repeated changes to the same declaration are kept once.
    pub fn register(&self, fq_name: Name, kind: SymbolKind, key: Option<OriginKey>, change: ExternalChange) {
        let mut entry = self
            .entries
            .entry((fq_name, key))
            .or_insert_with(|| ExternalDeclaration {
                fq_name,
                kind,
                key,
                changes: Vec::new(),
            });
        if !entry.changes.contains(&change) {
            tracing::debug!(fq_name = ?fq_name, ?key, change = ?change, "external declaration changed");
            entry.changes.push(change);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, fq_name: Name, key: Option<OriginKey>) -> Option<ExternalDeclaration> {
        self.entries
            .get(&(fq_name, key))
            .map(|entry| entry.value().clone())
    }

    /// Every declaration registered under `fq_name`, keyless first, then
    /// by origin key.
    pub fn declarations(&self, fq_name: Name) -> Vec<ExternalDeclaration> {
        let mut found: Vec<ExternalDeclaration> = self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == fq_name)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|decl| decl.key);
        found
    }

    /// All registrations, ordered by fully-qualified name, then origin key.
    pub fn snapshot(&self, interner: &StringInterner) -> Vec<ExternalDeclaration> {
        let mut all: Vec<ExternalDeclaration> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| {
            interner
                .lookup(a.fq_name)
                .cmp(interner.lookup(b.fq_name))
                .then(a.key.cmp(&b.key))
        });
        all
    }

    /// Take all registrations, in `snapshot` order.
    pub fn drain(&self, interner: &StringInterner) -> Vec<ExternalDeclaration> {
        let all = self.snapshot(interner);
        for decl in &all {
            self.entries.remove(&(decl.fq_name, decl.key));
        }
        all
    }
}
