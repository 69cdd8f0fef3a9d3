//! Symbol variants.

use j2k_ir::{JkType, Name, NodeId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Class,
    Method,
    Constructor,
    Field,
    Parameter,
    LocalVariable,
    TypeParameter,
    EnumConstant,
}

impl SymbolKind {
    pub const fn is_callable(self) -> bool {
        matches!(self, SymbolKind::Method | SymbolKind::Constructor)
    }

    pub const fn is_variable(self) -> bool {
        matches!(
            self,
            SymbolKind::Field | SymbolKind::Parameter | SymbolKind::LocalVariable
        )
    }
}

/// Callable or variable signature of a multiverse declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    pub parameters: Vec<JkType>,
    /// Return type for callables, variable type for fields.
    pub return_type: JkType,
    pub is_static: bool,
}

impl Signature {
    pub fn new(parameters: Vec<JkType>, return_type: JkType) -> Self {
        Signature {
            parameters,
            return_type,
            is_static: false,
        }
    }

    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// Declared inside the converted scope. Owned by the pipeline: passes may
/// move it to a replacement declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UniverseSymbol {
    pub decl: NodeId,
    pub kind: SymbolKind,
    pub name: Name,
    pub fq_name: Name,
}

/// Resolved against already-compiled Kotlin or unconverted Java. Read-only.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MultiverseSymbol {
    pub fq_name: Name,
    pub kind: SymbolKind,
    pub signature: Option<Signature>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Symbol {
    Universe(UniverseSymbol),
    Multiverse(MultiverseSymbol),
    Unresolved { name: Name },
}

impl Symbol {
    pub fn fq_name(&self) -> Option<Name> {
        match self {
            Symbol::Universe(s) => Some(s.fq_name),
            Symbol::Multiverse(s) => Some(s.fq_name),
            Symbol::Unresolved { .. } => None,
        }
    }

    pub fn kind(&self) -> Option<SymbolKind> {
        match self {
            Symbol::Universe(s) => Some(s.kind),
            Symbol::Multiverse(s) => Some(s.kind),
            Symbol::Unresolved { .. } => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Symbol::Unresolved { .. })
    }

    pub fn as_universe(&self) -> Option<&UniverseSymbol> {
        match self {
            Symbol::Universe(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_multiverse(&self) -> Option<&MultiverseSymbol> {
        match self {
            Symbol::Multiverse(s) => Some(s),
            _ => None,
        }
    }
}
