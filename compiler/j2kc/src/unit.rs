//! What goes into the pipeline and what comes out.

use j2k_diagnostic::ConversionNote;
use j2k_ir::{NodeId, Tree};
use j2k_types::SymbolTable;

/// One source file as the front-end built it.
#[derive(Clone, Debug)]
pub struct TranslationUnit {
    /// Host-chosen label, usually the file path. Only used for logging.
    pub name: String,
    pub tree: Tree,
    pub root: NodeId,
    pub symbols: SymbolTable,
}

impl TranslationUnit {
    pub fn new(name: impl Into<String>, tree: Tree, root: NodeId, symbols: SymbolTable) -> Self {
        TranslationUnit {
            name: name.into(),
            tree,
            root,
            symbols,
        }
    }
}

/// Per-pass counters for one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitStats {
    /// Rewrites each pass made, in pipeline order.
    pub changes: Vec<(&'static str, usize)>,
    /// Analysis sessions the passes opened.
    pub analysis_sessions: u64,
}

impl UnitStats {
    pub fn total_changes(&self) -> usize {
        self.changes.iter().map(|(_, n)| n).sum()
    }

    /// Rewrites made by `pass`, or `None` if it did not run.
    pub fn changes_by(&self, pass: &str) -> Option<usize> {
        self.changes
            .iter()
            .find(|(name, _)| *name == pass)
            .map(|(_, n)| *n)
    }
}

/// A converted unit with the notes raised while converting it.
#[derive(Debug)]
pub struct UnitOutcome {
    pub unit: TranslationUnit,
    pub notes: Vec<ConversionNote>,
    pub stats: UnitStats,
}
