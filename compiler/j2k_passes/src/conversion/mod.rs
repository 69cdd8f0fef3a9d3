//! The pass contract.
//!
//! A pass is handed the root of a unit and returns the (possibly new) root.
//! Most passes are [`RecursiveConversion`]s: they look at one node, either
//! leave it alone and recurse into its children, or build a replacement and
//! recurse into that. Recursion is pre-order with respect to substitution,
//! so a pass sees its own output and can finish the job in one run.
//!
//! # Ownership rules for passes
//!
//! - Children of the visited node that move into a replacement are detached
//!   from the visited node first (`detach`, `take_children`).
//! - A replacement that wraps the visited node itself `unlink`s it.
//! - Trivia of a replaced node moves to its replacement
//!   ([`ConversionCx::replaced`]), so comments survive every rewrite.
//! - [`recurse`](RecursiveConversion::recurse) puts the returned node into
//!   the old node's slot and invalidates the old node if it was not reused.

use j2k_diagnostic::{NoteCode, NoteSink};
use j2k_ir::stack::ensure_sufficient_stack;
use j2k_ir::{JkType, Name, NodeId, OriginKey, Span, StringInterner, SymbolId, Tree};
use j2k_types::{Analysis, SessionGate, SymbolKind, SymbolTable};

use crate::{expression_type, ConversionContext, ConverterSettings};

/// Everything a pass may read or write while converting one unit.
pub struct ConversionCx<'a> {
    pub tree: &'a mut Tree,
    pub symbols: &'a mut SymbolTable,
    pub context: &'a ConversionContext,
    pub notes: &'a mut NoteSink,
    gate: &'a SessionGate,
    changes: usize,
}

impl<'a> ConversionCx<'a> {
    pub fn new(
        tree: &'a mut Tree,
        symbols: &'a mut SymbolTable,
        context: &'a ConversionContext,
        notes: &'a mut NoteSink,
        gate: &'a SessionGate,
    ) -> Self {
        ConversionCx {
            tree,
            symbols,
            context,
            notes,
            gate,
            changes: 0,
        }
    }

    /// Oracle access. Each query opens and closes its own session.
    pub fn analysis(&self) -> Analysis<'a> {
        Analysis::new(&*self.context.oracle, self.gate)
    }

    pub fn settings(&self) -> &'a ConverterSettings {
        &self.context.settings
    }

    pub fn interner(&self) -> &'a StringInterner {
        &self.context.interner
    }

    pub fn intern(&self, s: &str) -> Name {
        self.context.interner.intern(s)
    }

    pub fn lookup(&self, name: Name) -> &'static str {
        self.context.interner.lookup(name)
    }

    /// Fully-qualified name of a resolved symbol.
    pub fn symbol_fq_name(&self, symbol: SymbolId) -> Option<&'static str> {
        self.symbols.fq_name(symbol).map(|name| self.lookup(name))
    }

    /// Symbol for a multiverse declaration known by name only.
    pub fn multiverse_symbol(&mut self, fq_name: &str, kind: SymbolKind) -> SymbolId {
        let fq_name = self.intern(fq_name);
        self.symbols.multiverse(fq_name, kind, None)
    }

    pub fn origin_key(&self, id: NodeId) -> Option<OriginKey> {
        self.tree.origin(id).and_then(|origin| origin.key)
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.tree.origin(id).map(|origin| origin.span)
    }

    /// Static type of an expression, when it can be told without analysis.
    pub fn type_of(&mut self, id: NodeId) -> Option<JkType> {
        expression_type::expression_type(self, id)
    }

    pub fn note(&mut self, code: NoteCode, message: impl Into<String>, at: NodeId) {
        let span = self.span(at);
        self.notes.note(code, message, span);
    }

    /// Record that `new` stands in for `old`: comments and line breaks move
    /// over, and `new` inherits `old`'s origin unless it has its own.
    pub fn replaced(&mut self, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }
        self.tree.transfer_trivia(old, new);
        if self.tree.origin(new).is_none() {
            let origin = self.tree.origin(old);
            self.tree.set_origin(new, origin);
        }
        self.changes += 1;
    }

    /// Count an in-place edit.
    pub fn record_change(&mut self) {
        self.changes += 1;
    }

    /// Rewrites made through this context so far.
    pub fn changes(&self) -> usize {
        self.changes
    }
}

/// A pass over a whole unit.
pub trait Conversion {
    fn name(&self) -> &'static str;

    /// Convert the tree below `root`; returns the new root.
    fn run(&mut self, cx: &mut ConversionCx<'_>, root: NodeId) -> NodeId;
}

pub trait RecursiveConversion {
    fn name(&self) -> &'static str;

    /// Convert `id`. Returns `id` itself or a detached replacement.
    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId;

    /// Convert every child of `id` in place, in source order.
    fn recurse(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        ensure_sufficient_stack(|| {
            for child in cx.tree.children(id) {
                // An earlier sibling's rewrite may have moved this one.
                if cx.tree.try_parent(child).ok().flatten() != Some(id) {
                    continue;
                }
                let converted = self.apply_to_element(cx, child);
                if converted != child {
                    cx.tree.replace_child(id, child, converted);
                }
            }
            id
        })
    }
}

impl<T: RecursiveConversion> Conversion for T {
    fn name(&self) -> &'static str {
        RecursiveConversion::name(self)
    }

    fn run(&mut self, cx: &mut ConversionCx<'_>, root: NodeId) -> NodeId {
        self.apply_to_element(cx, root)
    }
}

/// A recursive pass that hands an accumulator down the recursion.
pub trait RecursiveConversionWithData {
    type Data: Clone;

    fn name(&self) -> &'static str;

    fn initial_data(&self) -> Self::Data;

    fn apply_to_element(
        &mut self,
        cx: &mut ConversionCx<'_>,
        id: NodeId,
        data: &Self::Data,
    ) -> NodeId;

    fn recurse_with_data(
        &mut self,
        cx: &mut ConversionCx<'_>,
        id: NodeId,
        data: &Self::Data,
    ) -> NodeId {
        ensure_sufficient_stack(|| {
            for child in cx.tree.children(id) {
                if cx.tree.try_parent(child).ok().flatten() != Some(id) {
                    continue;
                }
                let converted = self.apply_to_element(cx, child, data);
                if converted != child {
                    cx.tree.replace_child(id, child, converted);
                }
            }
            id
        })
    }
}

/// Runs a [`RecursiveConversionWithData`] as a [`Conversion`], starting
/// from its initial data.
pub struct WithData<T>(pub T);

impl<T: RecursiveConversionWithData> Conversion for WithData<T> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn run(&mut self, cx: &mut ConversionCx<'_>, root: NodeId) -> NodeId {
        let data = self.0.initial_data();
        self.0.apply_to_element(cx, root, &data)
    }
}

#[cfg(test)]
mod tests;
