//! Explicit nullability for declared types.
//!
//! A declaration whose type still has platform (`Default`) nullability gets
//! a definite one. The oracle answers first; when it does not know, local
//! evidence decides:
//!
//! - assigned `null`, initialized with `null`, or compared with `null`
//!   anywhere in the unit: nullable;
//! - a method that returns `null`: nullable return type;
//! - a variable initialized with `new`, a literal or `this`, and only ever
//!   reassigned such values: not null. Fields qualify only when final or
//!   private, since other code may write them.
//!
//! Anything else keeps platform nullability for the printer to decide.
//! Declarations with a decided nullability are never revisited.

use rustc_hash::FxHashSet;

use j2k_ir::{AssignOp, BinaryOp, JkType, LiteralKind, Modality, Nullability, NodeId, NodeKind, SymbolId, Tree};

use super::util::is_reference_to;
use crate::{ConversionCx, RecursiveConversion};

#[derive(Default)]
pub struct NullabilityConversion {
    evidence: Option<NullEvidence>,
}

/// What the unit says about `null`, gathered once per run.
#[derive(Default)]
struct NullEvidence {
    /// Variables, fields and parameters that meet `null`.
    symbols: FxHashSet<SymbolId>,
    /// Methods with a `return null`.
    methods: FxHashSet<NodeId>,
    /// Variables assigned a value that may be null.
    maybe_null_writes: FxHashSet<SymbolId>,
}

impl NullEvidence {
    fn collect(tree: &Tree, root: NodeId) -> Self {
        let mut evidence = NullEvidence::default();
        for id in tree.descendants(root) {
            match tree.kind(id) {
                NodeKind::Assignment { target, value, .. } if is_null(tree, *value) => {
                    evidence.add_reference(tree, *target);
                }
                NodeKind::Assignment {
                    target,
                    op: AssignOp::Assign,
                    value,
                } if !is_never_null(tree, *value) => {
                    if let Some(symbol) = referenced(tree, *target) {
                        evidence.maybe_null_writes.insert(symbol);
                    }
                }
                NodeKind::Binary {
                    left,
                    op: BinaryOp::Eq | BinaryOp::Ne,
                    right,
                } => {
                    if is_null(tree, *right) {
                        evidence.add_reference(tree, *left);
                    } else if is_null(tree, *left) {
                        evidence.add_reference(tree, *right);
                    }
                }
                NodeKind::LocalVariable {
                    initializer: Some(init),
                    symbol,
                    ..
                }
                | NodeKind::Field {
                    initializer: Some(init),
                    symbol,
                    ..
                } if is_null(tree, *init) => {
                    evidence.symbols.insert(*symbol);
                }
                NodeKind::Return { value: Some(value), .. } if is_null(tree, *value) => {
                    if let Some(method) = enclosing_method(tree, id) {
                        evidence.methods.insert(method);
                    }
                }
                _ => {}
            }
        }
        evidence
    }

    fn add_reference(&mut self, tree: &Tree, expression: NodeId) {
        if let Some(symbol) = referenced(tree, expression) {
            self.symbols.insert(symbol);
        }
    }
}

fn is_null(tree: &Tree, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::Literal {
            kind: LiteralKind::Null,
            ..
        } => true,
        NodeKind::Parenthesized { expression } => is_null(tree, *expression),
        _ => false,
    }
}

/// Variable an expression names, bare or as `this.x`.
fn referenced(tree: &Tree, id: NodeId) -> Option<SymbolId> {
    match tree.kind(id) {
        NodeKind::FieldAccess { symbol, .. } => Some(*symbol),
        NodeKind::Qualified { selector, .. } => {
            let symbol = tree.kind(*selector).symbol()?;
            is_reference_to(tree, id, symbol).then_some(symbol)
        }
        NodeKind::Parenthesized { expression } => referenced(tree, *expression),
        _ => None,
    }
    .filter(|symbol| symbol.is_some())
}

/// Method a `return` leaves. Returns inside lambdas belong to the lambda.
fn enclosing_method(tree: &Tree, id: NodeId) -> Option<NodeId> {
    let mut current = tree.parent(id);
    while let Some(node) = current {
        match tree.kind(node) {
            NodeKind::Method { .. } => return Some(node),
            NodeKind::Lambda { .. } | NodeKind::Class { .. } => return None,
            _ => current = tree.parent(node),
        }
    }
    None
}

/// Initializers whose value can never be null.
fn is_never_null(tree: &Tree, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::New { .. } | NodeKind::NewArray { .. } | NodeKind::This { .. } => true,
        NodeKind::Literal { kind, .. } => !matches!(kind, LiteralKind::Null),
        NodeKind::Parenthesized { expression } => is_never_null(tree, *expression),
        _ => false,
    }
}

impl NullabilityConversion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nullability to give `decl`'s type, if anything is known.
    fn decide(cx: &ConversionCx<'_>, evidence: &NullEvidence, decl: NodeId) -> Nullability {
        let from_oracle = cx.analysis().nullability(cx.origin_key(decl));
        if from_oracle != Nullability::Default {
            return from_oracle;
        }
        let tree = &*cx.tree;
        match tree.kind(decl) {
            NodeKind::Method { .. } if evidence.methods.contains(&decl) => Nullability::Nullable,
            NodeKind::Method { .. } => Nullability::Default,
            kind => {
                let symbol = kind.symbol().unwrap_or(SymbolId::NONE);
                if symbol.is_some() && evidence.symbols.contains(&symbol) {
                    return Nullability::Nullable;
                }
                let (initializer, writes_are_visible) = match kind {
                    NodeKind::LocalVariable { initializer, .. } => (*initializer, true),
                    NodeKind::Field {
                        initializer,
                        modifiers,
                        ..
                    }
                    | NodeKind::Property {
                        initializer,
                        modifiers,
                        ..
                    } => (
                        *initializer,
                        modifiers.modality == Modality::Final || modifiers.is_private(),
                    ),
                    _ => (None, false),
                };
                let only_never_null_writes =
                    writes_are_visible && !evidence.maybe_null_writes.contains(&symbol);
                match initializer {
                    Some(init) if only_never_null_writes && is_never_null(tree, init) => {
                        Nullability::NotNull
                    }
                    _ => Nullability::Default,
                }
            }
        }
    }
}

/// Type element holding a declaration's own type.
fn declared_type(kind: &NodeKind) -> Option<NodeId> {
    match kind {
        NodeKind::Field { ty, .. }
        | NodeKind::LocalVariable { ty, .. }
        | NodeKind::Parameter { ty, .. }
        | NodeKind::Property { ty, .. } => Some(*ty),
        NodeKind::Method { return_type, .. } => Some(*return_type),
        _ => None,
    }
}

impl RecursiveConversion for NullabilityConversion {
    fn name(&self) -> &'static str {
        "nullability"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        // The first element visited is the root.
        let evidence = self
            .evidence
            .get_or_insert_with(|| NullEvidence::collect(cx.tree, id));

        if let Some(ty_element) = declared_type(cx.tree.kind(id)) {
            let undecided = matches!(
                cx.tree.kind(ty_element),
                NodeKind::TypeElement { ty } if ty.nullability() == Nullability::Default
                    && !matches!(ty, JkType::Primitive(_) | JkType::Unit | JkType::NoType)
            );
            if undecided {
                let nullability = Self::decide(cx, evidence, id);
                if nullability != Nullability::Default {
                    if let NodeKind::TypeElement { ty } = cx.tree.kind_mut(ty_element) {
                        *ty = std::mem::replace(ty, JkType::NoType).with_nullability(nullability);
                    }
                    tracing::debug!(
                        declaration = ?cx.tree.kind(id).declared_name().map(|n| cx.lookup(n)),
                        ?nullability,
                        "nullability decided"
                    );
                    cx.record_change();
                }
            }
        }
        self.recurse(cx, id)
    }
}
