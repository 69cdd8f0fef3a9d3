//! Explicit initializers for fields a construction path leaves unassigned.
//!
//! Java fields start out as `0`, `false` or `null`; Kotlin properties must
//! be initialized. A field without an initializer keeps none only when
//! every way of constructing its class assigns it: an instance initializer
//! block that always assigns it, or every constructor (following `this(..)`
//! delegation) doing so. Otherwise it gets the Java default written out,
//! and a reference type becomes nullable.
//!
//! Only plain `=` assignments on every branch count. A conditional
//! assignment leaves a path unassigned, and so does a `return`, `throw` or
//! jump that can run before the assignment. A `try` assigns when its body
//! and every `catch` do, or when its `finally` does.

use rustc_hash::FxHashSet;

use j2k_diagnostic::NoteCode;
use j2k_ir::{
    build, AssignOp, DelegationTarget, JkType, LiteralKind, Modality, Nullability, NodeId,
    NodeKind, PrimitiveType, SymbolId, Tree,
};

use super::util::is_reference_to;
use crate::{ConversionCx, RecursiveConversion};

pub struct FieldInitializationConversion;

/// How control leaves a statement, as far as one field is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    /// Every way out has assigned the field.
    Assigned,
    /// Completes normally, maybe without assigning.
    Unassigned,
    /// May `break`/`continue`/`yield` to the nearest loop or switch first.
    Jumps,
    /// May leave the constructor (`return`, `throw`, labeled jump) first.
    Exits,
}

impl Flow {
    /// Both paths are possible.
    fn join(self, other: Flow) -> Flow {
        match (self, other) {
            (Flow::Exits, _) | (_, Flow::Exits) => Flow::Exits,
            (Flow::Jumps, _) | (_, Flow::Jumps) => Flow::Jumps,
            (Flow::Assigned, Flow::Assigned) => Flow::Assigned,
            _ => Flow::Unassigned,
        }
    }

    /// A jump that ends inside the enclosing loop or switch.
    fn contained(self) -> Flow {
        match self {
            Flow::Jumps => Flow::Unassigned,
            other => other,
        }
    }
}

fn flow(tree: &Tree, statement: NodeId, field: SymbolId) -> Flow {
    match tree.kind(statement) {
        NodeKind::ExpressionStatement { expression } => {
            let assigns = matches!(
                tree.kind(*expression),
                NodeKind::Assignment {
                    target,
                    op: AssignOp::Assign,
                    ..
                } if is_reference_to(tree, *target, field)
            );
            if assigns {
                Flow::Assigned
            } else {
                Flow::Unassigned
            }
        }
        NodeKind::Block { statements } => statements
            .iter()
            .map(|&s| flow(tree, s, field))
            .find(|f| *f != Flow::Unassigned)
            .unwrap_or(Flow::Unassigned),
        NodeKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            let then_flow = flow(tree, *then_branch, field);
            match else_branch {
                Some(else_branch) => then_flow.join(flow(tree, *else_branch, field)),
                None => then_flow.join(Flow::Unassigned),
            }
        }
        NodeKind::While { body, .. }
        | NodeKind::For { body, .. }
        | NodeKind::ForIn { body, .. } => flow(tree, *body, field)
            .contained()
            .join(Flow::Unassigned),
        NodeKind::DoWhile { body, .. } => match flow(tree, *body, field) {
            Flow::Jumps => Flow::Unassigned,
            other => other,
        },
        NodeKind::Switch { cases, .. } => cases
            .iter()
            .flat_map(|&case| match tree.kind(case) {
                NodeKind::SwitchCase { body, .. } => body.clone(),
                _ => Vec::new(),
            })
            .map(|s| flow(tree, s, field).contained())
            .fold(Flow::Unassigned, Flow::join),
        NodeKind::Try {
            body,
            catches,
            finally,
            ..
        } => {
            let finally_flow = finally.map(|f| flow(tree, f, field));
            if finally_flow == Some(Flow::Assigned) {
                return Flow::Assigned;
            }
            let handled = catches
                .iter()
                .map(|&c| match tree.kind(c) {
                    NodeKind::Catch { body, .. } => flow(tree, *body, field),
                    _ => Flow::Unassigned,
                })
                .fold(flow(tree, *body, field), Flow::join);
            match finally_flow {
                Some(Flow::Exits) => Flow::Exits,
                Some(Flow::Jumps) => handled.join(Flow::Jumps),
                _ => handled,
            }
        }
        NodeKind::Labeled { statement, .. } => flow(tree, *statement, field),
        NodeKind::Return { .. } | NodeKind::Throw { .. } => Flow::Exits,
        NodeKind::Break { label } | NodeKind::Continue { label } => {
            if label.is_some() {
                Flow::Exits
            } else {
                Flow::Jumps
            }
        }
        NodeKind::Yield { .. } => Flow::Jumps,
        _ => Flow::Unassigned,
    }
}

/// Whether running `statement` assigns `field` before it can be left.
fn definitely_assigns(tree: &Tree, statement: NodeId, field: SymbolId) -> bool {
    flow(tree, statement, field) == Flow::Assigned
}

/// Whether constructing through `constructor` assigns `field`.
fn constructor_assigns(
    cx: &ConversionCx<'_>,
    constructor: NodeId,
    field: SymbolId,
    visited: &mut FxHashSet<NodeId>,
) -> bool {
    if !visited.insert(constructor) {
        return false;
    }
    let NodeKind::Constructor {
        delegation, body, ..
    } = cx.tree.kind(constructor)
    else {
        return false;
    };
    if definitely_assigns(cx.tree, *body, field) {
        return true;
    }
    let Some(delegation) = delegation else {
        return false;
    };
    match cx.tree.kind(*delegation) {
        NodeKind::DelegationCall {
            target: DelegationTarget::This,
            symbol,
            ..
        } => cx
            .symbols
            .decl(*symbol)
            .is_some_and(|target| constructor_assigns(cx, target, field, visited)),
        _ => false,
    }
}

fn default_literal(primitive: PrimitiveType) -> LiteralKind {
    match primitive {
        PrimitiveType::Boolean => LiteralKind::Boolean,
        PrimitiveType::Char => LiteralKind::Char,
        PrimitiveType::Long => LiteralKind::Long,
        PrimitiveType::Float => LiteralKind::Float,
        PrimitiveType::Double => LiteralKind::Double,
        PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int => LiteralKind::Int,
    }
}

impl FieldInitializationConversion {
    fn always_assigned(cx: &ConversionCx<'_>, body: NodeId, field: SymbolId) -> bool {
        let members = cx.tree.list(body);
        let in_initializer = members.iter().any(|&member| {
            matches!(
                cx.tree.kind(member),
                NodeKind::Initializer { is_static: false, body } if definitely_assigns(cx.tree, *body, field)
            )
        });
        if in_initializer {
            return true;
        }
        let constructors: Vec<NodeId> = members
            .into_iter()
            .filter(|&m| matches!(cx.tree.kind(m), NodeKind::Constructor { .. }))
            .collect();
        !constructors.is_empty()
            && constructors.iter().all(|&constructor| {
                constructor_assigns(cx, constructor, field, &mut FxHashSet::default())
            })
    }

    /// Give `field` its Java default value.
    fn initialize(cx: &mut ConversionCx<'_>, field: NodeId) {
        let NodeKind::Field { ty, .. } = *cx.tree.kind(field) else {
            return;
        };
        let NodeKind::TypeElement { ty: declared } = cx.tree.kind(ty) else {
            return;
        };
        let value = match cx.context.types.primitive_of(declared) {
            Some(primitive) if declared.nullability() != Nullability::Nullable => {
                build::literal(cx.tree, default_literal(primitive), primitive.default_value())
            }
            _ => {
                if let NodeKind::TypeElement { ty: declared } = cx.tree.kind_mut(ty) {
                    let nullable = std::mem::replace(declared, JkType::NoType)
                        .with_nullability(Nullability::Nullable);
                    *declared = nullable;
                }
                build::null_literal(cx.tree)
            }
        };
        if let NodeKind::Field { initializer, .. } = cx.tree.kind_mut(field) {
            *initializer = Some(value);
            cx.tree.attach(field, value);
        }
        cx.record_change();
    }

    fn complete(cx: &mut ConversionCx<'_>, body: NodeId) {
        for member in cx.tree.list(body) {
            let NodeKind::Field {
                name,
                modifiers,
                initializer: None,
                symbol,
                ..
            } = *cx.tree.kind(member)
            else {
                continue;
            };
            // Java already proves final fields definitely assigned.
            if modifiers.modality == Modality::Final || Self::always_assigned(cx, body, symbol) {
                continue;
            }
            Self::initialize(cx, member);
            let field_name = cx.lookup(name);
            tracing::debug!(field = field_name, "default initializer added");
            cx.note(
                NoteCode::J3005,
                format!("field {field_name} may be read before assignment; initialized to its default"),
                member,
            );
        }
    }
}

impl RecursiveConversion for FieldInitializationConversion {
    fn name(&self) -> &'static str {
        "field-initialization"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        if let NodeKind::Class {
            class_kind, body, ..
        } = *cx.tree.kind(id)
        {
            if !class_kind.is_interface_like() {
                Self::complete(cx, body);
            }
        }
        self.recurse(cx, id)
    }
}
