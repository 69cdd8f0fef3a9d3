//! Shorthand constructors for common shapes.
//!
//! Front-ends, passes and tests all build the same handful of wrappers
//! (argument lists, empty annotation lists, expression statements); these
//! helpers allocate them with their bookkeeping children in place.

use crate::{
    BinaryOp, JkType, LiteralKind, Modifiers, Name, NodeId, NodeKind, SymbolId, Tree,
};

pub fn literal(tree: &mut Tree, kind: LiteralKind, text: impl Into<String>) -> NodeId {
    tree.alloc(NodeKind::Literal {
        kind,
        text: text.into(),
    })
}

pub fn int_literal(tree: &mut Tree, value: i64) -> NodeId {
    literal(tree, LiteralKind::Int, value.to_string())
}

pub fn null_literal(tree: &mut Tree) -> NodeId {
    literal(tree, LiteralKind::Null, "null")
}

pub fn reference(tree: &mut Tree, name: Name, symbol: SymbolId) -> NodeId {
    tree.alloc(NodeKind::FieldAccess { name, symbol })
}

pub fn arguments(tree: &mut Tree, arguments: Vec<NodeId>) -> NodeId {
    tree.alloc(NodeKind::ArgumentList { arguments })
}

pub fn type_arguments(tree: &mut Tree, arguments: Vec<NodeId>) -> NodeId {
    tree.alloc(NodeKind::TypeArgumentList { arguments })
}

/// Unqualified call with no type arguments.
pub fn call(tree: &mut Tree, name: Name, symbol: SymbolId, args: Vec<NodeId>) -> NodeId {
    let type_arguments = type_arguments(tree, Vec::new());
    let arguments = arguments(tree, args);
    tree.alloc(NodeKind::Call {
        name,
        symbol,
        type_arguments,
        arguments,
    })
}

pub fn qualified(tree: &mut Tree, receiver: NodeId, selector: NodeId) -> NodeId {
    tree.alloc(NodeKind::Qualified { receiver, selector })
}

pub fn binary(tree: &mut Tree, left: NodeId, op: BinaryOp, right: NodeId) -> NodeId {
    tree.alloc(NodeKind::Binary { left, op, right })
}

pub fn parenthesized(tree: &mut Tree, expression: NodeId) -> NodeId {
    tree.alloc(NodeKind::Parenthesized { expression })
}

pub fn block(tree: &mut Tree, statements: Vec<NodeId>) -> NodeId {
    tree.alloc(NodeKind::Block { statements })
}

pub fn expression_statement(tree: &mut Tree, expression: NodeId) -> NodeId {
    tree.alloc(NodeKind::ExpressionStatement { expression })
}

pub fn type_element(tree: &mut Tree, ty: JkType) -> NodeId {
    tree.alloc(NodeKind::TypeElement { ty })
}

pub fn annotation_list(tree: &mut Tree, annotations: Vec<NodeId>) -> NodeId {
    tree.alloc(NodeKind::AnnotationList { annotations })
}

pub fn annotation(tree: &mut Tree, fq_name: Name, symbol: SymbolId) -> NodeId {
    let arguments = arguments(tree, Vec::new());
    tree.alloc(NodeKind::Annotation {
        fq_name,
        symbol,
        arguments,
    })
}

pub fn parameter(
    tree: &mut Tree,
    name: Name,
    ty: JkType,
    default: Option<NodeId>,
    symbol: SymbolId,
) -> NodeId {
    let annotations = annotation_list(tree, Vec::new());
    let ty = type_element(tree, ty);
    tree.alloc(NodeKind::Parameter {
        name,
        modifiers: Modifiers::default(),
        annotations,
        ty,
        default,
        vararg: false,
        symbol,
    })
}

pub fn local_variable(
    tree: &mut Tree,
    name: Name,
    modifiers: Modifiers,
    ty: JkType,
    initializer: Option<NodeId>,
    symbol: SymbolId,
) -> NodeId {
    let annotations = annotation_list(tree, Vec::new());
    let ty = type_element(tree, ty);
    tree.alloc(NodeKind::LocalVariable {
        name,
        modifiers,
        annotations,
        ty,
        initializer,
        explicit_type: true,
        symbol,
    })
}

/// `TODO("note")` standing in for `text`.
pub fn todo(tree: &mut Tree, text: impl Into<String>, note: impl Into<String>) -> NodeId {
    tree.alloc(NodeKind::Todo {
        text: text.into(),
        note: note.into(),
    })
}
