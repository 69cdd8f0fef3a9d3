//! Static types of expressions.
//!
//! Enough typing for the passes that filter on argument or initializer
//! types: literals, references to declarations with a type element, calls
//! with a known signature, and the operators over those. Anything else
//! answers `None` and the asking pass stays conservative.

use j2k_ir::stack::ensure_sufficient_stack;
use j2k_ir::{
    BinaryOp, JkType, LiteralKind, Nullability, NodeId, NodeKind, PostfixOp, PrefixOp,
    PrimitiveType, SymbolId,
};

use crate::ConversionCx;

pub(crate) fn expression_type(cx: &mut ConversionCx<'_>, id: NodeId) -> Option<JkType> {
    ensure_sufficient_stack(|| expression_type_inner(cx, id))
}

fn expression_type_inner(cx: &mut ConversionCx<'_>, id: NodeId) -> Option<JkType> {
    let context = cx.context;
    let types = &context.types;
    match cx.tree.kind(id).clone() {
        NodeKind::Literal { kind, .. } => {
            let primitive = match kind {
                LiteralKind::Int => PrimitiveType::Int,
                LiteralKind::Long => PrimitiveType::Long,
                LiteralKind::Float => PrimitiveType::Float,
                LiteralKind::Double => PrimitiveType::Double,
                LiteralKind::Char => PrimitiveType::Char,
                LiteralKind::Boolean => PrimitiveType::Boolean,
                LiteralKind::String | LiteralKind::TextBlock => {
                    return Some(types.string(cx.symbols))
                }
                LiteralKind::Null => return None,
            };
            Some(types.primitive(cx.symbols, primitive))
        }
        NodeKind::FieldAccess { symbol, .. } | NodeKind::Call { symbol, .. } => {
            symbol_type(cx, symbol)
        }
        NodeKind::Qualified { selector, .. } => expression_type(cx, selector),
        NodeKind::Parenthesized { expression } => expression_type(cx, expression),
        NodeKind::Assignment { target, .. } => expression_type(cx, target),
        NodeKind::Ternary { then_value, .. } => expression_type(cx, then_value),
        NodeKind::New { ty, .. } | NodeKind::TypeCast { ty, .. } => type_element(cx, ty),
        NodeKind::IsExpression { .. } => Some(types.boolean(cx.symbols)),
        NodeKind::Binary { left, op, right } => binary_type(cx, left, op, right),
        NodeKind::Prefix { op, operand } => match op {
            PrefixOp::Not => Some(types.boolean(cx.symbols)),
            PrefixOp::Plus | PrefixOp::Minus | PrefixOp::BitNot => {
                let operand = expression_type(cx, operand)?;
                promoted(cx, &operand, &operand)
            }
            PrefixOp::Inc | PrefixOp::Dec => expression_type(cx, operand),
        },
        NodeKind::Postfix { op, operand } => {
            let ty = expression_type(cx, operand)?;
            Some(match op {
                PostfixOp::NotNull => ty.with_nullability(Nullability::NotNull),
                PostfixOp::Inc | PostfixOp::Dec => ty,
            })
        }
        NodeKind::ArrayAccess { array, .. } => {
            let array = expression_type(cx, array)?;
            element_type(cx, &array)
        }
        NodeKind::NewArray {
            element_type,
            dimensions,
            ..
        } => {
            let mut ty = type_element(cx, element_type)?;
            for _ in 0..dimensions.len().max(1) {
                ty = JkType::Array {
                    element: Box::new(ty),
                    nullability: Nullability::NotNull,
                };
            }
            Some(ty)
        }
        _ => None,
    }
}

/// Declared type of whatever `symbol` names: a variable's type or a
/// callable's return type.
pub(crate) fn symbol_type(cx: &mut ConversionCx<'_>, symbol: SymbolId) -> Option<JkType> {
    if let Some(signature) = cx.symbols.signature(symbol) {
        return Some(signature.return_type.clone());
    }
    let decl = cx.symbols.decl(symbol)?;
    if !cx.tree.is_alive(decl) {
        return None;
    }
    match *cx.tree.kind(decl) {
        NodeKind::Field { ty, .. }
        | NodeKind::LocalVariable { ty, .. }
        | NodeKind::Property { ty, .. } => type_element(cx, ty),
        NodeKind::Parameter { ty, vararg, .. } => {
            let ty = type_element(cx, ty)?;
            Some(if vararg {
                JkType::Array {
                    element: Box::new(ty),
                    nullability: Nullability::NotNull,
                }
            } else {
                ty
            })
        }
        NodeKind::Method { return_type, .. } => type_element(cx, return_type),
        _ => None,
    }
}

fn type_element(cx: &ConversionCx<'_>, id: NodeId) -> Option<JkType> {
    match cx.tree.kind(id) {
        NodeKind::TypeElement { ty } if !ty.is_unresolved() => Some(ty.clone()),
        _ => None,
    }
}

fn binary_type(
    cx: &mut ConversionCx<'_>,
    left: NodeId,
    op: BinaryOp,
    right: NodeId,
) -> Option<JkType> {
    let context = cx.context;
    let types = &context.types;
    if op.is_comparison()
        || matches!(op, BinaryOp::Eq | BinaryOp::Ne | BinaryOp::And | BinaryOp::Or)
    {
        return Some(types.boolean(cx.symbols));
    }
    if op == BinaryOp::Elvis {
        return expression_type(cx, right);
    }
    let left = expression_type(cx, left)?;
    let right = expression_type(cx, right)?;
    if op == BinaryOp::Add && (types.is_string(&left) || types.is_string(&right)) {
        return Some(types.string(cx.symbols));
    }
    match op {
        // Shifts take the type of the shifted operand.
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => promoted(cx, &left, &left),
        _ => promoted(cx, &left, &right),
    }
}

/// Binary numeric promotion: the wider operand, at least `Int`.
fn promoted(cx: &mut ConversionCx<'_>, left: &JkType, right: &JkType) -> Option<JkType> {
    let context = cx.context;
    let types = &context.types;
    let l = types.primitive_of(left)?;
    let r = types.primitive_of(right)?;
    if l == PrimitiveType::Boolean && r == PrimitiveType::Boolean {
        return Some(types.boolean(cx.symbols));
    }
    let rank = |p: PrimitiveType| match p {
        PrimitiveType::Char => Some(2),
        other => other.numeric_rank(),
    };
    let widest = if rank(l)? >= rank(r)? { l } else { r };
    let result = match widest {
        PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char => PrimitiveType::Int,
        other => other,
    };
    Some(types.primitive(cx.symbols, result))
}

fn element_type(cx: &mut ConversionCx<'_>, array: &JkType) -> Option<JkType> {
    match array {
        JkType::Array { element, .. } => Some(element.as_ref().clone()),
        JkType::Class(class) => {
            let fq = cx.lookup(class.fq_name);
            if fq == "kotlin.Array" {
                return class.args.first().cloned();
            }
            let primitive = fq
                .strip_prefix("kotlin.")
                .and_then(|name| name.strip_suffix("Array"))
                .and_then(|name| PrimitiveType::from_kotlin_fq_name(&format!("kotlin.{name}")))?;
            Some(cx.context.types.primitive(cx.symbols, primitive))
        }
        _ => None,
    }
}
