//! Java `for` loops.
//!
//! A counted loop (one `int`/`long` induction variable, compared against an
//! invariant bound, stepped by a constant) becomes a `for (i in range)`
//! loop. The range keeps the loop's exact sequence: `<` maps to `until`,
//! `<=` to `..`, `>=` to `downTo`, and `>` to `downTo` one past the bound.
//!
//! Any other `for` becomes a `while` loop. The initializers move in front of
//! it and the update runs at the end of the body and before every
//! `continue` aimed at this loop, so the loop steps exactly as before.

use j2k_diagnostic::NoteCode;
use j2k_ir::stack::ensure_sufficient_stack;
use j2k_ir::{
    build, AssignOp, BinaryOp, LiteralKind, Modifiers, Name, NodeId, NodeKind, PostfixOp,
    PrefixOp, PrimitiveType, RangeKind, SymbolId, Tree,
};

use super::util::{decimal_value, is_jump, is_reference_to, writes};
use crate::{ConversionCx, RecursiveConversion};

pub struct ForConversion;

/// Pieces of a loop that matched the counted shape.
struct CountedLoop {
    /// The `int i = a` statement (or `i` itself).
    initializer: NodeId,
    variable: NodeId,
    name: Name,
    ty: NodeId,
    symbol: SymbolId,
    start: NodeId,
    condition: NodeId,
    bound: NodeId,
    /// `i <op> bound`, with `i` on the left.
    op: BinaryOp,
    step: i64,
    /// The `i++` statement.
    update: NodeId,
    long: bool,
    body: NodeId,
}

/// Receiver methods a bound like `list.size()` may be read through without
/// the collection changing.
const READ_ONLY_CALLS: &[&str] = &[
    "get", "size", "length", "charAt", "contains", "containsKey", "isEmpty", "indexOf",
    "lastIndexOf", "equals", "hashCode", "toString", "substring", "startsWith", "endsWith",
];

/// Move the comments of `root` and everything still attached below it onto
/// `to`, keeping their source order.
fn gather_trivia(tree: &mut Tree, root: NodeId, to: NodeId) {
    for node in tree.descendants(root).into_iter().rev() {
        tree.transfer_trivia(node, to);
    }
}

impl ForConversion {
    fn counted_loop(cx: &ConversionCx<'_>, id: NodeId) -> Option<CountedLoop> {
        let tree = &*cx.tree;
        let NodeKind::For {
            initializers,
            condition: Some(condition),
            updates,
            body,
        } = tree.kind(id)
        else {
            return None;
        };
        let ([initializer], [update]) = (initializers.as_slice(), updates.as_slice()) else {
            return None;
        };
        let variable = match tree.kind(*initializer) {
            NodeKind::DeclarationStatement { declarations } if declarations.len() == 1 => {
                declarations[0]
            }
            NodeKind::LocalVariable { .. } => *initializer,
            _ => return None,
        };
        let NodeKind::LocalVariable {
            name,
            ty,
            initializer: Some(start),
            symbol,
            ..
        } = tree.kind(variable)
        else {
            return None;
        };
        let NodeKind::TypeElement { ty: variable_type } = tree.kind(*ty) else {
            return None;
        };
        let long = match cx.context.types.primitive_of(variable_type)? {
            PrimitiveType::Int => false,
            PrimitiveType::Long => true,
            _ => return None,
        };
        let symbol = *symbol;
        if !symbol.is_some() {
            return None;
        }

        let NodeKind::Binary { left, op, right } = tree.kind(*condition) else {
            return None;
        };
        if !op.is_comparison() {
            return None;
        }
        let (op, bound) = if is_reference_to(tree, *left, symbol) {
            (*op, *right)
        } else if is_reference_to(tree, *right, symbol) {
            (op.flipped(), *left)
        } else {
            return None;
        };

        let step = update_step(tree, *update, symbol)?;
        let ascending = matches!(op, BinaryOp::Lt | BinaryOp::Le);
        if ascending != (step > 0) {
            return None;
        }
        if writes(tree, *body, symbol) || !Self::is_invariant(cx, bound, *body, symbol) {
            return None;
        }

        Some(CountedLoop {
            initializer: *initializer,
            variable,
            name: *name,
            ty: *ty,
            symbol,
            start: *start,
            condition: *condition,
            bound,
            op,
            step,
            update: *update,
            long,
            body: *body,
        })
    }

    /// Whether `id` evaluates the same on every iteration of `body`.
    fn is_invariant(cx: &ConversionCx<'_>, id: NodeId, body: NodeId, variable: SymbolId) -> bool {
        let tree = &*cx.tree;
        match tree.kind(id) {
            NodeKind::Literal { .. } | NodeKind::This { qualifier: None } => true,
            NodeKind::FieldAccess { symbol, .. } => {
                symbol.is_some() && *symbol != variable && !writes(tree, body, *symbol)
            }
            NodeKind::Parenthesized { expression }
            | NodeKind::Prefix {
                op: PrefixOp::Minus | PrefixOp::Plus,
                operand: expression,
            } => Self::is_invariant(cx, *expression, body, variable),
            NodeKind::Binary {
                left,
                op:
                    BinaryOp::Add
                    | BinaryOp::Sub
                    | BinaryOp::Mul
                    | BinaryOp::Div
                    | BinaryOp::Rem
                    | BinaryOp::Shl
                    | BinaryOp::Shr
                    | BinaryOp::UShr,
                right,
            } => {
                Self::is_invariant(cx, *left, body, variable)
                    && Self::is_invariant(cx, *right, body, variable)
            }
            NodeKind::Qualified { receiver, selector } => {
                if !Self::is_invariant(cx, *receiver, body, variable) {
                    return false;
                }
                match tree.kind(*selector) {
                    NodeKind::FieldAccess { symbol, .. } => {
                        symbol.is_some() && !writes(tree, body, *symbol)
                    }
                    NodeKind::Call {
                        name, arguments, ..
                    } => {
                        matches!(cx.lookup(*name), "length" | "size")
                            && tree.list(*arguments).is_empty()
                            && !Self::is_mutated(cx, *receiver, body)
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Whether `body` calls anything but a read-only method on the object
    /// `receiver` names.
    fn is_mutated(cx: &ConversionCx<'_>, receiver: NodeId, body: NodeId) -> bool {
        let tree = &*cx.tree;
        let NodeKind::FieldAccess { symbol, .. } = tree.kind(receiver) else {
            return true;
        };
        tree.descendants(body).into_iter().any(|id| {
            let NodeKind::Qualified {
                receiver: call_receiver,
                selector,
            } = tree.kind(id)
            else {
                return false;
            };
            let NodeKind::Call { name, .. } = tree.kind(*selector) else {
                return false;
            };
            is_reference_to(tree, *call_receiver, *symbol)
                && !READ_ONLY_CALLS.contains(&cx.lookup(*name))
        })
    }

    fn for_in(cx: &mut ConversionCx<'_>, id: NodeId, counted: CountedLoop) -> NodeId {
        let CountedLoop {
            initializer,
            variable,
            name,
            ty,
            symbol,
            start,
            condition,
            bound,
            op,
            step,
            update,
            long,
            body,
        } = counted;
        let ty = cx.tree.detach(variable, ty);
        let start = cx.tree.detach(variable, start);
        let bound = cx.tree.detach(condition, bound);
        let body = cx.tree.detach(id, body);

        let annotations = build::annotation_list(cx.tree, Vec::new());
        let parameter = cx.tree.alloc(NodeKind::Parameter {
            name,
            modifiers: Modifiers::default(),
            annotations,
            ty,
            default: None,
            vararg: false,
            symbol,
        });
        cx.symbols.transfer(variable, parameter);
        cx.tree.transfer_trivia(variable, parameter);
        cx.tree.transfer_trivia(initializer, parameter);

        let (kind, end) = match op {
            BinaryOp::Lt => (RangeKind::Until, bound),
            BinaryOp::Le => (RangeKind::Inclusive, bound),
            BinaryOp::Gt => (RangeKind::DownTo, Self::one_past(cx, bound, long)),
            _ => (RangeKind::DownTo, bound),
        };
        let magnitude = step.unsigned_abs();
        let step = (magnitude != 1).then(|| integer_literal(cx.tree, magnitude.to_string(), long));
        let range = cx.tree.alloc(NodeKind::Range {
            start,
            kind,
            end,
            step,
        });
        gather_trivia(cx.tree, update, range);
        gather_trivia(cx.tree, condition, range);

        tracing::debug!(range = kind.token(), step = magnitude, "counted loop converted");
        cx.tree.alloc(NodeKind::ForIn {
            variable: parameter,
            iterable: range,
            body,
        })
    }

    /// `bound + 1` for a detached bound, folded when it is a literal.
    fn one_past(cx: &mut ConversionCx<'_>, bound: NodeId, long: bool) -> NodeId {
        if let Some(next) = decimal_value(cx.tree, bound).and_then(|v| v.checked_add(1)) {
            let literal = integer_literal(cx.tree, next.to_string(), long);
            cx.tree.transfer_trivia(bound, literal);
            cx.tree.invalidate(bound);
            return literal;
        }
        let one = integer_literal(cx.tree, "1".to_owned(), long);
        build::binary(cx.tree, bound, BinaryOp::Add, one)
    }

    /// Rewrite the `for` at `id` as a `while`. Returns the hoisted
    /// initializer statements and the loop.
    fn while_loop(cx: &mut ConversionCx<'_>, id: NodeId, label: Option<Name>) -> (Vec<NodeId>, NodeId) {
        let NodeKind::For {
            initializers,
            condition,
            updates,
            body,
        } = cx.tree.kind(id).clone()
        else {
            return (Vec::new(), id);
        };

        let hoisted: Vec<NodeId> = initializers
            .into_iter()
            .map(|initializer| {
                cx.tree.detach(id, initializer);
                as_statement(cx.tree, initializer)
            })
            .collect();
        let condition = match condition {
            Some(condition) => cx.tree.detach(id, condition),
            None => build::literal(cx.tree, LiteralKind::Boolean, "true"),
        };
        let updates: Vec<NodeId> = updates
            .into_iter()
            .map(|update| {
                cx.tree.detach(id, update);
                as_statement(cx.tree, update)
            })
            .collect();
        cx.tree.detach(id, body);
        let body = if matches!(cx.tree.kind(body), NodeKind::Block { .. }) {
            body
        } else {
            build::block(cx.tree, vec![body])
        };

        if !updates.is_empty() {
            let mut targets = Vec::new();
            continues(cx.tree, body, label, false, &mut targets);
            for target in targets {
                inject_before(cx.tree, target, &updates);
            }
            let ends_in_jump = cx
                .tree
                .list(body)
                .last()
                .is_some_and(|&last| is_jump(cx.tree.kind(last)));
            for update in updates {
                if ends_in_jump {
                    cx.tree.invalidate(update);
                } else {
                    cx.tree.push_child(body, update);
                }
            }
        }

        tracing::warn!(loop_node = ?id, "for loop is not a counted loop, converted to while");
        cx.note(NoteCode::J1001, "for loop converted to a while loop", id);
        let while_loop = cx.tree.alloc(NodeKind::While { condition, body });
        (hoisted, while_loop)
    }

    /// Convert the `for` at `id`. Returns statements to run before the
    /// loop and the loop itself.
    fn convert(cx: &mut ConversionCx<'_>, id: NodeId, label: Option<Name>) -> (Vec<NodeId>, NodeId) {
        let (hoisted, converted) = match Self::counted_loop(cx, id) {
            Some(counted) => (Vec::new(), Self::for_in(cx, id, counted)),
            None => Self::while_loop(cx, id, label),
        };
        cx.replaced(id, converted);
        (hoisted, converted)
    }
}

impl RecursiveConversion for ForConversion {
    fn name(&self) -> &'static str {
        "for-conversion"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let converted = match *cx.tree.kind(id) {
            NodeKind::For { .. } => {
                let (mut statements, converted) = Self::convert(cx, id, None);
                if statements.is_empty() {
                    converted
                } else {
                    statements.push(converted);
                    build::block(cx.tree, statements)
                }
            }
            NodeKind::Labeled { label, statement }
                if matches!(cx.tree.kind(statement), NodeKind::For { .. }) =>
            {
                let (mut statements, converted) = Self::convert(cx, statement, Some(label));
                cx.tree.replace_child(id, statement, converted);
                if statements.is_empty() {
                    id
                } else {
                    cx.tree.unlink(id);
                    statements.push(id);
                    build::block(cx.tree, statements)
                }
            }
            _ => id,
        };
        self.recurse(cx, converted)
    }
}

/// Constant step of `update` on `variable`: `i++`, `i -= 2`, `i = i + 3`.
fn update_step(tree: &Tree, update: NodeId, variable: SymbolId) -> Option<i64> {
    let update = match tree.kind(update) {
        NodeKind::ExpressionStatement { expression } => *expression,
        _ => update,
    };
    let positive = |id: NodeId| decimal_value(tree, id).filter(|v| *v > 0);
    let is_variable = |id: NodeId| is_reference_to(tree, id, variable);
    match tree.kind(update) {
        NodeKind::Prefix {
            op: PrefixOp::Inc,
            operand,
        }
        | NodeKind::Postfix {
            op: PostfixOp::Inc,
            operand,
        } if is_variable(*operand) => Some(1),
        NodeKind::Prefix {
            op: PrefixOp::Dec,
            operand,
        }
        | NodeKind::Postfix {
            op: PostfixOp::Dec,
            operand,
        } if is_variable(*operand) => Some(-1),
        NodeKind::Assignment {
            target,
            op: AssignOp::Add,
            value,
        } if is_variable(*target) => positive(*value),
        NodeKind::Assignment {
            target,
            op: AssignOp::Sub,
            value,
        } if is_variable(*target) => positive(*value).map(|v| -v),
        NodeKind::Assignment {
            target,
            op: AssignOp::Assign,
            value,
        } if is_variable(*target) => match tree.kind(*value) {
            NodeKind::Binary {
                left,
                op: BinaryOp::Add,
                right,
            } if is_variable(*left) => positive(*right),
            NodeKind::Binary {
                left,
                op: BinaryOp::Add,
                right,
            } if is_variable(*right) => positive(*left),
            NodeKind::Binary {
                left,
                op: BinaryOp::Sub,
                right,
            } if is_variable(*left) => positive(*right).map(|v| -v),
            _ => None,
        },
        _ => None,
    }
}

fn integer_literal(tree: &mut Tree, digits: String, long: bool) -> NodeId {
    if long {
        build::literal(tree, LiteralKind::Long, format!("{digits}L"))
    } else {
        build::literal(tree, LiteralKind::Int, digits)
    }
}

fn as_statement(tree: &mut Tree, id: NodeId) -> NodeId {
    match tree.kind(id) {
        NodeKind::LocalVariable { .. } => tree.alloc(NodeKind::DeclarationStatement {
            declarations: vec![id],
        }),
        kind if kind.is_expression() => build::expression_statement(tree, id),
        _ => id,
    }
}

/// `continue` statements below `id` that resume the loop being converted:
/// unlabeled ones outside nested loops, and those naming its label.
fn continues(tree: &Tree, id: NodeId, label: Option<Name>, nested: bool, out: &mut Vec<NodeId>) {
    ensure_sufficient_stack(|| {
        for child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::Continue { label: None } if !nested => out.push(child),
                NodeKind::Continue {
                    label: Some(target),
                } if Some(*target) == label => out.push(child),
                NodeKind::For { .. }
                | NodeKind::ForIn { .. }
                | NodeKind::While { .. }
                | NodeKind::DoWhile { .. } => continues(tree, child, label, true, out),
                NodeKind::Lambda { .. } | NodeKind::Class { .. } | NodeKind::ClassBody { .. } => {}
                _ => continues(tree, child, label, nested, out),
            }
        }
    });
}

/// Put copies of `updates` right before `target`.
fn inject_before(tree: &mut Tree, target: NodeId, updates: &[NodeId]) {
    let Some(parent) = tree.parent(target) else {
        return;
    };
    let copies: Vec<NodeId> = updates.iter().map(|&u| tree.copy_and_detach(u)).collect();
    let position = match tree.kind(parent) {
        NodeKind::Block { statements } => statements.iter().position(|&s| s == target),
        _ => None,
    };
    match position {
        Some(index) => {
            for (offset, copy) in copies.into_iter().enumerate() {
                tree.insert_child(parent, index + offset, copy);
            }
        }
        None => {
            tree.detach(parent, target);
            let mut statements = copies;
            statements.push(target);
            let block = build::block(tree, statements);
            tree.replace_child(parent, target, block);
        }
    }
}

#[cfg(test)]
mod tests;
