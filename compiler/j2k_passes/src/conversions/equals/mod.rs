//! `a.equals(b)` to `a == b`, and `!a.equals(b)` to `a != b`.
//!
//! `super.equals(..)` stays a call: `==` would dispatch to this class's own
//! `equals`.

use j2k_ir::{build, BinaryOp, NodeId, NodeKind, PrefixOp};

use super::util::parenthesize_if_needed;
use crate::{ConversionCx, RecursiveConversion};

pub struct EqualsOperatorConversion;

/// The receiver, call and argument of an `equals` call with one argument.
struct EqualsCall {
    qualified: NodeId,
    receiver: NodeId,
    arguments: NodeId,
}

impl EqualsOperatorConversion {
    fn equals_call(cx: &ConversionCx<'_>, id: NodeId) -> Option<EqualsCall> {
        let NodeKind::Qualified { receiver, selector } = *cx.tree.kind(id) else {
            return None;
        };
        if matches!(cx.tree.kind(receiver), NodeKind::Super { .. }) {
            return None;
        }
        let NodeKind::Call {
            name, arguments, ..
        } = *cx.tree.kind(selector)
        else {
            return None;
        };
        (cx.lookup(name) == "equals" && cx.tree.list(arguments).len() == 1).then_some(EqualsCall {
            qualified: id,
            receiver,
            arguments,
        })
    }

    /// Build `receiver op argument` from the call's detached parts. Operands
    /// are converted first so an operand that becomes a comparison itself
    /// gets its parentheses.
    fn comparison(cx: &mut ConversionCx<'_>, call: &EqualsCall, op: BinaryOp) -> Option<NodeId> {
        let argument = cx.tree.take_children(call.arguments).into_iter().next()?;
        let argument = Self::convert(cx, argument).unwrap_or(argument);
        let receiver = cx.tree.detach(call.qualified, call.receiver);
        let receiver = Self::convert(cx, receiver).unwrap_or(receiver);
        let left = parenthesize_if_needed(cx.tree, receiver);
        let right = parenthesize_if_needed(cx.tree, argument);
        Some(build::binary(cx.tree, left, op, right))
    }

    fn convert(cx: &mut ConversionCx<'_>, id: NodeId) -> Option<NodeId> {
        let (call, op) = match *cx.tree.kind(id) {
            NodeKind::Prefix {
                op: PrefixOp::Not,
                operand,
            } => (Self::equals_call(cx, operand)?, BinaryOp::Ne),
            NodeKind::Qualified { .. } => (Self::equals_call(cx, id)?, BinaryOp::Eq),
            _ => return None,
        };
        let comparison = Self::comparison(cx, &call, op)?;
        if call.qualified != id {
            cx.tree.transfer_trivia(call.qualified, comparison);
        }
        cx.replaced(id, comparison);
        cx.tree.unlink(id);
        cx.tree.invalidate(id);
        tracing::trace!(node = ?comparison, op = op.token(), "equals call replaced");
        Some(comparison)
    }
}

impl RecursiveConversion for EqualsOperatorConversion {
    fn name(&self) -> &'static str {
        "equals-operator"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let converted = Self::convert(cx, id).unwrap_or(id);
        self.recurse(cx, converted)
    }
}
