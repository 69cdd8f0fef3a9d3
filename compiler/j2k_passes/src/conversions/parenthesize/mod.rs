//! Drop parentheses that hold a single atom: `(a)`, `(f())`, `((x))`.
//!
//! A negative literal keeps its parentheses; `(-1).inc()` would otherwise
//! read as `-(1.inc())`.

use j2k_ir::{NodeId, NodeKind};

use super::util::is_atom;
use crate::{ConversionCx, RecursiveConversion};

pub struct ParenthesizeConversion;

fn removable(cx: &ConversionCx<'_>, id: NodeId) -> Option<NodeId> {
    let NodeKind::Parenthesized { expression } = *cx.tree.kind(id) else {
        return None;
    };
    let inner = cx.tree.kind(expression);
    let negative = matches!(inner, NodeKind::Literal { text, .. } if text.starts_with('-'));
    (is_atom(inner) && !negative).then_some(expression)
}

impl RecursiveConversion for ParenthesizeConversion {
    fn name(&self) -> &'static str {
        "parenthesize"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(expression) = removable(cx, current) {
            cx.tree.detach(current, expression);
            cx.replaced(current, expression);
            cx.tree.unlink(current);
            cx.tree.invalidate(current);
            current = expression;
        }
        self.recurse(cx, current)
    }
}
