//! Tree queries shared by several passes.

use j2k_ir::{build, NodeId, NodeKind, PostfixOp, PrefixOp, SymbolId, Tree};

/// Whether `id` names `symbol`, bare or as `this.name`.
pub(crate) fn is_reference_to(tree: &Tree, id: NodeId, symbol: SymbolId) -> bool {
    if !symbol.is_some() {
        return false;
    }
    match tree.kind(id) {
        NodeKind::FieldAccess { symbol: s, .. } => *s == symbol,
        NodeKind::Qualified { receiver, selector } => {
            matches!(tree.kind(*receiver), NodeKind::This { qualifier: None })
                && is_reference_to(tree, *selector, symbol)
        }
        NodeKind::Parenthesized { expression } => is_reference_to(tree, *expression, symbol),
        _ => false,
    }
}

/// Whether anything below `root` assigns, increments or decrements `symbol`.
pub(crate) fn writes(tree: &Tree, root: NodeId, symbol: SymbolId) -> bool {
    tree.descendants(root).into_iter().any(|id| match tree.kind(id) {
        NodeKind::Assignment { target, .. } => is_reference_to(tree, *target, symbol),
        NodeKind::Prefix {
            op: PrefixOp::Inc | PrefixOp::Dec,
            operand,
        }
        | NodeKind::Postfix {
            op: PostfixOp::Inc | PostfixOp::Dec,
            operand,
        } => is_reference_to(tree, *operand, symbol),
        _ => false,
    })
}

/// Whether any reference below `root` is bound to `symbol`.
pub(crate) fn mentions(tree: &Tree, root: NodeId, symbol: SymbolId) -> bool {
    symbol.is_some()
        && tree.descendants(root).into_iter().any(|id| {
            matches!(
                tree.kind(id),
                NodeKind::FieldAccess { .. } | NodeKind::Call { .. } | NodeKind::MethodReference { .. }
            ) && tree.kind(id).symbol() == Some(symbol)
        })
}

/// Expressions that never need parentheses as an operand or receiver.
pub(crate) fn is_atom(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Literal { .. }
            | NodeKind::FieldAccess { .. }
            | NodeKind::Call { .. }
            | NodeKind::Qualified { .. }
            | NodeKind::Parenthesized { .. }
            | NodeKind::ArrayAccess { .. }
            | NodeKind::New { .. }
            | NodeKind::NewArray { .. }
            | NodeKind::This { .. }
            | NodeKind::Super { .. }
            | NodeKind::ClassLiteral { .. }
            | NodeKind::MethodReference { .. }
            | NodeKind::Postfix { .. }
            | NodeKind::StubExpression
            | NodeKind::Todo { .. }
    )
}

/// Wrap a detached expression in parentheses unless it is an atom.
pub(crate) fn parenthesize_if_needed(tree: &mut Tree, expression: NodeId) -> NodeId {
    let literal_is_negative = matches!(
        tree.kind(expression),
        NodeKind::Literal { text, .. } if text.starts_with('-')
    );
    if is_atom(tree.kind(expression)) && !literal_is_negative {
        expression
    } else {
        build::parenthesized(tree, expression)
    }
}

/// Class declaring `member`.
pub(crate) fn container_class(tree: &Tree, member: NodeId) -> Option<NodeId> {
    let body = tree.parent(member)?;
    if !matches!(tree.kind(body), NodeKind::ClassBody { .. }) {
        return None;
    }
    let class = tree.parent(body)?;
    matches!(tree.kind(class), NodeKind::Class { .. }).then_some(class)
}

/// Statements after which control never reaches the next statement.
pub(crate) fn is_jump(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Return { .. }
            | NodeKind::Break { .. }
            | NodeKind::Continue { .. }
            | NodeKind::Throw { .. }
            | NodeKind::Yield { .. }
    )
}

/// Nodes below `root` in the same body, pre-order: lambdas, anonymous
/// class bodies and nested classes are not entered.
pub(crate) fn scope_descendants(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        out.push(id);
        let opens_scope = id != root
            && matches!(
                tree.kind(id),
                NodeKind::Lambda { .. } | NodeKind::Class { .. } | NodeKind::ClassBody { .. }
            );
        if !opens_scope {
            stack.extend(tree.children(id).into_iter().rev());
        }
    }
    out
}

/// Last segment of a dotted name.
pub(crate) fn short_name(fq_name: &str) -> &str {
    fq_name.rsplit('.').next().unwrap_or(fq_name)
}

/// Value of a decimal integer literal (`12`, `-3`, `1_000L`).
pub(crate) fn decimal_value(tree: &Tree, id: NodeId) -> Option<i64> {
    let NodeKind::Literal { text, .. } = tree.kind(id) else {
        return None;
    };
    let digits: String = text
        .trim_end_matches(['l', 'L'])
        .chars()
        .filter(|c| *c != '_')
        .collect();
    let unsigned = digits.strip_prefix('-').unwrap_or(&digits);
    if unsigned.is_empty()
        || (unsigned.len() > 1 && unsigned.starts_with('0'))
        || !unsigned.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}
