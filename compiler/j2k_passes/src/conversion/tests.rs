#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use j2k_ir::{build, BinaryOp, Comment, LiteralKind, NodeId, NodeKind};

use super::*;
use crate::testing::Fixture;

/// Wraps every literal in parentheses, reusing the literal.
struct WrapLiterals;

impl RecursiveConversion for WrapLiterals {
    fn name(&self) -> &'static str {
        "wrap-literals"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        if matches!(cx.tree.kind(id), NodeKind::Literal { .. }) {
            let literal = cx.tree.unlink(id);
            let wrapped = build::parenthesized(cx.tree, literal);
            cx.replaced(id, wrapped);
            return wrapped;
        }
        self.recurse(cx, id)
    }
}

/// Replaces every `Int` literal with a fresh `0`.
struct ZeroLiterals;

impl RecursiveConversion for ZeroLiterals {
    fn name(&self) -> &'static str {
        "zero-literals"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        if matches!(
            cx.tree.kind(id),
            NodeKind::Literal {
                kind: LiteralKind::Int,
                ..
            }
        ) {
            let zero = build::int_literal(cx.tree, 0);
            cx.replaced(id, zero);
            return zero;
        }
        self.recurse(cx, id)
    }
}

/// Records how many parentheses enclose each literal.
struct ParenthesisDepth {
    seen: Vec<usize>,
}

impl RecursiveConversionWithData for ParenthesisDepth {
    type Data = usize;

    fn name(&self) -> &'static str {
        "parenthesis-depth"
    }

    fn initial_data(&self) -> usize {
        0
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId, depth: &usize) -> NodeId {
        match cx.tree.kind(id) {
            NodeKind::Literal { .. } => {
                self.seen.push(*depth);
                id
            }
            NodeKind::Parenthesized { .. } => self.recurse_with_data(cx, id, &(depth + 1)),
            _ => self.recurse_with_data(cx, id, depth),
        }
    }
}

#[test]
fn wrapping_reuses_the_visited_node() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let two = f.int(2);
    let sum = build::binary(&mut f.tree, one, BinaryOp::Add, two);

    let root = f.run(&mut WrapLiterals, sum);

    assert_eq!(root, sum);
    assert!(f.tree.is_alive(one) && f.tree.is_alive(two));
    assert_eq!(
        f.dump(sum),
        "Binary +\n  Parenthesized\n    Literal Int 1\n  Parenthesized\n    Literal Int 2\n"
    );
    assert_eq!(f.changes, 2);
    f.tree.validate(sum).unwrap();
}

#[test]
fn replaced_nodes_are_invalidated() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let statement = f.statement(one);
    let block = f.block(vec![statement]);

    f.run(&mut ZeroLiterals, block);

    assert!(!f.tree.is_alive(one));
    assert!(f.tree.try_kind(one).is_err());
    assert_eq!(f.dump(block), "Block\n  ExpressionStatement\n    Literal Int 0\n");
}

#[test]
fn replacing_the_root_returns_the_replacement() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let root = f.run(&mut WrapLiterals, one);
    assert_ne!(root, one);
    assert_eq!(f.dump(root), "Parenthesized\n  Literal Int 1\n");
}

#[test]
fn data_follows_the_recursion() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let inner = build::parenthesized(&mut f.tree, one);
    let outer = build::parenthesized(&mut f.tree, inner);
    let two = f.int(2);
    let sum = build::binary(&mut f.tree, outer, BinaryOp::Add, two);

    let mut pass = WithData(ParenthesisDepth { seen: Vec::new() });
    assert_eq!(Conversion::name(&pass), "parenthesis-depth");
    f.run(&mut pass, sum);
    assert_eq!(pass.0.seen, vec![2, 0]);
}

#[test]
fn replacement_inherits_origin() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let origin = j2k_ir::Origin::keyed(j2k_ir::Span::new(3, 4), j2k_ir::OriginKey(9));
    f.tree.set_origin(one, Some(origin));
    let statement = f.statement(one);
    f.run(&mut ZeroLiterals, statement);
    let zero = f.tree.children(statement)[0];
    assert_eq!(f.tree.origin(zero), Some(origin));
}

proptest! {
    #[test]
    fn leading_comments_survive_a_wrap(count in 0usize..8) {
        let mut f = Fixture::new();
        let one = f.int(1);
        let two = f.int(2);
        for i in 0..count {
            f.tree
                .trivia_mut(one)
                .comments_before
                .push(Comment::line(format!("// c{i}")));
        }
        let sum = build::binary(&mut f.tree, one, BinaryOp::Add, two);

        f.run(&mut WrapLiterals, sum);

        let expected: Vec<String> = (0..count).map(|i| format!("// c{i}")).collect();
        prop_assert_eq!(f.comments(sum), expected);
        prop_assert!(f.tree.validate(sum).is_ok());
    }
}
