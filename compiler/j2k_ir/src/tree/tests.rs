#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::build;
use crate::dump::dump;
use crate::{BinaryOp, Comment, LiteralKind, Span, StringInterner};

fn one_plus_two(tree: &mut Tree) -> (NodeId, NodeId, NodeId) {
    let one = build::int_literal(tree, 1);
    let two = build::int_literal(tree, 2);
    let sum = build::binary(tree, one, BinaryOp::Add, two);
    (sum, one, two)
}

// Construction

#[test]
fn alloc_adopts_children() {
    let mut tree = Tree::new();
    let (sum, one, two) = one_plus_two(&mut tree);
    assert_eq!(tree.parent(one), Some(sum));
    assert_eq!(tree.parent(two), Some(sum));
    assert_eq!(tree.parent(sum), None);
    assert_eq!(tree.children(sum).as_slice(), &[one, two]);
    assert_eq!(tree.len(), 3);
}

#[test]
fn alloc_rejects_attached_child() {
    let mut tree = Tree::new();
    let (sum, one, _) = one_plus_two(&mut tree);
    let err = tree
        .try_alloc(NodeKind::Parenthesized { expression: one })
        .unwrap_err();
    assert_eq!(
        err,
        TreeError::AlreadyAttached {
            child: one,
            parent: sum
        }
    );
}

#[test]
fn alloc_rejects_same_child_twice() {
    let mut tree = Tree::new();
    let one = build::int_literal(&mut tree, 1);
    let err = tree
        .try_alloc(NodeKind::Binary {
            left: one,
            op: BinaryOp::Add,
            right: one,
        })
        .unwrap_err();
    assert_eq!(err, TreeError::Shared { child: one });
}

// Detach / attach

#[test]
fn detach_checks_parent() {
    let mut tree = Tree::new();
    let (sum, one, _) = one_plus_two(&mut tree);
    let other = build::int_literal(&mut tree, 3);
    let err = tree.try_detach(other, one).unwrap_err();
    assert_eq!(
        err,
        TreeError::ParentMismatch {
            child: one,
            expected: other,
            actual: Some(sum)
        }
    );
    assert_eq!(tree.detach(sum, one), one);
    assert_eq!(tree.parent(one), None);
}

#[test]
fn detached_child_is_not_enumerated() {
    let mut tree = Tree::new();
    let (sum, one, two) = one_plus_two(&mut tree);
    tree.detach(sum, one);
    assert_eq!(tree.children(sum).as_slice(), &[two]);
}

#[test]
fn detached_node_can_move_to_a_new_parent() {
    let mut tree = Tree::new();
    let (sum, one, _) = one_plus_two(&mut tree);
    tree.detach(sum, one);
    let paren = build::parenthesized(&mut tree, one);
    assert_eq!(tree.parent(one), Some(paren));
}

#[test]
fn attach_requires_a_slot() {
    let mut tree = Tree::new();
    let value = build::int_literal(&mut tree, 7);
    let stray = build::int_literal(&mut tree, 8);
    let ret = tree.alloc(NodeKind::Return {
        value: None,
        label: None,
    });
    assert_eq!(
        tree.try_attach(ret, stray).unwrap_err(),
        TreeError::NotAChild {
            parent: ret,
            child: stray
        }
    );
    if let NodeKind::Return { value: slot, .. } = tree.kind_mut(ret) {
        *slot = Some(value);
    }
    tree.attach(ret, value);
    assert_eq!(tree.children(ret).as_slice(), &[value]);
}

// Replacement and invalidation

#[test]
fn replace_child_invalidates_attached_old() {
    let mut tree = Tree::new();
    let (sum, one, two) = one_plus_two(&mut tree);
    let three = build::int_literal(&mut tree, 3);
    tree.replace_child(sum, one, three);
    assert!(!tree.is_alive(one));
    assert_eq!(tree.try_kind(one).unwrap_err(), TreeError::Stale(one));
    assert_eq!(tree.children(sum).as_slice(), &[three, two]);
}

#[test]
fn replace_child_keeps_detached_old() {
    let mut tree = Tree::new();
    let (sum, one, _) = one_plus_two(&mut tree);
    tree.detach(sum, one);
    let wrapped = build::parenthesized(&mut tree, one);
    tree.replace_child(sum, one, wrapped);
    assert!(tree.is_alive(one));
    assert_eq!(tree.parent(one), Some(wrapped));
    assert_eq!(tree.parent(wrapped), Some(sum));
}

#[test]
fn invalidate_frees_attached_descendants_only() {
    let mut tree = Tree::new();
    let (sum, one, two) = one_plus_two(&mut tree);
    tree.detach(sum, two);
    tree.invalidate(sum);
    assert!(!tree.is_alive(sum));
    assert!(!tree.is_alive(one));
    assert!(tree.is_alive(two));
    assert_eq!(tree.len(), 1);
}

#[test]
fn stale_id_never_aliases_reused_slot() {
    let mut tree = Tree::new();
    let first = build::int_literal(&mut tree, 1);
    tree.invalidate(first);
    let second = build::int_literal(&mut tree, 2);
    assert_eq!(first.index(), second.index());
    assert_ne!(first, second);
    assert!(tree.try_kind(first).is_err());
    assert!(matches!(
        tree.kind(second),
        NodeKind::Literal { text, .. } if text == "2"
    ));
}

#[test]
#[should_panic(expected = "tree invariant violated")]
fn plain_accessor_panics_on_stale_id() {
    let mut tree = Tree::new();
    let node = build::int_literal(&mut tree, 1);
    tree.invalidate(node);
    let _ = tree.kind(node);
}

// List operations

#[test]
fn list_operations() {
    let mut tree = Tree::new();
    let block = build::block(&mut tree, Vec::new());
    let a = tree.alloc(NodeKind::Empty);
    let b = tree.alloc(NodeKind::Empty);
    let c = tree.alloc(NodeKind::Empty);
    tree.push_child(block, a);
    tree.push_child(block, c);
    tree.insert_child(block, 1, b);
    assert_eq!(tree.list(block), vec![a, b, c]);

    assert_eq!(tree.remove_child(block, b), b);
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.list(block), vec![a, c]);

    let taken = tree.take_children(block);
    assert_eq!(taken, vec![a, c]);
    assert!(tree.list(block).is_empty());
    assert!(taken.iter().all(|&id| tree.parent(id).is_none()));
}

#[test]
fn list_operations_reject_fixed_slot_nodes() {
    let mut tree = Tree::new();
    let (sum, _, _) = one_plus_two(&mut tree);
    let extra = tree.alloc(NodeKind::Empty);
    assert!(matches!(
        tree.try_insert_child(sum, 0, extra),
        Err(TreeError::NotAList { tag: "Binary", .. })
    ));
}

#[test]
fn insert_out_of_bounds() {
    let mut tree = Tree::new();
    let block = build::block(&mut tree, Vec::new());
    let stmt = tree.alloc(NodeKind::Empty);
    assert_eq!(
        tree.try_insert_child(block, 2, stmt).unwrap_err(),
        TreeError::IndexOutOfBounds {
            parent: block,
            index: 2,
            len: 0
        }
    );
}

// Copy

#[test]
fn copy_is_structural_and_unparented() {
    let interner = StringInterner::new();
    let mut tree = Tree::new();
    let (sum, one, _) = one_plus_two(&mut tree);
    tree.trivia_mut(one)
        .comments_before
        .push(Comment::line("// first"));
    tree.set_origin(one, Some(crate::Origin::new(Span::new(4, 5), None)));
    let outer = build::parenthesized(&mut tree, sum);

    let copy = tree.copy_and_detach(sum);
    assert_eq!(tree.parent(copy), None);
    assert_eq!(dump(&tree, &interner, copy), dump(&tree, &interner, sum));

    let copied_one = tree.children(copy)[0];
    assert_ne!(copied_one, one);
    assert_eq!(tree.trivia(copied_one), tree.trivia(one));
    assert_eq!(tree.origin(copied_one), tree.origin(one));
    assert_eq!(tree.parent(sum), Some(outer));
}

// Trivia

#[test]
fn transfer_trivia_moves_comments_outside() {
    let mut tree = Tree::new();
    let old = build::literal(&mut tree, LiteralKind::Int, "1");
    let new = build::literal(&mut tree, LiteralKind::Int, "1");
    tree.trivia_mut(old)
        .comments_before
        .extend([Comment::line("// a"), Comment::line("// b")]);
    tree.trivia_mut(new)
        .comments_before
        .push(Comment::line("// c"));
    tree.transfer_trivia(old, new);
    let texts: Vec<&str> = tree
        .trivia(new)
        .comments_before
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(texts, vec!["// a", "// b", "// c"]);
    assert!(tree.trivia(old).is_empty());
}

// Validation

#[test]
fn validate_accepts_consistent_tree() {
    let mut tree = Tree::new();
    let (sum, _, _) = one_plus_two(&mut tree);
    assert_eq!(tree.validate(sum), Ok(()));
}

#[test]
fn validate_reports_dangling_slot() {
    let mut tree = Tree::new();
    let (sum, one, _) = one_plus_two(&mut tree);
    tree.detach(sum, one);
    assert_eq!(
        tree.validate(sum),
        Err(TreeError::ParentMismatch {
            child: one,
            expected: sum,
            actual: None
        })
    );
}

#[test]
fn descendants_are_pre_order() {
    let mut tree = Tree::new();
    let (sum, one, two) = one_plus_two(&mut tree);
    let stmt = build::expression_statement(&mut tree, sum);
    assert_eq!(tree.descendants(stmt), vec![stmt, sum, one, two]);
    assert!(tree.is_ancestor(stmt, two));
    assert!(!tree.is_ancestor(two, stmt));
}
