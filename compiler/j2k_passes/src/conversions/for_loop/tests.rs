#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use j2k_diagnostic::NoteCode;
use j2k_ir::{
    build, AssignOp, BinaryOp, JkType, LiteralKind, NodeId, NodeKind, PostfixOp, PrefixOp,
    PrimitiveType, RangeKind, SymbolId,
};
use j2k_types::SymbolKind;

use super::ForConversion;
use crate::testing::Fixture;

fn int() -> JkType {
    JkType::Primitive(PrimitiveType::Int)
}

fn postfix(f: &mut Fixture, op: PostfixOp, operand: NodeId) -> NodeId {
    f.tree.alloc(NodeKind::Postfix { op, operand })
}

fn assign(f: &mut Fixture, target: NodeId, op: AssignOp, value: NodeId) -> NodeId {
    f.tree.alloc(NodeKind::Assignment { target, op, value })
}

/// `for (<ty> <name> = <start>; <condition>; <update>) { <body> }`. The closure
/// gets the loop variable's symbol and returns the condition, update and body.
fn for_loop(
    f: &mut Fixture,
    name: &str,
    ty: JkType,
    start: NodeId,
    parts: impl FnOnce(&mut Fixture, SymbolId) -> (NodeId, NodeId, Vec<NodeId>),
) -> (NodeId, SymbolId) {
    let (variable, i) = f.local(name, ty, Some(start));
    let declaration = f.declaration(variable);
    let (condition, update, body) = parts(f, i);
    let body = f.block(body);
    let update = f.statement(update);
    let node = f.tree.alloc(NodeKind::For {
        initializers: vec![declaration],
        condition: Some(condition),
        updates: vec![update],
        body,
    });
    (node, i)
}

/// `for (int i = <start>; i <op> <bound>; i++)` with an empty body.
fn ascending(f: &mut Fixture, start: i64, op: BinaryOp, bound: NodeId) -> NodeId {
    let start = f.int(start);
    for_loop(f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        let condition = build::binary(&mut f.tree, left, op, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);
        (condition, update, Vec::new())
    })
    .0
}

/// Convert `statement` inside a block; returns what took its place.
fn convert(f: &mut Fixture, statement: NodeId) -> NodeId {
    let block = f.block(vec![statement]);
    f.run(&mut ForConversion, block);
    f.tree.list(block)[0]
}

fn list_local(f: &mut Fixture) -> SymbolId {
    let list_type = f.class_type("java.util.List");
    f.local("list", list_type, None).1
}

/// `list.<method>(<args>)`
fn list_call(f: &mut Fixture, list: SymbolId, method: &str, args: Vec<NodeId>) -> NodeId {
    let fq = format!("java.util.List.{method}");
    let symbol = f.library(&fq, SymbolKind::Method, None);
    let receiver = f.reference("list", list);
    let call = f.call(&fq, symbol, args);
    f.qualified(receiver, call)
}

// Counted loops

#[test]
fn less_than_becomes_until() {
    let mut f = Fixture::new();
    let (_, n) = f.local("n", int(), None);
    let start = f.int(0);
    let (node, i) = for_loop(&mut f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        let bound = f.reference("n", n);
        let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);
        let println = f.library("kotlin.io.println", SymbolKind::Method, None);
        let argument = f.reference("i", i);
        let call = f.call("kotlin.io.println", println, vec![argument]);
        let statement = f.statement(call);
        (condition, update, vec![statement])
    });

    let converted = convert(&mut f, node);

    assert_eq!(
        f.dump(converted),
        "ForIn
  Parameter i
    AnnotationList
    TypeElement int
  Range until
    Literal Int 0
    FieldAccess n
  Block
    ExpressionStatement
      Call println
        TypeArgumentList
        ArgumentList
          FieldAccess i
"
    );
    let NodeKind::ForIn { variable, .. } = *f.tree.kind(converted) else {
        panic!("not a for-in loop");
    };
    assert_eq!(f.symbols.decl(i), Some(variable));
    assert!(!f.notes.has_code(NoteCode::J1001));
}

#[test]
fn less_or_equal_becomes_an_inclusive_range() {
    let mut f = Fixture::new();
    let bound = f.int(9);
    let node = ascending(&mut f, 0, BinaryOp::Le, bound);
    let converted = convert(&mut f, node);
    assert!(f.dump(converted).contains("  Range ..\n    Literal Int 0\n    Literal Int 9\n"));
}

#[test]
fn bound_on_the_left_is_flipped() {
    let mut f = Fixture::new();
    let (_, n) = f.local("n", int(), None);
    let start = f.int(0);
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        let bound = f.reference("n", n);
        let right = f.reference("i", i);
        let condition = build::binary(&mut f.tree, bound, BinaryOp::Gt, right);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);
        (condition, update, Vec::new())
    });
    let converted = convert(&mut f, node);
    assert!(f.dump(converted).contains("  Range until\n    Literal Int 0\n    FieldAccess n\n"));
}

#[test]
fn descending_loops_count_down() {
    let mut f = Fixture::new();
    let start = f.int(10);
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        let bound = f.int(0);
        let condition = build::binary(&mut f.tree, left, BinaryOp::Ge, bound);
        let operand = f.reference("i", i);
        let update = f.tree.alloc(NodeKind::Prefix {
            op: PrefixOp::Dec,
            operand,
        });
        (condition, update, Vec::new())
    });
    let converted = convert(&mut f, node);
    assert!(f.dump(converted).contains("  Range downTo\n    Literal Int 10\n    Literal Int 0\n"));
}

#[test]
fn strict_descent_stops_one_past_the_bound() {
    let mut f = Fixture::new();
    let (_, n) = f.local("n", int(), None);
    let literal_start = f.int(10);
    let (literal, _) = for_loop(&mut f, "i", int(), literal_start, |f, i| {
        let left = f.reference("i", i);
        let bound = f.int(-1);
        let condition = build::binary(&mut f.tree, left, BinaryOp::Gt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Dec, operand);
        (condition, update, Vec::new())
    });
    let reference_start = f.int(10);
    let (reference, _) = for_loop(&mut f, "i", int(), reference_start, |f, i| {
        let left = f.reference("i", i);
        let bound = f.reference("n", n);
        let condition = build::binary(&mut f.tree, left, BinaryOp::Gt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Dec, operand);
        (condition, update, Vec::new())
    });

    let folded = convert(&mut f, literal);
    let added = convert(&mut f, reference);

    assert!(f.dump(folded).contains("  Range downTo\n    Literal Int 10\n    Literal Int 0\n"));
    assert!(f.dump(added).contains(
        "  Range downTo\n    Literal Int 10\n    Binary +\n      FieldAccess n\n      Literal Int 1\n"
    ));
}

#[test]
fn constant_steps_are_kept() {
    let mut f = Fixture::new();
    let start = f.literal(LiteralKind::Long, "0L");
    let (node, _) = for_loop(&mut f, "i", JkType::Primitive(PrimitiveType::Long), start, |f, i| {
        let left = f.reference("i", i);
        let bound = f.literal(LiteralKind::Long, "100L");
        let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
        let target = f.reference("i", i);
        let step = f.int(3);
        let update = assign(f, target, AssignOp::Add, step);
        (condition, update, Vec::new())
    });
    let converted = convert(&mut f, node);
    assert!(f.dump(converted).contains(
        "  Range until\n    Literal Long 0L\n    Literal Long 100L\n    Literal Long 3L\n"
    ));
}

#[test]
fn labeled_counted_loops_keep_their_label() {
    let mut f = Fixture::new();
    let bound = f.int(3);
    let node = ascending(&mut f, 0, BinaryOp::Lt, bound);
    let label = f.name("outer");
    let labeled = f.tree.alloc(NodeKind::Labeled {
        label,
        statement: node,
    });
    let converted = convert(&mut f, labeled);
    assert_eq!(converted, labeled);
    assert!(f.dump(converted).starts_with("Labeled outer@\n  ForIn\n"));
}

#[test]
fn read_only_size_bound_is_invariant() {
    let mut f = Fixture::new();
    let list = list_local(&mut f);
    let start = f.int(0);
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        let bound = list_call(f, list, "size", Vec::new());
        let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);
        let index = f.reference("i", i);
        let get = list_call(f, list, "get", vec![index]);
        let statement = f.statement(get);
        (condition, update, vec![statement])
    });
    let converted = convert(&mut f, node);
    assert!(matches!(f.tree.kind(converted), NodeKind::ForIn { .. }));
}

#[test]
fn comments_follow_the_loop() {
    let mut f = Fixture::new();
    let bound = f.int(3);
    let node = ascending(&mut f, 0, BinaryOp::Lt, bound);
    f.tree
        .trivia_mut(node)
        .comments_before
        .push(j2k_ir::Comment::line("// three times"));
    let converted = convert(&mut f, node);
    assert!(f.dump(converted).starts_with("// three times\nForIn\n"));
}

#[test]
fn comments_on_the_header_move_to_the_range() {
    let mut f = Fixture::new();
    let start = f.int(0);
    let mut counter = None;
    let mut step = None;
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        counter = Some(left);
        let bound = f.int(3);
        let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);
        step = Some(update);
        (condition, update, Vec::new())
    });
    f.tree
        .trivia_mut(counter.unwrap())
        .comments_before
        .push(j2k_ir::Comment::line("// counter"));
    f.tree
        .trivia_mut(step.unwrap())
        .comments_after
        .push(j2k_ir::Comment::line("// next"));

    let converted = convert(&mut f, node);

    let NodeKind::ForIn { iterable, .. } = *f.tree.kind(converted) else {
        panic!("expected a for-in loop");
    };
    let trivia = f.tree.trivia(iterable);
    assert_eq!(trivia.comments_before, vec![j2k_ir::Comment::line("// counter")]);
    assert_eq!(trivia.comments_after, vec![j2k_ir::Comment::line("// next")]);
}

// While fallback

#[test]
fn loop_variable_written_in_the_body_falls_back_to_while() {
    let mut f = Fixture::new();
    let start = f.int(0);
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        let bound = f.int(10);
        let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);
        let target = f.reference("i", i);
        let two = f.int(2);
        let skip = assign(f, target, AssignOp::Add, two);
        let statement = f.statement(skip);
        (condition, update, vec![statement])
    });

    let converted = convert(&mut f, node);

    assert_eq!(
        f.dump(converted),
        "Block
  DeclarationStatement
    LocalVariable i public
      AnnotationList
      TypeElement int
      Literal Int 0
  While
    Binary <
      FieldAccess i
      Literal Int 10
    Block
      ExpressionStatement
        Assignment +=
          FieldAccess i
          Literal Int 2
      ExpressionStatement
        Postfix ++
          FieldAccess i
"
    );
    assert!(f.notes.has_code(NoteCode::J1001));
}

#[test]
fn continue_runs_the_update_first() {
    let mut f = Fixture::new();
    let list = list_local(&mut f);
    let flag_type = JkType::Primitive(PrimitiveType::Boolean);
    let (_, flag) = f.local("flag", flag_type, None);
    let start = f.int(0);
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        let bound = list_call(f, list, "size", Vec::new());
        let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);

        let skip = f.reference("flag", flag);
        let skip_continue = f.tree.alloc(NodeKind::Continue { label: None });
        let guard = f.tree.alloc(NodeKind::If {
            condition: skip,
            then_branch: skip_continue,
            else_branch: None,
        });
        let spin = f.reference("flag", flag);
        let inner_continue = f.tree.alloc(NodeKind::Continue { label: None });
        let inner = f.tree.alloc(NodeKind::While {
            condition: spin,
            body: inner_continue,
        });
        let element = f.reference("i", i);
        let add = list_call(f, list, "add", vec![element]);
        let add = f.statement(add);
        (condition, update, vec![guard, inner, add])
    });

    let converted = convert(&mut f, node);

    assert_eq!(
        f.dump(converted),
        "Block
  DeclarationStatement
    LocalVariable i public
      AnnotationList
      TypeElement int
      Literal Int 0
  While
    Binary <
      FieldAccess i
      Qualified
        FieldAccess list
        Call size
          TypeArgumentList
          ArgumentList
    Block
      If
        FieldAccess flag
        Block
          ExpressionStatement
            Postfix ++
              FieldAccess i
          Continue
      While
        FieldAccess flag
        Continue
      ExpressionStatement
        Qualified
          FieldAccess list
          Call add
            TypeArgumentList
            ArgumentList
              FieldAccess i
      ExpressionStatement
        Postfix ++
          FieldAccess i
"
    );
}

#[test]
fn labeled_continue_from_a_nested_loop_runs_the_outer_update() {
    let mut f = Fixture::new();
    let list = list_local(&mut f);
    let label = f.name("outer");
    let start = f.int(0);
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        let left = f.reference("i", i);
        let bound = list_call(f, list, "size", Vec::new());
        let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);

        let inner_start = f.int(0);
        let (inner, _) = for_loop(f, "j", int(), inner_start, |f, j| {
            let left = f.reference("j", j);
            let bound = f.int(3);
            let condition = build::binary(&mut f.tree, left, BinaryOp::Lt, bound);
            let operand = f.reference("j", j);
            let update = postfix(f, PostfixOp::Inc, operand);
            let jump = f.tree.alloc(NodeKind::Continue { label: Some(label) });
            (condition, update, vec![jump])
        });
        let element = f.reference("i", i);
        let add = list_call(f, list, "add", vec![element]);
        let add = f.statement(add);
        (condition, update, vec![inner, add])
    });
    let labeled = f.tree.alloc(NodeKind::Labeled {
        label,
        statement: node,
    });

    let converted = convert(&mut f, labeled);

    assert_eq!(
        f.dump(converted),
        "Block
  DeclarationStatement
    LocalVariable i public
      AnnotationList
      TypeElement int
      Literal Int 0
  Labeled outer@
    While
      Binary <
        FieldAccess i
        Qualified
          FieldAccess list
          Call size
            TypeArgumentList
            ArgumentList
      Block
        ForIn
          Parameter j
            AnnotationList
            TypeElement int
          Range until
            Literal Int 0
            Literal Int 3
          Block
            ExpressionStatement
              Postfix ++
                FieldAccess i
            Continue @outer
        ExpressionStatement
          Qualified
            FieldAccess list
            Call add
              TypeArgumentList
              ArgumentList
                FieldAccess i
        ExpressionStatement
          Postfix ++
            FieldAccess i
"
    );
}

#[test]
fn body_ending_in_a_jump_gets_no_trailing_update() {
    let mut f = Fixture::new();
    let start = f.int(0);
    let (node, _) = for_loop(&mut f, "i", int(), start, |f, i| {
        // No condition shape we recognize: `i != 10`.
        let left = f.reference("i", i);
        let bound = f.int(10);
        let condition = build::binary(&mut f.tree, left, BinaryOp::Ne, bound);
        let operand = f.reference("i", i);
        let update = postfix(f, PostfixOp::Inc, operand);
        let stop = f.tree.alloc(NodeKind::Break { label: None });
        (condition, update, vec![stop])
    });
    let converted = convert(&mut f, node);
    assert!(f
        .dump(converted)
        .ends_with("  While\n    Binary !=\n      FieldAccess i\n      Literal Int 10\n    Block\n      Break\n"));
}

// Range semantics

fn holds(value: i64, op: BinaryOp, bound: i64) -> bool {
    match op {
        BinaryOp::Lt => value < bound,
        BinaryOp::Le => value <= bound,
        BinaryOp::Gt => value > bound,
        BinaryOp::Ge => value >= bound,
        _ => unreachable!(),
    }
}

/// Values `i` takes in the Java loop, capped for loops that never end.
fn java_sequence(start: i64, op: BinaryOp, bound: i64, step: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let mut i = start;
    while holds(i, op, bound) && out.len() < 200 {
        out.push(i);
        i += step;
    }
    out
}

fn literal_value(f: &Fixture, id: NodeId) -> i64 {
    let NodeKind::Literal { text, .. } = f.tree.kind(id) else {
        panic!("expected a literal, got {}", f.dump(id));
    };
    text.trim_end_matches('L').parse().unwrap()
}

/// Values the converted `for (i in range)` iterates over.
fn kotlin_sequence(f: &Fixture, converted: NodeId) -> Vec<i64> {
    let NodeKind::ForIn { iterable, .. } = *f.tree.kind(converted) else {
        panic!("expected a for-in loop, got {}", f.dump(converted));
    };
    let NodeKind::Range {
        start,
        kind,
        end,
        step,
    } = *f.tree.kind(iterable)
    else {
        panic!("expected a range");
    };
    let (start, end) = (literal_value(f, start), literal_value(f, end));
    let step = step.map_or(1, |step| literal_value(f, step));
    let mut out = Vec::new();
    let mut i = start;
    loop {
        let inside = match kind {
            RangeKind::Until => i < end,
            RangeKind::Inclusive => i <= end,
            RangeKind::DownTo => i >= end,
        };
        if !inside {
            return out;
        }
        out.push(i);
        i = if kind == RangeKind::DownTo { i - step } else { i + step };
    }
}

proptest! {
    #[test]
    fn converted_ranges_visit_the_same_values(
        start in -20i64..20,
        bound in -20i64..20,
        op in prop::sample::select(vec![BinaryOp::Lt, BinaryOp::Le, BinaryOp::Gt, BinaryOp::Ge]),
        magnitude in 1i64..4,
        descending in any::<bool>(),
        bound_on_left in any::<bool>(),
    ) {
        let mut f = Fixture::new();
        let step = if descending { -magnitude } else { magnitude };
        let start_literal = f.int(start);
        let (node, _) = for_loop(&mut f, "i", int(), start_literal, |f, i| {
            let variable = f.reference("i", i);
            let limit = f.int(bound);
            let condition = if bound_on_left {
                build::binary(&mut f.tree, limit, op.flipped(), variable)
            } else {
                build::binary(&mut f.tree, variable, op, limit)
            };
            let operand = f.reference("i", i);
            let update = match (descending, magnitude) {
                (false, 1) => postfix(f, PostfixOp::Inc, operand),
                (true, 1) => postfix(f, PostfixOp::Dec, operand),
                (false, k) => {
                    let k = f.int(k);
                    assign(f, operand, AssignOp::Add, k)
                }
                (true, k) => {
                    let k = f.int(k);
                    assign(f, operand, AssignOp::Sub, k)
                }
            };
            (condition, update, Vec::new())
        });

        let converted = convert(&mut f, node);

        let ascending = matches!(op, BinaryOp::Lt | BinaryOp::Le);
        if ascending == descending {
            prop_assert!(f.dump(converted).contains("While"));
        } else {
            prop_assert_eq!(
                kotlin_sequence(&f, converted),
                java_sequence(start, op, bound, step)
            );
        }
    }
}
