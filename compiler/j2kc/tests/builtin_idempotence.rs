#![allow(clippy::unwrap_used, clippy::expect_used)]
//! The builtin-member table never matches its own output: running the
//! pipeline over an already converted unit finds nothing left to replace.

mod common;

use pretty_assertions::assert_eq;

use j2k_ir::{build, LiteralKind, NodeId, SharedInterner};
use j2k_types::SymbolKind;
use j2kc::{CancellationToken, ConversionContext, ConversionMode, Pipeline, TranslationUnit};

use common::UnitBuilder;

fn library_call(b: &mut UnitBuilder, fq: &str, receiver: NodeId, args: Vec<NodeId>) -> NodeId {
    let symbol = b.symbols.multiverse(b.name(fq), SymbolKind::Method, None);
    let short = b.name(fq.rsplit('.').next().unwrap());
    let call = build::call(&mut b.tree, short, symbol, args);
    build::qualified(&mut b.tree, receiver, call)
}

/// `Math.abs(3); "abc".length(); Integer.parseInt("7");`
fn library_unit(interner: &SharedInterner) -> TranslationUnit {
    let mut b = UnitBuilder::new(interner);
    let math = b.symbols.multiverse(b.name("java.lang.Math"), SymbolKind::Class, None);
    let math = b.reference("Math", math);
    let three = build::int_literal(&mut b.tree, 3);
    let abs = library_call(&mut b, "java.lang.Math.abs", math, vec![three]);

    let text = build::literal(&mut b.tree, LiteralKind::String, "\"abc\"");
    let length = library_call(&mut b, "java.lang.String.length", text, Vec::new());

    let integer = b.symbols.multiverse(b.name("java.lang.Integer"), SymbolKind::Class, None);
    let integer = b.reference("Integer", integer);
    let seven = build::literal(&mut b.tree, LiteralKind::String, "\"7\"");
    let parse = library_call(&mut b, "java.lang.Integer.parseInt", integer, vec![seven]);

    let statements = [abs, length, parse]
        .into_iter()
        .map(|expression| build::expression_statement(&mut b.tree, expression))
        .collect();
    let root = build::block(&mut b.tree, statements);
    b.finish("Library.java", root)
}

#[test]
fn second_run_replaces_nothing() {
    let interner = SharedInterner::new();
    let context = ConversionContext::standalone(interner.clone());
    let pipeline = Pipeline::new(ConversionMode::Full);
    let cancel = CancellationToken::new();

    let first = pipeline.run(library_unit(&interner), &context, &cancel).unwrap();
    assert!(first.stats.changes_by("builtin-members").unwrap() > 0);
    let once = j2k_ir::dump::dump(&first.unit.tree, &interner, first.unit.root);

    let second = pipeline.run(first.unit, &context, &cancel).unwrap();
    assert_eq!(second.stats.changes_by("builtin-members"), Some(0));
    assert_eq!(
        j2k_ir::dump::dump(&second.unit.tree, &interner, second.unit.root),
        once
    );
}
