#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use j2k_diagnostic::ConversionError;
use j2k_ir::{NodeKind, SharedInterner, Tree};
use j2k_passes::{ConversionContext, ConversionMode};
use j2k_types::SymbolTable;

use super::Pipeline;
use crate::{CancellationToken, TranslationUnit, PASSES};

fn empty_unit() -> TranslationUnit {
    let mut tree = Tree::new();
    let root = tree.alloc(NodeKind::File {
        package: None,
        imports: Vec::new(),
        declarations: Vec::new(),
    });
    TranslationUnit::new("Empty.java", tree, root, SymbolTable::new())
}

fn before(pipeline: &Pipeline, first: &str, second: &str) -> bool {
    pipeline.position(first).unwrap() < pipeline.position(second).unwrap()
}

#[test]
fn registry_names_match_the_passes() {
    for descriptor in PASSES {
        assert_eq!((descriptor.create)().name(), descriptor.name);
    }
}

#[test]
fn registry_names_are_unique() {
    let mut names: Vec<&str> = PASSES.iter().map(|d| d.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), PASSES.len());
}

#[test]
fn basic_mode_drops_cosmetic_passes() {
    let full = Pipeline::new(ConversionMode::Full);
    let basic = Pipeline::new(ConversionMode::Basic);

    assert_eq!(full.len(), PASSES.len());
    for name in ["equals-operator", "redundant-modifiers", "parenthesize"] {
        assert!(full.position(name).is_some());
        assert_eq!(basic.position(name), None);
    }
    assert!(basic.position("default-arguments").is_some());
}

#[test]
fn ordering_contract() {
    let pipeline = Pipeline::new(ConversionMode::Full);

    assert_eq!(pipeline.position("literal-conversion"), Some(0));
    assert!(before(&pipeline, "switch-to-when", "for-conversion"));
    assert!(before(&pipeline, "type-mapping", "builtin-members"));
    assert!(before(&pipeline, "builtin-members", "implicit-casts"));
    assert!(before(&pipeline, "static-members-to-companion", "default-arguments"));
    assert!(before(&pipeline, "default-arguments", "modality"));
    assert!(before(&pipeline, "modality", "redundant-modifiers"));
    assert!(before(&pipeline, "visibility", "redundant-modifiers"));
    assert_eq!(pipeline.pass_names().last(), Some("parenthesize"));
}

#[test]
fn empty_unit_runs_every_pass_without_changes() {
    let context = ConversionContext::standalone(SharedInterner::new());
    let pipeline = Pipeline::new(ConversionMode::Full);

    let outcome = pipeline
        .run(empty_unit(), &context, &CancellationToken::new())
        .unwrap();

    assert_eq!(outcome.stats.changes.len(), pipeline.len());
    assert_eq!(outcome.stats.total_changes(), 0);
    assert!(outcome.notes.is_empty());
}

#[test]
fn cancelled_token_stops_before_the_first_pass() {
    let context = ConversionContext::standalone(SharedInterner::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = Pipeline::new(ConversionMode::Basic)
        .run(empty_unit(), &context, &cancel)
        .unwrap_err();

    assert_eq!(
        error,
        ConversionError::Cancelled {
            pass: "literal-conversion"
        }
    );
    assert!(error.is_cancelled());
}

#[test]
fn stale_root_is_an_invariant_violation() {
    let context = ConversionContext::standalone(SharedInterner::new());
    let mut unit = empty_unit();
    unit.tree.invalidate(unit.root);

    let error = Pipeline::new(ConversionMode::Full)
        .run(unit, &context, &CancellationToken::new())
        .unwrap_err();

    assert!(matches!(
        error,
        ConversionError::InvariantViolation {
            pass: "literal-conversion",
            ..
        }
    ));
}
