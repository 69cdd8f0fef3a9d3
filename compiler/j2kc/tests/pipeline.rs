#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end runs of the full pipeline over hand-built units.

mod common;

use pretty_assertions::assert_eq;

use j2k_diagnostic::{ConversionError, NoteCode};
use j2k_ir::{dump, NodeId, NodeKind, SharedInterner, Tree};
use j2k_types::ExternalChange;
use j2kc::{
    translate_all, CancellationToken, ConversionContext, ConversionMode, ConverterSettings,
    Pipeline,
};

fn constructors(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    tree.descendants(root)
        .into_iter()
        .filter(|&id| matches!(tree.kind(id), NodeKind::Constructor { .. }))
        .collect()
}

fn default_of(tree: &Tree, parameter: NodeId) -> Option<String> {
    match tree.kind(parameter) {
        NodeKind::Parameter {
            default: Some(value),
            ..
        } => match tree.kind(*value) {
            NodeKind::Literal { text, .. } => Some(text.clone()),
            _ => None,
        },
        _ => None,
    }
}

#[test]
fn delegating_constructor_becomes_one_constructor_with_a_default() {
    let interner = SharedInterner::new();
    let context = ConversionContext::standalone(interner.clone());
    let unit = common::point_unit(&interner);

    let outcome = Pipeline::new(ConversionMode::Full)
        .run(unit, &context, &CancellationToken::new())
        .unwrap();

    let tree = &outcome.unit.tree;
    let root = outcome.unit.root;
    let remaining = constructors(tree, root);
    assert_eq!(remaining.len(), 1);
    let NodeKind::Constructor { parameters, .. } = tree.kind(remaining[0]) else {
        unreachable!()
    };
    assert_eq!(parameters.len(), 2);
    assert_eq!(default_of(tree, parameters[0]), None);
    assert_eq!(default_of(tree, parameters[1]).as_deref(), Some("0"));

    let text = dump::dump(tree, &interner, root);
    assert!(text.contains("Annotation @kotlin.jvm.JvmOverloads"), "{text}");
    assert!(outcome.notes.iter().any(|note| note.code == NoteCode::J3001));
    assert_eq!(outcome.stats.changes_by("default-arguments"), Some(1));
}

#[test]
fn comment_on_the_removed_constructor_survives() {
    let interner = SharedInterner::new();
    let context = ConversionContext::standalone(interner.clone());
    let unit = common::point_unit(&interner);

    let outcome = Pipeline::new(ConversionMode::Full)
        .run(unit, &context, &CancellationToken::new())
        .unwrap();

    let tree = &outcome.unit.tree;
    let comments: Vec<&str> = tree
        .descendants(outcome.unit.root)
        .into_iter()
        .flat_map(|id| tree.trivia(id).comments_before.iter().map(|c| c.text.as_str()))
        .collect();
    assert_eq!(comments, vec!["// origin on the x axis"]);
}

#[test]
fn merge_is_visible_to_other_units_through_the_external_record() {
    let interner = SharedInterner::new();
    let context = ConversionContext::standalone(interner.clone());

    let results = translate_all(
        vec![common::point_unit(&interner)],
        &context,
        &CancellationToken::new(),
    );
    assert!(results[0].is_ok());

    let [entry]: [_; 1] = context.external.declarations(interner.intern("Point.<init>")).try_into().unwrap();
    assert!(entry.changes.contains(&ExternalChange::JvmOverloads));
}

#[test]
fn broken_unit_fails_alone() {
    let interner = SharedInterner::new();
    let context = ConversionContext::standalone(interner.clone());
    let units = vec![
        common::point_unit(&interner),
        common::broken_unit(&interner),
        common::empty_unit(&interner),
    ];

    let results = translate_all(units, &context, &CancellationToken::new());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().unit.name, "Point.java");
    assert!(matches!(
        results[1],
        Err(ConversionError::InvariantViolation { .. })
    ));
    assert_eq!(results[2].as_ref().unwrap().unit.name, "Empty.java");
}

#[test]
fn cancelled_run_converts_nothing() {
    let interner = SharedInterner::new();
    let context = ConversionContext::standalone(interner.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let results = translate_all(
        vec![common::point_unit(&interner), common::empty_unit(&interner)],
        &context,
        &cancel,
    );

    assert!(results
        .iter()
        .all(|result| result.as_ref().is_err_and(ConversionError::is_cancelled)));
}

#[test]
fn basic_mode_skips_cosmetic_passes() {
    let interner = SharedInterner::new();
    let settings = ConverterSettings::from_options(&["--basic"]).unwrap();
    let context = ConversionContext::standalone(interner.clone()).with_settings(settings);

    let results = translate_all(
        vec![common::empty_unit(&interner)],
        &context,
        &CancellationToken::new(),
    );

    let stats = &results[0].as_ref().unwrap().stats;
    assert_eq!(stats.changes_by("parenthesize"), None);
    assert_eq!(stats.changes_by("modality"), Some(0));
}
