#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use j2k_diagnostic::NoteCode;
use j2k_ir::{ClassKind, JkType, Modifiers, NodeId, NodeKind, PrimitiveType, SymbolId};
use j2k_types::ExternalChange;

use super::RecordClassConversion;
use crate::testing::Fixture;

fn int() -> JkType {
    JkType::Primitive(PrimitiveType::Int)
}

/// `return <name>;` method named `method` returning component `component`.
fn returning(f: &mut Fixture, method: &str, component: &str, symbol: SymbolId) -> (NodeId, SymbolId) {
    let value = f.reference(component, symbol);
    let ret = f.tree.alloc(NodeKind::Return {
        value: Some(value),
        label: None,
    });
    let body = f.block(vec![ret]);
    f.method(method, Modifiers::default(), Vec::new(), int(), Some(body))
}

struct Point {
    class: NodeId,
    accessor: SymbolId,
}

/// `record Point(int x, int y) { int x() { return x; } int doubled() { return y; } }`
fn point(f: &mut Fixture) -> Point {
    let (px, x) = f.parameter("x", int());
    let (py, y) = f.parameter("y", int());
    let (accessor_decl, accessor) = returning(f, "x", "x", x);
    let (other, _) = returning(f, "doubled", "y", y);
    let (class, _) = f.class("Point", ClassKind::Record, Modifiers::default(), vec![accessor_decl, other]);
    for parameter in [px, py] {
        if let NodeKind::Class { primary, .. } = f.tree.kind_mut(class) {
            primary.push(parameter);
        }
        f.tree.attach(class, parameter);
    }
    Point { class, accessor }
}

#[test]
fn record_becomes_a_data_class_with_properties() {
    let mut f = Fixture::new();
    let point = point(&mut f);
    f.run(&mut RecordClassConversion::new(), point.class);

    let dump = f.dump(point.class);
    assert!(dump.starts_with(
        "Class Point Class public final data\n  AnnotationList\n  Property val x public\n    AnnotationList\n    TypeElement int\n  Property val y public\n    AnnotationList\n    TypeElement int\n  ClassBody\n    Method doubled public\n"
    ));
    assert!(!dump.contains("Method x"));
    assert!(f.notes.has_code(NoteCode::J3004));
}

#[test]
fn component_symbols_follow_the_properties() {
    let mut f = Fixture::new();
    let point = point(&mut f);
    f.run(&mut RecordClassConversion::new(), point.class);

    let properties: Vec<NodeId> = f
        .tree
        .children(point.class)
        .into_iter()
        .filter(|&id| matches!(f.tree.kind(id), NodeKind::Property { .. }))
        .collect();
    for property in properties {
        let symbol = f.tree.kind(property).symbol().unwrap();
        assert_eq!(f.symbols.decl(symbol), Some(property));
    }
}

#[test]
fn accessor_calls_read_the_property() {
    let mut f = Fixture::new();
    let point = point(&mut f);
    let point_type = f.class_type("Point");
    let (p_decl, p) = f.parameter("p", point_type);
    let receiver = f.reference("p", p);
    let call = f.call("x", point.accessor, Vec::new());
    let read = f.qualified(receiver, call);
    let statement = f.statement(read);
    let body = f.block(vec![statement]);
    let (user, _) = f.method("use", Modifiers::default(), vec![p_decl], JkType::Unit, Some(body));
    let (holder, _) = f.class("User", ClassKind::Class, Modifiers::default(), vec![user]);
    // The user comes first: calls are rewritten wherever they appear.
    let file = f.file(vec![holder, point.class]);
    f.run(&mut RecordClassConversion::new(), file);

    assert_eq!(
        f.dump(statement),
        "ExpressionStatement\n  Qualified\n    FieldAccess p\n    FieldAccess x\n"
    );
}

#[test]
fn dropped_accessor_is_registered_as_a_property() {
    let mut f = Fixture::new();
    let point = point(&mut f);
    f.run(&mut RecordClassConversion::new(), point.class);

    let x = f.name("x");
    let [entry]: [_; 1] = f.context.external.declarations(x).try_into().unwrap();
    assert_eq!(entry.changes, vec![ExternalChange::BecameProperty { property: x }]);
}

#[test]
fn plain_classes_are_untouched() {
    let mut f = Fixture::new();
    let (class, _) = f.class("Plain", ClassKind::Class, Modifiers::default(), Vec::new());
    let before = f.dump(class);
    f.run(&mut RecordClassConversion::new(), class);

    assert_eq!(f.dump(class), before);
    assert_eq!(f.changes, 0);
}
