use pretty_assertions::assert_eq;

use j2k_ir::{build, JkType, NodeKind, StringInterner, SymbolId, Tree};

use super::*;

#[test]
fn multiverse_symbols_are_shared_per_declaration() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new();
    let fq = interner.intern("java.lang.String.length");
    let sig = Signature::new(Vec::new(), JkType::Unit);
    let a = table.multiverse(fq, SymbolKind::Method, Some(sig.clone()));
    let b = table.multiverse(fq, SymbolKind::Method, Some(sig));
    let c = table.multiverse(fq, SymbolKind::Method, None);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(table.fq_name(a), Some(fq));
}

#[test]
fn unresolved_symbols_are_detectable() {
    let interner = StringInterner::new();
    let mut table = SymbolTable::new();
    let id = table.unresolved(interner.intern("mystery"));
    assert!(table.is_unresolved(id));
    assert!(table.is_unresolved(SymbolId::NONE));
    assert_eq!(table.fq_name(id), None);
}

#[test]
fn transfer_moves_declaration_without_touching_references() {
    let interner = StringInterner::new();
    let mut tree = Tree::new();
    let mut table = SymbolTable::new();
    let name = interner.intern("x");
    let old_decl = tree.alloc(NodeKind::Empty);
    let id = table.declare(old_decl, SymbolKind::Field, name, interner.intern("A.x"));
    let reference = build::reference(&mut tree, name, id);

    let new_decl = tree.alloc(NodeKind::Empty);
    assert_eq!(table.transfer(old_decl, new_decl), Some(id));
    assert_eq!(table.decl(id), Some(new_decl));
    assert_eq!(table.symbol_of_decl(new_decl), Some(id));
    assert_eq!(table.symbol_of_decl(old_decl), None);
    assert_eq!(tree.kind(reference).symbol(), Some(id));
}

#[test]
fn rebind_writes_a_new_binding() {
    let interner = StringInterner::new();
    let mut tree = Tree::new();
    let mut table = SymbolTable::new();
    let name = interner.intern("p");
    let first = table.declare(tree.alloc(NodeKind::Empty), SymbolKind::Parameter, name, name);
    let second = table.declare(tree.alloc(NodeKind::Empty), SymbolKind::Parameter, name, name);
    let reference = build::reference(&mut tree, name, first);

    assert_eq!(table.rebind(&mut tree, reference, second), Some(first));
    assert_eq!(tree.kind(reference).symbol(), Some(second));
    // The symbol the reference used to point at is untouched.
    assert!(matches!(table.get(first), Some(Symbol::Universe(_))));
}

#[test]
fn references_skip_declarations() {
    let interner = StringInterner::new();
    let mut tree = Tree::new();
    let mut table = SymbolTable::new();
    let name = interner.intern("v");
    let decl = build::local_variable(
        &mut tree,
        name,
        j2k_ir::Modifiers::default(),
        JkType::Unit,
        None,
        SymbolId::NONE,
    );
    let id = table.declare(decl, SymbolKind::LocalVariable, name, name);
    if let Some(slot) = tree.kind_mut(decl).symbol_mut() {
        *slot = id;
    }
    let r1 = build::reference(&mut tree, name, id);
    let r2 = build::reference(&mut tree, name, id);
    let sum = build::binary(&mut tree, r1, j2k_ir::BinaryOp::Add, r2);
    let stmt = build::expression_statement(&mut tree, sum);
    let decl_stmt = tree.alloc(NodeKind::DeclarationStatement {
        declarations: vec![decl],
    });
    let body = build::block(&mut tree, vec![decl_stmt, stmt]);
    assert_eq!(table.references(&tree, body, id), vec![r1, r2]);
}
