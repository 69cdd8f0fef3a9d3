//! Hand-built units standing in for what a front-end produces.

#![allow(dead_code)]

use j2k_ir::{
    build, ClassKind, Comment, DelegationTarget, JkType, Modality, Modifiers, Name, NodeId,
    NodeKind, PrimitiveType, SharedInterner, SymbolId, Tree, Visibility,
};
use j2k_types::{SymbolKind, SymbolTable};
use j2kc::TranslationUnit;

pub struct UnitBuilder {
    pub interner: SharedInterner,
    pub tree: Tree,
    pub symbols: SymbolTable,
}

impl UnitBuilder {
    pub fn new(interner: &SharedInterner) -> Self {
        UnitBuilder {
            interner: interner.clone(),
            tree: Tree::new(),
            symbols: SymbolTable::new(),
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    fn bind(&mut self, node: NodeId, kind: SymbolKind, name: &str, fq: &str) -> SymbolId {
        let name = self.name(name);
        let fq = self.name(fq);
        let symbol = self.symbols.declare(node, kind, name, fq);
        *self.tree.kind_mut(node).symbol_mut().unwrap() = symbol;
        symbol
    }

    pub fn int_parameter(&mut self, name: &str) -> (NodeId, SymbolId) {
        let interned = self.name(name);
        let ty = JkType::Primitive(PrimitiveType::Int);
        let node = build::parameter(&mut self.tree, interned, ty, None, SymbolId::NONE);
        let symbol = self.bind(node, SymbolKind::Parameter, name, name);
        (node, symbol)
    }

    pub fn reference(&mut self, name: &str, symbol: SymbolId) -> NodeId {
        let name = self.name(name);
        build::reference(&mut self.tree, name, symbol)
    }

    pub fn this_call(&mut self, target: SymbolId, args: Vec<NodeId>) -> NodeId {
        let arguments = build::arguments(&mut self.tree, args);
        self.tree.alloc(NodeKind::DelegationCall {
            target: DelegationTarget::This,
            symbol: target,
            arguments,
        })
    }

    pub fn constructor(
        &mut self,
        class: &str,
        parameters: Vec<NodeId>,
        delegation: Option<NodeId>,
    ) -> (NodeId, SymbolId) {
        let annotations = build::annotation_list(&mut self.tree, Vec::new());
        let body = build::block(&mut self.tree, Vec::new());
        let node = self.tree.alloc(NodeKind::Constructor {
            modifiers: Modifiers::new(Visibility::Public, Modality::Unspecified),
            annotations,
            parameters,
            delegation,
            body,
            symbol: SymbolId::NONE,
        });
        let symbol = self.bind(node, SymbolKind::Constructor, "<init>", &format!("{class}.<init>"));
        (node, symbol)
    }

    pub fn class(&mut self, name: &str, members: Vec<NodeId>) -> NodeId {
        let annotations = build::annotation_list(&mut self.tree, Vec::new());
        let body = self.tree.alloc(NodeKind::ClassBody { members });
        let class_name = self.name(name);
        let node = self.tree.alloc(NodeKind::Class {
            name: class_name,
            class_kind: ClassKind::Class,
            modifiers: Modifiers::default(),
            annotations,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            primary: Vec::new(),
            body,
            symbol: SymbolId::NONE,
        });
        self.bind(node, SymbolKind::Class, name, name);
        node
    }

    pub fn file(&mut self, declarations: Vec<NodeId>) -> NodeId {
        self.tree.alloc(NodeKind::File {
            package: None,
            imports: Vec::new(),
            declarations,
        })
    }

    pub fn comment(&mut self, node: NodeId, text: &str) {
        self.tree
            .trivia_mut(node)
            .comments_before
            .push(Comment::line(text));
    }

    pub fn finish(self, name: &str, root: NodeId) -> TranslationUnit {
        TranslationUnit::new(name, self.tree, root, self.symbols)
    }
}

/// ```java
/// class Point {
///     // origin on the x axis
///     Point(int x) { this(x, 0); }
///     Point(int x, int y) {}
/// }
/// ```
pub fn point_unit(interner: &SharedInterner) -> TranslationUnit {
    let mut b = UnitBuilder::new(interner);
    let (long_x, _) = b.int_parameter("x");
    let (long_y, _) = b.int_parameter("y");
    let (long, long_symbol) = b.constructor("Point", vec![long_x, long_y], None);

    let (short_x, x) = b.int_parameter("x");
    let forwarded = b.reference("x", x);
    let zero = build::int_literal(&mut b.tree, 0);
    let delegation = b.this_call(long_symbol, vec![forwarded, zero]);
    let (short, _) = b.constructor("Point", vec![short_x], Some(delegation));
    b.comment(short, "// origin on the x axis");

    let class = b.class("Point", vec![short, long]);
    let root = b.file(vec![class]);
    b.finish("Point.java", root)
}

/// A unit whose root was freed before conversion.
pub fn broken_unit(interner: &SharedInterner) -> TranslationUnit {
    let mut b = UnitBuilder::new(interner);
    let root = b.file(Vec::new());
    b.tree.invalidate(root);
    b.finish("Broken.java", root)
}

pub fn empty_unit(interner: &SharedInterner) -> TranslationUnit {
    let mut b = UnitBuilder::new(interner);
    let root = b.file(Vec::new());
    b.finish("Empty.java", root)
}
