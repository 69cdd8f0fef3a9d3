//! Fixture shared by the pass tests: one unit's tree, symbols and notes
//! plus shorthand builders for the shapes tests construct most.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use j2k_diagnostic::NoteSink;
use j2k_ir::{
    build, dump, ClassKind, JkType, LiteralKind, Modifiers, Name, NodeId, NodeKind, Origin,
    OriginKey, SharedInterner, Span, SymbolId, Tree,
};
use j2k_types::{AnalysisOracle, SessionGate, Signature, SymbolKind, SymbolTable};

use crate::{Conversion, ConversionContext, ConversionCx, ConverterSettings};

pub(crate) struct Fixture {
    pub tree: Tree,
    pub symbols: SymbolTable,
    pub context: ConversionContext,
    pub notes: NoteSink,
    pub gate: SessionGate,
    pub changes: usize,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            tree: Tree::new(),
            symbols: SymbolTable::new(),
            context: ConversionContext::standalone(SharedInterner::new()),
            notes: NoteSink::new(),
            gate: SessionGate::new(),
            changes: 0,
        }
    }

    pub fn with_settings(settings: ConverterSettings) -> Self {
        let mut fixture = Fixture::new();
        fixture.context = fixture.context.with_settings(settings);
        fixture
    }

    pub fn with_oracle(oracle: impl AnalysisOracle + 'static) -> Self {
        let mut fixture = Fixture::new();
        fixture.context = fixture.context.with_oracle(Arc::new(oracle));
        fixture
    }

    pub fn with_cx<R>(&mut self, f: impl FnOnce(&mut ConversionCx<'_>) -> R) -> R {
        let mut cx = ConversionCx::new(
            &mut self.tree,
            &mut self.symbols,
            &self.context,
            &mut self.notes,
            &self.gate,
        );
        let result = f(&mut cx);
        self.changes += cx.changes();
        result
    }

    /// Run `pass` over `root`; returns the new root.
    pub fn run(&mut self, pass: &mut dyn Conversion, root: NodeId) -> NodeId {
        self.changes = 0;
        self.with_cx(|cx| pass.run(cx, root))
    }

    pub fn name(&self, s: &str) -> Name {
        self.context.interner.intern(s)
    }

    pub fn dump(&self, root: NodeId) -> String {
        dump::dump(&self.tree, &self.context.interner, root)
    }

    pub fn render(&self, ty: Option<&JkType>) -> String {
        ty.map_or_else(
            || "<none>".to_owned(),
            |ty| dump::render_type(ty, &self.context.interner),
        )
    }

    /// Text of every comment attached below `root`, in tree order.
    pub fn comments(&self, root: NodeId) -> Vec<String> {
        self.tree
            .descendants(root)
            .into_iter()
            .flat_map(|id| {
                let trivia = self.tree.trivia(id);
                trivia
                    .comments_before
                    .iter()
                    .chain(&trivia.comments_after)
                    .map(|c| c.text.clone())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Give `id` an origin carrying `key`, so the oracle can answer for it.
    pub fn keyed(&mut self, id: NodeId, key: u64) {
        let origin = Origin::keyed(Span::DUMMY, OriginKey(key));
        self.tree.set_origin(id, Some(origin));
    }

    // Builders

    pub fn class_type(&mut self, fq: &str) -> JkType {
        let fq_name = self.name(fq);
        let symbol = self.symbols.multiverse(fq_name, SymbolKind::Class, None);
        JkType::class(fq_name, symbol)
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        build::int_literal(&mut self.tree, value)
    }

    pub fn literal(&mut self, kind: LiteralKind, text: &str) -> NodeId {
        build::literal(&mut self.tree, kind, text)
    }

    pub fn string(&mut self, text: &str) -> NodeId {
        build::literal(&mut self.tree, LiteralKind::String, format!("\"{text}\""))
    }

    /// Local variable declaration with its own universe symbol.
    pub fn local(&mut self, name: &str, ty: JkType, init: Option<NodeId>) -> (NodeId, SymbolId) {
        let name = self.name(name);
        let decl = build::local_variable(&mut self.tree, name, Modifiers::default(), ty, init, SymbolId::NONE);
        let symbol = self.symbols.declare(decl, SymbolKind::LocalVariable, name, name);
        *self.tree.kind_mut(decl).symbol_mut().unwrap() = symbol;
        (decl, symbol)
    }

    pub fn parameter(&mut self, name: &str, ty: JkType) -> (NodeId, SymbolId) {
        let name = self.name(name);
        let decl = build::parameter(&mut self.tree, name, ty, None, SymbolId::NONE);
        let symbol = self.symbols.declare(decl, SymbolKind::Parameter, name, name);
        *self.tree.kind_mut(decl).symbol_mut().unwrap() = symbol;
        (decl, symbol)
    }

    pub fn reference(&mut self, name: &str, symbol: SymbolId) -> NodeId {
        let name = self.name(name);
        build::reference(&mut self.tree, name, symbol)
    }

    pub fn declaration(&mut self, decl: NodeId) -> NodeId {
        self.tree.alloc(NodeKind::DeclarationStatement {
            declarations: vec![decl],
        })
    }

    pub fn statement(&mut self, expression: NodeId) -> NodeId {
        build::expression_statement(&mut self.tree, expression)
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        build::block(&mut self.tree, statements)
    }

    /// Symbol for a library member, with a signature when given.
    pub fn library(&mut self, fq: &str, kind: SymbolKind, signature: Option<Signature>) -> SymbolId {
        let fq_name = self.name(fq);
        self.symbols.multiverse(fq_name, kind, signature)
    }

    /// Unqualified call to `fq` (short name taken from the last segment).
    pub fn call(&mut self, fq: &str, symbol: SymbolId, args: Vec<NodeId>) -> NodeId {
        let short = fq.rsplit('.').next().unwrap();
        let name = self.name(short);
        build::call(&mut self.tree, name, symbol, args)
    }

    pub fn qualified(&mut self, receiver: NodeId, selector: NodeId) -> NodeId {
        build::qualified(&mut self.tree, receiver, selector)
    }

    /// `fq` class reference usable as a static receiver.
    pub fn class_reference(&mut self, fq: &str) -> NodeId {
        let symbol = self.library(fq, SymbolKind::Class, None);
        let short = fq.rsplit('.').next().unwrap();
        self.reference(short, symbol)
    }

    /// Class with a universe symbol and the given members.
    pub fn class(&mut self, name: &str, kind: ClassKind, modifiers: Modifiers, members: Vec<NodeId>) -> (NodeId, SymbolId) {
        let class_name = self.name(name);
        let annotations = build::annotation_list(&mut self.tree, Vec::new());
        let body = self.tree.alloc(NodeKind::ClassBody { members });
        let class = self.tree.alloc(NodeKind::Class {
            name: class_name,
            class_kind: kind,
            modifiers,
            annotations,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            primary: Vec::new(),
            body,
            symbol: SymbolId::NONE,
        });
        let symbol = self.symbols.declare(class, SymbolKind::Class, class_name, class_name);
        *self.tree.kind_mut(class).symbol_mut().unwrap() = symbol;
        (class, symbol)
    }

    /// Method with a universe symbol.
    pub fn method(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        parameters: Vec<NodeId>,
        return_type: JkType,
        body: Option<NodeId>,
    ) -> (NodeId, SymbolId) {
        let method_name = self.name(name);
        let annotations = build::annotation_list(&mut self.tree, Vec::new());
        let return_type = build::type_element(&mut self.tree, return_type);
        let method = self.tree.alloc(NodeKind::Method {
            name: method_name,
            modifiers,
            annotations,
            type_parameters: Vec::new(),
            parameters,
            return_type,
            body,
            symbol: SymbolId::NONE,
        });
        let symbol = self.symbols.declare(method, SymbolKind::Method, method_name, method_name);
        *self.tree.kind_mut(method).symbol_mut().unwrap() = symbol;
        (method, symbol)
    }

    /// Field with a universe symbol.
    pub fn field(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        ty: JkType,
        initializer: Option<NodeId>,
    ) -> (NodeId, SymbolId) {
        let field_name = self.name(name);
        let annotations = build::annotation_list(&mut self.tree, Vec::new());
        let ty = build::type_element(&mut self.tree, ty);
        let field = self.tree.alloc(NodeKind::Field {
            name: field_name,
            modifiers,
            annotations,
            ty,
            initializer,
            symbol: SymbolId::NONE,
        });
        let symbol = self.symbols.declare(field, SymbolKind::Field, field_name, field_name);
        *self.tree.kind_mut(field).symbol_mut().unwrap() = symbol;
        (field, symbol)
    }

    pub fn file(&mut self, declarations: Vec<NodeId>) -> NodeId {
        self.tree.alloc(NodeKind::File {
            package: None,
            imports: Vec::new(),
            declarations,
        })
    }
}
