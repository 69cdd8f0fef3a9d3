//! The closed set of node shapes.
//!
//! Java-only shapes (`For`, `Switch`, `Initializer`, ...) and Kotlin-only
//! shapes (`ForIn`, `When`, `Range`, `Property`) live side by side: a tree is
//! a mix of both while the pipeline runs, and pure Kotlin once it finishes.
//!
//! Children are `NodeId`s held in fixed slots (`NodeId`, `Option<NodeId>`)
//! or child lists (`Vec<NodeId>`). The slot table at the bottom of this file
//! drives child enumeration, so adding a shape means adding one line there.

mod modifiers;
mod operators;
mod slots;

pub use modifiers::{ClassKind, Modality, ModifierFlags, Modifiers, Visibility};
pub use operators::{
    AssignOp, BinaryOp, DelegationTarget, LiteralKind, PostfixOp, PrefixOp, RangeKind,
};

use crate::{JkType, Name, NodeId, SymbolId};

#[derive(Clone, PartialEq, Debug)]
pub enum NodeKind {
    // Declarations
    File {
        package: Option<Name>,
        imports: Vec<Name>,
        declarations: Vec<NodeId>,
    },
    Class {
        name: Name,
        class_kind: ClassKind,
        modifiers: Modifiers,
        annotations: NodeId,
        type_parameters: Vec<NodeId>,
        supertypes: Vec<NodeId>,
        /// Record components (`Parameter`) or primary-constructor
        /// properties (`Property`).
        primary: Vec<NodeId>,
        body: NodeId,
        symbol: SymbolId,
    },
    ClassBody {
        members: Vec<NodeId>,
    },
    Method {
        name: Name,
        modifiers: Modifiers,
        annotations: NodeId,
        type_parameters: Vec<NodeId>,
        parameters: Vec<NodeId>,
        return_type: NodeId,
        body: Option<NodeId>,
        symbol: SymbolId,
    },
    Constructor {
        modifiers: Modifiers,
        annotations: NodeId,
        parameters: Vec<NodeId>,
        /// `this(..)` / `super(..)` call, hoisted out of the body.
        delegation: Option<NodeId>,
        body: NodeId,
        symbol: SymbolId,
    },
    Field {
        name: Name,
        modifiers: Modifiers,
        annotations: NodeId,
        ty: NodeId,
        initializer: Option<NodeId>,
        symbol: SymbolId,
    },
    Parameter {
        name: Name,
        modifiers: Modifiers,
        annotations: NodeId,
        ty: NodeId,
        default: Option<NodeId>,
        vararg: bool,
        symbol: SymbolId,
    },
    EnumConstant {
        name: Name,
        annotations: NodeId,
        arguments: NodeId,
        body: Option<NodeId>,
        symbol: SymbolId,
    },
    LocalVariable {
        name: Name,
        modifiers: Modifiers,
        annotations: NodeId,
        ty: NodeId,
        initializer: Option<NodeId>,
        /// Whether the printer writes the type annotation.
        explicit_type: bool,
        symbol: SymbolId,
    },
    Initializer {
        is_static: bool,
        body: NodeId,
    },
    Property {
        name: Name,
        modifiers: Modifiers,
        annotations: NodeId,
        ty: NodeId,
        initializer: Option<NodeId>,
        mutable: bool,
        symbol: SymbolId,
    },
    TypeParameter {
        name: Name,
        bounds: Vec<NodeId>,
        symbol: SymbolId,
    },
    Annotation {
        fq_name: Name,
        symbol: SymbolId,
        arguments: NodeId,
    },
    AnnotationList {
        annotations: Vec<NodeId>,
    },

    // Statements
    Block {
        statements: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    DeclarationStatement {
        declarations: Vec<NodeId>,
    },
    If {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    DoWhile {
        body: NodeId,
        condition: NodeId,
    },
    For {
        initializers: Vec<NodeId>,
        condition: Option<NodeId>,
        updates: Vec<NodeId>,
        body: NodeId,
    },
    ForIn {
        variable: NodeId,
        iterable: NodeId,
        body: NodeId,
    },
    Return {
        value: Option<NodeId>,
        label: Option<Name>,
    },
    Break {
        label: Option<Name>,
    },
    Continue {
        label: Option<Name>,
    },
    Throw {
        exception: NodeId,
    },
    Try {
        resources: Vec<NodeId>,
        body: NodeId,
        catches: Vec<NodeId>,
        finally: Option<NodeId>,
    },
    Catch {
        parameter: NodeId,
        body: NodeId,
    },
    Switch {
        selector: NodeId,
        cases: Vec<NodeId>,
        is_expression: bool,
    },
    SwitchCase {
        /// Empty for `default`.
        labels: Vec<NodeId>,
        body: Vec<NodeId>,
        /// `case X ->` form: no fall-through.
        arrow: bool,
    },
    When {
        subject: Option<NodeId>,
        branches: Vec<NodeId>,
        is_expression: bool,
    },
    WhenBranch {
        /// Empty for `else`.
        conditions: Vec<NodeId>,
        body: NodeId,
    },
    Yield {
        value: NodeId,
    },
    Labeled {
        label: Name,
        statement: NodeId,
    },
    Empty,

    // Expressions
    Literal {
        kind: LiteralKind,
        text: String,
    },
    Binary {
        left: NodeId,
        op: BinaryOp,
        right: NodeId,
    },
    Prefix {
        op: PrefixOp,
        operand: NodeId,
    },
    Postfix {
        op: PostfixOp,
        operand: NodeId,
    },
    Assignment {
        target: NodeId,
        op: AssignOp,
        value: NodeId,
    },
    /// Unqualified call. `a.foo()` is `Qualified { a, Call foo }`.
    Call {
        name: Name,
        symbol: SymbolId,
        type_arguments: NodeId,
        arguments: NodeId,
    },
    /// Unqualified reference to a field, local or parameter.
    FieldAccess {
        name: Name,
        symbol: SymbolId,
    },
    Qualified {
        receiver: NodeId,
        selector: NodeId,
    },
    New {
        symbol: SymbolId,
        ty: NodeId,
        arguments: NodeId,
        body: Option<NodeId>,
    },
    NewArray {
        element_type: NodeId,
        dimensions: Vec<NodeId>,
        initializer: Vec<NodeId>,
    },
    Lambda {
        parameters: Vec<NodeId>,
        body: NodeId,
    },
    MethodReference {
        receiver: NodeId,
        name: Name,
        symbol: SymbolId,
    },
    Parenthesized {
        expression: NodeId,
    },
    TypeCast {
        expression: NodeId,
        ty: NodeId,
    },
    IsExpression {
        expression: NodeId,
        ty: NodeId,
    },
    Ternary {
        condition: NodeId,
        then_value: NodeId,
        else_value: NodeId,
    },
    ArrayAccess {
        array: NodeId,
        index: NodeId,
    },
    This {
        qualifier: Option<Name>,
    },
    Super {
        qualifier: Option<Name>,
    },
    /// `Foo.class` (Java) / `Foo::class.java` (Kotlin).
    ClassLiteral {
        ty: NodeId,
    },
    Range {
        start: NodeId,
        kind: RangeKind,
        end: NodeId,
        step: Option<NodeId>,
    },
    DelegationCall {
        target: DelegationTarget,
        symbol: SymbolId,
        arguments: NodeId,
    },
    ArgumentList {
        arguments: Vec<NodeId>,
    },
    TypeArgumentList {
        arguments: Vec<NodeId>,
    },
    /// Empty placeholder expression.
    StubExpression,

    // Types
    TypeElement {
        ty: JkType,
    },

    // Markers
    /// The front-end could not map a construct. Printed verbatim.
    Unsupported {
        text: String,
    },
    /// `TODO("note")` standing in for a value a pass could not convert.
    Todo {
        text: String,
        note: String,
    },
}

impl NodeKind {
    /// Variant name, used by dumps and error messages.
    pub fn tag(&self) -> &'static str {
        slots::tag(self)
    }

    /// The single child list of a list node, if this is one.
    pub fn child_list(&self) -> Option<&Vec<NodeId>> {
        match self {
            NodeKind::File { declarations: list, .. }
            | NodeKind::ClassBody { members: list }
            | NodeKind::AnnotationList { annotations: list }
            | NodeKind::Block { statements: list }
            | NodeKind::DeclarationStatement { declarations: list }
            | NodeKind::ArgumentList { arguments: list }
            | NodeKind::TypeArgumentList { arguments: list } => Some(list),
            _ => None,
        }
    }

    pub fn child_list_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            NodeKind::File { declarations: list, .. }
            | NodeKind::ClassBody { members: list }
            | NodeKind::AnnotationList { annotations: list }
            | NodeKind::Block { statements: list }
            | NodeKind::DeclarationStatement { declarations: list }
            | NodeKind::ArgumentList { arguments: list }
            | NodeKind::TypeArgumentList { arguments: list } => Some(list),
            _ => None,
        }
    }

    /// Declared name of a declaration shape.
    pub fn declared_name(&self) -> Option<Name> {
        match self {
            NodeKind::Class { name, .. }
            | NodeKind::Method { name, .. }
            | NodeKind::Field { name, .. }
            | NodeKind::Parameter { name, .. }
            | NodeKind::EnumConstant { name, .. }
            | NodeKind::LocalVariable { name, .. }
            | NodeKind::Property { name, .. }
            | NodeKind::TypeParameter { name, .. } => Some(*name),
            _ => None,
        }
    }

    /// Symbol bound to this node (declared or referenced).
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            NodeKind::Class { symbol, .. }
            | NodeKind::Method { symbol, .. }
            | NodeKind::Constructor { symbol, .. }
            | NodeKind::Field { symbol, .. }
            | NodeKind::Parameter { symbol, .. }
            | NodeKind::EnumConstant { symbol, .. }
            | NodeKind::LocalVariable { symbol, .. }
            | NodeKind::Property { symbol, .. }
            | NodeKind::TypeParameter { symbol, .. }
            | NodeKind::Annotation { symbol, .. }
            | NodeKind::Call { symbol, .. }
            | NodeKind::FieldAccess { symbol, .. }
            | NodeKind::New { symbol, .. }
            | NodeKind::MethodReference { symbol, .. }
            | NodeKind::DelegationCall { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    /// Mutable access to the symbol slot, for rebinding a reference.
    pub fn symbol_mut(&mut self) -> Option<&mut SymbolId> {
        match self {
            NodeKind::Class { symbol, .. }
            | NodeKind::Method { symbol, .. }
            | NodeKind::Constructor { symbol, .. }
            | NodeKind::Field { symbol, .. }
            | NodeKind::Parameter { symbol, .. }
            | NodeKind::EnumConstant { symbol, .. }
            | NodeKind::LocalVariable { symbol, .. }
            | NodeKind::Property { symbol, .. }
            | NodeKind::TypeParameter { symbol, .. }
            | NodeKind::Annotation { symbol, .. }
            | NodeKind::Call { symbol, .. }
            | NodeKind::FieldAccess { symbol, .. }
            | NodeKind::New { symbol, .. }
            | NodeKind::MethodReference { symbol, .. }
            | NodeKind::DelegationCall { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            NodeKind::Class { modifiers, .. }
            | NodeKind::Method { modifiers, .. }
            | NodeKind::Constructor { modifiers, .. }
            | NodeKind::Field { modifiers, .. }
            | NodeKind::Parameter { modifiers, .. }
            | NodeKind::LocalVariable { modifiers, .. }
            | NodeKind::Property { modifiers, .. } => Some(*modifiers),
            _ => None,
        }
    }

    pub fn modifiers_mut(&mut self) -> Option<&mut Modifiers> {
        match self {
            NodeKind::Class { modifiers, .. }
            | NodeKind::Method { modifiers, .. }
            | NodeKind::Constructor { modifiers, .. }
            | NodeKind::Field { modifiers, .. }
            | NodeKind::Parameter { modifiers, .. }
            | NodeKind::LocalVariable { modifiers, .. }
            | NodeKind::Property { modifiers, .. } => Some(modifiers),
            _ => None,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Literal { .. }
                | NodeKind::Binary { .. }
                | NodeKind::Prefix { .. }
                | NodeKind::Postfix { .. }
                | NodeKind::Assignment { .. }
                | NodeKind::Call { .. }
                | NodeKind::FieldAccess { .. }
                | NodeKind::Qualified { .. }
                | NodeKind::New { .. }
                | NodeKind::NewArray { .. }
                | NodeKind::Lambda { .. }
                | NodeKind::MethodReference { .. }
                | NodeKind::Parenthesized { .. }
                | NodeKind::TypeCast { .. }
                | NodeKind::IsExpression { .. }
                | NodeKind::Ternary { .. }
                | NodeKind::ArrayAccess { .. }
                | NodeKind::This { .. }
                | NodeKind::Super { .. }
                | NodeKind::ClassLiteral { .. }
                | NodeKind::Range { .. }
                | NodeKind::DelegationCall { .. }
                | NodeKind::StubExpression
                | NodeKind::Todo { .. }
        ) || matches!(self, NodeKind::Switch { is_expression: true, .. })
            || matches!(self, NodeKind::When { is_expression: true, .. })
    }

    /// Every child slot in source order, including slots whose node has
    /// since been detached.
    pub fn for_each_slot(&self, f: &mut dyn FnMut(NodeId)) {
        slots::for_each_slot(self, f);
    }

    pub fn for_each_slot_mut(&mut self, f: &mut dyn FnMut(&mut NodeId)) {
        slots::for_each_slot_mut(self, f);
    }
}
