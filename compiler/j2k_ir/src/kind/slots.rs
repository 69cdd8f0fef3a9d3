//! Child slot table.
//!
//! One line per shape lists its child-bearing fields in source order. The
//! macro expands it into the shared and mutable visitors plus `tag`, so the
//! three can never disagree about which fields hold children.

use super::NodeKind;
use crate::NodeId;

trait ChildSlot {
    fn visit(&self, f: &mut dyn FnMut(NodeId));
    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut NodeId));
}

impl ChildSlot for NodeId {
    #[inline]
    fn visit(&self, f: &mut dyn FnMut(NodeId)) {
        f(*self);
    }

    #[inline]
    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut NodeId)) {
        f(self);
    }
}

impl ChildSlot for Option<NodeId> {
    #[inline]
    fn visit(&self, f: &mut dyn FnMut(NodeId)) {
        if let Some(id) = self {
            f(*id);
        }
    }

    #[inline]
    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut NodeId)) {
        if let Some(id) = self {
            f(id);
        }
    }
}

impl ChildSlot for Vec<NodeId> {
    #[inline]
    fn visit(&self, f: &mut dyn FnMut(NodeId)) {
        for id in self {
            f(*id);
        }
    }

    #[inline]
    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut NodeId)) {
        for id in self {
            f(id);
        }
    }
}

macro_rules! child_slots {
    (
        branches { $($variant:ident { $($field:ident),+ }),* $(,)? }
        leaves { $($leaf:ident),* $(,)? }
    ) => {
        pub(super) fn for_each_slot(kind: &NodeKind, f: &mut dyn FnMut(NodeId)) {
            match kind {
                $(NodeKind::$variant { $($field,)+ .. } => {
                    $(ChildSlot::visit($field, f);)+
                })*
                $(NodeKind::$leaf { .. } => {})*
            }
        }

        pub(super) fn for_each_slot_mut(kind: &mut NodeKind, f: &mut dyn FnMut(&mut NodeId)) {
            match kind {
                $(NodeKind::$variant { $($field,)+ .. } => {
                    $(ChildSlot::visit_mut($field, f);)+
                })*
                $(NodeKind::$leaf { .. } => {})*
            }
        }

        pub(super) fn tag(kind: &NodeKind) -> &'static str {
            match kind {
                $(NodeKind::$variant { .. } => stringify!($variant),)*
                $(NodeKind::$leaf { .. } => stringify!($leaf),)*
            }
        }
    };
}

child_slots! {
    branches {
        File { declarations },
        Class { annotations, type_parameters, supertypes, primary, body },
        ClassBody { members },
        Method { annotations, type_parameters, parameters, return_type, body },
        Constructor { annotations, parameters, delegation, body },
        Field { annotations, ty, initializer },
        Parameter { annotations, ty, default },
        EnumConstant { annotations, arguments, body },
        LocalVariable { annotations, ty, initializer },
        Initializer { body },
        Property { annotations, ty, initializer },
        TypeParameter { bounds },
        Annotation { arguments },
        AnnotationList { annotations },
        Block { statements },
        ExpressionStatement { expression },
        DeclarationStatement { declarations },
        If { condition, then_branch, else_branch },
        While { condition, body },
        DoWhile { body, condition },
        For { initializers, condition, updates, body },
        ForIn { variable, iterable, body },
        Return { value },
        Throw { exception },
        Try { resources, body, catches, finally },
        Catch { parameter, body },
        Switch { selector, cases },
        SwitchCase { labels, body },
        When { subject, branches },
        WhenBranch { conditions, body },
        Yield { value },
        Labeled { statement },
        Binary { left, right },
        Prefix { operand },
        Postfix { operand },
        Assignment { target, value },
        Call { type_arguments, arguments },
        Qualified { receiver, selector },
        New { ty, arguments, body },
        NewArray { element_type, dimensions, initializer },
        Lambda { parameters, body },
        MethodReference { receiver },
        Parenthesized { expression },
        TypeCast { expression, ty },
        IsExpression { expression, ty },
        Ternary { condition, then_value, else_value },
        ArrayAccess { array, index },
        ClassLiteral { ty },
        Range { start, end, step },
        DelegationCall { arguments },
        ArgumentList { arguments },
        TypeArgumentList { arguments },
    }
    leaves {
        Break,
        Continue,
        Empty,
        Literal,
        FieldAccess,
        This,
        Super,
        StubExpression,
        TypeElement,
        Unsupported,
        Todo,
    }
}
