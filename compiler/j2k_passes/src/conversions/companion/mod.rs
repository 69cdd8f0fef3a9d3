//! Static members to a companion object.
//!
//! Kotlin classes have no static members. Static fields, methods and static
//! initializers move, in source order, into the class's `companion object`
//! (created last in the body when the class has none). Public methods get
//! `@JvmStatic` so Java callers keep calling them on the class; final
//! fields of primitive or string type initialized with a literal become
//! `const`.
//!
//! A plain class whose members are all static, and which cannot be
//! instantiated or subclassed from outside, becomes an `object` instead.

use j2k_diagnostic::NoteCode;
use j2k_ir::{
    build, ClassKind, LiteralKind, Modality, ModifierFlags, Modifiers, Name, NodeId, NodeKind,
    Origin, SymbolId, Tree, Visibility,
};
use j2k_types::{ExternalChange, SymbolKind};

use crate::{ApiVersion, ConversionCx, RecursiveConversion};

const JVM_STATIC: &str = "kotlin.jvm.JvmStatic";

pub struct StaticMembersToCompanionConversion;

/// Where the statics of a class end up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Target {
    /// Companion object, new or already declared.
    Companion(Option<NodeId>),
    /// The class itself, turned into an `object`.
    Object,
}

fn is_static_member(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Field { modifiers, .. } | NodeKind::Method { modifiers, .. } => {
            modifiers.is_static()
        }
        NodeKind::Initializer { is_static, .. } => *is_static,
        _ => false,
    }
}

/// `private Util() {}`: a constructor that only exists to forbid
/// instantiation.
fn is_hiding_constructor(tree: &Tree, kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Constructor {
            modifiers,
            parameters,
            delegation: None,
            body,
            ..
        } => modifiers.is_private() && parameters.is_empty() && tree.list(*body).is_empty(),
        _ => false,
    }
}

fn existing_companion(tree: &Tree, body: NodeId) -> Option<NodeId> {
    tree.list(body).into_iter().find(|&member| {
        matches!(
            tree.kind(member),
            NodeKind::Class {
                class_kind: ClassKind::Companion,
                ..
            }
        )
    })
}

impl StaticMembersToCompanionConversion {
    fn target(cx: &ConversionCx<'_>, class: NodeId) -> Option<Target> {
        let NodeKind::Class {
            class_kind,
            modifiers,
            type_parameters,
            supertypes,
            primary,
            body,
            ..
        } = cx.tree.kind(class)
        else {
            return None;
        };
        if matches!(
            class_kind,
            ClassKind::Object | ClassKind::Companion | ClassKind::Annotation
        ) {
            return None;
        }
        let members = cx.tree.list(*body);
        if !members.iter().any(|&m| is_static_member(cx.tree.kind(m))) {
            return None;
        }

        let only_statics = members.iter().all(|&member| {
            let kind = cx.tree.kind(member);
            is_static_member(kind)
                || is_hiding_constructor(cx.tree, kind)
                || matches!(kind, NodeKind::Class { .. })
        });
        // Private constructors already rule out subclasses elsewhere.
        let hidden = members
            .iter()
            .any(|&m| is_hiding_constructor(cx.tree, cx.tree.kind(m)));
        let closed = *class_kind == ClassKind::Class
            && modifiers.modality != Modality::Abstract
            && type_parameters.is_empty()
            && supertypes.is_empty()
            && primary.is_empty()
            && (hidden || !cx.analysis().has_inheritors(cx.origin_key(class)));
        if only_statics && closed {
            return Some(Target::Object);
        }
        Some(Target::Companion(existing_companion(cx.tree, *body)))
    }

    /// `const` for a `static final` primitive or string field with a literal
    /// initializer.
    fn is_const(cx: &ConversionCx<'_>, field: NodeId) -> bool {
        let NodeKind::Field {
            modifiers,
            ty,
            initializer: Some(initializer),
            ..
        } = cx.tree.kind(field)
        else {
            return false;
        };
        if modifiers.modality != Modality::Final {
            return false;
        }
        let NodeKind::TypeElement { ty } = cx.tree.kind(*ty) else {
            return false;
        };
        let constant_type = cx.context.types.primitive_of(ty).is_some() || cx.context.types.is_string(ty);
        let literal = matches!(
            cx.tree.kind(*initializer),
            NodeKind::Literal { kind, .. } if *kind != LiteralKind::Null
        );
        constant_type && literal
    }

    fn annotate_jvm_static(cx: &mut ConversionCx<'_>, method: NodeId) {
        let NodeKind::Method { annotations, .. } = *cx.tree.kind(method) else {
            return;
        };
        let fq_name = cx.intern(JVM_STATIC);
        let symbol = cx.multiverse_symbol(JVM_STATIC, SymbolKind::Class);
        let annotation = build::annotation(cx.tree, fq_name, symbol);
        cx.tree.push_child(annotations, annotation);
    }

    fn register(cx: &mut ConversionCx<'_>, member: NodeId, symbol: SymbolId, kind: SymbolKind, change: ExternalChange) {
        let Some(fq_name) = cx.symbols.fq_name(symbol) else {
            return;
        };
        let key = cx.origin_key(member);
        cx.context.external.register(fq_name, kind, key, change);
    }

    /// Drop `static` from a member now living in an object. Public methods
    /// get `@JvmStatic` for Java callers.
    fn make_member_of_object(cx: &mut ConversionCx<'_>, member: NodeId, interface_companion: bool) {
        let is_const = Self::is_const(cx, member);
        let (symbol, kind, public_method) = match cx.tree.kind_mut(member) {
            NodeKind::Initializer { is_static, .. } => {
                *is_static = false;
                return;
            }
            NodeKind::Field {
                modifiers, symbol, ..
            } => {
                modifiers.flags.remove(ModifierFlags::STATIC);
                if is_const {
                    modifiers.flags.insert(ModifierFlags::CONST);
                }
                (*symbol, SymbolKind::Field, false)
            }
            NodeKind::Method {
                modifiers, symbol, ..
            } => {
                modifiers.flags.remove(ModifierFlags::STATIC);
                (*symbol, SymbolKind::Method, modifiers.visibility == Visibility::Public)
            }
            _ => return,
        };
        // Interface companions accept `@JvmStatic` from Kotlin 1.4 on.
        let jvm_static_allowed =
            !interface_companion || cx.settings().api_version >= ApiVersion::KOTLIN_1_4;
        if public_method && jvm_static_allowed {
            Self::annotate_jvm_static(cx, member);
            Self::register(cx, member, symbol, kind, ExternalChange::JvmStatic);
        }
    }

    fn to_object(cx: &mut ConversionCx<'_>, class: NodeId, body: NodeId) -> usize {
        let mut moved = 0;
        for member in cx.tree.list(body) {
            let kind = cx.tree.kind(member);
            if is_hiding_constructor(cx.tree, kind) {
                cx.tree.transfer_trivia(member, class);
                cx.tree.remove_child(body, member);
                cx.tree.invalidate(member);
            } else if is_static_member(kind) {
                Self::make_member_of_object(cx, member, false);
                moved += 1;
            }
        }
        if let NodeKind::Class {
            class_kind,
            modifiers,
            ..
        } = cx.tree.kind_mut(class)
        {
            *class_kind = ClassKind::Object;
            modifiers.modality = Modality::Unspecified;
            modifiers.flags.remove(ModifierFlags::EXPLICIT_MODALITY);
        }
        moved
    }

    fn new_companion(cx: &mut ConversionCx<'_>, class: NodeId, class_symbol: SymbolId, class_name: Name) -> NodeId {
        let name = cx.intern("Companion");
        let annotations = build::annotation_list(cx.tree, Vec::new());
        let body = cx.tree.alloc(NodeKind::ClassBody {
            members: Vec::new(),
        });
        let companion = cx.tree.alloc(NodeKind::Class {
            name,
            class_kind: ClassKind::Companion,
            modifiers: Modifiers::default(),
            annotations,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            primary: Vec::new(),
            body,
            symbol: SymbolId::NONE,
        });
        let outer = cx.symbols.fq_name(class_symbol).unwrap_or(class_name);
        let fq_name = cx.intern(&format!("{}.Companion", cx.lookup(outer)));
        let symbol = cx.symbols.declare(companion, SymbolKind::Class, name, fq_name);
        if let Some(slot) = cx.tree.kind_mut(companion).symbol_mut() {
            *slot = symbol;
        }
        if let Some(origin) = cx.tree.origin(class) {
            cx.tree.set_origin(companion, Some(Origin::new(origin.span, None)));
        }
        companion
    }

    fn to_companion(cx: &mut ConversionCx<'_>, class: NodeId, body: NodeId, existing: Option<NodeId>) -> usize {
        let NodeKind::Class {
            name,
            class_kind,
            symbol,
            ..
        } = *cx.tree.kind(class)
        else {
            return 0;
        };
        let interface_companion = class_kind.is_interface_like();
        let statics: Vec<NodeId> = cx
            .tree
            .list(body)
            .into_iter()
            .filter(|&member| is_static_member(cx.tree.kind(member)))
            .collect();

        let companion = match existing {
            Some(companion) => companion,
            None => {
                let companion = Self::new_companion(cx, class, symbol, name);
                cx.tree.push_child(body, companion);
                companion
            }
        };
        let NodeKind::Class {
            body: companion_body,
            ..
        } = *cx.tree.kind(companion)
        else {
            return 0;
        };

        for &member in &statics {
            cx.tree.remove_child(body, member);
            cx.tree.push_child(companion_body, member);
            if let Some(member_symbol) = cx.tree.kind(member).symbol() {
                let kind = match cx.tree.kind(member) {
                    NodeKind::Field { .. } => SymbolKind::Field,
                    _ => SymbolKind::Method,
                };
                Self::register(cx, member, member_symbol, kind, ExternalChange::MovedToCompanion);
            }
            Self::make_member_of_object(cx, member, interface_companion);
        }
        statics.len()
    }

    fn convert(cx: &mut ConversionCx<'_>, class: NodeId) {
        let Some(target) = Self::target(cx, class) else {
            return;
        };
        let NodeKind::Class { name, body, .. } = *cx.tree.kind(class) else {
            return;
        };
        let class_name = cx.lookup(name);
        let (moved, message) = match target {
            Target::Object => (
                Self::to_object(cx, class, body),
                format!("class {class_name} has only static members and became an object"),
            ),
            Target::Companion(existing) => (
                Self::to_companion(cx, class, body, existing),
                format!("static members of {class_name} moved to a companion object"),
            ),
        };
        cx.record_change();
        tracing::debug!(class = class_name, members = moved, target = ?target, "static members relocated");
        cx.note(NoteCode::J3003, message, class);
    }
}

impl RecursiveConversion for StaticMembersToCompanionConversion {
    fn name(&self) -> &'static str {
        "static-members-to-companion"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        match cx.tree.kind_mut(id) {
            NodeKind::Class { modifiers, .. } => {
                // Nested classes are static by default in Kotlin.
                if modifiers.is_static() {
                    modifiers.flags.remove(ModifierFlags::STATIC);
                    cx.record_change();
                }
                Self::convert(cx, id);
                self.recurse(cx, id)
            }
            _ => self.recurse(cx, id),
        }
    }
}
