//! Java modality to Kotlin modality.
//!
//! Java classes and methods are open unless declared `final`; Kotlin's are
//! final unless declared `open`. Every class and method leaves this pass
//! with a decided modality. `EXPLICIT_MODALITY` is set when the keyword
//! differs from the Kotlin default or was written in the source:
//!
//! - private methods are final, in interfaces too;
//! - an overriding method stays open only if something overrides it in
//!   turn, and is written `final override` otherwise;
//! - interface members and abstract declarations keep their modality;
//! - members of final classes, enums, records and objects are final;
//! - everything else is open if the settings say so or the oracle finds an
//!   inheritor, final otherwise.
//!
//! Methods the oracle reports as overriding get the `override` flag.

use j2k_ir::{ClassKind, Modality, ModifierFlags, Modifiers, NodeId, NodeKind};

use crate::{ConversionCx, RecursiveConversion};

pub struct ModalityConversion;

/// Modality Kotlin implies when none is written.
pub(crate) fn kotlin_default_modality(kind: &NodeKind, container: Option<ClassKind>) -> Modality {
    match kind {
        NodeKind::Class {
            class_kind: ClassKind::Interface | ClassKind::Annotation,
            ..
        } => Modality::Abstract,
        NodeKind::Method {
            modifiers, body, ..
        } => {
            if modifiers.is_private() {
                Modality::Final
            } else if container.is_some_and(ClassKind::is_interface_like) {
                if body.is_some() {
                    Modality::Open
                } else {
                    Modality::Abstract
                }
            } else if modifiers.is_override() {
                Modality::Open
            } else {
                Modality::Final
            }
        }
        _ => Modality::Final,
    }
}

/// `modifiers` with `modality` decided. A keyword written in the source
/// stays explicit; cleaning it up is left to the redundant-modifier pass.
fn with_modality(mut modifiers: Modifiers, modality: Modality, default: Modality) -> Modifiers {
    let written = modifiers.flags.contains(ModifierFlags::EXPLICIT_MODALITY)
        && modifiers.modality == modality;
    modifiers.modality = modality;
    modifiers
        .flags
        .set(ModifierFlags::EXPLICIT_MODALITY, written || modality != default);
    modifiers
}

impl ModalityConversion {
    fn class_modality(cx: &ConversionCx<'_>, class: NodeId) -> Option<Modality> {
        let NodeKind::Class {
            class_kind,
            modifiers,
            ..
        } = cx.tree.kind(class)
        else {
            return None;
        };
        if *class_kind != ClassKind::Class {
            return None;
        }
        Some(match modifiers.modality {
            Modality::Abstract | Modality::Sealed | Modality::Final | Modality::Open => {
                modifiers.modality
            }
            Modality::Unspecified => {
                if cx.settings().open_by_default
                    || cx.analysis().has_inheritors(cx.origin_key(class))
                {
                    Modality::Open
                } else {
                    Modality::Final
                }
            }
        })
    }

    fn method_modality(
        cx: &ConversionCx<'_>,
        method: NodeId,
        container: ClassKind,
        container_modality: Modality,
        is_override: bool,
    ) -> Option<Modality> {
        let modifiers = cx.tree.kind(method).modifiers()?;
        if modifiers.is_private() {
            return Some(Modality::Final);
        }
        if container.is_interface_like() || modifiers.modality == Modality::Abstract {
            return None;
        }
        let closed = container.is_closed() || container_modality == Modality::Final;
        let key = cx.origin_key(method);
        let modality = if modifiers.modality == Modality::Final || closed {
            Modality::Final
        } else if is_override {
            if cx.analysis().is_overridden(key) {
                Modality::Open
            } else {
                Modality::Final
            }
        } else if modifiers.modality == Modality::Open
            || cx.settings().open_by_default
            || cx.analysis().is_overridden(key)
        {
            Modality::Open
        } else {
            Modality::Final
        };
        Some(modality)
    }

    fn update(cx: &mut ConversionCx<'_>, id: NodeId, modifiers: Modifiers) {
        let Some(slot) = cx.tree.kind_mut(id).modifiers_mut() else {
            return;
        };
        if *slot != modifiers {
            *slot = modifiers;
            cx.record_change();
        }
    }

    fn convert_class(cx: &mut ConversionCx<'_>, class: NodeId) {
        let NodeKind::Class {
            class_kind, body, ..
        } = *cx.tree.kind(class)
        else {
            return;
        };
        if let Some(modality) = Self::class_modality(cx, class) {
            let kind = cx.tree.kind(class);
            let default = kotlin_default_modality(kind, None);
            if let Some(modifiers) = kind.modifiers() {
                Self::update(cx, class, with_modality(modifiers, modality, default));
            }
        }
        let class_modality = cx
            .tree
            .kind(class)
            .modifiers()
            .map_or(Modality::Unspecified, |m| m.modality);

        for member in cx.tree.list(body) {
            let Some(mut modifiers) = (match cx.tree.kind(member) {
                NodeKind::Method { modifiers, .. } => Some(*modifiers),
                _ => None,
            }) else {
                continue;
            };
            let is_override =
                modifiers.is_override() || cx.analysis().is_override(cx.origin_key(member));
            modifiers.flags.set(ModifierFlags::OVERRIDE, is_override);
            Self::update(cx, member, modifiers);

            let Some(modality) =
                Self::method_modality(cx, member, class_kind, class_modality, is_override)
            else {
                continue;
            };
            let default = kotlin_default_modality(cx.tree.kind(member), Some(class_kind));
            Self::update(cx, member, with_modality(modifiers, modality, default));
        }
    }
}

impl RecursiveConversion for ModalityConversion {
    fn name(&self) -> &'static str {
        "modality"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        if let NodeKind::Class { .. } = cx.tree.kind(id) {
            let before = cx.changes();
            Self::convert_class(cx, id);
            if cx.changes() > before {
                tracing::trace!(class = ?id, "modality decided");
            }
        }
        self.recurse(cx, id)
    }
}
