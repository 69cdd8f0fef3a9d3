//! Drop modifier keywords that only restate the Kotlin default.
//!
//! `public` goes when the settings treat declarations as public by default.
//! A modality keyword goes when it equals what Kotlin implies for the
//! declaration where it sits: `final` on a class or plain method,
//! `abstract` on an interface, `open` on an override.

use j2k_ir::{ModifierFlags, Modifiers, NodeId, NodeKind, Visibility};

use super::modality::kotlin_default_modality;
use super::util::container_class;
use crate::{ConversionCx, RecursiveConversion};

pub struct RedundantModifiersConversion;

impl RedundantModifiersConversion {
    fn cleaned(cx: &ConversionCx<'_>, id: NodeId, mut modifiers: Modifiers) -> Modifiers {
        if modifiers.visibility == Visibility::Public && cx.settings().public_by_default {
            modifiers.flags.remove(ModifierFlags::EXPLICIT_VISIBILITY);
        }
        let kind = cx.tree.kind(id);
        if matches!(kind, NodeKind::Class { .. } | NodeKind::Method { .. }) {
            let container = container_class(cx.tree, id).and_then(|class| match cx.tree.kind(class) {
                NodeKind::Class { class_kind, .. } => Some(*class_kind),
                _ => None,
            });
            if modifiers.modality == kotlin_default_modality(kind, container) {
                modifiers.flags.remove(ModifierFlags::EXPLICIT_MODALITY);
            }
        }
        modifiers
    }
}

impl RecursiveConversion for RedundantModifiersConversion {
    fn name(&self) -> &'static str {
        "redundant-modifiers"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let declaration = matches!(
            cx.tree.kind(id),
            NodeKind::Class { .. }
                | NodeKind::Method { .. }
                | NodeKind::Constructor { .. }
                | NodeKind::Field { .. }
                | NodeKind::Property { .. }
        );
        if let Some(modifiers) = cx.tree.kind(id).modifiers().filter(|_| declaration) {
            let cleaned = Self::cleaned(cx, id, modifiers);
            if cleaned != modifiers {
                if let Some(slot) = cx.tree.kind_mut(id).modifiers_mut() {
                    *slot = cleaned;
                }
                cx.record_change();
            }
        }
        self.recurse(cx, id)
    }
}
