//! Java visibility to Kotlin visibility.
//!
//! Kotlin has no package-private visibility; the closest is `internal`.
//! Declarations where Java implies a visibility get the Kotlin one that
//! matches it without a keyword: interface members are public, enum
//! constructors private, local classes carry none. `EXPLICIT_VISIBILITY`
//! is set when `internal` replaces package-private.

use j2k_ir::{ClassKind, ModifierFlags, NodeId, NodeKind, Visibility};

use super::util::container_class;
use crate::{ConversionCx, RecursiveConversion};

pub struct VisibilityConversion;

/// Where a declaration sits, as far as implied visibility goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Place {
    Member(ClassKind),
    TopLevel,
    Local,
}

fn place(cx: &ConversionCx<'_>, id: NodeId) -> Place {
    if let Some(class) = container_class(cx.tree, id) {
        if let NodeKind::Class { class_kind, .. } = cx.tree.kind(class) {
            return Place::Member(*class_kind);
        }
    }
    match cx.tree.parent(id).map(|parent| cx.tree.kind(parent)) {
        None | Some(NodeKind::File { .. }) => Place::TopLevel,
        Some(_) => Place::Local,
    }
}

impl VisibilityConversion {
    fn decide(kind: &NodeKind, place: Place) -> Option<(Visibility, bool)> {
        let modifiers = kind.modifiers()?;
        if modifiers.visibility != Visibility::PackagePrivate {
            return None;
        }
        Some(match (place, kind) {
            (Place::Member(container), _) if container.is_interface_like() => {
                (Visibility::Public, false)
            }
            (Place::Member(ClassKind::Enum), NodeKind::Constructor { .. }) => {
                (Visibility::Private, false)
            }
            (Place::Local, NodeKind::Class { .. }) => (Visibility::Public, false),
            _ => (Visibility::Internal, true),
        })
    }
}

impl RecursiveConversion for VisibilityConversion {
    fn name(&self) -> &'static str {
        "visibility"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let applies = matches!(
            cx.tree.kind(id),
            NodeKind::Class { .. }
                | NodeKind::Method { .. }
                | NodeKind::Constructor { .. }
                | NodeKind::Field { .. }
                | NodeKind::Property { .. }
        );
        if applies {
            let place = place(cx, id);
            if let Some((visibility, explicit)) = Self::decide(cx.tree.kind(id), place) {
                if let Some(modifiers) = cx.tree.kind_mut(id).modifiers_mut() {
                    modifiers.visibility = visibility;
                    modifiers
                        .flags
                        .set(ModifierFlags::EXPLICIT_VISIBILITY, explicit);
                }
                cx.record_change();
                tracing::trace!(node = ?id, ?visibility, "package-private visibility replaced");
            }
        }
        self.recurse(cx, id)
    }
}
