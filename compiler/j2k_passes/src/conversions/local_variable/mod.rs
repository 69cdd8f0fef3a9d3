//! `val` or `var` for local variables, and whether their type is written.
//!
//! A local nothing reassigns becomes `val`; the tree records that as
//! `Modality::Final`. Writes are looked for in the enclosing block and, for
//! locals the front-end keyed, asked of the oracle as well.
//!
//! The type annotation is dropped when the initializer alone gives Kotlin
//! the declared type, unless the settings ask for every local to be
//! annotated. A nullable declaration keeps its annotation: inference would
//! make it non-null.

use j2k_ir::{JkType, LiteralKind, Modality, Nullability, NodeId, NodeKind};

use super::util::writes;
use crate::{ConversionCx, RecursiveConversion};

pub struct LocalVariableTypeConversion;

impl LocalVariableTypeConversion {
    fn is_written(cx: &ConversionCx<'_>, local: NodeId, scope: NodeId) -> bool {
        let Some(symbol) = cx.tree.kind(local).symbol() else {
            return true;
        };
        if writes(cx.tree, scope, symbol) {
            return true;
        }
        // Without a key the oracle would answer "written" for every local.
        cx.origin_key(local)
            .is_some_and(|key| cx.analysis().has_write_usages(Some(key)))
    }

    /// Whether `initializer` infers to exactly `declared`.
    fn infers_declared(cx: &mut ConversionCx<'_>, initializer: NodeId, declared: &JkType) -> bool {
        if declared.nullability() == Nullability::Nullable
            || matches!(
                cx.tree.kind(initializer),
                NodeKind::Literal {
                    kind: LiteralKind::Null,
                    ..
                }
            )
        {
            return false;
        }
        let Some(inferred) = cx.type_of(initializer) else {
            return false;
        };
        let types = &cx.context.types;
        match (types.primitive_of(declared), types.primitive_of(&inferred)) {
            (Some(declared), Some(inferred)) => declared == inferred,
            (None, None) => {
                declared.same_identity(&inferred)
                    || (types.is_string(declared) && types.is_string(&inferred))
            }
            _ => false,
        }
    }

    fn convert(cx: &mut ConversionCx<'_>, local: NodeId, scope: NodeId) {
        let NodeKind::LocalVariable {
            modifiers,
            ty,
            initializer,
            explicit_type,
            ..
        } = *cx.tree.kind(local)
        else {
            return;
        };

        let make_val = modifiers.modality != Modality::Final && !Self::is_written(cx, local, scope);

        let drop_type = explicit_type
            && !cx.settings().always_annotate_local_types
            && initializer.is_some_and(|init| {
                let NodeKind::TypeElement { ty: declared } = cx.tree.kind(ty) else {
                    return false;
                };
                let declared = declared.clone();
                Self::infers_declared(cx, init, &declared)
            });

        if !make_val && !drop_type {
            return;
        }
        if let NodeKind::LocalVariable {
            modifiers,
            explicit_type,
            ..
        } = cx.tree.kind_mut(local)
        {
            if make_val {
                modifiers.modality = Modality::Final;
            }
            if drop_type {
                *explicit_type = false;
            }
        }
        cx.record_change();
        tracing::trace!(local = ?local, make_val, drop_type, "local variable declaration settled");
    }
}

impl RecursiveConversion for LocalVariableTypeConversion {
    fn name(&self) -> &'static str {
        "local-variable-type"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        if let NodeKind::DeclarationStatement { .. } = cx.tree.kind(id) {
            let scope = cx.tree.parent(id).unwrap_or(id);
            for declaration in cx.tree.list(id) {
                if let NodeKind::LocalVariable { .. } = cx.tree.kind(declaration) {
                    Self::convert(cx, declaration, scope);
                }
            }
        }
        self.recurse(cx, id)
    }
}
