//! Java types to Kotlin types.
//!
//! Every `TypeElement` goes through [`TypeMapper`]: primitives become
//! `kotlin.Int` and friends, primitive arrays `IntArray`, boxed classes
//! their Kotlin primitive with the nullability already decided, platform
//! classes (`java.util.List`) their Kotlin counterpart. Mapping is
//! idempotent, so nodes that already hold Kotlin types are left untouched
//! and not counted.

use j2k_ir::{NodeId, NodeKind};
use j2k_types::TypeMapper;

use crate::{ConversionCx, RecursiveConversion};

pub struct TypeMappingConversion;

impl RecursiveConversion for TypeMappingConversion {
    fn name(&self) -> &'static str {
        "type-mapping"
    }

    fn apply_to_element(&mut self, cx: &mut ConversionCx<'_>, id: NodeId) -> NodeId {
        let NodeKind::TypeElement { ty } = cx.tree.kind(id) else {
            return self.recurse(cx, id);
        };
        let context = cx.context;
        let mapper = TypeMapper::new(&context.types, &context.interner);
        let mapped = mapper.map(cx.symbols, ty);
        if mapped == *ty {
            return id;
        }
        tracing::trace!(
            from = %j2k_ir::dump::render_type(ty, &context.interner),
            to = %j2k_ir::dump::render_type(&mapped, &context.interner),
            "type mapped"
        );
        if let NodeKind::TypeElement { ty } = cx.tree.kind_mut(id) {
            *ty = mapped;
        }
        cx.record_change();
        id
    }
}
