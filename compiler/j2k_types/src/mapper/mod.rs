//! Java → Kotlin type mapping.
//!
//! Mapping is idempotent: Kotlin types, type parameters and classes with no
//! Kotlin counterpart come back unchanged (their arguments still mapped).

use j2k_ir::{ClassType, JkType, Nullability, PrimitiveType, StringInterner};

use crate::{SymbolTable, TypeFactory};

/// Java platform classes with a Kotlin builtin or collection counterpart.
const CLASS_MAPPINGS: &[(&str, &str)] = &[
    ("java.lang.Object", "kotlin.Any"),
    ("java.lang.String", "kotlin.String"),
    ("java.lang.CharSequence", "kotlin.CharSequence"),
    ("java.lang.Number", "kotlin.Number"),
    ("java.lang.Throwable", "kotlin.Throwable"),
    ("java.lang.Comparable", "kotlin.Comparable"),
    ("java.lang.Enum", "kotlin.Enum"),
    ("java.lang.Cloneable", "kotlin.Cloneable"),
    ("java.lang.annotation.Annotation", "kotlin.Annotation"),
    ("java.lang.Iterable", "kotlin.collections.MutableIterable"),
    ("java.util.Iterator", "kotlin.collections.MutableIterator"),
    ("java.util.ListIterator", "kotlin.collections.MutableListIterator"),
    ("java.util.Collection", "kotlin.collections.MutableCollection"),
    ("java.util.List", "kotlin.collections.MutableList"),
    ("java.util.Set", "kotlin.collections.MutableSet"),
    ("java.util.Map", "kotlin.collections.MutableMap"),
    ("java.util.Map.Entry", "kotlin.collections.MutableMap.MutableEntry"),
    ("java.util.ArrayList", "kotlin.collections.ArrayList"),
    ("java.util.HashMap", "kotlin.collections.HashMap"),
    ("java.util.HashSet", "kotlin.collections.HashSet"),
    ("java.util.LinkedHashMap", "kotlin.collections.LinkedHashMap"),
    ("java.util.LinkedHashSet", "kotlin.collections.LinkedHashSet"),
];

/// Boxed Java primitives.
const BOXED: &[(&str, PrimitiveType)] = &[
    ("java.lang.Boolean", PrimitiveType::Boolean),
    ("java.lang.Byte", PrimitiveType::Byte),
    ("java.lang.Short", PrimitiveType::Short),
    ("java.lang.Character", PrimitiveType::Char),
    ("java.lang.Integer", PrimitiveType::Int),
    ("java.lang.Long", PrimitiveType::Long),
    ("java.lang.Float", PrimitiveType::Float),
    ("java.lang.Double", PrimitiveType::Double),
];

pub struct TypeMapper<'a> {
    factory: &'a TypeFactory,
    interner: &'a StringInterner,
}

impl<'a> TypeMapper<'a> {
    pub fn new(factory: &'a TypeFactory, interner: &'a StringInterner) -> Self {
        TypeMapper { factory, interner }
    }

    /// Primitive a boxed Java class wraps (`java.lang.Integer` → `int`).
    pub fn unboxed(&self, fq_name: &str) -> Option<PrimitiveType> {
        BOXED
            .iter()
            .find(|(boxed, _)| *boxed == fq_name)
            .map(|(_, p)| *p)
    }

    /// Kotlin class a Java platform class maps to.
    pub fn kotlin_class(fq_name: &str) -> Option<&'static str> {
        CLASS_MAPPINGS
            .iter()
            .find(|(java, _)| *java == fq_name)
            .map(|(_, kotlin)| *kotlin)
    }

    pub fn map(&self, symbols: &mut SymbolTable, ty: &JkType) -> JkType {
        match ty {
            JkType::Primitive(p) => self.factory.primitive(symbols, *p),
            JkType::Class(class) => self.map_class(symbols, class),
            JkType::Array {
                element,
                nullability,
            } => {
                let element = match element.as_ref() {
                    JkType::Primitive(p) => JkType::Primitive(*p),
                    other => self.map(symbols, other),
                };
                self.factory.array_of(symbols, element, *nullability)
            }
            JkType::Wildcard { variance, bound } => JkType::Wildcard {
                variance: *variance,
                bound: bound.as_ref().map(|b| Box::new(self.map(symbols, b))),
            },
            JkType::TypeParameter { .. } | JkType::Star | JkType::NoType | JkType::Unit => {
                ty.clone()
            }
        }
    }

    fn map_class(&self, symbols: &mut SymbolTable, class: &ClassType) -> JkType {
        let fq = self.interner.lookup(class.fq_name);
        let args: Vec<JkType> = class.args.iter().map(|arg| self.map(symbols, arg)).collect();

        if let Some(p) = self.unboxed(fq) {
            // A boxed value may hold null; keep whatever nullability is known.
            return self
                .factory
                .class(symbols, p.kotlin_fq_name(), Vec::new(), class.nullability);
        }
        if let Some(kotlin) = Self::kotlin_class(fq) {
            return self.factory.class(symbols, kotlin, args, class.nullability);
        }
        if fq.starts_with("java.") {
            tracing::trace!(class = fq, "no Kotlin counterpart; kept as a Java class");
        }
        JkType::Class(ClassType {
            fq_name: class.fq_name,
            symbol: class.symbol,
            args,
            nullability: class.nullability,
        })
    }

    /// Map a boxed or primitive type to its non-null Kotlin primitive when
    /// the value is known not to be null.
    pub fn map_not_null(&self, symbols: &mut SymbolTable, ty: &JkType) -> JkType {
        let mapped = self.map(symbols, ty);
        match mapped.nullability() {
            Nullability::Nullable => mapped,
            _ if self.factory.primitive_of(&mapped).is_some() => {
                mapped.with_nullability(Nullability::NotNull)
            }
            _ => mapped,
        }
    }
}
