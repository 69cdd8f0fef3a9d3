//! Type values.
//!
//! `JkType` describes both the Java types a front-end produces and the
//! Kotlin types the type-mapping pass rewrites them into. Types are plain
//! values: a `TypeElement` node owns one, and symbols carry them in their
//! signatures. Nullability is a field of the type, not part of its identity,
//! so passes can update it without rebuilding the type.

use crate::{Name, SymbolId};

/// Java primitive types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    /// Java keyword spelling.
    pub const fn java_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Fully-qualified Kotlin class this primitive maps to.
    pub const fn kotlin_fq_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "kotlin.Boolean",
            PrimitiveType::Byte => "kotlin.Byte",
            PrimitiveType::Short => "kotlin.Short",
            PrimitiveType::Char => "kotlin.Char",
            PrimitiveType::Int => "kotlin.Int",
            PrimitiveType::Long => "kotlin.Long",
            PrimitiveType::Float => "kotlin.Float",
            PrimitiveType::Double => "kotlin.Double",
        }
    }

    /// Kotlin primitive array class (`int[]` → `kotlin.IntArray`).
    pub const fn kotlin_array_fq_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "kotlin.BooleanArray",
            PrimitiveType::Byte => "kotlin.ByteArray",
            PrimitiveType::Short => "kotlin.ShortArray",
            PrimitiveType::Char => "kotlin.CharArray",
            PrimitiveType::Int => "kotlin.IntArray",
            PrimitiveType::Long => "kotlin.LongArray",
            PrimitiveType::Float => "kotlin.FloatArray",
            PrimitiveType::Double => "kotlin.DoubleArray",
        }
    }

    /// Inverse of [`kotlin_fq_name`](Self::kotlin_fq_name).
    pub fn from_kotlin_fq_name(fq: &str) -> Option<Self> {
        Some(match fq {
            "kotlin.Boolean" => PrimitiveType::Boolean,
            "kotlin.Byte" => PrimitiveType::Byte,
            "kotlin.Short" => PrimitiveType::Short,
            "kotlin.Char" => PrimitiveType::Char,
            "kotlin.Int" => PrimitiveType::Int,
            "kotlin.Long" => PrimitiveType::Long,
            "kotlin.Float" => PrimitiveType::Float,
            "kotlin.Double" => PrimitiveType::Double,
            _ => return None,
        })
    }

    /// Numeric widening rank (`byte < short < int < long < float < double`).
    /// `None` for `boolean` and `char`.
    pub const fn numeric_rank(self) -> Option<u8> {
        match self {
            PrimitiveType::Byte => Some(0),
            PrimitiveType::Short => Some(1),
            PrimitiveType::Int => Some(2),
            PrimitiveType::Long => Some(3),
            PrimitiveType::Float => Some(4),
            PrimitiveType::Double => Some(5),
            PrimitiveType::Boolean | PrimitiveType::Char => None,
        }
    }

    /// Default value a field of this type holds before assignment.
    pub const fn default_value(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "false",
            PrimitiveType::Char => "'\\u0000'",
            PrimitiveType::Long => "0L",
            PrimitiveType::Float => "0f",
            PrimitiveType::Double => "0.0",
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int => "0",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Nullability {
    Nullable,
    NotNull,
    /// Not yet decided. Java references start here.
    #[default]
    Default,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variance {
    /// `? extends T` / `out T`
    Out,
    /// `? super T` / `in T`
    In,
    /// Bare `?` with no bound.
    Invariant,
}

/// Reference to a class with type arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassType {
    pub fq_name: Name,
    pub symbol: SymbolId,
    pub args: Vec<JkType>,
    pub nullability: Nullability,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum JkType {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array {
        element: Box<JkType>,
        nullability: Nullability,
    },
    TypeParameter {
        name: Name,
        symbol: SymbolId,
        nullability: Nullability,
    },
    Wildcard {
        variance: Variance,
        bound: Option<Box<JkType>>,
    },
    /// Kotlin `*` projection.
    Star,
    /// Resolution failed upstream.
    NoType,
    /// Java `void` and Kotlin `Unit`.
    Unit,
}

impl JkType {
    pub fn class(fq_name: Name, symbol: SymbolId) -> Self {
        JkType::Class(ClassType {
            fq_name,
            symbol,
            args: Vec::new(),
            nullability: Nullability::Default,
        })
    }

    pub fn nullability(&self) -> Nullability {
        match self {
            JkType::Class(class) => class.nullability,
            JkType::Array { nullability, .. } | JkType::TypeParameter { nullability, .. } => {
                *nullability
            }
            JkType::Primitive(_) | JkType::Unit => Nullability::NotNull,
            JkType::Wildcard { .. } | JkType::Star | JkType::NoType => Nullability::Default,
        }
    }

    /// Same type with a different nullability. Types without a nullability
    /// slot are returned unchanged.
    #[must_use]
    pub fn with_nullability(mut self, value: Nullability) -> Self {
        match &mut self {
            JkType::Class(class) => class.nullability = value,
            JkType::Array { nullability, .. } | JkType::TypeParameter { nullability, .. } => {
                *nullability = value;
            }
            JkType::Primitive(_)
            | JkType::Unit
            | JkType::Wildcard { .. }
            | JkType::Star
            | JkType::NoType => {}
        }
        self
    }

    /// Identity comparison ignoring nullability at every level.
    pub fn same_identity(&self, other: &JkType) -> bool {
        match (self, other) {
            (JkType::Primitive(a), JkType::Primitive(b)) => a == b,
            (JkType::Class(a), JkType::Class(b)) => {
                a.fq_name == b.fq_name
                    && a.args.len() == b.args.len()
                    && a.args.iter().zip(&b.args).all(|(x, y)| x.same_identity(y))
            }
            (JkType::Array { element: a, .. }, JkType::Array { element: b, .. }) => {
                a.same_identity(b)
            }
            (JkType::TypeParameter { name: a, .. }, JkType::TypeParameter { name: b, .. }) => {
                a == b
            }
            (
                JkType::Wildcard {
                    variance: va,
                    bound: ba,
                },
                JkType::Wildcard {
                    variance: vb,
                    bound: bb,
                },
            ) => {
                va == vb
                    && match (ba, bb) {
                        (Some(a), Some(b)) => a.same_identity(b),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (JkType::Star, JkType::Star)
            | (JkType::NoType, JkType::NoType)
            | (JkType::Unit, JkType::Unit) => true,
            _ => false,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, JkType::NoType)
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            JkType::Class(class) => Some(class),
            _ => None,
        }
    }
}
