//! Kotlin type construction.

use j2k_ir::{ClassType, JkType, Nullability, PrimitiveType, SharedInterner};

use crate::{SymbolKind, SymbolTable};

/// Builds Kotlin types, binding their class symbols in the unit's table.
#[derive(Clone)]
pub struct TypeFactory {
    interner: SharedInterner,
}

impl TypeFactory {
    pub fn new(interner: SharedInterner) -> Self {
        TypeFactory { interner }
    }

    pub fn class(
        &self,
        symbols: &mut SymbolTable,
        fq_name: &str,
        args: Vec<JkType>,
        nullability: Nullability,
    ) -> JkType {
        let fq_name = self.interner.intern(fq_name);
        let symbol = symbols.multiverse(fq_name, SymbolKind::Class, None);
        JkType::Class(ClassType {
            fq_name,
            symbol,
            args,
            nullability,
        })
    }

    fn builtin(&self, symbols: &mut SymbolTable, fq_name: &str) -> JkType {
        self.class(symbols, fq_name, Vec::new(), Nullability::NotNull)
    }

    /// Kotlin class for a Java primitive, not null.
    pub fn primitive(&self, symbols: &mut SymbolTable, primitive: PrimitiveType) -> JkType {
        self.builtin(symbols, primitive.kotlin_fq_name())
    }

    pub fn int(&self, symbols: &mut SymbolTable) -> JkType {
        self.primitive(symbols, PrimitiveType::Int)
    }

    pub fn long(&self, symbols: &mut SymbolTable) -> JkType {
        self.primitive(symbols, PrimitiveType::Long)
    }

    pub fn double(&self, symbols: &mut SymbolTable) -> JkType {
        self.primitive(symbols, PrimitiveType::Double)
    }

    pub fn boolean(&self, symbols: &mut SymbolTable) -> JkType {
        self.primitive(symbols, PrimitiveType::Boolean)
    }

    pub fn char(&self, symbols: &mut SymbolTable) -> JkType {
        self.primitive(symbols, PrimitiveType::Char)
    }

    pub fn string(&self, symbols: &mut SymbolTable) -> JkType {
        self.builtin(symbols, "kotlin.String")
    }

    pub fn any(&self, symbols: &mut SymbolTable) -> JkType {
        self.builtin(symbols, "kotlin.Any")
    }

    pub fn unit(&self) -> JkType {
        JkType::Unit
    }

    pub fn nullable(&self, ty: JkType) -> JkType {
        ty.with_nullability(Nullability::Nullable)
    }

    pub fn not_null(&self, ty: JkType) -> JkType {
        ty.with_nullability(Nullability::NotNull)
    }

    /// `IntArray` for primitive elements, `Array<T>` otherwise.
    pub fn array_of(&self, symbols: &mut SymbolTable, element: JkType, nullability: Nullability) -> JkType {
        match element {
            JkType::Primitive(p) => {
                self.class(symbols, p.kotlin_array_fq_name(), Vec::new(), nullability)
            }
            other => self.class(symbols, "kotlin.Array", vec![other], nullability),
        }
    }

    /// Kotlin primitive a type stands for: a Java primitive or one of the
    /// `kotlin.Int`-style classes.
    pub fn primitive_of(&self, ty: &JkType) -> Option<PrimitiveType> {
        match ty {
            JkType::Primitive(p) => Some(*p),
            JkType::Class(class) => {
                PrimitiveType::from_kotlin_fq_name(self.interner.lookup(class.fq_name))
            }
            _ => None,
        }
    }

    pub fn is_string(&self, ty: &JkType) -> bool {
        ty.as_class().is_some_and(|class| {
            matches!(
                self.interner.lookup(class.fq_name),
                "kotlin.String" | "java.lang.String"
            )
        })
    }
}
