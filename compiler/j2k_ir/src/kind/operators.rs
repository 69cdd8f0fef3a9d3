//! Operators and literal kinds.

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    /// Kotlin `?:`; introduced by conversions, never parsed.
    Elvis,
}

impl BinaryOp {
    /// Source token.
    pub const fn token(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Elvis => "?:",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    /// `a < b` ⇔ `b > a`.
    pub const fn flipped(self) -> BinaryOp {
        match self {
            BinaryOp::Lt => BinaryOp::Gt,
            BinaryOp::Le => BinaryOp::Ge,
            BinaryOp::Gt => BinaryOp::Lt,
            BinaryOp::Ge => BinaryOp::Le,
            other => other,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrefixOp {
    Plus,
    Minus,
    Not,
    BitNot,
    Inc,
    Dec,
}

impl PrefixOp {
    pub const fn token(self) -> &'static str {
        match self {
            PrefixOp::Plus => "+",
            PrefixOp::Minus => "-",
            PrefixOp::Not => "!",
            PrefixOp::BitNot => "~",
            PrefixOp::Inc => "++",
            PrefixOp::Dec => "--",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PostfixOp {
    Inc,
    Dec,
    /// Kotlin `!!`.
    NotNull,
}

impl PostfixOp {
    pub const fn token(self) -> &'static str {
        match self {
            PostfixOp::Inc => "++",
            PostfixOp::Dec => "--",
            PostfixOp::NotNull => "!!",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

impl AssignOp {
    pub const fn token(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::UShr => ">>>=",
        }
    }
}

/// Kotlin range operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RangeKind {
    /// `a..b`
    Inclusive,
    /// `a until b`
    Until,
    /// `a downTo b`
    DownTo,
}

impl RangeKind {
    pub const fn token(self) -> &'static str {
        match self {
            RangeKind::Inclusive => "..",
            RangeKind::Until => "until",
            RangeKind::DownTo => "downTo",
        }
    }
}

/// Lexical category of a literal. The literal text is kept verbatim.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    /// Java `"""` text block.
    TextBlock,
    Boolean,
    Null,
}

/// Target of an explicit constructor call (`this(..)` / `super(..)`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DelegationTarget {
    This,
    Super,
}
