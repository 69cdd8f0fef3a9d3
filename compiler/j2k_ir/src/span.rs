//! Source spans and origin back-links.

use std::fmt;

/// Byte range in the Java source file a node was built from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Opaque handle to an element of the front-end's native AST.
///
/// The engine never interprets it. The analysis oracle answers queries keyed
/// by it, and the external code processor uses it to find references in code
/// outside the converted scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct OriginKey(pub u64);

/// Back-link from a node to the source element it was converted from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Origin {
    pub span: Span,
    pub key: Option<OriginKey>,
}

impl Origin {
    pub const fn new(span: Span, key: Option<OriginKey>) -> Self {
        Origin { span, key }
    }

    pub const fn keyed(span: Span, key: OriginKey) -> Self {
        Origin {
            span,
            key: Some(key),
        }
    }
}
