//! Comments and line breaks carried by nodes.
//!
//! The printer reproduces comment placement and blank lines from these
//! fields, so a pass that replaces a node must move the old node's trivia to
//! the replacement (see [`Tree::transfer_trivia`](crate::Tree::transfer_trivia)).

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `/** ... */`
    Doc,
}

/// A source comment, stored with its delimiters.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Comment {
    pub text: String,
    pub kind: CommentKind,
}

impl Comment {
    pub fn new(text: impl Into<String>, kind: CommentKind) -> Self {
        Comment {
            text: text.into(),
            kind,
        }
    }

    pub fn line(text: impl Into<String>) -> Self {
        Self::new(text, CommentKind::Line)
    }

    pub fn block(text: impl Into<String>) -> Self {
        Self::new(text, CommentKind::Block)
    }
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Trivia {
    pub comments_before: Vec<Comment>,
    pub comments_after: Vec<Comment>,
    pub line_breaks_before: u32,
    pub line_breaks_after: u32,
}

impl Trivia {
    pub fn is_empty(&self) -> bool {
        self.comments_before.is_empty()
            && self.comments_after.is_empty()
            && self.line_breaks_before == 0
            && self.line_breaks_after == 0
    }

    pub fn comment_count(&self) -> usize {
        self.comments_before.len() + self.comments_after.len()
    }

    /// Merge `outer` around this trivia: `outer`'s leading comments come
    /// first, its trailing comments last. Line breaks keep the larger count.
    pub fn absorb(&mut self, outer: Trivia) {
        let Trivia {
            mut comments_before,
            comments_after,
            line_breaks_before,
            line_breaks_after,
        } = outer;
        comments_before.append(&mut self.comments_before);
        self.comments_before = comments_before;
        self.comments_after.extend(comments_after);
        self.line_breaks_before = self.line_breaks_before.max(line_breaks_before);
        self.line_breaks_after = self.line_breaks_after.max(line_breaks_after);
    }
}
