use std::fmt;

use j2k_ir::Span;

use crate::NoteCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NoteSeverity {
    Info,
    Warning,
}

/// What a pass recorded about one node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConversionNote {
    pub code: NoteCode,
    pub message: String,
    /// Source span of the node the note is about, when it has one.
    pub span: Option<Span>,
    /// Name of the pass that emitted the note.
    pub pass: &'static str,
}

impl ConversionNote {
    pub fn new(code: NoteCode, message: impl Into<String>) -> Self {
        ConversionNote {
            code,
            message: message.into(),
            span: None,
            pass: "",
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    pub fn severity(&self) -> NoteSeverity {
        if self.code.is_warning() {
            NoteSeverity::Warning
        } else {
            NoteSeverity::Info
        }
    }
}

impl fmt::Display for ConversionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        if !self.pass.is_empty() {
            write!(f, " ({})", self.pass)?;
        }
        Ok(())
    }
}
