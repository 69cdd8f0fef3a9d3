use j2k_ir::TreeError;

/// Why a translation unit produced no output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A pass broke a tree invariant (or panicked). Only this unit is lost.
    #[error("pass `{pass}` violated an invariant: {message}")]
    InvariantViolation { pass: &'static str, message: String },
    /// The host cancelled before `pass` could start.
    #[error("conversion cancelled before `{pass}`")]
    Cancelled { pass: &'static str },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ConversionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConversionError::Cancelled { .. })
    }
}
