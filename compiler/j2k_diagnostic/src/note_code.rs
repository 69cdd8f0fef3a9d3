//! Note codes.

use std::fmt;

/// Codes for every note the engine emits.
///
/// Format: J#### where the first digit is the area:
/// - J0xxx: literals
/// - J1xxx: loops and control flow
/// - J2xxx: API mapping
/// - J3xxx: declarations
/// - J9xxx: internal
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NoteCode {
    // Literals (J0xxx)
    /// Integer literal does not fit its type after reinterpretation
    J0001,
    /// Numeric literal text could not be parsed
    J0002,
    /// Escape sequence has no Kotlin equivalent
    J0003,

    // Loops and control flow (J1xxx)
    /// Counted loop rewritten as a `while` loop
    J1001,
    /// Switch fall-through could not be expressed as a `when` branch
    J1002,

    // API mapping (J2xxx)
    /// Java API member replaced by its Kotlin counterpart
    J2001,
    /// Mapping skipped because the target API version is too old
    J2002,

    // Declarations (J3xxx)
    /// Overloads merged into one declaration with default arguments
    J3001,
    /// Overloads not merged because their declarations conflict
    J3002,
    /// Static members moved into a companion object
    J3003,
    /// Record converted to a data class
    J3004,
    /// Explicit initializer generated for a possibly unassigned field
    J3005,

    // Internal (J9xxx)
    /// Tree failed structural validation after a pass
    J9001,
    /// Construct left as an unsupported marker
    J9002,
    /// Unresolved symbol; dependent rewrite skipped
    J9003,
}

impl NoteCode {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteCode::J0001 => "J0001",
            NoteCode::J0002 => "J0002",
            NoteCode::J0003 => "J0003",
            NoteCode::J1001 => "J1001",
            NoteCode::J1002 => "J1002",
            NoteCode::J2001 => "J2001",
            NoteCode::J2002 => "J2002",
            NoteCode::J3001 => "J3001",
            NoteCode::J3002 => "J3002",
            NoteCode::J3003 => "J3003",
            NoteCode::J3004 => "J3004",
            NoteCode::J3005 => "J3005",
            NoteCode::J9001 => "J9001",
            NoteCode::J9002 => "J9002",
            NoteCode::J9003 => "J9003",
        }
    }

    /// Codes the host should show to the user. The rest are informational
    /// records of what a pass did.
    pub fn is_warning(self) -> bool {
        matches!(
            self,
            NoteCode::J0001
                | NoteCode::J0002
                | NoteCode::J0003
                | NoteCode::J1002
                | NoteCode::J9001
                | NoteCode::J9002
                | NoteCode::J9003
        )
    }

    pub fn is_internal(self) -> bool {
        self.as_str().starts_with("J9")
    }
}

impl fmt::Display for NoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown note code `{0}`")]
pub struct UnknownNoteCode(pub String);

impl std::str::FromStr for NoteCode {
    type Err = UnknownNoteCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: &[NoteCode] = &[
            NoteCode::J0001,
            NoteCode::J0002,
            NoteCode::J0003,
            NoteCode::J1001,
            NoteCode::J1002,
            NoteCode::J2001,
            NoteCode::J2002,
            NoteCode::J3001,
            NoteCode::J3002,
            NoteCode::J3003,
            NoteCode::J3004,
            NoteCode::J3005,
            NoteCode::J9001,
            NoteCode::J9002,
            NoteCode::J9003,
        ];
        ALL.iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownNoteCode(s.to_owned()))
    }
}
