//! Conversion notes and errors.
//!
//! Passes never fail on constructs they cannot convert. They leave a marker
//! in the tree and push a [`ConversionNote`] into the unit's [`NoteSink`];
//! the host decides how to surface notes. [`ConversionError`] is reserved
//! for what ends a unit: a broken tree invariant or cancellation.

mod error;
mod note;
mod note_code;
pub mod sink;

pub use error::ConversionError;
pub use note::{ConversionNote, NoteSeverity};
pub use note_code::NoteCode;
pub use sink::NoteSink;
