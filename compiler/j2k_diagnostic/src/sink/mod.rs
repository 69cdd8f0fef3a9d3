//! Per-unit note collection.
//!
//! Passes revisit nodes (a pass recurses into its own output), so the same
//! note can be produced twice for one node. The sink drops exact repeats:
//! same code, same span, same message.

use std::hash::{BuildHasher, Hash, Hasher};

use rustc_hash::{FxBuildHasher, FxHashSet};

use j2k_ir::Span;

use crate::{ConversionNote, NoteCode, NoteSeverity};

#[derive(Debug, Default)]
pub struct NoteSink {
    notes: Vec<ConversionNote>,
    seen: FxHashSet<u64>,
    current_pass: &'static str,
    limit: Option<usize>,
    dropped: usize,
}

fn fingerprint(note: &ConversionNote) -> u64 {
    let mut hasher = FxBuildHasher.build_hasher();
    note.code.hash(&mut hasher);
    note.span.hash(&mut hasher);
    note.message.hash(&mut hasher);
    hasher.finish()
}

impl NoteSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` notes; later ones are counted, not stored.
    pub fn with_limit(limit: usize) -> Self {
        NoteSink {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Stamp notes pushed from now on with `pass`.
    pub fn enter_pass(&mut self, pass: &'static str) {
        self.current_pass = pass;
    }

    /// Record a note. Returns `false` if it repeated an earlier note or the
    /// limit was reached.
    pub fn push(&mut self, mut note: ConversionNote) -> bool {
        if note.pass.is_empty() {
            note.pass = self.current_pass;
        }
        if !self.seen.insert(fingerprint(&note)) {
            return false;
        }
        if self.limit.is_some_and(|limit| self.notes.len() >= limit) {
            self.dropped += 1;
            return false;
        }
        self.notes.push(note);
        true
    }

    pub fn note(&mut self, code: NoteCode, message: impl Into<String>, span: Option<Span>) -> bool {
        self.push(ConversionNote::new(code, message).with_span(span))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes rejected because the limit was reached.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn warning_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|note| note.severity() == NoteSeverity::Warning)
            .count()
    }

    pub fn has_code(&self, code: NoteCode) -> bool {
        self.notes.iter().any(|note| note.code == code)
    }

    pub fn peek(&self) -> impl Iterator<Item = &ConversionNote> {
        self.notes.iter()
    }

    /// Drop notes recorded after the first `len`. Used to discard the notes
    /// of a pass whose tree changes were rolled back.
    pub fn truncate(&mut self, len: usize) {
        for note in self.notes.drain(len.min(self.notes.len())..) {
            self.seen.remove(&fingerprint(&note));
        }
    }

    /// Take every note, in emission order.
    pub fn flush(&mut self) -> Vec<ConversionNote> {
        self.seen.clear();
        std::mem::take(&mut self.notes)
    }
}
