//! Running the registry over one unit.
//!
//! Each selected pass runs once over the whole tree, in registry order, and
//! the root it returns is the root the next pass sees. Between passes the
//! pipeline checks for cancellation and, in debug builds, validates the
//! tree. A panic inside a pass is caught and ends only this unit.

use std::panic::{catch_unwind, AssertUnwindSafe};

use j2k_diagnostic::{ConversionError, NoteCode, NoteSink};
use j2k_passes::{ConversionContext, ConversionCx, ConversionMode};
use j2k_types::SessionGate;

use crate::registry::{PassDescriptor, PASSES};
use crate::{CancellationToken, TranslationUnit, UnitOutcome, UnitStats};

/// The passes selected for one mode, in registry order.
#[derive(Clone, Debug)]
pub struct Pipeline {
    passes: Vec<PassDescriptor>,
}

impl Pipeline {
    pub fn new(mode: ConversionMode) -> Self {
        let passes = PASSES
            .iter()
            .filter(|descriptor| mode == ConversionMode::Full || descriptor.basic)
            .copied()
            .collect();
        Pipeline { passes }
    }

    /// Names of the selected passes, in order.
    pub fn pass_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|descriptor| descriptor.name)
    }

    /// Index of `name` in this pipeline, if selected.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.passes.iter().position(|descriptor| descriptor.name == name)
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Convert `unit`.
    pub fn run(
        &self,
        mut unit: TranslationUnit,
        context: &ConversionContext,
        cancel: &CancellationToken,
    ) -> Result<UnitOutcome, ConversionError> {
        let _unit_span = tracing::info_span!("unit", name = %unit.name).entered();
        let gate = SessionGate::new();
        let mut notes = NoteSink::new();
        let mut stats = UnitStats::default();

        for descriptor in &self.passes {
            if cancel.is_cancelled() {
                tracing::debug!(pass = descriptor.name, "cancelled");
                return Err(ConversionError::Cancelled {
                    pass: descriptor.name,
                });
            }
            let _pass_span = tracing::info_span!("pass", name = descriptor.name).entered();
            notes.enter_pass(descriptor.name);

            let root = unit.root;
            let result = catch_unwind(AssertUnwindSafe(|| {
                let mut pass = (descriptor.create)();
                let mut cx = ConversionCx::new(
                    &mut unit.tree,
                    &mut unit.symbols,
                    context,
                    &mut notes,
                    &gate,
                );
                let root = pass.run(&mut cx, root);
                (root, cx.changes())
            }));
            let (root, changes) = match result {
                Ok(done) => done,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!(pass = descriptor.name, %message, "pass panicked; unit dropped");
                    return Err(ConversionError::InvariantViolation {
                        pass: descriptor.name,
                        message,
                    });
                }
            };
            unit.root = root;
            stats.changes.push((descriptor.name, changes));
            if changes > 0 {
                tracing::debug!(pass = descriptor.name, changes, "pass done");
            }

            if cfg!(debug_assertions) {
                if let Err(error) = unit.tree.validate(unit.root) {
                    tracing::warn!(pass = descriptor.name, %error, "tree invalid after pass");
                    notes.note(
                        NoteCode::J9001,
                        format!("tree invalid after {}: {error}", descriptor.name),
                        None,
                    );
                }
            }
        }

        stats.analysis_sessions = gate.total_entered();
        Ok(UnitOutcome {
            unit,
            notes: notes.flush(),
            stats,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_owned()
    }
}

#[cfg(test)]
mod tests;
