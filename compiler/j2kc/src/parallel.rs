use rayon::prelude::*;

use j2k_diagnostic::ConversionError;
use j2k_passes::ConversionContext;

use crate::{CancellationToken, Pipeline, TranslationUnit, UnitOutcome};

/// Convert independent units in parallel.
///
/// Every unit gets its own copy of `context`; the copies share the
/// multiverse, the external-code record and the oracle. Results come back
/// in input order. Units that had not started when `cancel` fired report
/// [`ConversionError::Cancelled`].
pub fn translate_all(
    units: Vec<TranslationUnit>,
    context: &ConversionContext,
    cancel: &CancellationToken,
) -> Vec<Result<UnitOutcome, ConversionError>> {
    let pipeline = Pipeline::new(context.settings.mode);
    tracing::info!(units = units.len(), passes = pipeline.len(), "translating");
    units
        .into_par_iter()
        .map(|unit| {
            let context = context.clone();
            pipeline.run(unit, &context, cancel)
        })
        .collect()
}
