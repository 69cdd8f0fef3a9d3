//! J2K driver: the ordered pass pipeline and the per-run entry points.
//!
//! A host parses Java into a [`TranslationUnit`] (tree, root, symbols),
//! builds one [`ConversionContext`] for the run, and calls
//! [`translate_all`]. Each unit goes through the [`Pipeline`] on its own
//! thread; a unit that breaks a tree invariant fails alone.
//!
//! Enable logging with `RUST_LOG=j2kc=debug` (or `j2k_passes=trace` for
//! every rewrite). Set `J2K_TRACE_TREE=1` for indented span output.

mod cancel;
mod parallel;
mod pipeline;
mod registry;
mod unit;

use std::sync::Once;

pub use cancel::CancellationToken;
pub use j2k_passes::{ConversionContext, ConversionMode, ConverterSettings};
pub use parallel::translate_all;
pub use pipeline::Pipeline;
pub use registry::{PassDescriptor, PASSES};
pub use unit::{TranslationUnit, UnitOutcome, UnitStats};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("J2K_TRACE_TREE").is_some() {
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(tree).with(filter).init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
