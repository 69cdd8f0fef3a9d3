//! Conversion contract and pass library.
//!
//! Every pass implements [`Conversion`]; most do so through
//! [`RecursiveConversion`], which walks the tree depth-first and lets the
//! pass substitute nodes as it goes. Passes share one [`ConversionContext`]
//! per run and one [`ConversionCx`] per unit.
//!
//! The passes themselves live in [`conversions`]. Their order is not decided
//! here; the pipeline owns it.

mod context;
mod conversion;
pub mod conversions;
mod expression_type;

#[cfg(test)]
mod testing;

pub use context::{ApiVersion, ConversionContext, ConversionMode, ConverterSettings, SettingsError};
pub use conversion::{
    Conversion, ConversionCx, RecursiveConversion, RecursiveConversionWithData, WithData,
};
