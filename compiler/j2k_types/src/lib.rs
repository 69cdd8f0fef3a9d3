//! Symbol & type bridge.
//!
//! Resolves the symbols nodes refer to and maps Java types to Kotlin types.
//!
//! - [`SymbolTable`]: per-unit symbols. Universe symbols are declared in the
//!   converted code; multiverse symbols come from the shared, read-only
//!   [`Multiverse`]; unresolved symbols mark failed resolution.
//! - [`TypeFactory`] / [`TypeMapper`]: Kotlin type construction and the
//!   Java → Kotlin type mapping.
//! - [`ExternalCodeProcessor`]: append-only record of public declarations
//!   whose shape changed, shared by all units of a run.
//! - [`AnalysisOracle`]: the external static-analysis collaborator, queried
//!   through short-lived [`AnalysisSession`]s.

mod external;
mod factory;
mod mapper;
mod multiverse;
mod oracle;
mod symbol;
mod table;

pub use external::{ExternalChange, ExternalCodeProcessor, ExternalDeclaration};
pub use factory::TypeFactory;
pub use mapper::TypeMapper;
pub use multiverse::{Multiverse, MultiverseDecl};
pub use oracle::{
    Analysis, AnalysisOracle, AnalysisSession, NoAnalysis, SessionGate, StaticOracle,
};
pub use symbol::{MultiverseSymbol, Signature, Symbol, SymbolKind, UniverseSymbol};
pub use table::SymbolTable;
