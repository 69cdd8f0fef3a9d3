//! J2K IR - the conversion tree shared by every pass.
//!
//! This crate contains the node model the conversion pipeline rewrites:
//! - Names for interned identifiers and fully-qualified names
//! - Spans and origin back-links into the front-end's native AST
//! - `JkType`, the type value carried by type elements and symbols
//! - `NodeKind`, the closed set of Java and Kotlin shapes
//! - `Tree`, a generational arena that owns every node
//! - Trivia (comments and line breaks) attached to nodes
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers are `Name(u32)`
//! - **Flatten Everything**: children are `NodeId` indices, never boxes
//! - **Fault on Reuse**: replaced nodes bump their generation, so a stale
//!   `NodeId` is rejected instead of aliasing whatever reused its slot

pub mod build;
pub mod dump;
mod ids;
mod interner;
mod kind;
mod name;
mod span;
pub mod stack;
mod tree;
mod trivia;
mod types;

pub use ids::{NodeId, SymbolId};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use kind::{
    AssignOp, BinaryOp, ClassKind, DelegationTarget, LiteralKind, Modality, ModifierFlags,
    Modifiers, NodeKind, PostfixOp, PrefixOp, RangeKind, Visibility,
};
pub use name::Name;
pub use span::{Origin, OriginKey, Span};
pub use tree::{Tree, TreeError};
pub use trivia::{Comment, CommentKind, Trivia};
pub use types::{ClassType, JkType, Nullability, PrimitiveType, Variance};
