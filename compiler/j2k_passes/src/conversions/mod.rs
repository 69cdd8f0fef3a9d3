//! The pass library.
//!
//! Each pass is a unit struct (or holds only per-run scratch state) so the
//! pipeline can build a fresh instance per unit.

mod builtin;
mod companion;
mod default_arguments;
mod equals;
mod field_initialization;
mod for_loop;
mod implicit_casts;
mod literal;
mod local_variable;
mod modality;
mod nullability;
mod parenthesize;
mod record;
mod redundant_modifiers;
mod switch;
mod type_mapping;
mod util;
mod visibility;

pub use builtin::{
    ArgumentTransform, ArgumentType, Arity, BuiltinMember, BuiltinMembersConversion,
    CustomBuilder, Filters, ReceiverFilter, ReplaceType, Source, Target, BUILTIN_MEMBERS,
};
pub use companion::StaticMembersToCompanionConversion;
pub use default_arguments::DefaultArgumentsConversion;
pub use equals::EqualsOperatorConversion;
pub use field_initialization::FieldInitializationConversion;
pub use for_loop::ForConversion;
pub use implicit_casts::ImplicitCastsConversion;
pub use literal::LiteralConversion;
pub use local_variable::LocalVariableTypeConversion;
pub use modality::ModalityConversion;
pub use nullability::NullabilityConversion;
pub use parenthesize::ParenthesizeConversion;
pub use record::RecordClassConversion;
pub use redundant_modifiers::RedundantModifiersConversion;
pub use switch::{SwitchData, SwitchToWhenConversion};
pub use type_mapping::TypeMappingConversion;
pub use visibility::VisibilityConversion;
