//! The ordered pass registry.
//!
//! Order is part of the contract. Later passes rely on what earlier ones
//! left behind:
//!
//! - literals are rewritten before anything inspects their text;
//! - records and switches are lowered before loops and statics move;
//! - types are mapped before builtin members are matched on them, and
//!   builtin members are replaced before implicit casts are inserted for
//!   their arguments;
//! - overloads merge before modality and visibility are decided, so the
//!   surviving declaration gets them;
//! - cosmetic passes (full mode only) run last.

use j2k_passes::conversions::{
    BuiltinMembersConversion, DefaultArgumentsConversion, EqualsOperatorConversion,
    FieldInitializationConversion, ForConversion, ImplicitCastsConversion, LiteralConversion,
    LocalVariableTypeConversion, ModalityConversion, NullabilityConversion,
    ParenthesizeConversion, RecordClassConversion, RedundantModifiersConversion,
    StaticMembersToCompanionConversion, SwitchToWhenConversion, TypeMappingConversion,
    VisibilityConversion,
};
use j2k_passes::{Conversion, WithData};

/// One registry entry.
#[derive(Copy, Clone)]
pub struct PassDescriptor {
    pub name: &'static str,
    /// Runs in basic mode too.
    pub basic: bool,
    /// Fresh pass instance for one unit.
    pub create: fn() -> Box<dyn Conversion>,
}

impl std::fmt::Debug for PassDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassDescriptor")
            .field("name", &self.name)
            .field("basic", &self.basic)
            .finish_non_exhaustive()
    }
}

macro_rules! pass {
    ($name:literal, basic, $create:expr) => {
        PassDescriptor {
            name: $name,
            basic: true,
            create: || Box::new($create),
        }
    };
    ($name:literal, full, $create:expr) => {
        PassDescriptor {
            name: $name,
            basic: false,
            create: || Box::new($create),
        }
    };
}

pub static PASSES: &[PassDescriptor] = &[
    pass!("literal-conversion", basic, LiteralConversion),
    pass!("record-class", basic, RecordClassConversion::new()),
    pass!("switch-to-when", basic, WithData(SwitchToWhenConversion)),
    pass!("for-conversion", basic, ForConversion),
    pass!("static-members-to-companion", basic, StaticMembersToCompanionConversion),
    pass!("nullability", basic, NullabilityConversion::new()),
    pass!("type-mapping", basic, TypeMappingConversion),
    pass!("builtin-members", basic, BuiltinMembersConversion::new()),
    pass!("implicit-casts", basic, ImplicitCastsConversion),
    pass!("default-arguments", basic, DefaultArgumentsConversion::new()),
    pass!("field-initialization", basic, FieldInitializationConversion),
    pass!("modality", basic, ModalityConversion),
    pass!("visibility", basic, VisibilityConversion),
    pass!("local-variable-type", basic, LocalVariableTypeConversion),
    pass!("equals-operator", full, EqualsOperatorConversion),
    pass!("redundant-modifiers", full, RedundantModifiersConversion),
    pass!("parenthesize", full, ParenthesizeConversion),
];
