//! Declaration modifiers.
//!
//! Visibility and modality are single-valued and kept as enums so passes can
//! match on them exhaustively. Everything else is a flag.

use bitflags::bitflags;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
    /// Java default visibility. Never survives the visibility pass.
    PackagePrivate,
    /// Kotlin `internal`.
    Internal,
}

impl Visibility {
    pub const fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::PackagePrivate => "",
            Visibility::Internal => "internal",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Modality {
    /// Nothing declared. Java members are open, Kotlin members are final.
    #[default]
    Unspecified,
    Open,
    Final,
    Abstract,
    Sealed,
}

bitflags! {
    /// Non-exclusive modifiers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ModifierFlags: u16 {
        const STATIC       = 1 << 0;
        /// Declared or detected as overriding a supertype member.
        const OVERRIDE     = 1 << 1;
        /// Kotlin `data` class.
        const DATA         = 1 << 2;
        /// Kotlin `inner` class.
        const INNER        = 1 << 3;
        const CONST        = 1 << 4;
        const LATEINIT     = 1 << 5;
        /// Java interface `default` method.
        const DEFAULT      = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const TRANSIENT    = 1 << 8;
        const VOLATILE     = 1 << 9;
        const NATIVE       = 1 << 10;
        const STRICTFP     = 1 << 11;
        /// Visibility was written in the source rather than implied.
        const EXPLICIT_VISIBILITY = 1 << 12;
        /// Modality was written in the source rather than implied.
        const EXPLICIT_MODALITY   = 1 << 13;
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub modality: Modality,
    pub flags: ModifierFlags,
}

impl Modifiers {
    pub const fn new(visibility: Visibility, modality: Modality) -> Self {
        Modifiers {
            visibility,
            modality,
            flags: ModifierFlags::empty(),
        }
    }

    #[must_use]
    pub fn with(mut self, flags: ModifierFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self.flags.contains(ModifierFlags::STATIC)
    }

    #[inline]
    pub fn is_override(self) -> bool {
        self.flags.contains(ModifierFlags::OVERRIDE)
    }

    #[inline]
    pub fn is_private(self) -> bool {
        self.visibility == Visibility::Private
    }
}

/// Flavour of a class declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
    /// Kotlin `object`.
    Object,
    /// Kotlin `companion object`.
    Companion,
}

impl ClassKind {
    /// Whether members default to abstract/open semantics of an interface.
    pub const fn is_interface_like(self) -> bool {
        matches!(self, ClassKind::Interface | ClassKind::Annotation)
    }

    /// Whether the class itself can never be subclassed.
    pub const fn is_closed(self) -> bool {
        matches!(
            self,
            ClassKind::Enum | ClassKind::Record | ClassKind::Object | ClassKind::Companion
        )
    }
}
