//! Run-wide conversion context.
//!
//! Built once per run before any unit is converted and only read
//! afterwards. Every unit of the run sees the same settings, target version,
//! multiverse and external-code registry.

use std::fmt;
use std::sync::Arc;

use j2k_ir::SharedInterner;
use j2k_types::{AnalysisOracle, ExternalCodeProcessor, Multiverse, NoAnalysis, TypeFactory};

/// Which passes run.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ConversionMode {
    /// Semantic passes only (paste conversion, quick previews).
    Basic,
    /// Semantic passes plus cosmetic cleanups.
    #[default]
    Full,
}

/// Kotlin language/API version the output targets.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ApiVersion {
    pub major: u8,
    pub minor: u8,
}

impl ApiVersion {
    pub const KOTLIN_1_3: ApiVersion = ApiVersion::new(1, 3);
    pub const KOTLIN_1_4: ApiVersion = ApiVersion::new(1, 4);
    pub const KOTLIN_1_5: ApiVersion = ApiVersion::new(1, 5);
    pub const KOTLIN_1_9: ApiVersion = ApiVersion::new(1, 9);
    pub const LATEST: ApiVersion = ApiVersion::KOTLIN_1_9;

    pub const fn new(major: u8, minor: u8) -> Self {
        ApiVersion { major, minor }
    }

    /// Parse `MAJOR.MINOR`.
    pub fn parse(s: &str) -> Option<Self> {
        let (major, minor) = s.split_once('.')?;
        Some(ApiVersion::new(major.parse().ok()?, minor.parse().ok()?))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        ApiVersion::LATEST
    }
}

impl fmt::Debug for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid API version '{0}', expected MAJOR.MINOR")]
    InvalidApiVersion(String),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ConverterSettings {
    /// Classes and members with no explicit modality stay open.
    pub open_by_default: bool,
    /// Public declarations are written without the `public` keyword.
    pub public_by_default: bool,
    /// Keep local-variable type annotations even when inferable.
    pub always_annotate_local_types: bool,
    pub mode: ConversionMode,
    pub api_version: ApiVersion,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        ConverterSettings {
            open_by_default: false,
            public_by_default: true,
            always_annotate_local_types: false,
            mode: ConversionMode::Full,
            api_version: ApiVersion::LATEST,
        }
    }
}

impl ConverterSettings {
    /// Parse host options (`--basic`, `--open-by-default`,
    /// `--no-public-by-default`, `--annotate-locals`, `--api-version=X.Y`).
    pub fn from_options(args: &[&str]) -> Result<Self, SettingsError> {
        let mut settings = ConverterSettings::default();

        for &arg in args {
            if arg == "--basic" {
                settings.mode = ConversionMode::Basic;
            } else if arg == "--full" {
                settings.mode = ConversionMode::Full;
            } else if arg == "--open-by-default" {
                settings.open_by_default = true;
            } else if arg == "--no-public-by-default" {
                settings.public_by_default = false;
            } else if arg == "--annotate-locals" {
                settings.always_annotate_local_types = true;
            } else if let Some(version) = arg.strip_prefix("--api-version=") {
                settings.api_version = ApiVersion::parse(version)
                    .ok_or_else(|| SettingsError::InvalidApiVersion(version.to_string()))?;
            } else {
                return Err(SettingsError::UnknownOption(arg.to_string()));
            }
        }

        Ok(settings)
    }

    pub fn is_basic(&self) -> bool {
        self.mode == ConversionMode::Basic
    }
}

/// Shared, read-only state of one conversion run.
#[derive(Clone)]
pub struct ConversionContext {
    pub settings: ConverterSettings,
    pub interner: SharedInterner,
    pub types: TypeFactory,
    pub multiverse: Arc<Multiverse>,
    pub external: Arc<ExternalCodeProcessor>,
    pub oracle: Arc<dyn AnalysisOracle>,
}

impl ConversionContext {
    pub fn new(
        interner: SharedInterner,
        settings: ConverterSettings,
        multiverse: Arc<Multiverse>,
        external: Arc<ExternalCodeProcessor>,
        oracle: Arc<dyn AnalysisOracle>,
    ) -> Self {
        ConversionContext {
            settings,
            types: TypeFactory::new(interner.clone()),
            interner,
            multiverse,
            external,
            oracle,
        }
    }

    /// Default settings, an empty multiverse and no analysis.
    pub fn standalone(interner: SharedInterner) -> Self {
        ConversionContext::new(
            interner,
            ConverterSettings::default(),
            Arc::new(Multiverse::new()),
            Arc::new(ExternalCodeProcessor::new()),
            Arc::new(NoAnalysis),
        )
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ConverterSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn AnalysisOracle>) -> Self {
        self.oracle = oracle;
        self
    }
}

impl fmt::Debug for ConversionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionContext")
            .field("settings", &self.settings)
            .field("multiverse", &self.multiverse.len())
            .field("external", &self.external.len())
            .finish_non_exhaustive()
    }
}
