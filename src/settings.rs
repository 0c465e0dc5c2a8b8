//! Settings loading.
//!
//! `defaults/chunklex.default.toml` is embedded into the library so that the documented
//! defaults and runtime behavior stay in sync. Callers layer their own files and key overrides
//! on top of those defaults via [`Loader`] before deserializing into [`Settings`].

use crate::lexing::UnmatchedPolicy;
use crate::tree::Tree;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, Source, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/chunklex.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub lexer: LexerSettings,
    pub parser: ParserSettings,
    pub format: FormatSettings,
}

/// The `[lexer]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct LexerSettings {
    pub unmatched: UnmatchedMode,
    pub fallback_label: String,
    #[serde(default)]
    pub rules: Vec<LexRuleSettings>,
}

impl LexerSettings {
    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        match self.unmatched {
            UnmatchedMode::Fallback => UnmatchedPolicy::Fallback(self.fallback_label.clone()),
            UnmatchedMode::Error => UnmatchedPolicy::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmatchedMode {
    Fallback,
    Error,
}

/// One `[[lexer.rules]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexRuleSettings {
    pub label: String,
    pub pattern: String,
}

/// The `[parser]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserSettings {
    pub root_label: String,
    pub passes: usize,
}

/// The `[format]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatSettings {
    pub margin: usize,
}

impl FormatSettings {
    /// Pretty print a tree with the configured margin.
    pub fn pformat(&self, tree: &Tree) -> String {
        tree.pformat_with(self.margin, 0)
    }
}

/// Builds [`Settings`] out of layers. The embedded defaults are always the bottom layer and
/// every later layer wins over the ones before it.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
        .layer(File::from_str(DEFAULT_TOML, FileFormat::Toml))
    }

    fn layer<S>(mut self, source: S) -> Self
    where
        S: Source + Send + Sync + 'static,
    {
        self.builder = self.builder.add_source(source);
        self
    }

    /// A TOML file that must exist when [`Loader::build`] runs.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(File::from(path.as_ref()).format(FileFormat::Toml))
    }

    /// A TOML file that is skipped when absent, e.g. a per-project `chunklex.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
    }

    /// TOML text held by the caller.
    pub fn with_toml(self, text: &str) -> Self {
        self.layer(File::from_str(text, FileFormat::Toml))
    }

    /// Set one dotted key, such as `parser.passes`, above every layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        let merged = self.builder.build()?;
        let settings: Settings = merged.try_deserialize()?;
        tracing::debug!(
            rules = settings.lexer.rules.len(),
            root = %settings.parser.root_label,
            "settings loaded"
        );
        Ok(settings)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings as shipped, with nothing layered on top.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}
