//! Shared configuration loader for the duet toolchain.
//!
//! `defaults/duet.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`DuetConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use duet_engine::markdown::MarkdownRules;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/duet.default.toml");

/// Top-level configuration consumed by duet applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DuetConfig {
    pub markdown: MarkdownConfig,
    pub inspect: InspectConfig,
}

/// Markdown conversion configuration group.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub rules: MarkdownRulesConfig,
}

/// Mirrors the knobs exposed by the conversion engine.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownRulesConfig {
    pub indent_string: String,
    pub bullet_marker: char,
    pub hard_line_breaks: bool,
    pub emoji_shortcodes: bool,
}

impl From<MarkdownRulesConfig> for MarkdownRules {
    fn from(config: MarkdownRulesConfig) -> Self {
        MarkdownRules {
            indent_string: config.indent_string,
            bullet_marker: config.bullet_marker,
            hard_line_breaks: config.hard_line_breaks,
            emoji_shortcodes: config.emoji_shortcodes,
        }
    }
}

impl From<&MarkdownRulesConfig> for MarkdownRules {
    fn from(config: &MarkdownRulesConfig) -> Self {
        MarkdownRules {
            indent_string: config.indent_string.clone(),
            bullet_marker: config.bullet_marker,
            hard_line_breaks: config.hard_line_breaks,
            emoji_shortcodes: config.emoji_shortcodes,
        }
    }
}

/// Controls tree inspection output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DuetConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DuetConfig, ConfigError> {
    Loader::new().build()
}
