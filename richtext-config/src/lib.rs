//! Shared configuration loader for the richtext converter.
//!
//! `defaults/richtext.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RichTextConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use richtext_html::HtmlOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/richtext.default.toml");

/// Top-level configuration consumed by richtext applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextConfig {
    pub html: HtmlConfig,
}

/// HTML conversion settings, one group per direction.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub read: ReadConfig,
    pub write: WriteConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReadConfig {
    pub partial: bool,
    pub ignore_errors: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WriteConfig {
    pub partial: bool,
}

impl From<ReadConfig> for HtmlOptions {
    fn from(config: ReadConfig) -> Self {
        HtmlOptions::new(config.partial, config.ignore_errors)
    }
}

impl From<WriteConfig> for HtmlOptions {
    fn from(config: WriteConfig) -> Self {
        HtmlOptions::new(config.partial, false)
    }
}

impl HtmlConfig {
    /// Options for the reading direction.
    pub fn read_options(&self) -> HtmlOptions {
        self.read.into()
    }

    /// Options for the writing direction.
    pub fn write_options(&self) -> HtmlOptions {
        self.write.into()
    }
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

    /// Layer an optional configuration file, skipped when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `html.write.partial`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RichTextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RichTextConfig, ConfigError> {
    Loader::new().build()
}
