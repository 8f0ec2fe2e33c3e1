//! Configuration loading
//!
//! `defaults/treeflat.default.toml` is embedded into the binary so the
//! documented defaults and runtime behavior stay in sync. Callers layer
//! their own files and overrides on top via [`Loader`] before
//! deserializing into [`TreeflatConfig`].

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::catalog::CatalogOptions;
use crate::parser::ParseOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/treeflat.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeflatConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// XML front-end safety settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub reject_doctype: bool,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub validate_isbn: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl From<&ParserConfig> for ParseOptions {
    fn from(config: &ParserConfig) -> Self {
        ParseOptions {
            allow_doctype: !config.reject_doctype,
            max_depth: config.max_depth,
        }
    }
}

impl From<&CatalogConfig> for CatalogOptions {
    fn from(config: &CatalogConfig) -> Self {
        CatalogOptions {
            validate_isbn: config.validate_isbn,
        }
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
    pub fn build(self) -> Result<TreeflatConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TreeflatConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.parser.reject_doctype);
        assert_eq!(config.parser.max_depth, 256);
        assert_eq!(config.output.format, "json");
        assert!(config.catalog.validate_isbn);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "yaml");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[parser]\nmax_depth = 8\nreject_doctype = false").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        let options = ParseOptions::from(&config.parser);
        assert_eq!(options.max_depth, 8);
        assert!(options.allow_doctype);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/definitely/not/here/treeflat.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/treeflat.toml")
            .build()
            .unwrap();
        assert_eq!(config.output.format, "json");
    }
}
