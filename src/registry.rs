//! Format registry for format discovery and selection
//!
//! Formats are registered once and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::value::FlatValue;
use std::collections::HashMap;

/// Registry of output formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let text = registry.serialize(&value, "yaml")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Find the format that claims a file extension (without the dot,
    /// case-insensitive). Formats are tried in name order.
    pub fn find_by_extension(&self, extension: &str) -> Option<&dyn Format> {
        self.list_formats().into_iter().find_map(|name| {
            let format = self.formats.get(&name)?;
            format
                .file_extensions()
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
                .then(|| format.as_ref())
        })
    }

    /// Serialize a value using the specified format
    pub fn serialize(&self, value: &FlatValue, format: &str) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        tracing::debug!(format, "serializing flattened value");
        fmt.serialize(value)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::json::JsonFormat::pretty());
        registry.register(crate::formats::json::JsonFormat::compact());
        registry.register(crate::formats::yaml::YamlFormat);
        registry.register(crate::formats::dump::DumpFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
