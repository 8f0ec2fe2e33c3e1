//! Format trait definition
//!
//! A format turns a flattened value into text. Formats are looked up by
//! name through the [`crate::registry::FormatRegistry`].

use crate::error::FormatError;
use crate::value::FlatValue;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct Keys;
///
/// impl Format for Keys {
///     fn name(&self) -> &str {
///         "keys"
///     }
///
///     fn serialize(&self, value: &FlatValue) -> Result<String, FormatError> {
///         Ok(value.as_map().map(|m| m.keys().cloned().collect::<Vec<_>>().join("\n")).unwrap_or_default())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "json", "yaml")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions usually carrying this format
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Serialize a flattened value into text
    fn serialize(&self, value: &FlatValue) -> Result<String, FormatError>;
}
