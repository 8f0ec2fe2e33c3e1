//! YAML output

use crate::error::FormatError;
use crate::format::Format;
use crate::value::FlatValue;

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML mappings and sequences"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn serialize(&self, value: &FlatValue) -> Result<String, FormatError> {
        Ok(serde_yaml::to_string(value)?)
    }
}
