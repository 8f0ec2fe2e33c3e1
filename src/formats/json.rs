//! JSON output
//!
//! Maps become objects (keys in first-seen order), lists become arrays
//! and leaves become strings. Non-ASCII text is written as-is.

use crate::error::FormatError;
use crate::format::Format;
use crate::value::FlatValue;

/// JSON format, pretty-printed (`json`) or single-line (`json-compact`).
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn pretty() -> Self {
        JsonFormat { pretty: true }
    }

    pub fn compact() -> Self {
        JsonFormat { pretty: false }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        if self.pretty {
            "json"
        } else {
            "json-compact"
        }
    }

    fn description(&self) -> &str {
        if self.pretty {
            "Indented JSON"
        } else {
            "Single-line JSON"
        }
    }

    // `.json` output paths pick the pretty form
    fn file_extensions(&self) -> &[&str] {
        if self.pretty {
            &["json"]
        } else {
            &[]
        }
    }

    fn serialize(&self, value: &FlatValue) -> Result<String, FormatError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}
