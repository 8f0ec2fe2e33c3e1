//! Request body decoding
//!
//! Reads a whole body from any reader and decodes it either as JSON or as
//! XML. A body that does not decode is an error, never an empty value.

use std::io::Read;

use crate::error::InputError;
use crate::parser::{self, ParseOptions};
use crate::tree::Element;

/// Decode a JSON body.
pub fn read_json<R: Read>(reader: R) -> Result<serde_json::Value, InputError> {
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

/// Decode an XML body into its root element.
pub fn read_xml<R: Read>(reader: R, options: &ParseOptions) -> Result<Element, InputError> {
    Ok(parser::parse_reader(reader, options)?)
}
