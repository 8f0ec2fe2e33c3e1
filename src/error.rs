//! Error types
//!
//! Flattening itself cannot fail. Everything around it (reading markup,
//! serializing values, loading catalogs, decoding request bodies) reports
//! through the enums below.

use std::path::PathBuf;

/// Errors raised while turning markup text into an element tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("document has no root element")]
    Empty,

    #[error("unexpected element <{name}> after the root element at byte {position}")]
    MultipleRoots { name: String, position: u64 },

    #[error("unexpected text outside the root element at byte {position}")]
    TextOutsideRoot { position: u64 },

    #[error("unclosed element <{0}> at end of input")]
    Unclosed(String),

    #[error("DOCTYPE declarations are not allowed (byte {position})")]
    DoctypeForbidden { position: u64 },

    #[error("nesting deeper than {limit} elements at byte {position}")]
    TooDeep { limit: usize, position: u64 },

    #[error("malformed markup at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute at byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    #[error("invalid UTF-8 in markup: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by output formats.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for FormatError {
    fn from(err: serde_yaml::Error) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}

/// Errors raised while loading a book catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("XML parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding a request-like body.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read body: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid XML body: {0}")]
    Xml(#[from] ParseError),
}
