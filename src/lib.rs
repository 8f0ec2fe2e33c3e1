//! # treeflat
//!
//! Flattens markup element trees into plain nested values: strings for
//! leaves, ordered maps for elements with children, and lists wherever a
//! tag name repeats under one parent.
//!
//! ```text
//! <root><a><b>1</b><b>2</b></a><c>text</c></root>  →  {"a":{"b":["1","2"]},"c":"text"}
//! ```
//!
//! Architecture
//!
//!     - tree: the element tree (leaf text or ordered children)
//!     - parser: safe XML front-end producing that tree
//!     - flatten: the tree to value conversion
//!     - value: the flattened value, serde-serializable
//!     - format / registry / formats: named serializers for flattened values
//!     - catalog: book catalog extraction, JSON and HTML rendering
//!     - input: JSON and XML body decoding
//!     - config / logging: ambient setup shared by binaries
//!
//!     The library never prints and never reads the environment, apart
//!     from `logging::init`, which binaries call explicitly.

pub mod catalog;
pub mod config;
pub mod error;
pub mod flatten;
pub mod format;
pub mod formats;
pub mod input;
pub mod logging;
pub mod parser;
pub mod registry;
pub mod tree;
pub mod value;

pub use error::{CatalogError, FormatError, InputError, ParseError};
pub use flatten::{flatten, to_value};
pub use parser::{parse_str, ParseOptions};
pub use tree::{Content, Element};
pub use value::{FlatMap, FlatValue};

/// Parse `source` and flatten its root element.
pub fn flatten_str(source: &str, options: &ParseOptions) -> Result<FlatMap, ParseError> {
    let root = parser::parse_str(source, options)?;
    Ok(flatten::flatten(&root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_str() {
        let map = flatten_str(
            "<root><a><b>1</b><b>2</b></a><c>text</c></root>",
            &ParseOptions::default(),
        )
        .unwrap();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":{"b":["1","2"]},"c":"text"}"#);
    }
}
