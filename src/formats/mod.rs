//! Format implementations
//!
//! Each submodule turns a [`crate::value::FlatValue`] into one text
//! representation.

pub mod dump;
pub mod json;
pub mod yaml;

pub use dump::DumpFormat;
pub use json::JsonFormat;
pub use yaml::YamlFormat;
