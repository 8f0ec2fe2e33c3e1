//! Flattened values
//!
//! [`FlatValue`] is what the flattener produces: a string for a leaf, an
//! ordered map for an element with children, and a list wherever a tag
//! name repeats under the same parent. It serializes untagged, so the JSON
//! form is exactly the nested objects, arrays and strings a consumer
//! expects.

use indexmap::IndexMap;
use serde::Serialize;

/// Tag name to value, in first-seen order.
pub type FlatMap = IndexMap<String, FlatValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Text(String),
    Map(FlatMap),
    List(Vec<FlatValue>),
}

impl FlatValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlatValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FlatMap> {
        match self {
            FlatValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FlatValue]> {
        match self {
            FlatValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FlatValue::List(_))
    }

    /// Look up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<&str> for FlatValue {
    fn from(text: &str) -> Self {
        FlatValue::Text(text.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(text: String) -> Self {
        FlatValue::Text(text)
    }
}

impl From<FlatMap> for FlatValue {
    fn from(map: FlatMap) -> Self {
        FlatValue::Map(map)
    }
}

impl From<Vec<FlatValue>> for FlatValue {
    fn from(items: Vec<FlatValue>) -> Self {
        FlatValue::List(items)
    }
}
