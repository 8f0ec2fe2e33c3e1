//! Tree flattening
//!
//! Converts an [`Element`] tree into nested [`FlatValue`]s:
//!
//! - a childless element becomes its text, even when that text is empty
//! - an element with children becomes a map from child tag name to value
//! - a tag name seen once under a parent maps to the value itself, a tag
//!   name seen two or more times maps to a list of values in document order
//!
//! ```text
//! <root><a><b>1</b><b>2</b></a><c>text</c></root>
//!
//! { "a": { "b": ["1", "2"] }, "c": "text" }
//! ```
//!
//! The singleton/list asymmetry is part of the output contract. Consumers
//! that always want lists must normalize on their side.
//!
//! Attributes do not take part in the conversion.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::tree::{Content, Element};
use crate::value::{FlatMap, FlatValue};

/// Flatten the children of `element` into a map.
///
/// A leaf has no children and yields an empty map.
pub fn flatten(element: &Element) -> FlatMap {
    let mut group = SiblingGroup::default();
    for child in element.children() {
        group.push(&child.name, to_value(child));
    }
    tracing::trace!(element = %element.name, keys = group.len(), "flattened element");
    group.finish()
}

/// Convert a single element: text for a leaf, a map for a branch.
pub fn to_value(element: &Element) -> FlatValue {
    match &element.content {
        Content::Text(text) => FlatValue::Text(text.clone()),
        Content::Children(_) => FlatValue::Map(flatten(element)),
    }
}

/// Per-key state while folding one parent's children.
#[derive(Debug)]
enum Slot {
    Single(FlatValue),
    Many(Vec<FlatValue>),
}

/// Collects the values of one sibling group.
///
/// Each key moves through `absent -> Single -> Many`. The first repeat of
/// a key promotes the stored value into a list before appending, so a
/// single occurrence is never wrapped and a repeated one is never lost.
#[derive(Debug, Default)]
struct SiblingGroup {
    slots: IndexMap<String, Slot>,
}

impl SiblingGroup {
    fn push(&mut self, name: &str, value: FlatValue) {
        match self.slots.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(Slot::Single(value));
            }
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                *slot = match std::mem::replace(slot, Slot::Many(Vec::new())) {
                    Slot::Single(previous) => Slot::Many(vec![previous, value]),
                    Slot::Many(mut values) => {
                        values.push(value);
                        Slot::Many(values)
                    }
                };
            }
        }
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn finish(self) -> FlatMap {
        self.slots
            .into_iter()
            .map(|(name, slot)| {
                let value = match slot {
                    Slot::Single(value) => value,
                    Slot::Many(values) => FlatValue::List(values),
                };
                (name, value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> FlatValue {
        FlatValue::Text(value.to_string())
    }

    #[test]
    fn test_repeated_tags_become_list() {
        let root = Element::branch(
            "root",
            vec![
                Element::branch(
                    "a",
                    vec![Element::leaf("b", "1"), Element::leaf("b", "2")],
                ),
                Element::leaf("c", "text"),
            ],
        );

        let result = flatten(&root);

        let mut a = FlatMap::new();
        a.insert("b".to_string(), FlatValue::List(vec![text("1"), text("2")]));
        let mut expected = FlatMap::new();
        expected.insert("a".to_string(), FlatValue::Map(a));
        expected.insert("c".to_string(), text("text"));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_single_occurrence_is_not_wrapped() {
        let root = Element::branch("root", vec![Element::leaf("x", "hello")]);
        let result = flatten(&root);
        assert_eq!(result.get("x"), Some(&text("hello")));
    }

    #[test]
    fn test_empty_child_becomes_empty_string() {
        let root = Element::branch("root", vec![Element::leaf("e", "")]);
        let result = flatten(&root);
        assert_eq!(result.get("e"), Some(&text("")));
    }

    #[test]
    fn test_whitespace_leaf_is_kept_verbatim() {
        let root = Element::branch("root", vec![Element::leaf("ws", "  \n ")]);
        assert_eq!(flatten(&root).get("ws"), Some(&text("  \n ")));
    }

    #[test]
    fn test_leaf_flattens_to_empty_map() {
        assert!(flatten(&Element::leaf("solo", "ignored")).is_empty());
    }

    #[test]
    fn test_to_value_on_leaf_returns_text() {
        assert_eq!(to_value(&Element::leaf("solo", "kept")), text("kept"));
    }

    #[test]
    fn test_repeated_maps_are_promoted() {
        let book = |title: &str| Element::branch("book", vec![Element::leaf("title", title)]);
        let root = Element::branch("catalog", vec![book("One"), book("Two"), book("Three")]);

        let result = flatten(&root);
        let books = result["book"].as_list().expect("book should be a list");
        let titles: Vec<_> = books
            .iter()
            .filter_map(|b| b.get("title").and_then(FlatValue::as_str))
            .collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_mixed_shapes_under_one_key() {
        let root = Element::branch(
            "root",
            vec![
                Element::leaf("item", "plain"),
                Element::branch("item", vec![Element::leaf("inner", "deep")]),
            ],
        );

        let result = flatten(&root);
        let items = result["item"].as_list().expect("item should be a list");
        assert_eq!(items[0], text("plain"));
        assert_eq!(items[1].get("inner"), Some(&text("deep")));
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let root = Element::branch(
            "root",
            vec![
                Element::leaf("b", "1"),
                Element::leaf("a", "2"),
                Element::leaf("b", "3"),
            ],
        );
        let keys: Vec<_> = flatten(&root).keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_attributes_are_ignored() {
        let root = Element::branch(
            "root",
            vec![Element::leaf("x", "v").with_attribute("id", "1")],
        );
        assert_eq!(flatten(&root).get("x"), Some(&text("v")));
    }
}
