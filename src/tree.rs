//! Element tree
//!
//! The in-memory shape handed to the flattener. An element is either a
//! leaf carrying its direct text, or a branch carrying ordered child
//! elements. There is no mixed content: text sitting next to child
//! elements is not representable and is dropped by whoever builds the tree.

use indexmap::IndexMap;

/// Attribute name to value, in document order.
pub type Attributes = IndexMap<String, String>;

/// What an element holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Direct text of a childless element. Empty for `<e></e>` and `<e/>`.
    Text(String),
    /// Child elements in document order. Never empty.
    Children(Vec<Element>),
}

/// One tag instance in a parsed markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub content: Content,
}

impl Element {
    /// Create a leaf element holding `text`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Attributes::new(),
            content: Content::Text(text.into()),
        }
    }

    /// Create an element from its children.
    ///
    /// An empty `children` vector produces an empty leaf, which keeps
    /// `Content::Children` non-empty.
    pub fn branch(name: impl Into<String>, children: Vec<Element>) -> Self {
        let content = if children.is_empty() {
            Content::Text(String::new())
        } else {
            Content::Children(children)
        };
        Element {
            name: name.into(),
            attributes: Attributes::new(),
            content,
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Text(_))
    }

    /// Child elements, empty for a leaf.
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            Content::Text(_) => &[],
        }
    }

    /// Direct text of a leaf. Branches have none.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    /// Children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().iter().filter(move |child| child.name == name)
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Number of elements in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Element::node_count).sum::<usize>()
    }
}
