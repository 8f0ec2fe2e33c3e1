//! XML front-end
//!
//! Builds an [`Element`] tree from XML text. Tokenizing, end-tag matching
//! and entity unescaping are delegated to `quick-xml`; this module only
//! assembles the tree and enforces the safety rules:
//!
//! - `<!DOCTYPE ...>` is refused unless explicitly allowed, and its internal
//!   subset is never expanded either way
//! - only the predefined and numeric character references are expanded
//! - nesting depth is bounded, so the recursive flattener cannot run out
//!   of stack
//!
//! Text is not trimmed, but line endings are normalized: every `\r\n` and
//! lone `\r` reads as `\n`, in text, CDATA and attribute values alike.
//! Attribute values additionally turn literal tabs and newlines into
//! spaces. Character references such as `&#13;` are expanded after
//! normalization, so they survive as written. CDATA sections contribute
//! their raw content. Comments, processing instructions and the XML
//! declaration are skipped. Text next to child elements is dropped: see
//! [`crate::tree`].

use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::tree::{Attributes, Content, Element};

/// Default bound on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip `<!DOCTYPE ...>` instead of rejecting the document.
    pub allow_doctype: bool,
    /// Maximum element nesting, the root counting as depth 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            allow_doctype: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse XML text into its root element.
pub fn parse_str(source: &str, options: &ParseOptions) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|source| ParseError::Syntax {
            position: reader.error_position() as u64,
            source,
        })?;

        match event {
            Event::Start(start) => {
                check_open(&stack, &root, &start, options, position)?;
                stack.push(OpenElement::new(&start, position)?);
            }
            Event::Empty(start) => {
                check_open(&stack, &root, &start, options, position)?;
                let element = OpenElement::new(&start, position)?.close();
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                // quick-xml has already matched the end tag against its start
                if let Some(open) = stack.pop() {
                    let element = open.close();
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                let raw = normalize_line_endings(std::str::from_utf8(&text)?);
                let text = unescape(&raw).map_err(|source| ParseError::Syntax {
                    position,
                    source: source.into(),
                })?;
                match stack.last_mut() {
                    Some(open) => open.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(ParseError::TextOutsideRoot { position }),
                }
            }
            Event::CData(data) => {
                let data = normalize_line_endings(std::str::from_utf8(&data)?);
                match stack.last_mut() {
                    Some(open) => open.text.push_str(&data),
                    None => return Err(ParseError::TextOutsideRoot { position }),
                }
            }
            Event::DocType(_) => {
                if !options.allow_doctype {
                    return Err(ParseError::DoctypeForbidden { position });
                }
                tracing::debug!(position, "skipping DOCTYPE declaration");
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::Unclosed(open.name));
    }

    let root = root.ok_or(ParseError::Empty)?;
    tracing::debug!(root = %root.name, nodes = root.node_count(), "parsed document");
    Ok(root)
}

/// Read all of `reader` and parse it.
pub fn parse_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Element, ParseError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let source = std::str::from_utf8(&bytes)?;
    parse_str(source, options)
}

/// Read and parse the file at `path`.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Element, ParseError> {
    let source = fs::read_to_string(path)?;
    parse_str(&source, options)
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    name: String,
    attributes: Attributes,
    text: String,
    children: Vec<Element>,
}

impl OpenElement {
    fn new(start: &BytesStart<'_>, position: u64) -> Result<Self, ParseError> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();

        let mut attributes = Attributes::new();
        for attribute in start.attributes() {
            let attribute =
                attribute.map_err(|source| ParseError::Attribute { position, source })?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
            let raw = normalize_attribute_whitespace(std::str::from_utf8(&attribute.value)?);
            let value = unescape(&raw).map_err(|source| ParseError::Syntax {
                position,
                source: source.into(),
            })?;
            attributes.insert(key, value.into_owned());
        }

        Ok(OpenElement {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn close(self) -> Element {
        let content = if self.children.is_empty() {
            Content::Text(self.text)
        } else {
            if !self.text.trim().is_empty() {
                tracing::debug!(element = %self.name, "dropping text mixed with child elements");
            }
            Content::Children(self.children)
        };

        Element {
            name: self.name,
            attributes: self.attributes,
            content,
        }
    }
}

/// Fold `\r\n` and lone `\r` into `\n`.
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\r') {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Line-ending normalization, then literal tabs and newlines become spaces.
fn normalize_attribute_whitespace(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\r', '\n', '\t']) {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(normalize_line_endings(raw).replace(['\n', '\t'], " "))
}

fn check_open(
    stack: &[OpenElement],
    root: &Option<Element>,
    start: &BytesStart<'_>,
    options: &ParseOptions,
    position: u64,
) -> Result<(), ParseError> {
    if root.is_some() {
        return Err(ParseError::MultipleRoots {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            position,
        });
    }
    if stack.len() >= options.max_depth {
        return Err(ParseError::TooDeep {
            limit: options.max_depth,
            position,
        });
    }
    Ok(())
}

fn attach(stack: &mut [OpenElement], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
