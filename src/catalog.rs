//! Book catalogs
//!
//! Reads the small catalog layout used throughout the XML/JSON lab:
//!
//! ```text
//! <catalog>
//!   <book isbn="978-5-4461-1488-7">
//!     <title>...</title>
//!     <authors>
//!       <author>...</author>
//!     </authors>
//!   </book>
//! </catalog>
//! ```
//!
//! Extraction is lenient: a missing `isbn` attribute or `title` reads as an
//! empty string, a missing `authors` element as no authors.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::CatalogError;
use crate::parser::{self, ParseOptions};
use crate::tree::Element;

/// Sample catalog written by [`ensure_sample_catalog`].
pub const SAMPLE_CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
  <book isbn="978-5-4461-1488-7">
    <title>Создаем динамические веб-сайты на PHP</title>
    <authors>
      <author>Кевин Татро</author>
      <author>Питер Макинтайр</author>
    </authors>
  </book>
  <book isbn="978-5-97060-569-1">
    <title>PHP и MySQL. Искусство программирования</title>
    <authors>
      <author>Люк Веллинг</author>
      <author>Лора Томсон</author>
    </authors>
  </book>
  <book isbn="978-5-4461-1972-1">
    <title>Изучаем PHP 8</title>
    <authors>
      <author>Робин Никсон</author>
    </authors>
  </book>
</catalog>
"#;

// ISBN-13 (numeric check digit) or ISBN-10 (check digit may be X), hyphens optional
static ISBN_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:97[89]-?(?:\d-?){9}\d|(?:\d-?){9}[\dXx])$").expect("ISBN pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub authors: Vec<String>,
}

impl Book {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, authors: Vec<String>) -> Self {
        Book {
            isbn: isbn.into(),
            title: title.into(),
            authors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Warn about `isbn` attributes that don't look like an ISBN.
    pub validate_isbn: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        CatalogOptions {
            validate_isbn: true,
        }
    }
}

/// Whether `isbn` has the shape of an ISBN-10 or ISBN-13.
pub fn looks_like_isbn(isbn: &str) -> bool {
    ISBN_SHAPE.is_match(isbn)
}

/// Collect every `book` child of `root`.
pub fn books_from_element(root: &Element, options: &CatalogOptions) -> Vec<Book> {
    root.children_named("book")
        .map(|book| {
            let isbn = book.attribute("isbn").unwrap_or_default().to_string();
            if options.validate_isbn && !looks_like_isbn(&isbn) {
                tracing::warn!(isbn = %isbn, "book has a malformed ISBN");
            }

            let title = book
                .child("title")
                .and_then(Element::text)
                .unwrap_or_default()
                .to_string();

            let authors = book
                .child("authors")
                .map(|authors| {
                    authors
                        .children_named("author")
                        .map(|author| author.text().unwrap_or_default().to_string())
                        .collect()
                })
                .unwrap_or_default();

            Book {
                isbn,
                title,
                authors,
            }
        })
        .collect()
}

/// Load the catalog stored at `path`.
pub fn load_books(
    path: impl AsRef<Path>,
    parse_options: &ParseOptions,
    options: &CatalogOptions,
) -> Result<Vec<Book>, CatalogError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }

    let root = parser::parse_file(path, parse_options).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let books = books_from_element(&root, options);
    tracing::debug!(path = %path.display(), count = books.len(), "loaded catalog");
    Ok(books)
}

/// Pretty JSON array of books.
pub fn books_to_json(books: &[Book]) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(books)?)
}

/// `{"error": "<message>"}`, the JSON body reported when a catalog cannot be read.
pub fn error_envelope(error: &impl std::fmt::Display) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}

/// Render books as an HTML table. Every cell is escaped.
pub fn render_html_table(books: &[Book]) -> String {
    let mut html = String::new();
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>ISBN</th><th>Title</th><th>Authors</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for book in books {
        let authors = book.authors.join(", ");
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape::encode_quoted_attribute(&book.isbn),
            html_escape::encode_quoted_attribute(&book.title),
            html_escape::encode_quoted_attribute(&authors),
        ));
    }
    html.push_str("</tbody>\n");
    html.push_str("</table>\n");
    html
}

/// Write [`SAMPLE_CATALOG`] to `path` unless the file already exists.
///
/// Returns whether the file was written.
pub fn ensure_sample_catalog(path: impl AsRef<Path>) -> Result<bool, CatalogError> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, SAMPLE_CATALOG)?;
    tracing::info!(path = %path.display(), "wrote sample catalog");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_books() -> Vec<Book> {
        let root = parser::parse_str(SAMPLE_CATALOG, &ParseOptions::default()).unwrap();
        books_from_element(&root, &CatalogOptions::default())
    }

    #[test]
    fn test_sample_catalog_books() {
        let books = sample_books();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].isbn, "978-5-4461-1488-7");
        assert_eq!(books[0].title, "Создаем динамические веб-сайты на PHP");
        assert_eq!(books[0].authors, vec!["Кевин Татро", "Питер Макинтайр"]);
        assert_eq!(books[2].authors, vec!["Робин Никсон"]);
    }

    #[test]
    fn test_missing_parts_read_as_empty() {
        let root = parser::parse_str(
            "<catalog><book><other/></book><note>skip</note></catalog>",
            &ParseOptions::default(),
        )
        .unwrap();
        let books = books_from_element(&root, &CatalogOptions::default());
        assert_eq!(books, vec![Book::new("", "", vec![])]);
    }

    #[test]
    fn test_isbn_shape() {
        assert!(looks_like_isbn("978-5-4461-1488-7"));
        assert!(looks_like_isbn("9785970605691"));
        assert!(looks_like_isbn("0-306-40615-2"));
        assert!(looks_like_isbn("080442957X"));
        assert!(!looks_like_isbn(""));
        assert!(!looks_like_isbn("123"));
        assert!(!looks_like_isbn("978-5-4461-ABCD-7"));
        assert!(!looks_like_isbn("978-0-306-40615-X"));
        assert!(!looks_like_isbn("978030640615x"));
    }

    #[test]
    fn test_book_json_key_order() {
        let json = serde_json::to_string(&Book::new("1", "T", vec!["A".to_string()])).unwrap();
        assert_eq!(json, r#"{"isbn":"1","title":"T","authors":["A"]}"#);
    }

    #[test]
    fn test_html_table_escapes_cells() {
        let books = vec![Book::new(
            "1",
            "<script>alert('x')</script>",
            vec!["Tom & Jerry".to_string(), "\"Q\"".to_string()],
        )];
        let html = render_html_table(&books);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry, &quot;Q&quot;"));
        assert!(html.contains("<th>ISBN</th><th>Title</th><th>Authors</th>"));
    }

    #[test]
    fn test_load_books_not_found() {
        let result = load_books(
            "/definitely/not/here/books.xml",
            &ParseOptions::default(),
            &CatalogOptions::default(),
        );
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_error_envelope() {
        let error = CatalogError::NotFound("/srv/books.xml".into());
        assert_eq!(
            error_envelope(&error),
            r#"{"error":"file not found: /srv/books.xml"}"#
        );

        let quoted = error_envelope(&"bad \"quote\"");
        let parsed: serde_json::Value = serde_json::from_str(&quoted).unwrap();
        assert_eq!(parsed["error"], "bad \"quote\"");
    }

    #[test]
    fn test_ensure_sample_catalog_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.xml");

        assert!(ensure_sample_catalog(&path).unwrap());
        assert!(!ensure_sample_catalog(&path).unwrap());

        let books = load_books(&path, &ParseOptions::default(), &CatalogOptions::default())
            .unwrap();
        assert_eq!(books.len(), 3);
    }

    #[test]
    fn test_load_books_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        fs::write(&path, "<catalog><book>").unwrap();

        let result = load_books(&path, &ParseOptions::default(), &CatalogOptions::default());
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }
}
