//! The XML-like document format.
//!
//! A document is a single root [`Element`]. Child elements are keyed by tag
//! name, so when siblings share a name only the last one parsed is kept.
//! Names, text and attribute values are raw bytes; [`to_vec`] returns the
//! exact output and [`to_string`] a lossy view of it.
//!
//! ```rust
//! use plaindoc::xml;
//!
//! let root = xml::from_str(r#"<root name="x"><child>hi</child></root>"#).unwrap();
//! assert_eq!(root.get_attribute("name"), Some(&b"x"[..]));
//! assert_eq!(
//!     xml::to_string(&root),
//!     "<root name=\"x\">\n\t<child>\n\t\thi\n\t</child>\n</root>\n"
//! );
//! ```

pub mod de;
pub mod element;
pub mod ser;

pub use de::Parser;
pub use element::Element;
pub use ser::Emitter;

use crate::{Error, ParseOptions, Result, WriteOptions};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Reads the file at `path` and parses its root element.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::MalformedInput`] if its contents are not a document.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Element> {
    parse_with_options(path, &ParseOptions::default())
}

/// Reads the file at `path` and parses it with custom options.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Element> {
    let path = path.as_ref();
    debug!(path = %path.display(), format = "xml", "parsing file");
    let bytes = fs::read(path).map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    from_slice_with_options(&bytes, options)
}

/// Parses a document held in a string.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if the input does not start with a
/// well-formed element.
pub fn from_str(s: &str) -> Result<Element> {
    from_slice(s.as_bytes())
}

/// Parses a document held in a byte slice. The bytes need not be UTF-8.
///
/// ```rust
/// use plaindoc::xml;
///
/// let root = xml::from_slice(b"<a>caf\xe9</a>").unwrap();
/// assert_eq!(root.text(), b"caf\xe9");
/// ```
///
/// # Errors
///
/// See [`from_str`].
pub fn from_slice(v: &[u8]) -> Result<Element> {
    from_slice_with_options(v, &ParseOptions::default())
}

/// Parses a document held in a byte slice with custom options.
///
/// # Errors
///
/// See [`from_str`]. Nesting deeper than `options.max_depth` is also
/// reported as [`Error::MalformedInput`].
pub fn from_slice_with_options(v: &[u8], options: &ParseOptions) -> Result<Element> {
    let mut parser = Parser::new(v, options);
    let root = parser.parse()?;
    debug!(kind = "element", bytes = parser.position(), "parsed xml document");
    Ok(root)
}

/// Reads an I/O stream to the end and parses it.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise see [`from_str`].
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Element> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Overwrites the file at `path` with the pretty-printed element tree.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn serialize<P: AsRef<Path>>(root: &Element, path: P) -> Result<()> {
    serialize_with_options(root, path, &WriteOptions::default())
}

/// Overwrites the file at `path` with the element tree, formatted per
/// `options`.
///
/// # Errors
///
/// See [`serialize`].
pub fn serialize_with_options<P: AsRef<Path>>(
    root: &Element,
    path: P,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), format = "xml", "serializing file");
    fs::write(path, to_vec_with_options(root, options))
        .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))
}

/// Pretty-prints the element tree with tab indentation.
///
/// ```rust
/// use plaindoc::xml::{self, Element};
///
/// assert_eq!(xml::to_string(&Element::named("a")), "<a/>\n");
/// ```
#[must_use]
pub fn to_string(root: &Element) -> String {
    to_string_with_options(root, &WriteOptions::default())
}

/// Pretty-prints the element tree, formatted per `options`.
///
/// Bytes that are not UTF-8 are replaced with U+FFFD; use
/// [`to_vec_with_options`] to keep them.
#[must_use]
pub fn to_string_with_options(root: &Element, options: &WriteOptions) -> String {
    String::from_utf8_lossy(&to_vec_with_options(root, options)).into_owned()
}

/// Pretty-prints the element tree with tab indentation, keeping every byte.
#[must_use]
pub fn to_vec(root: &Element) -> Vec<u8> {
    to_vec_with_options(root, &WriteOptions::default())
}

#[must_use]
pub fn to_vec_with_options(root: &Element, options: &WriteOptions) -> Vec<u8> {
    let mut emitter = Emitter::new(options);
    emitter.emit_document(root);
    emitter.into_inner()
}

/// Writes the pretty-printed element tree to `writer`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W: io::Write>(writer: W, root: &Element) -> Result<()> {
    to_writer_with_options(writer, root, &WriteOptions::default())
}

/// Writes the element tree to `writer`, formatted per `options`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    root: &Element,
    options: &WriteOptions,
) -> Result<()> {
    writer
        .write_all(&to_vec_with_options(root, options))
        .map_err(|e| Error::io(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reparse_serialized_output() {
        let root = from_str(r#"<cfg mode="fast"><a>1</a><b><c/></b></cfg>"#).unwrap();
        let text = to_string(&root);
        assert_eq!(from_str(&text).unwrap(), root);
    }

    #[test]
    fn test_display_matches_to_string() {
        let root = from_str("<a>t</a>").unwrap();
        assert_eq!(root.to_string(), "<a>\n\tt\n</a>\n");
    }

    #[test]
    fn test_non_utf8_text_survives_round_trip() {
        let root = from_slice(b"<a>caf\xe9</a>").unwrap();
        assert_eq!(root.text(), b"caf\xe9");
        let bytes = to_vec(&root);
        assert_eq!(bytes, b"<a>\n\tcaf\xe9\n</a>\n");
        assert_eq!(from_slice(&bytes).unwrap(), root);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(parse("/no/such/file.xml"), Err(Error::Io(_))));
    }
}
