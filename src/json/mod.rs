//! The JSON-like document format.
//!
//! Documents are a single object or array at the top level. Values are
//! held in a [`Value`] tree whose objects are [`crate::HashTable`]s and whose
//! arrays are [`crate::DynamicArray`]s.
//!
//! ## Quick start
//!
//! ```rust
//! use plaindoc::json::{self, Value};
//!
//! let value = json::from_str(r#"{"name": "Alice", "age": 30, "tags": ["a", "b"]}"#).unwrap();
//! let object = value.as_object().unwrap();
//!
//! assert_eq!(object.get_str("name"), Some("Alice"));
//! assert_eq!(object.get_i64("age"), Some(30));
//! assert_eq!(object.get_array("tags").map(|tags| tags.len()), Some(2));
//!
//! let text = json::to_string(&Value::from(object.clone()));
//! assert_eq!(json::from_str(&text).unwrap(), value);
//! ```
//!
//! ## Files
//!
//! [`parse`] and [`serialize`] read and overwrite whole files. The output of
//! [`serialize`] ends with a single trailing newline.
//!
//! ## Byte strings
//!
//! String payloads and object keys are raw bytes and are never decoded.
//! [`to_vec`] returns the exact output; [`to_string`] is a lossy view of it
//! for documents that may hold non-UTF-8 text.

pub mod de;
pub mod ser;
pub mod value;

pub use de::{classify_primitive, Parser};
pub use ser::{to_value, Emitter, ValueSerializer};
pub use value::{Array, Object, Value};

use crate::{Error, ParseOptions, Result, WriteOptions};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Reads the file at `path` and parses it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::MalformedInput`] if its contents are not a document.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Value> {
    parse_with_options(path, &ParseOptions::default())
}

/// Reads the file at `path` and parses it with custom options.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Value> {
    let path = path.as_ref();
    debug!(path = %path.display(), format = "json", "parsing file");
    let bytes = fs::read(path).map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    from_slice_with_options(&bytes, options)
}

/// Parses a document held in a string.
///
/// ```rust
/// use plaindoc::json;
///
/// let value = json::from_str("[1, 2.5, true, \"x\"]").unwrap();
/// let array = value.as_array().unwrap();
/// assert_eq!(array.get_i64(0), Some(1));
/// assert_eq!(array.get_f64(1), Some(2.5));
/// assert_eq!(array.get_bool(2), Some(true));
/// assert_eq!(array.get_str(3), Some("x"));
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if the input holds no well-formed
/// top-level object or array.
pub fn from_str(s: &str) -> Result<Value> {
    from_slice(s.as_bytes())
}

/// Parses a document held in a byte slice.
///
/// # Errors
///
/// See [`from_str`].
pub fn from_slice(v: &[u8]) -> Result<Value> {
    from_slice_with_options(v, &ParseOptions::default())
}

/// Parses a document held in a byte slice with custom options.
///
/// # Errors
///
/// See [`from_str`]. Nesting deeper than `options.max_depth` is also
/// reported as [`Error::MalformedInput`].
pub fn from_slice_with_options(v: &[u8], options: &ParseOptions) -> Result<Value> {
    let mut parser = Parser::new(v, options);
    let value = parser.parse()?;
    debug!(kind = value.kind(), bytes = parser.position(), "parsed json document");
    Ok(value)
}

/// Reads an I/O stream to the end and parses it.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise see [`from_str`].
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Overwrites the file at `path` with the pretty-printed `value`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn serialize<P: AsRef<Path>>(value: &Value, path: P) -> Result<()> {
    serialize_with_options(value, path, &WriteOptions::default())
}

/// Overwrites the file at `path` with `value`, formatted per `options`.
///
/// # Errors
///
/// See [`serialize`].
pub fn serialize_with_options<P: AsRef<Path>>(
    value: &Value,
    path: P,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), format = "json", "serializing file");
    fs::write(path, to_vec_with_options(value, options))
        .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))
}

/// Pretty-prints `value` with tab indentation.
///
/// ```rust
/// use plaindoc::json;
///
/// let value = json::from_str(r#"{"a": 1}"#).unwrap();
/// assert_eq!(json::to_string(&value), "{\n\t\"a\": 1\n}\n");
/// ```
#[must_use]
pub fn to_string(value: &Value) -> String {
    to_string_with_options(value, &WriteOptions::default())
}

/// Pretty-prints `value`, formatted per `options`.
///
/// Bytes that are not UTF-8 are replaced with U+FFFD; use
/// [`to_vec_with_options`] to keep them.
///
/// ```rust
/// use plaindoc::{json, Indent, WriteOptions};
///
/// let value = json::from_str("[1]").unwrap();
/// let options = WriteOptions::new().with_indent(Indent::Spaces(2));
/// assert_eq!(json::to_string_with_options(&value, &options), "[\n  1\n]\n");
/// ```
#[must_use]
pub fn to_string_with_options(value: &Value, options: &WriteOptions) -> String {
    String::from_utf8_lossy(&to_vec_with_options(value, options)).into_owned()
}

/// Pretty-prints `value` with tab indentation, keeping string bytes as-is.
#[must_use]
pub fn to_vec(value: &Value) -> Vec<u8> {
    to_vec_with_options(value, &WriteOptions::default())
}

#[must_use]
pub fn to_vec_with_options(value: &Value, options: &WriteOptions) -> Vec<u8> {
    let mut emitter = Emitter::new(options);
    emitter.emit_document(value);
    emitter.into_inner()
}

/// Writes the pretty-printed `value` to `writer`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> Result<()> {
    to_writer_with_options(writer, value, &WriteOptions::default())
}

/// Writes `value` to `writer`, formatted per `options`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    value: &Value,
    options: &WriteOptions,
) -> Result<()> {
    writer
        .write_all(&to_vec_with_options(value, options))
        .map_err(|e| Error::io(&e.to_string()))
}
