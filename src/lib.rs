//! # plaindoc
//!
//! Small readers and writers for two plain-text document formats: a
//! JSON-like format and an XML-like format.
//!
//! ## What is in the box?
//!
//! - **[`HashTable`]**: a string-keyed open-addressing table (djb2 hashing,
//!   linear probing, doubling growth) backing objects, attribute sets and
//!   child sets
//! - **[`DynamicArray`]**: an append-only growable array backing JSON arrays
//! - **[`json`]**: the [`json::Value`] tree with its parser and pretty-printer
//! - **[`xml`]**: the [`xml::Element`] tree with its parser and pretty-printer
//!
//! Both parsers read a byte at a time without a separate tokenizer and
//! report problems as [`Error::MalformedInput`] with the byte offset where
//! they were found.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! plaindoc = "0.1"
//! ```
//!
//! ### JSON
//!
//! ```rust
//! use plaindoc::json;
//!
//! let value = json::from_str("// defaults\n{\"retries\": 3, \"hosts\": [\"a\", \"b\"]}").unwrap();
//! let object = value.as_object().unwrap();
//! assert_eq!(object.get_i64("retries"), Some(3));
//!
//! let text = json::to_string(&value);
//! assert_eq!(json::from_str(&text).unwrap(), value);
//! ```
//!
//! ### XML
//!
//! ```rust
//! use plaindoc::xml;
//!
//! let root = xml::from_str(r#"<root name="x"><child>hi</child></root>"#).unwrap();
//! assert_eq!(root.get_attribute("name"), Some(&b"x"[..]));
//! assert_eq!(root.get_child("child").and_then(|c| c.text_str()), Some("hi"));
//! ```
//!
//! ### Building values
//!
//! ```rust
//! use plaindoc::json;
//!
//! let value = json!({ "ok": true, "ratio": 0.25 });
//! assert_eq!(json::to_string(&value).lines().count(), 4);
//! ```
//!
//! ## Files
//!
//! `json::parse`/`json::serialize` and `xml::parse`/`xml::serialize` read
//! and overwrite whole files. Every entry point has a `_with_options`
//! variant taking [`ParseOptions`] or [`WriteOptions`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level and
//! never installs a subscriber.
//!
//! ## Limitations
//!
//! - strings are written without escaping and only `\"` is recognized
//!   while reading
//! - XML children are keyed by tag name, so same-named siblings collapse
//!   to the last one
//! - table iteration follows slot order, not insertion order
//! - keys, strings, names and text are byte strings; `to_string` views
//!   them lossily and `to_vec` keeps every byte

pub mod array;
pub mod error;
pub mod json;
pub mod macros;
pub mod options;
mod reader;
pub mod table;
pub mod xml;

pub use array::DynamicArray;
pub use error::{Error, Result};
pub use options::{Indent, ParseOptions, WriteOptions};
pub use table::HashTable;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_to_value_struct() {
        let value = json::to_value(&Point { x: 1, y: 2 }).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get_i64("x"), Some(1));
        assert_eq!(object.get_i64("y"), Some(2));
    }

    #[test]
    fn test_struct_survives_text_round_trip() {
        let value = json::to_value(&vec![Point { x: 3, y: 4 }]).unwrap();
        let text = json::to_string(&value);
        assert_eq!(json::from_str(&text).unwrap(), value);
    }

    #[test]
    fn test_custom_options() {
        let value = crate::json!([[1]]);
        let options = WriteOptions::new().with_indent(Indent::Spaces(4));
        let text = json::to_string_with_options(&value, &options);
        assert_eq!(text, "[\n    [\n        1\n    ]\n]\n");
        assert_eq!(json::from_str(&text).unwrap(), value);
    }

    #[test]
    fn test_xml_and_json_share_error_type() {
        let json_err = json::from_str("").unwrap_err();
        let xml_err = xml::from_str("").unwrap_err();
        assert_eq!(json_err.offset(), Some(0));
        assert_eq!(xml_err.offset(), Some(0));
    }
}
