//! Configuration options for parsing and serialization.
//!
//! - [`ParseOptions`]: limits applied while reading a document
//! - [`WriteOptions`]: layout of pretty-printed output
//! - [`Indent`]: the unit written once per nesting depth
//!
//! ## Examples
//!
//! ```rust
//! use plaindoc::{json, Indent, ParseOptions, WriteOptions};
//!
//! let options = ParseOptions::new().with_max_depth(8);
//! let value = json::from_slice_with_options(br#"{"a": [1, 2]}"#, &options).unwrap();
//!
//! let options = WriteOptions::new().with_indent(Indent::Spaces(2));
//! let text = json::to_string_with_options(&value, &options);
//! assert!(text.contains("  \"a\": ["));
//! ```

/// Default nesting limit for both formats.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The indentation unit written once per nesting depth.
///
/// # Examples
///
/// ```rust
/// use plaindoc::Indent;
///
/// assert_eq!(Indent::Tab.as_str(), "\t");
/// assert_eq!(Indent::Spaces(2).as_str(), "  ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    /// Returns the text written for one level of indentation.
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(*n),
        }
    }

    pub(crate) fn write(&self, output: &mut Vec<u8>, depth: usize) {
        for _ in 0..depth {
            match self {
                Indent::Tab => output.push(b'\t'),
                Indent::Spaces(n) => output.extend(std::iter::repeat(b' ').take(*n)),
            }
        }
    }
}

/// Options applied while parsing a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default options (nesting limited to [`DEFAULT_MAX_DEPTH`]).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plaindoc::ParseOptions;
    ///
    /// assert_eq!(ParseOptions::new().max_depth, 256);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many composite values or elements may be nested.
    ///
    /// The top-level value counts as depth 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling pretty-printed output.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub indent: Indent,
}

impl WriteOptions {
    /// Creates default options (one tab per depth).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_write() {
        let mut out = Vec::new();
        Indent::Tab.write(&mut out, 3);
        assert_eq!(out, b"\t\t\t");

        let mut out = Vec::new();
        Indent::Spaces(4).write(&mut out, 2);
        assert_eq!(out, b"        ");

        let mut out = Vec::new();
        Indent::Tab.write(&mut out, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_builders() {
        let parse = ParseOptions::new().with_max_depth(3);
        assert_eq!(parse.max_depth, 3);

        let write = WriteOptions::new().with_indent(Indent::Spaces(2));
        assert_eq!(write.indent, Indent::Spaces(2));
        assert_eq!(WriteOptions::default().indent, Indent::Tab);
    }
}
