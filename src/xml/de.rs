//! XML parsing.
//!
//! A recursive-descent reader with one byte of pushback. Every element is
//! read in three phases: the tag name, the attribute list, then the body,
//! which recurses into child elements and collects the element's text.
//!
//! ## Accepted grammar
//!
//! - leading whitespace is skipped, then the input must start with `<`;
//!   there is no prolog support
//! - attribute values are double-quoted and stored verbatim
//! - `<!-- ... -->` comments are dropped wherever they appear in a body
//! - whitespace in a body is insignificant and never part of the text
//! - no entity decoding, no CDATA, no namespaces
//! - names, text and attribute values are kept as raw bytes
//!
//! ```rust
//! use plaindoc::xml;
//!
//! let root = xml::from_str("<a><!-- note --><b/></a>").unwrap();
//! assert_eq!(root.name(), b"a");
//! assert!(root.get_child("b").unwrap().is_empty());
//! ```

use super::element::Element;
use crate::reader::{ByteReader, TokenBuffer};
use crate::{Error, ParseOptions, Result};

const COMMENT_OPEN: &[u8] = b"!--";
const COMMENT_CLOSE: &[u8] = b"-->";

/// The XML parser.
pub struct Parser<'a> {
    reader: ByteReader<'a>,
    options: ParseOptions,
    depth: usize,
}

#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\t' | b'\r')
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], options: &ParseOptions) -> Self {
        Parser {
            reader: ByteReader::new(input),
            options: options.clone(),
            depth: 0,
        }
    }

    /// Parses the root element. Anything after its closing tag is ignored.
    pub fn parse(&mut self) -> Result<Element> {
        loop {
            match self.reader.next_byte() {
                Some(byte) if is_space(byte) => {}
                Some(b'<') => return self.parse_element(),
                Some(_) => {
                    self.reader.unread();
                    return Err(Error::malformed(self.reader.position(), "`<`"));
                }
                None => return Err(Error::malformed(self.reader.position(), "`<`")),
            }
        }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Parses one element; its opening `<` is already consumed.
    fn parse_element(&mut self) -> Result<Element> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::malformed(
                self.reader.position(),
                &format!("nesting depth of at most {}", self.options.max_depth),
            ));
        }

        let mut element = Element::named(self.read_tag_name()?);
        self.read_attributes(&mut element)?;
        self.read_body(&mut element)?;

        self.depth -= 1;
        Ok(element)
    }

    /// Reads bytes up to whitespace, `/` or `>`. The two delimiters are left
    /// unread for the attribute phase.
    fn read_tag_name(&mut self) -> Result<Vec<u8>> {
        let mut buffer = TokenBuffer::new();
        while let Some(byte) = self.reader.next_byte() {
            match byte {
                b'/' | b'>' => {
                    self.reader.unread();
                    return Ok(buffer.take_bytes());
                }
                byte if is_space(byte) => return Ok(buffer.take_bytes()),
                byte => buffer.push(byte)?,
            }
        }
        Err(Error::malformed(self.reader.position(), "end of tag name"))
    }

    fn read_attributes(&mut self, element: &mut Element) -> Result<()> {
        let mut buffer = TokenBuffer::new();
        let mut key: Option<Vec<u8>> = None;
        let mut quoted = false;
        let mut start = self.reader.position();

        while let Some(byte) = self.reader.next_byte() {
            if quoted {
                if byte == b'"' {
                    let value = buffer.take_bytes();
                    match key.take() {
                        Some(name) => {
                            element.add_attribute(name, value);
                        }
                        None => {
                            return Err(Error::malformed(start, "an attribute name before `=`"))
                        }
                    }
                    quoted = false;
                } else {
                    buffer.push(byte)?;
                }
                continue;
            }
            match byte {
                byte if is_space(byte) => {}
                b'/' | b'>' => {
                    self.reader.unread();
                    return Ok(());
                }
                b'=' => key = Some(buffer.take_bytes()),
                b'"' => {
                    quoted = true;
                    start = self.reader.position();
                }
                byte => {
                    if buffer.is_empty() {
                        start = self.reader.position() - 1;
                    }
                    buffer.push(byte)?;
                }
            }
        }
        Err(Error::malformed(self.reader.position(), "`>` closing the tag"))
    }

    fn read_body(&mut self, element: &mut Element) -> Result<()> {
        let mut text = TokenBuffer::new();

        while let Some(byte) = self.reader.next_byte() {
            match byte {
                b'<' if self.reader.lookahead_matches(COMMENT_OPEN) => self.skip_comment()?,
                byte if is_space(byte) => {}
                b'>' => {}
                b'/' if self.reader.peek_byte() == Some(b'>') => {
                    self.reader.skip(1);
                    element.set_text("");
                    return Ok(());
                }
                b'<' => match self.reader.peek_byte() {
                    Some(b'/') => {
                        element.set_text(text.take_bytes());
                        return self.match_closing_tag(element.name());
                    }
                    Some(next) if next.is_ascii_alphabetic() => {
                        let child = self.parse_element()?;
                        element.add_child(child);
                    }
                    _ => {}
                },
                byte => text.push(byte)?,
            }
        }
        Err(Error::malformed(
            self.reader.position(),
            &closing_tag(element.name()),
        ))
    }

    /// Consumes a comment body through its `-->`; the `<` is already read.
    fn skip_comment(&mut self) -> Result<()> {
        self.reader.skip(COMMENT_OPEN.len());
        while self.reader.peek_byte().is_some() {
            if self.reader.lookahead_matches(COMMENT_CLOSE) {
                self.reader.skip(COMMENT_CLOSE.len());
                return Ok(());
            }
            self.reader.skip(1);
        }
        Err(Error::malformed(self.reader.position(), "`-->`"))
    }

    /// Reads a closing tag up to `>` and checks it against `name`. Spaces
    /// and slashes inside the tag are ignored.
    fn match_closing_tag(&mut self, name: &[u8]) -> Result<()> {
        let start = self.reader.position() - 1;
        let mut buffer = TokenBuffer::new();
        while let Some(byte) = self.reader.next_byte() {
            match byte {
                b' ' | b'/' => {}
                b'>' => {
                    if buffer.as_bytes() == name {
                        return Ok(());
                    }
                    return Err(Error::malformed(start, &closing_tag(name)));
                }
                byte => buffer.push(byte)?,
            }
        }
        Err(Error::malformed(self.reader.position(), &closing_tag(name)))
    }
}

fn closing_tag(name: &[u8]) -> String {
    format!("`</{}>`", String::from_utf8_lossy(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Element> {
        Parser::new(input.as_bytes(), &ParseOptions::default()).parse()
    }

    #[test]
    fn test_attributes_and_child_text() {
        let root = parse(r#"<root name="x"><child>hi</child></root>"#).unwrap();
        assert_eq!(root.name(), b"root");
        assert_eq!(root.get_attribute("name"), Some(&b"x"[..]));
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.get_child("child").unwrap().text(), b"hi");
        assert!(root.text().is_empty());
    }

    #[test]
    fn test_self_closing() {
        let leaf = parse("<leaf/>").unwrap();
        assert_eq!(leaf.name(), b"leaf");
        assert!(leaf.is_empty());

        let spaced = parse(r#"<leaf a="1" />"#).unwrap();
        assert_eq!(spaced.get_attribute("a"), Some(&b"1"[..]));
        assert!(spaced.is_empty());
    }

    #[test]
    fn test_attributes_only() {
        let element = parse(r#"<e k="v" other="two words"></e>"#).unwrap();
        assert_eq!(element.get_attribute("k"), Some(&b"v"[..]));
        assert_eq!(element.get_attribute("other"), Some(&b"two words"[..]));
        assert!(element.is_empty());
    }

    #[test]
    fn test_comment_elided() {
        let with_comment = parse("<a><!-- note --><b/></a>").unwrap();
        let without = parse("<a><b/></a>").unwrap();
        assert_eq!(with_comment, without);
    }

    #[test]
    fn test_comment_with_dashes_leaves_no_text() {
        let element = parse("<a>x<!-- a - b -- c -->y</a>").unwrap();
        assert_eq!(element.text(), b"xy");
    }

    #[test]
    fn test_whitespace_is_not_text() {
        let element = parse("<a>\n\thello world\n</a>").unwrap();
        assert_eq!(element.text(), b"helloworld");
    }

    #[test]
    fn test_leading_whitespace_skipped() {
        assert_eq!(parse("\n  <a/>").unwrap().name(), b"a");
    }

    #[test]
    fn test_non_utf8_text_and_attributes() {
        let input = b"<a k=\"\xff\"><b\xe9>caf\xe9</b\xe9></a>";
        let root = Parser::new(input, &ParseOptions::default()).parse().unwrap();
        assert_eq!(root.get_attribute("k"), Some(&b"\xff"[..]));
        let child = root.get_child(b"b\xe9").unwrap();
        assert_eq!(child.text(), b"caf\xe9");

        let text = Parser::new(b"<a>caf\xe9</a>", &ParseOptions::default())
            .parse()
            .unwrap();
        assert_eq!(text.text(), b"caf\xe9");
    }

    #[test]
    fn test_not_starting_with_tag() {
        assert_eq!(parse("  x<a/>"), Err(Error::malformed(2, "`<`")));
        assert_eq!(parse(""), Err(Error::malformed(0, "`<`")));
    }

    #[test]
    fn test_mismatched_closing_tag() {
        assert_eq!(parse("<a></b>"), Err(Error::malformed(3, "`</a>`")));
    }

    #[test]
    fn test_unterminated_body() {
        let err = parse("<a><b/>").unwrap_err();
        assert!(matches!(err, Error::MalformedInput { offset: 7, .. }));
    }

    #[test]
    fn test_value_without_key() {
        let err = parse(r#"<a "v"/>"#).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        let ok = Parser::new(b"<a><b/></a>", &options).parse();
        assert!(ok.is_ok());
        let deep = Parser::new(b"<a><b><c/></b></a>", &options).parse();
        assert!(matches!(deep, Err(Error::MalformedInput { .. })));
    }
}
