//! JSON parsing.
//!
//! A single-pass, byte-at-a-time recursive-descent reader with no separate
//! tokenizer. Each object or array routine owns a growable token buffer and a
//! handful of flags (inside a string, inside a comment, key captured, value
//! captured); nested composites are parsed by recursive calls and stored
//! straight into the parent.
//!
//! ## Accepted grammar
//!
//! - the top level must be an object or an array; bytes before the first
//!   `{` or `[` are skipped
//! - `//` starts a line comment anywhere outside a quoted string
//! - primitives are classified by [`classify_primitive`]
//! - whitespace outside strings is insignificant
//!
//! ```rust
//! use plaindoc::json;
//!
//! let value = json::from_str("// settings\n{\"retries\": 3, \"ratio\": 0.5}").unwrap();
//! let object = value.as_object().unwrap();
//! assert_eq!(object.get_i64("retries"), Some(3));
//! assert_eq!(object.get_f64("ratio"), Some(0.5));
//! ```

use super::value::{Array, Object, Value};
use crate::reader::{ByteReader, TokenBuffer};
use crate::{Error, ParseOptions, Result};

/// The JSON parser.
///
/// Created over a complete input with [`Parser::new`]; [`Parser::parse`]
/// returns the top-level composite.
pub struct Parser<'a> {
    reader: ByteReader<'a>,
    options: ParseOptions,
    depth: usize,
}

/// Per-routine scanning state shared by objects and arrays.
#[derive(Default)]
struct Scan {
    buffer: TokenBuffer,
    in_string: bool,
    in_comment: bool,
    value_captured: bool,
}

enum Step {
    /// The byte was consumed by string or comment tracking.
    Skip,
    /// The byte is structural or plain content and needs handling.
    Byte(u8),
}

impl Scan {
    /// Applies quote and comment tracking to `byte`.
    fn track(&mut self, byte: u8, reader: &mut ByteReader<'_>) -> Result<Step> {
        if self.in_comment {
            if byte == b'\n' {
                self.in_comment = false;
            }
            return Ok(Step::Skip);
        }
        if byte == b'"' && self.buffer.last() != Some(b'\\') {
            self.in_string = !self.in_string;
        }
        if self.in_string {
            self.buffer.push(byte)?;
            return Ok(Step::Skip);
        }
        if byte == b'/' && reader.peek_byte() == Some(b'/') {
            reader.next_byte();
            self.in_comment = true;
            return Ok(Step::Skip);
        }
        Ok(Step::Byte(byte))
    }
}

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], options: &ParseOptions) -> Self {
        Parser {
            reader: ByteReader::new(input),
            options: options.clone(),
            depth: 0,
        }
    }

    /// Scans forward to the first `{` or `[` and parses that composite.
    ///
    /// Line comments before the document are skipped; anything after the
    /// top-level value is ignored.
    pub fn parse(&mut self) -> Result<Value> {
        while let Some(byte) = self.reader.next_byte() {
            match byte {
                b'/' if self.reader.peek_byte() == Some(b'/') => self.reader.skip_line(),
                b'{' => return self.parse_object().map(Value::Object),
                b'[' => return self.parse_array().map(Value::Array),
                _ => {}
            }
        }
        Err(Error::malformed(self.reader.position(), "`{` or `[`"))
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::malformed(
                self.reader.position(),
                &format!("nesting depth of at most {}", self.options.max_depth),
            ));
        }
        Ok(())
    }

    /// Parses object members up to the matching `}`; the `{` is consumed.
    fn parse_object(&mut self) -> Result<Object> {
        self.enter()?;
        let mut object = Object::new();
        let mut scan = Scan::default();
        let mut key: Option<Vec<u8>> = None;

        while let Some(byte) = self.reader.next_byte() {
            let offset = self.reader.position() - 1;
            let byte = match scan.track(byte, &mut self.reader)? {
                Step::Skip => continue,
                Step::Byte(byte) => byte,
            };
            match (byte, key.as_ref()) {
                (b, _) if is_whitespace(b) => {}
                (b':', None) => {
                    key = Some(first_quoted_token(scan.buffer.as_bytes()).to_vec());
                    scan.buffer.clear();
                }
                (b'{' | b'[', Some(name)) => {
                    let value = if byte == b'{' {
                        Value::Object(self.parse_object()?)
                    } else {
                        Value::Array(self.parse_array()?)
                    };
                    // Duplicate keys keep the first value.
                    let _ = object.add(name, value);
                    scan.buffer.clear();
                    scan.value_captured = true;
                }
                (b',' | b'}', Some(name)) => {
                    if !scan.value_captured {
                        if scan.buffer.is_empty() {
                            return Err(Error::malformed(offset, "a value"));
                        }
                        let value = classify_primitive(scan.buffer.as_bytes());
                        let _ = object.add(name, value);
                    }
                    scan.buffer.clear();
                    if byte == b'}' {
                        self.depth -= 1;
                        return Ok(object);
                    }
                    key = None;
                    scan.value_captured = false;
                }
                (b'}', None) if scan.buffer.is_empty() => {
                    self.depth -= 1;
                    return Ok(object);
                }
                (b'}' | b',', None) => return Err(Error::malformed(offset, "`:`")),
                _ => scan.buffer.push(byte)?,
            }
        }
        Err(Error::malformed(self.reader.position(), "`}`"))
    }

    /// Parses array elements up to the matching `]`; the `[` is consumed.
    fn parse_array(&mut self) -> Result<Array> {
        self.enter()?;
        let mut array = Array::new();
        let mut scan = Scan::default();

        while let Some(byte) = self.reader.next_byte() {
            let offset = self.reader.position() - 1;
            let byte = match scan.track(byte, &mut self.reader)? {
                Step::Skip => continue,
                Step::Byte(byte) => byte,
            };
            match byte {
                b if is_whitespace(b) => {}
                b'{' => {
                    array.add(Value::Object(self.parse_object()?));
                    scan.buffer.clear();
                    scan.value_captured = true;
                }
                b'[' => {
                    array.add(Value::Array(self.parse_array()?));
                    scan.buffer.clear();
                    scan.value_captured = true;
                }
                b',' | b']' => {
                    if !scan.value_captured {
                        if !scan.buffer.is_empty() {
                            array.add(classify_primitive(scan.buffer.as_bytes()));
                        } else if byte == b',' {
                            return Err(Error::malformed(offset, "a value"));
                        }
                    }
                    scan.buffer.clear();
                    if byte == b']' {
                        self.depth -= 1;
                        return Ok(array);
                    }
                    scan.value_captured = false;
                }
                _ => scan.buffer.push(byte)?,
            }
        }
        Err(Error::malformed(self.reader.position(), "`]`"))
    }
}

/// Turns an unquoted token into a primitive value.
///
/// Precedence: the literals `true`/`false`, then an integer parse that
/// consumes the whole token, then a floating-point parse that consumes the
/// whole token, and finally a string made of the first quote-delimited run.
/// Tokens are bytes; a token that is not UTF-8 can only become a string.
///
/// # Examples
///
/// ```rust
/// use plaindoc::json::{classify_primitive, Value};
///
/// assert_eq!(classify_primitive(b"true"), Value::Boolean(true));
/// assert_eq!(classify_primitive(b"-12"), Value::Integer(-12));
/// assert_eq!(classify_primitive(b"1e3"), Value::Decimal(1000.0));
/// assert_eq!(classify_primitive(b"12abc"), Value::from("12abc"));
/// assert_eq!(classify_primitive(b"\"hi\""), Value::from("hi"));
/// ```
#[must_use]
pub fn classify_primitive(token: &[u8]) -> Value {
    match token {
        b"true" => return Value::Boolean(true),
        b"false" => return Value::Boolean(false),
        _ => {}
    }
    if let Ok(text) = std::str::from_utf8(token) {
        if let Ok(integer) = text.parse::<i64>() {
            return Value::Integer(integer);
        }
        if let Ok(decimal) = text.parse::<f64>() {
            return Value::Decimal(decimal);
        }
    }
    Value::String(first_quoted_token(token).to_vec())
}

/// Skips leading quotes and returns everything up to the next quote.
fn first_quoted_token(token: &[u8]) -> &[u8] {
    let start = token.iter().position(|&b| b != b'"').unwrap_or(token.len());
    let rest = &token[start..];
    match rest.iter().position(|&b| b == b'"') {
        Some(end) => &rest[..end],
        None => rest,
    }
}
