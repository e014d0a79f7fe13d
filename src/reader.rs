//! Byte-at-a-time input shared by the JSON and XML parsers.
//!
//! [`ByteReader`] walks a fully-read input with one-byte pushback and
//! multi-byte lookahead. [`TokenBuffer`] accumulates the bytes between
//! delimiters and grows on demand instead of overflowing.

use crate::{Error, Result};

const TOKEN_INITIAL_CAPACITY: usize = 64;

pub(crate) struct ByteReader<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        ByteReader { input, position: 0 }
    }

    /// Offset of the next byte to be read.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub(crate) fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    #[inline]
    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Some(byte)
    }

    /// Pushes the last byte read back onto the input.
    #[inline]
    pub(crate) fn unread(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Checks whether the upcoming bytes equal `expected` without consuming them.
    pub(crate) fn lookahead_matches(&self, expected: &[u8]) -> bool {
        self.input[self.position..].starts_with(expected)
    }

    pub(crate) fn skip(&mut self, count: usize) {
        self.position = (self.position + count).min(self.input.len());
    }

    /// Discards bytes up to and including the next newline.
    pub(crate) fn skip_line(&mut self) {
        while let Some(byte) = self.next_byte() {
            if byte == b'\n' {
                break;
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct TokenBuffer {
    bytes: Vec<u8>,
}

impl TokenBuffer {
    pub(crate) fn new() -> Self {
        TokenBuffer::default()
    }

    /// Appends one byte, reserving more room first when the buffer is full.
    pub(crate) fn push(&mut self, byte: u8) -> Result<()> {
        if self.bytes.len() == self.bytes.capacity() {
            let additional = self.bytes.capacity().max(TOKEN_INITIAL_CAPACITY);
            self.bytes
                .try_reserve(additional)
                .map_err(|_| Error::allocation(self.bytes.len() + additional))?;
        }
        self.bytes.push(byte);
        Ok(())
    }

    #[inline]
    pub(crate) fn last(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Takes the accumulated bytes, leaving the buffer empty.
    pub(crate) fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}
