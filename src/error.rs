//! Error types for document parsing and serialization.
//!
//! Every fallible operation in this crate returns [`Result`].
//!
//! ## Error Categories
//!
//! - **I/O Errors**: a file could not be opened, read, or written
//! - **Allocation Errors**: a token buffer could not grow
//! - **Malformed Input**: an unexpected byte sequence, with the byte offset
//!   where parsing stopped and what was expected there
//! - **Serde Errors**: raised while converting Rust types into a JSON value
//!
//! ## Examples
//!
//! ```rust
//! use plaindoc::{json, Error};
//!
//! let err = json::from_str("no document here").unwrap_err();
//! assert!(matches!(err, Error::MalformedInput { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the JSON and XML libraries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while opening, reading or writing a document
    #[error("IO error: {0}")]
    Io(String),

    /// A growable buffer failed to reserve memory
    #[error("Allocation error: could not reserve {requested} bytes")]
    Allocation { requested: usize },

    /// The input does not follow the accepted grammar
    #[error("Malformed input at byte {offset}: expected {expected}")]
    MalformedInput { offset: usize, expected: String },

    /// A Rust type has no representation in the JSON value model
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an allocation error for a failed buffer reservation.
    pub fn allocation(requested: usize) -> Self {
        Error::Allocation { requested }
    }

    /// Creates a malformed-input error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plaindoc::Error;
    ///
    /// let err = Error::malformed(12, "`}`");
    /// assert!(err.to_string().contains("byte 12"));
    /// ```
    pub fn malformed(offset: usize, expected: &str) -> Self {
        Error::MalformedInput {
            offset,
            expected: expected.to_string(),
        }
    }

    /// Creates an unsupported type error for values the JSON model cannot hold.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Byte offset of a malformed-input error, if this is one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::MalformedInput { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = Error::malformed(7, "`</a>`");
        assert_eq!(err.to_string(), "Malformed input at byte 7: expected `</a>`");
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn test_io_has_no_offset() {
        let err = Error::io("missing.json: not found");
        assert!(err.to_string().starts_with("IO error"));
        assert_eq!(err.offset(), None);
    }
}
