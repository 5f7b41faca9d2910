//! Error types for tueson encoding and decoding.
//!
//! Decoding is a one-shot, all-or-nothing operation: every failure is a
//! single [`Error::Syntax`] carrying a human-readable message and the
//! 1-based [`Position`] of the offending input. There is no recovery and no
//! partial result.
//!
//! Encoding is total over the data model; the only encoder-side failure is
//! an out-of-domain value (a non-finite number), reported as
//! [`Error::UnsupportedType`] before any text is produced.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tueson::{from_str, Error, Value};
//!
//! let result: Result<Value, Error> = from_str("bogus\n");
//! let err = result.unwrap_err();
//! assert_eq!(err.position().map(|p| (p.line, p.column)), Some((1, 1)));
//! ```

use std::fmt;
use thiserror::Error;

/// A 1-based line and column in the decoded input.
///
/// Positions exist only inside error values; they are never retained past
/// the `decode` call that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// All errors that can occur while encoding or decoding tueson.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Malformed input, reported at a source position.
    #[error("syntax error at {position}: {msg}")]
    Syntax { position: Position, msg: String },

    /// A value outside the tueson data model was handed to the encoder.
    #[error("unsupported value: {0}")]
    UnsupportedType(String),

    /// IO error while reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// Message raised through `serde`'s custom-error hooks.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error at a 1-based line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tueson::Error;
    ///
    /// let err = Error::syntax(10, 5, "unrecognized value keyword `frob`");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            position: Position { line, column },
            msg: msg.into(),
        }
    }

    /// Creates an unsupported-value error for data the format cannot carry.
    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedType(msg.into())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// Returns the source position, if this error carries one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
