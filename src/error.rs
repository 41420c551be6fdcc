//! Error types for decoding and encoding.
//!
//! Every decode failure aborts the whole document: no partial tree is ever
//! handed back. Errors raised while reading text carry the 1-based line number
//! of the offending line.
//!
//! ## Error Categories
//!
//! - **Structure**: [`Error::BadIndent`], [`Error::MalformedKey`],
//!   [`Error::MalformedEntry`], [`Error::UnterminatedQuotedKey`]
//! - **Document shape**: [`Error::UnexpectedTopLevelType`]
//! - **Limits**: [`Error::RecursionLimitExceeded`]
//! - **I/O**: [`Error::Io`]
//! - **Serde**: [`Error::UnsupportedKey`], [`Error::Custom`]
//!
//! ## Examples
//!
//! ```rust
//! use serde_yamlite::{from_str, Error, Mapping};
//!
//! let result: Result<Mapping, Error> = from_str("a b\n");
//! assert!(matches!(result, Err(Error::MalformedKey { line: 1, .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while decoding or encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The underlying reader or writer failed.
    #[error("IO error: {0}")]
    Io(String),

    /// A line is indented deeper than the collection being read allows.
    #[error("Bad indentation at line {line}: expected {expected} spaces, found {found}")]
    BadIndent {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A mapping key is missing its colon or contains a stray quote.
    #[error("Malformed key at line {line}: {msg}")]
    MalformedKey { line: usize, msg: String },

    /// A line mixes sequence and mapping entries within one collection.
    #[error("Malformed entry at line {line}: {msg}")]
    MalformedEntry { line: usize, msg: String },

    /// A double-quoted key has no closing quote.
    #[error("Unterminated quoted key at line {line}")]
    UnterminatedQuotedKey { line: usize },

    /// The document's top-level value is not a mapping.
    #[error("Unexpected top-level type: expected a mapping, found {found}")]
    UnexpectedTopLevelType { found: String },

    /// Collections are nested deeper than the configured limit.
    #[error("Recursion limit of {limit} exceeded at line {line}")]
    RecursionLimitExceeded { line: usize, limit: usize },

    /// A second line was pushed back before the first one was read again.
    #[error("Line pushback slot already occupied at line {line}")]
    PushbackOccupied { line: usize },

    /// A serialized map key is not a scalar.
    #[error("Unsupported map key: {0}")]
    UnsupportedKey(String),

    /// Custom error raised through serde.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a bad-indentation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yamlite::Error;
    ///
    /// let err = Error::bad_indent(3, 0, 2);
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn bad_indent(line: usize, expected: usize, found: usize) -> Self {
        Error::BadIndent {
            line,
            expected,
            found,
        }
    }

    /// Creates a malformed-key error.
    pub fn malformed_key(line: usize, msg: &str) -> Self {
        Error::MalformedKey {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates a malformed-entry error.
    pub fn malformed_entry(line: usize, msg: &str) -> Self {
        Error::MalformedEntry {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates an unterminated-quoted-key error.
    pub fn unterminated_quoted_key(line: usize) -> Self {
        Error::UnterminatedQuotedKey { line }
    }

    /// Creates an error for a document whose root is not a mapping.
    pub fn unexpected_top_level(found: &str) -> Self {
        Error::UnexpectedTopLevelType {
            found: found.to_string(),
        }
    }

    /// Creates an error for nesting beyond `limit`.
    pub fn recursion_limit(line: usize, limit: usize) -> Self {
        Error::RecursionLimitExceeded { line, limit }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yamlite::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the 1-based line number the error refers to, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::BadIndent { line, .. }
            | Error::MalformedKey { line, .. }
            | Error::MalformedEntry { line, .. }
            | Error::UnterminatedQuotedKey { line }
            | Error::RecursionLimitExceeded { line, .. }
            | Error::PushbackOccupied { line } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
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
