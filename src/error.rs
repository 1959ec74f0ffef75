//! Error types for TOON encoding and decoding.
//!
//! Encoding and decoding fail with separate types because their failure modes
//! do not overlap: the encoder can only reject values the wire format cannot
//! represent, while the decoder reports structural problems in the input
//! text. Every decode error carries the line (and, where it is meaningful,
//! the column) of the offending input. Both operations are all-or-nothing:
//! no partial document is ever returned.
//!
//! ## Examples
//!
//! ```rust
//! use toon_core::{decode, DecodeError};
//!
//! let err = decode("a: 1\na: 2").unwrap_err();
//! assert!(matches!(err, DecodeError::DuplicateKey { .. }));
//! ```

use thiserror::Error;

/// Errors produced while encoding a [`Value`](crate::Value) tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// The value has no representation in the numeric grammar
    /// (NaN or an infinity).
    #[error("unencodable value: {0}")]
    UnencodableValue(String),
}

/// Errors produced while decoding TOON text.
///
/// All variants are detected locally at the offending line; decoding stops
/// at the first error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// A scalar token could not be parsed: unterminated quote, invalid
    /// escape sequence, trailing characters after a closing quote, or a
    /// token where none is legal.
    #[error("malformed scalar at line {line}, column {column}: {message}")]
    MalformedScalar {
        line: usize,
        column: usize,
        message: String,
    },

    /// Indentation that does not fit the document's established unit:
    /// tabs in leading whitespace, a width that is not a multiple of the
    /// unit, or a jump of more than one level.
    #[error("invalid indentation at line {line}: {message}")]
    InvalidIndentation { line: usize, message: String },

    /// A table row whose field count differs from the header's column count.
    #[error("column count mismatch at line {line}: header has {expected} columns, row has {found}")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A table header declared a row count the body does not match.
    #[error("row count mismatch at line {line}: header declared {expected} rows, found {found}")]
    RowCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The same key appeared twice in one object, or the same column twice
    /// in one table header.
    #[error("duplicate key \"{key}\" at line {line}")]
    DuplicateKey { line: usize, key: String },
}

impl DecodeError {
    pub(crate) fn malformed(line: usize, column: usize, message: impl Into<String>) -> Self {
        DecodeError::MalformedScalar {
            line,
            column,
            message: message.into(),
        }
    }

    pub(crate) fn indentation(line: usize, message: impl Into<String>) -> Self {
        DecodeError::InvalidIndentation {
            line,
            message: message.into(),
        }
    }

    /// The 1-based input line the error was detected on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            DecodeError::MalformedScalar { line, .. }
            | DecodeError::InvalidIndentation { line, .. }
            | DecodeError::ColumnCountMismatch { line, .. }
            | DecodeError::RowCountMismatch { line, .. }
            | DecodeError::DuplicateKey { line, .. } => *line,
        }
    }
}
