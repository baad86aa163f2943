//! Error types for pattern syntax.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,

    #[error("expected {expected} at offset {offset}, found {found}")]
    Expected {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unterminated regular expression starting at offset {offset}")]
    UnterminatedRegex { offset: usize },

    #[error("invalid regular expression /{pattern}/: {message}")]
    InvalidRegex { pattern: String, message: String },
}
