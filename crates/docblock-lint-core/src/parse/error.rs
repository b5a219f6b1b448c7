//! Error types for documentation comment parsing.
//!
//! A parse error is fatal to the block being parsed. It carries the line
//! offset within the comment; the caller translates it to an absolute
//! token position.

use thiserror::Error;

/// An error that occurred while parsing a documentation comment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A multi-field tag has no whitespace between two of its fields.
    #[error("@{tag} tag is missing the whitespace separator before its {field}")]
    MissingFieldSeparator {
        /// Line offset within the comment (0 is the opening line).
        line: usize,
        /// The tag name without the leading '@'.
        tag: String,
        /// Which field lacks its separator.
        field: &'static str,
    },

    /// A tag that takes no content was given some.
    #[error("@{tag} tag does not accept content")]
    UnexpectedContent {
        /// Line offset within the comment.
        line: usize,
        /// The tag name without the leading '@'.
        tag: String,
    },
}

impl ParseError {
    /// Creates a missing field separator error.
    pub fn missing_field_separator(line: usize, tag: impl Into<String>, field: &'static str) -> Self {
        Self::MissingFieldSeparator {
            line,
            tag: tag.into(),
            field,
        }
    }

    /// Creates an unexpected content error.
    pub fn unexpected_content(line: usize, tag: impl Into<String>) -> Self {
        Self::UnexpectedContent {
            line,
            tag: tag.into(),
        }
    }

    /// Returns the line offset within the comment.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingFieldSeparator { line, .. } => *line,
            ParseError::UnexpectedContent { line, .. } => *line,
        }
    }
}
