//! Parser module for documentation comments.
//!
//! This module turns the raw text of one `/** ... */` block into a
//! [`ParsedComment`]: short and long description, the exact whitespace
//! between them, and the tag occurrences shaped by a [`TagRegistry`].
//!
//! # Example
//!
//! ```rust
//! use docblock_lint_core::parse::{parse_comment, TagRegistry};
//!
//! let raw = "/**\n * Short.\n *\n * @package Foo\n */";
//! let comment = parse_comment(raw, &TagRegistry::file_comment(), "\n").unwrap();
//! assert_eq!(comment.short, "Short.");
//! assert_eq!(comment.occurrences("package")[0].primary_text(), "Foo");
//! ```

mod ast;
mod error;
mod lexer;
mod parser;
mod registry;

// Re-export public types
pub use ast::{
    DESCRIPTION_ENTRY, ParsedComment, PropertyElement, TagElement, TagOccurrence, TagOrder,
    UnknownTag,
};
pub use error::ParseError;
pub use parser::parse_comment;
pub use registry::{ElementShape, Requirement, TagChecker, TagGrammar, TagRegistry};

// Re-export lexer utilities that may be useful for custom tag checkers
pub use lexer::{PropertyFields, parse_property_fields, split_key_value};
