//! Documentation Comment Validator Core
//!
//! A library for checking the layout and content of file-level and
//! class-level documentation comments in a tokenized source file.
//!
//! # Features
//!
//! - **Token cursor**: Search a host token stream by kind, forwards and backwards
//! - **Parser**: Split a comment into descriptions and tags shaped by a tag registry
//! - **Layout rules**: Blank lines, required tags, repetition and grouping
//! - **Content rules**: Package names, authors, copyrights, licenses, versions
//! - **Property alignment**: Column alignment of `@property` declarations
//!
//! # Quick Start
//!
//! ```rust
//! use docblock_lint_core::tokens::TokenStreamBuilder;
//! use docblock_lint_core::{CheckConfig, CheckRunner};
//!
//! let tokens = TokenStreamBuilder::new()
//!     .open_tag()
//!     .doc_comment(
//!         "/**
//!  * Helpers.
//!  *
//!  * @package   Foo
//!  * @copyright Copyright (C) 2010 Jane Doe
//!  * @license   http://example.com/license BSD
//!  * @version   //autogen//
//!  */",
//!     )
//!     .newlines(2)
//!     .class_declaration("Foo")
//!     .build();
//!
//! let result = CheckRunner::with_all_checks().run(&tokens, &CheckConfig::new());
//!
//! // The class itself has no comment of its own.
//! for issue in &result.errors {
//!     eprintln!("{}: {}", issue.severity(), issue);
//! }
//! assert_eq!(result.errors.len(), 1);
//! ```
//!
//! # Modules
//!
//! - [`tokens`]: Token cursor interface and in-memory token streams
//! - [`parse`]: Parser and tag registry for documentation comments
//! - [`locate`]: Finding the comment that belongs to a file or class
//! - [`validate`]: Validation rules and the check runner

pub mod locate;
pub mod parse;
pub mod tokens;
pub mod validate;

// Re-export commonly used types at the crate root
pub use parse::{ParseError, ParsedComment, TagRegistry, parse_comment};
pub use tokens::{Token, TokenKind, TokenSource, TokenStream};
pub use validate::checks::{Check, CheckConfig, CheckContext, CheckRunner};
pub use validate::{
    DocIssue, Severity, ValidationResult, validate_class_comment, validate_file_comment,
};
