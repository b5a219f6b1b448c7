//! Validation of file and class documentation comments.
//!
//! This module locates the documentation block of an anchor token, parses
//! it, and reports every layout and content rule it violates. Issues are
//! delivered to a [`DiagnosticSink`]; [`ValidationResult`] is the usual one.
//!
//! # Example
//!
//! ```rust
//! use docblock_lint_core::tokens::TokenStreamBuilder;
//! use docblock_lint_core::validate::checks::CheckConfig;
//! use docblock_lint_core::validate::{validate_file_comment, ValidationResult};
//!
//! let tokens = TokenStreamBuilder::new()
//!     .open_tag()
//!     .doc_comment("/**\n * Helpers.\n */")
//!     .newlines(2)
//!     .class_declaration("Foo")
//!     .build();
//!
//! let mut result = ValidationResult::new();
//! validate_file_comment(&tokens, 0, &CheckConfig::new(), &mut result);
//!
//! for issue in result.errors_only() {
//!     eprintln!("{}", issue);
//! }
//! assert_eq!(result.errors.len(), 4);
//! ```

mod block;
pub mod checks;
mod class_comment;
mod error;
mod file_comment;
mod layout;
mod properties;
mod scope;
pub mod tags;

// Re-export public types
pub use class_comment::validate_class_comment;
pub use error::{
    BlockKind, Diagnostic, DiagnosticSink, DocIssue, Severity, ValidationResult,
};
pub use file_comment::validate_file_comment;
pub use layout::{check_description_spacing, check_layout, check_tags};
pub use properties::check_properties;
pub use scope::BlockScope;
