//! File comment check.
//!
//! This check validates the documentation comment at the top of a file.

use super::{Check, CheckContext};
use crate::tokens::TokenKind;
use crate::validate::{ValidationResult, validate_file_comment};

/// A check that validates the file-level documentation comment.
///
/// Every open tag in the stream is offered to the validator; only the
/// first one of a file carries a file comment.
#[derive(Debug, Clone, Default)]
pub struct FileCommentCheck;

impl FileCommentCheck {
    /// Creates a new file comment check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for FileCommentCheck {
    fn name(&self) -> &'static str {
        "file-comment"
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut from = 0;
        while let Some(pos) = ctx.tokens.find_next(&[TokenKind::OpenTag], from, None, false) {
            validate_file_comment(ctx.tokens, pos, ctx.config, &mut result);
            from = pos + 1;
        }
        result
    }
}
