//! Class comment check.
//!
//! This check validates the documentation comment of every class,
//! interface and trait declaration.

use super::{Check, CheckContext};
use crate::tokens::TokenKind;
use crate::validate::{ValidationResult, validate_class_comment};
use log::trace;

/// A check that validates class-level documentation comments.
#[derive(Debug, Clone, Default)]
pub struct ClassCommentCheck;

impl ClassCommentCheck {
    /// Creates a new class comment check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for ClassCommentCheck {
    fn name(&self) -> &'static str {
        "class-comment"
    }

    fn run(&self, ctx: &CheckContext) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut from = 0;
        while let Some(pos) = ctx.tokens.find_next(TokenKind::CLASS_LIKE, from, None, false) {
            if let Some(properties) = validate_class_comment(ctx.tokens, pos, ctx.config, &mut result) {
                trace!("Declaration at {} documents {} properties", pos, properties.len());
            }
            from = pos + 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{TokenStream, TokenStreamBuilder};
    use crate::validate::checks::CheckConfig;

    const FILE_DOC: &str = "/**\n * File.\n *\n * @package Foo\n */";
    const CLASS_DOC: &str = "/**\n * Class.\n *\n * @package Foo\n * @version //autogen//\n */";

    fn run_check(tokens: &TokenStream) -> ValidationResult {
        let config = CheckConfig::new();
        let ctx = CheckContext::new(tokens, &config);
        ClassCommentCheck::new().run(&ctx)
    }

    #[test]
    fn every_declaration_is_checked() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .doc_comment(CLASS_DOC)
            .newline()
            .class_declaration("Foo")
            .newline()
            .keyword(TokenKind::Interface, "interface")
            .whitespace(" ")
            .other("Bar {}")
            .newline()
            .build();
        let result = run_check(&tokens);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].to_string(), "Missing class doc comment");
    }

    #[test]
    fn documented_declarations_pass() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .doc_comment(CLASS_DOC)
            .newline()
            .keyword(TokenKind::Trait, "trait")
            .whitespace(" ")
            .other("Foo {}")
            .newline()
            .build();
        let result = run_check(&tokens);
        assert!(result.is_ok(), "{:?}", result.errors);
    }
}
