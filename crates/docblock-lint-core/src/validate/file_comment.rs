//! Validation of the file-level documentation comment.

use super::block::parse_block;
use super::checks::CheckConfig;
use super::error::{BlockKind, DiagnosticSink, DocIssue};
use super::layout::check_layout;
use super::scope::BlockScope;
use crate::locate::{BlockResult, locate_file_block};
use crate::tokens::TokenSource;
use log::debug;

/// Validates the documentation comment that opens a file.
///
/// `open_tag_pos` is the position of an open tag. Only the first open tag
/// of a file carries a file comment; later ones are ignored.
pub fn validate_file_comment<T: TokenSource + ?Sized>(
    tokens: &T,
    open_tag_pos: usize,
    config: &CheckConfig,
    sink: &mut dyn DiagnosticSink,
) {
    let block = match locate_file_block(tokens, open_tag_pos, &config.directive_marker) {
        BlockResult::NotApplicable => return,
        BlockResult::Missing { position } => {
            sink.report(DocIssue::MissingBlock {
                kind: BlockKind::File,
                position,
            });
            return;
        }
        BlockResult::WrongStyle { position } => {
            sink.report(DocIssue::WrongStyle {
                kind: BlockKind::File,
                position,
            });
            return;
        }
        BlockResult::Found(block) => block,
    };

    debug!("Checking file comment at {}..={}", block.start, block.end);
    let registry = config.file_registry();
    let scope = BlockScope::new(BlockKind::File, block.start, block.end, tokens.eol(), config);
    let Some(comment) = parse_block(&block, &registry, &scope, sink) else {
        return;
    };

    check_layout(&comment, &registry, &scope, sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ElementShape, TagGrammar};
    use crate::tokens::{TokenKind, TokenStream, TokenStreamBuilder};
    use crate::validate::{Severity, ValidationResult};

    const FILE_DOC: &str = "/**
 * Short description.
 *
 * Long description.
 *
 * @package   Foo_Bar
 * @author    Jane Doe <jane@example.com>
 * @copyright Copyright (C) 2007-2008 Jane Doe
 * @license   http://example.com/license BSD
 * @version   //autogentag//
 */";

    fn file_with(doc: &str) -> TokenStream {
        TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(doc)
            .newlines(2)
            .class_declaration("Foo")
            .build()
    }

    fn run(tokens: &TokenStream, config: &CheckConfig) -> ValidationResult {
        let mut result = ValidationResult::new();
        validate_file_comment(tokens, 0, config, &mut result);
        result
    }

    #[test]
    fn well_formed_file_comment() {
        let result = run(&file_with(FILE_DOC), &CheckConfig::new());
        assert!(result.is_ok(), "{:?}", result.errors);
    }

    #[test]
    fn unknown_tags_are_ignored() {
        let doc = FILE_DOC.replace(
            " * @version   //autogentag//\n",
            " * @version   //autogentag//\n * @frobnicate x\n",
        );
        let result = run(&file_with(&doc), &CheckConfig::new());
        assert!(result.is_ok(), "{:?}", result.errors);
    }

    #[test]
    fn missing_file_comment() {
        let tokens = TokenStreamBuilder::new().open_tag().other("echo").build();
        let result = run(&tokens, &CheckConfig::new());
        assert_eq!(
            result.errors,
            vec![DocIssue::MissingBlock {
                kind: BlockKind::File,
                position: 1
            }]
        );
    }

    #[test]
    fn plain_comment_instead_of_doc_comment() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .comment("/* File */")
            .newline()
            .build();
        let result = run(&tokens, &CheckConfig::new());
        assert_eq!(
            result.errors[0].to_string(),
            "You must use \"/**\" style comments for a file comment"
        );
    }

    #[test]
    fn empty_file_comment() {
        let result = run(&file_with("/**\n *\n */"), &CheckConfig::new());
        assert_eq!(
            result.errors,
            vec![DocIssue::EmptyBlock {
                kind: BlockKind::File,
                position: 1
            }]
        );
    }

    #[test]
    fn parse_error_stops_the_block() {
        let config =
            CheckConfig::new().with_extra_tag(TagGrammar::new("internal", ElementShape::Leaf));
        let doc = "/**\n * Short.\n *\n * @internal yes\n */";
        let result = run(&file_with(doc), &config);
        assert_eq!(
            result.errors,
            vec![DocIssue::Malformed {
                message: "@internal tag does not accept content".to_string(),
                position: 4
            }]
        );
    }

    #[test]
    fn missing_tags_point_at_block_end() {
        let doc = "/**\n * Short.\n *\n * @package Foo\n */";
        let result = run(&file_with(doc), &CheckConfig::new());
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors.iter().all(|e| e.position() == 5));
    }

    #[test]
    fn unmarked_version_is_a_warning() {
        let doc = FILE_DOC.replace("//autogentag//", "1.0");
        let result = run(&file_with(&doc), &CheckConfig::new());
        assert_eq!(result.warnings_only().count(), 1);
        assert_eq!(result.errors_only().count(), 0);
        assert_eq!(result.errors[0].severity(), Severity::Warning);

        let quiet = CheckConfig::new().with_version_markers(Vec::new());
        assert!(run(&file_with(&doc), &quiet).is_ok());
    }

    #[test]
    fn later_open_tags_are_ignored() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newline()
            .close_tag()
            .open_tag()
            .other("echo")
            .build();
        let second = tokens
            .find_next(&[TokenKind::OpenTag], 1, None, false)
            .unwrap();
        let mut result = ValidationResult::new();
        validate_file_comment(&tokens, second, &CheckConfig::new(), &mut result);
        assert!(result.is_ok());
    }
}
