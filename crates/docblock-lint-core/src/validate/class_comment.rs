//! Validation of class-level documentation comments.

use super::block::parse_block;
use super::checks::CheckConfig;
use super::error::{BlockKind, DiagnosticSink, DocIssue};
use super::layout::{check_description_spacing, check_tags};
use super::properties::check_properties;
use super::scope::BlockScope;
use crate::locate::{BlockResult, locate_class_block};
use crate::parse::PropertyElement;
use crate::tokens::TokenSource;
use log::debug;

/// Validates the documentation comment of the class-like declaration at
/// `class_pos`.
///
/// Returns the parsed property declarations when the block could be
/// parsed, so callers can reuse them without parsing again.
pub fn validate_class_comment<T: TokenSource + ?Sized>(
    tokens: &T,
    class_pos: usize,
    config: &CheckConfig,
    sink: &mut dyn DiagnosticSink,
) -> Option<Vec<PropertyElement>> {
    let block = match locate_class_block(tokens, class_pos) {
        BlockResult::NotApplicable => return None,
        BlockResult::Missing { position } => {
            sink.report(DocIssue::MissingBlock {
                kind: BlockKind::Class,
                position,
            });
            return None;
        }
        BlockResult::WrongStyle { position } => {
            sink.report(DocIssue::WrongStyle {
                kind: BlockKind::Class,
                position,
            });
            return None;
        }
        BlockResult::Found(block) => block,
    };

    debug!("Checking class comment at {}..={}", block.start, block.end);
    let registry = config.class_registry();
    let scope = BlockScope::new(BlockKind::Class, block.start, block.end, tokens.eol(), config);
    let comment = parse_block(&block, &registry, &scope, sink)?;

    check_description_spacing(&comment, &scope, sink);

    let properties = comment.properties();
    check_properties(&properties, &scope, sink);

    for unknown in &comment.unknown {
        sink.report(DocIssue::UnknownTag {
            kind: BlockKind::Class,
            tag: unknown.name.clone(),
            position: scope.at(unknown.line),
        });
    }

    check_tags(&comment, &registry, &scope, sink);

    Some(properties.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{TokenKind, TokenStream, TokenStreamBuilder};
    use crate::validate::{Severity, ValidationResult};

    const FILE_DOC: &str = "/**\n * File.\n *\n * @package Foo\n */";

    const CLASS_DOC: &str = "/**
 * Short description.
 *
 * @property      int    $count Number of items.
 * @property-read string $name  Display name.
 *
 * @package Foo_Bar
 * @version //autogen//
 */";

    fn class_with(doc: &str) -> TokenStream {
        TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .doc_comment(doc)
            .newline()
            .class_declaration("Foo")
            .build()
    }

    fn run(tokens: &TokenStream) -> (ValidationResult, Option<Vec<PropertyElement>>) {
        let class_pos = tokens
            .find_next(TokenKind::CLASS_LIKE, 0, None, false)
            .unwrap();
        let mut result = ValidationResult::new();
        let properties = validate_class_comment(tokens, class_pos, &CheckConfig::new(), &mut result);
        (result, properties)
    }

    #[test]
    fn well_formed_class_comment() {
        let (result, properties) = run(&class_with(CLASS_DOC));
        assert!(result.is_ok(), "{:?}", result.errors);

        let properties = properties.unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].var_name, "$count");
        assert_eq!(properties[1].tag, "property-read");
        assert_eq!(properties[1].position, 2);
    }

    #[test]
    fn missing_class_comment() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .other("use Foo;")
            .newline()
            .class_declaration("Bar")
            .build();
        let (result, properties) = run(&tokens);
        assert!(properties.is_none());
        assert_eq!(result.errors[0].to_string(), "Missing class doc comment");
    }

    #[test]
    fn unknown_tags_are_warnings() {
        let doc = CLASS_DOC.replace(" * @version //autogen//\n", " * @version //autogen//\n * @todo later\n");
        let (result, _) = run(&class_with(&doc));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].to_string(),
            "@todo tag is not allowed in class comment"
        );
        assert_eq!(result.errors[0].severity(), Severity::Warning);
    }

    #[test]
    fn tolerated_tags_are_accepted() {
        let doc = CLASS_DOC.replace(
            " * @version //autogen//\n",
            " * @version //autogen//\n * @author Jane\n * @since 1.2\n * @author John\n",
        );
        let (result, _) = run(&class_with(&doc));
        assert!(result.is_ok(), "{:?}", result.errors);
    }

    #[test]
    fn subpackage_is_accepted() {
        let doc = CLASS_DOC.replace(
            " * @package Foo_Bar\n",
            " * @package Foo_Bar\n * @subpackage Baz\n",
        );
        let (result, _) = run(&class_with(&doc));
        assert!(result.is_ok(), "{:?}", result.errors);
    }

    #[test]
    fn property_issues_precede_tag_issues() {
        let doc = "/**
 * Short description.
 *
 * @property int $count
 */";
        let (result, properties) = run(&class_with(doc));
        let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "Missing comment for param \"$count\" at position 1",
                "Missing @package tag in class comment",
                "Missing @version tag in class comment",
            ]
        );
        assert_eq!(properties.unwrap().len(), 1);
    }

    #[test]
    fn empty_class_comment() {
        let (result, properties) = run(&class_with("/**\n */"));
        assert!(properties.is_none());
        assert_eq!(result.errors[0].to_string(), "Class doc comment is empty");
    }
}
