//! Block locator.
//!
//! Finds the documentation comment that belongs to an anchor token: the
//! first open tag of a file, or a class-like declaration keyword. A lone
//! comment between the open tag and the first declaration is ambiguous;
//! the number of line breaks between the comment and the declaration
//! decides who owns it. No blank line means the declaration owns it, one
//! or more blank lines means the file does.

use crate::tokens::{TokenKind, TokenSource};
use log::{debug, trace};

/// The raw text and token span of one documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Position of the first comment token.
    pub start: usize,
    /// Position of the last comment token.
    pub end: usize,
    /// The concatenated comment text.
    pub text: String,
}

/// The outcome of locating a block for an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockResult {
    /// The anchor does not carry a documentation block (e.g. a second
    /// open tag in the same file).
    NotApplicable,
    /// No documentation block belongs to the anchor.
    Missing {
        /// Where to report the missing block.
        position: usize,
    },
    /// A plain comment stands where the documentation block should be.
    WrongStyle {
        /// Where to report the style problem.
        position: usize,
    },
    /// The documentation block.
    Found(DocBlock),
}

/// Tokens that end the region a file comment may occupy.
const FILE_COMMENT_FOLLOWERS: &[TokenKind] = &[
    TokenKind::Abstract,
    TokenKind::Class,
    TokenKind::Interface,
    TokenKind::Trait,
    TokenKind::Function,
    TokenKind::DocComment,
];

/// Tokens skipped when walking back from a class keyword.
const CLASS_PREFIX: &[TokenKind] = &[TokenKind::Abstract, TokenKind::Whitespace, TokenKind::Final];

/// Returns the last token of the comment run starting at `start`.
fn block_end<T: TokenSource + ?Sized>(tokens: &T, start: usize) -> usize {
    tokens
        .find_next(&[TokenKind::DocComment], start + 1, None, true)
        .map_or(tokens.len().saturating_sub(1), |pos| pos - 1)
}

/// Returns the first token of the comment run ending at `end`.
fn block_start<T: TokenSource + ?Sized>(tokens: &T, end: usize) -> usize {
    end.checked_sub(1)
        .and_then(|from| tokens.find_previous(&[TokenKind::DocComment], from, None, true))
        .map_or(0, |pos| pos + 1)
}

/// Returns true if two line-break tokens lie in `from..to`.
fn has_blank_line<T: TokenSource + ?Sized>(tokens: &T, from: usize, to: usize) -> bool {
    let eol = tokens.eol();
    tokens
        .find_next_with_text(&[TokenKind::Whitespace], from, Some(to), eol)
        .and_then(|first| {
            tokens.find_next_with_text(&[TokenKind::Whitespace], first + 1, Some(to), eol)
        })
        .is_some()
}

/// Returns true if at least one line-break token lies in `from..to`.
fn has_line_break<T: TokenSource + ?Sized>(tokens: &T, from: usize, to: usize) -> bool {
    tokens
        .find_next_with_text(&[TokenKind::Whitespace], from, Some(to), tokens.eol())
        .is_some()
}

fn found<T: TokenSource + ?Sized>(tokens: &T, start: usize, end: usize) -> BlockResult {
    debug!("Found doc block at tokens {}..={}", start, end);
    BlockResult::Found(DocBlock {
        start,
        end,
        text: tokens.text_between(start, end),
    })
}

/// Locates the file-level documentation block after the open tag at
/// `open_tag_pos`.
///
/// Only the first open tag of a file is considered. A plain comment
/// containing `directive_marker` (an editor modeline) directly after the
/// open tag is skipped.
pub fn locate_file_block<T: TokenSource + ?Sized>(
    tokens: &T,
    open_tag_pos: usize,
    directive_marker: &str,
) -> BlockResult {
    if open_tag_pos > 0
        && tokens
            .find_previous(&[TokenKind::OpenTag], open_tag_pos - 1, None, false)
            .is_some()
    {
        trace!("Open tag at {} is not the first; skipping", open_tag_pos);
        return BlockResult::NotApplicable;
    }

    let missing = BlockResult::Missing {
        position: open_tag_pos + 1,
    };

    let mut start = tokens.find_next(&[TokenKind::Whitespace], open_tag_pos + 1, None, true);
    if let Some(pos) = start {
        let is_directive = tokens.token(pos).is_some_and(|t| {
            t.kind == TokenKind::Comment
                && !directive_marker.is_empty()
                && t.text.contains(directive_marker)
        });
        if is_directive {
            trace!("Skipping editor directive comment at {}", pos);
            start = tokens.find_next(&[TokenKind::Whitespace], pos + 1, None, true);
        }
    }

    let Some(start) = start else {
        return missing;
    };

    match tokens.kind_at(start) {
        Some(TokenKind::CloseTag) => BlockResult::NotApplicable,
        Some(TokenKind::Comment) => BlockResult::WrongStyle {
            position: open_tag_pos + 1,
        },
        Some(TokenKind::DocComment) => {
            let end = block_end(tokens, start);
            let next = tokens.find_next(FILE_COMMENT_FOLLOWERS, end + 1, None, false);
            if let Some(next) = next {
                if tokens.kind_at(next) != Some(TokenKind::DocComment)
                    && has_line_break(tokens, end + 1, next)
                    && !has_blank_line(tokens, end + 1, next)
                {
                    debug!(
                        "Doc block at {} sits directly on the declaration at {}; treating it as a declaration comment",
                        start, next
                    );
                    return missing;
                }
            }
            found(tokens, start, end)
        }
        _ => missing,
    }
}

/// Locates the documentation block of the class-like declaration whose
/// keyword is at `class_pos`.
pub fn locate_class_block<T: TokenSource + ?Sized>(tokens: &T, class_pos: usize) -> BlockResult {
    let prev = class_pos
        .checked_sub(1)
        .and_then(|from| tokens.find_previous(CLASS_PREFIX, from, None, true));

    let end = match prev.and_then(|pos| tokens.kind_at(pos).map(|kind| (pos, kind))) {
        Some((_, TokenKind::Comment)) => {
            return BlockResult::WrongStyle {
                position: class_pos,
            };
        }
        Some((pos, TokenKind::DocComment)) => pos,
        _ => {
            return BlockResult::Missing {
                position: class_pos,
            };
        }
    };
    let start = block_start(tokens, end);

    let earlier_declaration = class_pos
        .checked_sub(1)
        .and_then(|from| tokens.find_previous(TokenKind::CLASS_LIKE, from, None, false));
    if earlier_declaration.is_none() {
        let before_block = start
            .checked_sub(1)
            .and_then(|from| tokens.find_previous(&[TokenKind::DocComment], from, None, true));
        if let Some(before_block) = before_block {
            let earlier_block = before_block.checked_sub(1).and_then(|from| {
                tokens.find_previous(&[TokenKind::DocComment], from, None, false)
            });
            if earlier_block.is_none() && has_blank_line(tokens, end + 1, class_pos) {
                debug!(
                    "Only doc block at {} is separated from the declaration at {}; treating it as the file comment",
                    start, class_pos
                );
                return BlockResult::Missing {
                    position: class_pos + 1,
                };
            }
        }
    }

    found(tokens, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{TokenStream, TokenStreamBuilder};

    const FILE_DOC: &str = "/**\n * File.\n *\n * @package Foo\n */";
    const CLASS_DOC: &str = "/**\n * Class.\n */";

    fn class_pos(tokens: &TokenStream) -> usize {
        tokens
            .find_next(TokenKind::CLASS_LIKE, 0, None, false)
            .unwrap()
    }

    fn both_comments() -> TokenStream {
        TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .doc_comment(CLASS_DOC)
            .newline()
            .class_declaration("Foo")
            .build()
    }

    #[test]
    fn file_block_found() {
        let tokens = both_comments();
        match locate_file_block(&tokens, 0, "vim:") {
            BlockResult::Found(block) => {
                assert_eq!(block.start, 1);
                assert_eq!(block.end, 5);
                assert_eq!(block.text, FILE_DOC);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn class_block_found() {
        let tokens = both_comments();
        let class = class_pos(&tokens);
        match locate_class_block(&tokens, class) {
            BlockResult::Found(block) => {
                assert_eq!(block.text, CLASS_DOC);
                assert_eq!(block.end, class - 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn second_open_tag_is_not_applicable() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newline()
            .close_tag()
            .open_tag()
            .build();
        let second = tokens
            .find_next(&[TokenKind::OpenTag], 1, None, false)
            .unwrap();
        assert_eq!(
            locate_file_block(&tokens, second, "vim:"),
            BlockResult::NotApplicable
        );
    }

    #[test]
    fn close_tag_after_open_tag_is_not_applicable() {
        let tokens = TokenStreamBuilder::new().open_tag().close_tag().build();
        assert_eq!(locate_file_block(&tokens, 0, "vim:"), BlockResult::NotApplicable);
    }

    #[test]
    fn plain_comment_is_wrong_style() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .comment("/* File */")
            .newline()
            .build();
        assert_eq!(
            locate_file_block(&tokens, 0, "vim:"),
            BlockResult::WrongStyle { position: 1 }
        );
    }

    #[test]
    fn editor_directive_is_skipped() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .comment("// vim: set ts=4:")
            .newline()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .class_declaration("Foo")
            .build();
        assert!(matches!(
            locate_file_block(&tokens, 0, "vim:"),
            BlockResult::Found(DocBlock { start: 3, .. })
        ));
        assert_eq!(
            locate_file_block(&tokens, 0, "emacs:"),
            BlockResult::WrongStyle { position: 1 }
        );
    }

    #[test]
    fn code_after_open_tag_is_missing() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .other("echo")
            .build();
        assert_eq!(
            locate_file_block(&tokens, 0, "vim:"),
            BlockResult::Missing { position: 1 }
        );
    }

    #[test]
    fn empty_file_is_missing() {
        let tokens = TokenStreamBuilder::new().open_tag().build();
        assert_eq!(
            locate_file_block(&tokens, 0, "vim:"),
            BlockResult::Missing { position: 1 }
        );
    }

    #[test]
    fn lone_block_directly_on_class_belongs_to_class() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(CLASS_DOC)
            .newline()
            .class_declaration("Foo")
            .build();
        assert_eq!(
            locate_file_block(&tokens, 0, "vim:"),
            BlockResult::Missing { position: 1 }
        );
        let class = class_pos(&tokens);
        assert!(matches!(
            locate_class_block(&tokens, class),
            BlockResult::Found(_)
        ));
    }

    #[test]
    fn lone_block_separated_from_class_belongs_to_file() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .class_declaration("Foo")
            .build();
        assert!(matches!(
            locate_file_block(&tokens, 0, "vim:"),
            BlockResult::Found(_)
        ));
        let class = class_pos(&tokens);
        assert_eq!(
            locate_class_block(&tokens, class),
            BlockResult::Missing {
                position: class + 1
            }
        );
    }

    #[test]
    fn class_modifiers_are_skipped() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .doc_comment(CLASS_DOC)
            .newline()
            .keyword(TokenKind::Abstract, "abstract")
            .whitespace(" ")
            .keyword(TokenKind::Final, "final")
            .whitespace(" ")
            .class_declaration("Foo")
            .build();
        let class = class_pos(&tokens);
        assert!(matches!(
            locate_class_block(&tokens, class),
            BlockResult::Found(_)
        ));
    }

    #[test]
    fn class_without_comment_is_missing() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .other("use Foo;")
            .newline()
            .class_declaration("Bar")
            .build();
        let class = class_pos(&tokens);
        assert_eq!(
            locate_class_block(&tokens, class),
            BlockResult::Missing { position: class }
        );
    }

    #[test]
    fn class_with_plain_comment_is_wrong_style() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment(FILE_DOC)
            .newlines(2)
            .comment("// Bar")
            .newline()
            .class_declaration("Bar")
            .build();
        let class = class_pos(&tokens);
        assert_eq!(
            locate_class_block(&tokens, class),
            BlockResult::WrongStyle { position: class }
        );
    }
}
