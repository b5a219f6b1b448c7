//! Token cursor over an already-tokenized source file.
//!
//! The validator never lexes source text. It consumes tokens produced by a
//! host tokenizer and only needs forward/backward search by token kind and
//! raw text reconstruction between two positions. [`TokenSource`] is that
//! seam; [`TokenStream`] is the in-memory implementation used by the CLI
//! and the tests.
//!
//! Positions are token indices. A documentation comment spans one
//! [`TokenKind::DocComment`] token per physical line, so adding a line
//! offset inside a comment to the comment's first token index yields the
//! token of that line.

mod builder;
mod stream;

pub use builder::TokenStreamBuilder;
pub use stream::TokenStream;

use serde::{Deserialize, Serialize};

/// The kind of a token, as classified by the host tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Opening source marker (e.g. `<?php`), including its line break.
    OpenTag,
    /// Closing source marker.
    CloseTag,
    /// Whitespace; line breaks are emitted as their own tokens.
    Whitespace,
    /// A plain, non-documentation comment.
    Comment,
    /// One line of a `/** ... */` documentation comment.
    DocComment,
    /// The `class` keyword.
    Class,
    /// The `interface` keyword.
    Interface,
    /// The `trait` keyword.
    Trait,
    /// The `function` keyword.
    Function,
    /// The `abstract` modifier.
    Abstract,
    /// The `final` modifier.
    Final,
    /// Anything the validator does not care about.
    Other,
}

impl TokenKind {
    /// Keywords that open a class-like declaration.
    pub const CLASS_LIKE: &'static [TokenKind] =
        &[TokenKind::Class, TokenKind::Interface, TokenKind::Trait];

    /// Returns true for class-like declaration keywords.
    pub fn is_class_like(self) -> bool {
        Self::CLASS_LIKE.contains(&self)
    }
}

/// A single token from the host token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token classification.
    pub kind: TokenKind,
    /// The raw text of the token.
    pub text: String,
    /// Line number where the token starts (1-based).
    pub line: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Read-only search interface over a token sequence.
///
/// Search ranges follow the host conventions: `find_next` scans
/// `from..to` (to the end when `to` is `None`), `find_previous` scans from
/// `from` down to, but not including, `to` (down to the first token when
/// `to` is `None`). With `exclude` set, a token matches when its kind is
/// *not* in `kinds`.
pub trait TokenSource {
    /// Number of tokens.
    fn len(&self) -> usize;

    /// Returns the token at `pos`, if any.
    fn token(&self, pos: usize) -> Option<&Token>;

    /// The exact line separator used by the source.
    fn eol(&self) -> &str;

    /// Returns true if there are no tokens.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the kind of the token at `pos`, if any.
    fn kind_at(&self, pos: usize) -> Option<TokenKind> {
        self.token(pos).map(|t| t.kind)
    }

    /// Finds the next matching token at or after `from`.
    fn find_next(
        &self,
        kinds: &[TokenKind],
        from: usize,
        to: Option<usize>,
        exclude: bool,
    ) -> Option<usize> {
        let end = to.unwrap_or(self.len()).min(self.len());
        (from..end).find(|&pos| {
            self.token(pos)
                .is_some_and(|t| kinds.contains(&t.kind) != exclude)
        })
    }

    /// Finds the next token of one of `kinds` whose text equals `text`.
    fn find_next_with_text(
        &self,
        kinds: &[TokenKind],
        from: usize,
        to: Option<usize>,
        text: &str,
    ) -> Option<usize> {
        let end = to.unwrap_or(self.len()).min(self.len());
        (from..end).find(|&pos| {
            self.token(pos)
                .is_some_and(|t| kinds.contains(&t.kind) && t.text == text)
        })
    }

    /// Finds the closest matching token at or before `from`.
    fn find_previous(
        &self,
        kinds: &[TokenKind],
        from: usize,
        to: Option<usize>,
        exclude: bool,
    ) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let start = from.min(self.len() - 1);
        let stop = to.map_or(0, |t| t + 1);
        if stop > start {
            return None;
        }
        (stop..=start).rev().find(|&pos| {
            self.token(pos)
                .is_some_and(|t| kinds.contains(&t.kind) != exclude)
        })
    }

    /// Concatenates the text of tokens `start..=end`.
    fn text_between(&self, start: usize, end: usize) -> String {
        (start..=end)
            .filter_map(|pos| self.token(pos))
            .map(|t| t.text.as_str())
            .collect()
    }
}
