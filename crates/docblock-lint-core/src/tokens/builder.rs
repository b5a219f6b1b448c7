//! Programmatic construction of token streams.
//!
//! The builder follows the host tokenizer's conventions so that the block
//! locator heuristics see the same shapes they would see in production:
//!
//! - the open tag carries its trailing line break;
//! - a documentation comment becomes one token per physical line, each
//!   keeping its line break except the last;
//! - each line break between tokens is its own whitespace token.

use super::{Token, TokenKind, TokenStream};

/// Builds a [`TokenStream`], computing line numbers as tokens are added.
#[derive(Debug, Clone)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    eol: String,
    line: usize,
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStreamBuilder {
    /// Creates an empty builder using `"\n"` as line separator.
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            eol: "\n".to_string(),
            line: 1,
        }
    }

    /// Sets the line separator. Call before adding tokens.
    pub fn with_eol(mut self, eol: impl Into<String>) -> Self {
        self.eol = eol.into();
        self
    }

    /// Appends a token of any kind.
    pub fn token(mut self, kind: TokenKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let breaks = text.matches(self.eol.as_str()).count();
        self.tokens.push(Token::new(kind, text, self.line));
        self.line += breaks;
        self
    }

    /// Appends the open tag followed by a line break.
    pub fn open_tag(self) -> Self {
        let text = format!("<?php{}", self.eol);
        self.token(TokenKind::OpenTag, text)
    }

    /// Appends a close tag.
    pub fn close_tag(self) -> Self {
        self.token(TokenKind::CloseTag, "?>")
    }

    /// Appends a single line break token.
    pub fn newline(self) -> Self {
        let eol = self.eol.clone();
        self.token(TokenKind::Whitespace, eol)
    }

    /// Appends `count` line break tokens.
    pub fn newlines(mut self, count: usize) -> Self {
        for _ in 0..count {
            self = self.newline();
        }
        self
    }

    /// Appends a whitespace token without line breaks (indentation).
    pub fn whitespace(self, text: impl Into<String>) -> Self {
        self.token(TokenKind::Whitespace, text)
    }

    /// Appends a plain comment.
    pub fn comment(self, text: impl Into<String>) -> Self {
        self.token(TokenKind::Comment, text)
    }

    /// Appends a documentation comment, one token per physical line.
    pub fn doc_comment(mut self, text: &str) -> Self {
        let eol = self.eol.clone();
        let mut rest = text;
        while let Some(idx) = rest.find(eol.as_str()) {
            let (line, tail) = rest.split_at(idx + eol.len());
            self = self.token(TokenKind::DocComment, line);
            rest = tail;
        }
        if !rest.is_empty() {
            self = self.token(TokenKind::DocComment, rest);
        }
        self
    }

    /// Appends a keyword token such as `class` or `abstract`.
    pub fn keyword(self, kind: TokenKind, text: impl Into<String>) -> Self {
        self.token(kind, text)
    }

    /// Appends an uninteresting token (identifiers, braces, ...).
    pub fn other(self, text: impl Into<String>) -> Self {
        self.token(TokenKind::Other, text)
    }

    /// Appends `class <name> {}` followed by a line break.
    pub fn class_declaration(self, name: &str) -> Self {
        self.keyword(TokenKind::Class, "class")
            .whitespace(" ")
            .other(name)
            .whitespace(" ")
            .other("{}")
            .newline()
    }

    /// Finishes the stream.
    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens, self.eol)
    }
}
