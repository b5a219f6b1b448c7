//! In-memory token stream.

use super::{Token, TokenSource};
use serde::{Deserialize, Serialize};

fn default_eol() -> String {
    "\n".to_string()
}

/// An owned token sequence plus the line separator it was produced with.
///
/// This is also the on-disk token dump format read by the CLI:
///
/// ```json
/// { "eol": "\n", "tokens": [ { "kind": "open_tag", "text": "<?php\n", "line": 1 } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    /// The line separator; defaults to `"\n"` when absent from a dump.
    #[serde(default = "default_eol")]
    pub eol: String,
    /// The tokens in source order.
    pub tokens: Vec<Token>,
}

impl TokenStream {
    /// Creates a stream from tokens and a line separator.
    pub fn new(tokens: Vec<Token>, eol: impl Into<String>) -> Self {
        Self {
            eol: eol.into(),
            tokens,
        }
    }

    /// Parses a JSON token dump.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Returns the source line of the token at `pos`, if any.
    pub fn line_of(&self, pos: usize) -> Option<usize> {
        self.tokens.get(pos).map(|t| t.line)
    }
}

impl TokenSource for TokenStream {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn token(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    fn eol(&self) -> &str {
        &self.eol
    }
}
