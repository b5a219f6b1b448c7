//! The block a validation pass is working on.

use super::checks::CheckConfig;
use super::error::BlockKind;

/// Where a documentation block sits and how it is being checked.
///
/// Line offsets reported by the parser are relative to `start`; the scope
/// turns them into absolute token positions.
#[derive(Debug, Clone, Copy)]
pub struct BlockScope<'a> {
    /// File or class block.
    pub kind: BlockKind,
    /// Position of the first comment token.
    pub start: usize,
    /// Position of the last comment token.
    pub end: usize,
    /// The source line separator.
    pub eol: &'a str,
    /// Check options.
    pub config: &'a CheckConfig,
}

impl<'a> BlockScope<'a> {
    /// Creates a new scope.
    pub fn new(
        kind: BlockKind,
        start: usize,
        end: usize,
        eol: &'a str,
        config: &'a CheckConfig,
    ) -> Self {
        Self {
            kind,
            start,
            end,
            eol,
            config,
        }
    }

    /// Absolute position of a line offset within the block.
    pub fn at(&self, line: usize) -> usize {
        self.start + line
    }

    /// Number of line separators in `text`.
    pub fn count_eols(&self, text: &str) -> usize {
        text.matches(self.eol).count()
    }
}
