//! Parsing a located block and reporting why it cannot be checked.

use super::error::{DiagnosticSink, DocIssue};
use super::scope::BlockScope;
use crate::locate::DocBlock;
use crate::parse::{ParsedComment, TagRegistry, parse_comment};
use log::debug;

/// Parses `block`, or reports a malformed or empty block and returns `None`.
pub(crate) fn parse_block(
    block: &DocBlock,
    registry: &TagRegistry,
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) -> Option<ParsedComment> {
    match parse_comment(&block.text, registry, scope.eol) {
        Ok(comment) if comment.is_empty() => {
            sink.report(DocIssue::EmptyBlock {
                kind: scope.kind,
                position: scope.start,
            });
            None
        }
        Ok(comment) => Some(comment),
        Err(err) => {
            debug!("Could not parse {} comment at {}: {}", scope.kind, scope.start, err);
            sink.report(DocIssue::Malformed {
                message: err.to_string(),
                position: scope.at(err.line()),
            });
            None
        }
    }
}
