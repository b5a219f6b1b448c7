//! Layout rules shared by file and class comments.
//!
//! Blank-line placement around the descriptions, tag presence, repetition
//! and grouping. Every rule is checked independently; a violation never
//! stops the remaining rules.

use super::error::{DiagnosticSink, DocIssue};
use super::scope::BlockScope;
use super::tags;
use crate::parse::{ParsedComment, Requirement, TagRegistry};
use log::{debug, trace};

/// Runs the description spacing rules followed by the tag rules.
pub fn check_layout(
    comment: &ParsedComment,
    registry: &TagRegistry,
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    check_description_spacing(comment, scope, sink);
    check_tags(comment, registry, scope, sink);
}

/// Checks the blank lines before the short description, between the
/// descriptions, and before the tags.
pub fn check_description_spacing(
    comment: &ParsedComment,
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    if !comment.short.is_empty() && comment.newlines_before_short > 0 {
        sink.report(DocIssue::ExtraNewlinesBeforeShort {
            kind: scope.kind,
            count: comment.newlines_before_short,
            position: scope.at(1),
        });
    }

    if comment.has_long() && scope.count_eols(&comment.whitespace_between) != 2 {
        sink.report(DocIssue::BlankLineBetweenDescriptions {
            kind: scope.kind,
            position: scope.at(comment.short_end_line + 1),
        });
    }

    if comment.order.len() > 1 && comment.newline_after != 2 {
        sink.report(DocIssue::BlankLineBeforeTags {
            kind: scope.kind,
            position: scope.at(comment.first_tag_line.unwrap_or(0)),
        });
    }
}

/// Walks the registry in registration order and checks presence,
/// repetition, grouping and content of every checked tag.
pub fn check_tags(
    comment: &ParsedComment,
    registry: &TagRegistry,
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    for grammar in registry.iter().filter(|g| g.is_checked()) {
        let occurrences = comment.occurrences(&grammar.name);

        let Some(last) = occurrences.last() else {
            if grammar.requirement == Requirement::Required {
                debug!("Required tag @{} is missing", grammar.name);
                sink.report(DocIssue::MissingTag {
                    kind: scope.kind,
                    tag: grammar.name.clone(),
                    position: scope.end,
                });
            }
            continue;
        };

        trace!("Checking {} occurrence(s) of @{}", occurrences.len(), grammar.name);

        if occurrences.len() > 1 {
            if !grammar.allow_multiple {
                sink.report(DocIssue::DuplicateTag {
                    kind: scope.kind,
                    tag: grammar.name.clone(),
                    position: scope.at(last.line),
                });
            } else {
                let indexes = comment.order.indexes_of(&grammar.name);
                let mut expected = indexes[0];
                for (occurrence, index) in occurrences.iter().zip(&indexes) {
                    if *index != expected {
                        sink.report(DocIssue::UngroupedTags {
                            tag: grammar.name.clone(),
                            position: scope.at(occurrence.line),
                        });
                        break;
                    }
                    expected += 1;
                }
            }
        }

        let checker = grammar.checker.unwrap_or(tags::check_not_empty);
        checker(&occurrences, scope, sink);
    }
}
