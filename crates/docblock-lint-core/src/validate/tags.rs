//! Per-tag content checkers.
//!
//! Each checker receives every occurrence of its tag in source order. Tags
//! that may appear only once are checked through their last occurrence;
//! the layout rules already reported the duplicates.

use super::error::{DiagnosticSink, DocIssue};
use super::scope::BlockScope;
use crate::parse::{TagElement, TagOccurrence};
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// `Display Name <local@domain.tld>`; the local part neither starts nor
/// ends with a dot.
static AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([^<]*)\s+<([0-9a-zA-Z\-_+][0-9a-zA-Z\-_+.A-Za-z0-9_]*[0-9a-zA-Z\-_+]@[0-9a-zA-Z][-.A-Za-z0-9_]*[0-9a-zA-Z]\.[a-zA-Z]{2,7})>$",
    )
    .unwrap()
});

/// `Copyright (C) YYYY[?YYYY] Holder`, separator captured loosely so that
/// a wrong one can be reported.
static COPYRIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Copyright \(C\) ([0-9]{4})((.)([0-9]{4}))? (.+)$").unwrap()
});

/// Returns true if `name` is an underscore name such as `Foo_Bar_Baz`.
///
/// No spaces, starts with an ASCII capital, and every non-empty
/// `_`-separated segment starts with a character that is not lowercase.
pub fn is_underscore_name(name: &str) -> bool {
    if name.contains(' ') || !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return false;
    }
    name.split('_')
        .all(|bit| bit.chars().next().is_none_or(|c| !c.is_lowercase()))
}

/// Builds the underscore-name suggestion for an invalid name.
///
/// Empty segments are kept; only leading and trailing underscores go.
pub fn suggest_underscore_name(name: &str) -> String {
    name.replace(' ', "_")
        .split('_')
        .map(|bit| {
            let mut chars = bit.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("_")
        .trim_matches('_')
        .to_string()
}

fn check_underscore_name(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    let Some(occurrence) = occurrences.last() else {
        return;
    };
    let position = scope.at(occurrence.line);
    let name = occurrence.primary_text();

    if name.is_empty() {
        sink.report(DocIssue::EmptyPackageName {
            tag: occurrence.name.clone(),
            position,
        });
    } else if !is_underscore_name(name) {
        trace!("@{} name '{}' is not an underscore name", occurrence.name, name);
        sink.report(DocIssue::InvalidPackageName {
            tag: occurrence.name.clone(),
            name: name.to_string(),
            suggestion: suggest_underscore_name(name),
            position,
        });
    }
}

/// Checks the `@package` name.
pub fn check_package(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    check_underscore_name(occurrences, scope, sink);
}

/// Checks the `@subpackage` name.
pub fn check_subpackage(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    check_underscore_name(occurrences, scope, sink);
}

/// Checks every `@author` occurrence.
pub fn check_authors(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    for author in occurrences {
        let position = scope.at(author.line);
        let content = author.primary_text();
        if content.is_empty() {
            sink.report(DocIssue::MissingContent {
                kind: scope.kind,
                tag: author.name.clone(),
                position,
            });
        } else if !AUTHOR.is_match(content) {
            sink.report(DocIssue::InvalidAuthor { position });
        }
    }
}

/// Checks every `@copyright` occurrence.
pub fn check_copyrights(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    for copyright in occurrences {
        let position = scope.at(copyright.line);
        let Some(captures) = COPYRIGHT.captures(copyright.primary_text()) else {
            sink.report(DocIssue::InvalidCopyright { position });
            continue;
        };

        let (Some(first), Some(separator), Some(last)) =
            (captures.get(1), captures.get(3), captures.get(4))
        else {
            continue;
        };
        let (first, separator, last) = (first.as_str(), separator.as_str(), last.as_str());

        if separator != "-" {
            sink.report(DocIssue::CopyrightSeparator { position });
        }
        if last < first {
            sink.report(DocIssue::InvalidYearSpan {
                found: format!("{first}{separator}{last}"),
                suggestion: format!("{last}-{first}"),
                position,
            });
        }
    }
}

/// Checks that `@license` has both a URL and a name.
pub fn check_license(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    let Some(license) = occurrences.last() else {
        return;
    };
    let complete = match &license.element {
        TagElement::KeyValue { value, comment } => !value.is_empty() && !comment.is_empty(),
        _ => false,
    };
    if !complete {
        sink.report(DocIssue::InvalidLicense {
            position: scope.at(license.line),
        });
    }
}

/// Checks that `@version` is present and carries an auto-generated marker.
pub fn check_version(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    let Some(version) = occurrences.last() else {
        return;
    };
    let position = scope.at(version.line);
    let content = version.primary_text();
    let markers = &scope.config.version_markers;

    if content.is_empty() {
        sink.report(DocIssue::MissingContent {
            kind: scope.kind,
            tag: version.name.clone(),
            position,
        });
    } else if !markers.is_empty() && !markers.iter().any(|m| content.contains(m.as_str())) {
        let suggestion = markers
            .iter()
            .map(|m| format!("\"{m}\""))
            .collect::<Vec<_>>()
            .join(" or ");
        sink.report(DocIssue::UnmarkedVersion {
            kind: scope.kind,
            version: content.to_string(),
            suggestion,
            position,
        });
    }
}

/// Fallback for tags without a dedicated checker: content must not be
/// empty. Leaf tags carry no content and always pass.
pub fn check_not_empty(
    occurrences: &[&TagOccurrence],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    for occurrence in occurrences {
        if occurrence.element != TagElement::Leaf && occurrence.primary_text().is_empty() {
            sink.report(DocIssue::MissingContent {
                kind: scope.kind,
                tag: occurrence.name.clone(),
                position: scope.at(occurrence.line),
            });
        }
    }
}
