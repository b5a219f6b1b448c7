//! Diagnostic types for documentation comment validation.
//!
//! Every issue carries the absolute token position it is reported at.
//! Issues are appended to a [`DiagnosticSink`] and never modified.

use crate::tokens::TokenSource;
use serde::Serialize;
use std::fmt::{self, Display};
use thiserror::Error;

/// The severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; the comment is usable as is.
    Warning,
    /// The comment violates a layout or content rule.
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which anchor a documentation block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// The block after the first open tag of a file.
    File,
    /// The block before a class-like declaration.
    Class,
}

impl BlockKind {
    /// The capitalized name, for messages that start with the kind.
    pub fn title(self) -> &'static str {
        match self {
            BlockKind::File => "File",
            BlockKind::Class => "Class",
        }
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::File => write!(f, "file"),
            BlockKind::Class => write!(f, "class"),
        }
    }
}

fn newline_word(count: &usize) -> &'static str {
    if *count > 1 { "newlines" } else { "newline" }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An issue found in a documentation comment.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocIssue {
    /// No documentation block belongs to the anchor.
    #[error("Missing {kind} doc comment")]
    MissingBlock {
        /// The block kind.
        kind: BlockKind,
        /// Absolute token position.
        position: usize,
    },

    /// A plain comment stands where the documentation block should be.
    #[error("You must use \"/**\" style comments for a {kind} comment")]
    WrongStyle {
        /// The block kind.
        kind: BlockKind,
        /// Absolute token position.
        position: usize,
    },

    /// The block has neither description nor tags.
    #[error("{} doc comment is empty", .kind.title())]
    EmptyBlock {
        /// The block kind.
        kind: BlockKind,
        /// Absolute token position.
        position: usize,
    },

    /// The block could not be parsed.
    #[error("{message}")]
    Malformed {
        /// The parser's message.
        message: String,
        /// Absolute token position.
        position: usize,
    },

    /// Blank lines precede the short description.
    #[error("Extra {} found before {kind} comment short description", newline_word(.count))]
    ExtraNewlinesBeforeShort {
        /// The block kind.
        kind: BlockKind,
        /// Number of blank lines.
        count: usize,
        /// Absolute token position.
        position: usize,
    },

    /// The descriptions are not separated by exactly one blank line.
    #[error("There must be exactly one blank line between descriptions in {kind} comment")]
    BlankLineBetweenDescriptions {
        /// The block kind.
        kind: BlockKind,
        /// Absolute token position.
        position: usize,
    },

    /// The tags are not separated from the description by exactly one
    /// blank line.
    #[error("There must be exactly one blank line before the tags in {kind} comment")]
    BlankLineBeforeTags {
        /// The block kind.
        kind: BlockKind,
        /// Absolute token position.
        position: usize,
    },

    /// A required tag is absent.
    #[error("Missing @{tag} tag in {kind} comment")]
    MissingTag {
        /// The block kind.
        kind: BlockKind,
        /// The tag name.
        tag: String,
        /// Absolute token position.
        position: usize,
    },

    /// A single-occurrence tag appears more than once.
    #[error("Only 1 @{tag} tag is allowed in a {kind} comment")]
    DuplicateTag {
        /// The block kind.
        kind: BlockKind,
        /// The tag name.
        tag: String,
        /// Absolute token position.
        position: usize,
    },

    /// Occurrences of a repeatable tag are interleaved with other tags.
    #[error("@{tag} tags must be grouped together")]
    UngroupedTags {
        /// The tag name.
        tag: String,
        /// Absolute token position.
        position: usize,
    },

    /// A tag has no content.
    #[error("Content missing for @{tag} tag in {kind} comment")]
    MissingContent {
        /// The block kind.
        kind: BlockKind,
        /// The tag name.
        tag: String,
        /// Absolute token position.
        position: usize,
    },

    /// A tag the block kind does not allow.
    #[error("@{tag} tag is not allowed in {kind} comment")]
    UnknownTag {
        /// The block kind.
        kind: BlockKind,
        /// The tag name.
        tag: String,
        /// Absolute token position.
        position: usize,
    },

    /// A package-style name is not in underscore form.
    #[error("{} name \"{name}\" is not valid; consider \"{suggestion}\" instead", capitalize(.tag))]
    InvalidPackageName {
        /// The tag name.
        tag: String,
        /// The name as written.
        name: String,
        /// The corrected name.
        suggestion: String,
        /// Absolute token position.
        position: usize,
    },

    /// A package-style tag has no name.
    #[error("@{tag} tag must contain a name")]
    EmptyPackageName {
        /// The tag name.
        tag: String,
        /// Absolute token position.
        position: usize,
    },

    /// An author is not in `Display Name <address>` form.
    #[error("Content of the @author tag must be in the form \"Display Name <username@example.com>\"")]
    InvalidAuthor {
        /// Absolute token position.
        position: usize,
    },

    /// A copyright year range uses a separator other than a hyphen.
    #[error("A hyphen must be used between the earliest and latest year")]
    CopyrightSeparator {
        /// Absolute token position.
        position: usize,
    },

    /// A copyright year range runs backwards.
    #[error("Invalid year span \"{found}\" found; consider \"{suggestion}\" instead")]
    InvalidYearSpan {
        /// The span as written.
        found: String,
        /// The span in ascending order.
        suggestion: String,
        /// Absolute token position.
        position: usize,
    },

    /// A copyright lacks the year or the holder.
    #[error("@copyright tag must contain a year and the name of the copyright holder")]
    InvalidCopyright {
        /// Absolute token position.
        position: usize,
    },

    /// A license lacks the URL or the name.
    #[error("@license tag must contain a URL and a license name")]
    InvalidLicense {
        /// Absolute token position.
        position: usize,
    },

    /// A version does not contain an auto-generated marker.
    #[error("Invalid version \"{version}\" in {kind} comment; consider {suggestion} instead")]
    UnmarkedVersion {
        /// The block kind.
        kind: BlockKind,
        /// The version as written.
        version: String,
        /// The accepted markers, quoted.
        suggestion: String,
        /// Absolute token position.
        position: usize,
    },

    /// The first property tag is not preceded by a blank line.
    #[error("First property tag requires a blank newline before it")]
    PropertyNotSeparated {
        /// Absolute token position.
        position: usize,
    },

    /// Two consecutive property types start in different columns.
    #[error("Property types {type_name} ({column}) and {previous_type} ({previous_column}) do not align")]
    PropertyTypesNotAligned {
        /// The type of this property.
        type_name: String,
        /// The type column of this property.
        column: usize,
        /// The type of the previous property.
        previous_type: String,
        /// The type column of the previous property.
        previous_column: usize,
        /// Absolute token position.
        position: usize,
    },

    /// Two consecutive properties have different name or comment columns.
    #[error("Properties {previous} ({previous_index}) and {name} ({index}) do not align")]
    PropertiesNotAligned {
        /// The previous property name.
        previous: String,
        /// The previous property's 1-based index.
        previous_index: usize,
        /// This property name.
        name: String,
        /// This property's 1-based index.
        index: usize,
        /// Absolute token position.
        position: usize,
    },

    /// A property has no variable name.
    #[error("Missing parameter name at position {index}")]
    MissingPropertyName {
        /// 1-based index among the property tags.
        index: usize,
        /// Absolute token position.
        position: usize,
    },

    /// A property has no type.
    #[error("Missing type at position {index}")]
    MissingPropertyType {
        /// 1-based index among the property tags.
        index: usize,
        /// Absolute token position.
        position: usize,
    },

    /// A property has no comment.
    #[error("Missing comment for param \"{name}\" at position {index}")]
    MissingPropertyComment {
        /// The property name.
        name: String,
        /// 1-based index among the property tags.
        index: usize,
        /// Absolute token position.
        position: usize,
    },

    /// An own-line property comment does not start under the type.
    #[error("The property comment must align with the property type")]
    PropertyCommentIndent {
        /// Absolute token position.
        position: usize,
    },

    /// A continuation line of an own-line property comment is indented
    /// differently from its first line.
    #[error("Property comment lines do not align.")]
    PropertyCommentLines {
        /// Absolute token position.
        position: usize,
    },

    /// Inline and own-line property comments are mixed.
    #[error("Mixed style of property indention")]
    MixedPropertyIndent {
        /// Absolute token position.
        position: usize,
    },

    /// More than one space follows the longest property type.
    #[error("Expected 1 space after the longest type")]
    PropertyTypeSpacing {
        /// Absolute token position.
        position: usize,
    },

    /// More than one space follows the longest property name.
    #[error("Expected 1 space after the longest variable name")]
    PropertyNameSpacing {
        /// Absolute token position.
        position: usize,
    },
}

impl DocIssue {
    /// Returns the absolute token position of the issue.
    pub fn position(&self) -> usize {
        match self {
            DocIssue::MissingBlock { position, .. }
            | DocIssue::WrongStyle { position, .. }
            | DocIssue::EmptyBlock { position, .. }
            | DocIssue::Malformed { position, .. }
            | DocIssue::ExtraNewlinesBeforeShort { position, .. }
            | DocIssue::BlankLineBetweenDescriptions { position, .. }
            | DocIssue::BlankLineBeforeTags { position, .. }
            | DocIssue::MissingTag { position, .. }
            | DocIssue::DuplicateTag { position, .. }
            | DocIssue::UngroupedTags { position, .. }
            | DocIssue::MissingContent { position, .. }
            | DocIssue::UnknownTag { position, .. }
            | DocIssue::InvalidPackageName { position, .. }
            | DocIssue::EmptyPackageName { position, .. }
            | DocIssue::InvalidAuthor { position }
            | DocIssue::CopyrightSeparator { position }
            | DocIssue::InvalidYearSpan { position, .. }
            | DocIssue::InvalidCopyright { position }
            | DocIssue::InvalidLicense { position }
            | DocIssue::UnmarkedVersion { position, .. }
            | DocIssue::PropertyNotSeparated { position }
            | DocIssue::PropertyTypesNotAligned { position, .. }
            | DocIssue::PropertiesNotAligned { position, .. }
            | DocIssue::MissingPropertyName { position, .. }
            | DocIssue::MissingPropertyType { position, .. }
            | DocIssue::MissingPropertyComment { position, .. }
            | DocIssue::PropertyCommentIndent { position }
            | DocIssue::PropertyCommentLines { position }
            | DocIssue::MixedPropertyIndent { position }
            | DocIssue::PropertyTypeSpacing { position }
            | DocIssue::PropertyNameSpacing { position } => *position,
        }
    }

    /// Returns the severity of the issue.
    pub fn severity(&self) -> Severity {
        match self {
            DocIssue::UnknownTag { .. }
            | DocIssue::InvalidYearSpan { .. }
            | DocIssue::UnmarkedVersion { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Append-only receiver of issues.
pub trait DiagnosticSink {
    /// Records an issue.
    fn report(&mut self, issue: DocIssue);
}

impl DiagnosticSink for Vec<DocIssue> {
    fn report(&mut self, issue: DocIssue) {
        self.push(issue);
    }
}

/// The result of validating one or more documentation blocks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    /// All issues found, errors and warnings, in report order.
    pub errors: Vec<DocIssue>,
}

impl ValidationResult {
    /// Creates a new empty validation result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validation result with the given issues.
    pub fn with_errors(errors: Vec<DocIssue>) -> Self {
        Self { errors }
    }

    /// Returns true if no issue was found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any issue was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns only errors (not warnings).
    pub fn errors_only(&self) -> impl Iterator<Item = &DocIssue> {
        self.errors
            .iter()
            .filter(|e| e.severity() == Severity::Error)
    }

    /// Returns only warnings.
    pub fn warnings_only(&self) -> impl Iterator<Item = &DocIssue> {
        self.errors
            .iter()
            .filter(|e| e.severity() == Severity::Warning)
    }

    /// Adds an issue to the result.
    pub fn add_error(&mut self, error: DocIssue) {
        self.errors.push(error);
    }

    /// Merges another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Flattens the issues into report records, resolving source lines
    /// through `tokens`.
    pub fn diagnostics<T: TokenSource + ?Sized>(&self, tokens: &T) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(|issue| Diagnostic::from_issue(issue, tokens))
            .collect()
    }
}

impl DiagnosticSink for ValidationResult {
    fn report(&mut self, issue: DocIssue) {
        self.add_error(issue);
    }
}

/// A flattened, serializable issue record for report layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// The rendered message.
    pub message: String,
    /// Absolute token position.
    pub position: usize,
    /// Source line of the token at `position`, when it exists.
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Flattens an issue.
    pub fn from_issue<T: TokenSource + ?Sized>(issue: &DocIssue, tokens: &T) -> Self {
        let position = issue.position();
        Self {
            severity: issue.severity(),
            message: issue.to_string(),
            position,
            line: tokens.token(position).map(|t| t.line),
        }
    }
}
