//! Data structures for parsed documentation comments.
//!
//! All line numbers in this module are offsets within the comment, where
//! line 0 is the line holding the `/**` opener.

use std::fmt::{self, Display};

/// The pseudo tag name recorded first in every [`TagOrder`] for the
/// description section.
pub const DESCRIPTION_ENTRY: &str = "comment";

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    /// The first paragraph of the description (may be empty).
    pub short: String,
    /// The remaining description paragraphs (may be empty).
    pub long: String,
    /// Exact line breaks separating the short and long descriptions.
    /// Empty when there is no long description.
    pub whitespace_between: String,
    /// Number of line breaks between the description and the first tag.
    pub newline_after: usize,
    /// Number of blank lines preceding the short description.
    pub newlines_before_short: usize,
    /// Line of the last short description line, or of the opener when the
    /// short description is empty.
    pub short_end_line: usize,
    /// Line of the first tag, if any.
    pub first_tag_line: Option<usize>,
    /// Tag occurrences in source order.
    pub tags: Vec<TagOccurrence>,
    /// Tag names in source order, including unknown tags.
    pub order: TagOrder,
    /// Tags that are not registered in the registry used for parsing.
    pub unknown: Vec<UnknownTag>,
}

impl ParsedComment {
    /// Returns true if the comment has neither description nor tags.
    pub fn is_empty(&self) -> bool {
        self.short.is_empty() && self.long.is_empty() && self.order.len() <= 1
    }

    /// Returns true if there is a long description.
    pub fn has_long(&self) -> bool {
        !self.long.is_empty()
    }

    /// Returns all occurrences of the named tag, in source order.
    pub fn occurrences(&self, tag: &str) -> Vec<&TagOccurrence> {
        self.tags.iter().filter(|t| t.name == tag).collect()
    }

    /// Returns all occurrences stored under a result-container key.
    pub fn container(&self, key: &str) -> Vec<&TagOccurrence> {
        self.tags.iter().filter(|t| t.container == key).collect()
    }

    /// Returns every property-shaped element in source order.
    pub fn properties(&self) -> Vec<&PropertyElement> {
        self.tags
            .iter()
            .filter_map(|t| match &t.element {
                TagElement::Property(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

/// Tag names in the order they appeared, duplicates preserved.
///
/// The first entry is always [`DESCRIPTION_ENTRY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOrder(Vec<String>);

impl Default for TagOrder {
    fn default() -> Self {
        Self(vec![DESCRIPTION_ENTRY.to_string()])
    }
}

impl TagOrder {
    /// Creates an order holding only the description entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tag name.
    pub fn push(&mut self, tag: impl Into<String>) {
        self.0.push(tag.into());
    }

    /// Number of entries, including the description entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the description entry is always present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the tag appears at least once.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Returns the indexes at which the tag appears.
    pub fn indexes_of(&self, tag: &str) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, t)| *t == tag)
            .map(|(i, _)| i)
            .collect()
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// A tag name that the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    /// The tag name without the leading '@'.
    pub name: String,
    /// Line offset within the comment.
    pub line: usize,
}

/// One occurrence of a tag in a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    /// The tag name without the leading '@'.
    pub name: String,
    /// The result-container key the registry assigned.
    pub container: String,
    /// Line offset within the comment.
    pub line: usize,
    /// Line breaks between the previous non-blank line and this tag.
    pub whitespace_before: String,
    /// The shaped content.
    pub element: TagElement,
}

impl TagOccurrence {
    /// Returns the primary text of the element, used for presence checks.
    pub fn primary_text(&self) -> &str {
        match &self.element {
            TagElement::Leaf => "",
            TagElement::Single { content } => content,
            TagElement::KeyValue { value, .. } => value,
            TagElement::Property(p) => &p.type_name,
        }
    }
}

/// The content of a tag occurrence, shaped by its grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagElement {
    /// A tag without content.
    Leaf,
    /// Free text content.
    Single {
        /// Trimmed content, continuation lines included.
        content: String,
    },
    /// A value followed by a trailing comment (e.g. `@license URL Name`).
    KeyValue {
        /// The first word.
        value: String,
        /// Everything after the first word, trimmed.
        comment: String,
    },
    /// A virtual property declaration.
    Property(PropertyElement),
}

/// A `@property`-style declaration with its exact whitespace runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyElement {
    /// The tag name without the leading '@' (e.g. `property-read`).
    pub tag: String,
    /// The declared type (empty when missing).
    pub type_name: String,
    /// The variable name including `$` (empty when missing).
    pub var_name: String,
    /// The trailing comment, possibly spanning several lines.
    pub comment: String,
    /// Whitespace between the tag and the type.
    pub whitespace_before_type: String,
    /// Whitespace between the type and the variable name.
    pub whitespace_before_var_name: String,
    /// Whitespace between the variable name and the comment; contains a
    /// line break when the comment starts on its own line.
    pub whitespace_before_comment: String,
    /// Line breaks preceding the whole tag.
    pub whitespace_before: String,
    /// 1-based position among the property tags of the comment.
    pub position: usize,
    /// Line offset within the comment.
    pub line: usize,
}

impl PropertyElement {
    /// Width of `tag + whitespace` up to the type column.
    pub fn type_column(&self) -> usize {
        self.tag.len() + self.whitespace_before_type.len()
    }

    /// Returns true if the variable name and comment columns line up with
    /// `other`, measured from the start of the type.
    pub fn aligns_with(&self, other: &PropertyElement) -> bool {
        let this_var = self.type_name.len() + self.whitespace_before_var_name.len();
        let other_var = other.type_name.len() + other.whitespace_before_var_name.len();
        if this_var != other_var {
            return false;
        }

        let this_comment = self.var_name.len() + self.whitespace_before_comment.len();
        let other_comment = other.var_name.len() + other.whitespace_before_comment.len();
        this_comment == other_comment
    }
}

impl Display for PropertyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} {} {}", self.tag, self.type_name, self.var_name)
    }
}
