//! Tag registry.
//!
//! Maps a tag name to its grammar: the shape its content is parsed into,
//! the result container it is stored under, whether the layout checker
//! requires or limits it, and an optional content checker. Lookup is by
//! name; registration order is the order the layout checker walks the
//! grammars in.

use super::ast::TagOccurrence;
use crate::validate::{BlockScope, DiagnosticSink, tags};

/// A content checker for the occurrences of one tag.
pub type TagChecker = fn(&[&TagOccurrence], &BlockScope<'_>, &mut dyn DiagnosticSink);

/// The shape a tag's content is parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    /// The tag takes no content.
    Leaf,
    /// Free text.
    Single,
    /// A value followed by a comment.
    KeyValue,
    /// Type, variable name and comment, column-aligned.
    Property,
}

/// How the layout checker treats a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Must be present; missing is an error.
    Required,
    /// Checked when present.
    Optional,
    /// Known to the parser but not checked by the layout rules.
    Tolerated,
}

/// The grammar of one tag.
#[derive(Debug, Clone)]
pub struct TagGrammar {
    /// The tag name without the leading '@'.
    pub name: String,
    /// How the content is shaped.
    pub shape: ElementShape,
    /// The result-container key; several tags may share one.
    pub container: String,
    /// Presence requirement.
    pub requirement: Requirement,
    /// Whether more than one occurrence is allowed.
    pub allow_multiple: bool,
    /// Informational ordering hint (e.g. "follows @package").
    pub order_hint: Option<String>,
    /// Content checker; `None` falls back to a non-empty content check.
    pub checker: Option<TagChecker>,
}

impl TagGrammar {
    /// Creates an optional, single-occurrence grammar stored under its own
    /// name.
    pub fn new(name: impl Into<String>, shape: ElementShape) -> Self {
        let name = name.into();
        Self {
            container: name.clone(),
            name,
            shape,
            requirement: Requirement::Optional,
            allow_multiple: false,
            order_hint: None,
            checker: None,
        }
    }

    /// Marks the tag as required.
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// Marks the tag as tolerated (parsed, not checked).
    pub fn tolerated(mut self) -> Self {
        self.requirement = Requirement::Tolerated;
        self
    }

    /// Allows multiple occurrences.
    pub fn multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    /// Sets the result-container key.
    pub fn with_container(mut self, key: impl Into<String>) -> Self {
        self.container = key.into();
        self
    }

    /// Sets the ordering hint.
    pub fn with_order_hint(mut self, hint: impl Into<String>) -> Self {
        self.order_hint = Some(hint.into());
        self
    }

    /// Sets the content checker.
    pub fn with_checker(mut self, checker: TagChecker) -> Self {
        self.checker = Some(checker);
        self
    }

    /// Returns true if the layout rules apply to this tag.
    pub fn is_checked(&self) -> bool {
        self.requirement != Requirement::Tolerated
    }
}

/// An ordered set of tag grammars.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    grammars: Vec<TagGrammar>,
}

impl TagRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a grammar, replacing any grammar with the same name in
    /// place.
    pub fn register(&mut self, grammar: TagGrammar) {
        match self.grammars.iter_mut().find(|g| g.name == grammar.name) {
            Some(existing) => *existing = grammar,
            None => self.grammars.push(grammar),
        }
    }

    /// Registers every grammar in `grammars`.
    pub fn extend(&mut self, grammars: impl IntoIterator<Item = TagGrammar>) {
        for grammar in grammars {
            self.register(grammar);
        }
    }

    /// Looks up a grammar by tag name.
    pub fn get(&self, name: &str) -> Option<&TagGrammar> {
        self.grammars.iter().find(|g| g.name == name)
    }

    /// Returns true if the tag is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over grammars in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TagGrammar> {
        self.grammars.iter()
    }

    /// Number of registered grammars.
    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    /// The built-in grammars for file-level comments.
    pub fn file_comment() -> Self {
        let mut registry = Self::new();
        registry.extend([
            TagGrammar::new("category", ElementShape::Single)
                .tolerated()
                .with_order_hint("precedes @package"),
            TagGrammar::new("package", ElementShape::Single)
                .required()
                .with_order_hint("follows @category")
                .with_checker(tags::check_package),
            TagGrammar::new("subpackage", ElementShape::Single)
                .with_order_hint("follows @package")
                .with_checker(tags::check_subpackage),
            TagGrammar::new("author", ElementShape::Single)
                .multiple()
                .with_container("authors")
                .with_order_hint("follows @subpackage (if used) or @package")
                .with_checker(tags::check_authors),
            TagGrammar::new("copyright", ElementShape::Single)
                .required()
                .multiple()
                .with_container("copyrights")
                .with_order_hint("follows @author")
                .with_checker(tags::check_copyrights),
            TagGrammar::new("license", ElementShape::KeyValue)
                .required()
                .with_order_hint("follows @copyright (if used) or @author")
                .with_checker(tags::check_license),
            TagGrammar::new("version", ElementShape::Single)
                .required()
                .with_order_hint("follows @license")
                .with_checker(tags::check_version),
            TagGrammar::new("link", ElementShape::Single)
                .tolerated()
                .with_order_hint("follows @version"),
            TagGrammar::new("see", ElementShape::Single)
                .multiple()
                .with_container("sees")
                .with_order_hint("follows @link"),
        ]);
        registry
    }

    /// The built-in grammars for class-level comments.
    pub fn class_comment() -> Self {
        let mut registry = Self::new();
        registry.extend([
            TagGrammar::new("package", ElementShape::Single)
                .required()
                .with_checker(tags::check_package),
            TagGrammar::new("version", ElementShape::Single)
                .required()
                .with_checker(tags::check_version),
            TagGrammar::new("mainclass", ElementShape::Leaf),
            TagGrammar::new("uses", ElementShape::Single)
                .multiple()
                .with_container("uses"),
            TagGrammar::new("see", ElementShape::Single)
                .multiple()
                .with_container("sees"),
            TagGrammar::new("tutorial", ElementShape::Single),
        ]);
        for name in ["property", "property-read", "property-write"] {
            registry.register(
                TagGrammar::new(name, ElementShape::Property)
                    .tolerated()
                    .multiple()
                    .with_container("properties"),
            );
        }
        for name in [
            "category",
            "subpackage",
            "author",
            "copyright",
            "since",
            "deprecated",
            "link",
        ] {
            registry.register(
                TagGrammar::new(name, ElementShape::Single)
                    .tolerated()
                    .multiple(),
            );
        }
        registry.register(
            TagGrammar::new("license", ElementShape::KeyValue)
                .tolerated(),
        );
        registry
    }
}
