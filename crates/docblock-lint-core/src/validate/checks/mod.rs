//! Check traits and runner for documentation comment validation.
//!
//! This module provides a trait-based system for implementing validation checks
//! that can be composed and run together over a token stream.

mod class_comment;
mod file_comment;

pub use class_comment::ClassCommentCheck;
pub use file_comment::FileCommentCheck;

use crate::parse::{TagGrammar, TagRegistry};
use crate::tokens::TokenSource;
use crate::validate::ValidationResult;
use log::{debug, info};

/// Markers accepted in a `@version` tag when none are configured.
pub const DEFAULT_VERSION_MARKERS: &[&str] = &["//autogentag//", "//autogen//"];

/// Marker identifying an editor directive comment before the file comment.
pub const DEFAULT_DIRECTIVE_MARKER: &str = "vim:";

/// Configuration options for validation checks.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Substrings of which a `@version` value must contain at least one.
    /// An empty list disables the version marker warning.
    pub version_markers: Vec<String>,
    /// A plain comment containing this text may precede the file comment.
    /// An empty marker disables the exemption.
    pub directive_marker: String,
    /// Additional tag grammars registered into both built-in sets.
    pub extra_tags: Vec<TagGrammar>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            version_markers: DEFAULT_VERSION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            directive_marker: DEFAULT_DIRECTIVE_MARKER.to_string(),
            extra_tags: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accepted version markers.
    pub fn with_version_markers(mut self, markers: Vec<String>) -> Self {
        self.version_markers = markers;
        self
    }

    /// Sets the editor directive marker.
    pub fn with_directive_marker(mut self, marker: impl Into<String>) -> Self {
        self.directive_marker = marker.into();
        self
    }

    /// Adds a tag grammar to both built-in sets.
    pub fn with_extra_tag(mut self, grammar: TagGrammar) -> Self {
        self.extra_tags.push(grammar);
        self
    }

    /// The file comment registry with the extra tags applied.
    pub fn file_registry(&self) -> TagRegistry {
        let mut registry = TagRegistry::file_comment();
        registry.extend(self.extra_tags.iter().cloned());
        registry
    }

    /// The class comment registry with the extra tags applied.
    pub fn class_registry(&self) -> TagRegistry {
        let mut registry = TagRegistry::class_comment();
        registry.extend(self.extra_tags.iter().cloned());
        registry
    }
}

/// Context provided to checks.
pub struct CheckContext<'a> {
    /// The token stream of one source file.
    pub tokens: &'a dyn TokenSource,
    /// Configuration options.
    pub config: &'a CheckConfig,
}

impl<'a> CheckContext<'a> {
    /// Creates a new check context.
    pub fn new(tokens: &'a dyn TokenSource, config: &'a CheckConfig) -> Self {
        Self { tokens, config }
    }
}

impl std::fmt::Debug for CheckContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckContext")
            .field("tokens", &format_args!("<{} tokens>", self.tokens.len()))
            .field("config", &self.config)
            .finish()
    }
}

/// A validation check over one token stream.
pub trait Check: Send + Sync {
    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Runs the check and returns validation results.
    fn run(&self, ctx: &CheckContext) -> ValidationResult;
}

/// Runs multiple validation checks and collects results.
#[derive(Default)]
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRunner {
    /// Creates a new check runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a check runner with all built-in checks.
    pub fn with_all_checks() -> Self {
        let mut runner = Self::new();
        runner.add_check(FileCommentCheck::new());
        runner.add_check(ClassCommentCheck::new());
        runner
    }

    /// Adds a check.
    pub fn add_check<C: Check + 'static>(&mut self, check: C) {
        self.checks.push(Box::new(check));
    }

    /// Names of the registered checks, in run order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Runs all checks and returns combined results.
    pub fn run(&self, tokens: &dyn TokenSource, config: &CheckConfig) -> ValidationResult {
        info!("Running {} checks", self.checks.len());
        let ctx = CheckContext::new(tokens, config);
        let mut result = ValidationResult::new();

        for check in &self.checks {
            let check_result = self.run_one(check.as_ref(), &ctx);
            result.merge(check_result);
        }

        info!("Checks complete: {} total issues", result.errors.len());
        result
    }

    /// Runs all checks and returns the results keyed by check name.
    pub fn run_each(
        &self,
        tokens: &dyn TokenSource,
        config: &CheckConfig,
    ) -> Vec<(&'static str, ValidationResult)> {
        let ctx = CheckContext::new(tokens, config);
        self.checks
            .iter()
            .map(|check| (check.name(), self.run_one(check.as_ref(), &ctx)))
            .collect()
    }

    fn run_one(&self, check: &dyn Check, ctx: &CheckContext) -> ValidationResult {
        debug!("Running check: {}", check.name());
        let result = check.run(ctx);
        debug!(
            "Check '{}' found {} issues",
            check.name(),
            result.errors.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ElementShape;
    use crate::tokens::TokenStreamBuilder;

    #[test]
    fn check_config_defaults() {
        let config = CheckConfig::new();
        assert_eq!(config.version_markers, vec!["//autogentag//", "//autogen//"]);
        assert_eq!(config.directive_marker, "vim:");
        assert!(config.extra_tags.is_empty());
    }

    #[test]
    fn check_config_builder() {
        let config = CheckConfig::new()
            .with_version_markers(vec!["$Id$".to_string()])
            .with_directive_marker("-*-");

        assert_eq!(config.version_markers, vec!["$Id$"]);
        assert_eq!(config.directive_marker, "-*-");
    }

    #[test]
    fn extra_tags_reach_both_registries() {
        let config =
            CheckConfig::new().with_extra_tag(TagGrammar::new("internal", ElementShape::Leaf));

        assert!(config.file_registry().contains("internal"));
        assert!(config.class_registry().contains("internal"));
        assert!(!TagRegistry::file_comment().contains("internal"));
    }

    #[test]
    fn check_context_debug_hides_tokens() {
        let tokens = TokenStreamBuilder::new().open_tag().build();
        let config = CheckConfig::new();
        let ctx = CheckContext::new(&tokens, &config);
        assert!(format!("{:?}", ctx).contains("<1 tokens>"));
    }

    #[test]
    fn check_runner_creation() {
        let runner = CheckRunner::new();
        assert!(runner.checks.is_empty());
    }

    #[test]
    fn check_runner_with_all_checks() {
        let runner = CheckRunner::with_all_checks();
        assert_eq!(runner.check_names(), vec!["file-comment", "class-comment"]);
    }

    #[test]
    fn runner_reports_missing_blocks() {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .other("echo")
            .newline()
            .class_declaration("Foo")
            .build();
        let config = CheckConfig::new();
        let runner = CheckRunner::with_all_checks();

        let result = runner.run(&tokens, &config);
        let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec!["Missing file doc comment", "Missing class doc comment"]
        );

        let each = runner.run_each(&tokens, &config);
        assert_eq!(each.len(), 2);
        assert_eq!(each[0].0, "file-comment");
        assert_eq!(each[0].1.errors.len(), 1);
    }

    #[test]
    fn runner_counts_lines_with_crlf() {
        let file_doc = "/**
 * Short description.
 *
 * @package   Foo_Bar
 * @author    Jane Doe <jane@example.com>
 * @copyright Copyright (C) 2007-2008 Jane Doe
 * @license   http://example.com/license BSD
 * @version   //autogentag//
 * @frobnicate x
 */";
        let class_doc = "/**
 * Short description.
 *
 * @property int $count
 *           The count
 *           of things.
 * @property-read string $name
 *                The name.
 *
 * @package Foo_Bar
 * @version //autogen//
 */";
        let tokens = TokenStreamBuilder::new()
            .with_eol("\r\n")
            .open_tag()
            .doc_comment(&file_doc.replace('\n', "\r\n"))
            .newlines(2)
            .doc_comment(&class_doc.replace('\n', "\r\n"))
            .newline()
            .class_declaration("Foo")
            .build();

        let result = CheckRunner::with_all_checks().run(&tokens, &CheckConfig::new());
        assert!(result.is_ok(), "{:?}", result.errors);

        let broken = file_doc.replace(" *\n * @package", " * @package");
        let tokens = TokenStreamBuilder::new()
            .with_eol("\r\n")
            .open_tag()
            .doc_comment(&broken.replace('\n', "\r\n"))
            .newlines(2)
            .doc_comment(&class_doc.replace('\n', "\r\n"))
            .newline()
            .class_declaration("Foo")
            .build();
        let result = CheckRunner::with_all_checks().run(&tokens, &CheckConfig::new());
        let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec!["There must be exactly one blank line before the tags in file comment"]
        );
        assert_eq!(result.errors[0].position(), 3);
    }
}
