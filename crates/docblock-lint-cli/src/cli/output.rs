//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for validation results.

use docblock_lint_core::tokens::TokenSource;
use docblock_lint_core::validate::{Diagnostic, Severity, ValidationResult};
use colored::Colorize;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// JSON output format, one list per check.
#[derive(Debug, Default, Serialize)]
pub struct JsonOutput {
    /// File comment check results.
    #[serde(rename = "file-comment")]
    pub file_comment: Vec<JsonIssue>,
    /// Class comment check results.
    #[serde(rename = "class-comment")]
    pub class_comment: Vec<JsonIssue>,
}

impl JsonOutput {
    /// Creates a new empty JSON output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds issues to the appropriate check category.
    pub fn add_check_results(&mut self, check_name: &str, issues: &[ReportedIssue]) {
        let issues = issues.iter().map(JsonIssue::from);

        match check_name {
            "file-comment" => self.file_comment.extend(issues),
            "class-comment" => self.class_comment.extend(issues),
            _ => {} // Unknown check name, ignore
        }
    }

    /// Writes the JSON output to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// A single issue in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonIssue {
    /// The token dump the issue was found in.
    pub file: String,
    /// Source line of the offending token, if known.
    pub line: Option<usize>,
    /// Token position of the issue.
    pub position: usize,
    /// Human-readable message.
    pub message: String,
    /// Severity of the issue.
    pub severity: Severity,
}

impl From<&ReportedIssue> for JsonIssue {
    fn from(issue: &ReportedIssue) -> Self {
        Self {
            file: issue.file.clone(),
            line: issue.diagnostic.line,
            position: issue.diagnostic.position,
            message: issue.diagnostic.message.clone(),
            severity: issue.diagnostic.severity,
        }
    }
}

/// An issue together with the input it came from.
#[derive(Debug, Clone)]
pub struct ReportedIssue {
    /// The token dump the issue was found in.
    pub file: String,
    /// The flattened issue.
    pub diagnostic: Diagnostic,
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes a header for a check.
    pub fn write_check_header(&mut self, check_name: &str) -> std::io::Result<()> {
        let header = format!("==> {}", check_name);
        if self.use_colors {
            writeln!(self.writer, "\n{}", header.cyan().bold())?;
        } else {
            writeln!(self.writer, "\n{}", header)?;
        }
        Ok(())
    }

    /// Writes the issues of a check.
    pub fn write_check_results(
        &mut self,
        check_name: &str,
        issues: &[ReportedIssue],
    ) -> std::io::Result<()> {
        if issues.is_empty() {
            return Ok(());
        }

        self.write_check_header(check_name)?;

        for issue in issues {
            self.write_issue(issue)?;
        }

        Ok(())
    }

    /// Writes a single issue.
    pub fn write_issue(&mut self, issue: &ReportedIssue) -> std::io::Result<()> {
        let severity = issue.diagnostic.severity;
        let location = match issue.diagnostic.line {
            Some(line) => format!("{}:{}", issue.file, line),
            None => issue.file.clone(),
        };

        let label = match severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };

        if self.use_colors {
            let colored_label = match severity {
                Severity::Error => format!("[{}]", label).red().bold(),
                Severity::Warning => format!("[{}]", label).yellow().bold(),
            };
            writeln!(
                self.writer,
                "  {} {} {}",
                colored_label,
                location.dimmed(),
                issue.diagnostic.message
            )?;
        } else {
            writeln!(
                self.writer,
                "  [{}] {} {}",
                label, location, issue.diagnostic.message
            )?;
        }

        Ok(())
    }

    /// Writes a summary of all validation results.
    pub fn write_summary(
        &mut self,
        total_errors: usize,
        total_warnings: usize,
    ) -> std::io::Result<()> {
        writeln!(self.writer)?;

        if total_errors == 0 && total_warnings == 0 {
            let message = "✓ All documentation comments are valid";
            if self.use_colors {
                writeln!(self.writer, "{}", message.green().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        } else {
            let message = format!(
                "✗ Found {} error(s) and {} warning(s)",
                total_errors, total_warnings
            );
            if self.use_colors {
                writeln!(self.writer, "{}", message.red().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        }

        Ok(())
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}

/// Collects all validation results organized by check name.
#[derive(Debug, Default)]
pub struct ValidationResults {
    results: HashMap<String, Vec<ReportedIssue>>,
    order: Vec<String>,
}

impl ValidationResults {
    /// Creates a new empty results collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the results of a check run over one input.
    ///
    /// `tokens` resolves token positions to source lines.
    pub fn add<T: TokenSource + ?Sized>(
        &mut self,
        check_name: impl Into<String>,
        file: &str,
        result: &ValidationResult,
        tokens: &T,
    ) {
        let name = check_name.into();
        if !self.results.contains_key(&name) {
            self.order.push(name.clone());
        }
        let issues = result
            .diagnostics(tokens)
            .into_iter()
            .map(|diagnostic| ReportedIssue {
                file: file.to_string(),
                diagnostic,
            });
        self.results.entry(name).or_default().extend(issues);
    }

    fn count(&self, severity: Severity) -> usize {
        self.results
            .values()
            .flatten()
            .filter(|i| i.diagnostic.severity == severity)
            .count()
    }

    /// Returns the total number of errors.
    pub fn total_errors(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the total number of warnings.
    pub fn total_warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns true if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors() > 0
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.total_warnings() > 0
    }

    /// Iterates over results in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReportedIssue])> {
        self.order.iter().filter_map(|name| {
            self.results
                .get(name)
                .map(|issues| (name.as_str(), issues.as_slice()))
        })
    }

    /// Writes results in human-readable format.
    pub fn write_human<W: Write>(&self, writer: &mut W, use_colors: bool) -> std::io::Result<()> {
        let mut output = HumanOutput::new(writer, use_colors);

        for (name, issues) in self.iter() {
            output.write_check_results(name, issues)?;
        }

        output.write_summary(self.total_errors(), self.total_warnings())?;

        Ok(())
    }

    /// Writes results in JSON format.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut json_output = JsonOutput::new();

        for (name, issues) in self.iter() {
            json_output.add_check_results(name, issues);
        }

        json_output.write(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docblock_lint_core::tokens::{TokenStream, TokenStreamBuilder};
    use docblock_lint_core::validate::{BlockKind, DocIssue};

    fn tokens() -> TokenStream {
        TokenStreamBuilder::new()
            .open_tag()
            .newline()
            .other("echo")
            .build()
    }

    fn missing_file_comment() -> ValidationResult {
        ValidationResult::with_errors(vec![DocIssue::MissingBlock {
            kind: BlockKind::File,
            position: 2,
        }])
    }

    fn unknown_tag() -> ValidationResult {
        ValidationResult::with_errors(vec![DocIssue::UnknownTag {
            kind: BlockKind::Class,
            tag: "todo".to_string(),
            position: 0,
        }])
    }

    #[test]
    fn test_json_issue_from_reported_issue() {
        let mut results = ValidationResults::new();
        results.add("file-comment", "a.json", &missing_file_comment(), &tokens());

        let (_, issues) = results.iter().next().unwrap();
        let issue = JsonIssue::from(&issues[0]);
        assert_eq!(issue.file, "a.json");
        assert_eq!(issue.line, Some(3));
        assert_eq!(issue.position, 2);
        assert_eq!(issue.message, "Missing file doc comment");
        assert_eq!(issue.severity, Severity::Error);
    }

    #[test]
    fn test_json_output_serialize() {
        let mut results = ValidationResults::new();
        results.add("file-comment", "a.json", &missing_file_comment(), &tokens());
        results.add("class-comment", "a.json", &unknown_tag(), &tokens());

        let mut buf = Vec::new();
        results.write_json(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["file-comment"].as_array().unwrap().len(), 1);
        assert_eq!(json["class-comment"][0]["severity"], "warning");
        assert_eq!(json["file-comment"][0]["line"], 3);
    }

    #[test]
    fn test_human_output_no_colors() {
        let mut results = ValidationResults::new();
        results.add("class-comment", "a.json", &unknown_tag(), &tokens());

        let mut buf = Vec::new();
        results.write_human(&mut buf, false).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("==> class-comment"));
        assert!(text.contains("[WARN] a.json:1 @todo tag is not allowed in class comment"));
        assert!(text.contains("0 error(s) and 1 warning(s)"));
    }

    #[test]
    fn test_validation_results_totals() {
        let mut results = ValidationResults::new();
        results.add("file-comment", "a.json", &missing_file_comment(), &tokens());
        results.add("class-comment", "a.json", &unknown_tag(), &tokens());
        results.add("class-comment", "b.json", &unknown_tag(), &tokens());

        assert_eq!(results.total_errors(), 1);
        assert_eq!(results.total_warnings(), 2);
        assert!(results.has_errors());
        assert!(results.has_warnings());
    }

    #[test]
    fn test_validation_results_order() {
        let mut results = ValidationResults::new();
        results.add("class-comment", "a.json", &ValidationResult::new(), &tokens());
        results.add("file-comment", "a.json", &ValidationResult::new(), &tokens());

        let names: Vec<_> = results.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["class-comment", "file-comment"]);
    }

    #[test]
    fn test_human_output_summary_valid() {
        let mut buf = Vec::new();
        let mut output = HumanOutput::new(&mut buf, false);
        output.write_summary(0, 0).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("valid"));
    }

    #[test]
    fn test_human_output_error() {
        let mut buf = Vec::new();
        let mut output = HumanOutput::new(&mut buf, false);
        output.write_error("boom").unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "Error: boom\n");
    }
}
