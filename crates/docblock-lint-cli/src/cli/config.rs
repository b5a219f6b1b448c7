//! Configuration handling for the CLI.
//!
//! This module converts CLI arguments into the library's configuration types
//! and loads the token dumps to validate.

use crate::cli::{Args, CheckKind, FailureLevel};
use docblock_lint_core::tokens::TokenStream;
use docblock_lint_core::validate::checks::{
    CheckConfig, CheckRunner, ClassCommentCheck, FileCommentCheck,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Failed to read a token dump.
    #[error("failed to read token dump '{path}': {source}")]
    ReadTokens {
        /// The dump path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A token dump is not valid JSON or uses unknown token kinds.
    #[error("failed to parse token dump '{path}': {source}")]
    ParseTokens {
        /// The dump path.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// A token dump declares an empty line separator.
    #[error("token dump '{path}' has an empty line separator")]
    EmptyEol {
        /// The dump path.
        path: PathBuf,
    },
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Validation passed successfully.
    Success = 0,
    /// Application startup failed (wrong configuration or unreadable input).
    StartupFailure = 1,
    /// Validation failed (checks found issues).
    ValidationFailed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Validated and processed configuration for running the validator.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Token dumps to validate.
    pub inputs: Vec<PathBuf>,
    /// Configuration for the check runner.
    pub check_config: CheckConfig,
    /// Which checks to run.
    pub checks: Vec<CheckKind>,
    /// Failure level for determining exit code.
    pub failure_level: FailureLevel,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        for path in &args.paths {
            if !path.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "input '{}' is not a file",
                    path.display()
                )));
            }
        }

        // Build check config
        let mut check_config =
            CheckConfig::new().with_directive_marker(args.directive_marker.clone());

        if let Some(ref markers) = args.version_markers {
            let markers = markers.iter().filter(|m| !m.is_empty()).cloned().collect();
            check_config = check_config.with_version_markers(markers);
        }

        Ok(Self {
            inputs: args.paths.clone(),
            check_config,
            checks: args.effective_checks(),
            failure_level: args.check_failure_level,
            json_output: args.json,
        })
    }

    /// Builds a runner with the selected checks, in selection order.
    pub fn runner(&self) -> CheckRunner {
        let mut runner = CheckRunner::new();
        for check in &self.checks {
            match check {
                CheckKind::FileComment => runner.add_check(FileCommentCheck::new()),
                CheckKind::ClassComment => runner.add_check(ClassCommentCheck::new()),
            }
        }
        runner
    }

    /// Determines the exit code based on validation results.
    pub fn exit_code_for_results(&self, has_errors: bool, has_warnings: bool) -> ExitCode {
        if has_errors {
            return ExitCode::ValidationFailed;
        }

        match self.failure_level {
            FailureLevel::Warning if has_warnings => ExitCode::ValidationFailed,
            _ => ExitCode::Success,
        }
    }
}

/// Reads and parses a JSON token dump.
pub fn load_tokens(path: &Path) -> Result<TokenStream, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadTokens {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = TokenStream::from_json(&content).map_err(|source| ConfigError::ParseTokens {
        path: path.to_path_buf(),
        source,
    })?;
    if tokens.eol.is_empty() {
        return Err(ConfigError::EmptyEol {
            path: path.to_path_buf(),
        });
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use docblock_lint_core::tokens::{TokenSource, TokenStreamBuilder};
    use std::fs;
    use tempfile::TempDir;

    fn write_dump(dir: &TempDir, name: &str) -> PathBuf {
        let tokens = TokenStreamBuilder::new()
            .open_tag()
            .doc_comment("/**\n * Short.\n */")
            .newlines(2)
            .class_declaration("Foo")
            .build();
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_string(&tokens).unwrap()).unwrap();
        path
    }

    fn parse(dir: &TempDir, extra: &[&str]) -> Args {
        let path = write_dump(dir, "tokens.json");
        let mut argv = vec!["docblock-lint".to_string()];
        argv.extend(extra.iter().map(|s| s.to_string()));
        argv.push(path.to_string_lossy().into_owned());
        Args::parse_from(argv)
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::StartupFailure), 1);
        assert_eq!(i32::from(ExitCode::ValidationFailed), 3);
    }

    #[test]
    fn test_load_tokens() {
        let dir = TempDir::new().unwrap();
        let path = write_dump(&dir, "tokens.json");
        let tokens = load_tokens(&path).unwrap();
        assert!(!tokens.is_empty());
    }

    #[test]
    fn test_load_tokens_errors() {
        let dir = TempDir::new().unwrap();
        let missing = load_tokens(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::ReadTokens { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();
        let err = load_tokens(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::ParseTokens { .. }));
        assert!(err.to_string().contains("bad.json"));

        let no_eol = dir.path().join("no_eol.json");
        fs::write(
            &no_eol,
            r#"{"eol": "", "tokens": [{"kind": "open_tag", "text": "<?php", "line": 1}]}"#,
        )
        .unwrap();
        let err = load_tokens(&no_eol).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyEol { .. }));
        assert!(err.to_string().contains("empty line separator"));
    }

    #[test]
    fn test_validated_config_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ValidatedConfig::from_args(&parse(&dir, &[])).unwrap();

        assert_eq!(config.inputs.len(), 1);
        assert_eq!(config.checks, CheckKind::all());
        assert_eq!(
            config.check_config.version_markers,
            vec!["//autogentag//", "//autogen//"]
        );
        assert_eq!(config.runner().check_names(), vec!["file-comment", "class-comment"]);
    }

    #[test]
    fn test_validated_config_options() {
        let dir = TempDir::new().unwrap();
        let args = parse(
            &dir,
            &[
                "--checks",
                "class-comment",
                "--version-marker",
                "$Id$",
                "--directive-marker",
                "emacs:",
            ],
        );
        let config = ValidatedConfig::from_args(&args).unwrap();

        assert_eq!(config.check_config.version_markers, vec!["$Id$"]);
        assert_eq!(config.check_config.directive_marker, "emacs:");
        assert_eq!(config.runner().check_names(), vec!["class-comment"]);
    }

    #[test]
    fn test_empty_version_marker_disables_warning() {
        let dir = TempDir::new().unwrap();
        let config = ValidatedConfig::from_args(&parse(&dir, &["--version-marker", ""])).unwrap();
        assert!(config.check_config.version_markers.is_empty());
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let args = Args::parse_from(["docblock-lint", "/nonexistent/tokens.json"]);
        let err = ValidatedConfig::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tokens.json"));
    }

    #[test]
    fn test_exit_code_for_results() {
        let dir = TempDir::new().unwrap();
        let config = ValidatedConfig::from_args(&parse(&dir, &[])).unwrap();

        assert_eq!(config.exit_code_for_results(false, false), ExitCode::Success);
        assert_eq!(
            config.exit_code_for_results(true, false),
            ExitCode::ValidationFailed
        );
        assert_eq!(
            config.exit_code_for_results(false, true),
            ExitCode::ValidationFailed
        );
    }

    #[test]
    fn test_exit_code_error_level() {
        let dir = TempDir::new().unwrap();
        let config =
            ValidatedConfig::from_args(&parse(&dir, &["--check-failure-level", "error"])).unwrap();

        assert_eq!(config.exit_code_for_results(false, true), ExitCode::Success);
        assert_eq!(
            config.exit_code_for_results(true, true),
            ExitCode::ValidationFailed
        );
    }
}
