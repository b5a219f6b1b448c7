//! CLI module for the documentation comment validator.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Documentation comment validator - checks file and class doc comments.
///
/// Reads JSON token dumps produced by a host tokenizer and runs the
/// comment checks against each of them. Supports both human-readable and
/// JSON output formats.
#[derive(Parser, Debug)]
#[command(name = "docblock-lint")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Token dump files to validate.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Comma-separated list of checks to run.
    /// Possible values: file-comment, class-comment
    #[arg(long, env = "CHECKS", value_delimiter = ',')]
    pub checks: Option<Vec<CheckKind>>,

    /// Markers of which a @version tag must contain one.
    /// Pass an empty value to disable the version marker warning.
    #[arg(long = "version-marker", env = "VERSION_MARKERS", value_delimiter = ',')]
    pub version_markers: Option<Vec<String>>,

    /// Marker of an editor directive comment allowed before the file comment.
    #[arg(long, env = "DIRECTIVE_MARKER", default_value = "vim:")]
    pub directive_marker: String,

    /// Failure level for validation issues.
    /// 'warning' treats both errors and warnings as failures.
    /// 'error' only treats errors as failures.
    #[arg(long, env = "CHECK_FAILURE_LEVEL", default_value = "warning")]
    pub check_failure_level: FailureLevel,

    /// Output validation results as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum CheckKind {
    /// Check the documentation comment at the top of each file.
    FileComment,
    /// Check the documentation comment of each class, interface and trait.
    ClassComment,
}

impl CheckKind {
    /// Returns all checks.
    pub fn all() -> Vec<Self> {
        vec![Self::FileComment, Self::ClassComment]
    }
}

/// Failure level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FailureLevel {
    /// Treat both warnings and errors as failures (exit code 3).
    #[default]
    Warning,
    /// Only treat errors as failures.
    Error,
}

impl Args {
    /// Returns the checks to run, defaulting to all checks.
    pub fn effective_checks(&self) -> Vec<CheckKind> {
        self.checks.clone().unwrap_or_else(CheckKind::all)
    }
}
