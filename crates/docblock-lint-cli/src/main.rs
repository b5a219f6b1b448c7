//! Documentation Comment Validator CLI
//!
//! A command-line tool for validating file and class documentation comments
//! in pre-tokenized source files.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, ValidatedConfig, load_tokens};
use cli::output::{HumanOutput, ValidationResults};

fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    let exit_code = run(args);
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run the validator with the given arguments.
fn run(args: Args) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let use_colors = !args.json && io::stderr().is_terminal();
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let use_colors = !config.json_output && io::stdout().is_terminal();
    debug!("Validated configuration: {:?}", config);

    let runner = config.runner();
    let mut results = ValidationResults::new();

    for path in &config.inputs {
        info!("Validating {}", path.display());

        let tokens = match load_tokens(path) {
            Ok(tokens) => tokens,
            Err(e) => {
                write_error(&mut stderr, &e.to_string(), use_colors);
                return ExitCode::StartupFailure;
            }
        };

        let file = path.display().to_string();
        for (name, result) in runner.run_each(&tokens, &config.check_config) {
            debug!(
                "Check '{}' found {} issue(s) in {}",
                name,
                result.errors.len(),
                file
            );
            results.add(name, &file, &result, &tokens);
        }
    }

    // Output results
    if config.json_output {
        if let Err(e) = results.write_json(&mut stdout) {
            error!("Failed to write JSON output: {}", e);
            return ExitCode::StartupFailure;
        }
    } else if let Err(e) = results.write_human(&mut stdout, use_colors) {
        error!("Failed to write output: {}", e);
        return ExitCode::StartupFailure;
    }

    // Determine exit code
    config.exit_code_for_results(results.has_errors(), results.has_warnings())
}

/// Write an error message to the writer.
fn write_error<W: Write>(writer: &mut W, message: &str, use_colors: bool) {
    let _ = HumanOutput::new(writer, use_colors).write_error(message);
}
