//! CLI module for the unparser
//!
//! This module provides the command-line interface.
//!
//! ## Commands
//!
//! - `emit <file>` - Parse a Ruby file and print the generated source
//! - `render <file>` - Emit source from an s-expression file
//! - `sexp <file>` - Print the parsed (optionally normalized) tree
//! - `check <path>...` - Verify that emitted source round-trips for every `.rb` file
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::emitter::EmitConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Turn Ruby syntax trees back into Ruby source
#[derive(Parser, Debug)]
#[command(name = "unparser")]
#[command(version = VERSION)]
#[command(about = "Turn Ruby syntax trees back into Ruby source", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a Ruby file and print the generated source
    Emit {
        /// Ruby source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write every literal in canonical form instead of copying it from the source
        #[arg(long)]
        canonical: bool,
        /// Spaces per indentation level
        #[arg(long, value_name = "N", default_value_t = 2)]
        indent_width: usize,
    },

    /// Emit source from an s-expression tree
    Render {
        /// File holding one s-expression
        #[arg(value_name = "SEXP_FILE")]
        file: PathBuf,
        /// Spaces per indentation level
        #[arg(long, value_name = "N", default_value_t = 2)]
        indent_width: usize,
    },

    /// Print the parsed tree as an s-expression
    Sexp {
        /// Ruby source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Normalize the tree first
        #[arg(long)]
        preprocess: bool,
    },

    /// Check that emitted source parses back to an equivalent tree
    Check {
        /// Files or directories to check
        #[arg(value_name = "PATH", default_value = ".")]
        paths: Vec<PathBuf>,
        /// Write every literal in canonical form instead of copying it from the source
        #[arg(long)]
        canonical: bool,
        /// Stop on first failure
        #[arg(short = 'x', long)]
        fail_fast: bool,
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Emission settings for the `--canonical` / `--indent-width` flags.
pub fn emit_config(canonical: bool, indent_width: usize) -> EmitConfig {
    EmitConfig::new()
        .with_indent_width(indent_width)
        .with_trust_source_locations(!canonical)
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Emit {
            file,
            canonical,
            indent_width,
        } => commands::emit_file(&file, &emit_config(canonical, indent_width)),
        Command::Render { file, indent_width } => commands::render_sexp_file(&file, &emit_config(true, indent_width)),
        Command::Sexp { file, preprocess } => commands::print_sexp(&file, preprocess),
        Command::Check {
            paths,
            canonical,
            fail_fast,
            verbose,
        } => commands::check_paths(&paths, &emit_config(canonical, 2), fail_fast, verbose),
    }
}

// ============================================================================
// Tests
// ============================================================================
