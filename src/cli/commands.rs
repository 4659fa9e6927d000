//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use unparser_syntax::ast::Node;
use unparser_syntax::diagnostics::{CompileError, SourceDiagnostic};
use unparser_syntax::parser;
use unparser_syntax::sexp::{read_sexp, to_sexp};

use crate::emitter::{EmitConfig, emit_with_config};
use crate::equivalence::{RubyParser, Verdict, Verifier, VerifyError};
use crate::preprocessor;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let display = file_path.display();
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", display, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            display,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", display, e)))
}

/// Render parse errors with their source context.
pub fn format_errors(file_name: &str, source: &str, errors: &[CompileError]) -> String {
    let mut msg = String::new();
    for err in errors {
        let report = miette::Report::new(SourceDiagnostic::new(file_name, source, err));
        msg.push_str(&format!("{:?}\n", report));
    }
    msg
}

/// Parse a source file; a file without statements yields `None`.
fn parse_file(file_path: &Path) -> CliResult<(String, Option<Node>)> {
    let source = read_source(file_path)?;
    match parser::parse(&source) {
        Ok(tree) => Ok((source, tree)),
        Err(errs) => {
            let msg = format_errors(&file_path.display().to_string(), &source, &errs);
            Err(CliError::failure(msg.trim_end()))
        }
    }
}

fn emit_tree(file_path: &Path, tree: &Node, config: &EmitConfig) -> CliResult<String> {
    emit_with_config(tree, config)
        .map_err(|e| CliError::failure(format!("Error emitting {}: {}", file_path.display(), e)))
}

/// Parse a Ruby file and print the generated source.
pub fn emit_file(file_path: &Path, config: &EmitConfig) -> CliResult<ExitCode> {
    let (_, tree) = parse_file(file_path)?;
    if let Some(tree) = tree {
        println!("{}", emit_tree(file_path, &tree, config)?);
    }
    Ok(ExitCode::SUCCESS)
}

/// Read an s-expression file and print the generated source.
pub fn render_sexp_file(file_path: &Path, config: &EmitConfig) -> CliResult<ExitCode> {
    let text = read_source(file_path)?;
    let tree = read_sexp(&text)
        .map_err(|e| CliError::failure(format!("Invalid s-expression in {}: {}", file_path.display(), e)))?;
    println!("{}", emit_tree(file_path, &tree, config)?);
    Ok(ExitCode::SUCCESS)
}

/// Parse a Ruby file and print its tree.
pub fn print_sexp(file_path: &Path, preprocess: bool) -> CliResult<ExitCode> {
    let (_, tree) = parse_file(file_path)?;
    let tree = if preprocess {
        preprocessor::run(tree.as_ref())
            .map_err(|e| CliError::failure(format!("Error normalizing {}: {}", file_path.display(), e)))?
    } else {
        tree
    };
    if let Some(tree) = tree {
        println!("{}", to_sexp(&tree));
    }
    Ok(ExitCode::SUCCESS)
}

/// Verify every `.rb` file under `paths`.
pub fn check_paths(paths: &[PathBuf], config: &EmitConfig, fail_fast: bool, verbose: bool) -> CliResult<ExitCode> {
    let files: Vec<PathBuf> = paths.iter().flat_map(|path| collect_rb_files(path)).collect();
    if files.is_empty() {
        return Err(CliError::failure("No .rb files found"));
    }

    let verifier = Verifier::new(RubyParser, config.clone());
    let mut failures = 0;
    let mut checked = 0;

    for file_path in &files {
        checked += 1;
        if !check_file(&verifier, file_path, verbose) {
            failures += 1;
            if fail_fast {
                break;
            }
        }
    }

    if failures > 0 {
        return Err(CliError::failure(format!(
            "\n{} of {} file(s) failed to round-trip",
            failures, checked
        )));
    }
    println!("✓ {} file(s) round-trip", checked);
    Ok(ExitCode::SUCCESS)
}

/// Verify one file, reporting the outcome; returns whether it round-trips.
fn check_file(verifier: &Verifier<RubyParser>, file_path: &Path, verbose: bool) -> bool {
    let name = file_path.display().to_string();
    let source = match read_source(file_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    match verifier.verify_source(&source) {
        Ok(Verdict::Equivalent { .. }) => {
            if verbose {
                println!("ok: {}", name);
            }
            true
        }
        Ok(Verdict::Mismatch(mismatch)) => {
            println!("--- {}", name);
            println!("generated source:\n{}\n", mismatch.generated);
            println!("original tree:\n{}\n", mismatch.original);
            println!("re-parsed tree:\n{}\n", mismatch.reparsed);
            print!("{}", mismatch.diff);
            println!();
            false
        }
        Err(VerifyError::Parse(errs)) => {
            eprint!("{}", format_errors(&name, &source, &errs));
            false
        }
        Err(VerifyError::Reparse { generated, errors }) => {
            eprintln!("Generated source for {} does not parse:", name);
            eprint!("{}", format_errors(&format!("{} (generated)", name), &generated, &errors));
            false
        }
        Err(e) => {
            eprintln!("Error checking {}: {}", name, e);
            false
        }
    }
}

/// Collect `.rb` files from a file or directory, skipping hidden and build directories.
fn collect_rb_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if path.extension().is_some_and(|ext| ext == "rb") {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            let mut entries: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
            entries.sort();
            for entry_path in entries {
                if entry_path.is_dir() {
                    let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !name.starts_with('.') && name != "target" && name != "vendor" {
                        files.extend(collect_rb_files(&entry_path));
                    }
                } else if entry_path.extension().is_some_and(|ext| ext == "rb") {
                    files.push(entry_path);
                }
            }
        }
    }

    files
}
