//! Generate Markdown reference docs from `unparser_core::lang` registries.
//!
//! This binary renders the vocabulary registries (node types, keywords, operator method names, punctuation) into
//! human-readable Markdown tables under `docs/reference/`.
//!
//! ## Notes
//! - The generated file is meant to be checked into the repo and treated as a derived artifact.
//! - Do not edit the generated Markdown by hand; update the registries instead.
//!
//! ## Examples
//! Run from the workspace root:
//! ```bash
//! cargo run -p unparser_core --bin generate_lang_reference
//! ```
//!
//! ## Panics
//! - If the workspace root cannot be resolved.
//! - If output files cannot be written.

use std::fs;
use std::path::{Path, PathBuf};

use unparser_core::lang::{keywords, node_types, operators, punctuation};

fn trim_trailing_newlines_to_at_most_two(out: &mut String) {
    let mut count = 0usize;
    for ch in out.chars().rev() {
        if ch == '\n' {
            count += 1;
        } else {
            break;
        }
    }
    while count > 2 {
        out.pop();
        count -= 1;
    }
}

fn start_section(out: &mut String, heading: &str) {
    trim_trailing_newlines_to_at_most_two(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
    }
    out.push_str(heading);
    out.push_str("\n\n");
}

fn main() {
    let root = workspace_root();

    let out_dir = root.join("docs/reference");
    fs::create_dir_all(&out_dir).expect("create docs/reference/");

    write_reference(&out_dir.join("vocabulary.md"));
}

/// Write `docs/reference/vocabulary.md`.
fn write_reference(path: &Path) {
    let mut out = String::new();
    out.push_str("# Unparser vocabulary reference\n\n");
    out.push_str("Generated file, do not edit by hand.\n");
    out.push_str("Regenerate with: `cargo run -p unparser_core --bin generate_lang_reference`\n\n");

    out.push_str("## Contents\n\n");
    out.push_str("- [Node types](#node-types)\n");
    out.push_str("- [Keywords](#keywords)\n");
    out.push_str("- [Operator methods](#operator-methods)\n");
    out.push_str("- [Punctuation](#punctuation)\n\n");

    render_node_types_section(&mut out);
    render_keywords_section(&mut out);
    render_operators_section(&mut out);
    render_punctuation_section(&mut out);

    trim_trailing_newlines_to_at_most_two(&mut out);
    out.push('\n');
    fs::write(path, out).expect("write vocabulary.md");
}

fn render_node_types_section(out: &mut String) {
    start_section(out, "## Node types");

    out.push_str("| Id | Tag | Category | Description |\n");
    out.push_str("|---|---|---|---|\n");
    for t in node_types::NODE_TYPES {
        out.push_str(&format!(
            "| {:?} | `{}` | {:?} | {} |\n",
            t.id, t.tag, t.category, t.description
        ));
    }
    out.push('\n');

    out.push_str("### Examples\n\n");
    for t in node_types::NODE_TYPES {
        out.push_str(&format!("#### `{}`\n\n", t.tag));
        out.push_str("```ruby\n");
        out.push_str(t.example.source);
        out.push_str("\n```\n\n");
        out.push_str("```lisp\n");
        out.push_str(t.example.sexp);
        out.push_str("\n```\n\n");
    }
}

fn render_keywords_section(out: &mut String) {
    start_section(out, "## Keywords");

    out.push_str("| Id | Canonical | Category |\n");
    out.push_str("|---|---|---|\n");
    for k in keywords::KEYWORDS {
        out.push_str(&format!("| {:?} | `{}` | {:?} |\n", k.id, k.canonical, k.category));
    }
    out.push('\n');
}

fn render_operators_section(out: &mut String) {
    start_section(out, "## Operator methods");

    out.push_str("Operator calls are always written in method form (`a.+(b)`).\n\n");
    out.push_str("| Spelling | Arity |\n");
    out.push_str("|---|---|\n");
    for o in operators::OPERATOR_METHODS {
        // `|` would split the Markdown cell.
        let spelling = o.spelling.replace('|', "\\|");
        out.push_str(&format!("| `{}` | {:?} |\n", spelling, o.arity));
    }
    out.push('\n');
}

fn render_punctuation_section(out: &mut String) {
    start_section(out, "## Punctuation");

    out.push_str("| Id | Canonical | Category |\n");
    out.push_str("|---|---|---|\n");
    for p in punctuation::PUNCTUATION {
        out.push_str(&format!("| {:?} | `{}` | {:?} |\n", p.id, p.canonical, p.category));
    }
    out.push('\n');
}

fn workspace_root() -> PathBuf {
    // crates/unparser_core -> crates -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root (two levels above crates/unparser_core)")
}
