use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use unparser_core::lang::keywords::KEYWORDS;
use unparser_core::lang::node_types::NODE_TYPES;

/// Guardrail against reintroducing stringly-typed vocabulary checks.
///
/// This is intentionally a **coarse** safety net. It looks for suspicious patterns like `== "module"` or
/// `match tag { "dstr" => ... }` in Rust source files where we expect callers to go through `NodeType` and the
/// `unparser_core::lang` registries instead.
///
/// Notes:
/// - We allow occurrences in `crates/unparser_core/src/lang/**` (registries themselves), in docgen, and in tests.
/// - The s-expression reader spells absent children `nil`; that atom is format syntax, not Ruby vocabulary.
/// - This is not meant to be perfect; it's meant to catch "oops I added a string match".
#[test]
fn no_new_stringly_vocab_checks_in_rust_sources() {
    let root = repo_root();
    let spellings = spellings();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    let targets = [root.join("src"), root.join("crates")];
    for dir in targets {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found potential stringly-typed vocabulary checks. Prefer NodeType / unparser_core registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

#[test]
fn suspicious_line_detection() {
    let spellings = vec!["module", "dstr"];
    assert!(is_suspicious_line(r#"if tag == "module" {"#, &spellings));
    assert!(is_suspicious_line(r#"    "dstr" => Some(x),"#, &spellings));
    assert!(!is_suspicious_line(r#"// "dstr" => handled by the registry"#, &spellings));
    assert!(!is_suspicious_line(r#"let name = "module";"#, &spellings));
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn spellings() -> Vec<&'static str> {
    // Node type tags and reserved words: the vocabulary most likely to be compared as raw strings.
    let mut set: BTreeSet<&'static str> = BTreeSet::new();

    for info in NODE_TYPES {
        set.insert(info.tag);
    }

    for keyword in KEYWORDS {
        set.insert(keyword.canonical);
    }

    set.into_iter().collect()
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if !rel.ends_with(".rs") {
        return true;
    }
    // Registries define the spellings; allow them.
    if rel.starts_with("crates/unparser_core/src/lang/") {
        return true;
    }
    // Docgen inevitably contains spellings for headings, etc.
    if rel == "crates/unparser_core/src/bin/generate_lang_reference.rs" {
        return true;
    }
    if rel == "crates/unparser_syntax/src/sexp.rs" {
        return true;
    }
    // Tests can mention spellings directly.
    if rel.starts_with("tests/") || rel.ends_with("/tests.rs") || rel.contains("/tests/") {
        return true;
    }
    false
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&'static str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, line) in contents.lines().enumerate() {
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&'static str]) -> bool {
    // Avoid false positives in comments/docstrings.
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") || trimmed.starts_with("///") || trimmed.starts_with("//!") {
        return false;
    }

    // Only flag explicit equality checks or match arms for known vocabulary spellings.
    for s in spellings {
        // Patterns we consider "stringly vocab checks":
        // - `... == "spelling"`
        // - `"spelling" => ...`
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        if line.contains(&eq) || line.contains(&arm) {
            return true;
        }
    }

    false
}
