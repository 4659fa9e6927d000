//! Layering guardrails to keep the shared crates free of driver dependencies.
//!
//! `unparser_core` is pure vocabulary and may not depend on anything. `unparser_syntax` is the parsing layer and may
//! not pull in the CLI or logging-subscriber crates, or the root `unparser` crate. This test scans the member
//! manifests and fails if a forbidden crate appears in their `[dependencies]` table.

/// Dependency names listed in the `[dependencies]` table of `manifest`.
fn main_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = main_dependencies(include_str!("../crates/unparser_core/Cargo.toml"));
    assert!(deps.is_empty(), "`unparser_core` must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_driver_crates() {
    let deps = main_dependencies(include_str!("../crates/unparser_syntax/Cargo.toml"));
    for forbidden in ["unparser", "clap", "tracing-subscriber", "insta", "proptest"] {
        assert!(
            !deps.iter().any(|dep| dep == forbidden),
            "`{forbidden}` must not appear in unparser_syntax [dependencies]"
        );
    }
}

#[test]
fn root_depends_on_the_shared_crates() {
    let deps = main_dependencies(include_str!("../Cargo.toml"));
    for required in ["unparser_core", "unparser_syntax"] {
        assert!(deps.iter().any(|dep| dep == required), "root crate must depend on `{required}`");
    }
}

#[test]
fn dependency_scan_reads_only_the_dependencies_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\na = \"1\" # note\n# b = \"2\"\n\n[dev-dependencies]\nc = \"3\"\n";
    assert_eq!(main_dependencies(manifest), vec!["a".to_string()]);
}
