//! Round-trip verification
//!
//! Checks that emitting a tree and parsing the result gives back an equivalent tree: the tree is emitted as given,
//! then both it and the re-parsed tree are normalized by the preprocessor and compared structurally. A mismatch is a
//! [`Verdict`], not an error; errors are reserved for input that cannot be parsed, emitted or normalized at all.
//!
//! ## Examples
//! ```rust
//! use unparser::emitter::EmitConfig;
//! use unparser::equivalence::{RubyParser, Verifier};
//!
//! let verifier = Verifier::new(RubyParser, EmitConfig::canonical());
//! let verdict = verifier.verify_source("module Foo\n  %r{a/b}\nend\n").unwrap();
//! assert!(verdict.is_equivalent());
//! assert_eq!(verdict.generated(), "module Foo\n  /a\\/b/\nend");
//! ```

use thiserror::Error;
use unparser_syntax::ast::Node;
use unparser_syntax::diagnostics::CompileError;
use unparser_syntax::parser;
use unparser_syntax::sexp::to_sexp;

use crate::emitter::{EmitConfig, EmitError, emit_with_config};
use crate::preprocessor::{self, PreprocessError};

/// Source text to tree; the boundary to whatever parser produced the trees being verified.
pub trait SourceParser {
    /// Parse `source`; an input without statements yields `Ok(None)`.
    fn parse(&self, source: &str) -> Result<Option<Node>, Vec<CompileError>>;
}

/// The bundled parser for the supported Ruby subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyParser;

impl SourceParser for RubyParser {
    fn parse(&self, source: &str) -> Result<Option<Node>, Vec<CompileError>> {
        parser::parse(source)
    }
}

/// Errors that stop verification before a verdict is reached.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("source does not parse ({} errors)", .0.len())]
    Parse(Vec<CompileError>),
    #[error("generated source does not parse ({} errors)", .errors.len())]
    Reparse {
        generated: String,
        errors: Vec<CompileError>,
    },
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
}

/// Outcome of a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Equivalent { generated: String },
    Mismatch(Mismatch),
}

/// A round trip whose re-parsed tree differs from the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The emitted source
    pub generated: String,
    /// Normalized original tree, as an s-expression
    pub original: String,
    /// Normalized re-parsed tree, as an s-expression
    pub reparsed: String,
    /// Line diff from `original` to `reparsed`
    pub diff: String,
}

impl Verdict {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Verdict::Equivalent { .. })
    }

    /// The emitted source.
    pub fn generated(&self) -> &str {
        match self {
            Verdict::Equivalent { generated } => generated,
            Verdict::Mismatch(mismatch) => &mismatch.generated,
        }
    }
}

/// Runs round trips with one parser and emission configuration.
#[derive(Debug, Clone)]
pub struct Verifier<P> {
    parser: P,
    config: EmitConfig,
}

impl<P: SourceParser> Verifier<P> {
    pub fn new(parser: P, config: EmitConfig) -> Self {
        Self { parser, config }
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Parse `source`, then verify the resulting tree.
    ///
    /// ## Errors
    /// - [`VerifyError::Parse`] if `source` does not parse.
    /// - Any error [`Verifier::verify_node`] reports.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn verify_source(&self, source: &str) -> Result<Verdict, VerifyError> {
        let original = self.parser.parse(source).map_err(VerifyError::Parse)?;
        self.verify_node(original.as_ref())
    }

    /// Emit `node`, re-parse the output, and compare the normalized forms of both trees.
    ///
    /// The source checked is exactly what [`emit_with_config`] produces for `node`; normalization only decides
    /// which differences between the two trees count.
    ///
    /// ## Errors
    /// - [`VerifyError::Emit`] / [`VerifyError::Preprocess`] if the tree cannot be emitted or normalized.
    /// - [`VerifyError::Reparse`] if the emitted source does not parse.
    #[tracing::instrument(skip_all)]
    pub fn verify_node(&self, node: Option<&Node>) -> Result<Verdict, VerifyError> {
        let generated = match node {
            Some(tree) => emit_with_config(tree, &self.config)?,
            None => String::new(),
        };
        let original = preprocessor::run(node)?;
        let reparsed = match self.parser.parse(&generated) {
            Ok(reparsed) => reparsed,
            Err(errors) => return Err(VerifyError::Reparse { generated, errors }),
        };
        let reparsed = preprocessor::run(reparsed.as_ref())?;

        if reparsed == original {
            tracing::debug!(bytes = generated.len(), "round trip equivalent");
            return Ok(Verdict::Equivalent { generated });
        }
        let original = tree_sexp(original.as_ref());
        let reparsed = tree_sexp(reparsed.as_ref());
        let diff = line_diff(&original, &reparsed);
        tracing::debug!(bytes = generated.len(), "round trip mismatch");
        Ok(Verdict::Mismatch(Mismatch {
            generated,
            original,
            reparsed,
            diff,
        }))
    }
}

fn tree_sexp(node: Option<&Node>) -> String {
    node.map(to_sexp).unwrap_or_default()
}

/// Simple line-by-line diff: `-` lines from `before`, `+` lines from `after`, numbered from 1.
pub fn line_diff(before: &str, after: &str) -> String {
    let mut diff = String::new();
    let before_lines: Vec<&str> = before.lines().collect();
    let after_lines: Vec<&str> = after.lines().collect();

    for i in 0..before_lines.len().max(after_lines.len()) {
        let old = before_lines.get(i).copied().unwrap_or("");
        let new = after_lines.get(i).copied().unwrap_or("");
        if old != new {
            if !old.is_empty() {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, old));
            }
            if !new.is_empty() {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, new));
            }
        }
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use unparser_syntax::sexp::read_sexp;

    fn canonical() -> Verifier<RubyParser> {
        Verifier::new(RubyParser, EmitConfig::canonical())
    }

    /// Parses everything as one fixed tree, whatever the source.
    struct FixedParser(Node);

    impl SourceParser for FixedParser {
        fn parse(&self, _source: &str) -> Result<Option<Node>, Vec<CompileError>> {
            Ok(Some(self.0.clone()))
        }
    }

    // ========================================================================
    // Round trips
    // ========================================================================

    #[test]
    fn test_source_round_trip() {
        let verdict = canonical()
            .verify_source("class Foo < Bar\n  @a = \"x#{1}\"\n  puts [1, { :a => 2.5 }]\nend\n")
            .unwrap();
        assert!(verdict.is_equivalent(), "{verdict:?}");
    }

    #[test]
    fn test_source_trusting_mode_replays_literals() {
        let verifier = Verifier::new(RubyParser, EmitConfig::default());
        let verdict = verifier.verify_source("a = 0x1F\nb = 'q'").unwrap();
        assert!(verdict.is_equivalent());
        assert_eq!(verdict.generated(), "a = 0x1F\nb = 'q'");
    }

    #[test]
    fn test_empty_source_is_equivalent() {
        let verdict = canonical().verify_source("# nothing\n").unwrap();
        assert_eq!(verdict, Verdict::Equivalent { generated: String::new() });
    }

    #[test]
    fn test_checks_the_source_emit_produces() {
        let verdict = canonical().verify_source("x = (a = 1)\n").unwrap();
        assert!(verdict.is_equivalent(), "{verdict:?}");
        assert_eq!(verdict.generated(), "x = (a = 1)");

        let tree = parser::parse("\"a\" \"b\"").unwrap().unwrap();
        let verdict = canonical().verify_node(Some(&tree)).unwrap();
        assert_eq!(verdict.generated(), emit_with_config(&tree, &EmitConfig::canonical()).unwrap());
    }

    #[test]
    fn test_percent_r_with_escaped_closing_delimiter() {
        for (source, generated) in [
            (r"%r{a\}b}", "/a}b/"),
            (r"%r|a\|b|", "/a|b/"),
            (r"%r(x\)y)i", "/x)y/i"),
            ("%r{a/b}", r"/a\/b/"),
        ] {
            for verifier in [canonical(), Verifier::new(RubyParser, EmitConfig::default())] {
                let verdict = verifier.verify_source(source).unwrap();
                assert!(verdict.is_equivalent(), "{source}: {verdict:?}");
                assert_eq!(verdict.generated(), generated);
            }
        }
    }

    #[test]
    fn test_verify_node_from_tree() {
        let tree = read_sexp(r#"(begin (dstr (str "a") (str "b")))"#).unwrap();
        let verdict = canonical().verify_node(Some(&tree)).unwrap();
        assert_eq!(verdict.generated(), r#""ab""#);
        assert!(verdict.is_equivalent());
    }

    // ========================================================================
    // Failures
    // ========================================================================

    #[test]
    fn test_mismatch_reports_both_trees() {
        // The reparse never matches because the parser ignores its input.
        let verifier = Verifier::new(FixedParser(read_sexp("(int 2)").unwrap()), EmitConfig::canonical());
        let verdict = verifier.verify_node(Some(&read_sexp("(int 1)").unwrap())).unwrap();
        let Verdict::Mismatch(mismatch) = verdict else {
            panic!("expected a mismatch");
        };
        assert_eq!(mismatch.generated, "1");
        assert_eq!(mismatch.original, "(int 1)");
        assert_eq!(mismatch.reparsed, "(int 2)");
        assert_eq!(mismatch.diff, "-   1 | (int 1)\n+   1 | (int 2)\n");
    }

    #[test]
    fn test_unparsable_source() {
        let err = canonical().verify_source("module").unwrap_err();
        assert!(matches!(err, VerifyError::Parse(_)));
    }

    #[test]
    fn test_unemittable_tree() {
        let tree = read_sexp("(float inf)").unwrap();
        let err = canonical().verify_node(Some(&tree)).unwrap_err();
        assert!(matches!(err, VerifyError::Emit(EmitError::UnsupportedLiteral { .. })));
    }

    #[test]
    fn test_line_diff() {
        assert_eq!(line_diff("a\nb", "a\nb"), "");
        assert_eq!(line_diff("a\nb", "a"), "-   2 | b\n");
        assert_eq!(line_diff("a", "a\nc"), "+   2 | c\n");
    }
}
