//! Shareable metadata for `unparser_core::lang` registries.
//!
//! The `unparser_core::lang` module is a set of **registry-first** vocabularies: node types, keywords,
//! punctuation and operator method names. This submodule provides the small, dependency-free metadata types that
//! are reused across those registries.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives in the lexer/parser.

/// Represent a small example for documentation: a Ruby snippet and the tree it parses to.
///
/// ## Notes
/// - `source` is Ruby source text accepted by the reference parser.
/// - `sexp` is the tree in the `parser` gem's s-expression notation (single line).
///
/// ## Examples
/// ```rust
/// use unparser_core::lang::registry::Example;
///
/// let ex = Example::new("42", "(int 42)");
/// assert_eq!(ex.source, "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub source: &'static str,
    pub sexp: &'static str,
}

impl Example {
    /// Construct an example.
    pub const fn new(source: &'static str, sexp: &'static str) -> Self {
        Self { source, sexp }
    }
}
