//! Ruby syntax frontend for the unparser: AST, lexer, parser, s-expressions, diagnostics.
//!
//! The AST follows the `parser` gem's shape: every node is a type tag plus an ordered list of children, where a
//! child is either a nested node or a literal payload. The lexer and parser cover the subset of Ruby the emitter
//! can write back, which is what round-trip verification needs.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not normalize trees or produce source text from them.
//! - Vocabulary identity (node types/keywords/punctuation) and literal quoting rules come from `unparser_core`.
//!
//! ## Examples
//! ```rust
//! use unparser_syntax::{parser, sexp};
//!
//! let tree = parser::parse("module Foo\nend\n").unwrap().unwrap();
//! assert_eq!(sexp::to_sexp(&tree), "(module\n  (const nil :Foo) nil)");
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod sexp;
