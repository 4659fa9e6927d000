//! Parser for the Ruby subset the unparser round-trips.
//!
//! Converts a token stream into `parser`-gem shaped [`Node`] trees: a file with several statements becomes a
//! `begin` node, a single statement is returned as is, and an empty file yields `None`.
//!
//! ## Examples
//!
//! ```rust
//! use unparser_syntax::{parser, sexp};
//!
//! let tree = parser::parse("a = 1; a").unwrap().unwrap();
//! assert_eq!(sexp::to_sexp(&tree), "(begin\n  (lvasgn :a\n    (int 1))\n  (lvar :a))");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::ast::{Child, Location, Node, NodeType, Span};
use crate::diagnostics::CompileError;
use crate::lexer::{self, RegexpLiteral, StrLiteral, StrPart, Token, TokenKind};
use unparser_core::lang::keywords::KeywordId;
use unparser_core::lang::punctuation::PunctuationId;
use unparser_core::strings;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/expr.rs");
include!("parser/literals.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
