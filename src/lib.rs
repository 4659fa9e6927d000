#![forbid(unsafe_code)]
//! Ruby unparser
//!
//! Turns Ruby syntax trees (in the shape of the `parser` gem) back into Ruby source that parses to an equivalent
//! tree. This crate provides the emitter, the tree normalizer used to compare trees, round-trip verification and
//! the command-line driver; the AST, lexer, parser and s-expression format live in `unparser_syntax`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//! ```rust
//! use unparser::{emit, parser};
//!
//! let tree = parser::parse("class Foo < Bar; @a = [1, :b]; end").unwrap().unwrap();
//! assert_eq!(emit(&tree).unwrap(), "class Foo < Bar\n  @a = [1, :b]\nend");
//! ```

pub mod cli;
pub mod dispatch;
pub mod emitter;
pub mod equivalence;
pub mod preprocessor;
pub mod quote;

pub use unparser_syntax::ast;
pub use unparser_syntax::diagnostics;
pub use unparser_syntax::lexer;
pub use unparser_syntax::parser;
pub use unparser_syntax::sexp;

pub use emitter::{EmitConfig, EmitError, emit, emit_with_config};
pub use equivalence::{RubyParser, SourceParser, Verdict, Verifier, VerifyError};
pub use preprocessor::{PreprocessError, preprocess};
pub use quote::{QuoteError, transquote};
