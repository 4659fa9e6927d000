//! Ruby vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: node type tags, reserved keywords,
//! punctuation, and operator method names.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer, parser and emitters. Callers
//! work with **stable IDs** (e.g. `NodeType`, `KeywordId`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST values, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics, docs,
//!   emission).
//!
//! ## Examples
//! ```rust
//! use unparser_core::lang::keywords::{self, KeywordId};
//! use unparser_core::lang::node_types::{self, NodeType};
//!
//! assert_eq!(keywords::from_str("module"), Some(KeywordId::Module));
//! assert_eq!(node_types::from_str("dstr"), Some(NodeType::Dstr));
//! ```
//!
//! ## See also
//! - `cargo run -p unparser_core --bin generate_lang_reference` to generate Markdown reference tables.

pub mod keywords;
pub mod node_types;
pub mod operators;
pub mod punctuation;
pub mod registry;
