//! Provide the shared, pure vocabulary and literal helpers for the unparser toolchain.
//!
//! This crate is intentionally small and dependency-free. It contains the pieces that the syntax frontend (lexer,
//! parser, s-expressions) and the emitter must agree on byte for byte:
//! - the node type vocabulary (`parser` gem type tags) and Ruby keywords/punctuation/operator method names, and
//! - the `inspect`-style quoting rules for string and symbol literals, together with their inverse.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no AST types.
//! - If the emitter and the lexer ever disagree on an escape, round-trip equivalence breaks; keeping both sides of
//!   the quoting rules in [`strings`] is what prevents that drift.

pub mod lang;
pub mod strings;
