//! Define the reserved keyword vocabulary of Ruby.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`BEGIN` and `begin` are different keywords).
//! - Only a handful of keywords are produced by the emitter. The rest are listed because a receiverless method
//!   call spelled like a keyword cannot be written back as source, and the lexer must not treat them as plain
//!   identifiers.
//!
//! ## Examples
//! ```rust
//! use unparser_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("end"), Some(KeywordId::End));
//! assert_eq!(keywords::as_str(KeywordId::SelfKw), "self");
//! assert_eq!(keywords::from_str("puts"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Definitions
    Module,
    Class,
    Def,
    Undef,
    Alias,
    Begin,
    End,
    BeginUpper,
    EndUpper,

    // Control flow
    If,
    Unless,
    Elsif,
    Else,
    Then,
    Case,
    When,
    In,
    While,
    Until,
    For,
    Do,
    Break,
    Next,
    Redo,
    Retry,
    Return,
    Yield,
    Rescue,
    Ensure,
    Super,

    // Literals / pseudo-variables
    Nil,
    True,
    False,
    SelfKw,
    File,
    Line,
    Encoding,

    // Word operators
    And,
    Or,
    Not,
    Defined,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Definition,
    ControlFlow,
    Literal,
    Operator,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Definitions
    info(KeywordId::Module, "module", KeywordCategory::Definition),
    info(KeywordId::Class, "class", KeywordCategory::Definition),
    info(KeywordId::Def, "def", KeywordCategory::Definition),
    info(KeywordId::Undef, "undef", KeywordCategory::Definition),
    info(KeywordId::Alias, "alias", KeywordCategory::Definition),
    info(KeywordId::Begin, "begin", KeywordCategory::Definition),
    info(KeywordId::End, "end", KeywordCategory::Definition),
    info(KeywordId::BeginUpper, "BEGIN", KeywordCategory::Definition),
    info(KeywordId::EndUpper, "END", KeywordCategory::Definition),
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Unless, "unless", KeywordCategory::ControlFlow),
    info(KeywordId::Elsif, "elsif", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::Then, "then", KeywordCategory::ControlFlow),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow),
    info(KeywordId::When, "when", KeywordCategory::ControlFlow),
    info(KeywordId::In, "in", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::Until, "until", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    info(KeywordId::Next, "next", KeywordCategory::ControlFlow),
    info(KeywordId::Redo, "redo", KeywordCategory::ControlFlow),
    info(KeywordId::Retry, "retry", KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    info(KeywordId::Yield, "yield", KeywordCategory::ControlFlow),
    info(KeywordId::Rescue, "rescue", KeywordCategory::ControlFlow),
    info(KeywordId::Ensure, "ensure", KeywordCategory::ControlFlow),
    info(KeywordId::Super, "super", KeywordCategory::ControlFlow),
    // Literals / pseudo-variables
    info(KeywordId::Nil, "nil", KeywordCategory::Literal),
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::SelfKw, "self", KeywordCategory::Literal),
    info(KeywordId::File, "__FILE__", KeywordCategory::Literal),
    info(KeywordId::Line, "__LINE__", KeywordCategory::Literal),
    info(KeywordId::Encoding, "__ENCODING__", KeywordCategory::Literal),
    // Word operators
    info(KeywordId::And, "and", KeywordCategory::Operator),
    info(KeywordId::Or, "or", KeywordCategory::Operator),
    info(KeywordId::Not, "not", KeywordCategory::Operator),
    info(KeywordId::Defined, "defined?", KeywordCategory::Operator),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if `s` is a reserved word, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Whether `s` is a reserved word.
pub fn is_reserved(s: &str) -> bool {
    from_str(s).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
    }
}
