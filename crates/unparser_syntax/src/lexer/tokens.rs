//! Token types for the Ruby lexer.
//!
//! Reserved words and punctuation carry registry ids from `unparser_core::lang`; everything else carries its
//! decoded payload.
//!
//! ## Notes
//! - String-like literals keep their parts (text runs and interpolations) so that the parser can build `str` or
//!   `dstr`/`xstr`/`regexp` nodes without re-scanning.
//! - Interpolations hold their own token stream, lexed from the same source so spans stay absolute.

use crate::ast::Span;
use unparser_core::lang::keywords::{self, KeywordId};
use unparser_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    // ========== Names ==========
    /// Lowercase identifier, possibly ending in `?` or `!`.
    Ident(String),
    /// Capitalized identifier.
    Const(String),
    /// Method name after `.`: identifier, constant, keyword or operator spelling.
    MethodName(String),
    /// `@name`
    IVar(String),
    /// `@@name`
    CVar(String),
    /// `$name`
    GVar(String),

    // ========== Literals ==========
    Int(i64),
    Float(f64),
    /// Symbol literal (name without the leading `:`).
    Symbol(String),
    /// Single- or double-quoted string.
    Str(StrLiteral),
    /// Backtick command string.
    XStr(StrLiteral),
    /// `/.../` or `%r` regex; text parts keep their raw source.
    Regexp(RegexpLiteral),

    // ========== Layout ==========
    Newline,
    Eof,
}

/// Part of a string-like literal.
#[derive(Debug, Clone, PartialEq)]
pub enum StrPart {
    Text { value: String, span: Span },
    Interp { tokens: Vec<Token>, span: Span },
}

/// A string or command literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLiteral {
    pub parts: Vec<StrPart>,
    pub open: Span,
    pub close: Span,
}

/// A regex literal.
#[derive(Debug, Clone, PartialEq)]
pub struct RegexpLiteral {
    pub parts: Vec<StrPart>,
    /// Option letters following the closing delimiter.
    pub options: String,
    pub open: Span,
    pub close: Span,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Whether whitespace separates this token from the previous one.
    pub space_before: bool,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span, space_before: bool) -> Self {
        Self {
            kind,
            span,
            space_before,
        }
    }
}

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Whether this token can start an expression.
    pub fn starts_expression(&self) -> bool {
        match self {
            TokenKind::Keyword(k) => matches!(
                k,
                KeywordId::Nil
                    | KeywordId::True
                    | KeywordId::False
                    | KeywordId::SelfKw
                    | KeywordId::Begin
                    | KeywordId::Module
                    | KeywordId::Class
            ),
            TokenKind::Punctuation(p) => matches!(
                p,
                PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::ColonColon
            ),
            TokenKind::Ident(_)
            | TokenKind::Const(_)
            | TokenKind::IVar(_)
            | TokenKind::CVar(_)
            | TokenKind::GVar(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Symbol(_)
            | TokenKind::Str(_)
            | TokenKind::XStr(_)
            | TokenKind::Regexp(_) => true,
            TokenKind::MethodName(_) | TokenKind::Newline | TokenKind::Eof => false,
        }
    }

    /// Short human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(k) => format!("`{}`", keywords::as_str(*k)),
            TokenKind::Punctuation(p) => {
                format!("`{}`", unparser_core::lang::punctuation::as_str(*p))
            }
            TokenKind::Ident(name) | TokenKind::Const(name) | TokenKind::MethodName(name) => {
                format!("`{name}`")
            }
            TokenKind::IVar(name) | TokenKind::CVar(name) | TokenKind::GVar(name) => format!("`{name}`"),
            TokenKind::Int(_) | TokenKind::Float(_) => "number".to_string(),
            TokenKind::Symbol(_) => "symbol".to_string(),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::XStr(_) => "command string".to_string(),
            TokenKind::Regexp(_) => "regex".to_string(),
            TokenKind::Newline => "newline".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
