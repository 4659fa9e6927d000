//! Lexer for the Ruby subset the unparser round-trips.
//!
//! Handles tokenization including:
//! - Keywords, identifiers, constants and variables (`@a`, `@@a`, `$a`)
//! - Numeric literals (including negative literals) and symbols
//! - String-like literals with `#{}` interpolation: `"..."`, `'...'`, backticks, `/.../` and `%r`
//! - Method names after `.` (identifiers, keywords and operator spellings)
//! - Statement separators (newlines are significant and collapsed)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, StrPart)
//! - `strings` - String/command/regex/symbol scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{RegexpLiteral, StrLiteral, StrPart, Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use unparser_core::lang::operators;
use unparser_core::lang::punctuation::PunctuationId;
use unparser_core::strings::{is_ident_continue, is_ident_start};

/// Lexer for Ruby source code.
///
/// ## Notes
/// - Positions are byte offsets into the full source, including for interpolation bodies, which are lexed by a
///   nested lexer that stops at the first unmatched `}`.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    /// Interpolation body: stop at an unmatched `}`.
    nested: bool,
    brace_depth: usize,
    space_before: bool,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0, false)
    }

    fn at(source: &'a str, pos: usize, nested: bool) -> Self {
        Self {
            source,
            pos,
            nested,
            brace_depth: 0,
            space_before: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        self.run();
        self.push_eof();
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    /// Scan until end of input, or until an unmatched `}` in nested mode.
    ///
    /// ## Returns
    /// - `true` if a nested lexer stopped at its closing `}` (left unconsumed).
    fn run(&mut self) -> bool {
        loop {
            if self.at_line_start() && self.skip_embedded_doc() {
                continue;
            }
            self.skip_whitespace();
            let Some(c) = self.peek() else {
                return false;
            };
            if c == '}' && self.nested && self.brace_depth == 0 {
                return true;
            }
            self.scan_token();
        }
    }

    /// Lex an interpolation body starting right after `#{`.
    ///
    /// ## Returns
    /// - The body tokens (terminated by `Eof`), or `None` if the body is unterminated.
    fn lex_interpolation(&mut self, body_start: usize, literal_start: usize) -> Option<Vec<Token>> {
        let mut inner = Lexer::at(self.source, body_start, true);
        let closed = inner.run();
        inner.push_eof();
        self.errors.append(&mut inner.errors);
        if !closed {
            self.errors.push(CompileError::new(
                "unterminated interpolation".to_string(),
                Span::new(literal_start, self.source.len()),
            ));
            self.pos = self.source.len();
            return None;
        }
        // Skip the closing `}`.
        self.pos = inner.pos + 1;
        Some(inner.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.source[..self.pos].ends_with('\n')
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.advance();
                    self.space_before = true;
                }
                Some('\\') if self.peek_nth(1) == Some('\n') => {
                    self.pos += 2;
                    self.space_before = true;
                }
                _ => break,
            }
        }
    }

    /// Skip a `=begin` ... `=end` block starting at the current line.
    fn skip_embedded_doc(&mut self) -> bool {
        if !is_doc_marker(self.rest(), "=begin") {
            return false;
        }
        let start = self.pos;
        loop {
            match self.rest().find('\n') {
                Some(i) => self.pos += i + 1,
                None => {
                    self.errors.push(CompileError::new(
                        "embedded document meets end of file".to_string(),
                        Span::new(start, self.source.len()),
                    ));
                    self.pos = self.source.len();
                    return true;
                }
            }
            if is_doc_marker(self.rest(), "=end") {
                let line_len = self.rest().find('\n').map_or(self.rest().len(), |i| i);
                self.pos += line_len;
                return true;
            }
        }
    }

    // ========================================================================
    // Token output
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let space_before = std::mem::take(&mut self.space_before);
        self.tokens
            .push(Token::new(kind, Span::new(start, self.pos), space_before));
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    fn add_newline(&mut self, start: usize) {
        let collapse = matches!(self.tokens.last(), None | Some(Token { kind: TokenKind::Newline, .. }));
        if !collapse {
            self.add_token(TokenKind::Newline, start);
        }
        self.space_before = false;
    }

    fn push_eof(&mut self) {
        let space_before = std::mem::take(&mut self.space_before);
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.pos, self.pos), space_before));
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        let end = self.pos.max(start + 1).min(self.source.len().max(start));
        self.errors
            .push(CompileError::new(message.into(), Span::new(start, end)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.pos;
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Comments
            '#' => {
                let len = self.rest().find('\n').unwrap_or(self.rest().len());
                self.pos += len;
            }

            // Statement separators
            '\n' => self.add_newline(start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            ',' => self.add_punct(PunctuationId::Comma, start),

            // Delimiters
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '{' => {
                self.brace_depth += 1;
                self.add_punct(PunctuationId::LBrace, start);
            }
            '}' => {
                self.brace_depth = self.brace_depth.saturating_sub(1);
                self.add_punct(PunctuationId::RBrace, start);
            }

            // Markers
            '=' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::FatArrow, start);
                } else {
                    self.add_punct(PunctuationId::Assign, start);
                }
            }
            '<' => self.add_punct(PunctuationId::Lt, start),
            '.' => {
                self.add_punct(PunctuationId::Dot, start);
                self.scan_method_name();
            }
            ':' => {
                if self.match_char(':') {
                    self.add_punct(PunctuationId::ColonColon, start);
                } else {
                    self.scan_symbol(start);
                }
            }

            // String-like literals
            '"' => self.scan_double_quoted(start),
            '\'' => self.scan_single_quoted(start),
            '`' => self.scan_backtick(start),
            '/' => self.scan_regexp(start, None, '/'),
            '%' => self.scan_percent_literal(start),

            // Numbers
            '-' if self.peek().is_some_and(|d| d.is_ascii_digit()) => self.scan_number(start),
            '0'..='9' => self.scan_number(start),

            // Variables
            '@' => self.scan_instance_or_class_variable(start),
            '$' => self.scan_global_variable(start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start, c),

            _ => self.error(format!("unexpected character `{}`", c), start),
        }
    }

    // ========================================================================
    // Name scanning
    // ========================================================================

    fn scan_ident_chars(&mut self) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
    }

    /// Consume a trailing `?` or `!` unless it begins `!=`/`?=`-style tokens.
    fn scan_predicate_suffix(&mut self) {
        if matches!(self.peek(), Some('?' | '!')) && self.peek_nth(1) != Some('=') {
            self.advance();
        }
    }

    fn scan_identifier(&mut self, start: usize, first: char) {
        self.scan_ident_chars();
        let is_const = first.is_ascii_uppercase();
        if !is_const {
            self.scan_predicate_suffix();
        }
        let spelling = &self.source[start..self.pos];

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else if is_const {
            self.add_token(TokenKind::Const(spelling.to_string()), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }

    /// Scan the method name after `.`, where keywords and operators are plain names.
    fn scan_method_name(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
            self.space_before = true;
        }
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                self.advance();
                self.scan_ident_chars();
                self.scan_predicate_suffix();
            }
            _ => match operators::longest_prefix(self.rest()) {
                Some(op) => self.pos += op.len(),
                None => {
                    self.error("expected a method name after `.`", start);
                    return;
                }
            },
        }
        let name = self.source[start..self.pos].to_string();
        self.add_token(TokenKind::MethodName(name), start);
    }

    fn scan_instance_or_class_variable(&mut self, start: usize) {
        let class_var = self.match_char('@');
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                self.scan_ident_chars();
                let name = self.source[start..self.pos].to_string();
                let kind = if class_var {
                    TokenKind::CVar(name)
                } else {
                    TokenKind::IVar(name)
                };
                self.add_token(kind, start);
            }
            _ => self.error("`@` must be followed by a variable name", start),
        }
    }

    fn scan_global_variable(&mut self, start: usize) {
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                self.scan_ident_chars();
                let name = self.source[start..self.pos].to_string();
                self.add_token(TokenKind::GVar(name), start);
            }
            _ => self.error("unsupported global variable", start),
        }
    }
}

/// Lex Ruby source into tokens.
///
/// ## Errors
/// Returns every lexical error found; the lexer keeps going after an error to report as many as possible.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// --- helpers -----------------------------------------------------------------

fn is_doc_marker(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
