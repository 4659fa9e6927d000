//! String, command, regex and symbol scanning.
//!
//! Double-quoted bodies (strings, backtick commands) are split into text runs and `#{}` interpolations; each run is
//! decoded with `unparser_core::strings::unescape_double_quoted`, so the lexer and the emitter share one set of
//! escape rules. Regex bodies keep their raw source text, backslashes included.

use super::Lexer;
use super::tokens::{RegexpLiteral, StrLiteral, StrPart, TokenKind};
use crate::ast::Span;
use crate::diagnostics::CompileError;
use unparser_core::lang::operators;
use unparser_core::strings::{is_ident_start, unescape_double_quoted};

/// How a literal body treats backslashes and `#{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    /// Escapes decoded, interpolation allowed.
    Double,
    /// Only `\\` and an escaped delimiter are decoded, no interpolation.
    Single,
    /// Raw text kept, interpolation allowed.
    Regexp,
}

const REGEXP_OPTIONS: &str = "imxounse";

impl<'a> Lexer<'a> {
    pub(super) fn scan_double_quoted(&mut self, start: usize) {
        if let Some(literal) = self.scan_literal(start, None, '"', Body::Double) {
            self.add_token(TokenKind::Str(literal), start);
        }
    }

    pub(super) fn scan_single_quoted(&mut self, start: usize) {
        if let Some(literal) = self.scan_literal(start, None, '\'', Body::Single) {
            self.add_token(TokenKind::Str(literal), start);
        }
    }

    pub(super) fn scan_backtick(&mut self, start: usize) {
        if let Some(literal) = self.scan_literal(start, None, '`', Body::Double) {
            self.add_token(TokenKind::XStr(literal), start);
        }
    }

    /// Scan `%r` followed by its delimiter. Other percent literals are not supported.
    pub(super) fn scan_percent_literal(&mut self, start: usize) {
        if self.peek() != Some('r') {
            self.error("unsupported percent literal", start);
            return;
        }
        self.advance();
        let Some(open) = self.advance() else {
            self.error("unterminated regex", start);
            return;
        };
        if open.is_alphanumeric() || open.is_whitespace() {
            self.error("invalid `%r` delimiter", start);
            return;
        }
        let (nest, close) = match open {
            '(' => (Some('('), ')'),
            '[' => (Some('['), ']'),
            '{' => (Some('{'), '}'),
            '<' => (Some('<'), '>'),
            other => (None, other),
        };
        self.scan_regexp(start, nest, close);
    }

    /// Scan a regex body and its options; the opening delimiter has been consumed.
    pub(super) fn scan_regexp(&mut self, start: usize, nest: Option<char>, close: char) {
        let Some(literal) = self.scan_literal(start, nest, close, Body::Regexp) else {
            return;
        };
        let options_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let options = self.source[options_start..self.pos].to_string();
        if let Some(bad) = options.chars().find(|c| !REGEXP_OPTIONS.contains(*c)) {
            self.error(format!("unknown regex option `{bad}`"), options_start);
            return;
        }
        let StrLiteral { parts, open, close } = literal;
        self.add_token(
            TokenKind::Regexp(RegexpLiteral {
                parts,
                options,
                open,
                close,
            }),
            start,
        );
    }

    /// Scan a symbol after its `:`.
    pub(super) fn scan_symbol(&mut self, start: usize) {
        let name_start = self.pos;
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let body = if quote == '"' { Body::Double } else { Body::Single };
                let Some(literal) = self.scan_literal(start, None, quote, body) else {
                    return;
                };
                let mut name = String::new();
                for part in literal.parts {
                    match part {
                        StrPart::Text { value, .. } => name.push_str(&value),
                        StrPart::Interp { span, .. } => {
                            self.errors.push(CompileError::new(
                                "interpolated symbols are not supported".to_string(),
                                span,
                            ));
                            return;
                        }
                    }
                }
                self.add_token(TokenKind::Symbol(name), start);
            }
            Some('@') => {
                self.advance();
                self.match_char('@');
                self.scan_symbol_ident(start, name_start);
            }
            Some('$') => {
                self.advance();
                self.scan_symbol_ident(start, name_start);
            }
            Some(c) if is_ident_start(c) => {
                self.scan_ident_chars();
                if matches!(self.peek(), Some('?' | '!')) {
                    self.advance();
                } else if self.peek() == Some('=') && !matches!(self.peek_nth(1), Some('>' | '=' | '~')) {
                    self.advance();
                }
                let name = self.source[name_start..self.pos].to_string();
                self.add_token(TokenKind::Symbol(name), start);
            }
            _ => match operators::longest_prefix(self.rest()) {
                Some(op) => {
                    self.pos += op.len();
                    self.add_token(TokenKind::Symbol(op.to_string()), start);
                }
                None => self.error("unexpected `:`", start),
            },
        }
    }

    fn scan_symbol_ident(&mut self, start: usize, name_start: usize) {
        if !self.peek().is_some_and(is_ident_start) {
            self.error("invalid symbol", start);
            return;
        }
        self.scan_ident_chars();
        let name = self.source[name_start..self.pos].to_string();
        self.add_token(TokenKind::Symbol(name), start);
    }

    // ========================================================================
    // Literal bodies
    // ========================================================================

    /// Scan a literal body up to its closing delimiter; the opening delimiter has been consumed.
    ///
    /// ## Parameters
    /// - `start`: offset of the whole literal (for error spans).
    /// - `nest`: opening bracket that nests, for bracketed `%r` delimiters.
    /// - `close`: closing delimiter.
    fn scan_literal(&mut self, start: usize, nest: Option<char>, close: char, body: Body) -> Option<StrLiteral> {
        let open = Span::new(start, self.pos);
        let mut parts = Vec::new();
        let mut run = String::new();
        let mut run_start = self.pos;
        let mut depth = 0usize;

        loop {
            let at = self.pos;
            let Some(c) = self.advance() else {
                self.errors.push(CompileError::new(
                    "unterminated literal".to_string(),
                    Span::new(start, self.source.len()),
                ));
                return None;
            };
            match c {
                '\\' => {
                    let Some(next) = self.advance() else {
                        continue;
                    };
                    match body {
                        Body::Single if next == '\\' || next == close => run.push(next),
                        Body::Single => {
                            run.push('\\');
                            run.push(next);
                        }
                        Body::Double | Body::Regexp => {
                            run.push('\\');
                            run.push(next);
                        }
                    }
                }
                '#' if body != Body::Single && self.peek() == Some('{') => {
                    self.flush_run(&mut parts, &mut run, run_start, at, body);
                    self.advance();
                    let tokens = self.lex_interpolation(self.pos, start)?;
                    parts.push(StrPart::Interp {
                        tokens,
                        span: Span::new(at, self.pos),
                    });
                    run_start = self.pos;
                }
                c if Some(c) == nest && nest != Some(close) => {
                    depth += 1;
                    run.push(c);
                }
                c if c == close && depth > 0 => {
                    depth -= 1;
                    run.push(c);
                }
                c if c == close => {
                    self.flush_run(&mut parts, &mut run, run_start, at, body);
                    return Some(StrLiteral {
                        parts,
                        open,
                        close: Span::new(at, self.pos),
                    });
                }
                c => run.push(c),
            }
        }
    }

    fn flush_run(&mut self, parts: &mut Vec<StrPart>, run: &mut String, run_start: usize, run_end: usize, body: Body) {
        if run.is_empty() {
            return;
        }
        let raw = std::mem::take(run);
        let span = Span::new(run_start, run_end);
        let value = match body {
            Body::Double => match unescape_double_quoted(&raw) {
                Ok(value) => value,
                Err(err) => {
                    let at = run_start + err.offset;
                    self.errors
                        .push(CompileError::new(err.message().to_string(), Span::new(at, at + 1)));
                    return;
                }
            },
            Body::Single | Body::Regexp => raw,
        };
        parts.push(StrPart::Text { value, span });
    }
}
