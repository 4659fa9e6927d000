//! Diagnostics for lexing and parsing.
//!
//! [`CompileError`] is the plain error value the lexer and parser collect. [`SourceDiagnostic`] pairs one with the
//! source text so `miette` can render it with the offending span labelled.

use miette::{Diagnostic, NamedSource, SourceSpan};

use crate::ast::Span;

/// A lexing/parsing error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Error,
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind: ErrorKind::Syntax,
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CompileError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Lexical errors (bad escapes, unterminated literals, stray characters).
    Error,
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Error => write!(f, "error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A [`CompileError`] bound to its source text for rendering.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{kind}: {message}")]
pub struct SourceDiagnostic {
    kind: ErrorKind,
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
}

impl SourceDiagnostic {
    pub fn new(file_name: &str, source: &str, error: &CompileError) -> Self {
        let start = error.span.start.min(source.len());
        let len = error.span.end.min(source.len()).saturating_sub(start);
        let help = if error.hints.is_empty() {
            None
        } else {
            Some(error.hints.join("\n"))
        };
        Self {
            kind: error.kind,
            message: error.message.clone(),
            source_code: NamedSource::new(file_name, source.to_string()),
            span: SourceSpan::new(start.into(), len),
            help,
        }
    }
}

/// Get the 1-based line and column for a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }
    (line_num, offset - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "a = 1\nb = @\n";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 10), (2, 5));
        assert_eq!(line_col(source, 999), (3, 1));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = CompileError::syntax("expected `end`".to_string(), Span::new(0, 1));
        assert_eq!(err.to_string(), "syntax error: expected `end`");
    }

    #[test]
    fn test_source_diagnostic_clamps_span() {
        let err = CompileError::new("unterminated string".to_string(), Span::new(2, 50)).with_hint("add a `\"`");
        let diag = SourceDiagnostic::new("a.rb", "x \"abc", &err);
        assert_eq!(diag.span.offset(), 2);
        assert_eq!(diag.span.len(), 4);
        assert_eq!(diag.help.as_deref(), Some("add a `\"`"));
    }
}
