//! Define Ruby literal quoting rules (policy + pure helpers).
//!
//! Both directions live here: the `inspect`-style writers used by the emitter and the s-expression printer, and the
//! double-quoted escape decoder used by the lexer and the s-expression reader.
//!
//! ## Notes
//! - **Strings are UTF-8**: byte escapes (`\xNN`, octal) above `0x7F` cannot be represented and are rejected.
//! - **Interpolation openers**: `#{`, `#$` and `#@` are written as `\#{`, `\#$`, `\#@` so that no literal ever
//!   re-parses as an interpolation.
//! - **Identifiers**: ASCII letters, digits and `_`, plus any non-ASCII alphanumeric character.

use std::fmt;

use crate::lang::{keywords, operators};

/// Describe why a double-quoted escape sequence could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeErrorKind {
    /// Content ends with a lone backslash.
    Dangling,
    /// `\x` without hex digits.
    MissingHexDigits,
    /// Malformed `\u` / `\u{...}`.
    InvalidUnicode,
    /// A byte escape above `0x7F`.
    NonAsciiByte,
}

/// Represent a failed decode, with the byte offset of the offending backslash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeError {
    pub offset: usize,
    pub kind: EscapeErrorKind,
}

impl EscapeError {
    /// Return the user-facing message for this error.
    pub fn message(self) -> &'static str {
        match self.kind {
            EscapeErrorKind::Dangling => "dangling backslash at end of literal",
            EscapeErrorKind::MissingHexDigits => "invalid hex escape",
            EscapeErrorKind::InvalidUnicode => "invalid Unicode escape",
            EscapeErrorKind::NonAsciiByte => "byte escape above \\x7F is not valid UTF-8",
        }
    }
}

impl fmt::Display for EscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message(), self.offset)
    }
}

impl std::error::Error for EscapeError {}

// ============================================================================
// Names
// ============================================================================

/// Whether `c` may start an identifier.
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

/// Whether `c` may continue an identifier.
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric() || (!c.is_ascii() && c.is_alphanumeric())
}

/// Whether `s` is a bare identifier (`foo`, `_x1`, `Foo`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

/// Whether `s` is a constant name (an identifier starting with an ASCII uppercase letter).
pub fn is_constant_name(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_uppercase()) && is_identifier(s)
}

/// Whether `s` can be read back as a local variable (lowercase or `_` identifier, not a keyword).
pub fn is_local_name(s: &str) -> bool {
    is_identifier(s) && !is_constant_name(s) && !keywords::is_reserved(s)
}

/// Whether `s` is a plain method name: an identifier optionally followed by `?`, `!` or `=`.
pub fn is_method_name(s: &str) -> bool {
    let base = s
        .strip_suffix('?')
        .or_else(|| s.strip_suffix('!'))
        .or_else(|| s.strip_suffix('='))
        .unwrap_or(s);
    is_identifier(base)
}

/// Whether `s` is a setter method name (`foo=`).
pub fn is_setter_name(s: &str) -> bool {
    s.strip_suffix('=').is_some_and(is_identifier)
}

/// Whether `s` is a variable name with the given sigil (`@`, `@@`, `$`).
pub fn is_sigil_name(s: &str, sigil: &str) -> bool {
    let Some(rest) = s.strip_prefix(sigil) else {
        return false;
    };
    // `@@a` must not pass as an `@` name.
    if sigil == "@" && rest.starts_with('@') {
        return false;
    }
    rest.starts_with(|c: char| !c.is_ascii_digit()) && is_identifier(rest)
}

/// Whether a symbol with this name can be written without quotes (`:foo`, `:foo=`, `:@a`, `:+`).
pub fn is_simple_symbol(name: &str) -> bool {
    is_method_name(name)
        || operators::is_operator_method(name)
        || is_sigil_name(name, "@")
        || is_sigil_name(name, "@@")
        || is_sigil_name(name, "$")
}

// ============================================================================
// Writers
// ============================================================================

/// Write `s` as a double-quoted Ruby string literal.
///
/// ## Examples
/// ```rust
/// use unparser_core::strings::inspect_string;
///
/// assert_eq!(inspect_string("He said \"hi\"\\"), r#""He said \"hi\"\\""#);
/// assert_eq!(inspect_string("a\nb"), r#""a\nb""#);
/// assert_eq!(inspect_string("#{x}"), r#""\#{x}""#);
/// ```
pub fn inspect_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    escape_into(&mut out, s, '"', false);
    out.push('"');
    out
}

/// Write `name` as a symbol literal (`:foo` or `:"foo bar"`).
pub fn inspect_symbol(name: &str) -> String {
    if is_simple_symbol(name) {
        format!(":{name}")
    } else {
        format!(":{}", inspect_string(name))
    }
}

/// Escape one string segment of a literal delimited by `delimiter` (e.g. a `dstr` segment between `"`).
///
/// ## Notes
/// - A trailing `#` is escaped as well, because the next segment may be an interpolation or start with `{`.
pub fn escape_segment(s: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s, delimiter, true);
    out
}

// ============================================================================
// Reader
// ============================================================================

/// Decode the body of a double-quoted literal (without the surrounding quotes).
///
/// ## Parameters
/// - `raw`: literal body as written in source.
///
/// ## Returns
/// - `Ok(String)`: the string value.
/// - `Err(EscapeError)`: for escapes that have no UTF-8 value.
///
/// ## Notes
/// - Unknown escapes (`\q`) decode to the escaped character, as in Ruby.
/// - A backslash-newline pair is a line continuation and decodes to nothing.
pub fn unescape_double_quoted(raw: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let err = |kind| EscapeError { offset, kind };
        let Some((_, esc)) = chars.next() else {
            return Err(err(EscapeErrorKind::Dangling));
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            'b' => out.push('\x08'),
            'a' => out.push('\x07'),
            'e' => out.push('\x1b'),
            's' => out.push(' '),
            '\n' => {}
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|&(_, d)| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(ascii_byte(value).ok_or(err(EscapeErrorKind::NonAsciiByte))?);
            }
            'x' => {
                let mut value = 0;
                let mut digits = 0;
                while digits < 2 {
                    match chars.peek().and_then(|&(_, d)| d.to_digit(16)) {
                        Some(d) => {
                            value = value * 16 + d;
                            digits += 1;
                            chars.next();
                        }
                        None => break,
                    }
                }
                if digits == 0 {
                    return Err(err(EscapeErrorKind::MissingHexDigits));
                }
                out.push(ascii_byte(value).ok_or(err(EscapeErrorKind::NonAsciiByte))?);
            }
            'u' => {
                if chars.peek().is_some_and(|&(_, d)| d == '{') {
                    chars.next();
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, d)) => body.push(d),
                            None => return Err(err(EscapeErrorKind::InvalidUnicode)),
                        }
                    }
                    let mut any = false;
                    for part in body.split_ascii_whitespace() {
                        out.push(code_point(part).ok_or(err(EscapeErrorKind::InvalidUnicode))?);
                        any = true;
                    }
                    if !any {
                        return Err(err(EscapeErrorKind::InvalidUnicode));
                    }
                } else {
                    let mut hex = String::with_capacity(4);
                    for _ in 0..4 {
                        match chars.peek() {
                            Some(&(_, d)) if d.is_ascii_hexdigit() => {
                                hex.push(d);
                                chars.next();
                            }
                            _ => return Err(err(EscapeErrorKind::InvalidUnicode)),
                        }
                    }
                    out.push(code_point(&hex).ok_or(err(EscapeErrorKind::InvalidUnicode))?);
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

// --- helpers -----------------------------------------------------------------

fn escape_into(out: &mut String, s: &str, delimiter: char, escape_trailing_hash: bool) {
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            '\x08' => out.push_str("\\b"),
            '\x07' => out.push_str("\\a"),
            '\x1b' => out.push_str("\\e"),
            '#' => match chars.peek() {
                Some('{' | '$' | '@') => out.push_str("\\#"),
                None if escape_trailing_hash => out.push_str("\\#"),
                _ => out.push('#'),
            },
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
}

fn ascii_byte(value: u32) -> Option<char> {
    if value <= 0x7F { char::from_u32(value) } else { None }
}

fn code_point(hex: &str) -> Option<char> {
    if hex.is_empty() || hex.len() > 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
