//! Delimiter re-quoting for literal bodies.
//!
//! A literal body written between one pair of delimiters escapes that delimiter (`%r{a\}b}`); moving the body
//! between other delimiters (`/a}b/`) means dropping those escapes and escaping the new delimiter instead. Every
//! other escape sequence is left alone, so the body keeps its meaning.
//!
//! ## Examples
//! ```rust
//! use unparser::quote::transquote;
//!
//! assert_eq!(transquote("a/b", '}', '/').unwrap(), r"a\/b");
//! assert_eq!(transquote(r"a\}b\d", '}', '/').unwrap(), r"a}b\d");
//! ```

use thiserror::Error;

/// Errors produced while re-quoting a literal body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The escape character, or a character that is not ASCII punctuation.
    #[error("`{delimiter}` cannot be used as a literal delimiter")]
    InvalidDelimiter { delimiter: char },
    #[error("content ends in a dangling escape at offset {offset}")]
    DanglingEscape { offset: usize },
}

const ESCAPE: char = '\\';

/// Move `content` from `from` delimiters to `to` delimiters.
///
/// ## Parameters
/// - `content`: literal body as written between `from` delimiters, escapes included.
/// - `from`: delimiter `content` was written for (for bracket pairs, the closing bracket).
/// - `to`: delimiter the result is written for.
///
/// ## Returns
/// - `content` unchanged when `from == to`.
///
/// ## Errors
/// - [`QuoteError::InvalidDelimiter`] if either delimiter is `\` or not ASCII punctuation.
/// - [`QuoteError::DanglingEscape`] if `content` ends in an unpaired `\`.
pub fn transquote(content: &str, from: char, to: char) -> Result<String, QuoteError> {
    if from == to {
        return Ok(content.to_string());
    }
    check_delimiter(from)?;
    check_delimiter(to)?;

    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some((_, escaped)) if escaped == from => out.push(from),
                Some((_, escaped)) => {
                    out.push(ESCAPE);
                    out.push(escaped);
                }
                None => return Err(QuoteError::DanglingEscape { offset }),
            },
            c if c == to => {
                out.push(ESCAPE);
                out.push(to);
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escape bare occurrences of `delimiter` in `content`, leaving existing escape sequences untouched.
///
/// ## Errors
/// - [`QuoteError::InvalidDelimiter`] if `delimiter` is `\` or not ASCII punctuation.
/// - [`QuoteError::DanglingEscape`] if `content` ends in an unpaired `\`.
pub fn escape_bare(content: &str, delimiter: char) -> Result<String, QuoteError> {
    check_delimiter(delimiter)?;
    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            ESCAPE => {
                let (_, escaped) = chars.next().ok_or(QuoteError::DanglingEscape { offset })?;
                out.push(ESCAPE);
                out.push(escaped);
            }
            c if c == delimiter => {
                out.push(ESCAPE);
                out.push(c);
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escape every bare `#` that would open an interpolation (`#{`, `#@`, `#$`), leaving escape sequences untouched.
///
/// `next` is the first character written after `content`; a trailing `#` is escaped when it would join with it.
///
/// ## Errors
/// - [`QuoteError::DanglingEscape`] if `content` ends in an unpaired `\`.
pub fn escape_interpolation(content: &str, next: Option<char>) -> Result<String, QuoteError> {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        match c {
            ESCAPE => {
                let (_, escaped) = chars.next().ok_or(QuoteError::DanglingEscape { offset })?;
                out.push(ESCAPE);
                out.push(escaped);
            }
            '#' => {
                let following = chars.peek().map(|&(_, c)| c).or(next);
                if matches!(following, Some('{' | '@' | '$')) {
                    out.push(ESCAPE);
                }
                out.push('#');
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Closing delimiter for an opening one: brackets pair up, anything else closes itself.
pub fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

/// Closing delimiter of a `%r` literal from its opening source (`%r{` gives `}`); `None` for any other opening.
pub fn percent_r_closing(begin: &str) -> Option<char> {
    begin.strip_prefix("%r").and_then(|rest| rest.chars().last()).map(closing_delimiter)
}

fn check_delimiter(delimiter: char) -> Result<(), QuoteError> {
    if delimiter == ESCAPE || !delimiter.is_ascii_punctuation() {
        return Err(QuoteError::InvalidDelimiter { delimiter });
    }
    Ok(())
}
