//! S-expression rendering and reading.
//!
//! [`to_sexp`] prints a tree the way the `parser` gem's `Node#to_sexp` does: nested nodes go on their own line,
//! indented two spaces per level, and payloads follow the type tag on the same line. [`read_sexp`] accepts that
//! format back, with any whitespace between items, so fixtures can be written on one line.
//!
//! ## Examples
//! ```rust
//! use unparser_syntax::sexp::{read_sexp, to_sexp};
//!
//! let node = read_sexp("(send nil :puts (str \"hi\"))").unwrap();
//! assert_eq!(to_sexp(&node), "(send nil :puts\n  (str \"hi\"))");
//! ```

use thiserror::Error;
use unparser_core::lang::node_types;
use unparser_core::strings::{self, inspect_string, inspect_symbol};

use crate::ast::{Child, Node};

/// Errors produced while reading an s-expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SexpError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },
    #[error("unknown node type `{name}` at offset {offset}")]
    UnknownType { offset: usize, name: String },
    #[error("invalid atom `{text}` at offset {offset}")]
    InvalidAtom { offset: usize, text: String },
    #[error("invalid string at offset {offset}: {message}")]
    InvalidString { offset: usize, message: String },
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Render `node` in `parser`-gem s-expression format.
pub fn to_sexp(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

/// Render a single payload child (`nil`, `1`, `"a"`, `:a`).
pub fn payload_sexp(child: &Child) -> String {
    match child {
        Child::Node(node) => to_sexp(node),
        Child::Nil => "nil".to_string(),
        Child::Int(value) => value.to_string(),
        Child::Float(value) => format!("{value:?}"),
        Child::Str(value) => inspect_string(value),
        Child::Sym(name) => inspect_symbol(name),
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push('(');
    out.push_str(node.kind().as_str());
    for child in node.children() {
        match child {
            Child::Node(inner) => {
                out.push('\n');
                write_node(out, inner, depth + 1);
            }
            payload => {
                out.push(' ');
                out.push_str(&payload_sexp(payload));
            }
        }
    }
    out.push(')');
}

/// Read one s-expression into a node without locations.
///
/// ## Errors
/// Returns a [`SexpError`] describing the first problem found.
pub fn read_sexp(input: &str) -> Result<Node, SexpError> {
    let mut reader = Reader { input, pos: 0 };
    reader.skip_whitespace();
    let node = reader.node()?;
    reader.skip_whitespace();
    if reader.pos < input.len() {
        return Err(SexpError::TrailingInput { offset: reader.pos });
    }
    Ok(node)
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SexpError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(SexpError::UnexpectedChar { offset: self.pos, found }),
            None => Err(SexpError::UnexpectedEnd),
        }
    }

    /// Read a bare word up to whitespace or a parenthesis.
    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek().filter(|c| !c.is_whitespace() && *c != '(' && *c != ')') {
            self.pos += c.len_utf8();
        }
        let input = self.input;
        &input[start..self.pos]
    }

    fn node(&mut self) -> Result<Node, SexpError> {
        self.expect('(')?;
        let offset = self.pos;
        let tag = self.word();
        let kind = node_types::from_str(tag).ok_or_else(|| SexpError::UnknownType {
            offset,
            name: tag.to_string(),
        })?;
        let mut children = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(SexpError::UnexpectedEnd),
                Some(')') => {
                    self.pos += 1;
                    return Ok(Node::new(kind, children));
                }
                Some('(') => children.push(Child::Node(self.node()?)),
                Some(_) => children.push(self.payload()?),
            }
        }
    }

    fn payload(&mut self) -> Result<Child, SexpError> {
        let offset = self.pos;
        match self.peek() {
            Some('"') => Ok(Child::Str(self.string()?)),
            Some(':') => {
                self.pos += 1;
                if self.peek() == Some('"') {
                    return Ok(Child::Sym(self.string()?));
                }
                let name = self.word();
                if name.is_empty() {
                    return Err(SexpError::InvalidAtom {
                        offset,
                        text: ":".to_string(),
                    });
                }
                Ok(Child::sym(name))
            }
            _ => {
                let text = self.word();
                atom(text).ok_or_else(|| SexpError::InvalidAtom {
                    offset,
                    text: text.to_string(),
                })
            }
        }
    }

    /// Read a double-quoted string, decoding escapes.
    fn string(&mut self) -> Result<String, SexpError> {
        let start = self.pos;
        self.expect('"')?;
        let input = self.input;
        let body_start = self.pos;
        let mut escaped = false;
        for (i, c) in input[body_start..].char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    let raw = &input[body_start..body_start + i];
                    self.pos = body_start + i + 1;
                    return strings::unescape_double_quoted(raw).map_err(|err| SexpError::InvalidString {
                        offset: body_start + err.offset,
                        message: err.message().to_string(),
                    });
                }
                _ => {}
            }
        }
        Err(SexpError::InvalidString {
            offset: start,
            message: "unterminated string".to_string(),
        })
    }
}

fn atom(text: &str) -> Option<Child> {
    match text {
        "nil" => return Some(Child::Nil),
        "NaN" => return Some(Child::Float(f64::NAN)),
        "inf" => return Some(Child::Float(f64::INFINITY)),
        "-inf" => return Some(Child::Float(f64::NEG_INFINITY)),
        _ => {}
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if let Ok(value) = text.parse::<i64>() {
        return Some(Child::Int(value));
    }
    text.parse::<f64>().ok().map(Child::Float)
}
