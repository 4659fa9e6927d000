//! Segmented literals: interpolated strings, command strings and regexps.

use unparser_core::strings::escape_segment;
use unparser_syntax::ast::{Child, Node, NodeType};

use super::{EmitContext, EmitError, EmitResult, Emitter, Subject};
use crate::quote::{escape_bare, escape_interpolation, percent_r_closing, transquote};

pub(super) static DSTR: Segmented = Segmented { delimiter: '"' };
pub(super) static XSTR: Segmented = Segmented { delimiter: '`' };

/// `dstr` and `xstr`: string segments escaped for the delimiter, other segments interpolated.
pub(super) struct Segmented {
    delimiter: char,
}

impl Emitter for Segmented {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        let delimiter = self.delimiter.to_string();
        cx.write(&delimiter);
        for index in 0..subject.children().len() {
            let segment = subject.node_at(index)?;
            match segment.kind() {
                NodeType::Str => cx.write(&escape_segment(str_value(segment)?, self.delimiter)),
                _ => interpolation(cx, segment)?,
            }
        }
        cx.write(&delimiter);
        Ok(())
    }
}

/// `regexp`: segments between slashes, then the `regopt` child.
///
/// String segments hold the pattern as written. A `%r` pattern is re-quoted from its own delimiter to `/`, the same
/// way the preprocessor does; any other pattern only gets its bare slashes escaped. Interpolation openers are escaped
/// in both cases.
pub(super) struct RegexpEmitter;

impl Emitter for RegexpEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        let count = subject.children().len();
        let Some(last) = count.checked_sub(1) else {
            return Err(subject.defect("missing options"));
        };
        let options = subject.node_at(last)?;
        if options.kind() != NodeType::Regopt {
            return Err(subject.defect("last child must be `regopt`"));
        }
        let from = subject
            .node()
            .location()
            .and_then(|location| location.begin_source())
            .and_then(percent_r_closing);

        cx.write("/");
        for index in 0..last {
            let segment = subject.node_at(index)?;
            if segment.kind() != NodeType::Str {
                interpolation(cx, segment)?;
                continue;
            }
            let pattern = match from {
                Some(from) => transquote(str_value(segment)?, from, '/')?,
                None => escape_bare(str_value(segment)?, '/')?,
            };
            // The child after the last segment is `regopt`.
            let next = subject.node_at(index + 1)?;
            let next = match next.kind() {
                NodeType::Str => str_value(next)?.chars().next(),
                _ => None,
            };
            cx.write(&escape_interpolation(&pattern, next)?);
        }
        cx.write("/");
        cx.visit(options)
    }
}

/// `regopt`: the option letters.
pub(super) struct RegoptEmitter;

impl Emitter for RegoptEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        let mut letters = String::new();
        for index in 0..subject.children().len() {
            let option = subject.sym_at(index)?;
            if option.len() != 1 || !option.chars().all(|c| c.is_ascii_lowercase()) {
                return Err(subject.defect(format!("`{option}` is not a regexp option")));
            }
            letters.push_str(option);
        }
        cx.write(&letters);
        Ok(())
    }
}

fn str_value(segment: &Node) -> EmitResult<&str> {
    match segment.children() {
        [Child::Str(value)] => Ok(value),
        _ => Err(EmitError::defect(NodeType::Str, "expected a single string value")),
    }
}

/// `#{...}` around a non-string segment; a `begin` segment writes its statements separated by `; `.
fn interpolation(cx: &mut EmitContext<'_>, segment: &Node) -> EmitResult<()> {
    let body = if segment.kind() == NodeType::Begin {
        segment
            .children()
            .iter()
            .map(|child| match child {
                Child::Node(statement) => cx.render(statement),
                _ => Err(EmitError::defect(NodeType::Begin, "statements must be nodes")),
            })
            .collect::<EmitResult<Vec<_>>>()?
            .join("; ")
    } else {
        cx.render(segment)?
    };
    cx.write("#{");
    cx.write(&body);
    cx.write("}");
    Ok(())
}
