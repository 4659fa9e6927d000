//! Statement groupings.

use unparser_core::lang::keywords::{self, KeywordId};
use unparser_syntax::ast::Child;

use super::{EmitContext, EmitResult, Emitter, Subject};

/// `begin` in expression position: `(a; b)`.
///
/// Root and body positions print the statements one per line instead (see [`EmitContext::statements`]).
pub(super) struct BeginEmitter;

impl Emitter for BeginEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        let mut statements = Vec::with_capacity(subject.children().len());
        for visited in subject.visited_children(cx)? {
            let text = visited
                .as_emitted()
                .ok_or_else(|| subject.defect("statements must be nodes"))?;
            statements.push(text);
        }
        let joined = statements.join("; ");
        cx.write("(");
        cx.write(&joined);
        cx.write(")");
        Ok(())
    }
}

/// `begin` + statements + `end`.
pub(super) struct KwbeginEmitter;

impl Emitter for KwbeginEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        cx.write(keywords::as_str(KeywordId::Begin));
        cx.nl();
        if !subject.children().is_empty() {
            cx.indent();
            let result = statements(cx, subject);
            cx.dedent();
            result?;
            cx.nl();
        }
        cx.write(keywords::as_str(KeywordId::End));
        Ok(())
    }
}

fn statements(cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
    for (i, child) in subject.children().iter().enumerate() {
        let Child::Node(statement) = child else {
            return Err(subject.defect("statements must be nodes"));
        };
        if i > 0 {
            cx.nl();
        }
        cx.visit(statement)?;
    }
    Ok(())
}
