//! Module and class definitions.

use unparser_core::lang::keywords::{self, KeywordId};
use unparser_syntax::ast::{Node, NodeType};

use super::{EmitContext, EmitResult, Emitter, Subject};

/// `module Name` + body + `end`.
pub(super) struct ModuleEmitter;

impl Emitter for ModuleEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(2)?;
        let name = definition_name(subject)?;
        let body = subject.optional_node_at(1)?;

        cx.write(keywords::as_str(KeywordId::Module));
        cx.write(" ");
        cx.visit(name)?;
        cx.body(body)?;
        cx.write(keywords::as_str(KeywordId::End));
        Ok(())
    }
}

/// `class Name < Super` + body + `end`.
pub(super) struct ClassEmitter;

impl Emitter for ClassEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(3)?;
        let name = definition_name(subject)?;
        let superclass = subject.optional_node_at(1)?;
        let body = subject.optional_node_at(2)?;

        cx.write(keywords::as_str(KeywordId::Class));
        cx.write(" ");
        cx.visit(name)?;
        if let Some(superclass) = superclass {
            cx.write(" < ");
            cx.visit(superclass)?;
        }
        cx.body(body)?;
        cx.write(keywords::as_str(KeywordId::End));
        Ok(())
    }
}

fn definition_name<'n>(subject: &Subject<'n>) -> EmitResult<&'n Node> {
    let name = subject.node_at(0)?;
    if name.kind() != NodeType::Const {
        return Err(subject.defect(format!("name must be a `const`, found `{}`", name.kind())));
    }
    Ok(name)
}
