//! Constants, variables and assignments.

use unparser_syntax::ast::NodeType;

use super::send::operand;
use super::{EmitContext, EmitResult, Emitter, Subject};

/// `Name`, `Scope::Name` or `::Name`.
pub(super) struct ConstEmitter;

impl Emitter for ConstEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(2)?;
        const_path(cx, subject)
    }
}

/// The top-level scope, `::`.
pub(super) struct CbaseEmitter;

impl Emitter for CbaseEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(0)?;
        cx.write("::");
        Ok(())
    }
}

/// `lvar`, `ivar`, `gvar`, `cvar`: the name as stored, sigil included.
pub(super) struct VariableEmitter;

impl Emitter for VariableEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(1)?;
        cx.write(subject.sym_at(0)?);
        Ok(())
    }
}

/// `lvasgn`, `ivasgn`, `gvasgn`, `cvasgn`: `name = value`.
pub(super) struct AssignmentEmitter;

impl Emitter for AssignmentEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(2)?;
        let name = subject.sym_at(0)?;
        let value = subject.node_at(1)?;
        cx.write(name);
        cx.write(" = ");
        cx.visit(value)
    }
}

/// `casgn`: constant path, then ` = value`.
pub(super) struct ConstAssignmentEmitter;

impl Emitter for ConstAssignmentEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(3)?;
        let value = subject.node_at(2)?;
        const_path(cx, subject)?;
        cx.write(" = ");
        cx.visit(value)
    }
}

/// Scope (child 0) and name (child 1) of `const` and `casgn`.
fn const_path(cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
    let name = subject.sym_at(1)?;
    match subject.optional_node_at(0)? {
        None => {}
        // `::` already is the separator.
        Some(scope) if scope.kind() == NodeType::Cbase => cx.visit(scope)?,
        Some(scope) => {
            let scope = operand(cx, scope)?;
            cx.write(&scope);
            cx.write("::");
        }
    }
    cx.write(name);
    Ok(())
}
