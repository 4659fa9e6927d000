//! Method calls.

use unparser_core::lang::{keywords, operators};
use unparser_core::strings::{is_method_name, is_setter_name};
use unparser_syntax::ast::{Child, Node, NodeType};

use super::{EmitContext, EmitError, EmitResult, Emitter, Subject};

/// `send`: receiver (or `nil`), method name, arguments.
///
/// ## Notes
/// - Receiverless calls always get an argument list, so `foo()` never reads back as a local variable.
/// - Operator methods are written in call form (`a.+(1)`).
/// - Setters take exactly one argument and are written as assignments (`a.b = 1`).
pub(super) struct SendEmitter;

impl Emitter for SendEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        if subject.children().len() < 2 {
            return Err(subject.defect("expected a receiver and a method name"));
        }
        let receiver = subject.optional_node_at(0)?;
        let selector = subject.sym_at(1)?;
        let visited = subject.visited_children(cx)?;
        let mut args = Vec::with_capacity(visited.len() - 2);
        for arg in &visited[2..] {
            args.push(
                arg.as_emitted()
                    .ok_or_else(|| subject.defect("arguments must be nodes"))?,
            );
        }

        let Some(receiver) = receiver else {
            if keywords::is_reserved(selector)
                || operators::is_operator_method(selector)
                || is_setter_name(selector)
                || !is_method_name(selector)
            {
                return Err(EmitError::unsupported(
                    NodeType::Send,
                    format!("`{selector}` cannot be called without a receiver"),
                ));
            }
            cx.write(selector);
            write_args(cx, &args);
            return Ok(());
        };

        let receiver = match visited[0].as_emitted() {
            Some(text) if needs_parens(receiver) => format!("({text})"),
            Some(text) => text.to_string(),
            None => return Err(subject.defect("receiver must be a node")),
        };
        cx.write(&receiver);
        cx.write(".");
        if is_setter_name(selector) {
            let [value] = args.as_slice() else {
                return Err(EmitError::unsupported(
                    NodeType::Send,
                    format!("setter `{selector}` takes one argument, found {}", args.len()),
                ));
            };
            cx.write(&selector[..selector.len() - 1]);
            cx.write(" = ");
            cx.write(value);
        } else if operators::is_operator_method(selector) {
            cx.write(selector);
            write_args(cx, &args);
        } else if is_method_name(selector) {
            cx.write(selector);
            if !args.is_empty() {
                write_args(cx, &args);
            }
        } else {
            return Err(EmitError::unsupported(
                NodeType::Send,
                format!("`{selector}` is not a method name"),
            ));
        }
        Ok(())
    }
}

fn write_args(cx: &mut EmitContext<'_>, args: &[&str]) {
    cx.write("(");
    cx.write(&args.join(", "));
    cx.write(")");
}

/// Render `node` for use before `.` or `::`, parenthesized when it would otherwise swallow what follows.
pub(super) fn operand(cx: &EmitContext<'_>, node: &Node) -> EmitResult<String> {
    let text = cx.render(node)?;
    Ok(if needs_parens(node) { format!("({text})") } else { text })
}

/// Assignments and setter calls bind looser than a call on their result.
fn needs_parens(node: &Node) -> bool {
    match node.kind() {
        NodeType::Lvasgn | NodeType::Ivasgn | NodeType::Gvasgn | NodeType::Cvasgn | NodeType::Casgn => true,
        NodeType::Send => matches!(
            node.children(),
            [Child::Node(_), Child::Sym(selector), ..] if is_setter_name(selector)
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::emitter::{EmitError, emit};
    use unparser_syntax::ast::NodeType;
    use unparser_syntax::sexp::read_sexp;

    fn emit_sexp(sexp: &str) -> Result<String, EmitError> {
        emit(&read_sexp(sexp).unwrap())
    }

    // ========================================================================
    // Receiverless calls
    // ========================================================================

    #[test]
    fn test_receiverless_calls_are_parenthesized() {
        assert_eq!(emit_sexp("(send nil :foo)").unwrap(), "foo()");
        assert_eq!(emit_sexp("(send nil :puts (int 1) (str \"a\"))").unwrap(), r#"puts(1, "a")"#);
        assert_eq!(emit_sexp("(send nil :Integer (str \"1\"))").unwrap(), r#"Integer("1")"#);
        assert_eq!(emit_sexp("(send nil :empty?)").unwrap(), "empty?()");
    }

    #[test]
    fn test_receiverless_forms_without_spelling() {
        for selector in ["if", "+", "foo=", "[]", "foo bar"] {
            let sexp = format!("(send nil :{:?})", selector);
            let err = emit_sexp(&sexp).unwrap_err();
            assert!(matches!(err, EmitError::Unsupported { kind: NodeType::Send, .. }), "{selector}");
        }
    }

    // ========================================================================
    // Calls with a receiver
    // ========================================================================

    #[test]
    fn test_method_calls() {
        assert_eq!(emit_sexp("(send (lvar :a) :b)").unwrap(), "a.b");
        assert_eq!(emit_sexp("(send (lvar :a) :b (int 1))").unwrap(), "a.b(1)");
        assert_eq!(emit_sexp("(send (const nil :A) :Bar)").unwrap(), "A.Bar");
        assert_eq!(emit_sexp("(send (self) :class)").unwrap(), "self.class");
        assert_eq!(emit_sexp("(send (send nil :a) :b)").unwrap(), "a().b");
    }

    #[test]
    fn test_operator_methods_use_call_form() {
        assert_eq!(emit_sexp("(send (int 1) :+ (int 2))").unwrap(), "1.+(2)");
        assert_eq!(emit_sexp("(send (lvar :a) :[])").unwrap(), "a.[]()");
        assert_eq!(emit_sexp("(send (lvar :a) :[]= (int 1) (int 2))").unwrap(), "a.[]=(1, 2)");
    }

    #[test]
    fn test_setters() {
        assert_eq!(emit_sexp("(send (lvar :a) :b= (int 1))").unwrap(), "a.b = 1");
        let err = emit_sexp("(send (lvar :a) :b= (int 1) (int 2))").unwrap_err();
        assert!(matches!(err, EmitError::Unsupported { kind: NodeType::Send, .. }));
    }

    #[test]
    fn test_receivers_are_parenthesized_when_needed() {
        assert_eq!(emit_sexp("(send (lvasgn :a (int 1)) :b)").unwrap(), "(a = 1).b");
        assert_eq!(
            emit_sexp("(send (send (lvar :a) :b= (int 1)) :c)").unwrap(),
            "(a.b = 1).c"
        );
    }

    #[test]
    fn test_send_shape_errors() {
        assert!(matches!(
            emit_sexp("(send nil)").unwrap_err(),
            EmitError::Defect { kind: NodeType::Send, .. }
        ));
        assert!(matches!(
            emit_sexp("(send nil :foo 1)").unwrap_err(),
            EmitError::Defect { kind: NodeType::Send, .. }
        ));
    }
}
