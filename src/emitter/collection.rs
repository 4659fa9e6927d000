//! Array and hash literals.

use unparser_syntax::ast::NodeType;

use super::{EmitContext, EmitResult, Emitter, Subject};

/// `[a, b]`.
pub(super) struct ArrayEmitter;

impl Emitter for ArrayEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        let items = emitted(cx, subject, "elements")?;
        cx.write("[");
        cx.write(&items.join(", "));
        cx.write("]");
        Ok(())
    }
}

/// `{}` or `{ k => v, ... }`.
pub(super) struct HashEmitter;

impl Emitter for HashEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        if let Some(stray) = subject.children().iter().find(|c| !c.is_node_of(NodeType::Pair)) {
            return Err(subject.defect(format!("entries must be `pair` nodes, found {stray:?}")));
        }
        let pairs = emitted(cx, subject, "entries")?;
        if pairs.is_empty() {
            cx.write("{}");
        } else {
            cx.write("{ ");
            cx.write(&pairs.join(", "));
            cx.write(" }");
        }
        Ok(())
    }
}

/// `k => v`.
pub(super) struct PairEmitter;

impl Emitter for PairEmitter {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(2)?;
        let parts = emitted(cx, subject, "key and value")?;
        cx.write(parts[0]);
        cx.write(" => ");
        cx.write(parts[1]);
        Ok(())
    }
}

/// Every child rendered, or a defect naming `what` if one is a payload.
fn emitted<'s>(cx: &EmitContext<'_>, subject: &'s Subject<'_>, what: &str) -> EmitResult<Vec<&'s str>> {
    subject
        .visited_children(cx)?
        .iter()
        .map(|visited| {
            visited
                .as_emitted()
                .ok_or_else(|| subject.defect(format!("{what} must be nodes")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::emitter::{EmitError, emit};
    use unparser_syntax::ast::NodeType;
    use unparser_syntax::sexp::read_sexp;

    fn emit_sexp(sexp: &str) -> Result<String, EmitError> {
        emit(&read_sexp(sexp).unwrap())
    }

    #[test]
    fn test_arrays() {
        assert_eq!(emit_sexp("(array)").unwrap(), "[]");
        assert_eq!(emit_sexp("(array (int 1) (array (sym :a)))").unwrap(), "[1, [:a]]");
    }

    #[test]
    fn test_hashes() {
        assert_eq!(emit_sexp("(hash)").unwrap(), "{}");
        assert_eq!(
            emit_sexp(r#"(hash (pair (sym :a) (int 1)) (pair (str "b") (hash)))"#).unwrap(),
            r#"{ :a => 1, "b" => {} }"#
        );
    }

    #[test]
    fn test_collection_defects() {
        assert!(matches!(
            emit_sexp("(hash (int 1))").unwrap_err(),
            EmitError::Defect { kind: NodeType::Hash, .. }
        ));
        assert!(matches!(
            emit_sexp("(array 1)").unwrap_err(),
            EmitError::Defect { kind: NodeType::Array, .. }
        ));
        assert!(matches!(
            emit_sexp("(hash (pair (int 1)))").unwrap_err(),
            EmitError::Defect { kind: NodeType::Pair, .. }
        ));
    }
}
