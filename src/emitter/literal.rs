//! Primitive and keyword literals.

use unparser_core::lang::keywords::{self, KeywordId};
use unparser_core::strings::{inspect_string, inspect_symbol};
use unparser_syntax::ast::{Child, NodeType};

use super::{EmitContext, EmitError, EmitResult, Emitter, Primitive, PrimitiveEmitter, Subject};

pub(super) static INT: Primitive<IntLiteral> = Primitive(IntLiteral);
pub(super) static FLOAT: Primitive<FloatLiteral> = Primitive(FloatLiteral);
pub(super) static STR: Primitive<StrLiteral> = Primitive(StrLiteral);
pub(super) static SYM: Primitive<SymLiteral> = Primitive(SymLiteral);

pub(super) struct IntLiteral;
pub(super) struct FloatLiteral;
pub(super) struct StrLiteral;
pub(super) struct SymLiteral;

impl PrimitiveEmitter for IntLiteral {
    fn dispatch_value(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(1)?;
        let Child::Int(value) = subject.child_at(0)? else {
            return Err(subject.defect("value must be an integer"));
        };
        cx.write(&value.to_string());
        Ok(())
    }
}

impl PrimitiveEmitter for FloatLiteral {
    fn dispatch_value(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(1)?;
        let Child::Float(value) = subject.child_at(0)? else {
            return Err(subject.defect("value must be a float"));
        };
        if !value.is_finite() {
            return Err(EmitError::UnsupportedLiteral {
                kind: NodeType::Float,
                value: value.to_string(),
            });
        }
        // `{:?}` is the shortest form that reads back bit-identically and always has a `.` or exponent.
        cx.write(&format!("{value:?}"));
        Ok(())
    }
}

impl PrimitiveEmitter for StrLiteral {
    fn dispatch_value(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(1)?;
        let value = subject
            .child_at(0)?
            .as_str()
            .ok_or_else(|| subject.defect("value must be a string"))?;
        cx.write(&inspect_string(value));
        Ok(())
    }
}

impl PrimitiveEmitter for SymLiteral {
    fn dispatch_value(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(1)?;
        let name = subject.sym_at(0)?;
        cx.write(&inspect_symbol(name));
        Ok(())
    }
}

/// `nil`, `true`, `false` and `self`.
pub(super) struct KeywordLiteral;

impl Emitter for KeywordLiteral {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        subject.expect_arity(0)?;
        let keyword = match subject.kind() {
            NodeType::Nil => KeywordId::Nil,
            NodeType::True => KeywordId::True,
            NodeType::False => KeywordId::False,
            NodeType::SelfRef => KeywordId::SelfKw,
            other => return Err(EmitError::unsupported(other, "not a keyword literal")),
        };
        cx.write(keywords::as_str(keyword));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::emitter::{EmitError, emit};
    use unparser_syntax::ast::{Child, NodeType, s};
    use unparser_syntax::sexp::read_sexp;

    fn emit_sexp(sexp: &str) -> String {
        emit(&read_sexp(sexp).unwrap()).unwrap()
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    #[test]
    fn test_integers() {
        assert_eq!(emit_sexp("(int 42)"), "42");
        assert_eq!(emit_sexp("(int -7)"), "-7");
        assert_eq!(emit_sexp(&format!("(int {})", i64::MIN)), i64::MIN.to_string());
    }

    #[test]
    fn test_floats() {
        assert_eq!(emit_sexp("(float 0.1)"), "0.1");
        assert_eq!(emit_sexp("(float 1.0)"), "1.0");
        assert_eq!(emit_sexp("(float 1e20)"), "1e20");
        assert_eq!(emit_sexp("(float -0.0)"), "-0.0");
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = emit(&s(NodeType::Float, [Child::Float(value)])).unwrap_err();
            assert!(matches!(err, EmitError::UnsupportedLiteral { kind: NodeType::Float, .. }));
        }
    }

    #[test]
    fn test_strings() {
        assert_eq!(emit_sexp(r#"(str "He said \"hi\"\\")"#), r#""He said \"hi\"\\""#);
        assert_eq!(emit_sexp(r##"(str "#{x}")"##), r##""\#{x}""##);
        assert_eq!(emit_sexp(r#"(str "")"#), r#""""#);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(emit_sexp("(sym :foo)"), ":foo");
        assert_eq!(emit_sexp("(sym :[]=)"), ":[]=");
        assert_eq!(emit_sexp(r#"(sym :"foo bar")"#), r#":"foo bar""#);
    }

    #[test]
    fn test_wrong_payload_is_a_defect() {
        let err = emit(&s(NodeType::Int, [Child::str("1")])).unwrap_err();
        assert!(matches!(err, EmitError::Defect { kind: NodeType::Int, .. }));
        let err = emit(&s(NodeType::Str, [])).unwrap_err();
        assert!(matches!(err, EmitError::Defect { kind: NodeType::Str, .. }));
    }

    // ========================================================================
    // Keywords
    // ========================================================================

    #[test]
    fn test_keyword_literals() {
        assert_eq!(emit_sexp("(nil)"), "nil");
        assert_eq!(emit_sexp("(true)"), "true");
        assert_eq!(emit_sexp("(false)"), "false");
        assert_eq!(emit_sexp("(self)"), "self");
    }
}
