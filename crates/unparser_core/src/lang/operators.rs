//! Operator method names.
//!
//! Ruby operators are ordinary methods. This registry lists every operator spelling that may appear as a method
//! name after `.` or as a plain symbol (`:+`, `:[]=`), with its arity class.
//!
//! ## Notes
//! - [`OPERATOR_METHODS`] is ordered longest spelling first so that [`longest_prefix`] is a simple scan.
//! - Binary/unary classification is metadata only; the emitter always writes operator calls in method form
//!   (`a.+(b)`), which needs no precedence table.
//!
//! ## Examples
//! ```rust
//! use unparser_core::lang::operators;
//!
//! assert!(operators::is_operator_method("<=>"));
//! assert_eq!(operators::longest_prefix("<=>(b)"), Some("<=>"));
//! assert_eq!(operators::longest_prefix("foo"), None);
//! ```

/// Arity class of an operator method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorArity {
    Unary,
    Binary,
    /// `[]` and `[]=` take any number of arguments.
    Index,
}

/// Metadata for an operator method.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub spelling: &'static str,
    pub arity: OperatorArity,
}

/// Registry of operator method names, longest spelling first.
pub const OPERATOR_METHODS: &[OperatorInfo] = &[
    op("[]=", OperatorArity::Index),
    op("===", OperatorArity::Binary),
    op("<=>", OperatorArity::Binary),
    op("[]", OperatorArity::Index),
    op("**", OperatorArity::Binary),
    op("==", OperatorArity::Binary),
    op("!=", OperatorArity::Binary),
    op("=~", OperatorArity::Binary),
    op("!~", OperatorArity::Binary),
    op("<=", OperatorArity::Binary),
    op(">=", OperatorArity::Binary),
    op("<<", OperatorArity::Binary),
    op(">>", OperatorArity::Binary),
    op("+@", OperatorArity::Unary),
    op("-@", OperatorArity::Unary),
    op("+", OperatorArity::Binary),
    op("-", OperatorArity::Binary),
    op("*", OperatorArity::Binary),
    op("/", OperatorArity::Binary),
    op("%", OperatorArity::Binary),
    op("<", OperatorArity::Binary),
    op(">", OperatorArity::Binary),
    op("&", OperatorArity::Binary),
    op("|", OperatorArity::Binary),
    op("^", OperatorArity::Binary),
    op("!", OperatorArity::Unary),
    op("~", OperatorArity::Unary),
];

/// Whether `name` is exactly an operator method spelling.
pub fn is_operator_method(name: &str) -> bool {
    OPERATOR_METHODS.iter().any(|o| o.spelling == name)
}

/// Arity class for an operator spelling.
pub fn arity(name: &str) -> Option<OperatorArity> {
    OPERATOR_METHODS
        .iter()
        .find(|o| o.spelling == name)
        .map(|o| o.arity)
}

/// Longest operator spelling that `input` starts with.
pub fn longest_prefix(input: &str) -> Option<&'static str> {
    OPERATOR_METHODS
        .iter()
        .find(|o| input.starts_with(o.spelling))
        .map(|o| o.spelling)
}

// --- helpers -----------------------------------------------------------------

const fn op(spelling: &'static str, arity: OperatorArity) -> OperatorInfo {
    OperatorInfo { spelling, arity }
}
