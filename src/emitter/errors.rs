//! Emission errors.

use thiserror::Error;
use unparser_syntax::ast::NodeType;

use crate::quote::QuoteError;

/// Errors produced while emitting source from a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmitError {
    /// No emitter is registered for the type, or the node uses a form that has no source spelling here.
    #[error("cannot emit `{kind}`: {reason}")]
    Unsupported { kind: NodeType, reason: String },
    /// The node does not have the shape its type requires (arity, child kinds).
    #[error("malformed `{kind}` node: {message}")]
    Defect { kind: NodeType, message: String },
    #[error("`{kind}` value {value} has no literal form")]
    UnsupportedLiteral { kind: NodeType, value: String },
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

pub type EmitResult<T> = Result<T, EmitError>;

impl EmitError {
    pub fn unsupported(kind: NodeType, reason: impl Into<String>) -> Self {
        EmitError::Unsupported {
            kind,
            reason: reason.into(),
        }
    }

    pub fn defect(kind: NodeType, message: impl Into<String>) -> Self {
        EmitError::Defect {
            kind,
            message: message.into(),
        }
    }
}
