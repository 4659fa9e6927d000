//! Tree normalization before comparison
//!
//! Different trees can stand for the same program: `(dstr (str "a") (str "b"))` and `(str "ab")`, `(begin x)` and
//! `x`, a `%r{...}` body and the same pattern between slashes. [`run`] rewrites such trees into one canonical shape
//! so that an original tree and the tree re-parsed from its emitted source compare equal.
//!
//! Rules are looked up per node type in a process-wide [`Registry`]; a node is folded through every rule registered
//! for its type, in registration order, and types without rules get the no-op rule, which only recurses.
//!
//! ## Examples
//! ```rust
//! use unparser::preprocessor::preprocess;
//! use unparser::sexp::read_sexp;
//!
//! let tree = read_sexp(r#"(begin (dstr (str "a") (str "b")))"#).unwrap();
//! assert_eq!(preprocess(&tree).unwrap(), read_sexp(r#"(str "ab")"#).unwrap());
//! ```

mod rules;

use std::borrow::Cow;
use std::cell::OnceCell;
use std::sync::LazyLock;

use thiserror::Error;
use unparser_syntax::ast::{Child, Node, NodeType};

use crate::dispatch::Registry;
use crate::quote::QuoteError;

pub use rules::{CollapseStrChildren, Noop, RedundantBegin, RegexpQuoting};

/// Errors produced while normalizing a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreprocessError {
    #[error("malformed `{kind}` node: {message}")]
    Defect { kind: NodeType, message: String },
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl PreprocessError {
    pub fn defect(kind: NodeType, message: impl Into<String>) -> Self {
        PreprocessError::Defect {
            kind,
            message: message.into(),
        }
    }
}

pub type PreprocessResult<T> = Result<T, PreprocessError>;

/// One normalization step for a node type.
pub trait Rule: Sync {
    /// Name used in trace output.
    fn name(&self) -> &'static str;

    /// The rewritten node.
    fn result(&self, visit: &Visit<'_>) -> PreprocessResult<Node>;
}

// ============================================================================
// Registry
// ============================================================================

static REGISTRY: LazyLock<Registry<dyn Rule>> = LazyLock::new(|| {
    let registry = build_registry();
    tracing::debug!(types = registry.len(), "preprocessor registry built");
    registry
});

/// The rule registry.
pub fn registry() -> &'static Registry<dyn Rule> {
    &REGISTRY
}

fn build_registry() -> Registry<dyn Rule> {
    Registry::<dyn Rule>::builder()
        .register(NodeType::Int, &Noop)
        .register(NodeType::Str, &Noop)
        .register_all(&[NodeType::Dstr, NodeType::Regexp, NodeType::Xstr], &CollapseStrChildren)
        // After collapsing, so the pattern is a single `str` run between interpolations.
        .register(NodeType::Regexp, &RegexpQuoting)
        .register(NodeType::Begin, &RedundantBegin)
        .fallback(&Noop)
        .build()
}

// ============================================================================
// Entry points
// ============================================================================

/// Normalize an optional tree; an absent tree stays absent.
#[tracing::instrument(skip_all, fields(present = node.is_some()))]
pub fn run(node: Option<&Node>) -> PreprocessResult<Option<Node>> {
    node.map(preprocess).transpose()
}

/// Fold `node` through every rule registered for its type.
///
/// ## Errors
/// - [`PreprocessError::Defect`] for a node whose children do not match its type.
/// - [`PreprocessError::Quote`] for a regexp body that cannot be re-quoted.
pub fn preprocess(node: &Node) -> PreprocessResult<Node> {
    let mut current = Cow::Borrowed(node);
    for rule in registry().lookup(node.kind()) {
        tracing::trace!(rule = rule.name(), kind = %current.kind(), "preprocess");
        let next = {
            let visit = Visit::new(&current);
            rule.result(&visit)?
        };
        current = Cow::Owned(next);
    }
    Ok(current.into_owned())
}

// ============================================================================
// Visit
// ============================================================================

/// A node being rewritten, with a cached view of its preprocessed children.
pub struct Visit<'n> {
    node: &'n Node,
    visited: OnceCell<Vec<Child>>,
}

impl<'n> Visit<'n> {
    pub fn new(node: &'n Node) -> Self {
        Self {
            node,
            visited: OnceCell::new(),
        }
    }

    pub fn node(&self) -> &'n Node {
        self.node
    }

    pub fn kind(&self) -> NodeType {
        self.node.kind()
    }

    /// The raw child list.
    pub fn children(&self) -> &'n [Child] {
        self.node.children()
    }

    /// Node children preprocessed, payloads copied.
    ///
    /// Computed on first call and cached for the lifetime of the visit.
    pub fn visited_children(&self) -> PreprocessResult<&[Child]> {
        if let Some(visited) = self.visited.get() {
            return Ok(visited);
        }
        let visited = self
            .children()
            .iter()
            .map(|child| match child {
                Child::Node(node) => preprocess(node).map(Child::Node),
                payload => Ok(payload.clone()),
            })
            .collect::<PreprocessResult<Vec<_>>>()?;
        Ok(self.visited.get_or_init(|| visited))
    }
}
