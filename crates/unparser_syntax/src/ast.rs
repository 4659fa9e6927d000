//! Abstract syntax tree in the shape of the `parser` gem.
//!
//! A [`Node`] is an immutable value: a [`NodeType`] tag, an ordered list of [`Child`]ren and an optional
//! [`Location`]. Rewrites build new nodes (see [`Node::updated`]) instead of mutating.
//!
//! ## Notes
//! - Equality is structural: type and children, recursively. Locations never take part in it.
//! - Float payloads compare by bit pattern, so equality stays reflexive and `0.1` must round-trip bit-identically.

use std::fmt;
use std::sync::Arc;

pub use unparser_core::lang::node_types::NodeType;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Provenance of a parsed node.
///
/// ## Notes
/// - `source` is shared by every node parsed from the same text.
/// - `begin`/`end` are the opening and closing delimiters when the construct has them (`"`, `%r{`, `(`, `module`,
///   ...).
#[derive(Debug, Clone)]
pub struct Location {
    source: Arc<str>,
    pub expression: Span,
    pub begin: Option<Span>,
    pub end: Option<Span>,
}

impl Location {
    pub fn new(source: Arc<str>, expression: Span) -> Self {
        Self {
            source,
            expression,
            begin: None,
            end: None,
        }
    }

    pub fn with_delimiters(mut self, begin: Span, end: Span) -> Self {
        self.begin = Some(begin);
        self.end = Some(end);
        self
    }

    /// Full source text the spans point into.
    pub fn source(&self) -> &Arc<str> {
        &self.source
    }

    /// Source text of the whole expression.
    pub fn expression_source(&self) -> &str {
        self.slice(self.expression).unwrap_or_default()
    }

    /// Source text of the opening delimiter, if any.
    pub fn begin_source(&self) -> Option<&str> {
        self.begin.and_then(|span| self.slice(span))
    }

    /// Source text of the closing delimiter, if any.
    pub fn end_source(&self) -> Option<&str> {
        self.end.and_then(|span| self.slice(span))
    }

    fn slice(&self, span: Span) -> Option<&str> {
        self.source.get(span.start..span.end)
    }
}

/// One child of a node: a nested node or a literal payload.
#[derive(Debug, Clone)]
pub enum Child {
    Node(Node),
    /// Absent child (`nil` in s-expressions), e.g. a module without body.
    Nil,
    Int(i64),
    Float(f64),
    Str(String),
    Sym(String),
}

impl Child {
    pub fn str(value: impl Into<String>) -> Self {
        Child::Str(value.into())
    }

    pub fn sym(name: impl Into<String>) -> Self {
        Child::Sym(name.into())
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Child::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Child::Sym(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Child::Nil)
    }

    /// Whether this child is a node of type `kind`.
    pub fn is_node_of(&self, kind: NodeType) -> bool {
        self.as_node().is_some_and(|n| n.kind() == kind)
    }
}

impl PartialEq for Child {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Child::Node(a), Child::Node(b)) => a == b,
            (Child::Nil, Child::Nil) => true,
            (Child::Int(a), Child::Int(b)) => a == b,
            (Child::Float(a), Child::Float(b)) => a.to_bits() == b.to_bits(),
            (Child::Str(a), Child::Str(b)) => a == b,
            (Child::Sym(a), Child::Sym(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Child {}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Option<Node>> for Child {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Child::Nil, Child::Node)
    }
}

impl From<i64> for Child {
    fn from(value: i64) -> Self {
        Child::Int(value)
    }
}

impl From<f64> for Child {
    fn from(value: f64) -> Self {
        Child::Float(value)
    }
}

/// Immutable AST node.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeType,
    children: Vec<Child>,
    location: Option<Location>,
}

impl Node {
    /// Build a node without provenance.
    pub fn new(kind: NodeType, children: Vec<Child>) -> Self {
        Self {
            kind,
            children,
            location: None,
        }
    }

    /// Attach provenance.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Rebuild this node with new children, keeping type and location.
    pub fn updated(&self, children: Vec<Child>) -> Self {
        Self {
            kind: self.kind,
            children,
            location: self.location.clone(),
        }
    }

    pub fn kind(&self) -> NodeType {
        self.kind
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Child> {
        self.children.get(index)
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Copy of this tree with every location removed.
    pub fn without_locations(&self) -> Self {
        let children = self
            .children
            .iter()
            .map(|c| match c {
                Child::Node(n) => Child::Node(n.without_locations()),
                other => other.clone(),
            })
            .collect();
        Self::new(self.kind, children)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.children == other.children
    }
}

impl Eq for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::sexp::to_sexp(self))
    }
}

/// Build a node the way the `parser` gem's `s()` helper does.
///
/// ## Examples
/// ```rust
/// use unparser_syntax::ast::{s, Child, NodeType};
///
/// let node = s(NodeType::Str, [Child::str("hi")]);
/// assert_eq!(node.to_string(), "(str \"hi\")");
/// ```
pub fn s(kind: NodeType, children: impl IntoIterator<Item = Child>) -> Node {
    Node::new(kind, children.into_iter().collect())
}
