//! Define the node type vocabulary shared by the parser, emitter and preprocessor.
//!
//! Node types are the `parser` gem's type tags (`int`, `dstr`, `module`, ...). This module is the single source
//! of truth for them: a stable identifier ([`NodeType`]) plus a const metadata table ([`NODE_TYPES`]) recording
//! the tag spelling, a category and a documentation example.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; tags are always lowercase.
//! - The vocabulary is closed: a tag outside this table cannot be represented. Dispatch registries map a subset of
//!   these ids to handlers and decide themselves what happens for the rest.
//!
//! ## Examples
//! ```rust
//! use unparser_core::lang::node_types::{self, NodeType};
//!
//! assert_eq!(node_types::from_str("regexp"), Some(NodeType::Regexp));
//! assert_eq!(node_types::as_str(NodeType::Kwbegin), "kwbegin");
//! assert_eq!(NodeType::SelfRef.to_string(), "self");
//! ```

use std::fmt;

use super::registry::Example;

/// Stable identifier for every node type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    // Primitive literals
    Int,
    Float,
    Str,
    Sym,

    // Keyword literals
    Nil,
    True,
    False,
    SelfRef,

    // Segmented literals
    Dstr,
    Xstr,
    Regexp,
    Regopt,

    // Definitions
    Module,
    Class,

    // Grouping
    Begin,
    Kwbegin,

    // Constants
    Const,
    Cbase,

    // Variables
    Lvar,
    Ivar,
    Gvar,
    Cvar,

    // Assignments
    Lvasgn,
    Ivasgn,
    Gvasgn,
    Cvasgn,
    Casgn,

    // Calls
    Send,

    // Collections
    Array,
    Hash,
    Pair,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Single-payload literals (`int`, `str`, ...).
    Primitive,
    /// `nil`, `true`, `false`, `self`.
    Keyword,
    /// Literals built from string segments and interpolations.
    Segmented,
    /// `module`, `class`.
    Definition,
    /// Statement sequences.
    Grouping,
    /// Constant references.
    Constant,
    /// Variable reads.
    Variable,
    /// Variable and constant writes.
    Assignment,
    /// Method calls.
    Call,
    /// Arrays, hashes and hash pairs.
    Collection,
}

/// Metadata for a node type.
///
/// ## Notes
/// - `tag` is the spelling used in s-expressions.
/// - `example` pairs a Ruby snippet with the tree the reference parser builds for it.
#[derive(Debug, Clone, Copy)]
pub struct NodeTypeInfo {
    pub id: NodeType,
    pub tag: &'static str,
    pub category: NodeCategory,
    pub description: &'static str,
    pub example: Example,
}

/// Registry of all node types.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const NODE_TYPES: &[NodeTypeInfo] = &[
    // Primitive literals
    info(
        NodeType::Int,
        "int",
        NodeCategory::Primitive,
        "Integer literal.",
        Example::new("42", "(int 42)"),
    ),
    info(
        NodeType::Float,
        "float",
        NodeCategory::Primitive,
        "Float literal.",
        Example::new("1.5", "(float 1.5)"),
    ),
    info(
        NodeType::Str,
        "str",
        NodeCategory::Primitive,
        "String literal without interpolation.",
        Example::new("\"hi\"", "(str \"hi\")"),
    ),
    info(
        NodeType::Sym,
        "sym",
        NodeCategory::Primitive,
        "Symbol literal.",
        Example::new(":foo", "(sym :foo)"),
    ),
    // Keyword literals
    info(NodeType::Nil, "nil", NodeCategory::Keyword, "`nil`.", Example::new("nil", "(nil)")),
    info(NodeType::True, "true", NodeCategory::Keyword, "`true`.", Example::new("true", "(true)")),
    info(NodeType::False, "false", NodeCategory::Keyword, "`false`.", Example::new("false", "(false)")),
    info(NodeType::SelfRef, "self", NodeCategory::Keyword, "`self`.", Example::new("self", "(self)")),
    // Segmented literals
    info(
        NodeType::Dstr,
        "dstr",
        NodeCategory::Segmented,
        "String with interpolation, or adjacent string literals.",
        Example::new("\"a#{b}\"", "(dstr (str \"a\") (begin (send nil :b)))"),
    ),
    info(
        NodeType::Xstr,
        "xstr",
        NodeCategory::Segmented,
        "Backtick shell command string.",
        Example::new("`ls`", "(xstr (str \"ls\"))"),
    ),
    info(
        NodeType::Regexp,
        "regexp",
        NodeCategory::Segmented,
        "Regular expression literal; the last child is its `regopt`.",
        Example::new("/a+/i", "(regexp (str \"a+\") (regopt :i))"),
    ),
    info(
        NodeType::Regopt,
        "regopt",
        NodeCategory::Segmented,
        "Regular expression option letters.",
        Example::new("/a/m", "(regexp (str \"a\") (regopt :m))"),
    ),
    // Definitions
    info(
        NodeType::Module,
        "module",
        NodeCategory::Definition,
        "Module definition: name, body.",
        Example::new("module Foo\nend", "(module (const nil :Foo) nil)"),
    ),
    info(
        NodeType::Class,
        "class",
        NodeCategory::Definition,
        "Class definition: name, superclass, body.",
        Example::new("class Foo < Bar\nend", "(class (const nil :Foo) (const nil :Bar) nil)"),
    ),
    // Grouping
    info(
        NodeType::Begin,
        "begin",
        NodeCategory::Grouping,
        "Statement sequence or parenthesized group.",
        Example::new("(1; 2)", "(begin (int 1) (int 2))"),
    ),
    info(
        NodeType::Kwbegin,
        "kwbegin",
        NodeCategory::Grouping,
        "`begin ... end` block.",
        Example::new("begin\n  1\nend", "(kwbegin (int 1))"),
    ),
    // Constants
    info(
        NodeType::Const,
        "const",
        NodeCategory::Constant,
        "Constant reference: scope, name.",
        Example::new("Foo::Bar", "(const (const nil :Foo) :Bar)"),
    ),
    info(
        NodeType::Cbase,
        "cbase",
        NodeCategory::Constant,
        "Top-level constant scope (`::Foo`).",
        Example::new("::Foo", "(const (cbase) :Foo)"),
    ),
    // Variables
    info(
        NodeType::Lvar,
        "lvar",
        NodeCategory::Variable,
        "Local variable read.",
        Example::new("a = 1; a", "(begin (lvasgn :a (int 1)) (lvar :a))"),
    ),
    info(
        NodeType::Ivar,
        "ivar",
        NodeCategory::Variable,
        "Instance variable read.",
        Example::new("@a", "(ivar :@a)"),
    ),
    info(
        NodeType::Gvar,
        "gvar",
        NodeCategory::Variable,
        "Global variable read.",
        Example::new("$a", "(gvar :$a)"),
    ),
    info(
        NodeType::Cvar,
        "cvar",
        NodeCategory::Variable,
        "Class variable read.",
        Example::new("@@a", "(cvar :@@a)"),
    ),
    // Assignments
    info(
        NodeType::Lvasgn,
        "lvasgn",
        NodeCategory::Assignment,
        "Local variable assignment.",
        Example::new("a = 1", "(lvasgn :a (int 1))"),
    ),
    info(
        NodeType::Ivasgn,
        "ivasgn",
        NodeCategory::Assignment,
        "Instance variable assignment.",
        Example::new("@a = 1", "(ivasgn :@a (int 1))"),
    ),
    info(
        NodeType::Gvasgn,
        "gvasgn",
        NodeCategory::Assignment,
        "Global variable assignment.",
        Example::new("$a = 1", "(gvasgn :$a (int 1))"),
    ),
    info(
        NodeType::Cvasgn,
        "cvasgn",
        NodeCategory::Assignment,
        "Class variable assignment.",
        Example::new("@@a = 1", "(cvasgn :@@a (int 1))"),
    ),
    info(
        NodeType::Casgn,
        "casgn",
        NodeCategory::Assignment,
        "Constant assignment: scope, name, value.",
        Example::new("Foo = 1", "(casgn nil :Foo (int 1))"),
    ),
    // Calls
    info(
        NodeType::Send,
        "send",
        NodeCategory::Call,
        "Method call: receiver, method name, arguments.",
        Example::new("a.b(1)", "(send (send nil :a) :b (int 1))"),
    ),
    // Collections
    info(
        NodeType::Array,
        "array",
        NodeCategory::Collection,
        "Array literal.",
        Example::new("[1, 2]", "(array (int 1) (int 2))"),
    ),
    info(
        NodeType::Hash,
        "hash",
        NodeCategory::Collection,
        "Hash literal.",
        Example::new("{ :a => 1 }", "(hash (pair (sym :a) (int 1)))"),
    ),
    info(
        NodeType::Pair,
        "pair",
        NodeCategory::Collection,
        "Hash entry: key, value.",
        Example::new("{ 1 => 2 }", "(hash (pair (int 1) (int 2)))"),
    ),
];

impl NodeType {
    /// Tag spelling (e.g. `"dstr"`).
    pub fn as_str(self) -> &'static str {
        as_str(self)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

/// Tag spelling.
///
/// ## Parameters
/// - `id`: Node type identifier.
///
/// ## Returns
/// - The s-expression tag for `id`.
pub fn as_str(id: NodeType) -> &'static str {
    info_for(id).tag
}

/// Category.
pub fn category(id: NodeType) -> NodeCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: NodeType) -> &'static NodeTypeInfo {
    NODE_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("node type info missing")
}

/// Lookup by tag spelling.
///
/// ## Returns
/// - `Some(NodeType)` if `s` is a known tag, `None` otherwise.
pub fn from_str(s: &str) -> Option<NodeType> {
    NODE_TYPES.iter().find(|t| t.tag == s).map(|t| t.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: NodeType,
    tag: &'static str,
    category: NodeCategory,
    description: &'static str,
    example: Example,
) -> NodeTypeInfo {
    NodeTypeInfo {
        id,
        tag,
        category,
        description,
        example,
    }
}
