//! Ruby source emitter
//!
//! Turns a [`Node`] tree back into Ruby source that parses to an equivalent tree. Every node type has exactly one
//! [`Emitter`], found through a process-wide [`Registry`] built on first use. An emitter writes its node into an
//! [`EmitContext`], visiting children through the same registry.
//!
//! ## Notes
//! - Primitive literals (`int`, `float`, `str`, `sym`) replay their original source text when they carry a location
//!   and [`EmitConfig::trust_source_locations`] is set; everything else is always written in canonical form.
//! - Emission is all-or-nothing: on error no partial output is returned.
//!
//! ## Examples
//! ```rust
//! use unparser::emitter::emit;
//! use unparser::sexp::read_sexp;
//!
//! let tree = read_sexp("(module (const nil :Foo) (lvasgn :a (int 1)))").unwrap();
//! assert_eq!(emit(&tree).unwrap(), "module Foo\n  a = 1\nend");
//! ```

mod begin;
pub mod buffer;
mod collection;
mod config;
mod errors;
mod literal;
mod module;
mod segments;
mod send;
mod variable;

use std::cell::OnceCell;
use std::sync::LazyLock;

use unparser_syntax::ast::{Child, Node, NodeType};

use crate::dispatch::Registry;

pub use buffer::Buffer;
pub use config::EmitConfig;
pub use errors::{EmitError, EmitResult};

/// Writes one node type.
pub trait Emitter: Sync {
    /// Write `subject` into `cx`.
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()>;
}

/// Writes a single-value literal in canonical form.
///
/// Wrap an implementation in [`Primitive`] to register it; the wrapper replays trusted source text instead when it
/// can.
pub trait PrimitiveEmitter: Sync {
    fn dispatch_value(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()>;
}

/// Adapter from [`PrimitiveEmitter`] to [`Emitter`].
pub struct Primitive<P>(pub P);

impl<P: PrimitiveEmitter> Emitter for Primitive<P> {
    fn dispatch(&self, cx: &mut EmitContext<'_>, subject: &Subject<'_>) -> EmitResult<()> {
        match subject.node().location() {
            Some(location) if cx.config().trust_source_locations => {
                cx.write(location.expression_source());
                Ok(())
            }
            _ => self.0.dispatch_value(cx, subject),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

static REGISTRY: LazyLock<Registry<dyn Emitter>> = LazyLock::new(|| {
    let registry = build_registry();
    tracing::debug!(types = registry.len(), "emitter registry built");
    registry
});

/// The emitter registry.
pub fn registry() -> &'static Registry<dyn Emitter> {
    &REGISTRY
}

fn build_registry() -> Registry<dyn Emitter> {
    Registry::<dyn Emitter>::builder()
        // Primitive literals
        .register(NodeType::Int, &literal::INT)
        .register(NodeType::Float, &literal::FLOAT)
        .register(NodeType::Str, &literal::STR)
        .register(NodeType::Sym, &literal::SYM)
        // Keyword literals
        .register_all(
            &[NodeType::Nil, NodeType::True, NodeType::False, NodeType::SelfRef],
            &literal::KeywordLiteral,
        )
        // Segmented literals
        .register(NodeType::Dstr, &segments::DSTR)
        .register(NodeType::Xstr, &segments::XSTR)
        .register(NodeType::Regexp, &segments::RegexpEmitter)
        .register(NodeType::Regopt, &segments::RegoptEmitter)
        // Definitions
        .register(NodeType::Module, &module::ModuleEmitter)
        .register(NodeType::Class, &module::ClassEmitter)
        // Grouping
        .register(NodeType::Begin, &begin::BeginEmitter)
        .register(NodeType::Kwbegin, &begin::KwbeginEmitter)
        // Constants and variables
        .register(NodeType::Const, &variable::ConstEmitter)
        .register(NodeType::Cbase, &variable::CbaseEmitter)
        .register_all(
            &[NodeType::Lvar, NodeType::Ivar, NodeType::Gvar, NodeType::Cvar],
            &variable::VariableEmitter,
        )
        .register_all(
            &[NodeType::Lvasgn, NodeType::Ivasgn, NodeType::Gvasgn, NodeType::Cvasgn],
            &variable::AssignmentEmitter,
        )
        .register(NodeType::Casgn, &variable::ConstAssignmentEmitter)
        // Calls
        .register(NodeType::Send, &send::SendEmitter)
        // Collections
        .register(NodeType::Array, &collection::ArrayEmitter)
        .register(NodeType::Hash, &collection::HashEmitter)
        .register(NodeType::Pair, &collection::PairEmitter)
        .build()
}

// ============================================================================
// Entry points
// ============================================================================

/// Emit `node` with default settings.
///
/// ## Errors
/// - [`EmitError::Unsupported`] for a node type or form with no source spelling.
/// - [`EmitError::Defect`] for a node whose children do not match its type.
/// - [`EmitError::UnsupportedLiteral`] for non-finite floats.
pub fn emit(node: &Node) -> EmitResult<String> {
    emit_with_config(node, &EmitConfig::default())
}

/// Emit `node` with custom configuration.
///
/// ## Notes
/// - A `begin` root is written one statement per line; the output has no trailing newline.
#[tracing::instrument(skip_all, fields(kind = %node.kind()))]
pub fn emit_with_config(node: &Node, config: &EmitConfig) -> EmitResult<String> {
    let mut cx = EmitContext::new(config);
    cx.statements(node)?;
    Ok(cx.finish())
}

// ============================================================================
// Context
// ============================================================================

/// Output buffer plus configuration, threaded through every emitter.
pub struct EmitContext<'c> {
    buffer: Buffer,
    config: &'c EmitConfig,
}

impl<'c> EmitContext<'c> {
    pub fn new(config: &'c EmitConfig) -> Self {
        Self {
            buffer: Buffer::new(config.indent_width),
            config,
        }
    }

    pub fn config(&self) -> &'c EmitConfig {
        self.config
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn write(&mut self, s: &str) {
        self.buffer.write(s);
    }

    pub fn nl(&mut self) {
        self.buffer.nl();
    }

    pub fn indent(&mut self) {
        self.buffer.indent();
    }

    pub fn dedent(&mut self) {
        self.buffer.dedent();
    }

    /// Emit `node` in place through the registry.
    ///
    /// ## Errors
    /// - [`EmitError::Unsupported`] if no emitter is registered for the node's type.
    pub fn visit(&mut self, node: &Node) -> EmitResult<()> {
        let Some(emitter) = registry().lookup(node.kind()).first() else {
            return Err(EmitError::unsupported(node.kind(), "no emitter is registered"));
        };
        tracing::trace!(kind = %node.kind(), "emit");
        emitter.dispatch(self, &Subject::new(node))
    }

    /// Empty context at the current indentation level.
    pub fn fork(&self) -> EmitContext<'c> {
        EmitContext {
            buffer: self.buffer.fork(),
            config: self.config,
        }
    }

    /// Emit `node` into a fork and return the text.
    pub fn render(&self, node: &Node) -> EmitResult<String> {
        let mut fork = self.fork();
        fork.visit(node)?;
        Ok(fork.finish())
    }

    /// Emit `node` as a statement list: the children of a non-empty `begin` one per line, anything else as is.
    pub fn statements(&mut self, node: &Node) -> EmitResult<()> {
        if node.kind() != NodeType::Begin || node.children().is_empty() {
            return self.visit(node);
        }
        for (i, child) in node.children().iter().enumerate() {
            let Child::Node(statement) = child else {
                return Err(EmitError::defect(NodeType::Begin, "statements must be nodes"));
            };
            if i > 0 {
                self.nl();
            }
            self.visit(statement)?;
        }
        Ok(())
    }

    /// Emit a definition body between its header line and `end`.
    ///
    /// An absent body is a bare line break; a present one is indented on its own lines.
    pub fn body(&mut self, body: Option<&Node>) -> EmitResult<()> {
        self.nl();
        if let Some(body) = body {
            self.indent();
            let result = self.statements(body);
            self.dedent();
            result?;
            self.nl();
        }
        Ok(())
    }

    pub fn finish(self) -> String {
        self.buffer.finish()
    }
}

// ============================================================================
// Subject
// ============================================================================

/// A child after visiting: nested nodes rendered to text, payloads passed through.
#[derive(Debug, Clone, PartialEq)]
pub enum Visited<'n> {
    Emitted(String),
    Payload(&'n Child),
}

impl Visited<'_> {
    pub fn as_emitted(&self) -> Option<&str> {
        match self {
            Visited::Emitted(text) => Some(text),
            Visited::Payload(_) => None,
        }
    }
}

/// The node being emitted, with shape checks and a cached view of its visited children.
pub struct Subject<'n> {
    node: &'n Node,
    visited: OnceCell<Vec<Visited<'n>>>,
}

impl<'n> Subject<'n> {
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

    /// Each child rendered to text if it is a node, passed through if it is a payload.
    ///
    /// Computed on first call and cached for the lifetime of the subject.
    pub fn visited_children(&self, cx: &EmitContext<'_>) -> EmitResult<&[Visited<'n>]> {
        if let Some(visited) = self.visited.get() {
            return Ok(visited);
        }
        let visited = self
            .children()
            .iter()
            .map(|child| match child {
                Child::Node(node) => cx.render(node).map(Visited::Emitted),
                payload => Ok(Visited::Payload(payload)),
            })
            .collect::<EmitResult<Vec<_>>>()?;
        Ok(self.visited.get_or_init(|| visited))
    }

    pub fn defect(&self, message: impl Into<String>) -> EmitError {
        EmitError::defect(self.kind(), message)
    }

    pub fn expect_arity(&self, arity: usize) -> EmitResult<()> {
        let found = self.children().len();
        if found != arity {
            return Err(self.defect(format!("expected {arity} children, found {found}")));
        }
        Ok(())
    }

    pub fn child_at(&self, index: usize) -> EmitResult<&'n Child> {
        self.node
            .child(index)
            .ok_or_else(|| self.defect(format!("missing child {index}")))
    }

    pub fn node_at(&self, index: usize) -> EmitResult<&'n Node> {
        self.child_at(index)?
            .as_node()
            .ok_or_else(|| self.defect(format!("child {index} must be a node")))
    }

    /// The node at `index`, or `None` for an absent (`nil`) child.
    pub fn optional_node_at(&self, index: usize) -> EmitResult<Option<&'n Node>> {
        match self.child_at(index)? {
            Child::Nil => Ok(None),
            Child::Node(node) => Ok(Some(node)),
            _ => Err(self.defect(format!("child {index} must be a node or nil"))),
        }
    }

    pub fn sym_at(&self, index: usize) -> EmitResult<&'n str> {
        self.child_at(index)?
            .as_sym()
            .ok_or_else(|| self.defect(format!("child {index} must be a symbol")))
    }
}
