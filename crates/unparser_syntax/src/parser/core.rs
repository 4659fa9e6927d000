/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, CompileError>;

/// An expression plus whether it may stand on the left of `=`.
struct Operand {
    node: Node,
    assignable: bool,
}

impl Operand {
    fn value(node: Node) -> Self {
        Self {
            node,
            assignable: false,
        }
    }

    fn target(node: Node) -> Self {
        Self { node, assignable: true }
    }
}

/// Parser state.
///
/// ## Notes
/// - Local variables are tracked per scope: an identifier is an `lvar` once it has been assigned in the current
///   scope, otherwise a method call. `module` and `class` bodies open a fresh scope.
/// - Errors recover at top-level statement boundaries so one pass reports several problems.
pub struct Parser<'a> {
    source: Arc<str>,
    tokens: &'a [Token],
    pos: usize,
    scopes: Vec<HashSet<String>>,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `source`: The text the tokens were lexed from; parsed nodes share it through their locations.
    /// - `tokens`: Token stream produced by `unparser_syntax::lexer` (ending in `Eof`).
    pub fn new(source: &str, tokens: &'a [Token]) -> Self {
        Self {
            source: Arc::from(source),
            tokens,
            pos: 0,
            scopes: vec![HashSet::new()],
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream.
    ///
    /// ## Errors
    /// Returns a list of [`CompileError`]s if parsing fails.
    pub fn parse(mut self) -> Result<Option<Node>, Vec<CompileError>> {
        let mut statements = Vec::new();

        self.skip_terms();
        while !self.is_at_end() {
            match self.statement() {
                Ok(node) => {
                    statements.push(node);
                    if !self.is_at_end() && !self.at_term() {
                        let err = self.unexpected("newline or `;`");
                        self.errors.push(err);
                        self.synchronize();
                    }
                }
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
            self.skip_terms();
        }

        if self.errors.is_empty() {
            Ok(self.sequence(statements))
        } else {
            Err(self.errors)
        }
    }
}
