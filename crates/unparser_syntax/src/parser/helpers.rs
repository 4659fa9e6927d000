/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords and punctuation
/// - Statement terminators (`at_term`, `skip_terms`, `skip_newlines`)
/// - Scopes for local variables
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    ///
    /// The returned reference lives as long as the token stream, not the parser borrow.
    fn peek(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// End offset of the most recently consumed token.
    fn prev_end(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(i) => self.tokens[i].span.end,
            None => 0,
        }
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is `id` glued to the previous token (no whitespace).
    fn check_punct_tight(&self, id: PunctuationId) -> bool {
        self.check_punct(id) && !self.peek().space_before
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, what: &str) -> PResult<Span> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, what: &str) -> PResult<Span> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Build a syntax error for the current token.
    fn unexpected(&self, expected: &str) -> CompileError {
        let token = self.peek();
        CompileError::syntax(
            format!("expected {}, found {}", expected, token.kind.describe()),
            token.span,
        )
    }

    // ========================================================================
    // Terminators
    // ========================================================================

    /// Return `true` at a statement terminator (newline or `;`).
    fn at_term(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Newline) || self.check_punct(PunctuationId::Semicolon)
    }

    fn skip_terms(&mut self) {
        while self.at_term() {
            self.advance();
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
        }
    }

    /// Require at least one terminator and skip all of them.
    fn expect_term(&mut self) -> PResult<()> {
        if !self.at_term() {
            return Err(self.unexpected("newline or `;`"));
        }
        self.skip_terms();
        Ok(())
    }

    /// Skip tokens until the next statement boundary.
    fn synchronize(&mut self) {
        while !self.is_at_end() && !self.at_term() {
            self.advance();
        }
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    fn is_local(&self, name: &str) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains(name))
    }

    fn declare_local(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string());
        }
    }

    /// Run `f` inside a fresh local-variable scope.
    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.scopes.push(HashSet::new());
        let result = f(self);
        self.scopes.pop();
        result
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    fn loc(&self, span: Span) -> Location {
        Location::new(Arc::clone(&self.source), span)
    }

    fn node(&self, kind: NodeType, children: Vec<Child>, span: Span) -> Node {
        Node::new(kind, children).with_location(self.loc(span))
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end().max(start))
    }

    /// Fold a statement list into one node: nothing, the statement itself, or a `begin` sequence.
    fn sequence(&self, mut statements: Vec<Node>) -> Option<Node> {
        match statements.len() {
            0 => None,
            1 => statements.pop(),
            _ => {
                let start = span_of(&statements[0]).start;
                let end = statements.last().map_or(start, |n| span_of(n).end);
                let children = statements.into_iter().map(Child::Node).collect();
                Some(self.node(NodeType::Begin, children, Span::new(start, end)))
            }
        }
    }
}

/// Expression span of a parsed node.
fn span_of(node: &Node) -> Span {
    node.location().map(|l| l.expression).unwrap_or_default()
}
