/// Expression parsing.
///
/// This chunk contains statements, assignments, method calls and the structural constructs (`module`, `class`,
/// `begin`, parenthesized groups, arrays and hashes).
///
/// ## Notes
/// - Ruby has no separate statement grammar; a statement is an expression, possibly an assignment.
/// - Assignments are parsed left side first and then converted, which is how the `parser` gem distinguishes
///   `a = 1` (`lvasgn`), `a.b = 1` (setter `send`) and `A::B = 1` (`casgn`).
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> PResult<Node> {
        self.expression()
    }

    /// Parse statements until `is_end` matches the current token (the end token is not consumed).
    fn statements_until(&mut self, is_end: impl Fn(&TokenKind) -> bool, what: &str) -> PResult<Vec<Node>> {
        let mut statements = Vec::new();
        self.skip_terms();
        while !is_end(&self.peek().kind) {
            if self.is_at_end() {
                return Err(self.unexpected(what));
            }
            statements.push(self.statement()?);
            if !is_end(&self.peek().kind) {
                self.expect_term()?;
            }
            self.skip_terms();
        }
        Ok(statements)
    }

    fn body_until_end(&mut self) -> PResult<Vec<Node>> {
        self.statements_until(|k| k.is_keyword(KeywordId::End), "`end`")
    }

    // ========================================================================
    // Expressions and assignment
    // ========================================================================

    fn expression(&mut self) -> PResult<Node> {
        let start = self.peek().span.start;
        let lhs = self.operand()?;
        if !self.check_punct(PunctuationId::Assign) {
            return Ok(lhs.node);
        }
        if !lhs.assignable {
            return Err(CompileError::syntax(
                "cannot assign to this expression".to_string(),
                self.peek().span,
            ));
        }
        let assign_span = self.advance().span;
        let (kind, mut children) = self.assignment_target(lhs.node, assign_span)?;
        self.skip_newlines();
        let value = self.expression()?;
        children.push(Child::Node(value));
        Ok(self.node(kind, children, self.span_from(start)))
    }

    /// Convert a parsed left-hand side into the head of an assignment node.
    ///
    /// ## Returns
    /// - The assignment node type and its children, minus the value.
    fn assignment_target(&mut self, lhs: Node, at: Span) -> PResult<(NodeType, Vec<Child>)> {
        let name = |i: usize| lhs.child(i).and_then(Child::as_sym).unwrap_or_default().to_string();
        let target = match lhs.kind() {
            NodeType::Lvar => (NodeType::Lvasgn, vec![Child::Sym(name(0))]),
            NodeType::Ivar => (NodeType::Ivasgn, vec![Child::Sym(name(0))]),
            NodeType::Gvar => (NodeType::Gvasgn, vec![Child::Sym(name(0))]),
            NodeType::Cvar => (NodeType::Cvasgn, vec![Child::Sym(name(0))]),
            NodeType::Const => {
                let scope = lhs.child(0).cloned().unwrap_or(Child::Nil);
                (NodeType::Casgn, vec![scope, Child::Sym(name(1))])
            }
            NodeType::Send => {
                let receiver = lhs.child(0).cloned().unwrap_or(Child::Nil);
                let selector = name(1);
                let args = lhs.children().get(2..).unwrap_or_default();
                match receiver {
                    Child::Nil if args.is_empty() && strings::is_local_name(&selector) => {
                        self.declare_local(&selector);
                        (NodeType::Lvasgn, vec![Child::Sym(selector)])
                    }
                    Child::Node(_) if selector == "[]" => {
                        let mut children = vec![receiver, Child::sym("[]=")];
                        children.extend(args.iter().cloned());
                        (NodeType::Send, children)
                    }
                    Child::Node(_) if args.is_empty() && strings::is_identifier(&selector) => {
                        (NodeType::Send, vec![receiver, Child::Sym(format!("{selector}="))])
                    }
                    _ => {
                        return Err(CompileError::syntax(
                            format!("cannot assign to method call `{selector}`"),
                            at,
                        ));
                    }
                }
            }
            other => {
                return Err(CompileError::syntax(format!("cannot assign to `{other}`"), at));
            }
        };
        Ok(target)
    }

    // ========================================================================
    // Calls
    // ========================================================================

    /// Parse a primary expression followed by any `.name`, `::Name` and `[...]` postfixes.
    fn operand(&mut self) -> PResult<Operand> {
        let start = self.peek().span.start;
        let mut operand = self.primary()?;
        loop {
            if self.check_punct(PunctuationId::Dot) {
                self.advance();
                let token = self.advance();
                let TokenKind::MethodName(name) = &token.kind else {
                    return Err(CompileError::syntax("expected a method name".to_string(), token.span));
                };
                operand = self.method_call(Child::Node(operand.node), name, start)?;
            } else if self.check_punct_tight(PunctuationId::ColonColon) {
                self.advance();
                let token = self.advance();
                match &token.kind {
                    TokenKind::Const(name) if !self.check_punct_tight(PunctuationId::LParen) => {
                        let children = vec![Child::Node(operand.node), Child::sym(name.as_str())];
                        operand = Operand::target(self.node(NodeType::Const, children, self.span_from(start)));
                    }
                    TokenKind::Const(name) | TokenKind::Ident(name) => {
                        operand = self.method_call(Child::Node(operand.node), name, start)?;
                    }
                    _ => {
                        return Err(CompileError::syntax(
                            format!("expected a constant or method name after `::`, found {}", token.kind.describe()),
                            token.span,
                        ));
                    }
                }
            } else if self.check_punct_tight(PunctuationId::LBracket) {
                self.advance();
                let args = self.list_until(PunctuationId::RBracket, "`]`")?;
                let mut children = vec![Child::Node(operand.node), Child::sym("[]")];
                children.extend(args.into_iter().map(Child::Node));
                operand = Operand::target(self.node(NodeType::Send, children, self.span_from(start)));
            } else {
                return Ok(operand);
            }
        }
    }

    /// Parse the arguments of a call to `name` on `receiver` (`Child::Nil` for receiverless calls).
    fn method_call(&mut self, receiver: Child, name: &str, start: usize) -> PResult<Operand> {
        let args = self.call_args()?;
        let assignable = args.is_none()
            && match receiver {
                Child::Nil => strings::is_local_name(name),
                _ => strings::is_identifier(name),
            };
        let mut children = vec![receiver, Child::sym(name)];
        children.extend(args.unwrap_or_default().into_iter().map(Child::Node));
        let node = self.node(NodeType::Send, children, self.span_from(start));
        Ok(Operand { node, assignable })
    }

    /// Parse call arguments: `(a, b)` glued to the name, or a command-style list `name a, b` on the same line.
    ///
    /// ## Returns
    /// - `None` when the call has neither parentheses nor arguments.
    fn call_args(&mut self) -> PResult<Option<Vec<Node>>> {
        if self.check_punct_tight(PunctuationId::LParen) {
            self.advance();
            return self.list_until(PunctuationId::RParen, "`)`").map(Some);
        }
        let next = self.peek();
        if !(next.space_before && next.kind.starts_expression()) {
            return Ok(None);
        }
        let mut args = vec![self.expression()?];
        while self.match_punct(PunctuationId::Comma) {
            self.skip_newlines();
            args.push(self.expression()?);
        }
        Ok(Some(args))
    }

    /// Parse a comma-separated expression list up to and including `close`; newlines are insignificant inside.
    fn list_until(&mut self, close: PunctuationId, what: &str) -> PResult<Vec<Node>> {
        let mut items = Vec::new();
        self.skip_newlines();
        while !self.check_punct(close) {
            items.push(self.expression()?);
            self.skip_newlines();
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
        }
        self.expect_punct(close, what)?;
        Ok(items)
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    fn primary(&mut self) -> PResult<Operand> {
        let token = self.peek();
        let start = token.span.start;
        match &token.kind {
            TokenKind::Int(value) => {
                self.advance();
                Ok(Operand::value(self.node(NodeType::Int, vec![Child::Int(*value)], token.span)))
            }
            TokenKind::Float(value) => {
                self.advance();
                Ok(Operand::value(self.node(NodeType::Float, vec![Child::Float(*value)], token.span)))
            }
            TokenKind::Symbol(name) => {
                self.advance();
                Ok(Operand::value(self.node(NodeType::Sym, vec![Child::sym(name.as_str())], token.span)))
            }
            TokenKind::Str(_) => self.string_literal().map(Operand::value),
            TokenKind::XStr(literal) => {
                self.advance();
                self.xstr_literal(literal, token.span).map(Operand::value)
            }
            TokenKind::Regexp(literal) => {
                self.advance();
                self.regexp_literal(literal, token.span).map(Operand::value)
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.is_local(name) && !self.check_punct_tight(PunctuationId::LParen) {
                    let node = self.node(NodeType::Lvar, vec![Child::sym(name.as_str())], token.span);
                    Ok(Operand::target(node))
                } else {
                    self.method_call(Child::Nil, name, start)
                }
            }
            TokenKind::Const(name) => {
                self.advance();
                if self.check_punct_tight(PunctuationId::LParen) {
                    self.method_call(Child::Nil, name, start)
                } else {
                    let node = self.node(NodeType::Const, vec![Child::Nil, Child::sym(name.as_str())], token.span);
                    Ok(Operand::target(node))
                }
            }
            TokenKind::IVar(name) => self.variable(NodeType::Ivar, name, token.span),
            TokenKind::CVar(name) => self.variable(NodeType::Cvar, name, token.span),
            TokenKind::GVar(name) => self.variable(NodeType::Gvar, name, token.span),
            TokenKind::Keyword(id) => self.keyword_primary(*id, token.span),
            TokenKind::Punctuation(PunctuationId::LParen) => self.paren_group().map(Operand::value),
            TokenKind::Punctuation(PunctuationId::LBracket) => self.array_literal().map(Operand::value),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.hash_literal().map(Operand::value),
            TokenKind::Punctuation(PunctuationId::ColonColon) => {
                self.advance();
                let cbase = self.node(NodeType::Cbase, vec![], token.span);
                let name_token = self.advance();
                let TokenKind::Const(name) = &name_token.kind else {
                    return Err(CompileError::syntax(
                        "expected a constant name after `::`".to_string(),
                        name_token.span,
                    ));
                };
                let children = vec![Child::Node(cbase), Child::sym(name.as_str())];
                Ok(Operand::target(self.node(NodeType::Const, children, self.span_from(start))))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn variable(&mut self, kind: NodeType, name: &str, span: Span) -> PResult<Operand> {
        self.advance();
        Ok(Operand::target(self.node(kind, vec![Child::sym(name)], span)))
    }

    fn keyword_primary(&mut self, id: KeywordId, span: Span) -> PResult<Operand> {
        let kind = match id {
            KeywordId::Nil => NodeType::Nil,
            KeywordId::True => NodeType::True,
            KeywordId::False => NodeType::False,
            KeywordId::SelfKw => NodeType::SelfRef,
            KeywordId::Begin => return self.kwbegin().map(Operand::value),
            KeywordId::Module => return self.module_definition().map(Operand::value),
            KeywordId::Class => return self.class_definition().map(Operand::value),
            _ => {
                return Err(CompileError::syntax(
                    format!("unsupported keyword `{}`", unparser_core::lang::keywords::as_str(id)),
                    span,
                ));
            }
        };
        self.advance();
        Ok(Operand::value(self.node(kind, vec![], span)))
    }

    // ========================================================================
    // Structural constructs
    // ========================================================================

    /// `module Name ... end`
    fn module_definition(&mut self) -> PResult<Node> {
        let keyword = self.advance().span;
        let name = self.constant_path()?;
        self.expect_term()?;
        let body = self.with_scope(|p| p.body_until_end())?;
        let end = self.expect_keyword(KeywordId::End, "`end`")?;
        let children = vec![Child::Node(name), Child::from(self.sequence(body))];
        let location = self.loc(keyword.merge(end)).with_delimiters(keyword, end);
        Ok(Node::new(NodeType::Module, children).with_location(location))
    }

    /// `class Name [< Superclass] ... end`
    fn class_definition(&mut self) -> PResult<Node> {
        let keyword = self.advance().span;
        let name = self.constant_path()?;
        let superclass = if self.match_punct(PunctuationId::Lt) {
            Child::Node(self.operand()?.node)
        } else {
            Child::Nil
        };
        self.expect_term()?;
        let body = self.with_scope(|p| p.body_until_end())?;
        let end = self.expect_keyword(KeywordId::End, "`end`")?;
        let children = vec![Child::Node(name), superclass, Child::from(self.sequence(body))];
        let location = self.loc(keyword.merge(end)).with_delimiters(keyword, end);
        Ok(Node::new(NodeType::Class, children).with_location(location))
    }

    fn constant_path(&mut self) -> PResult<Node> {
        let at = self.peek().span;
        let operand = self.operand()?;
        if operand.node.kind() != NodeType::Const {
            return Err(CompileError::syntax("definition name must be a constant".to_string(), at));
        }
        Ok(operand.node)
    }

    /// `begin ... end`
    fn kwbegin(&mut self) -> PResult<Node> {
        let keyword = self.advance().span;
        let body = self.body_until_end()?;
        let end = self.expect_keyword(KeywordId::End, "`end`")?;
        let children = body.into_iter().map(Child::Node).collect();
        let location = self.loc(keyword.merge(end)).with_delimiters(keyword, end);
        Ok(Node::new(NodeType::Kwbegin, children).with_location(location))
    }

    /// `(a; b)`: always a `begin` node, even with zero or one statement.
    fn paren_group(&mut self) -> PResult<Node> {
        let open = self.advance().span;
        let body = self.statements_until(|k| k.is_punctuation(PunctuationId::RParen), "`)`")?;
        let close = self.expect_punct(PunctuationId::RParen, "`)`")?;
        let children = body.into_iter().map(Child::Node).collect();
        let location = self.loc(open.merge(close)).with_delimiters(open, close);
        Ok(Node::new(NodeType::Begin, children).with_location(location))
    }

    fn array_literal(&mut self) -> PResult<Node> {
        let open = self.advance().span;
        let items = self.list_until(PunctuationId::RBracket, "`]`")?;
        let close = Span::new(self.prev_end() - 1, self.prev_end());
        let children = items.into_iter().map(Child::Node).collect();
        let location = self.loc(open.merge(close)).with_delimiters(open, close);
        Ok(Node::new(NodeType::Array, children).with_location(location))
    }

    fn hash_literal(&mut self) -> PResult<Node> {
        let open = self.advance().span;
        let mut pairs = Vec::new();
        self.skip_newlines();
        while !self.check_punct(PunctuationId::RBrace) {
            let key_start = self.peek().span.start;
            let key = self.expression()?;
            self.skip_newlines();
            self.expect_punct(PunctuationId::FatArrow, "`=>`")?;
            self.skip_newlines();
            let value = self.expression()?;
            let pair = self.node(
                NodeType::Pair,
                vec![Child::Node(key), Child::Node(value)],
                self.span_from(key_start),
            );
            pairs.push(Child::Node(pair));
            self.skip_newlines();
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
        }
        let close = self.expect_punct(PunctuationId::RBrace, "`}`")?;
        let location = self.loc(open.merge(close)).with_delimiters(open, close);
        Ok(Node::new(NodeType::Hash, pairs).with_location(location))
    }
}
