/// String-like literals.
///
/// This chunk turns lexed string, command and regex literals into `str`, `dstr`, `xstr` and `regexp` nodes.
///
/// ## Notes
/// - Adjacent string literals (`"a" "b"`) are flattened into one `dstr`; an empty literal contributes `(str "")`.
/// - An interpolation `#{...}` becomes a `begin` node holding its statements, even when it has none or one.
/// - Segment `str` nodes carry no location; only the enclosing literal does.
impl<'a> Parser<'a> {
    /// Parse one string literal, or several adjacent ones.
    fn string_literal(&mut self) -> PResult<Node> {
        let mut literals: Vec<&'a StrLiteral> = Vec::new();
        let mut span: Option<Span> = None;
        while let TokenKind::Str(literal) = &self.peek().kind {
            let token_span = self.advance().span;
            span = Some(span.map_or(token_span, |s| s.merge(token_span)));
            literals.push(literal);
        }
        let (Some(first), Some(last), Some(span)) = (literals.first(), literals.last(), span) else {
            return Err(self.unexpected("a string"));
        };
        let location = self.loc(span).with_delimiters(first.open, last.close);

        if let [literal] = literals.as_slice() {
            match literal.parts.as_slice() {
                [] => return Ok(Node::new(NodeType::Str, vec![Child::str("")]).with_location(location)),
                [StrPart::Text { value, .. }] => {
                    return Ok(Node::new(NodeType::Str, vec![Child::str(value.as_str())]).with_location(location));
                }
                _ => {}
            }
        }

        let mut children = Vec::new();
        for literal in literals {
            if literal.parts.is_empty() {
                children.push(Child::Node(Node::new(NodeType::Str, vec![Child::str("")])));
            }
            for part in &literal.parts {
                children.push(Child::Node(self.segment(part)?));
            }
        }
        Ok(Node::new(NodeType::Dstr, children).with_location(location))
    }

    /// `` `cmd` ``
    fn xstr_literal(&mut self, literal: &'a StrLiteral, span: Span) -> PResult<Node> {
        let children = self.segments(&literal.parts)?;
        let location = self.loc(span).with_delimiters(literal.open, literal.close);
        Ok(Node::new(NodeType::Xstr, children).with_location(location))
    }

    /// `/body/opts` or `%r{body}opts`
    ///
    /// The options become a trailing `regopt` node whose symbols are sorted and de-duplicated.
    fn regexp_literal(&mut self, literal: &'a RegexpLiteral, span: Span) -> PResult<Node> {
        let mut children = self.segments(&literal.parts)?;
        let mut options: Vec<char> = literal.options.chars().collect();
        options.sort_unstable();
        options.dedup();
        let regopt = Node::new(
            NodeType::Regopt,
            options.into_iter().map(|c| Child::Sym(c.to_string())).collect(),
        );
        children.push(Child::Node(regopt));
        let location = self.loc(span).with_delimiters(literal.open, literal.close);
        Ok(Node::new(NodeType::Regexp, children).with_location(location))
    }

    fn segments(&mut self, parts: &'a [StrPart]) -> PResult<Vec<Child>> {
        parts.iter().map(|part| self.segment(part).map(Child::Node)).collect()
    }

    fn segment(&mut self, part: &'a StrPart) -> PResult<Node> {
        match part {
            StrPart::Text { value, .. } => Ok(Node::new(NodeType::Str, vec![Child::str(value.as_str())])),
            StrPart::Interp { tokens, span } => {
                let statements = self.interpolation(tokens)?;
                let open = Span::new(span.start, span.start + 2);
                let close = Span::new(span.end.saturating_sub(1), span.end);
                let location = self.loc(*span).with_delimiters(open, close);
                let children = statements.into_iter().map(Child::Node).collect();
                Ok(Node::new(NodeType::Begin, children).with_location(location))
            }
        }
    }

    /// Parse the statements of an interpolation against its own token stream.
    ///
    /// Locals are shared with the surrounding scope, as in Ruby.
    fn interpolation(&mut self, tokens: &'a [Token]) -> PResult<Vec<Node>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let saved_tokens = std::mem::replace(&mut self.tokens, tokens);
        let saved_pos = std::mem::replace(&mut self.pos, 0);
        let result = self.statements_until(|k| matches!(k, TokenKind::Eof), "end of interpolation");
        self.tokens = saved_tokens;
        self.pos = saved_pos;
        result
    }
}
