/// Parse Ruby source into an AST.
///
/// This is the main public entrypoint for parsing.
///
/// ## Returns
/// - `Ok(None)` for a file without statements, `Ok(Some(node))` otherwise.
///
/// ## Errors
/// Returns every lexical error, or every syntax error if lexing succeeded.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> Result<Option<Node>, Vec<CompileError>> {
    let tokens = lexer::lex(source)?;
    parse_tokens(source, &tokens)
}

/// Parse an already lexed token stream.
///
/// ## Parameters
/// - `source`: The text `tokens` were lexed from.
/// - `tokens`: Token stream produced by `unparser_syntax::lexer` (ending in `Eof`).
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_tokens(source: &str, tokens: &[Token]) -> Result<Option<Node>, Vec<CompileError>> {
    if tokens.is_empty() {
        return Ok(None);
    }
    Parser::new(source, tokens).parse()
}
