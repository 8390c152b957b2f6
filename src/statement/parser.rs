use super::*;

/// Cursor over a token stream shared by the statement, table-body and
/// query-expression parsers. Diagnostics go to the borrowed report.
pub(crate) struct Parser<'a> {
    stream: &'a TokenStream,
    report: &'a mut Report,
    pub(crate) options: ParseOptions,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        stream: &'a TokenStream,
        report: &'a mut Report,
        options: ParseOptions,
        pos: usize,
    ) -> Self {
        Self {
            stream,
            report,
            options,
            pos,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn stream(&self) -> &'a TokenStream {
        self.stream
    }

    pub(crate) fn report(&self) -> &Report {
        &*self.report
    }

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.stream.get(self.pos)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.stream.get(self.pos + n)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.stream.len()
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub(crate) fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn at_keyword(&self, kw: Keyword) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(kw))
    }

    pub(crate) fn eat_kind(&mut self, kind: TokenKind) -> Option<TokenId> {
        self.at_kind(kind).then(|| self.take())
    }

    pub(crate) fn eat_keyword(&mut self, kw: Keyword) -> Option<TokenId> {
        self.at_keyword(kw).then(|| self.take())
    }

    pub(crate) fn eat_name(&mut self) -> Option<TokenId> {
        self.peek().is_some_and(Token::is_name).then(|| self.take())
    }

    /// Consume the current token, which the caller has already checked exists.
    fn take(&mut self) -> TokenId {
        let id = TokenId(self.pos as u32);
        self.pos += 1;
        id
    }

    /// Index of the last consumed token.
    pub(crate) fn last_consumed(&self) -> u32 {
        self.pos.saturating_sub(1) as u32
    }

    /// Anchor for a diagnostic about "what comes next": the current token, or
    /// the last token once the input is exhausted.
    pub(crate) fn here(&self) -> u32 {
        (self.pos as u32).min(self.stream.last_index())
    }

    pub(crate) fn diagnose(
        &mut self,
        code: ErrorCode,
        span: impl Into<Span>,
        message: impl Into<String>,
    ) {
        self.report.add(code, span, message);
    }

    pub(crate) fn decide(&mut self, decision: impl FnOnce() -> String) {
        let index = self.here();
        self.report.decide(index, decision);
    }

    /// True at `;`, an unmatched `)` or the end of input.
    pub(crate) fn at_query_end(&self) -> bool {
        self.peek()
            .is_none_or(|t| matches!(t.kind, TokenKind::Semicolon | TokenKind::ParenClose))
    }

    /// True where a projection or table list stops: the query end, `FROM`,
    /// or a keyword opening the opaque tail.
    pub(crate) fn at_list_end(&self) -> bool {
        self.at_query_end()
            || self.peek().is_some_and(|t| match t.kind {
                TokenKind::Keyword(kw) => kw == Keyword::From || kw.is_terminator(),
                _ => false,
            })
    }

    /// At a `.`, the token right after it when it can complete a qualified
    /// name. Qualified names are written without whitespace after the dot.
    pub(crate) fn qualified_member(&self) -> Option<&'a Token> {
        let dot = self.peek().filter(|t| t.kind == TokenKind::Dot)?;
        self.peek_nth(1).filter(|next| {
            dot.touches(next)
                && (next.kind.is_ident() || next.kind == TokenKind::Star || next.is_name())
        })
    }

    /// Consume a balanced `( ... )` group starting at the current `(`.
    /// Returns the closing parenthesis when the group is closed.
    pub(crate) fn skip_group(&mut self) -> Option<TokenId> {
        self.eat_kind(TokenKind::ParenOpen)?;
        let mut depth = 1usize;
        while let Some(token) = self.advance() {
            match token.kind {
                TokenKind::ParenOpen => depth += 1,
                TokenKind::ParenClose => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(token.id());
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Consume tokens until `stop` holds at paren depth zero, or the query ends.
    pub(crate) fn skip_until(&mut self, stop: impl Fn(&Token) -> bool) {
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::ParenOpen => {
                    self.skip_group();
                    continue;
                }
                TokenKind::ParenClose | TokenKind::Semicolon => return,
                _ if stop(token) => return,
                _ => {}
            }
            self.pos += 1;
        }
    }

    /// Consume from the current keyword to the end of the query expression,
    /// keeping nested parentheses together.
    pub(crate) fn opaque_until_query_end(&mut self) -> OpaqueExpr {
        let first = self.pos as u32;
        self.pos += 1;
        self.skip_until(|_| false);
        OpaqueExpr {
            span: Span::new(first, self.last_consumed()),
        }
    }

    /// Parse `( name, ... )`. Returns the names and whether the list was well
    /// formed; only missing commas are reported here.
    pub(crate) fn name_list(&mut self) -> (Vec<TokenId>, bool) {
        let mut names = Vec::new();
        if self.eat_kind(TokenKind::ParenOpen).is_none() {
            return (names, false);
        }
        let mut complete = true;
        loop {
            let Some(token) = self.peek() else {
                complete = false;
                break;
            };
            match token.kind {
                TokenKind::ParenClose => {
                    self.pos += 1;
                    break;
                }
                TokenKind::Semicolon | TokenKind::Keyword(_) if !token.is_name() => {
                    complete = false;
                    break;
                }
                TokenKind::Comma => {
                    self.pos += 1;
                    if names.is_empty()
                        || self.at_kind(TokenKind::ParenClose)
                        || self.at_kind(TokenKind::Comma)
                    {
                        complete = false;
                    }
                }
                _ if token.is_name() => {
                    self.pos += 1;
                    names.push(token.id());
                    if let Some(next) = self.peek().filter(|n| n.is_name()) {
                        self.diagnose(
                            ErrorCode::MissingCommaSeparator,
                            next.id(),
                            format!("Missing comma before '{}'", next.text),
                        );
                    }
                }
                _ => {
                    complete = false;
                    self.pos += 1;
                }
            }
        }
        let complete = complete && !names.is_empty();
        (names, complete)
    }
}
