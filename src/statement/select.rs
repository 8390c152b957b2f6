use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectClause {
    /// The `SELECT` keyword; `None` when the clause is missing.
    pub keyword: Option<TokenId>,
    pub is_star: bool,
    pub is_all: bool,
    pub is_distinct: bool,
    pub columns: Vec<SelectColumn>,
    /// Parenthesized projections skipped as one invalid token each. They
    /// still take a slot when the projection count is checked.
    pub skipped_groups: usize,
}

impl SelectClause {
    /// Number of projections, counting skipped groups.
    pub fn projection_count(&self) -> usize {
        self.columns.len() + self.skipped_groups
    }
}

/// `[AS] name` attached to a projection or table reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub as_keyword: Option<TokenId>,
    pub name: TokenId,
}

/// One projection in a SELECT list or a function argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectColumn {
    Literal {
        value: TokenId,
        alias: Option<Alias>,
    },
    ColumnRef {
        table: Option<TokenId>,
        column: TokenId,
        alias: Option<Alias>,
    },
    Function {
        name: TokenId,
        params: Vec<SelectColumn>,
        alias: Option<Alias>,
    },
}

impl SelectColumn {
    pub fn alias(&self) -> Option<Alias> {
        match self {
            SelectColumn::Literal { alias, .. }
            | SelectColumn::ColumnRef { alias, .. }
            | SelectColumn::Function { alias, .. } => *alias,
        }
    }

    fn set_alias(&mut self, value: Option<Alias>) {
        match self {
            SelectColumn::Literal { alias, .. }
            | SelectColumn::ColumnRef { alias, .. }
            | SelectColumn::Function { alias, .. } => *alias = value,
        }
    }
}

/// `NULL`, `TRUE`, `FALSE` and `UNKNOWN` act as literals.
fn is_literal_word(token: &Token) -> bool {
    token.is_keyword(Keyword::Null)
        || (token.kind == TokenKind::Ident
            && matches!(token.lower().as_str(), "true" | "false" | "unknown"))
}

impl Parser<'_> {
    pub(crate) fn select_clause(&mut self) -> SelectClause {
        let Some(keyword) = self.eat_keyword(Keyword::Select) else {
            let here = self.here();
            self.diagnose(
                ErrorCode::NoSelectClause,
                here,
                "Expected a SELECT clause after AS",
            );
            self.skip_until(|t| matches!(t.kind, TokenKind::Keyword(kw) if kw == Keyword::From || kw.is_terminator()));
            return SelectClause::default();
        };
        self.decide(|| "enter select clause".to_string());

        let mut clause = SelectClause {
            keyword: Some(keyword),
            ..Default::default()
        };
        if self.eat_keyword(Keyword::All).is_some() {
            clause.is_all = true;
        } else if self.eat_keyword(Keyword::Distinct).is_some() {
            clause.is_distinct = true;
        }
        if self.eat_kind(TokenKind::Star).is_some() {
            clause.is_star = true;
        } else {
            (clause.columns, clause.skipped_groups) = self.select_columns();
        }
        clause
    }

    fn starts_projection(&self) -> bool {
        let Some(token) = self.peek() else {
            return false;
        };
        token.kind.is_literal()
            || token.is_name()
            || is_literal_word(token)
            || (token.kind == TokenKind::Ident && self.peek_nth(1).is_some_and(|n| n.kind == TokenKind::ParenOpen))
    }

    /// Returns the projections and the number of parenthesized groups skipped
    /// in their place. Invalid tokens ending a list without FROM are left to
    /// the missing-FROM report.
    fn select_columns(&mut self) -> (Vec<SelectColumn>, usize) {
        let mut columns = Vec::new();
        let mut skipped_groups = 0;
        let mut pending: Vec<(Span, String)> = Vec::new();
        while let Some(token) = self.peek() {
            if self.at_list_end() {
                break;
            }
            if token.kind == TokenKind::ParenOpen {
                self.flush_invalid(&mut pending);
                let first = token.index;
                self.skip_group();
                self.alias(false);
                self.diagnose(
                    ErrorCode::InvalidToken,
                    Span::new(first, self.last_consumed()),
                    "Unexpected parenthesized expression in the SELECT clause",
                );
                skipped_groups += 1;
                self.after_projection();
                continue;
            }
            if token.kind == TokenKind::Comma {
                self.flush_invalid(&mut pending);
                self.advance();
                self.diagnose(
                    ErrorCode::UnexpectedComma,
                    token.id(),
                    "Unexpected comma, expected a column",
                );
                continue;
            }
            if !self.starts_projection() {
                self.advance();
                pending.push((
                    Span::single(token.index),
                    format!("Invalid token '{}' in the SELECT clause", token.text),
                ));
                continue;
            }
            self.flush_invalid(&mut pending);
            let column = self.select_column(true);
            self.decide(|| format!("projection {}", columns.len() + 1));
            columns.push(column);
            self.after_projection();
        }
        if self.at_keyword(Keyword::From) {
            self.flush_invalid(&mut pending);
        } else if !pending.is_empty() {
            self.decide(|| "invalid tokens left to the missing FROM".to_string());
        }
        (columns, skipped_groups)
    }

    fn flush_invalid(&mut self, pending: &mut Vec<(Span, String)>) {
        for (span, message) in pending.drain(..) {
            self.diagnose(ErrorCode::InvalidToken, span, message);
        }
    }

    /// Consume the separator after a projection, reporting whatever stands
    /// in for a missing comma.
    fn after_projection(&mut self) {
        while let Some(token) = self.peek() {
            if self.at_list_end() {
                return;
            }
            if token.kind == TokenKind::Comma {
                self.advance();
                if self.at_list_end() {
                    self.diagnose(
                        ErrorCode::UnexpectedComma,
                        token.id(),
                        "Unexpected comma after the last column",
                    );
                }
                return;
            }
            if self.starts_projection() {
                self.diagnose(
                    ErrorCode::InvalidColumnMissingComma,
                    token.id(),
                    format!("Missing comma before '{}'", token.text),
                );
                return;
            }
            if token.kind == TokenKind::ParenOpen {
                self.skip_group();
                self.diagnose(
                    ErrorCode::InvalidColumnMissingComma,
                    Span::new(token.index, self.last_consumed()),
                    "Unexpected parenthesized expression, expected ',' or FROM",
                );
                continue;
            }
            self.advance();
            self.diagnose(
                ErrorCode::InvalidColumnMissingComma,
                token.id(),
                format!("Invalid token '{}', expected ',' or FROM", token.text),
            );
        }
    }

    /// Parse one projection. The caller guarantees `starts_projection`.
    fn select_column(&mut self, allow_alias: bool) -> SelectColumn {
        let start = self.pos() as u32;
        let Some(token) = self.advance() else {
            return SelectColumn::Literal {
                value: TokenId(start),
                alias: None,
            };
        };

        let mut column = if token.kind.is_literal() || is_literal_word(token) {
            SelectColumn::Literal {
                value: token.id(),
                alias: None,
            }
        } else if self.at_kind(TokenKind::ParenOpen) {
            SelectColumn::Function {
                name: token.id(),
                params: self.function_params(),
                alias: None,
            }
        } else if self.at_kind(TokenKind::Dot) {
            match self.qualified_member() {
                Some(member) => {
                    self.advance();
                    self.advance();
                    SelectColumn::ColumnRef {
                        table: Some(token.id()),
                        column: member.id(),
                        alias: None,
                    }
                }
                None => {
                    self.advance();
                    self.diagnose(
                        ErrorCode::IncompleteSchemaRef,
                        Span::new(token.index, self.last_consumed()),
                        format!("Incomplete reference '{}.', expected a column name", token.text),
                    );
                    SelectColumn::ColumnRef {
                        table: None,
                        column: token.id(),
                        alias: None,
                    }
                }
            }
        } else {
            SelectColumn::ColumnRef {
                table: None,
                column: token.id(),
                alias: None,
            }
        };

        if allow_alias {
            column.set_alias(self.alias(false));
        }
        column
    }

    /// Parse `( arg, ... )` after a function name. Arguments may be nested
    /// calls, column references or literals; anything else is skipped.
    fn function_params(&mut self) -> Vec<SelectColumn> {
        self.advance();
        let mut params = Vec::new();
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::ParenClose => {
                    self.advance();
                    break;
                }
                TokenKind::Semicolon => break,
                TokenKind::Keyword(kw) if kw == Keyword::From || kw.is_terminator() => break,
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::Star => {
                    self.advance();
                    params.push(SelectColumn::Literal {
                        value: token.id(),
                        alias: None,
                    });
                }
                TokenKind::ParenOpen => {
                    self.skip_group();
                }
                _ if self.starts_projection() => params.push(self.select_column(false)),
                _ => {
                    self.advance();
                }
            }
        }
        params
    }

    /// Parse `AS name`, or a bare name when `implicit` is allowed.
    pub(crate) fn alias(&mut self, implicit: bool) -> Option<Alias> {
        if let Some(as_keyword) = self.eat_keyword(Keyword::As) {
            if let Some(name) = self.eat_name() {
                return Some(Alias {
                    as_keyword: Some(as_keyword),
                    name,
                });
            }
            // A reserved word is consumed as the attempted alias.
            if self.peek().is_some_and(|t| t.kind == TokenKind::Ident) {
                self.advance();
            }
            self.diagnose(
                ErrorCode::InvalidAlias,
                Span::new(as_keyword.0, self.last_consumed()),
                "Expected an alias name after AS",
            );
            return None;
        }
        if implicit
            && self
                .peek()
                .is_some_and(|t| t.kind.is_ident() && t.is_name())
        {
            return self.eat_name().map(|name| Alias {
                as_keyword: None,
                name,
            });
        }
        None
    }
}
