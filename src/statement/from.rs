use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FromClause {
    /// The `FROM` keyword; `None` when the clause is missing.
    pub keyword: Option<TokenId>,
    pub tables: Vec<TableSymbol>,
}

/// `[schema.]table [[AS] alias]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSymbol {
    pub schema: Option<TokenId>,
    pub table: TokenId,
    pub alias: Option<Alias>,
}

impl Parser<'_> {
    /// Parse the table list after an already consumed `FROM`.
    pub(crate) fn from_clause(&mut self, keyword: TokenId) -> FromClause {
        self.decide(|| "enter from clause".to_string());
        let mut clause = FromClause {
            keyword: Some(keyword),
            tables: Vec::new(),
        };

        while let Some(token) = self.peek() {
            if self.at_list_end() {
                break;
            }
            if token.kind == TokenKind::Comma {
                self.advance();
                self.diagnose(
                    ErrorCode::UnexpectedComma,
                    token.id(),
                    "Unexpected comma, expected a table reference",
                );
                continue;
            }
            if token.kind == TokenKind::ParenOpen {
                // derived tables stay unanalyzed
                self.skip_group();
                self.alias(true);
                self.diagnose(
                    ErrorCode::InvalidToken,
                    Span::new(token.index, self.last_consumed()),
                    "Unexpected parenthesized table reference in the FROM clause",
                );
                self.after_table_reference();
                continue;
            }
            if !token.is_name() {
                self.advance();
                self.diagnose(
                    ErrorCode::InvalidToken,
                    token.id(),
                    format!("Invalid token '{}' in the FROM clause", token.text),
                );
                continue;
            }

            let table = self.table_symbol();
            self.decide(|| format!("table reference {}", clause.tables.len() + 1));
            clause.tables.push(table);
            self.after_table_reference();
        }
        clause
    }

    /// Consume the separator after a table reference. Anything else up to the
    /// next comma is reported once.
    fn after_table_reference(&mut self) {
        let Some(next) = self.peek() else { return };
        if next.kind != TokenKind::Comma && !self.at_list_end() {
            // joins and other table reference forms stay unanalyzed
            self.skip_until(|t| {
                t.kind == TokenKind::Comma
                    || matches!(t.kind, TokenKind::Keyword(kw) if kw.is_terminator())
            });
            self.diagnose(
                ErrorCode::InvalidToken,
                Span::new(next.index, self.last_consumed()),
                format!("Unexpected '{}' after table reference", next.text),
            );
        }
        if let Some(comma) = self.eat_kind(TokenKind::Comma)
            && self.at_list_end()
        {
            self.diagnose(
                ErrorCode::UnexpectedComma,
                comma,
                "Unexpected comma after the last table reference",
            );
        }
    }

    fn table_symbol(&mut self) -> TableSymbol {
        let start = self.pos() as u32;
        let first = self.advance().map(Token::id).unwrap_or(TokenId(start));
        let mut symbol = TableSymbol {
            schema: None,
            table: first,
            alias: None,
        };

        if self.at_kind(TokenKind::Dot) {
            match self.qualified_member().filter(|m| m.kind != TokenKind::Star) {
                Some(member) => {
                    self.advance();
                    self.advance();
                    symbol.schema = Some(first);
                    symbol.table = member.id();
                }
                None => {
                    self.advance();
                    self.diagnose(
                        ErrorCode::IncompleteSchemaRef,
                        Span::new(first.0, self.last_consumed()),
                        format!(
                            "Incomplete table reference '{}.', expected a table name",
                            self.stream().text(first)
                        ),
                    );
                }
            }
        }

        symbol.alias = self.alias(true);
        symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(text: &str) -> (FromClause, Vec<ErrorCode>, TokenStream) {
        let stream = TokenStream::new(text);
        let mut report = Report::default();
        let mut parser = Parser::new(&stream, &mut report, ParseOptions::default(), 1);
        let clause = parser.from_clause(TokenId(0));
        let codes = report.diagnostics().iter().map(|d| d.code).collect();
        (clause, codes, stream)
    }

    #[test]
    fn schema_table_and_aliases() {
        let (clause, codes, stream) =
            from("FROM PostgresDB.winelist AS t1, PostgresDB.contact t2, bar");
        assert!(codes.is_empty());
        assert_eq!(clause.tables.len(), 3);
        let first = clause.tables[0];
        assert_eq!(first.schema.map(|s| stream.text(s)), Some("PostgresDB"));
        assert_eq!(stream.text(first.table), "winelist");
        assert!(first.alias.is_some_and(|a| a.as_keyword.is_some()));
        let second = clause.tables[1];
        assert!(second.alias.is_some_and(|a| a.as_keyword.is_none()));
        assert_eq!(clause.tables[2].alias, None);
    }

    #[test]
    fn reserved_word_is_not_an_implicit_alias() {
        let (clause, codes, _) = from("FROM t WHERE x > 1");
        assert!(codes.is_empty());
        assert_eq!(clause.tables[0].alias, None);
    }

    #[test]
    fn dangling_schema_reference() {
        let (clause, codes, stream) = from("FROM PostgresDB.");
        assert_eq!(codes, vec![ErrorCode::IncompleteSchemaRef]);
        assert_eq!(clause.tables[0].schema, None);
        assert_eq!(stream.text(clause.tables[0].table), "PostgresDB");
    }

    #[test]
    fn trailing_comma_and_empty_list() {
        let (clause, codes, _) = from("FROM a as t1, ");
        assert_eq!(codes, vec![ErrorCode::UnexpectedComma]);
        assert_eq!(clause.tables.len(), 1);
        let (clause, codes, _) = from("FROM");
        assert!(codes.is_empty());
        assert!(clause.tables.is_empty());
    }

    #[test]
    fn joins_are_skipped_as_one_problem() {
        let (clause, codes, _) = from("FROM a JOIN b ON a.id = b.id, c");
        assert_eq!(codes, vec![ErrorCode::InvalidToken]);
        assert_eq!(clause.tables.len(), 2);
    }

    #[test]
    fn derived_table_is_skipped_whole() {
        let (clause, codes, stream) = from("FROM (SELECT b FROM t) AS s, u");
        assert_eq!(codes, vec![ErrorCode::InvalidToken]);
        assert_eq!(clause.tables.len(), 1);
        assert_eq!(stream.text(clause.tables[0].table), "u");
    }
}
