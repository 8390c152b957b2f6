use super::*;

/// A token span kept without further analysis, e.g. a WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueExpr {
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryExpression {
    pub with_clause: Option<Vec<WithElement>>,
    pub select_clause: SelectClause,
    pub from_clause: FromClause,
    /// `WHERE ...` up to the end of the query expression, keyword included.
    pub where_clause: Option<OpaqueExpr>,
    /// `GROUP BY`, `ORDER BY`, `UNION` ... when no WHERE clause precedes them.
    pub tail: Option<OpaqueExpr>,
}

/// `name [( columns )] AS ( query-expression )`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithElement {
    pub name: TokenId,
    pub columns: Option<Vec<TokenId>>,
    pub body: QueryExpression,
    pub span: Span,
}

impl QueryExpression {
    /// Every table reference in this query and its WITH bodies, outermost first.
    pub fn table_symbols(&self) -> Vec<&TableSymbol> {
        let mut out: Vec<&TableSymbol> = self.from_clause.tables.iter().collect();
        for element in self.with_clause.iter().flatten() {
            out.extend(element.body.table_symbols());
        }
        out
    }
}

/// Parse a query expression starting at `start` (just past `AS`).
///
/// `declared_columns` is the number of plain columns an explicit table body
/// declared; when given, the projection count is checked against it. The
/// second value is the index where parsing stopped.
pub fn parse_query_expression(
    stream: &TokenStream,
    start: usize,
    declared_columns: Option<usize>,
    report: &mut Report,
) -> (QueryExpression, usize) {
    let mut parser = Parser::new(stream, report, ParseOptions::default(), start);
    let query = parser.query_expression(declared_columns);
    (query, parser.pos())
}

impl Parser<'_> {
    pub(crate) fn query_expression(&mut self, declared_columns: Option<usize>) -> QueryExpression {
        self.decide(|| "enter query expression".to_string());
        let with_clause = self
            .at_keyword(Keyword::With)
            .then(|| self.with_clause());

        let select_clause = self.select_clause();
        let from_clause = match self.eat_keyword(Keyword::From) {
            Some(keyword) => self.from_clause(keyword),
            None => {
                if select_clause.keyword.is_some() {
                    let anchor = self.last_consumed();
                    self.diagnose(
                        ErrorCode::MissingFromKeyword,
                        anchor,
                        "Missing FROM keyword after the SELECT clause",
                    );
                }
                FromClause::default()
            }
        };

        let where_clause = self
            .at_keyword(Keyword::Where)
            .then(|| self.opaque_until_query_end());
        let tail = self
            .peek()
            .is_some_and(|t| matches!(t.kind, TokenKind::Keyword(kw) if kw.is_terminator()))
            .then(|| self.opaque_until_query_end());

        self.check_projection_count(declared_columns, &select_clause, &from_clause);

        QueryExpression {
            with_clause,
            select_clause,
            from_clause,
            where_clause,
            tail,
        }
    }

    fn with_clause(&mut self) -> Vec<WithElement> {
        let with = self.pos() as u32;
        self.advance();
        let mut elements = Vec::new();
        loop {
            let first = self.pos() as u32;
            let Some(name) = self.eat_name() else {
                let here = self.here();
                self.diagnose(
                    ErrorCode::IncompleteWithElement,
                    Span::new(with.min(here), here),
                    "Expected a named query after WITH",
                );
                break;
            };
            let element_name = self.stream().text(name).to_string();
            self.decide(|| format!("with element '{element_name}'"));

            let columns = self.at_kind(TokenKind::ParenOpen).then(|| {
                let (columns, well_formed) = self.name_list();
                if !well_formed {
                    self.diagnose(
                        ErrorCode::IncompleteWithElement,
                        Span::new(first, self.last_consumed()),
                        format!("Incomplete column list for WITH element '{element_name}'"),
                    );
                }
                columns
            });

            let mut body = QueryExpression::default();
            if self.eat_keyword(Keyword::As).is_none() {
                self.diagnose(
                    ErrorCode::IncompleteWithElement,
                    Span::new(first, self.last_consumed()),
                    format!("Expected AS after WITH element '{element_name}'"),
                );
            } else if self.eat_kind(TokenKind::ParenOpen).is_some() {
                let declared = columns.as_ref().map(Vec::len).filter(|n| *n > 0);
                body = self.query_expression(declared);
                if self.eat_kind(TokenKind::ParenClose).is_none() {
                    self.diagnose(
                        ErrorCode::IncompleteWithElement,
                        Span::new(first, self.last_consumed()),
                        format!("Missing ')' to close WITH element '{element_name}'"),
                    );
                }
            } else {
                self.diagnose(
                    ErrorCode::IncompleteWithElement,
                    Span::new(first, self.last_consumed()),
                    format!("Expected ( query ) after AS in WITH element '{element_name}'"),
                );
            }

            elements.push(WithElement {
                name,
                columns,
                body,
                span: Span::new(first, self.last_consumed()),
            });
            if self.eat_kind(TokenKind::Comma).is_none() {
                break;
            }
        }
        elements
    }

    /// Compare the projection count with the declared view columns. Skipped
    /// while the SELECT list is still open (no FROM yet) or projects `*`.
    fn check_projection_count(
        &mut self,
        declared: Option<usize>,
        select: &SelectClause,
        from: &FromClause,
    ) {
        let (Some(declared), Some(select_keyword), Some(from_keyword)) =
            (declared, select.keyword, from.keyword)
        else {
            return;
        };
        if select.is_star || select.projection_count() == declared {
            return;
        }
        let last = from_keyword.0.saturating_sub(1).max(select_keyword.0);
        self.diagnose(
            ErrorCode::ProjectedSymbolsViewColumnsMismatch,
            Span::new(select_keyword.0, last),
            format!(
                "The view declares {declared} column(s) but the SELECT clause projects {}",
                select.projection_count()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, declared: Option<usize>) -> (QueryExpression, Vec<ErrorCode>, usize) {
        let stream = TokenStream::new(text);
        let mut report = Report::default();
        let (query, end) = parse_query_expression(&stream, 0, declared, &mut report);
        let codes = report.diagnostics().iter().map(|d| d.code).collect();
        (query, codes, end)
    }

    #[test]
    fn where_clause_is_opaque() {
        let (query, codes, end) = run("SELECT a FROM t WHERE a > (1 + 2) ORDER BY a;", Some(1));
        assert!(codes.is_empty());
        let span = query.where_clause.map(|w| w.span);
        assert_eq!(span, Some(Span::new(4, 14)));
        assert!(query.tail.is_none());
        assert_eq!(end, 15);
    }

    #[test]
    fn tail_without_where() {
        let (query, codes, _) = run("SELECT a FROM t GROUP BY a", None);
        assert!(codes.is_empty());
        assert_eq!(query.tail.map(|t| t.span), Some(Span::new(4, 6)));
    }

    #[test]
    fn with_elements_are_parsed_recursively() {
        let (query, codes, _) = run(
            "WITH a (x) AS (SELECT x FROM t1), b AS (SELECT y, z FROM t2) SELECT x FROM a",
            None,
        );
        assert!(codes.is_empty());
        let with = query.with_clause.as_deref().unwrap_or_default();
        assert_eq!(with.len(), 2);
        assert_eq!(with[0].columns.as_ref().map(Vec::len), Some(1));
        assert_eq!(with[1].body.select_clause.columns.len(), 2);
        assert_eq!(query.table_symbols().len(), 3);
    }

    #[test]
    fn with_element_column_count_is_checked() {
        let (_, codes, _) = run("WITH a (x, y) AS (SELECT x FROM t1) SELECT x FROM a", None);
        assert_eq!(codes, vec![ErrorCode::ProjectedSymbolsViewColumnsMismatch]);
    }

    #[test]
    fn incomplete_with_elements_are_kept() {
        let (query, codes, _) = run("WITH a AS (SELECT x) SELECT x FROM a", None);
        assert_eq!(codes, vec![ErrorCode::MissingFromKeyword]);
        assert_eq!(query.with_clause.map(|w| w.len()), Some(1));

        let (query, codes, _) = run("WITH a SELECT x FROM a", None);
        assert_eq!(codes, vec![ErrorCode::IncompleteWithElement]);
        assert_eq!(query.with_clause.map(|w| w.len()), Some(1));
        assert_eq!(query.select_clause.columns.len(), 1);
    }

    #[test]
    fn cross_check_needs_from() {
        let (_, codes, _) = run("SELECT FROM", Some(1));
        assert_eq!(codes, vec![ErrorCode::ProjectedSymbolsViewColumnsMismatch]);
        let (_, codes, _) = run("SELECT 1", Some(2));
        assert_eq!(codes, vec![ErrorCode::MissingFromKeyword]);
        let (_, codes, _) = run("SELECT * FROM t", Some(2));
        assert!(codes.is_empty());
    }
}
