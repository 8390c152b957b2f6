use super::*;
use derive_more::Display;

/// The parenthesized column / constraint list following the view name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBody {
    pub open: TokenId,
    pub close: Option<TokenId>,
    pub elements: Vec<TableElement>,
}

impl TableBody {
    /// Plain column elements, constraints excluded.
    pub fn columns(&self) -> impl Iterator<Item = &TableElement> {
        self.elements.iter().filter(|e| e.is_column())
    }

    pub fn column_count(&self) -> usize {
        self.columns().count()
    }

    pub fn span(&self) -> Span {
        Span::new(self.open.0, self.close.unwrap_or(self.open).0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableElement {
    Column {
        name: TokenId,
        data_type: Option<ColumnType>,
        constraints: Vec<ColumnConstraint>,
        span: Span,
    },
    PrimaryKey {
        columns: Vec<TokenId>,
        span: Span,
    },
    ForeignKey {
        columns: Vec<TokenId>,
        ref_table: Option<TokenId>,
        ref_columns: Vec<TokenId>,
        span: Span,
    },
}

impl TableElement {
    pub fn span(&self) -> Span {
        match self {
            TableElement::Column { span, .. }
            | TableElement::PrimaryKey { span, .. }
            | TableElement::ForeignKey { span, .. } => *span,
        }
    }

    pub fn first_token_index(&self) -> u32 {
        self.span().first
    }

    pub fn last_token_index(&self) -> u32 {
        self.span().last
    }

    pub fn is_column(&self) -> bool {
        matches!(self, TableElement::Column { .. })
    }
}

/// Declared type of a column, e.g. `string(255)` or `decimal(10, 2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    pub name: TokenId,
    /// `None` when the type name is not a known type.
    pub data_type: Option<DataType>,
    pub args: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ConstraintKind {
    #[display("NOT NULL")]
    NotNull,
    #[display("NULL")]
    Null,
    #[display("UNIQUE")]
    Unique,
    #[display("INDEX")]
    Index,
    #[display("AUTO_INCREMENT")]
    AutoIncrement,
    #[display("PRIMARY KEY")]
    PrimaryKey,
    #[display("DEFAULT")]
    Default,
    #[display("OPTIONS")]
    Options,
}

/// A column modifier and the tokens it covers, value included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnConstraint {
    pub kind: ConstraintKind,
    pub span: Span,
}

/// Parse the table body starting at `start`.
///
/// Returns `None` when the token at `start` is not `(`; an absent body means
/// the columns are inferred from the projection list. The second value is
/// the index just past the body.
pub fn parse_table_body(
    stream: &TokenStream,
    start: usize,
    report: &mut Report,
) -> (Option<TableBody>, usize) {
    let mut parser = Parser::new(stream, report, ParseOptions::default(), start);
    let body = parser.table_body();
    (body, parser.pos())
}

fn is_modifier(token: &Token) -> bool {
    use Keyword::*;
    matches!(
        token.kind,
        TokenKind::Keyword(
            Not | Null | Unique | Index | AutoIncrement | Primary | Default | Options
        )
    )
}

impl Parser<'_> {
    pub(crate) fn table_body(&mut self) -> Option<TableBody> {
        let open = self.eat_kind(TokenKind::ParenOpen)?;
        self.decide(|| "enter table body".to_string());
        let mut body = TableBody {
            open,
            close: None,
            elements: Vec::new(),
        };

        if let Some(close) = self.eat_kind(TokenKind::ParenClose) {
            body.close = Some(close);
            self.diagnose(
                ErrorCode::NoTableBodyColumnsDefined,
                Span::new(open.0, close.0),
                "No columns are defined in the table body",
            );
            return Some(body);
        }

        loop {
            let Some(token) = self.peek() else { break };
            match token.kind {
                TokenKind::ParenClose => {
                    body.close = self.eat_kind(TokenKind::ParenClose);
                    break;
                }
                TokenKind::Semicolon | TokenKind::Keyword(Keyword::As) => break,
                TokenKind::Comma => {
                    self.advance();
                    self.diagnose(
                        ErrorCode::UnexpectedComma,
                        token.id(),
                        "Unexpected comma, expected a table element",
                    );
                    continue;
                }
                _ => {}
            }

            let element = self.table_element();
            self.decide(|| format!("table element spans {:?}", element.span()));
            body.elements.push(element);

            let Some(next) = self.peek() else { break };
            match next.kind {
                TokenKind::Comma => {
                    self.advance();
                    if self.at_kind(TokenKind::ParenClose) {
                        self.diagnose(
                            ErrorCode::UnexpectedComma,
                            next.id(),
                            "Unexpected comma after the last table element",
                        );
                    }
                }
                TokenKind::ParenClose | TokenKind::Semicolon | TokenKind::Keyword(Keyword::As) => {}
                _ if next.kind.is_word() || next.kind.is_ident() => self.diagnose(
                    ErrorCode::MissingCommaSeparator,
                    next.id(),
                    format!("Missing comma before '{}'", next.text),
                ),
                _ => {
                    self.advance();
                    self.diagnose(
                        ErrorCode::InvalidTableElementToken,
                        next.id(),
                        format!("Unexpected '{}' in the table body", next.text),
                    );
                }
            }
        }

        Some(body)
    }

    fn table_element(&mut self) -> TableElement {
        if self.at_keyword(Keyword::Primary) {
            self.primary_key()
        } else if self.at_keyword(Keyword::Foreign) {
            self.foreign_key()
        } else {
            self.column()
        }
    }

    fn primary_key(&mut self) -> TableElement {
        let first = self.pos() as u32;
        self.advance();
        let mut complete = self.eat_keyword(Keyword::Key).is_some();
        let columns = if self.at_kind(TokenKind::ParenOpen) {
            let (columns, well_formed) = self.name_list();
            complete &= well_formed;
            columns
        } else {
            complete = false;
            Vec::new()
        };
        let span = Span::new(first, self.last_consumed());
        if !complete {
            self.diagnose(
                ErrorCode::IncompletePrimaryKey,
                span,
                "Incomplete primary key, expected PRIMARY KEY ( column, ... )",
            );
        }
        TableElement::PrimaryKey { columns, span }
    }

    fn foreign_key(&mut self) -> TableElement {
        let first = self.pos() as u32;
        self.advance();
        let mut complete = self.eat_keyword(Keyword::Key).is_some();
        let columns = if self.at_kind(TokenKind::ParenOpen) {
            let (columns, well_formed) = self.name_list();
            complete &= well_formed;
            columns
        } else {
            complete = false;
            Vec::new()
        };

        let mut ref_table = None;
        let mut ref_columns = Vec::new();
        match self.eat_keyword(Keyword::References) {
            Some(references) => {
                ref_table = self.eat_name();
                if ref_table.is_some()
                    && let Some(member) = self.qualified_member().filter(|m| m.is_name())
                {
                    self.advance();
                    self.advance();
                    ref_table = Some(member.id());
                }
                if self.at_kind(TokenKind::ParenOpen) {
                    let (names, well_formed) = self.name_list();
                    complete &= well_formed;
                    ref_columns = names;
                } else {
                    complete = false;
                }
                if ref_table.is_none() && ref_columns.is_empty() {
                    self.diagnose(
                        ErrorCode::MissingForeignKeyTableRef,
                        references,
                        "REFERENCES requires a table name and a column list",
                    );
                }
            }
            None => complete = false,
        }

        let span = Span::new(first, self.last_consumed());
        if !complete {
            self.diagnose(
                ErrorCode::IncompleteForeignKey,
                span,
                "Incomplete foreign key, expected FOREIGN KEY ( column, ... ) REFERENCES table ( column, ... )",
            );
        }
        TableElement::ForeignKey {
            columns,
            ref_table,
            ref_columns,
            span,
        }
    }

    fn column(&mut self) -> TableElement {
        let first = self.pos() as u32;
        let Some(name) = self.advance() else {
            return TableElement::Column {
                name: TokenId(first),
                data_type: None,
                constraints: Vec::new(),
                span: Span::single(first),
            };
        };

        match name.kind {
            TokenKind::QuotedIdent => {}
            _ if name.is_reserved() => self.diagnose(
                ErrorCode::ReservedColumnName,
                name.id(),
                format!("Column name '{}' is a reserved word and must be quoted", name.text),
            ),
            _ if name.is_non_reserved() => {
                if self.options.warn_non_reserved {
                    self.diagnose(
                        ErrorCode::NonReservedColumnName,
                        name.id(),
                        format!("Column name '{}' is a non-reserved keyword", name.text),
                    );
                }
            }
            _ if name.kind.is_word() => {}
            _ => {
                self.diagnose(
                    ErrorCode::InvalidColumnName,
                    name.id(),
                    format!("Invalid column name '{}'", name.text),
                );
                self.skip_until(|t| t.kind == TokenKind::Comma);
                return TableElement::Column {
                    name: name.id(),
                    data_type: None,
                    constraints: Vec::new(),
                    span: Span::new(first, self.last_consumed()),
                };
            }
        }

        let data_type = self
            .peek()
            .filter(|t| t.kind.is_word() && !is_modifier(t) && !t.is_keyword(Keyword::As))
            .map(|_| self.column_type());

        let mut constraints: Vec<ColumnConstraint> = Vec::new();
        while let Some(token) = self.peek() {
            if matches!(
                token.kind,
                TokenKind::Comma | TokenKind::ParenClose | TokenKind::Semicolon
            ) || token.is_keyword(Keyword::As)
            {
                break;
            }
            if !is_modifier(token) && (token.kind.is_word() || token.kind.is_ident()) {
                // another element without a separating comma
                break;
            }
            let Some(kind) = self.column_constraint() else {
                continue;
            };
            let span = Span::new(token.index, self.last_consumed());
            if constraints.iter().any(|c| c.kind == kind) {
                self.diagnose(
                    ErrorCode::DuplicateColumnProperty,
                    span,
                    format!("{kind} is already set for column '{}'", name.text),
                );
            } else {
                constraints.push(ColumnConstraint { kind, span });
            }
        }

        TableElement::Column {
            name: name.id(),
            data_type,
            constraints,
            span: Span::new(first, self.last_consumed()),
        }
    }

    fn column_type(&mut self) -> ColumnType {
        let first = self.pos() as u32;
        let name = TokenId(first);
        let word = self.advance().map(Token::lower).unwrap_or_default();
        let data_type = DataType::from_lower(&word);
        if data_type.is_none() {
            self.diagnose(
                ErrorCode::InvalidDatatype,
                name,
                format!("Unknown datatype '{}'", self.stream().text(name)),
            );
        }

        let mut args = Vec::new();
        if self.eat_kind(TokenKind::ParenOpen).is_some() {
            while let Some(token) = self.peek() {
                match token.kind {
                    TokenKind::ParenClose => {
                        self.advance();
                        break;
                    }
                    TokenKind::Semicolon | TokenKind::Keyword(Keyword::As) => break,
                    TokenKind::Comma => {
                        self.advance();
                    }
                    _ => {
                        self.advance();
                        match token.text.parse::<u32>() {
                            Ok(value) if token.kind == TokenKind::Number => args.push(value),
                            _ => self.diagnose(
                                ErrorCode::InvalidDatatypeLength,
                                token.id(),
                                format!("Datatype argument '{}' is not an integer", token.text),
                            ),
                        }
                    }
                }
            }
            if let Some(data_type) = data_type
                && args.len() > data_type.max_args()
            {
                self.diagnose(
                    ErrorCode::InvalidDatatypeLength,
                    Span::new(first, self.last_consumed()),
                    format!(
                        "Datatype '{data_type}' accepts at most {} argument(s)",
                        data_type.max_args()
                    ),
                );
            }
        }

        ColumnType {
            name,
            data_type,
            args,
        }
    }

    /// Consume one column modifier. Returns `None` after reporting a token
    /// that is not a valid modifier.
    fn column_constraint(&mut self) -> Option<ConstraintKind> {
        let token = self.peek()?;
        if token.kind == TokenKind::ParenOpen {
            self.skip_group();
            self.diagnose(
                ErrorCode::InvalidTableElementToken,
                Span::new(token.index, self.last_consumed()),
                "Unexpected parenthesized group in column definition",
            );
            return None;
        }
        self.advance();
        let kind = match token.kind {
            TokenKind::Keyword(Keyword::Not) => {
                if self.eat_keyword(Keyword::Null).is_none() {
                    self.diagnose(
                        ErrorCode::InvalidTableElementToken,
                        token.id(),
                        "Expected NULL after NOT",
                    );
                    return None;
                }
                ConstraintKind::NotNull
            }
            TokenKind::Keyword(Keyword::Null) => ConstraintKind::Null,
            TokenKind::Keyword(Keyword::Unique) => ConstraintKind::Unique,
            TokenKind::Keyword(Keyword::Index) => ConstraintKind::Index,
            TokenKind::Keyword(Keyword::AutoIncrement) => ConstraintKind::AutoIncrement,
            TokenKind::Keyword(Keyword::Primary) => {
                if self.eat_keyword(Keyword::Key).is_none() {
                    self.diagnose(
                        ErrorCode::InvalidTableElementToken,
                        token.id(),
                        "Expected KEY after PRIMARY",
                    );
                    return None;
                }
                ConstraintKind::PrimaryKey
            }
            TokenKind::Keyword(Keyword::Default) => {
                self.default_value();
                ConstraintKind::Default
            }
            TokenKind::Keyword(Keyword::Options) => {
                if self.skip_group().is_none() {
                    self.diagnose(
                        ErrorCode::InvalidTableElementToken,
                        token.id(),
                        "Expected ( ... ) after OPTIONS",
                    );
                }
                ConstraintKind::Options
            }
            _ => {
                self.diagnose(
                    ErrorCode::InvalidTableElementToken,
                    token.id(),
                    format!("Unexpected '{}' in column definition", token.text),
                );
                return None;
            }
        };
        Some(kind)
    }

    fn default_value(&mut self) {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::ParenOpen) => {
                self.skip_group();
            }
            Some(TokenKind::Other('-' | '+')) => {
                self.advance();
                self.eat_kind(TokenKind::Number);
            }
            Some(TokenKind::Comma | TokenKind::ParenClose | TokenKind::Semicolon) | None => {
                self.diagnose(
                    ErrorCode::InvalidTableElementToken,
                    Span::single(self.last_consumed()),
                    "Expected a value after DEFAULT",
                );
            }
            Some(_) => {
                self.advance();
            }
        }
    }
}
