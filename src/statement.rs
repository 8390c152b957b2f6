//! The parsed form of one CREATE VIEW statement.
//!
//! [`Statement::parse`] never fails: every problem is recorded as a
//! [`Diagnostic`] and parsing resynchronizes locally, so the returned
//! statement is always complete enough for outline, hover and completion.
crate::reexport!(parser);
crate::reexport!(table_body);
crate::reexport!(select);
crate::reexport!(from);
crate::reexport!(query);
crate::reexport!(render);
crate::reexport!(statement_tests, test);

use crate::*;
use itertools::Itertools;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep the list of parse decisions on the statement.
    pub trace: bool,
    /// Report non-reserved keywords used as view or column names.
    pub warn_non_reserved: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trace: false,
            warn_non_reserved: true,
        }
    }
}

impl From<&Config> for ParseOptions {
    fn from(config: &Config) -> Self {
        Self {
            trace: config.trace,
            warn_non_reserved: config.warn_non_reserved,
        }
    }
}

/// Result of analyzing one DDL text. Immutable once built.
#[derive(Debug, Clone)]
pub struct Statement {
    kind: StatementKind,
    tokens: TokenStream,
    view_name: Option<TokenId>,
    table_body: Option<TableBody>,
    options: Option<OpaqueExpr>,
    as_keyword: Option<TokenId>,
    query_expression: QueryExpression,
    terminator: Option<TokenId>,
    diagnostics: Vec<Diagnostic>,
    trace: Vec<TraceEvent>,
}

#[derive(Default)]
struct Parts {
    view_name: Option<TokenId>,
    table_body: Option<TableBody>,
    options: Option<OpaqueExpr>,
    as_keyword: Option<TokenId>,
    query_expression: QueryExpression,
    terminator: Option<TokenId>,
}

impl Statement {
    /// Parse with options taken from the environment configuration.
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &ParseOptions::from(config()))
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> Self {
        Self::from_stream(TokenStream::new(text), options)
    }

    /// Analyze tokens produced by any [`Lexer`].
    pub fn from_stream(tokens: TokenStream, options: &ParseOptions) -> Self {
        let mut report = Report::new(options.trace);
        let kind = tokens.classify();
        let parts = analyze(&tokens, *options, &mut report);
        let (diagnostics, trace) = report.into_parts();
        debug!(
            "Parsed {kind} statement of {} tokens with {} diagnostic(s)",
            tokens.len(),
            diagnostics.len()
        );
        Self {
            kind,
            tokens,
            view_name: parts.view_name,
            table_body: parts.table_body,
            options: parts.options,
            as_keyword: parts.as_keyword,
            query_expression: parts.query_expression,
            terminator: parts.terminator,
            diagnostics,
            trace,
        }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn view_name(&self) -> Option<&Token> {
        self.view_name.and_then(|id| self.tokens.token(id))
    }

    pub fn table_body(&self) -> Option<&TableBody> {
        self.table_body.as_ref()
    }

    /// Table-level `OPTIONS ( ... )` clause.
    pub fn options(&self) -> Option<OpaqueExpr> {
        self.options
    }

    pub fn query_expression(&self) -> &QueryExpression {
        &self.query_expression
    }

    pub fn terminator(&self) -> Option<&Token> {
        self.terminator.and_then(|id| self.tokens.token(id))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Parse decisions, empty unless tracing was enabled.
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Image of a token referenced by this statement.
    pub fn text(&self, id: TokenId) -> &str {
        self.tokens.text(id)
    }
}

/// Structural equality: same token sequence (positions ignored), same parse
/// tree and the same diagnostic codes in the same order.
impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.tokens.same_tokens(&other.tokens)
            && self.view_name == other.view_name
            && self.table_body == other.table_body
            && self.options == other.options
            && self.as_keyword == other.as_keyword
            && self.query_expression == other.query_expression
            && self.terminator == other.terminator
            && self
                .diagnostics
                .iter()
                .map(|d| d.code)
                .eq(other.diagnostics.iter().map(|d| d.code))
    }
}

impl Eq for Statement {}

fn analyze(tokens: &TokenStream, options: ParseOptions, report: &mut Report) -> Parts {
    let mut parts = Parts::default();
    if tokens.is_empty() {
        report.add(ErrorCode::EmptyStatement, Span::new(0, 0), "The statement is empty");
        return parts;
    }
    if tokens.classify() == StatementKind::Unsupported {
        let leading = tokens.iter().take(2).map(|t| t.text.as_str()).join(" ");
        report.add(
            ErrorCode::UnsupportedStatement,
            Span::new(0, tokens.last_index()),
            format!("Unsupported statement '{leading}', only CREATE VIEW is supported"),
        );
        return parts;
    }
    if let Some(index) = tokens.unbalanced_paren() {
        report.add(
            ErrorCode::UnbalancedParens,
            Span::single(index as u32),
            "Unbalanced parentheses",
        );
    }
    if let Some(index) = tokens.unbalanced_brace() {
        report.add(
            ErrorCode::UnbalancedBraces,
            Span::single(index as u32),
            "Unbalanced braces",
        );
    }

    let mut parser = Parser::new(tokens, report, options, 2);
    parts.view_name = parser.view_name();
    if parser.at_kind(TokenKind::ParenOpen) {
        parts.table_body = parser.table_body();
    }
    if parser.at_keyword(Keyword::Options) {
        let first = parser.pos() as u32;
        parser.advance();
        parser.skip_group();
        parts.options = Some(OpaqueExpr {
            span: Span::new(first, parser.last_consumed()),
        });
    }

    if !parser.at_keyword(Keyword::As) && !parser.at_query_end() {
        parser.skip_to_as();
    }
    match parser.eat_keyword(Keyword::As) {
        Some(as_keyword) => {
            parts.as_keyword = Some(as_keyword);
            let declared = parts
                .table_body
                .as_ref()
                .map(TableBody::column_count)
                .filter(|n| *n > 0);
            parts.query_expression = parser.query_expression(declared);
        }
        // A single missing-AS report; earlier problems already explain it.
        None if parser.report().is_empty() => {
            let here = parser.here();
            parser.diagnose(
                ErrorCode::IncompleteCreateView,
                Span::single(here),
                "Incomplete CREATE VIEW statement, expected AS SELECT ...",
            );
        }
        None => {}
    }

    parts.terminator = parser.eat_kind(TokenKind::Semicolon);
    if !parser.is_eof() {
        let first = parser.pos() as u32;
        let text = parser.peek().map(|t| t.text.clone()).unwrap_or_default();
        parser.diagnose(
            ErrorCode::UnexpectedToken,
            Span::new(first, tokens.last_index()),
            format!("Unexpected '{text}' after the end of the statement"),
        );
    }
    parts
}

impl Parser<'_> {
    /// The view name after `CREATE VIEW`.
    fn view_name(&mut self) -> Option<TokenId> {
        let Some(token) = self.peek() else {
            let span = Span::new(0, self.stream().last_index());
            let message = if self.stream().len() < 2 {
                "Expected VIEW after CREATE"
            } else {
                "Expected a view name after CREATE VIEW"
            };
            self.diagnose(ErrorCode::IncompleteCreateView, span, message);
            return None;
        };
        match token.kind {
            TokenKind::QuotedIdent | TokenKind::StringLiteral => {}
            TokenKind::ParenOpen => {
                self.diagnose(ErrorCode::InvalidViewName, token.id(), "Missing view name");
                return None;
            }
            _ if token.is_reserved() => self.diagnose(
                ErrorCode::ReservedViewName,
                token.id(),
                format!("View name '{}' is a reserved word and must be quoted", token.text),
            ),
            _ if token.is_non_reserved() => {
                if self.options.warn_non_reserved {
                    self.diagnose(
                        ErrorCode::NonReservedViewName,
                        token.id(),
                        format!("View name '{}' is a non-reserved keyword", token.text),
                    );
                }
            }
            _ if token.kind.is_word() => {}
            _ => {
                self.advance();
                self.diagnose(
                    ErrorCode::InvalidViewName,
                    token.id(),
                    format!("Invalid view name '{}'", token.text),
                );
                return None;
            }
        }
        self.advance();
        self.decide(|| format!("view name '{}'", token.text));
        Some(token.id())
    }

    /// Skip ahead to an `AS` at paren depth zero, reporting what was skipped.
    /// Leaves the position unchanged when there is no such `AS`.
    fn skip_to_as(&mut self) {
        let start = self.pos();
        let mut depth = 0usize;
        let target = self.stream().tokens()[start..].iter().position(|t| {
            match t.kind {
                TokenKind::ParenOpen => depth += 1,
                TokenKind::ParenClose => depth = depth.saturating_sub(1),
                _ => {}
            }
            depth == 0 && t.is_keyword(Keyword::As)
        });
        let Some(offset) = target else { return };
        let first = start as u32;
        let last = (start + offset - 1) as u32;
        let text = self.peek().map(|t| t.text.clone()).unwrap_or_default();
        self.diagnose(
            ErrorCode::UnexpectedToken,
            Span::new(first, last),
            format!("Unexpected '{text}', expected AS"),
        );
        for _ in 0..offset {
            self.advance();
        }
    }
}
