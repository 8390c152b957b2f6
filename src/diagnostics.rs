//! Structured parse problems and the report that collects them.
//!
//! A [`Report`] is owned by a single parse call and passed by `&mut` through
//! every parser. It only ever grows: diagnostics are appended in detection
//! order and never removed or deduplicated.
use crate::*;
use derive_more::{Display, From};
use std::fmt;

/// Closed set of problems the analyzer can detect.
///
/// `Display` yields the stable machine-readable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorCode {
    #[display("EMPTY_STATEMENT")]
    EmptyStatement,
    #[display("UNSUPPORTED_STATEMENT")]
    UnsupportedStatement,
    #[display("INCOMPLETE_CREATE_VIEW")]
    IncompleteCreateView,
    #[display("VIEW_NAME_RESERVED_WORD")]
    ReservedViewName,
    #[display("VIEW_NAME_NON_RESERVED_WORD")]
    NonReservedViewName,
    #[display("INVALID_VIEW_NAME")]
    InvalidViewName,
    #[display("UNBALANCED_PARENS")]
    UnbalancedParens,
    #[display("UNBALANCED_BRACES")]
    UnbalancedBraces,
    #[display("NO_TABLE_BODY_COLUMNS_DEFINED")]
    NoTableBodyColumnsDefined,
    #[display("COLUMN_NAME_RESERVED_WORD")]
    ReservedColumnName,
    #[display("COLUMN_NAME_NON_RESERVED_WORD")]
    NonReservedColumnName,
    #[display("INVALID_COLUMN_NAME")]
    InvalidColumnName,
    #[display("INVALID_DATATYPE")]
    InvalidDatatype,
    #[display("INVALID_DATATYPE_LENGTH")]
    InvalidDatatypeLength,
    #[display("DUPLICATE_COLUMN_PROPERTY")]
    DuplicateColumnProperty,
    #[display("INVALID_TABLE_ELEMENT_TOKEN")]
    InvalidTableElementToken,
    #[display("INCOMPLETE_PRIMARY_KEY")]
    IncompletePrimaryKey,
    #[display("INCOMPLETE_FOREIGN_KEY")]
    IncompleteForeignKey,
    #[display("MISSING_FK_TABLE_REF")]
    MissingForeignKeyTableRef,
    #[display("MISSING_COMMA_SEPARATOR")]
    MissingCommaSeparator,
    #[display("INCOMPLETE_WITH_ELEMENT")]
    IncompleteWithElement,
    #[display("NO_SELECT_CLAUSE")]
    NoSelectClause,
    #[display("MISSING_FROM_KEYWORD")]
    MissingFromKeyword,
    #[display("UNEXPECTED_COMMA")]
    UnexpectedComma,
    #[display("INVALID_TOKEN")]
    InvalidToken,
    #[display("INVALID_COLUMN_MISSING_COMMA")]
    InvalidColumnMissingComma,
    #[display("INCOMPLETE_SCHEMA_REF")]
    IncompleteSchemaRef,
    #[display("INVALID_ALIAS")]
    InvalidAlias,
    #[display("PROJECTED_SYMBOLS_VIEW_COLUMNS_MISMATCH")]
    ProjectedSymbolsViewColumnsMismatch,
    #[display("UNEXPECTED_TOKEN")]
    UnexpectedToken,
}

impl ErrorCode {
    pub const fn severity(self) -> Severity {
        match self {
            ErrorCode::NonReservedViewName | ErrorCode::NonReservedColumnName => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Severity {
    #[display("error")]
    Error,
    #[display("warning")]
    Warning,
}

/// Inclusive range of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, From)]
pub struct Span {
    pub first: u32,
    pub last: u32,
}

impl Span {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub const fn single(index: u32) -> Self {
        Self::new(index, index)
    }

    pub const fn contains(&self, index: u32) -> bool {
        self.first <= index && index <= self.last
    }
}

impl From<u32> for Span {
    fn from(index: u32) -> Self {
        Span::single(index)
    }
}

impl From<TokenId> for Span {
    fn from(id: TokenId) -> Self {
        Span::single(id.0)
    }
}

impl From<Span> for (u32, u32) {
    fn from(span: Span) -> Self {
        (span.first, span.last)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub code: ErrorCode,
    pub span: Span,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Editor range covered by the diagnostic; empty at the origin for an
    /// empty stream.
    pub fn range(&self, tokens: &TokenStream) -> Range {
        let start = tokens
            .get(self.span.first as usize)
            .map(Token::start)
            .unwrap_or_default();
        let end = tokens
            .get(self.span.last as usize)
            .map(Token::end)
            .unwrap_or(start);
        Range::new(start, end)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity(), self.code, self.message)
    }
}

/// One recorded parse decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub token_index: u32,
    pub decision: String,
}

/// Append-only collector shared by the parsers of one statement.
#[derive(Debug, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
    trace: Option<Vec<TraceEvent>>,
}

impl Report {
    pub fn new(trace: bool) -> Self {
        Self {
            diagnostics: Vec::new(),
            trace: trace.then(Vec::new),
        }
    }

    pub fn add(&mut self, code: ErrorCode, span: impl Into<Span>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            message: message.into(),
            code,
            span: span.into(),
        };
        debug!(
            "Diagnostic {} at tokens {}..={}: {}",
            diagnostic.code, diagnostic.span.first, diagnostic.span.last, diagnostic.message
        );
        self.decide(diagnostic.span.first, || format!("report {}", diagnostic.code));
        self.diagnostics.push(diagnostic);
    }

    /// Log a parse decision and keep it when tracing is enabled. The message
    /// is only built when someone listens.
    pub fn decide(&mut self, token_index: u32, decision: impl FnOnce() -> String) {
        let enabled = tracing::enabled!(tracing::Level::TRACE);
        if !enabled && self.trace.is_none() {
            return;
        }
        let decision = decision();
        trace!("[{token_index}] {decision}");
        if let Some(events) = self.trace.as_mut() {
            events.push(TraceEvent {
                token_index,
                decision,
            });
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has(&self, code: ErrorCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn into_parts(self) -> (Vec<Diagnostic>, Vec<TraceEvent>) {
        (self.diagnostics, self.trace.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_append_only_and_ordered() {
        let mut report = Report::new(false);
        report.add(ErrorCode::UnexpectedComma, (3u32, 3u32), "first");
        report.add(ErrorCode::UnexpectedComma, TokenId(5), "second");
        assert_eq!(report.len(), 2);
        assert_eq!(report.diagnostics()[1].span, Span::single(5));
        assert!(report.has(ErrorCode::UnexpectedComma));
        let (diagnostics, trace) = report.into_parts();
        assert_eq!(diagnostics[0].message, "first");
        assert!(trace.is_empty());
    }

    #[test]
    fn trace_records_only_when_enabled() {
        let mut report = Report::new(true);
        report.decide(2, || "enter select clause".to_string());
        report.add(ErrorCode::MissingFromKeyword, Span::new(4, 4), "missing FROM");
        let (_, trace) = report.into_parts();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].decision, "enter select clause");
        assert_eq!(trace[1].decision, "report MISSING_FROM_KEYWORD");
    }

    #[test]
    fn severity_follows_code() {
        assert_eq!(ErrorCode::NonReservedColumnName.severity(), Severity::Warning);
        assert_eq!(ErrorCode::ReservedViewName.severity(), Severity::Error);
        assert_eq!(ErrorCode::IncompleteForeignKey.to_string(), "INCOMPLETE_FOREIGN_KEY");
    }

    #[test]
    fn range_spans_first_to_last_token() {
        let tokens = TokenStream::new("SELECT a1. c1");
        let diagnostic = Diagnostic {
            message: String::new(),
            code: ErrorCode::IncompleteSchemaRef,
            span: Span::new(1, 2),
        };
        assert_eq!(
            diagnostic.range(&tokens),
            Range::new(Position::new(0, 7), Position::new(0, 10))
        );
    }
}
