use super::*;
use std::fmt;

impl Statement {
    /// Render the statement back to DDL text.
    ///
    /// Keywords come out upper-cased and whitespace collapses to single
    /// spaces; tokens that touched in the source stay glued so qualified
    /// names keep their shape. Re-parsing the result yields an equal
    /// statement.
    pub fn to_text(&self) -> String {
        render_tokens(self.tokens.tokens())
    }

    /// Text covered by `span`, rendered like [`Statement::to_text`].
    pub fn span_text(&self, span: Span) -> String {
        render_tokens(self.tokens.slice(span.first, span.last))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens {
        if previous.is_some_and(|p| !p.touches(token)) {
            out.push(' ');
        }
        match token.kind {
            TokenKind::Keyword(kw) => out.push_str(kw.as_str()),
            _ => out.push_str(&token.text),
        }
        previous = Some(token);
    }
    out
}
