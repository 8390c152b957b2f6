//! Which part of a CREATE VIEW statement the editor cursor is in.
crate::reexport!(context_tests, test);

use crate::*;
use derive_more::Display;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Context {
    #[display("SELECT_COLUMN")]
    SelectColumn,
    #[display("FROM_CLAUSE")]
    FromClause,
    #[display("TABLE_ALIAS")]
    TableAlias,
    #[display("WHERE_CLAUSE")]
    WhereClause,
    #[display("WHERE_CLAUSE_TABLE_ALIAS")]
    WhereClauseTableAlias,
    #[display("QUERY_EXPRESSION")]
    QueryExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Select,
    From,
    Where,
}

impl Statement {
    pub fn context_at(&self, position: Position) -> Context {
        context_at(self, self.tokens(), position)
    }
}

/// Resolve the completion context at `position`. Pure over the already
/// parsed statement and its tokens.
pub fn context_at(statement: &Statement, tokens: &TokenStream, position: Position) -> Context {
    let Some(index) = tokens.token_at(position) else {
        return Context::QueryExpression;
    };
    let aliases: HashSet<String> = statement
        .query_expression()
        .table_symbols()
        .into_iter()
        .filter_map(|symbol| symbol.alias)
        .map(|alias| tokens.text(alias.name).to_ascii_lowercase())
        .collect();

    if let Some(dot) = alias_dot(tokens, index, position, &aliases) {
        let context = match enclosing_clause(tokens, dot) {
            Some(Clause::Where) => Context::WhereClauseTableAlias,
            _ => Context::TableAlias,
        };
        trace!("Cursor {position} follows an alias dot at token {dot}: {context}");
        return context;
    }

    let context = match enclosing_clause(tokens, index) {
        Some(Clause::Select) => Context::SelectColumn,
        Some(Clause::From) => {
            let token = &tokens.tokens()[index];
            let is_alias = statement
                .query_expression()
                .table_symbols()
                .iter()
                .any(|symbol| symbol.alias.is_some_and(|a| a.name == token.id()));
            // whitespace after a complete `table alias` leaves the FROM list;
            // the cursor may rest right after the alias when the text goes on
            let past_alias = token.end() < position
                || (token.end() == position && position < tokens.end());
            if is_alias && past_alias {
                Context::QueryExpression
            } else {
                Context::FromClause
            }
        }
        Some(Clause::Where) => Context::WhereClause,
        None => Context::QueryExpression,
    };
    trace!("Cursor {position} at token {index}: {context}");
    context
}

/// Index of a `.` ending exactly at the cursor and directly preceded by a
/// known table alias.
fn alias_dot(
    tokens: &TokenStream,
    index: usize,
    position: Position,
    aliases: &HashSet<String>,
) -> Option<usize> {
    let dot = [Some(index), index.checked_sub(1)]
        .into_iter()
        .flatten()
        .find(|&i| {
            tokens
                .get(i)
                .is_some_and(|t| t.kind == TokenKind::Dot && t.end() == position)
        })?;
    let dot_token = tokens.get(dot)?;
    let owner = tokens.get(dot.checked_sub(1)?)?;
    (owner.touches(dot_token) && aliases.contains(&owner.lower())).then_some(dot)
}

/// Walk backward from `index` to the nearest clause keyword outside any
/// parenthesized group closed before the cursor. Parentheses still open at
/// the cursor (function calls, WITH bodies) are walked through.
fn enclosing_clause(tokens: &TokenStream, index: usize) -> Option<Clause> {
    let mut depth = 0usize;
    for token in tokens.tokens()[..=index].iter().rev() {
        match token.kind {
            TokenKind::ParenClose => depth += 1,
            TokenKind::ParenOpen => depth = depth.saturating_sub(1),
            TokenKind::Keyword(kw) if depth == 0 => match kw {
                Keyword::Select => return Some(Clause::Select),
                Keyword::From => return Some(Clause::From),
                Keyword::Where => return Some(Clause::Where),
                _ if kw.is_terminator() => return None,
                _ => {}
            },
            _ => {}
        }
    }
    None
}
