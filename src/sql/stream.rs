use crate::cursor::Position;
use crate::sql::{
    keyword::Keyword,
    token::{Token, TokenId},
    token_kind::TokenKind,
    tokenizer::{DdlLexer, Lexer},
};
use crate::*;
use derive_more::Display;
use itertools::Itertools;

/// Statement kinds recognized from the leading tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StatementKind {
    #[display("CREATE VIEW")]
    CreateView,
    #[display("unsupported")]
    Unsupported,
}

/// Classify a statement by its leading tokens, case-insensitively.
pub fn classify(tokens: &[Token]) -> StatementKind {
    match tokens {
        [create, view, ..] if create.is_keyword(Keyword::Create) && view.is_keyword(Keyword::View) => {
            StatementKind::CreateView
        }
        // still being typed
        [create] if create.is_keyword(Keyword::Create) => StatementKind::CreateView,
        _ => StatementKind::Unsupported,
    }
}

/// The token arena for a single input text.
///
/// Tokens are appended once, in source order, and never re-ordered; every
/// other structure refers to them by [`TokenId`].
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Position just past the last character of the input.
    end: Position,
}

impl TokenStream {
    /// Tokenize `text` with the built-in lexer.
    pub fn new(text: &str) -> Self {
        Self::with_lexer(text, &DdlLexer)
    }

    pub fn with_lexer(text: &str, lexer: &impl Lexer) -> Self {
        let end = text.chars().fold(Position::default(), |end, c| match c {
            '\n' => Position::new(end.line + 1, 0),
            _ => Position::new(end.line, end.character + 1),
        });
        Self {
            end,
            ..Self::from_tokens(lexer.tokenize(text))
        }
    }

    /// Adopt tokens produced elsewhere, re-numbering them in order. Without
    /// the source text the input is taken to end with the last token.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| Token {
                index: index as u32,
                ..token
            })
            .collect_vec();
        trace!("Token stream holds {} tokens", tokens.len());
        let end = tokens.last().map(Token::end).unwrap_or_default();
        Self { tokens, end }
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    /// Image of the token, or an empty string for a dangling id.
    pub fn text(&self, id: TokenId) -> &str {
        self.token(id).map(|t| t.text.as_str()).unwrap_or_default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn last_index(&self) -> u32 {
        self.tokens.len().saturating_sub(1) as u32
    }

    pub fn classify(&self) -> StatementKind {
        classify(&self.tokens)
    }

    /// Tokens `first..=last`, clamped to the stream.
    pub fn slice(&self, first: u32, last: u32) -> &[Token] {
        let end = (last as usize + 1).min(self.tokens.len());
        let start = (first as usize).min(end);
        &self.tokens[start..end]
    }

    /// Index of the token under `position`: the last one starting at or
    /// before it.
    pub fn token_at(&self, position: Position) -> Option<usize> {
        self.tokens.iter().rposition(|t| t.start() <= position)
    }

    /// True when both streams hold the same token sequence, ignoring positions.
    pub fn same_tokens(&self, other: &TokenStream) -> bool {
        self.tokens.len() == other.tokens.len()
            && self.tokens.iter().zip(&other.tokens).all(|(a, b)| a.same_as(b))
    }

    /// Index of the first unmatched `)` or, when parentheses never go
    /// negative, the first `(` left open.
    pub fn unbalanced_paren(&self) -> Option<usize> {
        self.first_unbalanced(|k| k == TokenKind::ParenOpen, |k| k == TokenKind::ParenClose)
    }

    /// Same as [`TokenStream::unbalanced_paren`] for `{` and `}`.
    pub fn unbalanced_brace(&self) -> Option<usize> {
        self.first_unbalanced(|k| k == TokenKind::Other('{'), |k| k == TokenKind::Other('}'))
    }

    fn first_unbalanced(
        &self,
        opens: impl Fn(TokenKind) -> bool,
        closes: impl Fn(TokenKind) -> bool,
    ) -> Option<usize> {
        let mut open = Vec::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if opens(token.kind) {
                open.push(i);
            } else if closes(token.kind) && open.pop().is_none() {
                return Some(i);
            }
        }
        open.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CREATE VIEW v AS SELECT 1", StatementKind::CreateView)]
    #[case("create view v", StatementKind::CreateView)]
    #[case("CrEaTe ViEw", StatementKind::CreateView)]
    #[case("CREATE TABLE t (a string)", StatementKind::Unsupported)]
    #[case("SELECT * FROM t", StatementKind::Unsupported)]
    #[case("CREATE", StatementKind::CreateView)]
    #[case("", StatementKind::Unsupported)]
    fn classifies_leading_tokens(#[case] text: &str, #[case] expected: StatementKind) {
        assert_eq!(TokenStream::new(text).classify(), expected);
    }

    #[test]
    fn from_tokens_renumbers() {
        let tokens = vec![
            Token::new(TokenKind::Ident, "a", 0, 0, 7),
            Token::new(TokenKind::Comma, ",", 0, 1, 7),
        ];
        let stream = TokenStream::from_tokens(tokens);
        assert_eq!(stream.get(1).map(|t| t.index), Some(1));
        assert_eq!(stream.text(TokenId(0)), "a");
        assert_eq!(stream.text(TokenId(9)), "");
    }

    #[rstest]
    #[case("( a ( b ) )", None)]
    #[case("( a ( b )", Some(0))]
    #[case("a ) (", Some(1))]
    fn finds_unbalanced_parens(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(TokenStream::new(text).unbalanced_paren(), expected);
    }

    #[rstest]
    #[case("{ a { b } }", None)]
    #[case("a } {", Some(1))]
    #[case("{ ( }", Some(0))]
    fn finds_unbalanced_braces(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(TokenStream::new(text).unbalanced_brace(), expected);
    }

    #[test]
    fn token_at_uses_token_starts() {
        let stream = TokenStream::new("  SELECT t2.");
        assert_eq!(stream.token_at(Position::new(0, 1)), None);
        assert_eq!(stream.token_at(Position::new(0, 2)), Some(0));
        assert_eq!(stream.token_at(Position::new(0, 10)), Some(1));
        assert_eq!(stream.token_at(Position::new(0, 11)), Some(2));
        assert_eq!(stream.token_at(Position::new(3, 0)), Some(2));
    }

    #[rstest]
    #[case("a b", Position::new(0, 3))]
    #[case("a b  ", Position::new(0, 5))]
    #[case("a\nbc -- note\n", Position::new(2, 0))]
    #[case("", Position::new(0, 0))]
    fn end_follows_the_source_text(#[case] text: &str, #[case] expected: Position) {
        assert_eq!(TokenStream::new(text).end(), expected);
    }

    #[test]
    fn from_tokens_ends_with_the_last_token() {
        let stream = TokenStream::from_tokens(vec![Token::new(TokenKind::Ident, "abc", 1, 2, 0)]);
        assert_eq!(stream.end(), Position::new(1, 5));
    }

    #[test]
    fn slices_are_clamped() {
        let stream = TokenStream::new("a b c");
        assert_eq!(stream.slice(1, 9).len(), 2);
        assert!(stream.slice(5, 9).is_empty());
    }
}
