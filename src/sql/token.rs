//! Token model tying a `TokenKind` to its verbatim image and source position.
//!
//! Tokens are owned by a [`TokenStream`](crate::TokenStream) and referenced
//! everywhere else through a [`TokenId`]. Lines and columns are 0-based and
//! columns count characters, not bytes.
use crate::cursor::Position;
use crate::sql::{keyword::Keyword, token_kind::TokenKind};
use derive_more::{Display, From, Into};

/// Index of a token inside the stream that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct TokenId(pub u32);

impl TokenId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A lexical token.
///
/// Invariants:
/// - `text` is the exact image from the input, quotes included
/// - `index` is the token's position in its owning stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub index: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32, index: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
            index,
        }
    }

    pub const fn id(&self) -> TokenId {
        TokenId(self.index)
    }

    /// Returns true if this token represents a given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    /// Returns the identifier text if this token is a plain or quoted identifier.
    pub fn ident(&self) -> Option<&str> {
        self.kind.is_ident().then_some(self.text.as_str())
    }

    pub fn lower(&self) -> String {
        self.text.to_ascii_lowercase()
    }

    /// True when the token may stand for a name without quoting: identifiers
    /// that are not reserved words, quoted identifiers and non-reserved keywords.
    pub fn is_name(&self) -> bool {
        match self.kind {
            TokenKind::QuotedIdent => true,
            TokenKind::Ident => !super::is_reserved_word(&self.lower()),
            TokenKind::Keyword(kw) => !kw.is_reserved(),
            _ => false,
        }
    }

    /// True for unquoted words that are reserved, keyword or not.
    pub fn is_reserved(&self) -> bool {
        self.kind.is_word() && super::is_reserved_word(&self.lower())
    }

    pub fn is_non_reserved(&self) -> bool {
        self.kind.is_word() && super::is_non_reserved_word(&self.lower())
    }

    pub const fn start(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Position just past the last character of the token.
    pub fn end(&self) -> Position {
        let mut end = self.start();
        for c in self.text.chars() {
            if c == '\n' {
                end = Position::new(end.line + 1, 0);
            } else {
                end.character += 1;
            }
        }
        end
    }

    /// True when `next` begins exactly where this token ends.
    pub fn touches(&self, next: &Token) -> bool {
        self.end() == next.start()
    }

    /// Same kind and, for anything but keywords, the same image. Keywords
    /// compare case-insensitively through their kind.
    pub fn same_as(&self, other: &Token) -> bool {
        self.kind == other.kind
            && (matches!(self.kind, TokenKind::Keyword(_)) || self.text == other.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_counts_characters() {
        let t = Token::new(TokenKind::StringLiteral, "'über'", 2, 4, 0);
        assert_eq!(t.end(), Position::new(2, 10));
    }

    #[test]
    fn names_and_reserved_words() {
        assert!(Token::new(TokenKind::Ident, "contact", 0, 0, 0).is_name());
        assert!(!Token::new(TokenKind::Ident, "string", 0, 0, 0).is_name());
        assert!(Token::new(TokenKind::Ident, "string", 0, 0, 0).is_reserved());
        assert!(Token::new(TokenKind::Keyword(Keyword::Key), "key", 0, 0, 0).is_name());
        assert!(Token::new(TokenKind::Keyword(Keyword::Key), "key", 0, 0, 0).is_non_reserved());
        assert!(!Token::new(TokenKind::Keyword(Keyword::View), "view", 0, 0, 0).is_name());
        assert!(Token::new(TokenKind::QuotedIdent, "\"view\"", 0, 0, 0).is_name());
    }

    #[test]
    fn keywords_compare_without_case() {
        let a = Token::new(TokenKind::Keyword(Keyword::Select), "select", 0, 0, 0);
        let b = Token::new(TokenKind::Keyword(Keyword::Select), "SELECT", 3, 7, 0);
        assert!(a.same_as(&b));
        let c = Token::new(TokenKind::Ident, "Foo", 0, 0, 1);
        let d = Token::new(TokenKind::Ident, "foo", 0, 0, 1);
        assert!(!c.same_as(&d));
    }

    #[test]
    fn touching_tokens() {
        let a = Token::new(TokenKind::Ident, "t1", 0, 4, 0);
        let dot = Token::new(TokenKind::Dot, ".", 0, 6, 1);
        let far = Token::new(TokenKind::Ident, "id", 0, 8, 2);
        assert!(a.touches(&dot));
        assert!(!dot.touches(&far));
    }
}
