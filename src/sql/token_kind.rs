//! Token kind definitions for the lenient DDL lexer.
//!
//! Each `TokenKind` variant represents a lexical atom discovered during the
//! scanning phase. Anything unrecognized becomes `Other(char)`, so lexing
//! never fails. The original token image lives on the `Token` itself.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Table / alias / column / generic identifier.
    Ident,
    /// Double-quoted identifier, quotes included in the image.
    QuotedIdent,
    /// Single-quoted string literal, quotes included in the image.
    StringLiteral,
    /// Unsigned integer or decimal number.
    Number,
    /// Recognized grammar keyword.
    Keyword(Keyword),
    Comma,
    Dot,
    ParenOpen,
    ParenClose,
    Semicolon,
    Star,
    /// Any other single symbol we do not specially classify.
    Other(char),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Convenience: returns true for plain and quoted identifiers.
    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::QuotedIdent)
    }

    /// True for unquoted words, whether or not they are grammar keywords.
    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::Keyword(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::StringLiteral)
    }

    /// Returns true if this token is punctuation or an unclassified symbol.
    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::ParenOpen
                | TokenKind::ParenClose
                | TokenKind::Semicolon
                | TokenKind::Star
                | TokenKind::Other(_)
        )
    }
}
