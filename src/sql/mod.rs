//! Lenient DDL tokenization and the token arena the parsers work on.
//!
//! Modules:
//! - `keyword`    : Grammar keywords plus the reserved / non-reserved word lists.
//! - `token_kind` : Classification of lexical atoms.
//! - `token`      : Token struct pairing a `TokenKind` with its image and position.
//! - `tokenizer`  : The `Lexer` contract and the built-in single pass lexer.
//! - `stream`     : `TokenStream` arena and statement classification.
//! - `datatype`   : Column types accepted in a table body.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid DDL (robust for live editing).
//! 2. Preserve original images, quoting included, for display and rendering.
//! 3. Reference tokens by index; never copy them into parse results.

mod datatype;
mod keyword;
mod stream;
mod token;
mod token_kind;
mod tokenizer;

pub use datatype::DataType;
pub use keyword::{Keyword, is_non_reserved_word, is_reserved_word};
pub use stream::{StatementKind, TokenStream, classify};
pub use token::{Token, TokenId};
pub use token_kind::TokenKind;
pub use tokenizer::{DdlLexer, Lexer, tokenize};

/// Convenience prelude re-exporting the most commonly used items.
pub mod prelude {
    pub use super::{Keyword, Token, TokenId, TokenKind, TokenStream, tokenize};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_and_access() {
        let stream = TokenStream::new("CREATE VIEW v AS SELECT col FROM tbl");
        assert!(stream.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(stream.iter().any(|t| t.ident() == Some("col")));
        assert_eq!(stream.classify(), StatementKind::CreateView);
    }

    #[test]
    fn prelude_import_works() {
        use super::prelude::*;
        let toks = tokenize("FROM X");
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(toks.iter().any(|t| t.ident() == Some("X")));
    }
}
