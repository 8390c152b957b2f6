use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};

/// Source of positioned tokens for one input text.
///
/// Any lexer honoring the contract can feed the parsers: tokens in source
/// order, 0-based lines and character columns, images preserved verbatim
/// (quotes included).
pub trait Lexer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// The built-in lenient lexer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdlLexer;

impl Lexer for DdlLexer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text)
    }
}

/// Lenient DDL tokenizer producing a flat stream of `Token`s.
///
/// Behavior:
/// - Skips whitespace, `-- line` and `/* block */` comments.
/// - Aggregates `[A-Za-z_][A-Za-z0-9_]*` runs into words, preserving case, and
///   lifts grammar keywords into `TokenKind::Keyword`.
/// - Keeps `"quoted"` identifiers and `'string'` literals whole, doubled
///   quotes included. An unterminated quote runs to the end of input.
/// - Numbers are digit runs with an optional fractional part.
/// - Everything else is a one-character token.
///
/// Guarantees:
/// - Never panics and never fails; malformed input still yields tokens.
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    let (mut line, mut column) = (0u32, 0u32);

    // Advances over `chars[from..to]`, keeping line/column in step.
    let step = |from: usize, to: usize, line: &mut u32, column: &mut u32| {
        for &c in &chars[from..to] {
            if c == '\n' {
                *line += 1;
                *column = 0;
            } else {
                *column += 1;
            }
        }
    };

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let (start_line, start_column) = (line, column);

        if c.is_whitespace() {
            i += 1;
            step(start, i, &mut line, &mut column);
            continue;
        }

        if c == '-' && chars.get(i + 1) == Some(&'-') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            step(start, i, &mut line, &mut column);
            continue;
        }

        if c == '/' && chars.get(i + 1) == Some(&'*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            i = (i + 2).min(chars.len());
            step(start, i, &mut line, &mut column);
            continue;
        }

        let kind = if c.is_ascii_alphabetic() || c == '_' {
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let lower: String = chars[start..i].iter().collect::<String>().to_ascii_lowercase();
            Keyword::from_lower(&lower)
                .map(TokenKind::Keyword)
                .unwrap_or(TokenKind::Ident)
        } else if c.is_ascii_digit() {
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if chars.get(i) == Some(&'.') && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()) {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            TokenKind::Number
        } else if c == '\'' || c == '"' {
            i = scan_quoted(&chars, i, c);
            if c == '\'' {
                TokenKind::StringLiteral
            } else {
                TokenKind::QuotedIdent
            }
        } else {
            i += 1;
            match c {
                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                '(' => TokenKind::ParenOpen,
                ')' => TokenKind::ParenClose,
                ';' => TokenKind::Semicolon,
                '*' => TokenKind::Star,
                other => TokenKind::Other(other),
            }
        };

        let image: String = chars[start..i].iter().collect();
        step(start, i, &mut line, &mut column);
        let index = out.len() as u32;
        out.push(Token::new(kind, image, start_line, start_column, index));
    }

    out
}

/// Returns the index just past the closing `quote`, treating a doubled quote
/// as an escape.
fn scan_quoted(chars: &[char], open: usize, quote: char) -> usize {
    let mut i = open + 1;
    while i < chars.len() {
        if chars[i] == quote {
            if chars.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::keyword::Keyword;
    use crate::sql::token_kind::TokenKind;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn basic_statement_sequence() {
        let toks = tokenize("CREATE VIEW abcd ( id ) AS SELECT id FROM t;");
        assert_eq!(toks.len(), 12);
        assert!(toks[0].is_keyword(Keyword::Create));
        assert!(toks[1].is_keyword(Keyword::View));
        assert_eq!(toks[2].ident(), Some("abcd"));
        assert_eq!(toks[11].kind, TokenKind::Semicolon);
        assert!(toks.iter().enumerate().all(|(i, t)| t.index as usize == i));
    }

    #[test]
    fn preserves_case_and_positions() {
        let toks = tokenize("Select\n  MyCol");
        assert!(toks[0].is_keyword(Keyword::Select));
        assert_eq!(toks[0].text, "Select");
        assert_eq!((toks[1].line, toks[1].column), (1, 2));
        assert_eq!(toks[1].text, "MyCol");
    }

    #[test]
    fn quoted_tokens_keep_their_quotes() {
        let toks = tokenize(r#"SELECT 'it''s', "view" FROM x"#);
        assert_eq!(toks[1].kind, TokenKind::StringLiteral);
        assert_eq!(toks[1].text, "'it''s'");
        assert_eq!(toks[3].kind, TokenKind::QuotedIdent);
        assert_eq!(toks[3].text, "\"view\"");
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let toks = tokenize("SELECT 'abc");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[1].text, "'abc");
    }

    #[test]
    fn numbers_and_qualified_names() {
        assert_eq!(
            kinds("1.5 t1.price"),
            vec![TokenKind::Number, TokenKind::Ident, TokenKind::Dot, TokenKind::Ident]
        );
        assert_eq!(kinds("2."), vec![TokenKind::Number, TokenKind::Dot]);
    }

    #[test]
    fn comments_are_skipped() {
        let toks = tokenize("SELECT -- note\n a /* b\n c */ FROM t");
        assert_eq!(toks.len(), 4);
        assert_eq!((toks[1].line, toks[1].column), (1, 1));
        assert_eq!((toks[2].line, toks[2].column), (2, 6));
    }

    #[test]
    fn other_characters() {
        assert_eq!(
            kinds("a # > *"),
            vec![
                TokenKind::Ident,
                TokenKind::Other('#'),
                TokenKind::Other('>'),
                TokenKind::Star
            ]
        );
    }
}
