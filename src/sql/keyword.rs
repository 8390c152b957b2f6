//! DDL keyword model used by the lexer and the statement parsers.
//!
//! Only words the grammar branches on are lifted into `Keyword`; every other
//! word stays an identifier. Whether a word may be used as a name is a
//! separate question answered by [`is_reserved_word`] and
//! [`is_non_reserved_word`], which cover the full Teiid word lists.
//!
//! Design notes:
//! - Keywords are matched case-insensitively via `from_lower` using a
//!   pre-lower-cased string slice.
//! - `as_str` provides the canonical upper-case spelling used when a
//!   statement is rendered back to text.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Create,
    View,
    As,
    With,
    Select,
    All,
    Distinct,
    From,
    Where,
    Group,
    Order,
    Having,
    Limit,
    Offset,
    Union,
    Except,
    Intersect,
    Primary,
    Foreign,
    Key,
    References,
    Not,
    Null,
    Unique,
    Index,
    AutoIncrement,
    Default,
    Options,
}

impl Keyword {
    /// Keywords that end a projection or table list and open the opaque tail
    /// of a query expression.
    pub const TERMINATORS: [Self; 9] = [
        Keyword::Where,
        Keyword::Group,
        Keyword::Order,
        Keyword::Having,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Union,
        Keyword::Except,
        Keyword::Intersect,
    ];

    /// Attempt to classify a *lower-cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a grammar keyword.
    ///
    /// NOTE: The caller is responsible for lower-casing the input.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "create" => Create,
            "view" => View,
            "as" => As,
            "with" => With,
            "select" => Select,
            "all" => All,
            "distinct" => Distinct,
            "from" => From,
            "where" => Where,
            "group" => Group,
            "order" => Order,
            "having" => Having,
            "limit" => Limit,
            "offset" => Offset,
            "union" => Union,
            "except" => Except,
            "intersect" => Intersect,
            "primary" => Primary,
            "foreign" => Foreign,
            "key" => Key,
            "references" => References,
            "not" => Not,
            "null" => Null,
            "unique" => Unique,
            "index" => Index,
            "auto_increment" => AutoIncrement,
            "default" => Default,
            "options" => Options,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical upper-case string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Create => "CREATE",
            View => "VIEW",
            As => "AS",
            With => "WITH",
            Select => "SELECT",
            All => "ALL",
            Distinct => "DISTINCT",
            From => "FROM",
            Where => "WHERE",
            Group => "GROUP",
            Order => "ORDER",
            Having => "HAVING",
            Limit => "LIMIT",
            Offset => "OFFSET",
            Union => "UNION",
            Except => "EXCEPT",
            Intersect => "INTERSECT",
            Primary => "PRIMARY",
            Foreign => "FOREIGN",
            Key => "KEY",
            References => "REFERENCES",
            Not => "NOT",
            Null => "NULL",
            Unique => "UNIQUE",
            Index => "INDEX",
            AutoIncrement => "AUTO_INCREMENT",
            Default => "DEFAULT",
            Options => "OPTIONS",
        }
    }

    /// True when the keyword may not be used as an unquoted name.
    pub fn is_reserved(self) -> bool {
        !matches!(self, Keyword::Key | Keyword::Index | Keyword::AutoIncrement)
    }

    pub fn is_terminator(self) -> bool {
        Self::TERMINATORS.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved words, sorted for binary search.
const RESERVED_WORDS: &[&str] = &[
    "add", "all", "alter", "and", "any", "array_agg", "as", "asc", "atomic", "begin", "between",
    "bigdecimal", "bigint", "biginteger", "blob", "boolean", "both", "break", "by", "byte",
    "call", "case", "cast", "char", "clob", "column", "commit", "constraint", "continue",
    "convert", "create", "cross", "date", "day", "decimal", "declare", "default", "delete",
    "desc", "distinct", "double", "drop", "each", "else", "end", "error", "escape", "except",
    "exec", "execute", "exists", "false", "fetch", "filter", "float", "for", "foreign", "from",
    "full", "function", "geography", "geometry", "global", "group", "having", "hour", "if",
    "immediate", "in", "inner", "inout", "insert", "integer", "intersect", "into", "is",
    "join", "json", "language", "lateral", "leading", "leave", "left", "like", "like_regex",
    "limit", "local", "long", "loop", "makedep", "makeind", "makenotdep", "merge", "minute",
    "month", "no", "nocache", "not", "null", "object", "of", "offset", "on", "only", "option",
    "options", "or", "order", "out", "outer", "over", "parameter", "partition", "primary",
    "procedure", "real", "references", "return", "returns", "right", "rollup", "row", "rows",
    "second", "select", "set", "short", "similar", "smallint", "some", "sqlexception",
    "sqlstate", "sqlwarning", "string", "table", "temporary", "then", "time", "timestamp",
    "tinyint", "to", "trailing", "translate", "trigger", "true", "union", "unique", "unknown",
    "update", "user", "using", "values", "varbinary", "varchar", "view", "virtual", "when",
    "where", "while", "with", "without", "xml", "xmlagg", "xmlattributes", "xmlcast",
    "xmlcomment", "xmlconcat", "xmlelement", "xmlexists", "xmlforest", "xmlnamespaces",
    "xmlparse", "xmlpi", "xmlquery", "xmlserialize", "xmltable", "xmltext", "year",
];

/// Words the grammar treats as keywords that are still accepted as names.
const NON_RESERVED_WORDS: &[&str] = &[
    "access", "accesspattern", "after", "analyze", "arraytable", "auto_increment", "avg",
    "chaining", "columns", "condition", "content", "control", "count", "current", "data",
    "database", "delimiter", "dense_rank", "disabled", "document", "domain", "empty",
    "enabled", "encoding", "epoch", "every", "exception", "excluding", "explain", "extract",
    "first", "following", "format", "header", "including", "index", "instead", "jaas",
    "jsonarray_agg", "jsonobject", "jsontable", "key", "last", "listagg", "mask", "max", "min",
    "next", "none", "nulls", "objecttable", "ordinality", "passing", "path", "policy",
    "position", "preceding", "preserve", "privileges", "quarter", "querystring", "quote",
    "raise", "rank", "rename", "repository", "result", "role", "row_number", "schema",
    "selector", "serial", "server", "skip", "sql_tsi_day", "sql_tsi_hour", "stddev_pop",
    "stddev_samp", "subtype", "sum", "textagg", "texttable", "to_bytes", "to_chars",
    "translator", "trim", "unbounded", "upsert", "usage", "use", "var_pop", "var_samp",
    "variadic", "version", "wellformed", "width", "wrapper", "xmldeclaration", "yaml",
];

/// True when `lower` (already lower-cased) is a reserved word.
pub fn is_reserved_word(lower: &str) -> bool {
    RESERVED_WORDS.binary_search(&lower).is_ok()
}

/// True when `lower` (already lower-cased) is a non-reserved keyword.
pub fn is_non_reserved_word(lower: &str) -> bool {
    NON_RESERVED_WORDS.binary_search(&lower).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn recognizes_grammar_keywords() {
        for w in ["create", "view", "select", "from", "where", "references", "auto_increment"] {
            assert!(Keyword::from_lower(w).is_some(), "{w} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "bar", "concat", "string", "id"] {
            assert!(
                Keyword::from_lower(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn word_lists_are_sorted_and_disjoint() {
        assert!(RESERVED_WORDS.iter().tuple_windows().all(|(a, b)| a < b));
        assert!(NON_RESERVED_WORDS.iter().tuple_windows().all(|(a, b)| a < b));
        assert!(!RESERVED_WORDS.iter().any(|w| is_non_reserved_word(w)));
    }

    #[test]
    fn reservation_of_keywords_matches_word_lists() {
        for w in ["create", "view", "select", "key", "index", "auto_increment", "options"] {
            let kw = Keyword::from_lower(w).unwrap();
            assert_eq!(kw.is_reserved(), is_reserved_word(w), "{w}");
        }
        assert!(is_reserved_word("view"));
        assert!(is_reserved_word("string"));
        assert!(!is_reserved_word("id"));
        assert!(is_non_reserved_word("count"));
    }
}
