#![cfg(test)]
use crate::*;
use rstest::rstest;

fn context(text: &str, line: u32, character: u32) -> Context {
    parse_test(text).context_at(Position::new(line, character))
}

const ALIASED_MULTILINE: &str = "CREATE VIEW winelist (priceInDollars, id) AS\n  SELECT\n    t1.price AS priceInDollars, t1.id, t2. \n  FROM\n    PostgresDB.winelist AS t1, PostgresDB.contact as t2";

const WHERE_MULTILINE: &str = "CREATE VIEW winelist (priceInCents, id, productcode) AS\n  SELECT\n    t1.price as priceInCents, id, productcode, t2.first_name\n  FROM\n    PostgresDB.winelist AS t1, PostgresDB.contact as t2 WHERE t1. > 70 ORDER BY t1.id";

#[rstest]
#[case(
    "CREATE VIEW abcd ( id ) AS SELECT columnA as c1, columnB as c2 FROM bar",
    42,
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW abcd ( id ) AS SELECT concat(firstName, lastName) as c1 FROM names",
    41,
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW abcd ( id ) AS SELECT concat(firstName, lastName) as c1 FROM names",
    60,
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW aaa (full_name) AS SELECT concat(t2.last_name, concat(', ', t2.first_name) ) as full_name FROM PostgresDB.contact as t2",
    58,
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW aaa (full_name) AS SELECT concat(t2.last_name, concat(', ', t2.first_name) ) as full_name FROM PostgresDB.contact as t2",
    59,
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW aaa (full_name) AS SELECT concat(t2. , param2) as xxx FROM PostgresDB.contact as t2",
    47,
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW aaa (full_name) AS SELECT concat(t2. , param2) as xxx FROM PostgresDB.contact as t2",
    48,
    Context::TableAlias
)]
#[case(
    "CREATE VIEW aaa (full_name) AS SELECT t2.full_name, t2. FROM PostgresDB.contact as t2",
    54,
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW aaa (full_name) AS SELECT t2.full_name, t2. FROM PostgresDB.contact as t2",
    55,
    Context::TableAlias
)]
#[case(
    "CREATE VIEW winelist AS SELECT * FROM PostgresDB.winelist as t1 WHERE id > 2000",
    65,
    Context::WhereClause
)]
#[case(
    "CREATE VIEW winelist AS SELECT * FROM PostgresDB.winelist as t1, ",
    65,
    Context::FromClause
)]
#[case(
    "CREATE VIEW winelist AS SELECT * FROM PostgresDB.winelist as t1, PostgresDB.contact as t1 ",
    89,
    Context::QueryExpression
)]
#[case(
    "CREATE VIEW winelist AS SELECT * FROM PostgresDB.winelist as t1, PostgresDB.contact as t1 ",
    90,
    Context::QueryExpression
)]
#[case(
    "CREATE VIEW winelist AS SELECT * FROM PostgresDB.winelist as t1, PostgresDB.contact as t1 ",
    88,
    Context::FromClause
)]
fn single_line_contexts(#[case] text: &str, #[case] character: u32, #[case] expected: Context) {
    assert_eq!(context(text, 0, character), expected);
}

#[rstest]
#[case(ALIASED_MULTILINE, 2, 41, Context::SelectColumn)]
#[case(ALIASED_MULTILINE, 2, 42, Context::TableAlias)]
#[case(WHERE_MULTILINE, 4, 65, Context::WhereClauseTableAlias)]
#[case(WHERE_MULTILINE, 4, 80, Context::QueryExpression)]
fn multiline_contexts(
    #[case] text: &str,
    #[case] line: u32,
    #[case] character: u32,
    #[case] expected: Context,
) {
    assert_eq!(context(text, line, character), expected);
}

#[rstest]
#[case("<|>CREATE VIEW v AS SELECT a FROM t", Context::QueryExpression)]
#[case("  <|>CREATE VIEW v AS SELECT a FROM t", Context::QueryExpression)]
#[case("CREATE VIEW v (id, <|>) AS SELECT a FROM t", Context::QueryExpression)]
#[case("CREATE VIEW v AS SELECT <|>", Context::SelectColumn)]
#[case("CREATE VIEW v AS SELECT a FROM <|>", Context::FromClause)]
#[case("CREATE VIEW v AS SELECT a FROM t x <|>", Context::QueryExpression)]
#[case("CREATE VIEW v AS SELECT a FROM t x<|>", Context::FromClause)]
#[case("CREATE VIEW v AS SELECT a FROM t x<|>\n", Context::QueryExpression)]
#[case("CREATE VIEW v AS SELECT a FROM t WHERE <|>", Context::WhereClause)]
#[case("CREATE VIEW v AS SELECT a FROM t X WHERE x.<|>", Context::WhereClauseTableAlias)]
#[case("CREATE VIEW v AS SELECT x.<|> FROM t AS x", Context::TableAlias)]
#[case("CREATE VIEW v AS SELECT y.<|> FROM t AS x", Context::SelectColumn)]
#[case("CREATE VIEW v AS SELECT x .<|> FROM t AS x", Context::SelectColumn)]
#[case("CREATE VIEW v AS SELECT a FROM t GROUP BY <|>", Context::QueryExpression)]
#[case(
    "CREATE VIEW v AS WITH w AS (SELECT a FROM t AS q WHERE q.<|>) SELECT a FROM w",
    Context::WhereClauseTableAlias
)]
#[case(
    "CREATE VIEW v AS WITH w AS (SELECT a FROM t) SELECT <|> FROM w",
    Context::SelectColumn
)]
#[case(
    "CREATE VIEW v AS SELECT a FROM (SELECT b FROM t) AS s, <|>",
    Context::FromClause
)]
fn marked_contexts(#[case] text: &str, #[case] expected: Context) {
    let (text, position) = marked(text);
    assert_eq!(context(&text, position.line, position.character), expected);
}

#[test]
fn free_function_matches_method() {
    let statement = parse_test("CREATE VIEW v AS SELECT a FROM t AS x WHERE x.");
    let end = statement
        .tokens()
        .tokens()
        .last()
        .map(Token::end)
        .unwrap_or_default();
    assert_eq!(
        context_at(&statement, statement.tokens(), end),
        statement.context_at(end)
    );
    assert_eq!(statement.context_at(end), Context::WhereClauseTableAlias);
    assert_eq!(Context::WhereClauseTableAlias.to_string(), "WHERE_CLAUSE_TABLE_ALIAS");
}
