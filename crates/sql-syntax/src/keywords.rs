use lazy_static::lazy_static;
use std::collections::HashSet;

pub const STATEMENT_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "TRUNCATE", "GRANT",
    "REVOKE", "BEGIN", "COMMIT", "ROLLBACK", "WITH", "EXPLAIN", "SHOW", "DESCRIBE", "DESC",
    "MERGE", "REPLACE", "CALL", "EXEC", "EXECUTE", "SET", "USE",
];

pub const CLAUSE_KEYWORDS: &[&str] = &[
    "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "NATURAL",
    "LATERAL", "ON", "USING", "GROUP", "BY", "HAVING", "ORDER", "LIMIT", "OFFSET", "FETCH",
    "FIRST", "NEXT", "ROWS", "ROW", "ONLY", "UNION", "INTERSECT", "EXCEPT", "ALL", "DISTINCT",
    "AS", "INTO", "VALUES", "RETURNING", "WINDOW", "OVER", "PARTITION", "TOP", "ASC",
    "NULLS", "LAST", "FOR", "TABLE", "INDEX", "VIEW", "IF", "EXISTS", "TEMPORARY", "TEMP",
    "PRIMARY", "KEY", "FOREIGN", "REFERENCES", "CONSTRAINT", "DEFAULT", "UNIQUE", "CHECK",
    "CASCADE", "RECURSIVE", "TO",
];

pub const OPERATOR_KEYWORDS: &[&str] = &[
    "AND", "OR", "NOT", "IN", "IS", "NULL", "LIKE", "ILIKE", "BETWEEN", "CASE", "WHEN", "THEN",
    "ELSE", "END", "TRUE", "FALSE", "ANY", "SOME", "ESCAPE", "COLLATE",
];

pub const FUNCTION_KEYWORDS: &[&str] = &[
    "COUNT", "SUM", "AVG", "MIN", "MAX", "COALESCE", "NULLIF", "CAST", "CONVERT", "EXTRACT",
    "SUBSTRING", "TRIM", "UPPER", "LOWER", "LENGTH", "CONCAT", "NOW", "CURRENT_DATE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP",
];

pub const DATA_TYPE_KEYWORDS: &[&str] = &[
    "INT", "INTEGER", "BIGINT", "SMALLINT", "DECIMAL", "NUMERIC", "FLOAT", "REAL", "DOUBLE",
    "CHAR", "VARCHAR", "NVARCHAR", "TEXT", "DATE", "TIME", "TIMESTAMP", "BOOLEAN", "BLOB",
    "JSON", "UUID",
];

/// Statement keywords that change data or schema.
pub const DANGEROUS_KEYWORDS: &[&str] = &[
    "DROP", "TRUNCATE", "DELETE", "ALTER", "CREATE", "GRANT", "REVOKE",
];

lazy_static! {
    static ref KEYWORDS: HashSet<&'static str> = STATEMENT_KEYWORDS
        .iter()
        .chain(CLAUSE_KEYWORDS)
        .chain(OPERATOR_KEYWORDS)
        .chain(FUNCTION_KEYWORDS)
        .chain(DATA_TYPE_KEYWORDS)
        .copied()
        .collect();
}

/// Case-insensitive membership in the keyword registry.
pub fn is_sql_keyword(word: &str) -> bool {
    KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

pub fn is_dangerous_keyword(word: &str) -> bool {
    DANGEROUS_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(word))
}
