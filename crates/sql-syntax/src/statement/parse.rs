use crate::{
    lexer::strip_literals,
    statement::extract::{MetadataExtractor, RegexExtractor},
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    static ref WHERE_RE: Regex = Regex::new(r"(?i)\bWHERE\b").expect("where pattern");
    static ref LIMIT_RE: Regex =
        Regex::new(r"(?i)\bLIMIT\b|\bFETCH\s+(?:FIRST|NEXT)\b").expect("limit pattern");
    static ref ORDER_BY_RE: Regex = Regex::new(r"(?i)\bORDER\s+BY\b").expect("order by pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Alter,
    Drop,
    Truncate,
    Grant,
    Revoke,
    Begin,
    Commit,
    Rollback,
    With,
    Explain,
    Unknown,
}

impl StatementType {
    /// Classifiable kinds, in match order.
    pub const CLASSIFIED: [StatementType; 15] = [
        StatementType::Select,
        StatementType::Insert,
        StatementType::Update,
        StatementType::Delete,
        StatementType::Create,
        StatementType::Alter,
        StatementType::Drop,
        StatementType::Truncate,
        StatementType::Grant,
        StatementType::Revoke,
        StatementType::Begin,
        StatementType::Commit,
        StatementType::Rollback,
        StatementType::With,
        StatementType::Explain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementType::Select => "SELECT",
            StatementType::Insert => "INSERT",
            StatementType::Update => "UPDATE",
            StatementType::Delete => "DELETE",
            StatementType::Create => "CREATE",
            StatementType::Alter => "ALTER",
            StatementType::Drop => "DROP",
            StatementType::Truncate => "TRUNCATE",
            StatementType::Grant => "GRANT",
            StatementType::Revoke => "REVOKE",
            StatementType::Begin => "BEGIN",
            StatementType::Commit => "COMMIT",
            StatementType::Rollback => "ROLLBACK",
            StatementType::With => "WITH",
            StatementType::Explain => "EXPLAIN",
            StatementType::Unknown => "UNKNOWN",
        }
    }

    pub fn is_modifying(&self) -> bool {
        matches!(
            self,
            StatementType::Insert
                | StatementType::Update
                | StatementType::Delete
                | StatementType::Create
                | StatementType::Alter
                | StatementType::Drop
                | StatementType::Truncate
        )
    }

    /// Classifies by the leading word of `sql`, case-insensitively.
    pub fn classify(sql: &str) -> Self {
        let leading = sql
            .trim_start()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .next()
            .unwrap_or_default();

        Self::CLASSIFIED
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(leading))
            .unwrap_or(StatementType::Unknown)
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structural summary of one SQL statement. Recomputed from the raw text on
/// every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSqlStatement {
    #[serde(rename = "type")]
    pub statement_type: StatementType,
    pub tables: Vec<String>,
    pub columns: Vec<String>,
    pub has_where: bool,
    pub has_limit: bool,
    pub has_order_by: bool,
    pub is_modifying: bool,
    pub raw_sql: String,
}

pub fn parse_sql(sql: &str) -> ParsedSqlStatement {
    parse_sql_with(sql, &RegexExtractor)
}

pub fn parse_sql_with(sql: &str, extractor: &dyn MetadataExtractor) -> ParsedSqlStatement {
    let normalized = strip_literals(sql);
    let statement_type = StatementType::classify(&normalized);

    let columns = if statement_type == StatementType::Select {
        extractor.columns(&normalized)
    } else {
        Vec::new()
    };

    ParsedSqlStatement {
        statement_type,
        tables: extractor.tables(&normalized),
        columns,
        has_where: WHERE_RE.is_match(&normalized),
        has_limit: LIMIT_RE.is_match(&normalized),
        has_order_by: ORDER_BY_RE.is_match(&normalized),
        is_modifying: statement_type.is_modifying(),
        raw_sql: sql.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_summary() {
        let parsed = parse_sql("SELECT name, age FROM users WHERE id = 1");
        assert_eq!(parsed.statement_type, StatementType::Select);
        assert_eq!(parsed.tables, vec!["users"]);
        assert_eq!(parsed.columns, vec!["name", "age"]);
        assert!(parsed.has_where);
        assert!(!parsed.has_limit);
        assert!(!parsed.has_order_by);
        assert!(!parsed.is_modifying);
        assert_eq!(parsed.raw_sql, "SELECT name, age FROM users WHERE id = 1");
    }

    #[test]
    fn test_classification() {
        let cases = [
            ("select 1", StatementType::Select),
            ("  INSERT INTO t VALUES (1)", StatementType::Insert),
            ("Update t SET a = 1", StatementType::Update),
            ("DELETE FROM t", StatementType::Delete),
            ("CREATE INDEX i ON t (a)", StatementType::Create),
            ("ALTER TABLE t ADD x INT", StatementType::Alter),
            ("DROP VIEW v", StatementType::Drop),
            ("TRUNCATE t", StatementType::Truncate),
            ("GRANT SELECT ON t TO r", StatementType::Grant),
            ("REVOKE SELECT ON t FROM r", StatementType::Revoke),
            ("BEGIN", StatementType::Begin),
            ("COMMIT;", StatementType::Commit),
            ("ROLLBACK", StatementType::Rollback),
            ("WITH x AS (SELECT 1) SELECT * FROM x", StatementType::With),
            ("EXPLAIN SELECT 1", StatementType::Explain),
            ("VACUUM", StatementType::Unknown),
            ("SELECTED", StatementType::Unknown),
            ("", StatementType::Unknown),
        ];
        for (sql, expected) in cases {
            assert_eq!(parse_sql(sql).statement_type, expected, "{sql}");
        }
    }

    #[test]
    fn test_modifying_kinds() {
        assert!(parse_sql("INSERT INTO t VALUES (1)").is_modifying);
        assert!(parse_sql("TRUNCATE t").is_modifying);
        assert!(!parse_sql("GRANT SELECT ON t TO r").is_modifying);
        assert!(!parse_sql("BEGIN").is_modifying);
    }

    #[test]
    fn test_clause_flags() {
        let parsed = parse_sql("SELECT * FROM t ORDER BY id LIMIT 5");
        assert!(parsed.has_order_by && parsed.has_limit && !parsed.has_where);

        let fetch = parse_sql("SELECT * FROM t ORDER BY id OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY");
        assert!(fetch.has_limit);
    }

    #[test]
    fn test_literals_do_not_leak_into_metadata() {
        let parsed = parse_sql("SELECT id FROM t WHERE note = 'JOIN secret LIMIT 1'");
        assert_eq!(parsed.tables, vec!["t"]);
        assert!(!parsed.has_limit);
    }

    #[test]
    fn test_columns_only_for_select() {
        assert!(parse_sql("UPDATE t SET a = 1").columns.is_empty());
        assert!(parse_sql("WITH x AS (SELECT a FROM t) SELECT a FROM x").columns.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(parse_sql("DELETE FROM logs")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "DELETE",
                "tables": ["logs"],
                "columns": [],
                "hasWhere": false,
                "hasLimit": false,
                "hasOrderBy": false,
                "isModifying": true,
                "rawSql": "DELETE FROM logs",
            })
        );
    }

    struct FixedExtractor;

    impl MetadataExtractor for FixedExtractor {
        fn tables(&self, _sql: &str) -> Vec<String> {
            vec!["fixed".to_string()]
        }

        fn columns(&self, _sql: &str) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_custom_extractor() {
        let parsed = parse_sql_with("SELECT a FROM b", &FixedExtractor);
        assert_eq!(parsed.tables, vec!["fixed"]);
        assert!(parsed.columns.is_empty());
    }
}
