//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::database::SqlDialect;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect, doubling any embedded closing quote.
    ///
    /// - PostgreSQL / SQLite use double quotes: `"my_column"`
    /// - MySQL / MariaDB use backticks: `` `my_column` ``
    /// - SQL Server uses brackets: `[my_column]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Inverse of [`Dialect::quote_identifier`].
    fn unquote_identifier(&self, quoted: &str) -> String;

    /// Returns the placeholder for the parameter at `index`.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL, MariaDB and SQLite use `?`
    /// - SQL Server uses `@p0`, `@p1`, etc.
    fn get_placeholder(&self, index: usize) -> String;

    /// The index of the first placeholder when the caller supplies none.
    fn default_start_index(&self) -> usize {
        0
    }

    /// The pattern-matching operator, `LIKE` or its negation.
    fn like_operator(&self, negated: bool) -> &'static str {
        if negated { "NOT LIKE" } else { "LIKE" }
    }

    /// The expression a LIKE is applied to, casting to text where the
    /// dialect refuses to pattern-match non-text columns.
    fn text_expr(&self, quoted_column: &str) -> String {
        quoted_column.to_string()
    }

    /// Escapes LIKE wildcards and the escape character itself in a user value.
    fn escape_like(&self, value: &str) -> String {
        backslash_escape_like(value)
    }

    /// The `ESCAPE` clause matching [`Dialect::escape_like`], if the dialect needs one.
    fn escape_clause(&self) -> Option<&'static str> {
        Some(r"ESCAPE '\'")
    }

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;

    fn sql_dialect(&self) -> SqlDialect;
}

/// Returns the shared profile for a dialect.
pub fn dialect_for(dialect: SqlDialect) -> &'static dyn Dialect {
    match dialect {
        SqlDialect::Postgres => &Postgres,
        SqlDialect::MySql => &MySql,
        SqlDialect::MariaDb => &MariaDb,
        SqlDialect::SqlServer => &SqlServer,
        SqlDialect::Sqlite => &Sqlite,
    }
}

/// Quotes `ident` between `open`/`close`, doubling embedded `close` characters.
pub fn quote_with(ident: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    out.push(open);
    for c in ident.chars() {
        if c == close {
            out.push(close);
        }
        out.push(c);
    }
    out.push(close);
    out
}

pub fn unquote_with(quoted: &str, open: char, close: char) -> String {
    let inner = quoted
        .strip_prefix(open)
        .and_then(|s| s.strip_suffix(close))
        .unwrap_or(quoted);
    let doubled: String = [close, close].iter().collect();
    inner.replace(&doubled, &close.to_string())
}

fn backslash_escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn bracket_escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '[' => out.push_str("[[]"),
            '%' => out.push_str("[%]"),
            '_' => out.push_str("[_]"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '"', '"')
    }

    fn unquote_identifier(&self, quoted: &str) -> String {
        unquote_with(quoted, '"', '"')
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    fn default_start_index(&self) -> usize {
        1
    }

    fn like_operator(&self, negated: bool) -> &'static str {
        if negated { "NOT ILIKE" } else { "ILIKE" }
    }

    fn text_expr(&self, quoted_column: &str) -> String {
        format!("{quoted_column}::text")
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::Postgres
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '`', '`')
    }

    fn unquote_identifier(&self, quoted: &str) -> String {
        unquote_with(quoted, '`', '`')
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn escape_clause(&self) -> Option<&'static str> {
        // Backslash is itself an escape inside MySQL string literals.
        Some(r"ESCAPE '\\'")
    }

    fn name(&self) -> String {
        "MySQL".into()
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::MySql
    }
}

#[derive(Debug, Clone)]
pub struct MariaDb;

impl Dialect for MariaDb {
    fn quote_identifier(&self, ident: &str) -> String {
        MySql.quote_identifier(ident)
    }

    fn unquote_identifier(&self, quoted: &str) -> String {
        MySql.unquote_identifier(quoted)
    }

    fn get_placeholder(&self, index: usize) -> String {
        MySql.get_placeholder(index)
    }

    fn escape_clause(&self) -> Option<&'static str> {
        MySql.escape_clause()
    }

    fn name(&self) -> String {
        "MariaDB".into()
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::MariaDb
    }
}

#[derive(Debug, Clone)]
pub struct SqlServer;

impl Dialect for SqlServer {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '[', ']')
    }

    fn unquote_identifier(&self, quoted: &str) -> String {
        unquote_with(quoted, '[', ']')
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("@p{index}")
    }

    fn text_expr(&self, quoted_column: &str) -> String {
        format!("CAST({quoted_column} AS NVARCHAR(MAX))")
    }

    fn escape_like(&self, value: &str) -> String {
        bracket_escape_like(value)
    }

    fn escape_clause(&self) -> Option<&'static str> {
        None
    }

    fn name(&self) -> String {
        "SQL Server".into()
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::SqlServer
    }
}

#[derive(Debug, Clone)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '"', '"')
    }

    fn unquote_identifier(&self, quoted: &str) -> String {
        unquote_with(quoted, '"', '"')
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn name(&self) -> String {
        "SQLite".into()
    }

    fn sql_dialect(&self) -> SqlDialect {
        SqlDialect::Sqlite
    }
}
