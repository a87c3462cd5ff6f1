//! Heuristic table/column extraction over literal-stripped SQL.
//!
//! This is pattern matching, not parsing. It is hidden behind
//! [`MetadataExtractor`] so a grammar-based implementation can replace it
//! without touching [`parse_sql`](crate::statement::parse::parse_sql).

use crate::keywords::is_sql_keyword;
use lazy_static::lazy_static;
use regex::Regex;

/// One identifier: `"double quoted"`, `` `backticked` ``, `[bracketed]` or bare.
const IDENT: &str = r#"(?:"(?:[^"]|"")+"|`(?:[^`]|``)+`|\[[^\]]+\]|[\p{L}_][\p{L}\p{N}_$]*)"#;

lazy_static! {
    static ref IDENT_RE: Regex = Regex::new(IDENT).expect("identifier pattern");
    static ref QUALIFIED_PREFIX: Regex =
        Regex::new(&format!(r"^\s*({IDENT}(?:\s*\.\s*{IDENT})*)")).expect("qualified pattern");
    static ref QUALIFIED_EXACT: Regex =
        Regex::new(&format!(r"^{IDENT}(?:\s*\.\s*{IDENT})*$")).expect("qualified pattern");
    static ref TABLE_ALIAS: Regex =
        Regex::new(&format!(r"(?i)^\s+(AS\s+)?({IDENT})")).expect("alias pattern");
    static ref AS_ALIAS: Regex =
        Regex::new(&format!(r"(?i)\sAS\s+({IDENT})$")).expect("alias pattern");
    static ref BARE_ALIAS: Regex =
        Regex::new(&format!(r#"^.*[\w"`\])]\s+({IDENT})$"#)).expect("alias pattern");
    static ref SELECT_HEAD: Regex = Regex::new(
        r"(?i)^\s*SELECT\s+(?:(?:DISTINCT\s+ON\s*\([^)]*\)|DISTINCT|ALL|TOP\s*\(?\s*\d+\s*\)?(?:\s+PERCENT)?)\s+)*"
    )
    .expect("select pattern");
    static ref TABLE_ANCHOR: Regex = Regex::new(concat!(
        r"(?i)(?P<from>\bFROM\s+)",
        r"|(?P<join>\bJOIN\s+)",
        r"|(?P<into>\bINSERT\s+(?:IGNORE\s+)?INTO\s+)",
        r"|(?P<update>(?:^|[;)]\s*)UPDATE\s+(?:ONLY\s+)?)",
        r"|(?P<create>\bCREATE\s+(?:OR\s+REPLACE\s+)?(?:(?:GLOBAL|LOCAL)\s+)?(?:TEMP(?:ORARY)?\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?)",
        r"|(?P<alter>\bALTER\s+TABLE\s+(?:IF\s+EXISTS\s+)?(?:ONLY\s+)?)",
        r"|(?P<drop>\bDROP\s+TABLE\s+(?:IF\s+EXISTS\s+)?)",
        r"|(?P<truncate>\bTRUNCATE\s+(?:TABLE\s+)?)",
    ))
    .expect("table anchor pattern");
}

pub trait MetadataExtractor {
    /// Referenced table names, bare (no schema, no quotes), first-seen order.
    fn tables(&self, sql: &str) -> Vec<String>;

    /// Output column names of a SELECT projection.
    fn columns(&self, sql: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

/// How the identifiers after a table anchor are read.
#[derive(Debug, Clone, Copy)]
struct AnchorRule {
    list: bool,
    allow_call: bool,
}

impl MetadataExtractor for RegexExtractor {
    fn tables(&self, sql: &str) -> Vec<String> {
        let mut tables = Vec::new();

        for caps in TABLE_ANCHOR.captures_iter(sql) {
            let Some(anchor) = caps.get(0) else {
                continue;
            };
            let rule = if caps.name("from").is_some() {
                AnchorRule { list: true, allow_call: false }
            } else if caps.name("join").is_some() {
                AnchorRule { list: false, allow_call: false }
            } else if caps.name("drop").is_some() || caps.name("truncate").is_some() {
                AnchorRule { list: true, allow_call: true }
            } else {
                AnchorRule { list: false, allow_call: true }
            };
            read_tables(&sql[anchor.end()..], rule, &mut tables);
        }

        tables
    }

    fn columns(&self, sql: &str) -> Vec<String> {
        let Some(head) = SELECT_HEAD.find(sql) else {
            return Vec::new();
        };
        let projection = until_top_level_from(&sql[head.end()..]);

        split_top_level(projection)
            .into_iter()
            .filter_map(column_name)
            .collect()
    }
}

fn read_tables(mut rest: &str, rule: AnchorRule, out: &mut Vec<String>) {
    loop {
        let Some(caps) = QUALIFIED_PREFIX.captures(rest) else {
            return;
        };
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            return;
        };
        rest = &rest[whole.end()..];

        // table-valued function, e.g. FROM generate_series(1, 3)
        if !rule.allow_call && rest.trim_start().starts_with('(') {
            return;
        }

        if let Some(table) = bare_name(name.as_str())
            && !out.contains(&table)
        {
            out.push(table);
        }

        if !rule.list {
            return;
        }

        if let Some(alias) = TABLE_ALIAS.captures(rest)
            && let (Some(all), Some(word)) = (alias.get(0), alias.get(2))
            && (alias.get(1).is_some() || !is_sql_keyword(word.as_str()))
        {
            rest = &rest[all.end()..];
        }

        match rest.trim_start().strip_prefix(',') {
            Some(next) => rest = next,
            None => return,
        }
    }
}

/// Last segment of a possibly qualified name with quotes removed. Unquoted
/// keywords are not names.
fn bare_name(qualified: &str) -> Option<String> {
    let last = IDENT_RE.find_iter(qualified).last()?.as_str();
    if is_quoted(last) {
        Some(unquote(last))
    } else if is_sql_keyword(last) {
        None
    } else {
        Some(last.to_string())
    }
}

fn is_quoted(ident: &str) -> bool {
    ident.starts_with(['"', '`', '['])
}

fn unquote(ident: &str) -> String {
    let inner = || ident.get(1..ident.len().saturating_sub(1)).unwrap_or_default();
    match ident.chars().next() {
        Some('"') if ident.len() >= 2 => inner().replace("\"\"", "\""),
        Some('`') if ident.len() >= 2 => inner().replace("``", "`"),
        Some('[') if ident.len() >= 2 => inner().to_string(),
        _ => ident.to_string(),
    }
}

/// Walks `text` with quote and parenthesis tracking and calls `stop` at each
/// top-level byte offset; returns the first offset `stop` accepts.
fn scan_top_level(text: &str, mut stop: impl FnMut(usize, char) -> bool) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '`' | '\'' => quote = Some(c),
            '[' => quote = Some(']'),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && stop(i, c) => return Some(i),
            _ => {}
        }
    }
    None
}

fn until_top_level_from(projection: &str) -> &str {
    let end = scan_top_level(projection, |i, _| {
        let before = projection[..i].chars().next_back();
        let word = projection.get(i..i + 4);
        let after = projection.get(i + 4..).and_then(|s| s.chars().next());
        word.is_some_and(|w| w.eq_ignore_ascii_case("FROM"))
            && !before.is_some_and(is_ident_char)
            && !after.is_some_and(is_ident_char)
    })
    .or_else(|| scan_top_level(projection, |_, c| c == ';'))
    .unwrap_or(projection.len());

    &projection[..end]
}

fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = list;
    while let Some(comma) = scan_top_level(rest, |_, c| c == ',') {
        parts.push(&rest[..comma]);
        rest = &rest[comma + 1..];
    }
    parts.push(rest);
    parts
}

fn column_name(expr: &str) -> Option<String> {
    let expr = expr.trim();

    if let Some(alias) = AS_ALIAS.captures(expr).and_then(|c| c.get(1)) {
        return Some(unquote(alias.as_str()));
    }
    if QUALIFIED_EXACT.is_match(expr) {
        return bare_name(expr);
    }
    BARE_ALIAS
        .captures(expr)
        .and_then(|c| c.get(1))
        .and_then(|alias| bare_name(alias.as_str()))
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
