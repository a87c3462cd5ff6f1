use crate::{
    lexer::{
        Lexer,
        token::{Position, Token, TokenKind},
    },
    statement::danger::{dangerous_keywords, deletes_all_rows, updates_all_rows, words},
};
use serde::Serialize;
use tracing::debug;

pub const DELETE_ALL_WARNING: &str = "DELETE without WHERE clause will delete all rows";
pub const UPDATE_ALL_WARNING: &str = "UPDATE without WHERE clause will update all rows";

/// Outcome of [`validate_sql`].
///
/// `valid: false` means the text is structurally broken and carries an
/// `error` (and usually a `position`). Risky but runnable SQL stays
/// `valid: true` and only collects `warnings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SqlValidation {
    fn valid(warnings: Vec<String>) -> Self {
        Self {
            valid: true,
            error: None,
            position: None,
            warnings,
        }
    }

    fn invalid(error: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            position,
            warnings: Vec::new(),
        }
    }
}

pub fn validate_sql(sql: &str) -> SqlValidation {
    if sql.trim().is_empty() {
        return SqlValidation::invalid("SQL query is empty", None);
    }

    let tokens = match Lexer::new().tokenize(sql) {
        Ok(tokens) => tokens,
        Err(err) => {
            debug!(%err, "SQL rejected by scanner");
            return SqlValidation::invalid(err.to_string(), Some(err.position()));
        }
    };

    if let Err((message, position)) = check_parentheses(&tokens) {
        debug!(%position, reason = message, "SQL has unbalanced parentheses");
        return SqlValidation::invalid(message, Some(position));
    }

    let words = words(sql);
    let mut warnings: Vec<String> = dangerous_keywords(&words)
        .into_iter()
        .map(|kw| format!("Query contains potentially dangerous operation: {kw}"))
        .collect();
    if deletes_all_rows(&words) {
        warnings.push(DELETE_ALL_WARNING.to_string());
    }
    if updates_all_rows(&words) {
        warnings.push(UPDATE_ALL_WARNING.to_string());
    }

    SqlValidation::valid(warnings)
}

/// Reports the first `)` without a partner, else the outermost `(` left open.
fn check_parentheses(tokens: &[Token]) -> Result<(), (&'static str, Position)> {
    let mut open: Vec<Position> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::LeftParen => open.push(token.position()),
            TokenKind::RightParen => {
                if open.pop().is_none() {
                    return Err(("Unexpected closing parenthesis", token.position()));
                }
            }
            _ => {}
        }
    }

    match open.first() {
        Some(position) => Err(("Unclosed parenthesis", *position)),
        None => Ok(()),
    }
}
