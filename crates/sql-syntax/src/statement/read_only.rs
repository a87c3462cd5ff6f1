use crate::lexer::{
    token::{Token, TokenKind},
    tokenize_lenient,
};

/// `true` when executing `sql` cannot change data or schema.
///
/// A leading CTE is resolved to the statement that follows it at
/// parenthesis depth 0, which is then judged on its own.
pub fn is_read_only_query(sql: &str) -> bool {
    let tokens: Vec<Token> = tokenize_lenient(sql)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .collect();
    is_read_only(&tokens)
}

fn is_read_only(tokens: &[Token]) -> bool {
    let Some(first) = tokens.first().and_then(Token::word) else {
        return false;
    };

    match first.as_str() {
        "SELECT" => !tokens.iter().any(|t| t.is_word("INTO")),
        "EXPLAIN" | "SHOW" | "DESCRIBE" | "DESC" => true,
        "WITH" => main_statement(tokens).is_some_and(|start| is_read_only(&tokens[start..])),
        _ => false,
    }
}

/// Index of the first top-level SELECT/INSERT/UPDATE/DELETE after a `WITH`.
fn main_statement(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate().skip(1) {
        match token.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => depth = depth.saturating_sub(1),
            TokenKind::Word if depth == 0 => {
                if let Some(word) = token.word()
                    && matches!(word.as_str(), "SELECT" | "INSERT" | "UPDATE" | "DELETE")
                {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
