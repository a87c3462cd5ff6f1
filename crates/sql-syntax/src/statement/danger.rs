use crate::{
    keywords::{DANGEROUS_KEYWORDS, is_dangerous_keyword},
    lexer::{token::Token, tokenize_lenient},
};

pub const DELETE_ALL: &str = "DELETE_ALL";
pub const UPDATE_ALL: &str = "UPDATE_ALL";

/// Upper-cased bare words of `sql`. Literals, quoted identifiers and
/// comments never contribute.
pub(crate) fn words(sql: &str) -> Vec<String> {
    tokenize_lenient(sql).iter().filter_map(Token::word).collect()
}

/// Dangerous keywords present in `words`, in registry order.
pub(crate) fn dangerous_keywords(words: &[String]) -> Vec<&'static str> {
    let found: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| is_dangerous_keyword(w))
        .collect();
    DANGEROUS_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| found.contains(kw))
        .collect()
}

pub(crate) fn deletes_all_rows(words: &[String]) -> bool {
    words.windows(2).any(|pair| pair[0] == "DELETE" && pair[1] == "FROM")
        && !words.iter().any(|w| w == "WHERE")
}

pub(crate) fn updates_all_rows(words: &[String]) -> bool {
    let Some(update) = words.iter().position(|w| w == "UPDATE") else {
        return false;
    };
    words[update..].iter().any(|w| w == "SET") && !words.iter().any(|w| w == "WHERE")
}

/// Tags for every risky operation in `sql`: the matched dangerous keywords,
/// then `DELETE_ALL` / `UPDATE_ALL` for unguarded row changes.
pub fn detect_dangerous_operations(sql: &str) -> Vec<String> {
    let words = words(sql);

    let mut tags: Vec<String> = dangerous_keywords(&words)
        .into_iter()
        .map(String::from)
        .collect();
    if deletes_all_rows(&words) {
        tags.push(DELETE_ALL.to_string());
    }
    if updates_all_rows(&words) {
        tags.push(UPDATE_ALL.to_string());
    }
    tags
}
