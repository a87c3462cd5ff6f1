use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new()
        .tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_words_and_delimiters() {
    assert_eq!(
        kinds("SELECT a, b.c FROM t;"),
        vec![
            TokenKind::Word,
            TokenKind::Word,
            TokenKind::Comma,
            TokenKind::Word,
            TokenKind::Dot,
            TokenKind::Word,
            TokenKind::Word,
            TokenKind::Word,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_string_literal_hides_keywords() {
    let tokens = Lexer::new()
        .tokenize("SELECT 'DROP TABLE x' AS s")
        .unwrap();
    assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[1].lexeme, "'DROP TABLE x'");
    assert!(!tokens.iter().any(|t| t.is_word("DROP")));
}

#[test]
fn test_doubled_and_backslash_escapes() {
    let tokens = Lexer::new().tokenize(r"'it''s' 'a\'b' x").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].lexeme, "'it''s'");
    assert_eq!(tokens[1].lexeme, r"'a\'b'");
    assert!(tokens[2].is_word("x"));
}

#[test]
fn test_quoted_identifiers() {
    let tokens = Lexer::new().tokenize(r#""my table" `other`"#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::QuotedIdentifier);
    assert_eq!(tokens[1].kind, TokenKind::QuotedIdentifier);
    assert_eq!(tokens[1].lexeme, "`other`");
}

#[test]
fn test_comments() {
    let tokens = Lexer::new()
        .tokenize("SELECT 1 -- DROP\n/* DELETE */ FROM t")
        .unwrap();
    let comments = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .count();
    assert_eq!(comments, 2);
    assert!(!tokens.iter().any(|t| t.is_word("DROP") || t.is_word("DELETE")));
}

#[test]
fn test_positions_are_one_based() {
    let tokens = Lexer::new().tokenize("SELECT\n  x").unwrap();
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    assert_eq!(tokens[1].span, (9, 10));
}

#[test]
fn test_unterminated_string_reports_opening_quote() {
    let err = Lexer::new().tokenize("SELECT\n 'abc").unwrap_err();
    match err {
        LexerError::UnterminatedString { quote, position } => {
            assert_eq!(quote, '\'');
            assert_eq!(position.line, 2);
            assert_eq!(position.column, 2);
            assert_eq!(position.offset, 8);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_open_block_comment_runs_to_end() {
    let tokens = Lexer::new().tokenize("SELECT 1 /* note DROP").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, TokenKind::Comment);
    assert_eq!(tokens[2].lexeme, "/* note DROP");
    assert_eq!((tokens[2].line, tokens[2].column), (1, 10));
}

#[test]
fn test_unterminated_quoted_identifier() {
    let err = Lexer::new().tokenize(r#"SELECT "col"#).unwrap_err();
    assert!(matches!(
        err,
        LexerError::UnterminatedString { quote: '"', .. }
    ));
    assert_eq!(err.position().column, 8);
}

#[test]
fn test_open_backtick_is_not_an_error() {
    let tokens = Lexer::new().tokenize("SELECT `col").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::QuotedIdentifier);
    assert_eq!(tokens[1].lexeme, "`col");
}

#[test]
fn test_operators_and_numbers() {
    assert_eq!(
        kinds("a >= 1.5"),
        vec![
            TokenKind::Word,
            TokenKind::Operator,
            TokenKind::Operator,
            TokenKind::Number,
        ]
    );
}

#[test]
fn test_lenient_never_fails() {
    let tokens = tokenize_lenient("SELECT 'abc");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
}

#[test]
fn test_strip_literals() {
    assert_eq!(
        strip_literals("SELECT  'a;b' , x -- trailing\nFROM/* c */t"),
        "SELECT '' , x FROM t"
    );
}
