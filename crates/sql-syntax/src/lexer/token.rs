use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: (usize, usize),
}

impl Token {
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.span.0,
        }
    }

    /// Upper-cased lexeme when the token is a bare word.
    pub fn word(&self) -> Option<String> {
        match self.kind {
            TokenKind::Word => Some(self.lexeme.to_ascii_uppercase()),
            _ => None,
        }
    }

    pub fn is_word(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.lexeme.eq_ignore_ascii_case(keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Bare identifiers and keywords
    Word,
    Number,

    // Quoted
    StringLiteral,    // '...'
    QuotedIdentifier, // "..." or `...`

    // Delimiters
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Dot,          // .
    Semicolon,    // ;

    Operator,
    Comment,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word => write!(f, "word"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::StringLiteral => write!(f, "string"),
            TokenKind::QuotedIdentifier => write!(f, "quoted identifier"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Operator => write!(f, "operator"),
            TokenKind::Comment => write!(f, "comment"),
        }
    }
}

/// Location inside the SQL text. `line` and `column` are 1-based, `offset`
/// is the 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
