//! Quote- and comment-aware SQL scanner.
//!
//! The scanner does not understand SQL grammar. It only splits the text into
//! words, literals and punctuation so the statement heuristics never look
//! inside a string literal or a comment.

use crate::{
    lexer::{
        error::LexerError,
        token::{Position, Token, TokenKind},
    },
    parser::{Rule, SqlScanner},
};
use pest::{Parser, iterators::Pair};

pub mod error;
pub mod token;

#[cfg(test)]
mod tests;

pub struct Lexer {
    tokens: Vec<Token>,
    lenient: bool,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Lexer {
            tokens: Vec::new(),
            lenient: false,
        }
    }

    /// A lexer that runs unterminated quotes to the end of the input instead
    /// of failing.
    pub fn lenient() -> Self {
        Lexer {
            tokens: Vec::new(),
            lenient: true,
        }
    }

    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, LexerError> {
        self.tokens.clear();

        let pairs =
            SqlScanner::parse(Rule::program, input).map_err(LexerError::from_pest_error)?;

        for pair in pairs {
            self.process_pair(pair)?;
        }

        Ok(std::mem::take(&mut self.tokens))
    }

    fn process_pair(&mut self, pair: Pair<Rule>) -> Result<(), LexerError> {
        let kind = match pair.as_rule() {
            Rule::line_comment | Rule::block_comment => TokenKind::Comment,
            Rule::string_lit => TokenKind::StringLiteral,
            Rule::quoted_ident | Rule::backtick_ident => TokenKind::QuotedIdentifier,
            Rule::unterminated_string => self.unterminated(&pair, '\'', TokenKind::StringLiteral)?,
            Rule::unterminated_quoted_ident => {
                self.unterminated(&pair, '"', TokenKind::QuotedIdentifier)?
            }
            Rule::number => TokenKind::Number,
            Rule::word => TokenKind::Word,
            Rule::lparen => TokenKind::LeftParen,
            Rule::rparen => TokenKind::RightParen,
            Rule::lbracket => TokenKind::LeftBracket,
            Rule::rbracket => TokenKind::RightBracket,
            Rule::comma => TokenKind::Comma,
            Rule::dot => TokenKind::Dot,
            Rule::semicolon => TokenKind::Semicolon,
            Rule::operator => TokenKind::Operator,
            Rule::EOI => return Ok(()),
            _ => {
                for inner_pair in pair.into_inner() {
                    self.process_pair(inner_pair)?;
                }
                return Ok(());
            }
        };

        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        self.tokens.push(Token {
            kind,
            lexeme: span.as_str().to_string(),
            line,
            column,
            span: (span.start(), span.end()),
        });
        Ok(())
    }

    /// A quoted run that reached the end of the input. Only the lenient
    /// lexer keeps it as a token.
    fn unterminated(
        &self,
        pair: &Pair<Rule>,
        quote: char,
        kind: TokenKind,
    ) -> Result<TokenKind, LexerError> {
        if self.lenient {
            return Ok(kind);
        }
        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        Err(LexerError::UnterminatedString {
            quote,
            position: Position {
                line,
                column,
                offset: span.start(),
            },
        })
    }
}

/// Tokenizes without ever failing; see [`Lexer::lenient`].
pub fn tokenize_lenient(input: &str) -> Vec<Token> {
    Lexer::lenient().tokenize(input).unwrap_or_default()
}

/// Rewrites `sql` with every string literal replaced by `''`, comments
/// dropped and whitespace collapsed to single spaces.
pub fn strip_literals(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut last_end = 0;
    let mut pending_space = false;

    for token in tokenize_lenient(sql) {
        if token.span.0 > last_end {
            pending_space = true;
        }
        last_end = token.span.1;
        if token.kind == TokenKind::Comment {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        match token.kind {
            TokenKind::StringLiteral => out.push_str("''"),
            _ => out.push_str(&token.lexeme),
        }
    }

    out
}
