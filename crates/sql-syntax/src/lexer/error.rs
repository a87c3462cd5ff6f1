use crate::{lexer::token::Position, parser::Rule};
use pest::error::{Error as PestError, InputLocation, LineColLocation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("Unterminated string literal: missing closing quote ({quote}) opened at {position}")]
    UnterminatedString { quote: char, position: Position },

    #[error("Scan error at {position}: {message}")]
    ParseError { message: String, position: Position },
}

impl LexerError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };
        let offset = match err.location {
            InputLocation::Pos(offset) => offset,
            InputLocation::Span((start, _)) => start,
        };

        LexerError::ParseError {
            message: format!("{}", err.variant),
            position: Position {
                line,
                column,
                offset,
            },
        }
    }

    pub fn position(&self) -> Position {
        match self {
            LexerError::UnterminatedString { position, .. }
            | LexerError::ParseError { position, .. } => *position,
        }
    }
}
