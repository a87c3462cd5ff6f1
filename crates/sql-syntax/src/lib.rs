pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod statement;

pub use keywords::is_sql_keyword;
pub use statement::{
    danger::detect_dangerous_operations,
    parse::{ParsedSqlStatement, StatementType, parse_sql},
    read_only::is_read_only_query,
    validate::{SqlValidation, validate_sql},
};
