use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar/sql_scan.pest"]
pub struct SqlScanner;
