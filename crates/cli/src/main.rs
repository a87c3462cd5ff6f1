use crate::{
    commands::{Commands, SqlSource},
    error::CliError,
};
use clap::Parser;
use engine_processing::{compile_filters, config::CompilerSettings};
use model::{
    core::{
        database::DatabaseType,
        operator::{ColumnCategory, OperatorInfo, operators_for_column_type},
    },
    filter::condition::FilterCondition,
};
use serde::Serialize;
use sql_syntax::{SqlValidation, detect_dangerous_operations, is_read_only_query, parse_sql, validate_sql};
use std::{path::Path, str::FromStr};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "querykit",
    version = "0.1.0",
    about = "Cross-dialect filter compiler and SQL checker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SqlReport {
    #[serde(flatten)]
    validation: SqlValidation,
    dangerous_operations: Vec<String>,
    read_only: bool,
}

impl SqlReport {
    fn new(sql: &str) -> Self {
        Self {
            validation: validate_sql(sql),
            dangerous_operations: detect_dangerous_operations(sql),
            read_only: is_read_only_query(sql),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OperatorReport {
    category: ColumnCategory,
    operators: Vec<&'static OperatorInfo>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // stdout is reserved for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            db,
            logic,
            input,
            settings,
            output,
        } => {
            let db_type = DatabaseType::from_str(&db)?;
            let logic = logic.parse()?;
            let settings = CompilerSettings::load(settings.as_deref().map(Path::new))?;

            let source = tokio::fs::read_to_string(&input).await?;
            let conditions: Vec<FilterCondition> = serde_json::from_str(&source)?;
            info!(database = %db_type, conditions = conditions.len(), "Compiling filters from {input}");

            let compiled = compile_filters(db_type, &conditions, logic, &settings)?;
            for diagnostic in compiled.diagnostics() {
                warn!(kind = ?diagnostic.kind, "{}", diagnostic.message);
            }
            output::emit(&compiled, output).await?;
        }
        Commands::ValidateSql { source } => {
            let sql = read_sql(source).await?;
            output::emit(&SqlReport::new(&sql), None).await?;
        }
        Commands::ParseSql { source } => {
            let sql = read_sql(source).await?;
            output::emit(&parse_sql(&sql), None).await?;
        }
        Commands::Operators { column_type } => {
            let report = OperatorReport {
                category: ColumnCategory::from_type_name(&column_type),
                operators: operators_for_column_type(&column_type)
                    .iter()
                    .map(|op| op.info())
                    .collect(),
            };
            output::emit(&report, None).await?;
        }
    }

    Ok(())
}

async fn read_sql(source: SqlSource) -> Result<String, CliError> {
    match (source.sql, source.file) {
        (Some(sql), _) => Ok(sql),
        (None, Some(path)) => Ok(tokio::fs::read_to_string(path).await?),
        (None, None) => Err(CliError::MissingSql),
    }
}
