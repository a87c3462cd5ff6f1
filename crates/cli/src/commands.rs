use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a JSON list of filter conditions for a database type
    Compile {
        /// Database type: "postgres", "mysql", "mariadb", "sqlserver", "sqlite",
        /// "mongodb", "elasticsearch", "cassandra"
        #[arg(long)]
        db: String,

        #[arg(long, default_value = "AND", help = "How conditions are joined (AND | OR)")]
        logic: String,

        #[arg(long, help = "JSON file holding an array of filter conditions")]
        input: String,

        #[arg(long, help = "Optional compiler settings JSON file")]
        settings: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the JSON result to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Check SQL text for structural errors and risky operations
    ValidateSql {
        #[command(flatten)]
        source: SqlSource,
    },
    /// Print the structural summary of a SQL statement
    ParseSql {
        #[command(flatten)]
        source: SqlSource,
    },
    /// List the filter operators that apply to a column type
    Operators {
        #[arg(long, help = "Raw column type name, e.g. \"varchar(255)\"")]
        column_type: String,
    },
}

#[derive(Args)]
pub struct SqlSource {
    #[arg(long, conflicts_with = "file", help = "SQL text")]
    pub sql: Option<String>,

    #[arg(long, help = "File containing the SQL text")]
    pub file: Option<String>,
}
