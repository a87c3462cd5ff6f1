use thiserror::Error;

/// Errors raised while interpreting the textual parts of a filter request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The operator tag is not one of the known filter operators.
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// The logic operator is neither AND nor OR.
    #[error("Invalid logic operator: {0}")]
    InvalidLogic(String),

    /// The database type is not recognised.
    #[error("Unknown database type: {0}")]
    InvalidDatabaseType(String),

    /// A relational dialect was requested for a non-relational backend.
    #[error("Database type {0} is not a SQL database")]
    NotSqlDatabase(String),

    /// The malformed-row policy is neither `skip` nor `fail`.
    #[error("Invalid malformed policy: {0}")]
    InvalidPolicy(String),
}
