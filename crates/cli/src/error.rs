use engine_processing::error::ProcessingError;
use model::error::FilterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to deserialize filter conditions: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] FilterError),

    #[error("Failed to compile filters: {0}")]
    Processing(#[from] ProcessingError),

    #[error("Either --sql or --file must be given")]
    MissingSql,
}
