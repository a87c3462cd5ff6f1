use model::{core::database::DatabaseType, error::FilterError};
use planner::error::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Failed to compile filter: {0}")]
    Compile(#[from] CompileError),

    #[error("Invalid filter request: {0}")]
    Filter(#[from] FilterError),

    /// The backend has no filter translator (e.g. redis).
    #[error("No filter translator for database type: {0}")]
    NoTranslator(DatabaseType),

    #[error("Failed to read settings file '{path}': {source}")]
    SettingsRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for environment variable {key}")]
    InvalidEnv { key: String, value: String },
}
