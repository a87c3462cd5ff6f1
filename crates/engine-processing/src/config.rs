//! Compiler settings: JSON file, then `QUERYKIT_*` environment overrides.

use crate::error::ProcessingError;
use connectors::elasticsearch::search::{DEFAULT_FROM, DEFAULT_SIZE};
use model::filter::policy::MalformedPolicy;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path, str::FromStr};
use tracing::debug;

pub const ENV_MALFORMED_POLICY: &str = "QUERYKIT_MALFORMED_POLICY";
pub const ENV_SQL_START_INDEX: &str = "QUERYKIT_SQL_START_INDEX";
pub const ENV_SEARCH_SIZE: &str = "QUERYKIT_SEARCH_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerSettings {
    /// Overrides the per-entry-point default for malformed rows.
    pub malformed_policy: Option<MalformedPolicy>,
    /// First SQL placeholder index; `None` keeps the dialect default.
    pub sql_start_index: Option<usize>,
    /// Route SQL Server through the named-parameter path.
    pub sqlserver_named_params: bool,
    pub search_size: usize,
    pub search_from: usize,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            malformed_policy: None,
            sql_start_index: None,
            sqlserver_named_params: true,
            search_size: DEFAULT_SIZE,
            search_from: DEFAULT_FROM,
        }
    }
}

impl CompilerSettings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProcessingError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ProcessingError::SettingsRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ProcessingError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Settings from `path` (or defaults) with the process environment
    /// applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ProcessingError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let env: HashMap<String, String> = std::env::vars().collect();
        settings.with_env(&env)
    }

    /// Applies the `QUERYKIT_*` overrides found in `vars`.
    pub fn with_env(mut self, vars: &HashMap<String, String>) -> Result<Self, ProcessingError> {
        if let Some(value) = vars.get(ENV_MALFORMED_POLICY) {
            self.malformed_policy = Some(value.parse()?);
        }
        if let Some(value) = vars.get(ENV_SQL_START_INDEX) {
            self.sql_start_index = Some(parse_env(ENV_SQL_START_INDEX, value)?);
        }
        if let Some(value) = vars.get(ENV_SEARCH_SIZE) {
            self.search_size = parse_env(ENV_SEARCH_SIZE, value)?;
        }
        debug!(settings = ?self, "Resolved compiler settings");
        Ok(self)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ProcessingError> {
    value
        .trim()
        .parse()
        .map_err(|_| ProcessingError::InvalidEnv {
            key: key.to_string(),
            value: value.to_string(),
        })
}
