use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a translator does with a condition that is well-formed enough to be
/// compiled but is missing a required operand (e.g. `between` without `value2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Drop the condition and keep compiling the rest.
    #[default]
    Skip,
    /// Abort compilation with an error.
    Fail,
}

impl FromStr for MalformedPolicy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MalformedPolicy::Skip),
            "fail" => Ok(MalformedPolicy::Fail),
            _ => Err(FilterError::InvalidPolicy(s.to_string())),
        }
    }
}
