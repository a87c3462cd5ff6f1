use serde::Serialize;
use std::fmt;

/// Why a translator could not express a condition faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The operator has no native equivalent; the clause was dropped.
    UnsupportedOperator,
    /// The logic operator is not natively supported; the clause was still emitted.
    UnsupportedLogic,
}

/// A non-fatal finding returned alongside a compiled filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_id: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            condition_id: None,
        }
    }

    pub fn for_condition(mut self, id: impl Into<String>) -> Self {
        self.condition_id = Some(id.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
