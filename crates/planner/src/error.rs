use thiserror::Error;

/// Contract violations found while compiling a filter list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// `between` needs both `value` and `value2`.
    #[error("Between operator requires both value and value2 (column: {column})")]
    MissingSecondValue { column: String },
}
