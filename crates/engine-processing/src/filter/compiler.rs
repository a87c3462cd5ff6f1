use crate::{config::CompilerSettings, error::ProcessingError};
use model::{core::operator::LogicOperator, filter::condition::FilterCondition};

/// A trait for compiling a filter list into a backend-specific query.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the conditions, joined by `logic`, into a filter.
    fn compile(
        &self,
        conditions: &[FilterCondition],
        logic: LogicOperator,
        settings: &CompilerSettings,
    ) -> Result<Self::Filter, ProcessingError>;
}
