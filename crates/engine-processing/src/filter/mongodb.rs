use super::compiler::FilterCompiler;
use crate::{config::CompilerSettings, error::ProcessingError};
use connectors::mongodb::filter::{MongoFilter, build_mongo_filter};
use model::{core::operator::LogicOperator, filter::condition::FilterCondition};

pub struct MongoFilterCompiler;

impl FilterCompiler for MongoFilterCompiler {
    type Filter = MongoFilter;

    fn compile(
        &self,
        conditions: &[FilterCondition],
        logic: LogicOperator,
        _settings: &CompilerSettings,
    ) -> Result<Self::Filter, ProcessingError> {
        Ok(build_mongo_filter(conditions, logic))
    }
}
