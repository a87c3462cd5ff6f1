use super::compiler::FilterCompiler;
use crate::{config::CompilerSettings, error::ProcessingError};
use connectors::elasticsearch::search::{SearchBody, SearchOptions, build_elasticsearch_search_body};
use model::{core::operator::LogicOperator, filter::condition::FilterCondition};

/// Produces a full `_search` body paginated by the settings.
pub struct ElasticsearchFilterCompiler;

impl FilterCompiler for ElasticsearchFilterCompiler {
    type Filter = SearchBody;

    fn compile(
        &self,
        conditions: &[FilterCondition],
        logic: LogicOperator,
        settings: &CompilerSettings,
    ) -> Result<Self::Filter, ProcessingError> {
        let options = SearchOptions {
            from: Some(settings.search_from),
            size: Some(settings.search_size),
            sort: None,
        };
        Ok(build_elasticsearch_search_body(conditions, logic, &options))
    }
}
