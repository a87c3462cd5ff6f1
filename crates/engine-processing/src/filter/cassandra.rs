use super::compiler::FilterCompiler;
use crate::{config::CompilerSettings, error::ProcessingError};
use connectors::cassandra::filter::{CassandraFilter, build_cassandra_filter, needs_allow_filtering};
use model::{core::operator::LogicOperator, filter::condition::FilterCondition};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CassandraQuery {
    #[serde(flatten)]
    pub filter: CassandraFilter,
    /// The statement must carry `ALLOW FILTERING` to run.
    pub allow_filtering: bool,
}

pub struct CassandraFilterCompiler;

impl FilterCompiler for CassandraFilterCompiler {
    type Filter = CassandraQuery;

    fn compile(
        &self,
        conditions: &[FilterCondition],
        logic: LogicOperator,
        _settings: &CompilerSettings,
    ) -> Result<Self::Filter, ProcessingError> {
        Ok(CassandraQuery {
            filter: build_cassandra_filter(conditions, logic),
            allow_filtering: needs_allow_filtering(conditions),
        })
    }
}
