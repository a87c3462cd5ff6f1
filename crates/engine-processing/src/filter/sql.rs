use super::compiler::FilterCompiler;
use crate::{config::CompilerSettings, error::ProcessingError};
use model::{
    core::{database::SqlDialect, operator::LogicOperator},
    filter::condition::FilterCondition,
};
use planner::query::filter::{
    NamedSqlFilter, SqlFilter, SqlFilterOptions, build_sql_filter, build_sql_filter_named,
};

/// Positional placeholders in the dialect's native style.
pub struct SqlFilterCompiler {
    pub dialect: SqlDialect,
}

impl FilterCompiler for SqlFilterCompiler {
    type Filter = SqlFilter;

    fn compile(
        &self,
        conditions: &[FilterCondition],
        logic: LogicOperator,
        settings: &CompilerSettings,
    ) -> Result<Self::Filter, ProcessingError> {
        let options = with_settings(SqlFilterOptions::new(self.dialect), settings);
        Ok(build_sql_filter(conditions, logic, &options)?)
    }
}

/// `@pN` placeholders with a name-to-value map.
pub struct NamedSqlFilterCompiler {
    pub dialect: SqlDialect,
}

impl FilterCompiler for NamedSqlFilterCompiler {
    type Filter = NamedSqlFilter;

    fn compile(
        &self,
        conditions: &[FilterCondition],
        logic: LogicOperator,
        settings: &CompilerSettings,
    ) -> Result<Self::Filter, ProcessingError> {
        let options = with_settings(SqlFilterOptions::named(self.dialect), settings);
        Ok(build_sql_filter_named(conditions, logic, &options)?)
    }
}

fn with_settings<'a>(
    options: SqlFilterOptions<'a>,
    settings: &CompilerSettings,
) -> SqlFilterOptions<'a> {
    let options = match settings.sql_start_index {
        Some(start) => options.with_start_index(start),
        None => options,
    };
    match settings.malformed_policy {
        Some(policy) => options.with_malformed(policy),
        None => options,
    }
}
