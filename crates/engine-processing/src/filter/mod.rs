//! Database-type dispatch over the per-backend filter compilers.

use crate::{
    config::CompilerSettings,
    error::ProcessingError,
    filter::{
        cassandra::{CassandraFilterCompiler, CassandraQuery},
        compiler::FilterCompiler,
        elasticsearch::ElasticsearchFilterCompiler,
        mongodb::MongoFilterCompiler,
        sql::{NamedSqlFilterCompiler, SqlFilterCompiler},
    },
};
use connectors::{
    diagnostics::Diagnostic, elasticsearch::search::SearchBody, mongodb::filter::MongoFilter,
};
use model::{
    core::{
        database::{DatabaseType, SqlDialect},
        operator::LogicOperator,
    },
    filter::condition::FilterCondition,
};
use planner::query::filter::{NamedSqlFilter, SqlFilter};
use serde::Serialize;
use tracing::debug;

pub mod cassandra;
pub mod compiler;
pub mod elasticsearch;
pub mod mongodb;
pub mod sql;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompiledFilter {
    Sql(SqlFilter),
    SqlNamed(NamedSqlFilter),
    Mongo(MongoFilter),
    Elasticsearch(SearchBody),
    Cassandra(CassandraQuery),
}

impl CompiledFilter {
    /// Non-fatal findings raised while compiling. Only Cassandra reports any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompiledFilter::Cassandra(query) => &query.filter.diagnostics,
            CompiledFilter::Sql(_)
            | CompiledFilter::SqlNamed(_)
            | CompiledFilter::Mongo(_)
            | CompiledFilter::Elasticsearch(_) => &[],
        }
    }
}

/// Compiles `conditions` for the backend behind `db_type`.
///
/// SQL Server goes through the named-parameter path unless
/// `sqlserver_named_params` is off. Redis has no translator.
pub fn compile_filters(
    db_type: DatabaseType,
    conditions: &[FilterCondition],
    logic: LogicOperator,
    settings: &CompilerSettings,
) -> Result<CompiledFilter, ProcessingError> {
    debug!(database = %db_type, conditions = conditions.len(), %logic, "Compiling filters");

    let compiled = match db_type {
        DatabaseType::MongoDb => {
            CompiledFilter::Mongo(MongoFilterCompiler.compile(conditions, logic, settings)?)
        }
        DatabaseType::Elasticsearch => CompiledFilter::Elasticsearch(
            ElasticsearchFilterCompiler.compile(conditions, logic, settings)?,
        ),
        DatabaseType::Cassandra => {
            CompiledFilter::Cassandra(CassandraFilterCompiler.compile(conditions, logic, settings)?)
        }
        DatabaseType::Redis => return Err(ProcessingError::NoTranslator(db_type)),
        DatabaseType::Postgres
        | DatabaseType::MySql
        | DatabaseType::MariaDb
        | DatabaseType::SqlServer
        | DatabaseType::Sqlite => {
            let dialect = SqlDialect::try_from(db_type)?;
            if dialect == SqlDialect::SqlServer && settings.sqlserver_named_params {
                CompiledFilter::SqlNamed(
                    NamedSqlFilterCompiler { dialect }.compile(conditions, logic, settings)?,
                )
            } else {
                CompiledFilter::Sql(SqlFilterCompiler { dialect }.compile(conditions, logic, settings)?)
            }
        }
    };

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::{operator::FilterOperator, value::Value},
        filter::policy::MalformedPolicy,
    };
    use planner::error::CompileError;
    use serde_json::json;

    fn adults() -> Vec<FilterCondition> {
        vec![FilterCondition::new("1", "age", FilterOperator::GreaterThan).with_value(18)]
    }

    fn compile(db: DatabaseType, conditions: &[FilterCondition]) -> CompiledFilter {
        compile_filters(db, conditions, LogicOperator::And, &CompilerSettings::default()).unwrap()
    }

    #[test]
    fn test_sql_dialects_use_positional_params() {
        let CompiledFilter::Sql(pg) = compile(DatabaseType::Postgres, &adults()) else {
            panic!("expected positional SQL");
        };
        assert_eq!(pg.where_clause, r#""age" > $1"#);
        assert_eq!(pg.params, vec![Value::Int(18)]);

        let CompiledFilter::Sql(sqlite) = compile(DatabaseType::Sqlite, &adults()) else {
            panic!("expected positional SQL");
        };
        assert_eq!(sqlite.where_clause, r#""age" > ?"#);
    }

    #[test]
    fn test_sqlserver_defaults_to_named_params() {
        let CompiledFilter::SqlNamed(named) = compile(DatabaseType::SqlServer, &adults()) else {
            panic!("expected named SQL");
        };
        assert_eq!(named.where_clause, "[age] > @p0");
        assert_eq!(named.params.get("p0"), Some(&Value::Int(18)));

        let settings = CompilerSettings {
            sqlserver_named_params: false,
            ..CompilerSettings::default()
        };
        let positional =
            compile_filters(DatabaseType::SqlServer, &adults(), LogicOperator::And, &settings)
                .unwrap();
        assert!(matches!(positional, CompiledFilter::Sql(_)));
    }

    #[test]
    fn test_settings_flow_into_sql_options() {
        let settings = CompilerSettings {
            sql_start_index: Some(4),
            ..CompilerSettings::default()
        };
        let CompiledFilter::Sql(pg) =
            compile_filters(DatabaseType::Postgres, &adults(), LogicOperator::And, &settings)
                .unwrap()
        else {
            panic!("expected positional SQL");
        };
        assert_eq!(pg.where_clause, r#""age" > $4"#);
    }

    #[test]
    fn test_malformed_policy_override() {
        let broken = vec![FilterCondition::new("1", "price", FilterOperator::Between).with_value(1)];

        // positional path skips by default
        let CompiledFilter::Sql(skipped) = compile(DatabaseType::MySql, &broken) else {
            panic!("expected positional SQL");
        };
        assert!(skipped.is_empty());

        let strict = CompilerSettings {
            malformed_policy: Some(MalformedPolicy::Fail),
            ..CompilerSettings::default()
        };
        let err = compile_filters(DatabaseType::MySql, &broken, LogicOperator::And, &strict)
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Compile(CompileError::MissingSecondValue { .. })
        ));

        // named path fails by default
        let err = compile_filters(
            DatabaseType::SqlServer,
            &broken,
            LogicOperator::And,
            &CompilerSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProcessingError::Compile(_)));
    }

    #[test]
    fn test_document_backends() {
        let CompiledFilter::Mongo(mongo) = compile(DatabaseType::MongoDb, &adults()) else {
            panic!("expected mongo");
        };
        assert_eq!(mongo.filter, json!({ "age": { "$gt": 18 } }));

        let CompiledFilter::Elasticsearch(body) = compile(DatabaseType::Elasticsearch, &adults())
        else {
            panic!("expected elasticsearch");
        };
        assert_eq!(body.from, 0);
        assert_eq!(body.size, 100);
        assert_eq!(
            body.query,
            json!({ "bool": { "must": [ { "range": { "age": { "gt": 18 } } } ] } })
        );
    }

    #[test]
    fn test_cassandra_folds_allow_filtering_and_diagnostics() {
        let compiled = compile(DatabaseType::Cassandra, &adults());
        let CompiledFilter::Cassandra(query) = &compiled else {
            panic!("expected cassandra");
        };
        assert_eq!(query.filter.where_clause, r#""age" > ?"#);
        assert!(query.allow_filtering);
        assert!(compiled.diagnostics().is_empty());

        let or = vec![
            FilterCondition::new("1", "a", FilterOperator::Equals).with_value(1),
            FilterCondition::new("2", "b", FilterOperator::Equals).with_value(2),
        ];
        let compiled =
            compile_filters(DatabaseType::Cassandra, &or, LogicOperator::Or, &CompilerSettings::default())
                .unwrap();
        assert_eq!(compiled.diagnostics().len(), 1);
    }

    #[test]
    fn test_redis_has_no_translator() {
        let err = compile_filters(
            DatabaseType::Redis,
            &adults(),
            LogicOperator::And,
            &CompilerSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProcessingError::NoTranslator(DatabaseType::Redis)));
        assert_eq!(err.to_string(), "No filter translator for database type: redis");
    }

    #[test]
    fn test_serialized_kind_tag() {
        let json = serde_json::to_value(compile(DatabaseType::Postgres, &adults())).unwrap();
        assert_eq!(
            json,
            json!({ "kind": "sql", "whereClause": "\"age\" > $1", "params": [18] })
        );
    }
}
