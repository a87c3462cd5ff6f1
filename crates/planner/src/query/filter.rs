//! Entry points that compile a filter list into a SQL WHERE fragment.

use crate::{
    error::CompileError,
    query::{
        dialect::dialect_for,
        renderer::{ParamStyle, QuoteFn, Renderer},
    },
};
use model::{
    core::{database::SqlDialect, operator::LogicOperator, value::Value},
    filter::{condition::FilterCondition, policy::MalformedPolicy},
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Options for [`build_sql_filter`] and [`build_sql_filter_named`].
#[derive(Clone, Copy)]
pub struct SqlFilterOptions<'a> {
    pub dialect: SqlDialect,
    /// Replaces the dialect's identifier quoting.
    pub quote_identifier: Option<QuoteFn<'a>>,
    /// Index of the first placeholder. Defaults to the dialect's own start
    /// (`$1` for PostgreSQL, `@p0` for SQL Server) or `0` for named parameters.
    pub start_index: Option<usize>,
    pub malformed: MalformedPolicy,
}

impl<'a> SqlFilterOptions<'a> {
    /// Positional options. Malformed `between` rows are skipped.
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            quote_identifier: None,
            start_index: None,
            malformed: MalformedPolicy::Skip,
        }
    }

    /// Named-parameter options. Malformed `between` rows are an error.
    pub fn named(dialect: SqlDialect) -> Self {
        Self {
            malformed: MalformedPolicy::Fail,
            ..Self::new(dialect)
        }
    }

    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn with_quote_identifier(mut self, quote: QuoteFn<'a>) -> Self {
        self.quote_identifier = Some(quote);
        self
    }

    pub fn with_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlFilter {
    pub where_clause: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSqlFilter {
    pub where_clause: String,
    pub params: BTreeMap<String, Value>,
}

impl SqlFilter {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_empty()
    }
}

impl NamedSqlFilter {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_empty()
    }
}

/// Compiles `conditions` into a flat `AND`/`OR` joined fragment using the
/// dialect's placeholder style.
pub fn build_sql_filter(
    conditions: &[FilterCondition],
    logic: LogicOperator,
    options: &SqlFilterOptions,
) -> Result<SqlFilter, CompileError> {
    let dialect = dialect_for(options.dialect);
    let start_index = options
        .start_index
        .unwrap_or_else(|| dialect.default_start_index());

    let mut renderer = Renderer::new(dialect, ParamStyle::Positional, start_index)
        .with_quote(options.quote_identifier);
    let where_clause = compile_conditions(&mut renderer, conditions, logic, options.malformed)?;

    Ok(SqlFilter {
        where_clause,
        params: renderer.finish(),
    })
}

/// Compiles `conditions` with `@p<N>` placeholders and returns the
/// parameters keyed `p<N>`.
pub fn build_sql_filter_named(
    conditions: &[FilterCondition],
    logic: LogicOperator,
    options: &SqlFilterOptions,
) -> Result<NamedSqlFilter, CompileError> {
    let dialect = dialect_for(options.dialect);
    let start_index = options.start_index.unwrap_or(0);

    let mut renderer = Renderer::new(dialect, ParamStyle::Named, start_index)
        .with_quote(options.quote_identifier);
    let where_clause = compile_conditions(&mut renderer, conditions, logic, options.malformed)?;

    Ok(NamedSqlFilter {
        where_clause,
        params: renderer.finish_named(),
    })
}

fn compile_conditions(
    renderer: &mut Renderer,
    conditions: &[FilterCondition],
    logic: LogicOperator,
    policy: MalformedPolicy,
) -> Result<String, CompileError> {
    let mut fragments = Vec::with_capacity(conditions.len());

    for condition in conditions {
        match renderer.render_condition(condition) {
            Ok(Some(fragment)) => fragments.push(fragment),
            Ok(None) => debug!(id = %condition.id, "Skipping incomplete filter condition"),
            Err(err) => match policy {
                MalformedPolicy::Skip => {
                    debug!(id = %condition.id, error = %err, "Skipping malformed filter condition")
                }
                MalformedPolicy::Fail => return Err(err),
            },
        }
    }

    Ok(fragments.join(logic.separator()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::operator::FilterOperator;

    fn age_gt(v: i64) -> FilterCondition {
        FilterCondition::new("1", "age", FilterOperator::GreaterThan).with_value(v)
    }

    #[test]
    fn test_empty_input() {
        let result =
            build_sql_filter(&[], LogicOperator::And, &SqlFilterOptions::new(SqlDialect::Postgres))
                .unwrap();
        assert_eq!(result, SqlFilter::default());

        let named = build_sql_filter_named(
            &[],
            LogicOperator::And,
            &SqlFilterOptions::named(SqlDialect::SqlServer),
        )
        .unwrap();
        assert!(named.params.is_empty());
        assert!(named.is_empty());
    }

    #[test]
    fn test_postgres_greater_than() {
        let result = build_sql_filter(
            &[age_gt(18)],
            LogicOperator::And,
            &SqlFilterOptions::new(SqlDialect::Postgres),
        )
        .unwrap();
        assert_eq!(result.where_clause, r#""age" > $1"#);
        assert_eq!(result.params, vec![Value::Int(18)]);
    }

    #[test]
    fn test_mysql_contains() {
        let cond = FilterCondition::new("1", "name", FilterOperator::Contains).with_value("john");
        let result = build_sql_filter(
            &[cond],
            LogicOperator::And,
            &SqlFilterOptions::new(SqlDialect::MySql),
        )
        .unwrap();
        assert_eq!(result.where_clause, "`name` LIKE ?");
        assert_eq!(result.params, vec![Value::from("%john%")]);
    }

    #[test]
    fn test_or_join_is_flat() {
        let conds = vec![
            age_gt(18),
            FilterCondition::new("2", "name", FilterOperator::Equals).with_value("bob"),
            FilterCondition::new("3", "email", FilterOperator::IsNull),
        ];
        let result = build_sql_filter(
            &conds,
            LogicOperator::Or,
            &SqlFilterOptions::new(SqlDialect::Postgres),
        )
        .unwrap();
        assert_eq!(
            result.where_clause,
            r#""age" > $1 OR "name" = $2 OR "email" IS NULL"#
        );
    }

    #[test]
    fn test_start_index_override() {
        let result = build_sql_filter(
            &[age_gt(1), age_gt(2)],
            LogicOperator::And,
            &SqlFilterOptions::new(SqlDialect::Postgres).with_start_index(4),
        )
        .unwrap();
        assert_eq!(result.where_clause, r#""age" > $4 AND "age" > $5"#);
    }

    #[test]
    fn test_sqlserver_positional_starts_at_zero() {
        let result = build_sql_filter(
            &[age_gt(1), age_gt(2)],
            LogicOperator::And,
            &SqlFilterOptions::new(SqlDialect::SqlServer),
        )
        .unwrap();
        assert_eq!(result.where_clause, "[age] > @p0 AND [age] > @p1");
    }

    #[test]
    fn test_between_positional_skips_missing_value2() {
        let conds = vec![
            FilterCondition::new("1", "price", FilterOperator::Between).with_value(10),
            age_gt(18),
        ];
        let result = build_sql_filter(
            &conds,
            LogicOperator::And,
            &SqlFilterOptions::new(SqlDialect::Postgres),
        )
        .unwrap();
        assert_eq!(result.where_clause, r#""age" > $1"#);
        assert_eq!(result.params, vec![Value::Int(18)]);
    }

    #[test]
    fn test_between_named_fails_on_missing_value2() {
        let conds = vec![FilterCondition::new("1", "price", FilterOperator::Between).with_value(10)];
        let err = build_sql_filter_named(
            &conds,
            LogicOperator::And,
            &SqlFilterOptions::named(SqlDialect::SqlServer),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CompileError::MissingSecondValue {
                column: "price".into()
            }
        );
    }

    #[test]
    fn test_policy_can_be_unified() {
        let conds = vec![FilterCondition::new("1", "price", FilterOperator::Between).with_value(10)];

        let strict = SqlFilterOptions::new(SqlDialect::Postgres).with_malformed(MalformedPolicy::Fail);
        assert!(build_sql_filter(&conds, LogicOperator::And, &strict).is_err());

        let lenient =
            SqlFilterOptions::named(SqlDialect::SqlServer).with_malformed(MalformedPolicy::Skip);
        let result = build_sql_filter_named(&conds, LogicOperator::And, &lenient).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_named_between() {
        let conds = vec![
            FilterCondition::new("1", "price", FilterOperator::Between)
                .with_value(10)
                .with_value2(100),
            FilterCondition::new("2", "name", FilterOperator::StartsWith).with_value("Jo"),
        ];
        let result = build_sql_filter_named(
            &conds,
            LogicOperator::And,
            &SqlFilterOptions::named(SqlDialect::SqlServer),
        )
        .unwrap();
        assert_eq!(
            result.where_clause,
            "[price] BETWEEN @p0 AND @p1 AND CAST([name] AS NVARCHAR(MAX)) LIKE @p2"
        );
        assert_eq!(result.params.get("p0"), Some(&Value::Int(10)));
        assert_eq!(result.params.get("p1"), Some(&Value::Int(100)));
        assert_eq!(result.params.get("p2"), Some(&Value::from("Jo%")));
    }

    #[test]
    fn test_custom_quote_identifier() {
        let quote = |s: &str| format!("t.{s}");
        let result = build_sql_filter(
            &[age_gt(3)],
            LogicOperator::And,
            &SqlFilterOptions::new(SqlDialect::Sqlite).with_quote_identifier(&quote),
        )
        .unwrap();
        assert_eq!(result.where_clause, "t.age > ?");
    }

    #[test]
    fn test_incomplete_rows_are_skipped() {
        let conds = vec![
            FilterCondition::new("1", "", FilterOperator::Equals).with_value(1),
            FilterCondition {
                id: "2".into(),
                column_name: "a".into(),
                operator: String::new(),
                value: Some(Value::Int(1)),
                value2: None,
            },
        ];
        let result = build_sql_filter(
            &conds,
            LogicOperator::And,
            &SqlFilterOptions::new(SqlDialect::MySql),
        )
        .unwrap();
        assert_eq!(result, SqlFilter::default());
    }
}
