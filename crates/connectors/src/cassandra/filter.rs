//! Compiles filter rows into a CQL WHERE fragment.
//!
//! CQL accepts a much smaller predicate surface than SQL. Conditions CQL
//! cannot express are reported as [`Diagnostic`]s (and logged) instead of
//! failing compilation.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use model::{
    core::{
        operator::{FilterOperator, LogicOperator},
        value::Value,
    },
    filter::{condition::FilterCondition, validation::parse_in_values},
};
use planner::query::dialect::quote_with;
use serde::Serialize;
use tracing::warn;

pub const NOT_CONTAINS_WARNING: &str =
    "Cassandra does not support NOT CONTAINS. Filter will be applied client-side.";
pub const OR_WARNING: &str = "Cassandra does not natively support OR in WHERE clauses. \
     Consider using ALLOW FILTERING or running multiple queries.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CassandraFilter {
    pub where_clause: String,
    pub params: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

pub fn quote_identifier(ident: &str) -> String {
    quote_with(ident, '"', '"')
}

/// Builds the CQL fragment with `?` placeholders.
///
/// `between` expands to two comparisons that are joined with the other
/// clauses by `logic`. OR is emitted textually but flagged, since the caller
/// has to fall back to `ALLOW FILTERING` or split the query.
pub fn build_cassandra_filter(
    conditions: &[FilterCondition],
    logic: LogicOperator,
) -> CassandraFilter {
    let mut clauses = Vec::new();
    let mut params = Vec::new();
    let mut diagnostics = Vec::new();

    for condition in conditions {
        let Some((column, op)) = condition.target() else {
            continue;
        };
        let col = quote_identifier(column);

        match op {
            FilterOperator::IsNull => clauses.push(format!("{col} = NULL")),
            FilterOperator::IsNotNull => clauses.push(format!("{col} != NULL")),

            FilterOperator::NotContains => {
                warn!(column = %column, "{NOT_CONTAINS_WARNING}");
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::UnsupportedOperator, NOT_CONTAINS_WARNING)
                        .for_condition(&condition.id),
                );
            }

            FilterOperator::Between => {
                let (Some(low), Some(high)) = (condition.value.as_ref(), condition.second_value())
                else {
                    continue;
                };
                clauses.push(format!("{col} >= ?"));
                params.push(low.clone());
                clauses.push(format!("{col} <= ?"));
                params.push(high.clone());
            }

            FilterOperator::In => {
                let values = condition
                    .value
                    .as_ref()
                    .map(parse_in_values)
                    .unwrap_or_default();
                if values.is_empty() {
                    continue;
                }
                let placeholders = vec!["?"; values.len()].join(", ");
                clauses.push(format!("{col} IN ({placeholders})"));
                params.extend(values);
            }

            FilterOperator::Equals
            | FilterOperator::NotEquals
            | FilterOperator::GreaterThan
            | FilterOperator::LessThan
            | FilterOperator::GreaterOrEqual
            | FilterOperator::LessOrEqual
            | FilterOperator::Contains
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith => {
                let Some(value) = condition.value.as_ref() else {
                    continue;
                };
                let (keyword, param) = match op {
                    FilterOperator::Contains => ("CONTAINS", value.clone()),
                    FilterOperator::StartsWith => {
                        ("LIKE", Value::String(format!("{}%", value.as_string())))
                    }
                    FilterOperator::EndsWith => {
                        ("LIKE", Value::String(format!("%{}", value.as_string())))
                    }
                    _ => (op.info().symbol, value.clone()),
                };
                clauses.push(format!("{col} {keyword} ?"));
                params.push(param);
            }
        }
    }

    if logic == LogicOperator::Or && clauses.len() > 1 {
        warn!("{OR_WARNING}");
        diagnostics.push(Diagnostic::new(DiagnosticKind::UnsupportedLogic, OR_WARNING));
    }

    CassandraFilter {
        where_clause: clauses.join(logic.separator()),
        params,
        diagnostics,
    }
}

/// `true` when any condition needs a secondary index or a full scan, i.e.
/// uses a comparison, text search, `not_equals` or `between`.
pub fn needs_allow_filtering(conditions: &[FilterCondition]) -> bool {
    conditions
        .iter()
        .filter_map(FilterCondition::target)
        .any(|(_, op)| {
            op.is_comparison()
                || op.is_text_search()
                || matches!(op, FilterOperator::NotEquals | FilterOperator::Between)
        })
}
