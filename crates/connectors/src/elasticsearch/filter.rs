//! Compiles filter rows into an Elasticsearch Query DSL `bool` query.

use model::{
    core::{
        operator::{FilterOperator, LogicOperator},
        value::Value,
    },
    filter::{condition::FilterCondition, validation::parse_in_values},
};
use serde::Serialize;
use serde_json::{Value as Json, json};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElasticsearchFilter {
    pub query: Json,
}

/// AND wraps the clauses in `bool.must`, OR in `bool.should` with
/// `minimum_should_match: 1`. No clauses yields `{ "bool": {} }`.
pub fn build_elasticsearch_filter(
    conditions: &[FilterCondition],
    logic: LogicOperator,
) -> ElasticsearchFilter {
    let clauses: Vec<Json> = conditions.iter().filter_map(condition_clause).collect();

    let query = if clauses.is_empty() {
        json!({ "bool": {} })
    } else {
        match logic {
            LogicOperator::And => json!({ "bool": { "must": clauses } }),
            LogicOperator::Or => json!({ "bool": { "should": clauses, "minimum_should_match": 1 } }),
        }
    };

    ElasticsearchFilter { query }
}

fn condition_clause(condition: &FilterCondition) -> Option<Json> {
    let (field, op) = condition.target()?;

    let clause = match op {
        FilterOperator::IsNull => must_not(json!({ "exists": { "field": field } })),
        FilterOperator::IsNotNull => json!({ "exists": { "field": field } }),
        FilterOperator::Between => {
            let low = condition.value.as_ref()?;
            let high = condition.second_value()?;
            json!({ "range": { field: { "gte": low.to_json(), "lte": high.to_json() } } })
        }
        FilterOperator::In => {
            let values = parse_in_values(condition.value.as_ref()?);
            if values.is_empty() {
                return None;
            }
            json!({ "terms": { field: values.iter().map(Value::to_json).collect::<Vec<_>>() } })
        }
        FilterOperator::Equals => json!({ "term": { field: condition.value.as_ref()?.to_json() } }),
        FilterOperator::NotEquals => {
            must_not(json!({ "term": { field: condition.value.as_ref()?.to_json() } }))
        }
        FilterOperator::GreaterThan => range(field, "gt", condition.value.as_ref()?),
        FilterOperator::LessThan => range(field, "lt", condition.value.as_ref()?),
        FilterOperator::GreaterOrEqual => range(field, "gte", condition.value.as_ref()?),
        FilterOperator::LessOrEqual => range(field, "lte", condition.value.as_ref()?),
        FilterOperator::Contains => {
            let text = escape_wildcard(&condition.value.as_ref()?.as_string());
            wildcard(field, format!("*{text}*"))
        }
        FilterOperator::NotContains => {
            let text = escape_wildcard(&condition.value.as_ref()?.as_string());
            must_not(wildcard(field, format!("*{text}*")))
        }
        FilterOperator::StartsWith => {
            let text = condition.value.as_ref()?.as_string().to_lowercase();
            json!({ "prefix": { field: { "value": text, "case_insensitive": true } } })
        }
        FilterOperator::EndsWith => {
            let text = escape_wildcard(&condition.value.as_ref()?.as_string());
            wildcard(field, format!("*{text}"))
        }
    };

    Some(clause)
}

fn must_not(clause: Json) -> Json {
    json!({ "bool": { "must_not": [clause] } })
}

fn range(field: &str, bound: &str, value: &Value) -> Json {
    json!({ "range": { field: { bound: value.to_json() } } })
}

fn wildcard(field: &str, pattern: String) -> Json {
    json!({ "wildcard": { field: { "value": pattern, "case_insensitive": true } } })
}

/// Escapes the wildcard query metacharacters `*`, `?` and `\`.
fn escape_wildcard(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
