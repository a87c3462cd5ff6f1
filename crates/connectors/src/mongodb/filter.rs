//! Compiles filter rows into a MongoDB query document.

use model::{
    core::{
        operator::{FilterOperator, LogicOperator},
        value::Value,
    },
    filter::{condition::FilterCondition, validation::parse_in_values},
};
use serde::Serialize;
use serde_json::{Map, Value as Json, json};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MongoFilter {
    pub filter: Json,
}

/// Builds the query document. An empty or fully-skipped list yields `{}`
/// (match everything); a single condition is returned unwrapped.
pub fn build_mongo_filter(conditions: &[FilterCondition], logic: LogicOperator) -> MongoFilter {
    let mut clauses: Vec<Json> = conditions.iter().filter_map(condition_document).collect();

    let filter = match clauses.len() {
        0 => Json::Object(Map::new()),
        1 => clauses.remove(0),
        _ => {
            let key = match logic {
                LogicOperator::And => "$and",
                LogicOperator::Or => "$or",
            };
            json!({ key: clauses })
        }
    };

    MongoFilter { filter }
}

/// Wraps the filter in an aggregation `$match` stage.
pub fn build_mongo_match_stage(conditions: &[FilterCondition], logic: LogicOperator) -> Json {
    json!({ "$match": build_mongo_filter(conditions, logic).filter })
}

fn condition_document(condition: &FilterCondition) -> Option<Json> {
    let (field, op) = condition.target()?;

    let predicate = match op {
        FilterOperator::IsNull => json!({ "$eq": null }),
        FilterOperator::IsNotNull => json!({ "$ne": null }),
        FilterOperator::Between => {
            let low = condition.value.as_ref()?;
            let high = condition.second_value()?;
            json!({ "$gte": low.to_json(), "$lte": high.to_json() })
        }
        FilterOperator::In => {
            let values = parse_in_values(condition.value.as_ref()?);
            if values.is_empty() {
                return None;
            }
            json!({ "$in": values.iter().map(Value::to_json).collect::<Vec<_>>() })
        }
        FilterOperator::Equals => condition.value.as_ref()?.to_json(),
        FilterOperator::NotEquals => json!({ "$ne": condition.value.as_ref()?.to_json() }),
        FilterOperator::GreaterThan => json!({ "$gt": condition.value.as_ref()?.to_json() }),
        FilterOperator::LessThan => json!({ "$lt": condition.value.as_ref()?.to_json() }),
        FilterOperator::GreaterOrEqual => json!({ "$gte": condition.value.as_ref()?.to_json() }),
        FilterOperator::LessOrEqual => json!({ "$lte": condition.value.as_ref()?.to_json() }),
        FilterOperator::Contains => regex_predicate(condition.value.as_ref()?, "", ""),
        FilterOperator::NotContains => {
            json!({ "$not": regex_predicate(condition.value.as_ref()?, "", "") })
        }
        FilterOperator::StartsWith => regex_predicate(condition.value.as_ref()?, "^", ""),
        FilterOperator::EndsWith => regex_predicate(condition.value.as_ref()?, "", "$"),
    };

    Some(json!({ field: predicate }))
}

/// Case-insensitive `$regex` matching the value literally.
fn regex_predicate(value: &Value, prefix: &str, suffix: &str) -> Json {
    let pattern = format!("{prefix}{}{suffix}", regex::escape(&value.as_string()));
    json!({ "$regex": pattern, "$options": "i" })
}
