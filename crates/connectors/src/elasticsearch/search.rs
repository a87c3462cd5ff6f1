use crate::elasticsearch::filter::build_elasticsearch_filter;
use model::{core::operator::LogicOperator, filter::condition::FilterCondition};
use serde::{Deserialize, Serialize};
use serde_json::{Value as Json, json};

pub const DEFAULT_FROM: usize = 0;
pub const DEFAULT_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortField {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    fn to_json(&self) -> Json {
        json!({ self.field.as_str(): { "order": self.order } })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub from: Option<usize>,
    pub size: Option<usize>,
    pub sort: Option<Vec<SortField>>,
}

/// A complete `_search` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBody {
    pub query: Json,
    pub from: usize,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Json>>,
}

/// Wraps the compiled query with pagination. An empty condition list becomes
/// an explicit `match_all`; `sort` is omitted unless supplied.
pub fn build_elasticsearch_search_body(
    conditions: &[FilterCondition],
    logic: LogicOperator,
    options: &SearchOptions,
) -> SearchBody {
    let query = if conditions.is_empty() {
        json!({ "match_all": {} })
    } else {
        build_elasticsearch_filter(conditions, logic).query
    };

    SearchBody {
        query,
        from: options.from.unwrap_or(DEFAULT_FROM),
        size: options.size.unwrap_or(DEFAULT_SIZE),
        sort: options
            .sort
            .as_ref()
            .map(|fields| fields.iter().map(SortField::to_json).collect()),
    }
}
