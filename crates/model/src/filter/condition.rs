use crate::core::{
    operator::FilterOperator,
    value::{Value, deserialize_present},
};
use serde::{Deserialize, Serialize};

/// One user-specified predicate, as edited in a filter row.
///
/// `operator` is kept as the raw tag so partially-filled or unknown operators
/// survive deserialization; translators skip what they cannot parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub column_name: String,
    #[serde(default)]
    pub operator: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value2: Option<Value>,
}

impl FilterCondition {
    pub fn new(id: impl Into<String>, column_name: impl Into<String>, operator: FilterOperator) -> Self {
        Self {
            id: id.into(),
            column_name: column_name.into(),
            operator: operator.as_str().to_string(),
            value: None,
            value2: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_value2(mut self, value2: impl Into<Value>) -> Self {
        self.value2 = Some(value2.into());
        self
    }

    /// The parsed operator, or `None` for an empty or unknown tag.
    pub fn parsed_operator(&self) -> Option<FilterOperator> {
        self.operator.parse().ok()
    }

    /// A row with a blank column or operator is still being edited and is
    /// never compiled.
    pub fn is_compilable(&self) -> bool {
        !self.column_name.trim().is_empty() && !self.operator.is_empty()
    }

    /// Returns the column and operator when the row is ready to compile.
    pub fn target(&self) -> Option<(&str, FilterOperator)> {
        if !self.is_compilable() {
            return None;
        }
        self.parsed_operator().map(|op| (self.column_name.as_str(), op))
    }

    /// `value2`, treating an explicit null like an absent operand.
    pub fn second_value(&self) -> Option<&Value> {
        self.value2.as_ref().filter(|v| !v.is_null())
    }
}
