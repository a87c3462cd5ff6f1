//! Structural checks and normalization applied to filter rows before they
//! reach a translator.

use crate::{
    core::{operator::FilterOperator, value::Value},
    filter::condition::FilterCondition,
};
use serde::Serialize;

/// Outcome of [`validate_filter`]. Every failing rule contributes a message so
/// a form can show all problems at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_condition: Option<FilterCondition>,
}

pub fn validate_filter(condition: &FilterCondition) -> FilterValidation {
    let mut errors = Vec::new();

    if condition.id.is_empty() {
        errors.push("Filter must have an id".to_string());
    }

    if condition.column_name.trim().is_empty() {
        errors.push("Column name is required".to_string());
    }

    let operator = if condition.operator.is_empty() {
        errors.push("Operator is required".to_string());
        None
    } else {
        match condition.operator.parse::<FilterOperator>() {
            Ok(op) => Some(op),
            Err(err) => {
                errors.push(err.to_string());
                None
            }
        }
    };

    if let Some(op) = operator {
        check_operands(op, condition, &mut errors);
    }

    let valid = errors.is_empty();
    FilterValidation {
        valid,
        errors,
        normalized_condition: valid.then(|| normalize_filter(condition)),
    }
}

fn check_operands(op: FilterOperator, condition: &FilterCondition, errors: &mut Vec<String>) {
    if op.requires_value() {
        match &condition.value {
            None => errors.push(format!("Value is required for operator: {op}")),
            Some(value) if op.info().rejects_blank && value.is_blank() => {
                errors.push(format!("Value cannot be empty for operator: {op}"));
            }
            Some(_) => {}
        }
    }

    if op.requires_value2() && condition.second_value().is_none() {
        errors.push("Second value is required for between operator".to_string());
    }

    if op == FilterOperator::In
        && let Some(value) = &condition.value
        && parse_in_values(value).is_empty()
    {
        errors.push("At least one value is required for in operator".to_string());
    }
}

pub fn validate_filters(conditions: &[FilterCondition]) -> Vec<FilterValidation> {
    conditions.iter().map(validate_filter).collect()
}

/// Trims the column and string operands, and expands a delimited `in` string
/// into a list. Applying it twice yields the same condition.
pub fn normalize_filter(condition: &FilterCondition) -> FilterCondition {
    let is_in = condition.parsed_operator() == Some(FilterOperator::In);

    let value = condition.value.as_ref().map(|value| match value {
        Value::String(s) if is_in => Value::Array(split_delimited(s)),
        Value::Array(items) => Value::Array(items.iter().map(Value::trimmed).collect()),
        other => other.trimmed(),
    });

    FilterCondition {
        id: condition.id.clone(),
        column_name: condition.column_name.trim().to_string(),
        operator: condition.operator.clone(),
        value,
        value2: condition.value2.as_ref().map(Value::trimmed),
    }
}

/// Expands an `in` operand into its ordered elements. Duplicates are kept;
/// blank strings and nulls are dropped.
pub fn parse_in_values(value: &Value) -> Vec<Value> {
    match value {
        Value::String(s) => split_delimited(s),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null() && !item.is_blank())
            .map(Value::trimmed)
            .collect(),
        Value::Null => Vec::new(),
        scalar => vec![scalar.clone()],
    }
}

fn split_delimited(s: &str) -> Vec<Value> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| Value::String(part.to_string()))
        .collect()
}

/// A row with nothing to filter on. Null checks are never empty.
pub fn is_filter_empty(condition: &FilterCondition) -> bool {
    if matches!(
        condition.parsed_operator(),
        Some(FilterOperator::IsNull | FilterOperator::IsNotNull)
    ) {
        return false;
    }

    match &condition.value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

pub fn remove_empty_filters(conditions: &[FilterCondition]) -> Vec<FilterCondition> {
    conditions
        .iter()
        .filter(|c| !is_filter_empty(c))
        .cloned()
        .collect()
}
