//! The filter operator registry.
//!
//! Every translator and the validator consult [`OperatorInfo`] instead of
//! re-deriving arity and applicability rules per backend.

use crate::error::FilterError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    IsNull,
    IsNotNull,
    In,
    Between,
}

/// How many operands an operator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueArity {
    /// `is_null` / `is_not_null`
    None,
    Single,
    /// `in`: a list or a comma-delimited string.
    List,
    /// `between`: `value` and `value2`.
    Range,
}

/// Coarse classification of a column's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnCategory {
    Text,
    Numeric,
    Temporal,
    Boolean,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorInfo {
    pub operator: FilterOperator,
    pub label: &'static str,
    pub symbol: &'static str,
    pub arity: ValueArity,
    /// The operand must not trim to an empty string.
    pub rejects_blank: bool,
    pub categories: &'static [ColumnCategory],
}

const ALL_CATEGORIES: &[ColumnCategory] = &[
    ColumnCategory::Text,
    ColumnCategory::Numeric,
    ColumnCategory::Temporal,
    ColumnCategory::Boolean,
    ColumnCategory::Other,
];
const TEXT_ONLY: &[ColumnCategory] = &[ColumnCategory::Text, ColumnCategory::Other];
const ORDERED: &[ColumnCategory] = &[
    ColumnCategory::Text,
    ColumnCategory::Numeric,
    ColumnCategory::Temporal,
];
const LISTABLE: &[ColumnCategory] = &[
    ColumnCategory::Text,
    ColumnCategory::Numeric,
    ColumnCategory::Temporal,
    ColumnCategory::Other,
];

pub const OPERATORS: [OperatorInfo; 14] = [
    OperatorInfo {
        operator: FilterOperator::Equals,
        label: "Equals",
        symbol: "=",
        arity: ValueArity::Single,
        rejects_blank: false,
        categories: ALL_CATEGORIES,
    },
    OperatorInfo {
        operator: FilterOperator::NotEquals,
        label: "Not equals",
        symbol: "!=",
        arity: ValueArity::Single,
        rejects_blank: false,
        categories: ALL_CATEGORIES,
    },
    OperatorInfo {
        operator: FilterOperator::Contains,
        label: "Contains",
        symbol: "LIKE",
        arity: ValueArity::Single,
        rejects_blank: true,
        categories: TEXT_ONLY,
    },
    OperatorInfo {
        operator: FilterOperator::NotContains,
        label: "Does not contain",
        symbol: "NOT LIKE",
        arity: ValueArity::Single,
        rejects_blank: true,
        categories: TEXT_ONLY,
    },
    OperatorInfo {
        operator: FilterOperator::StartsWith,
        label: "Starts with",
        symbol: "LIKE",
        arity: ValueArity::Single,
        rejects_blank: true,
        categories: TEXT_ONLY,
    },
    OperatorInfo {
        operator: FilterOperator::EndsWith,
        label: "Ends with",
        symbol: "LIKE",
        arity: ValueArity::Single,
        rejects_blank: true,
        categories: TEXT_ONLY,
    },
    OperatorInfo {
        operator: FilterOperator::GreaterThan,
        label: "Greater than",
        symbol: ">",
        arity: ValueArity::Single,
        rejects_blank: false,
        categories: ORDERED,
    },
    OperatorInfo {
        operator: FilterOperator::LessThan,
        label: "Less than",
        symbol: "<",
        arity: ValueArity::Single,
        rejects_blank: false,
        categories: ORDERED,
    },
    OperatorInfo {
        operator: FilterOperator::GreaterOrEqual,
        label: "Greater or equal",
        symbol: ">=",
        arity: ValueArity::Single,
        rejects_blank: false,
        categories: ORDERED,
    },
    OperatorInfo {
        operator: FilterOperator::LessOrEqual,
        label: "Less or equal",
        symbol: "<=",
        arity: ValueArity::Single,
        rejects_blank: false,
        categories: ORDERED,
    },
    OperatorInfo {
        operator: FilterOperator::IsNull,
        label: "Is null",
        symbol: "IS NULL",
        arity: ValueArity::None,
        rejects_blank: false,
        categories: ALL_CATEGORIES,
    },
    OperatorInfo {
        operator: FilterOperator::IsNotNull,
        label: "Is not null",
        symbol: "IS NOT NULL",
        arity: ValueArity::None,
        rejects_blank: false,
        categories: ALL_CATEGORIES,
    },
    OperatorInfo {
        operator: FilterOperator::In,
        label: "In list",
        symbol: "IN",
        arity: ValueArity::List,
        rejects_blank: true,
        categories: LISTABLE,
    },
    OperatorInfo {
        operator: FilterOperator::Between,
        label: "Between",
        symbol: "BETWEEN",
        arity: ValueArity::Range,
        rejects_blank: false,
        categories: ORDERED,
    },
];

lazy_static! {
    static ref COLUMN_CATEGORY_MAP: HashMap<&'static str, ColumnCategory> = build_category_map();
}

fn build_category_map() -> HashMap<&'static str, ColumnCategory> {
    use ColumnCategory::*;

    let entries: &[(&str, ColumnCategory)] = &[
        ("text", Text),
        ("varchar", Text),
        ("char", Text),
        ("character varying", Text),
        ("character", Text),
        ("nvarchar", Text),
        ("nchar", Text),
        ("ntext", Text),
        ("tinytext", Text),
        ("mediumtext", Text),
        ("longtext", Text),
        ("citext", Text),
        ("string", Text),
        ("keyword", Text),
        ("ascii", Text),
        ("uuid", Text),
        ("int", Numeric),
        ("integer", Numeric),
        ("smallint", Numeric),
        ("tinyint", Numeric),
        ("mediumint", Numeric),
        ("bigint", Numeric),
        ("serial", Numeric),
        ("bigserial", Numeric),
        ("decimal", Numeric),
        ("numeric", Numeric),
        ("real", Numeric),
        ("float", Numeric),
        ("double", Numeric),
        ("double precision", Numeric),
        ("money", Numeric),
        ("long", Numeric),
        ("short", Numeric),
        ("varint", Numeric),
        ("counter", Numeric),
        ("date", Temporal),
        ("time", Temporal),
        ("datetime", Temporal),
        ("datetime2", Temporal),
        ("timestamp", Temporal),
        ("timestamptz", Temporal),
        ("interval", Temporal),
        ("year", Temporal),
        ("bool", Boolean),
        ("boolean", Boolean),
        ("bit", Boolean),
    ];

    entries.iter().copied().collect()
}

impl ColumnCategory {
    /// Classifies a raw column type such as `VARCHAR(255)`, `int4` or
    /// `timestamp with time zone`.
    pub fn from_type_name(type_name: &str) -> Self {
        let lower = type_name.trim().to_ascii_lowercase();
        let base = lower.split('(').next().unwrap_or_default().trim();

        if let Some(category) = COLUMN_CATEGORY_MAP.get(base) {
            return *category;
        }

        if base.contains("bool") {
            ColumnCategory::Boolean
        } else if base.contains("int")
            || base.contains("float")
            || base.contains("double")
            || base.contains("numeric")
            || base.contains("decimal")
        {
            ColumnCategory::Numeric
        } else if base.contains("date") || base.contains("time") {
            ColumnCategory::Temporal
        } else if base.contains("char") || base.contains("text") {
            ColumnCategory::Text
        } else {
            ColumnCategory::Other
        }
    }
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 14] = [
        FilterOperator::Equals,
        FilterOperator::NotEquals,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
        FilterOperator::GreaterOrEqual,
        FilterOperator::LessOrEqual,
        FilterOperator::IsNull,
        FilterOperator::IsNotNull,
        FilterOperator::In,
        FilterOperator::Between,
    ];

    pub fn info(&self) -> &'static OperatorInfo {
        // OPERATORS is declared in the same order as the enum.
        &OPERATORS[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not_equals",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
            FilterOperator::GreaterOrEqual => "greater_or_equal",
            FilterOperator::LessOrEqual => "less_or_equal",
            FilterOperator::IsNull => "is_null",
            FilterOperator::IsNotNull => "is_not_null",
            FilterOperator::In => "in",
            FilterOperator::Between => "between",
        }
    }

    /// Operators that need `value` (everything except the null checks and `between`).
    pub fn requires_value(&self) -> bool {
        matches!(self.info().arity, ValueArity::Single | ValueArity::List)
    }

    pub fn requires_value2(&self) -> bool {
        self.info().arity == ValueArity::Range
    }

    pub fn is_null_check(&self) -> bool {
        self.info().arity == ValueArity::None
    }

    pub fn is_text_search(&self) -> bool {
        matches!(
            self,
            FilterOperator::Contains
                | FilterOperator::NotContains
                | FilterOperator::StartsWith
                | FilterOperator::EndsWith
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            FilterOperator::GreaterThan
                | FilterOperator::LessThan
                | FilterOperator::GreaterOrEqual
                | FilterOperator::LessOrEqual
        )
    }

    pub fn applies_to(&self, category: ColumnCategory) -> bool {
        self.info().categories.contains(&category)
    }
}

/// Operators a UI should offer for a column of the given declared type.
pub fn operators_for_column_type(type_name: &str) -> Vec<FilterOperator> {
    let category = ColumnCategory::from_type_name(type_name);
    FilterOperator::ALL
        .into_iter()
        .filter(|op| op.applies_to(category))
        .collect()
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FilterError::InvalidOperator(s.to_string()))
    }
}

/// How the compiled conditions of a filter list are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOperator {
    #[default]
    And,
    Or,
}

impl LogicOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicOperator::And => "AND",
            LogicOperator::Or => "OR",
        }
    }

    /// The separator placed between textual fragments (`" AND "` / `" OR "`).
    pub fn separator(&self) -> &'static str {
        match self {
            LogicOperator::And => " AND ",
            LogicOperator::Or => " OR ",
        }
    }
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogicOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(LogicOperator::And),
            "OR" => Ok(LogicOperator::Or),
            _ => Err(FilterError::InvalidLogic(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for op in FilterOperator::ALL {
            assert_eq!(op.info().operator, op);
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for op in FilterOperator::ALL {
            assert_eq!(op.as_str().parse::<FilterOperator>().unwrap(), op);
        }
        assert_eq!(
            "like".parse::<FilterOperator>(),
            Err(FilterError::InvalidOperator("like".into()))
        );
    }

    #[test]
    fn test_value_requirements() {
        assert!(FilterOperator::Equals.requires_value());
        assert!(FilterOperator::In.requires_value());
        assert!(!FilterOperator::Between.requires_value());
        assert!(FilterOperator::Between.requires_value2());
        assert!(!FilterOperator::IsNull.requires_value());
        assert!(FilterOperator::IsNotNull.is_null_check());
    }

    #[test]
    fn test_column_categories() {
        assert_eq!(ColumnCategory::from_type_name("VARCHAR(255)"), ColumnCategory::Text);
        assert_eq!(ColumnCategory::from_type_name("int4"), ColumnCategory::Numeric);
        assert_eq!(
            ColumnCategory::from_type_name("timestamp with time zone"),
            ColumnCategory::Temporal
        );
        assert_eq!(ColumnCategory::from_type_name("tinyint(1)"), ColumnCategory::Numeric);
        assert_eq!(ColumnCategory::from_type_name("jsonb"), ColumnCategory::Other);
    }

    #[test]
    fn test_operators_for_boolean_column() {
        let ops = operators_for_column_type("boolean");
        assert_eq!(
            ops,
            vec![
                FilterOperator::Equals,
                FilterOperator::NotEquals,
                FilterOperator::IsNull,
                FilterOperator::IsNotNull,
            ]
        );
    }

    #[test]
    fn test_text_search_only_on_text_columns() {
        let ops = operators_for_column_type("text");
        assert!(ops.contains(&FilterOperator::Contains));
        assert!(ops.contains(&FilterOperator::Between));
        let ops = operators_for_column_type("bigint");
        assert!(!ops.contains(&FilterOperator::Contains));
    }

    #[test]
    fn test_operator_groups() {
        assert!(FilterOperator::StartsWith.is_text_search());
        assert!(!FilterOperator::Equals.is_text_search());
        assert!(FilterOperator::LessOrEqual.is_comparison());
        assert!(!FilterOperator::Between.is_comparison());
    }

    #[test]
    fn test_info_serializes_camel_case() {
        let json = serde_json::to_value(FilterOperator::Equals.info()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "operator": "equals",
                "label": "Equals",
                "symbol": "=",
                "arity": "Single",
                "rejectsBlank": false,
                "categories": ["Text", "Numeric", "Temporal", "Boolean", "Other"],
            })
        );
    }

    #[test]
    fn test_logic_parse() {
        assert_eq!("or".parse::<LogicOperator>().unwrap(), LogicOperator::Or);
        assert_eq!(LogicOperator::And.separator(), " AND ");
        assert!("xor".parse::<LogicOperator>().is_err());
    }
}
