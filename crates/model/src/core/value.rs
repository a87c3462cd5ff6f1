use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A scalar (or list of scalars) supplied as a filter operand.
///
/// Deserializes untagged so the JSON produced by the UI (`18`, `"john"`,
/// `["a", "b"]`, `null`) maps directly onto a variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value as text, used when a value has to be spliced into a
    /// pattern (`%value%`, `^value`, `*value*`).
    pub fn as_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(Value::as_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for strings that trim to nothing. Non-string values are never blank.
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::String(s) if s.trim().is_empty())
    }

    /// Returns a copy with surrounding whitespace removed from string values.
    pub fn trimmed(&self) -> Value {
        match self {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::String(s) => write!(f, "'{s}'"),
            Value::Array(items) => {
                let rendered = items.iter().map(|v| v.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", rendered.join(", "))
            }
            other => write!(f, "{}", other.as_string()),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Keeps an explicit JSON `null` as `Some(Value::Null)`; only a missing key
/// becomes `None` (via `#[serde(default)]`).
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
