//! Dedup key predicates

use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;

/// A single field value compared by equality
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Exact text match
    Text(String),
    /// Calendar day, stored as `YYYY-MM-DD`
    Date(NaiveDate),
    /// Numeric match
    Number(f64),
}

impl FieldValue {
    /// JSON representation as written into a row
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }

    /// Whether a stored JSON value equals this field value
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldValue::Number(n), Value::Number(v)) => v.as_f64() == Some(*n),
            (_, v) => &self.to_json() == v,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Conjunction of field equalities identifying at most one record in a table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyPredicate {
    /// `(field, value)` pairs, all of which must match
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl KeyPredicate {
    /// Start an empty predicate
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality on `field`
    pub fn eq(mut self, field: &'static str, value: FieldValue) -> Self {
        self.fields.push((field, value));
        self
    }

    /// Whether a stored row satisfies every field of the predicate
    pub fn matches(&self, row: &serde_json::Map<String, Value>) -> bool {
        self.fields.iter().all(|(field, expected)| {
            row.get(*field).map_or(false, |actual| expected.matches(actual))
        })
    }
}
