//! Native values - the in-process representation of column values.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contact::{Country, Email, Phone};
use crate::people::PersonOrTeam;
use crate::period::{Timeline, Week};
use crate::record::Record;

/// A native column value.
///
/// Each converter produces and accepts a subset of these shapes; the
/// converter's `validate` hook rejects the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// No value
    #[default]
    Null,
    /// Checkbox state
    Bool(bool),
    /// Text, status label or mapped status value
    Text(String),
    /// Integer or floating number
    Number(Number),
    /// Date with optional time of day
    Date(DateTime<Local>),
    /// Dropdown labels or mapped dropdown values
    Labels(Vec<String>),
    /// Email address
    Email(Email),
    /// Country
    Country(Country),
    /// Phone number
    Phone(Phone),
    /// Date range
    Timeline(Timeline),
    /// Calendar week
    Week(Week),
    /// Linked item identifiers
    ItemIds(Vec<String>),
    /// Single linked item identifier
    ItemId(String),
    /// People and teams
    People(Vec<PersonOrTeam>),
    /// Single person or team
    Person(PersonOrTeam),
    /// Materialized sub-records
    Records(Vec<Record>),
}

impl Value {
    /// Whether this value counts as "no value" for encoding and change
    /// detection: null, `false`, empty text and empty collections.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Text(s) | Value::ItemId(s) => s.is_empty(),
            Value::Labels(v) | Value::ItemIds(v) => v.is_empty(),
            Value::People(v) => v.is_empty(),
            Value::Records(v) => v.is_empty(),
            _ => false,
        }
    }

    /// Short name of the value's shape, used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::Labels(_) => "labels",
            Value::Email(_) => "email",
            Value::Country(_) => "country",
            Value::Phone(_) => "phone",
            Value::Timeline(_) => "timeline",
            Value::Week(_) => "week",
            Value::ItemIds(_) => "item ids",
            Value::ItemId(_) => "item id",
            Value::People(_) => "people",
            Value::Person(_) => "person",
            Value::Records(_) => "records",
        }
    }

    /// Get the checkbox state.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the number.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the date.
    pub fn as_date(&self) -> Option<&DateTime<Local>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Get the dropdown labels.
    pub fn as_labels(&self) -> Option<&[String]> {
        match self {
            Value::Labels(v) => Some(v),
            _ => None,
        }
    }

    /// Get the linked item ids, single or multiple.
    pub fn as_item_ids(&self) -> Option<Vec<&str>> {
        match self {
            Value::ItemIds(v) => Some(v.iter().map(String::as_str).collect()),
            Value::ItemId(id) => Some(vec![id.as_str()]),
            _ => None,
        }
    }

    /// Get the people, single or multiple.
    pub fn as_people(&self) -> Option<Vec<&PersonOrTeam>> {
        match self {
            Value::People(v) => Some(v.iter().collect()),
            Value::Person(p) => Some(vec![p]),
            _ => None,
        }
    }

    /// Get the sub-records.
    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Value::Records(v) => Some(v),
            _ => None,
        }
    }
}

/// A number column value. The same column may hold either shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integral value
    Int(i64),
    /// Fractional value
    Float(f64),
}

impl Number {
    /// Parse number text. Integral values (including `"3.0"`) become
    /// [`Number::Int`]; non-finite values are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Int(i));
        }
        let f = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Some(Number::Int(f as i64))
        } else {
            Some(Number::Float(f))
        }
    }

    /// The value as a float.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => i.fmt(f),
            Number::Float(v) => v.fmt(f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Int(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<DateTime<Local>> for Value {
    fn from(d: DateTime<Local>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Labels(v)
    }
}

impl From<Email> for Value {
    fn from(e: Email) -> Self {
        Value::Email(e)
    }
}

impl From<Country> for Value {
    fn from(c: Country) -> Self {
        Value::Country(c)
    }
}

impl From<Phone> for Value {
    fn from(p: Phone) -> Self {
        Value::Phone(p)
    }
}

impl From<Timeline> for Value {
    fn from(t: Timeline) -> Self {
        Value::Timeline(t)
    }
}

impl From<Week> for Value {
    fn from(w: Week) -> Self {
        Value::Week(w)
    }
}

impl From<PersonOrTeam> for Value {
    fn from(p: PersonOrTeam) -> Self {
        Value::Person(p)
    }
}

impl From<Vec<PersonOrTeam>> for Value {
    fn from(v: Vec<PersonOrTeam>) -> Self {
        Value::People(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parse_int() {
        assert_eq!(Number::parse("3"), Some(Number::Int(3)));
        assert_eq!(Number::parse(" -12 "), Some(Number::Int(-12)));
        assert!(matches!(Number::parse("3.0"), Some(Number::Int(3))));
    }

    #[test]
    fn test_number_parse_float() {
        assert!(matches!(Number::parse("3.5"), Some(Number::Float(f)) if f == 3.5));
    }

    #[test]
    fn test_number_parse_rejects_garbage() {
        assert_eq!(Number::parse(""), None);
        assert_eq!(Number::parse("abc"), None);
        assert_eq!(Number::parse("NaN"), None);
        assert_eq!(Number::parse("inf"), None);
    }

    #[test]
    fn test_number_mixed_equality() {
        assert_eq!(Number::Int(2), Number::Float(2.0));
        assert_ne!(Number::Int(2), Number::Float(2.5));
        assert_eq!(Number::Float(2.5).to_string(), "2.5");
        assert_eq!(Number::Int(7).to_string(), "7");
    }

    #[test]
    fn test_value_emptiness() {
        assert!(Value::Null.is_empty());
        assert!(Value::Bool(false).is_empty());
        assert!(Value::Text(String::new()).is_empty());
        assert!(Value::Labels(vec![]).is_empty());
        assert!(!Value::Bool(true).is_empty());
        assert!(!Value::from(0i64).is_empty());
        assert!(!Value::from("x").is_empty());
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<bool>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }
}
