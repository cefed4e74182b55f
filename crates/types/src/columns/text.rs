//! Text and long text columns.

use moncol_core::{Json, Result, ValidationError, Value};
use serde_json::json;

use super::{is_blank, malformed, shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};

fn cast_to_text(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => Some(Value::Text(n.to_string())),
        _ => None,
    }
}

/// Text column: a plain string on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextType;

impl ColumnCodec for TextType {
    fn cast(&self, value: &Value) -> Option<Value> {
        cast_to_text(value)
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        match cell.value {
            Json::String(s) => Ok(Value::Text(s.clone())),
            Json::Number(n) => Ok(Value::Text(n.to_string())),
            Json::Null if cell.text.is_empty() => Ok(Value::Null),
            Json::Null => Ok(Value::Text(cell.text.to_string())),
            other => Err(malformed(metadata, format!("unexpected text value: {}", other))),
        }
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Text(s) => Json::String(s.clone()),
            _ => Json::String(String::new()),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        match value {
            Value::Text(_) | Value::Number(_) => Ok(()),
            other => Err(shape_error("text", other)),
        }
    }
}

/// Long text column: `{"text": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongTextType;

impl ColumnCodec for LongTextType {
    fn cast(&self, value: &Value) -> Option<Value> {
        cast_to_text(value)
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(Value::Null);
        }
        match cell.value.get("text") {
            Some(Json::String(s)) if !s.is_empty() => Ok(Value::Text(s.clone())),
            Some(Json::String(_)) | Some(Json::Null) | None => Ok(Value::Null),
            Some(other) => Err(malformed(metadata, format!("unexpected long text: {}", other))),
        }
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Text(s) => json!({"text": s}),
            _ => json!({}),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        match value {
            Value::Text(_) | Value::Number(_) => Ok(()),
            other => Err(shape_error("long text", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnValue, Converter};

    #[test]
    fn test_text_round_trip() {
        let mut c = Converter::new(TextType, Some("text"), Some("Notes")).unwrap();
        let value = c
            .to_native(ColumnValue::new("text", "Notes").with_value(&json!("hello")))
            .unwrap();
        assert_eq!(value, Value::from("hello"));
        assert_eq!(c.to_primitive(&value), json!("hello"));
        assert_eq!(c.to_primitive(&Value::from("")), json!(""));
    }

    #[test]
    fn test_text_null_value_uses_display_text() {
        let mut c = Converter::new(TextType, Some("text"), None).unwrap();
        let value = c
            .to_native(ColumnValue::new("text", "Notes").with_text("shown"))
            .unwrap();
        assert_eq!(value, Value::from("shown"));
    }

    #[test]
    fn test_text_cast_from_number() {
        let mut c = Converter::new(TextType, Some("text"), None).unwrap();
        assert_eq!(c.to_native(Value::from(42i64)).unwrap(), Value::from("42"));
        assert_eq!(c.to_native(Value::from(1.5)).unwrap(), Value::from("1.5"));
    }

    #[test]
    fn test_long_text_round_trip() {
        let mut c = Converter::new(LongTextType, Some("long_text"), None).unwrap();
        let wire = json!({"text": "line one\nline two"});
        let value = c
            .to_native(ColumnValue::new("long_text", "Body").with_value(&wire))
            .unwrap();
        assert_eq!(value, Value::from("line one\nline two"));
        assert_eq!(c.to_primitive(&value), wire);
        assert_eq!(c.to_primitive(&Value::Null), json!({}));
    }

    #[test]
    fn test_validate() {
        let c = Converter::new(TextType, Some("text"), None).unwrap();
        assert!(c.validate(&Value::from("a")).is_ok());
        assert!(c.validate(&Value::Bool(true)).is_err());
    }
}
