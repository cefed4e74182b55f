//! Number column.

use moncol_core::{Json, Number, Result, ValidationError, Value};

use super::{malformed, ColumnCodec};
use crate::contract::{Cell, Metadata};

/// Number column: a plain string on the wire, [`Number::Int`] or
/// [`Number::Float`] natively depending on what the text holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl ColumnCodec for NumberType {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Text(s) => Number::parse(s).map(Value::Number),
            _ => None,
        }
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        let text = match cell.value {
            Json::Null => return Ok(Value::Null),
            Json::String(s) => s.trim().to_string(),
            Json::Number(n) => n.to_string(),
            other => return Err(malformed(metadata, format!("unexpected number value: {}", other))),
        };
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Number::parse(&text)
            .map(Value::Number)
            .ok_or_else(|| malformed(metadata, format!("not a number: {}", text)))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Number(n) => Json::String(n.to_string()),
            Value::Text(s) => Json::String(s.clone()),
            _ => Json::String(String::new()),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let valid = match value {
            Value::Number(_) => true,
            Value::Text(s) => Number::parse(s).is_some(),
            _ => false,
        };
        if valid {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "Value is not a valid number type: ({}).",
                value.type_name()
            )))
        }
    }
}
