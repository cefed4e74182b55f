//! Checkbox column.

use moncol_core::{Json, Result, ValidationError, Value};
use serde_json::json;

use super::{malformed, shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};

/// Checkbox column: `{"checked": "true"}` or `{}`, native `bool`.
///
/// Text and numbers are cast: `"true"`, `"yes"`, `"1"` and non-zero numbers
/// are checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxType;

fn checked(value: &Json) -> bool {
    match value {
        Json::Bool(b) => *b,
        Json::String(s) => !s.is_empty() && !s.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

impl ColumnCodec for CheckboxType {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Text(s) => Some(Value::Bool(matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "1" | "checked"
            ))),
            Value::Number(n) => Some(Value::Bool(n.as_f64() != 0.0)),
            _ => None,
        }
    }

    fn fallback(&self) -> Value {
        Value::Bool(false)
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        match cell.value {
            Json::Object(map) => Ok(Value::Bool(map.get("checked").map(checked).unwrap_or(false))),
            Json::Null => Ok(Value::Bool(false)),
            other => Err(malformed(metadata, format!("unexpected checkbox value: {}", other))),
        }
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Bool(true) => json!({"checked": "true"}),
            _ => json!({}),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let value = self.cast(value).unwrap_or_else(|| value.clone());
        match value {
            Value::Bool(_) => Ok(()),
            other => Err(shape_error("checkbox", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColumnValue, Converter, Value};
    use serde_json::json;

    fn converter() -> Converter {
        Converter::new(super::CheckboxType, Some("check"), Some("Done")).unwrap()
    }

    fn column(value: serde_json::Value) -> ColumnValue {
        ColumnValue::new("check", "Done").with_value(&value)
    }

    #[test]
    fn test_decode_empty_is_unchecked() {
        let mut c = converter();
        assert_eq!(c.to_native(column(json!({}))).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_decode_checked() {
        let mut c = converter();
        assert_eq!(
            c.to_native(column(json!({"checked": "true"}))).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_decode_null_payload_is_unchecked() {
        let mut c = converter();
        let value = c.to_native(ColumnValue::new("check", "Done")).unwrap();
        assert_eq!(value, Value::Bool(false));
    }

    #[test]
    fn test_decode_unexpected_shape_swallowed() {
        let mut c = converter();
        assert_eq!(c.to_native(column(json!([1, 2]))).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_encode() {
        let c = converter();
        assert_eq!(c.to_primitive(&Value::Bool(true)), json!({"checked": "true"}));
        assert_eq!(c.to_primitive(&Value::Bool(false)), json!({}));
        assert_eq!(c.to_primitive(&Value::Null), json!({}));
    }

    #[test]
    fn test_cast_text_and_numbers() {
        let mut c = converter();
        assert_eq!(c.to_native(Value::from("yes")).unwrap(), Value::Bool(true));
        assert_eq!(c.to_native(Value::from("nope")).unwrap(), Value::Bool(false));
        assert_eq!(c.to_native(Value::from(1i64)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_validate() {
        let c = converter();
        assert!(c.validate(&Value::Bool(true)).is_ok());
        assert!(c.validate(&Value::from("true")).is_ok());
        assert!(c.validate(&Value::Labels(vec![])).is_err());
    }

    #[test]
    fn test_has_changed() {
        let c = converter();
        assert!(c.has_changed(&Value::Bool(true), &Value::Bool(false)));
        assert!(!c.has_changed(&Value::Bool(true), &Value::Bool(true)));
        assert!(!c.has_changed(&Value::Bool(false), &Value::Null));
    }
}
