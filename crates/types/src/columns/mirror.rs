//! Mirror column.

use moncol_core::{Json, Result, ValidationError, Value};

use super::{ColumnCodec, ColumnType};
use crate::contract::{Cell, Converter, Metadata};

/// Mirror column: shows a column of the connected items and delegates every
/// conversion to a converter of the mirrored type. Never reported as changed.
#[derive(Debug, Clone)]
pub struct MirrorType {
    target: Box<Converter>,
}

impl MirrorType {
    /// Mirror of `target`'s column type.
    pub fn new(target: Converter) -> Self {
        Self {
            target: Box::new(target),
        }
    }

    /// The converter conversions are delegated to.
    pub fn target(&self) -> &Converter {
        &self.target
    }
}

impl ColumnCodec for MirrorType {
    fn cast(&self, value: &Value) -> Option<Value> {
        self.target.kind().cast(value)
    }

    fn fallback(&self) -> Value {
        self.target.kind().fallback()
    }

    fn convert(&mut self, _metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        let mut column = cell.column.clone();
        // Mirrored numbers only carry display text.
        if matches!(self.target.kind(), ColumnType::Number(_)) {
            column.value = Some(serde_json::to_string(cell.text)?);
        }
        self.target.to_native(column)
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        self.target.to_primitive(value)
    }

    fn export_empty(&self, _null: Json) -> Json {
        self.target.to_primitive(&Value::Null)
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        self.target.validate(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColumnTag, ColumnValue, Converter, DecodeFailure, Number, TypeError, Value};
    use serde_json::json;

    #[test]
    fn test_mirrored_number_reads_text() {
        let mut c = Converter::mirror(ColumnTag::Number, Some("mirror"), None).unwrap();
        let column = ColumnValue::new("mirror", "Budget").with_text("12.5");
        let value = c.to_native(column).unwrap();
        assert!(matches!(value, Value::Number(Number::Float(f)) if f == 12.5));
        assert_eq!(c.to_primitive(&value), json!("12.5"));
    }

    #[test]
    fn test_mirrored_status_delegates() {
        let mut c = Converter::mirror(ColumnTag::Status, Some("mirror"), None).unwrap();
        let column = ColumnValue::new("mirror", "Stage").with_text("Done");
        assert_eq!(c.to_native(column).unwrap(), Value::from("Done"));
        assert_eq!(c.to_primitive(&Value::Null), json!({}));
    }

    #[test]
    fn test_never_changed() {
        let mut c = Converter::mirror(ColumnTag::Text, Some("mirror"), None).unwrap();
        c.to_native(ColumnValue::new("mirror", "Name").with_value(&json!("a")))
            .unwrap();
        assert!(!c.has_changed(&Value::from("b"), &Value::from("a")));
        assert!(!c.is_modified(&Value::Null));
    }

    #[test]
    fn test_validate_delegates() {
        let c = Converter::mirror(ColumnTag::Number, Some("mirror"), None).unwrap();
        assert!(c.validate(&Value::from(1i64)).is_ok());
        assert!(c.validate(&Value::from("x")).is_err());
    }

    #[test]
    fn test_mirrored_timeline_keeps_strict_decode() {
        let mut c = Converter::mirror(ColumnTag::Timeline, Some("mirror"), Some("Period")).unwrap();
        assert_eq!(c.rules().on_decode_failure, DecodeFailure::Propagate);
        assert!(c.rules().read_only);

        let column = ColumnValue::new("mirror", "Period")
            .with_value(&json!({"from": "January", "to": "2024-01-01"}));
        let err = c.to_native(column).unwrap_err();
        assert!(matches!(err, TypeError::Conversion { .. }));
    }

    #[test]
    fn test_mirrored_number_falls_back() {
        let mut c = Converter::mirror(ColumnTag::Number, Some("mirror"), None).unwrap();
        assert_eq!(c.rules().on_decode_failure, DecodeFailure::FallbackToDefault);
        let column = ColumnValue::new("mirror", "Budget").with_text("lots");
        assert_eq!(c.to_native(column).unwrap(), Value::Null);
    }
}
