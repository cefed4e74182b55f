//! Status column.

use moncol_core::{Json, Result, ValidationError, Value};
use serde_json::json;

use super::{shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};
use crate::mapping::DataMapping;
use crate::settings::StatusSettings;

/// Status column: `{"index": 1}` on the wire, the label (or mapped
/// application value) natively. Unknown labels read as null.
#[derive(Debug, Clone, Default)]
pub struct StatusType {
    mapping: Option<DataMapping>,
}

impl StatusType {
    /// Status holding the label itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Status translating labels through `mapping`.
    pub fn with_mapping(mapping: DataMapping) -> Self {
        Self {
            mapping: Some(mapping),
        }
    }

    /// Label mapping, if any.
    pub fn mapping(&self) -> Option<&DataMapping> {
        self.mapping.as_ref()
    }

    fn to_label<'a>(&'a self, value: &'a str) -> Option<&'a str> {
        match &self.mapping {
            Some(mapping) => mapping.to_label(value),
            None => Some(value),
        }
    }
}

fn current_label(settings: &StatusSettings, cell: &Cell<'_>) -> Option<String> {
    if !cell.text.is_empty() {
        return Some(cell.text.to_string());
    }
    if let Some(label) = cell.additional_info.get("label").and_then(Json::as_str) {
        if !label.is_empty() {
            return Some(label.to_string());
        }
    }
    cell.value
        .get("index")
        .and_then(Json::as_i64)
        .and_then(|index| settings.label(index))
        .map(str::to_string)
}

impl ColumnCodec for StatusType {
    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        let settings = StatusSettings::from_metadata(metadata);
        let Some(label) = current_label(&settings, cell) else {
            return Ok(Value::Null);
        };
        match &self.mapping {
            Some(mapping) => Ok(mapping
                .to_native(&label)
                .map(Value::from)
                .unwrap_or(Value::Null)),
            None => Ok(Value::Text(label)),
        }
    }

    fn export(&self, metadata: &Metadata, value: &Value, baseline: &Json) -> Json {
        let index = match value {
            Value::Text(v) => self
                .to_label(v)
                .and_then(|label| StatusSettings::from_metadata(metadata).index_of(label)),
            _ => None,
        };
        match index {
            Some(index) => json!({"index": index}),
            None if baseline.is_object() => baseline.clone(),
            None => json!({}),
        }
    }

    fn validate(&self, metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let Value::Text(v) = value else {
            return Err(shape_error("status", value));
        };
        let Some(label) = self.to_label(v) else {
            return Err(ValidationError::new(format!(
                "Value has no status label mapping: ({}).",
                v
            )));
        };
        let settings = StatusSettings::from_metadata(metadata);
        if !settings.labels.is_empty() && settings.index_of(label).is_none() {
            return Err(ValidationError::new(format!(
                "Status has no label: ({}).",
                label
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnValue, Converter};

    fn column(text: &str, index: i64) -> ColumnValue {
        ColumnValue::new("status", "Status")
            .with_text(text)
            .with_value(&json!({"index": index}))
            .with_settings(&json!({"labels": {"0": "Working on it", "1": "Done", "2": "Stuck"}}))
    }

    #[test]
    fn test_decode_and_encode_label() {
        let mut c = Converter::new(StatusType::new(), Some("status"), None).unwrap();
        let value = c.to_native(column("Done", 1)).unwrap();
        assert_eq!(value, Value::from("Done"));
        assert_eq!(c.to_primitive(&value), json!({"index": 1}));
        assert_eq!(c.to_primitive(&Value::from("Stuck")), json!({"index": 2}));
    }

    #[test]
    fn test_decode_from_index_without_text() {
        let mut c = Converter::new(StatusType::new(), Some("status"), None).unwrap();
        assert_eq!(c.to_native(column("", 2)).unwrap(), Value::from("Stuck"));
    }

    #[test]
    fn test_decode_from_additional_info() {
        let mut c = Converter::new(StatusType::new(), Some("status"), None).unwrap();
        let column = ColumnValue::new("status", "Status")
            .with_additional_info(r##"{"label": "Done", "color": "#00c875"}"##);
        assert_eq!(c.to_native(column).unwrap(), Value::from("Done"));
    }

    #[test]
    fn test_mapped_unknown_is_null() {
        let mapping = DataMapping::new().with("Done", "DONE");
        let mut c = Converter::new(StatusType::with_mapping(mapping), Some("status"), None).unwrap();
        assert_eq!(c.to_native(column("Done", 1)).unwrap(), Value::from("DONE"));
        assert_eq!(c.to_native(column("Stuck", 2)).unwrap(), Value::Null);
    }

    #[test]
    fn test_encode_unknown_label_keeps_baseline() {
        let mut c = Converter::new(StatusType::new(), Some("status"), None).unwrap();
        c.to_native(column("Done", 1)).unwrap();
        assert_eq!(c.to_primitive(&Value::from("Nope")), json!({"index": 1}));
        assert_eq!(c.to_primitive(&Value::Null), json!({}));
    }

    #[test]
    fn test_validate() {
        let mapping = DataMapping::new().with("Done", "DONE").with("Gone", "GONE");
        let mut c = Converter::new(StatusType::with_mapping(mapping), Some("status"), None).unwrap();
        c.to_native(column("Done", 1)).unwrap();
        assert!(c.validate(&Value::from("DONE")).is_ok());
        assert!(c.validate(&Value::from("OTHER")).is_err());
        assert!(c.validate(&Value::from("GONE")).is_err());
        assert!(c.validate(&Value::Bool(true)).is_err());
    }
}
