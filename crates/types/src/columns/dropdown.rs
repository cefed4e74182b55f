//! Dropdown column.

use moncol_core::{Json, Result, ValidationError, Value};
use serde_json::json;

use super::{malformed, shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};
use crate::mapping::DataMapping;
use crate::settings::DropdownSettings;

/// Dropdown column: `{"ids": [1, 2]}` on the wire, a list of labels (or
/// mapped application values) natively.
///
/// The column text carries the selected labels joined by `", "`. With a
/// [`DataMapping`], an unmapped label fails the decode and the column reads
/// as an empty list.
#[derive(Debug, Clone, Default)]
pub struct DropdownType {
    mapping: Option<DataMapping>,
}

impl DropdownType {
    /// Dropdown holding the labels themselves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dropdown translating labels through `mapping`.
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

fn labels_from_ids(settings: &DropdownSettings, value: &Json) -> Vec<String> {
    value
        .get("ids")
        .and_then(Json::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| match id {
                    Json::Number(n) => n.as_i64(),
                    Json::String(s) => s.parse().ok(),
                    _ => None,
                })
                .filter_map(|id| settings.labels.iter().find(|l| l.id == id))
                .map(|l| l.name.clone())
                .collect()
        })
        .unwrap_or_default()
}

impl ColumnCodec for DropdownType {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Text(s) => Some(Value::Labels(vec![s.clone()])),
            _ => None,
        }
    }

    fn fallback(&self) -> Value {
        Value::Labels(Vec::new())
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        let labels: Vec<String> = if cell.text.is_empty() {
            labels_from_ids(&DropdownSettings::from_metadata(metadata), cell.value)
        } else {
            cell.text
                .split(", ")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        let Some(mapping) = &self.mapping else {
            return Ok(Value::Labels(labels));
        };
        labels
            .iter()
            .map(|label| {
                mapping
                    .to_native(label)
                    .map(str::to_string)
                    .ok_or_else(|| malformed(metadata, format!("unmapped dropdown label: {}", label)))
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Labels)
    }

    fn export(&self, metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        let Value::Labels(values) = value else {
            return json!({"ids": []});
        };
        let settings = DropdownSettings::from_metadata(metadata);
        let ids: Vec<i64> = values
            .iter()
            .filter_map(|v| self.to_label(v))
            .filter_map(|label| settings.id_of(label))
            .collect();
        json!({"ids": ids})
    }

    fn compare(&self, candidate: &Value, baseline: &Value) -> bool {
        match (candidate, baseline) {
            (Value::Labels(a), Value::Labels(b)) => {
                let mut a: Vec<&String> = a.iter().collect();
                let mut b: Vec<&String> = b.iter().collect();
                a.sort();
                b.sort();
                a != b
            }
            _ => candidate != baseline,
        }
    }

    fn validate(&self, metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let Value::Labels(values) = value else {
            return Err(shape_error("dropdown", value));
        };
        let settings = DropdownSettings::from_metadata(metadata);
        for v in values {
            let Some(label) = self.to_label(v) else {
                return Err(ValidationError::new(format!(
                    "Value has no dropdown label mapping: ({}).",
                    v
                )));
            };
            if !settings.labels.is_empty() && !settings.contains(label) {
                return Err(ValidationError::new(format!(
                    "Dropdown has no label: ({}).",
                    label
                )));
            }
        }
        Ok(())
    }
}
