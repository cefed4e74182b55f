//! Connected items column.

use moncol_core::{Json, Result, ValidationError, Value};
use serde_json::json;
use std::collections::BTreeSet;

use super::{id_json, is_blank, linked_item_ids, ColumnCodec};
use crate::contract::{Cell, Metadata};

/// Connected items column. Reads `{"linkedPulseIds": [{"linkedPulseId": 1}]}`
/// and writes `{"item_ids": [1]}`.
///
/// Holds a list of ids, or a single id when built with `multiple = false`.
#[derive(Debug, Clone, Copy)]
pub struct ItemLinkType {
    multiple: bool,
}

impl ItemLinkType {
    /// Create an item link column.
    pub fn new(multiple: bool) -> Self {
        Self { multiple }
    }

    /// Whether the column holds several items.
    pub fn multiple(&self) -> bool {
        self.multiple
    }
}

impl Default for ItemLinkType {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ColumnCodec for ItemLinkType {
    fn init_metadata(&self, metadata: &mut Metadata) {
        metadata.insert("allowMultipleItems", Json::Bool(self.multiple));
    }

    fn cast(&self, value: &Value) -> Option<Value> {
        match (self.multiple, value) {
            (false, Value::Text(s)) => Some(Value::ItemId(s.clone())),
            (false, Value::Number(n)) => Some(Value::ItemId(n.to_string())),
            (true, Value::Text(s)) => Some(Value::ItemIds(vec![s.clone()])),
            (true, Value::Labels(ids)) => Some(Value::ItemIds(ids.clone())),
            _ => None,
        }
    }

    fn fallback(&self) -> Value {
        if self.multiple {
            Value::ItemIds(Vec::new())
        } else {
            Value::Null
        }
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(self.fallback());
        }
        let ids = linked_item_ids(metadata, cell.value)?;
        if self.multiple {
            return Ok(Value::ItemIds(ids));
        }
        Ok(ids.into_iter().next().map(Value::ItemId).unwrap_or(Value::Null))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        let ids: Vec<Json> = value
            .as_item_ids()
            .unwrap_or_default()
            .into_iter()
            .map(id_json)
            .collect();
        json!({"item_ids": ids})
    }

    fn compare(&self, candidate: &Value, baseline: &Value) -> bool {
        if !self.multiple {
            return candidate != baseline;
        }
        match (candidate.as_item_ids(), baseline.as_item_ids()) {
            (Some(a), Some(b)) => {
                a.into_iter().collect::<BTreeSet<_>>() != b.into_iter().collect::<BTreeSet<_>>()
            }
            _ => candidate != baseline,
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        match (self.multiple, value) {
            (true, Value::ItemIds(_)) | (false, Value::ItemId(_)) => Ok(()),
            (true, other) => Err(ValidationError::new(format!(
                "Multiple item link expects a list of item ids, got ({}).",
                other.type_name()
            ))),
            (false, other) => Err(ValidationError::new(format!(
                "Single item link expects one item id, got ({}).",
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnValue, Converter};

    fn column(ids: &[i64]) -> ColumnValue {
        let links: Vec<Json> = ids.iter().map(|id| json!({"linkedPulseId": id})).collect();
        ColumnValue::new("link", "Related").with_value(&json!({"linkedPulseIds": links}))
    }

    fn ids(ids: &[&str]) -> Value {
        Value::ItemIds(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_multiple_decode_and_encode() {
        let mut c = Converter::new(ItemLinkType::new(true), Some("link"), None).unwrap();
        let value = c.to_native(column(&[11, 12])).unwrap();
        assert_eq!(value, ids(&["11", "12"]));
        assert_eq!(c.to_primitive(&value), json!({"item_ids": [11, 12]}));
        assert_eq!(c.metadata().get("allowMultipleItems"), Some(&json!(true)));
    }

    #[test]
    fn test_single_decode_and_encode() {
        let mut c = Converter::new(ItemLinkType::new(false), Some("link"), None).unwrap();
        let value = c.to_native(column(&[11])).unwrap();
        assert_eq!(value, Value::ItemId("11".into()));
        assert_eq!(c.to_primitive(&value), json!({"item_ids": [11]}));
    }

    #[test]
    fn test_empty_payload() {
        let mut multi = Converter::new(ItemLinkType::new(true), Some("link"), None).unwrap();
        assert_eq!(multi.to_native(ColumnValue::new("link", "Related")).unwrap(), ids(&[]));
        assert_eq!(multi.to_primitive(&ids(&[])), json!({}));

        let mut single = Converter::new(ItemLinkType::new(false), Some("link"), None).unwrap();
        assert_eq!(single.to_native(column(&[])).unwrap(), Value::Null);
    }

    #[test]
    fn test_malformed_falls_back() {
        let mut c = Converter::new(ItemLinkType::new(true), Some("link"), None).unwrap();
        let column = ColumnValue::new("link", "Related").with_value(&json!({"other": 1}));
        assert_eq!(c.to_native(column).unwrap(), ids(&[]));
    }

    #[test]
    fn test_multiple_compare_is_order_independent() {
        let c = Converter::new(ItemLinkType::new(true), Some("link"), None).unwrap();
        assert!(!c.has_changed(&ids(&["1", "2"]), &ids(&["2", "1"])));
        assert!(c.has_changed(&ids(&["1", "2"]), &ids(&["1", "3"])));
        assert!(c.has_changed(&ids(&["1"]), &ids(&[])));
    }

    #[test]
    fn test_single_compare() {
        let c = Converter::new(ItemLinkType::new(false), Some("link"), None).unwrap();
        let one = Value::ItemId("1".into());
        assert!(!c.has_changed(&one, &one.clone()));
        assert!(c.has_changed(&one, &Value::ItemId("2".into())));
    }

    #[test]
    fn test_validate_multiplicity() {
        let multi = Converter::new(ItemLinkType::new(true), Some("link"), None).unwrap();
        assert!(multi.validate(&ids(&["1"])).is_ok());
        assert!(multi.validate(&Value::ItemId("1".into())).is_err());

        let single = Converter::new(ItemLinkType::new(false), Some("link"), None).unwrap();
        assert!(single.validate(&Value::ItemId("1".into())).is_ok());
        assert!(single.validate(&ids(&["1"])).is_err());
    }

    #[test]
    fn test_cast() {
        let mut single = Converter::new(ItemLinkType::new(false), Some("link"), None).unwrap();
        assert_eq!(single.to_native(Value::from(5i64)).unwrap(), Value::ItemId("5".into()));

        let mut multi = Converter::new(ItemLinkType::new(true), Some("link"), None).unwrap();
        assert_eq!(multi.to_native(Value::from("5")).unwrap(), ids(&["5"]));
    }
}
