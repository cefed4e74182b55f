//! Materialized records, the elements of a subitems value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::Value;

/// A snapshot of an item loaded through a record model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the record model that produced this record
    pub model: String,

    /// Item identifier
    pub id: String,

    /// Item name
    pub name: String,

    /// Native field values by field name
    pub values: BTreeMap<String, Value>,
}

impl Record {
    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }
}
