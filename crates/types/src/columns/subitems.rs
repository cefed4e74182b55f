//! Subitems column.

use moncol_core::{ItemClient, Json, Result, TypeError, ValidationError, Value};
use std::fmt;
use std::sync::Arc;

use super::{is_blank, linked_item_ids, ColumnCodec};
use crate::contract::{Cell, Metadata};
use crate::model::{ItemModel, ModelSchema};

/// Subitems column: reads linked item ids like a connected items column,
/// fetches the items through the client and loads each with `schema`.
///
/// Read-only; the wire value for subitems is always `null`.
#[derive(Clone)]
pub struct SubitemsType {
    schema: Arc<ModelSchema>,
    client: Arc<dyn ItemClient>,
}

impl SubitemsType {
    /// Create a subitems column loading records with `schema`.
    pub fn new(schema: Arc<ModelSchema>, client: Arc<dyn ItemClient>) -> Self {
        Self { schema, client }
    }

    /// Record schema of the subitems.
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }
}

impl fmt::Debug for SubitemsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubitemsType")
            .field("schema", &self.schema.name())
            .finish_non_exhaustive()
    }
}

impl ColumnCodec for SubitemsType {
    fn fallback(&self) -> Value {
        Value::Records(Vec::new())
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(self.fallback());
        }
        let ids = linked_item_ids(metadata, cell.value)?;
        if ids.is_empty() {
            return Ok(self.fallback());
        }

        tracing::debug!(
            column = %metadata.label(),
            model = %self.schema.name(),
            count = ids.len(),
            "fetching subitems"
        );
        let items = self.client.get_items(&ids, true).map_err(TypeError::Fetch)?;
        let records = items
            .iter()
            .map(|item| ItemModel::load(&self.schema, item).map(|model| model.to_record()))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(column = %metadata.label(), loaded = records.len(), "subitems loaded");

        Ok(Value::Records(records))
    }

    fn export(&self, _metadata: &Metadata, _value: &Value, _baseline: &Json) -> Json {
        Json::Null
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let Value::Records(records) = value else {
            return Err(ValidationError::new(format!(
                "Subitems expect a list of records, got ({}).",
                value.type_name()
            )));
        };
        match records.iter().find(|r| r.model != self.schema.name()) {
            Some(record) => Err(ValidationError::new(format!(
                "Subitem ({}) is not a {} record.",
                record.id,
                self.schema.name()
            ))),
            None => Ok(()),
        }
    }
}
