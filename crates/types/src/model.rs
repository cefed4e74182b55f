//! Record models: named field declarations bound to converters, and the
//! per-item state that loads, tracks and exports them.

use moncol_core::{Item, Json, Record, Result, TypeError, ValidationErrors, Value};
use serde_json::Map;
use std::collections::BTreeMap;

use crate::contract::Converter;

/// A declared field: its name and a prototype converter.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Field name
    pub name: String,

    /// Converter cloned into every loaded record
    pub converter: Converter,
}

/// A named, ordered set of field declarations.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldDecl>,
}

impl ModelSchema {
    /// Create a schema without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, builder style.
    pub fn field(mut self, name: impl Into<String>, converter: Converter) -> Self {
        self.push(name, converter);
        self
    }

    /// Add a field. A field with the same name is replaced.
    pub fn push(&mut self, name: impl Into<String>, converter: Converter) {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.converter = converter,
            None => self.fields.push(FieldDecl { name, converter }),
        }
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field declarations in declaration order.
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Look up a field declaration.
    pub fn get(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone)]
struct BoundField {
    name: String,
    converter: Converter,
    value: Value,
}

impl BoundField {
    /// Wire key: the column id once known, else the declared title.
    fn key(&self) -> String {
        self.converter
            .metadata()
            .id()
            .unwrap_or_else(|| self.converter.metadata().label())
            .to_string()
    }
}

/// An item bound to a record schema.
///
/// Each record owns its converters, so baselines are tracked per record.
#[derive(Debug, Clone)]
pub struct ItemModel {
    model: String,
    id: String,
    name: String,
    fields: Vec<BoundField>,
}

impl ItemModel {
    /// Create a record with every field unset.
    pub fn new(schema: &ModelSchema) -> Self {
        Self {
            model: schema.name.clone(),
            id: String::new(),
            name: String::new(),
            fields: schema
                .fields
                .iter()
                .map(|decl| BoundField {
                    name: decl.name.clone(),
                    converter: decl.converter.clone(),
                    value: Value::Null,
                })
                .collect(),
        }
    }

    /// Load an item. Fields are matched to column values by title, then by
    /// id; fields without a column value stay null.
    pub fn load(schema: &ModelSchema, item: &Item) -> Result<Self> {
        let mut model = Self::new(schema);
        model.id = item.id.clone();
        model.name = item.name.clone();

        for field in &mut model.fields {
            let metadata = field.converter.metadata();
            let Some(column) = item.find_column(metadata.title(), metadata.id()) else {
                tracing::warn!(
                    model = %schema.name,
                    field = %field.name,
                    item = %item.id,
                    "no column value for field"
                );
                continue;
            };
            field.value = field.converter.to_native(column)?;
        }
        Ok(model)
    }

    /// Schema name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Item id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == field).map(|f| &f.value)
    }

    /// Converter bound to a field.
    pub fn converter(&self, field: &str) -> Option<&Converter> {
        self.fields.iter().find(|f| f.name == field).map(|f| &f.converter)
    }

    /// Assign a field. The value goes through the converter's casts.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let bound = self
            .fields
            .iter_mut()
            .find(|f| f.name == field)
            .ok_or_else(|| TypeError::UnknownField(field.to_string()))?;
        bound.value = bound.converter.to_native(value.into())?;
        Ok(())
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            if let Err(e) = field.converter.validate(&field.value) {
                errors.insert(field.name.clone(), e);
            }
        }
        errors.into_result()
    }

    /// Names of fields whose value differs from the last loaded value.
    pub fn changed_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.converter.is_modified(&f.value))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Wire values of the changed fields, keyed by column id.
    pub fn changed_values(&self) -> Map<String, Json> {
        self.fields
            .iter()
            .filter(|f| f.converter.is_modified(&f.value))
            .map(|f| (f.key(), f.converter.to_primitive(&f.value)))
            .collect()
    }

    /// Wire values of all writable fields, keyed by column id.
    pub fn to_primitive(&self) -> Map<String, Json> {
        self.fields
            .iter()
            .filter(|f| !f.converter.rules().read_only)
            .map(|f| (f.key(), f.converter.to_primitive(&f.value)))
            .collect()
    }

    /// Snapshot of the record.
    pub fn to_record(&self) -> Record {
        Record {
            model: self.model.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            values: self
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}
