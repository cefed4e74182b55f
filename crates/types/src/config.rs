//! Declarative field specs and the schema registry that builds them.
//!
//! Record models can be declared in JSON:
//!
//! ```json
//! [
//!   {"name": "Subtask", "fields": [
//!     {"field": "notes", "title": "Notes", "type": "text"}
//!   ]},
//!   {"name": "Task", "fields": [
//!     {"field": "stage", "title": "Stage", "type": "status",
//!      "data_mapping": {"Done": "DONE"}},
//!     {"field": "budget", "title": "Budget", "type": "mirror", "mirrors": "number"},
//!     {"field": "subtasks", "id": "subitems", "type": "subitems",
//!      "subitem_model": "Subtask"}
//!   ]}
//! ]
//! ```
//!
//! Subitem models must be declared before the models that reference them.

use moncol_core::{ItemClient, Result, TypeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::columns::{DropdownType, ItemLinkType, StatusType, SubitemsType};
use crate::contract::Converter;
use crate::mapping::DataMapping;
use crate::model::ModelSchema;
use crate::registry::ColumnTag;

/// Declaration of one field of a record model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub field: String,

    /// Column id
    #[serde(default)]
    pub id: Option<String>,

    /// Column title
    #[serde(default)]
    pub title: Option<String>,

    /// Column type, as a tag name or a service type name
    #[serde(rename = "type")]
    pub column_type: String,

    /// Label mapping for status and dropdown columns
    #[serde(default)]
    pub data_mapping: Option<DataMapping>,

    /// Whether a connected items column holds several items
    #[serde(default)]
    pub multiple_values: Option<bool>,

    /// Mirrored column type
    #[serde(default)]
    pub mirrors: Option<String>,

    /// Record model of a subitems column
    #[serde(default)]
    pub subitem_model: Option<String>,
}

impl FieldSpec {
    /// Create a spec for a field with a column title.
    pub fn new(field: impl Into<String>, title: impl Into<String>, column_type: ColumnTag) -> Self {
        Self {
            field: field.into(),
            id: None,
            title: Some(title.into()),
            column_type: column_type.as_str().to_string(),
            data_mapping: None,
            multiple_values: None,
            mirrors: None,
            subitem_model: None,
        }
    }
}

/// Declaration of a record model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model name
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<FieldSpec>,
}

/// Named record schemas, plus the client subitems columns fetch with.
#[derive(Default)]
pub struct SchemaRegistry {
    client: Option<Arc<dyn ItemClient>>,
    schemas: HashMap<String, Arc<ModelSchema>>,
}

impl SchemaRegistry {
    /// Create a registry without a client. Subitems fields cannot be built.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose subitems columns fetch through `client`.
    pub fn with_client(client: Arc<dyn ItemClient>) -> Self {
        Self {
            client: Some(client),
            schemas: HashMap::new(),
        }
    }

    /// Register a schema under its name, replacing any previous one.
    pub fn register(&mut self, schema: ModelSchema) -> Arc<ModelSchema> {
        let schema = Arc::new(schema);
        self.schemas.insert(schema.name().to_string(), schema.clone());
        schema
    }

    /// Look up a schema.
    pub fn get(&self, name: &str) -> Option<Arc<ModelSchema>> {
        self.schemas.get(name).cloned()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Build the converter a field spec declares.
    pub fn build_converter(&self, spec: &FieldSpec) -> Result<Converter> {
        let id = spec.id.as_deref();
        let title = spec.title.as_deref();
        let tag: ColumnTag = spec.column_type.parse()?;

        match tag {
            ColumnTag::Dropdown => {
                let kind = match &spec.data_mapping {
                    Some(mapping) => DropdownType::with_mapping(mapping.clone()),
                    None => DropdownType::new(),
                };
                Converter::new(kind, id, title)
            }
            ColumnTag::Status => {
                let kind = match &spec.data_mapping {
                    Some(mapping) => StatusType::with_mapping(mapping.clone()),
                    None => StatusType::new(),
                };
                Converter::new(kind, id, title)
            }
            ColumnTag::ItemLink => {
                Converter::new(ItemLinkType::new(spec.multiple_values.unwrap_or(true)), id, title)
            }
            ColumnTag::Mirror => {
                let target = spec.mirrors.as_deref().ok_or_else(|| {
                    TypeError::InvalidMirrorTarget(format!("{} declares no mirrored type", spec.field))
                })?;
                Converter::mirror(target.parse()?, id, title)
            }
            ColumnTag::Subitems => {
                let model = spec.subitem_model.as_deref().unwrap_or_default();
                let schema = self
                    .get(model)
                    .ok_or_else(|| TypeError::InvalidModel(model.to_string()))?;
                let client = self.client.clone().ok_or_else(|| {
                    TypeError::InvalidModel(format!("{} (no item client configured)", model))
                })?;
                Converter::new(SubitemsType::new(schema, client), id, title)
            }
            other => Converter::from_tag(other, id, title),
        }
    }

    /// Build and register a model.
    pub fn load_schema(&mut self, spec: &ModelSpec) -> Result<Arc<ModelSchema>> {
        let mut schema = ModelSchema::new(spec.name.as_str());
        for field in &spec.fields {
            schema.push(field.field.as_str(), self.build_converter(field)?);
        }
        tracing::debug!(model = %spec.name, fields = schema.len(), "registered record model");
        Ok(self.register(schema))
    }

    /// Build and register the models in a JSON array of model specs, in
    /// order.
    pub fn load_json(&mut self, json: &str) -> Result<Vec<Arc<ModelSchema>>> {
        let specs: Vec<ModelSpec> = serde_json::from_str(json)?;
        specs.iter().map(|spec| self.load_schema(spec)).collect()
    }
}
