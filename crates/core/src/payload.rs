//! Wire payloads - column value envelopes and the items that carry them.

use serde::{Deserialize, Serialize};

/// A single column's value on an item, as returned by the service.
///
/// `value` and `settings_str` are themselves JSON documents encoded as
/// strings. `additional_info` is usually JSON but may be a bare string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValue {
    /// Column identifier
    pub id: String,

    /// Column title
    #[serde(default)]
    pub title: String,

    /// Human-readable rendering of the value
    #[serde(default)]
    pub text: Option<String>,

    /// JSON-encoded structured value
    #[serde(default)]
    pub value: Option<String>,

    /// JSON-encoded column configuration
    #[serde(default, alias = "settings_str")]
    pub settings_str: Option<String>,

    /// JSON-encoded or raw supplementary data
    #[serde(default, alias = "additional_info")]
    pub additional_info: Option<String>,
}

impl ColumnValue {
    /// Create an empty column value for the given column.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the text rendering.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the structured value, encoding it as a JSON string.
    pub fn with_value(mut self, value: &serde_json::Value) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Set the already-encoded structured value.
    pub fn with_raw_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the column settings, encoding them as a JSON string.
    pub fn with_settings(mut self, settings: &serde_json::Value) -> Self {
        self.settings_str = Some(settings.to_string());
        self
    }

    /// Set the supplementary data string.
    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = Some(info.into());
        self
    }
}

/// An item (board row) with its column values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item identifier
    pub id: String,

    /// Item name
    #[serde(default)]
    pub name: String,

    /// Column values, present when requested from the service
    #[serde(default, alias = "columnValues")]
    pub column_values: Vec<ColumnValue>,
}

impl Item {
    /// Create an item without column values.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            column_values: Vec::new(),
        }
    }

    /// Add a column value.
    pub fn with_column(mut self, column: ColumnValue) -> Self {
        self.column_values.push(column);
        self
    }

    /// Find a column value, trying the title first and then the id.
    pub fn find_column(&self, title: Option<&str>, id: Option<&str>) -> Option<&ColumnValue> {
        title
            .and_then(|title| self.column_values.iter().find(|c| c.title == title))
            .or_else(|| id.and_then(|id| self.column_values.iter().find(|c| c.id == id)))
    }
}
