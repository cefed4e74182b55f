//! Typed views over column settings merged into converter metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use moncol_core::Json;

use crate::contract::Metadata;

/// Status column settings: `{"labels": {"0": "Working on it", "1": "Done"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSettings {
    /// Label text by index
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl StatusSettings {
    /// Read the settings from converter metadata. Missing or malformed
    /// settings read as empty.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let labels = metadata
            .get("labels")
            .and_then(Json::as_object)
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|(index, name)| Some((index.clone(), name.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        Self { labels }
    }

    /// Index of a label.
    pub fn index_of(&self, label: &str) -> Option<i64> {
        self.labels
            .iter()
            .find(|(_, name)| name.as_str() == label)
            .and_then(|(index, _)| index.parse().ok())
    }

    /// Label at an index.
    pub fn label(&self, index: i64) -> Option<&str> {
        self.labels.get(&index.to_string()).map(String::as_str)
    }
}

/// One dropdown option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownLabel {
    /// Option id
    pub id: i64,

    /// Option text
    pub name: String,
}

/// Dropdown column settings: `{"labels": [{"id": 1, "name": "Red"}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownSettings {
    /// Options in display order
    #[serde(default)]
    pub labels: Vec<DropdownLabel>,
}

impl DropdownSettings {
    /// Read the settings from converter metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        metadata
            .get("labels")
            .cloned()
            .and_then(|labels| serde_json::from_value(labels).ok())
            .map(|labels| Self { labels })
            .unwrap_or_default()
    }

    /// Id of an option by its text.
    pub fn id_of(&self, name: &str) -> Option<i64> {
        self.labels.iter().find(|l| l.name == name).map(|l| l.id)
    }

    /// Whether an option with this text exists.
    pub fn contains(&self, name: &str) -> bool {
        self.id_of(name).is_some()
    }
}

/// People column settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeopleSettings {
    /// Maximum number of people or teams, 0 for unlimited
    pub max_people_allowed: usize,
}

impl PeopleSettings {
    /// Read the settings from converter metadata. The service reports the
    /// limit either as a number or as numeric text.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let max_people_allowed = match metadata.get("max_people_allowed") {
            Some(Json::Number(n)) => n.as_u64().unwrap_or(0) as usize,
            Some(Json::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        Self { max_people_allowed }
    }

    /// Whether the column holds a single person or team.
    pub fn is_single(&self) -> bool {
        self.max_people_allowed == 1
    }
}
