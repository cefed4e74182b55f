//! Label mappings for status and dropdown columns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Translates the labels a column shows to application values and back.
///
/// Keys are wire labels, values are the application's representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataMapping(BTreeMap<String, String>);

impl DataMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label, builder style.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    /// Add a label.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.0.insert(label.into(), value.into());
    }

    /// Application value for a wire label.
    pub fn to_native(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    /// Wire label for an application value.
    pub fn to_label(&self, value: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, v)| v.as_str() == value)
            .map(|(label, _)| label.as_str())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_directions() {
        let mapping = DataMapping::new().with("Done", "DONE").with("Stuck", "BLOCKED");
        assert_eq!(mapping.to_native("Done"), Some("DONE"));
        assert_eq!(mapping.to_label("BLOCKED"), Some("Stuck"));
        assert_eq!(mapping.to_native("Unknown"), None);
        assert_eq!(mapping.to_label("Unknown"), None);
    }

    #[test]
    fn test_deserialize_from_object() {
        let mapping: DataMapping = serde_json::from_str(r#"{"Done": "DONE"}"#).unwrap();
        assert_eq!(mapping, [("Done", "DONE")].into_iter().collect());
    }
}
