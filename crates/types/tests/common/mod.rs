//! Shared test helpers for converter tests.

#![allow(dead_code)]

use moncol_types::{ColumnValue, Item, ItemClient, Json};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory item client.
#[derive(Default)]
pub struct MockClient {
    items: HashMap<String, Item>,
    requests: Mutex<Vec<Vec<String>>>,
    failure: Option<String>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose every request fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    /// Ids requested so far, one entry per call.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

impl ItemClient for MockClient {
    fn get_items(&self, ids: &[String], _include_column_values: bool) -> anyhow::Result<Vec<Item>> {
        self.requests.lock().unwrap().push(ids.to_vec());
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(ids.iter().filter_map(|id| self.items.get(id).cloned()).collect())
    }
}

/// Column payload with a structured value.
pub fn column(id: &str, title: &str, value: Json) -> ColumnValue {
    ColumnValue::new(id, title).with_value(&value)
}

/// Connected items payload.
pub fn linked(id: &str, title: &str, ids: &[i64]) -> ColumnValue {
    let links: Vec<Json> = ids
        .iter()
        .map(|id| serde_json::json!({"linkedPulseId": id}))
        .collect();
    column(id, title, serde_json::json!({"linkedPulseIds": links}))
}
