//! Item client abstraction.

use crate::payload::Item;

/// Source of item payloads, implemented by the network client.
///
/// Calls are blocking. Errors are passed through to callers unchanged.
pub trait ItemClient: Send + Sync {
    /// Fetch items by id, optionally with their column values.
    fn get_items(&self, ids: &[String], include_column_values: bool) -> anyhow::Result<Vec<Item>>;
}
