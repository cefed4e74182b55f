//! Moncol core data models.
//!
//! This crate defines the wire payloads exchanged with the board service,
//! the native values application code works with, and the error taxonomy
//! shared by the column converters.

#![warn(missing_docs)]

// Wire format
pub mod format;
mod payload;

// Native values
mod value;
mod contact;
mod period;
mod people;
mod record;

// Errors and collaborators
mod error;
mod client;

// Re-exports
pub use payload::{ColumnValue, Item};
pub use value::{Number, Value};
pub use contact::{Country, Email, Phone};
pub use period::{Timeline, Week};
pub use people::{PeopleKind, PersonOrTeam};
pub use record::Record;
pub use error::{Result, TypeError, ValidationError, ValidationErrors};
pub use client::ItemClient;

/// JSON wire value type
pub type Json = serde_json::Value;
