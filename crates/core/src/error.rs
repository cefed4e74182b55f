//! Error taxonomy for column conversion.

use std::collections::BTreeMap;
use std::fmt;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, TypeError>;

/// Configuration and conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A converter was declared without an id or a title
    #[error("\"id\" or \"title\" parameter is required.")]
    MissingIdentity,

    /// A subitems column was declared with an unusable record model
    #[error("The input model is not a valid record model: ({0})")]
    InvalidModel(String),

    /// A mirror column was declared with an unusable target
    #[error("Invalid mirror target: {0}")]
    InvalidMirrorTarget(String),

    /// Column data could not be decoded
    #[error("Invalid data for {column} column: {message}")]
    Conversion {
        /// Column title or id
        column: String,
        /// What was wrong
        message: String,
    },

    /// A JSON document in the payload could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record model has no such field
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A column type name could not be resolved
    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    /// The item client failed
    #[error(transparent)]
    Fetch(anyhow::Error),
}

impl TypeError {
    /// Create a conversion error for a column.
    pub fn conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        TypeError::Conversion {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// A native value violates its column's shape or range rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable description
    pub message: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validation failures collected across the fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field.
    pub fn insert(&mut self, field: impl Into<String>, error: ValidationError) {
        self.errors.insert(field.into(), error);
    }

    /// Get the failure for a field.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// Fields that failed, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into a result, failing when any field failed.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed for {} field(s)", self.errors.len())?;
        for (field, error) in &self.errors {
            write!(f, "; {}: {}", field, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
