//! Timeline and week columns.

use moncol_core::{Json, Result, Timeline, ValidationError, Value, Week};
use serde_json::json;

use super::{format_date, is_blank, malformed, parse_date, shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};

/// Timeline column: `{"from": "2024-01-01", "to": "2024-01-31"}`.
///
/// Decode failures are returned to the caller rather than replaced by a
/// default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineType;

impl ColumnCodec for TimelineType {
    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(Value::Null);
        }
        let date = |key: &str| {
            cell.value
                .get(key)
                .and_then(Json::as_str)
                .and_then(parse_date)
                .ok_or_else(|| malformed(metadata, format!("invalid timeline {}: {}", key, cell.value)))
        };
        let timeline = Timeline::new(date("from")?, date("to")?)
            .map_err(|e| malformed(metadata, e.message))?;
        Ok(Value::Timeline(timeline))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Timeline(t) => json!({
                "from": format_date(t.from_date()),
                "to": format_date(t.to_date()),
            }),
            _ => json!({}),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        match value {
            Value::Timeline(t) => t.check(),
            other => Err(shape_error("timeline", other)),
        }
    }
}

/// Week column: `{"week": {"startDate": ..., "endDate": ...}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekType;

impl ColumnCodec for WeekType {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Date(d) => Some(Value::Week(Week::new(d.date_naive()))),
            _ => None,
        }
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(Value::Null);
        }
        let week = cell.value.get("week").unwrap_or(&Json::Null);
        if is_blank(week) {
            return Ok(Value::Null);
        }
        week.get("startDate")
            .and_then(Json::as_str)
            .and_then(parse_date)
            .map(|start| Value::Week(Week::new(start)))
            .ok_or_else(|| malformed(metadata, format!("invalid week value: {}", cell.value)))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Week(w) => json!({
                "week": {
                    "startDate": format_date(w.start()),
                    "endDate": format_date(w.end()),
                }
            }),
            _ => json!({}),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        match value {
            Value::Week(_) => Ok(()),
            other => Err(shape_error("week", other)),
        }
    }
}
