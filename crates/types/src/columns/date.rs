//! Date column.

use chrono::{Local, NaiveTime, TimeZone, Timelike, Utc};
use moncol_core::format::TIME_FORMAT;
use moncol_core::{Json, Result, ValidationError, Value};
use serde_json::json;

use super::{format_date, is_blank, malformed, parse_date, shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};

/// Date column: `{"date": "2024-01-15", "time": "13:45:00"}`, native local
/// timestamp.
///
/// The wire time is UTC. Dates without a time decode to local midnight and
/// a local-midnight value encodes with a null time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

impl ColumnCodec for DateType {
    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(Value::Null);
        }
        let date = cell
            .value
            .get("date")
            .and_then(Json::as_str)
            .and_then(parse_date)
            .ok_or_else(|| malformed(metadata, format!("invalid date value: {}", cell.value)))?;

        let time = cell
            .value
            .get("time")
            .and_then(Json::as_str)
            .and_then(|raw| NaiveTime::parse_from_str(raw, TIME_FORMAT).ok());
        if let Some(time) = time {
            let utc = Utc.from_utc_datetime(&date.and_time(time));
            return Ok(Value::Date(utc.with_timezone(&Local)));
        }

        date.and_hms_opt(0, 0, 0)
            .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
            .map(Value::Date)
            .ok_or_else(|| malformed(metadata, format!("no local midnight on {}", date)))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        let Value::Date(local) = value else {
            return json!({});
        };
        if local.hour() == 0 && local.minute() == 0 && local.second() == 0 {
            return json!({"date": format_date(local.date_naive()), "time": null});
        }
        let utc = local.with_timezone(&Utc);
        json!({
            "date": format_date(utc.date_naive()),
            "time": utc.format(TIME_FORMAT).to_string(),
        })
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        match value {
            Value::Date(_) => Ok(()),
            other => Err(shape_error("date", other)),
        }
    }
}
