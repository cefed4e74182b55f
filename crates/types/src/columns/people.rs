//! People column.

use moncol_core::{Json, PeopleKind, PersonOrTeam, Result, ValidationError, Value};
use serde_json::json;

use super::{id_json, id_string, is_blank, malformed, shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};
use crate::settings::PeopleSettings;

/// People column: `{"personsAndTeams": [{"id": 1, "kind": "person"}]}`.
///
/// Columns limited to one person (`max_people_allowed` of 1 in the column
/// settings) hold a single [`PersonOrTeam`]; others hold a list.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeopleType;

fn person_or_team(metadata: &Metadata, entry: &Json) -> Result<PersonOrTeam> {
    let id = entry
        .get("id")
        .and_then(id_string)
        .ok_or_else(|| malformed(metadata, format!("missing person id: {}", entry)))?;
    let kind = entry
        .get("kind")
        .and_then(Json::as_str)
        .unwrap_or("person")
        .parse::<PeopleKind>()
        .map_err(|e| malformed(metadata, e))?;
    Ok(PersonOrTeam::new(id, kind))
}

impl ColumnCodec for PeopleType {
    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        let single = PeopleSettings::from_metadata(metadata).is_single();
        let people = if is_blank(cell.value) {
            Vec::new()
        } else {
            cell.value
                .get("personsAndTeams")
                .and_then(Json::as_array)
                .ok_or_else(|| malformed(metadata, format!("missing personsAndTeams: {}", cell.value)))?
                .iter()
                .map(|entry| person_or_team(metadata, entry))
                .collect::<Result<Vec<_>>>()?
        };

        if single {
            return Ok(people.into_iter().next().map(Value::Person).unwrap_or(Value::Null));
        }
        Ok(Value::People(people))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        let entries: Vec<Json> = value
            .as_people()
            .unwrap_or_default()
            .into_iter()
            .map(|p| json!({"id": id_json(&p.id), "kind": p.kind.as_str()}))
            .collect();
        json!({"personsAndTeams": entries})
    }

    fn validate(&self, metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let count = match value {
            Value::People(people) => people.len(),
            Value::Person(_) => 1,
            other => return Err(shape_error("people", other)),
        };
        let max = PeopleSettings::from_metadata(metadata).max_people_allowed;
        if max > 0 && count > max {
            return Err(ValidationError::new(format!(
                "Column allows at most {} people or teams, got {}.",
                max, count
            )));
        }
        Ok(())
    }
}
