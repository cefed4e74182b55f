//! The conversion contract between wire values and native values.
//!
//! A [`Converter`] is bound to one column of one record. Decoding a column
//! payload merges the column's identity and settings into the converter's
//! metadata and replaces its baseline; encoding and change detection read
//! that state but never modify it.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use moncol_core::format::ZULU_FORMAT;
use moncol_core::{ColumnValue, Json, Result, TypeError, ValidationError, Value};
use serde::Serialize;
use serde_json::Map;

use crate::columns::{ColumnCodec, ColumnType};
use crate::registry::ColumnTag;

/// Wire representation of "no value" for a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullValue {
    /// No null representation; encoding always yields JSON `null`
    None,
    /// `""`
    EmptyString,
    /// `{}`
    EmptyObject,
    /// `[]`
    EmptyList,
}

impl NullValue {
    /// The wire value, if the type has one.
    pub fn to_json(self) -> Option<Json> {
        match self {
            NullValue::None => None,
            NullValue::EmptyString => Some(Json::String(String::new())),
            NullValue::EmptyObject => Some(Json::Object(Map::new())),
            NullValue::EmptyList => Some(Json::Array(Vec::new())),
        }
    }

    /// Whether `value` is this null representation.
    pub fn matches(self, value: &Json) -> bool {
        match self.to_json() {
            Some(null) => &null == value,
            None => value.is_null(),
        }
    }
}

/// What to do when a column payload cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFailure {
    /// Log the failure and use the converter's default value
    FallbackToDefault,
    /// Return the failure to the caller
    Propagate,
}

/// Per-type conversion rules, looked up by [`ColumnTag::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRules {
    /// Wire form of "no value"
    pub null_value: NullValue,

    /// Decode failure policy
    pub on_decode_failure: DecodeFailure,

    /// Values are computed by the service and never reported as changed
    pub read_only: bool,
}

/// Input to [`Converter::to_native`].
#[derive(Debug, Clone)]
pub enum Input {
    /// A column payload loaded from the service
    Column(ColumnValue),
    /// A value supplied by application code
    Raw(Value),
}

impl From<ColumnValue> for Input {
    fn from(column: ColumnValue) -> Self {
        Input::Column(column)
    }
}

impl From<&ColumnValue> for Input {
    fn from(column: &ColumnValue) -> Self {
        Input::Column(column.clone())
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Raw(value)
    }
}

/// A decoded column payload, handed to the per-type convert hook.
pub(crate) struct Cell<'a> {
    pub column: &'a ColumnValue,
    pub text: &'a str,
    pub value: &'a Json,
    pub additional_info: &'a Json,
}

/// Column metadata: identity, column settings and the last change time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Json>);

impl Metadata {
    pub(crate) fn identity(id: Option<&str>, title: Option<&str>) -> Result<Self> {
        let id = id.filter(|s| !s.is_empty());
        let title = title.filter(|s| !s.is_empty());
        if id.is_none() && title.is_none() {
            return Err(TypeError::MissingIdentity);
        }

        let mut metadata = Self::default();
        if let Some(id) = id {
            metadata.insert("id", Json::from(id));
        }
        if let Some(title) = title {
            metadata.insert("title", Json::from(title));
        }
        Ok(metadata)
    }

    /// Column id.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Json::as_str)
    }

    /// Column title.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Json::as_str)
    }

    /// Title, or id when untitled. Used in messages.
    pub fn label(&self) -> &str {
        self.title().or_else(|| self.id()).unwrap_or_default()
    }

    /// Get an entry.
    pub fn get(&self, key: &str) -> Option<&Json> {
        self.0.get(key)
    }

    /// Set an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Json) {
        self.0.insert(key.into(), value);
    }

    /// When the column value was last changed, in local time.
    pub fn changed_at(&self) -> Option<DateTime<Local>> {
        let raw = self.0.get("changed_at")?.as_str()?;
        let naive = NaiveDateTime::parse_from_str(raw, ZULU_FORMAT).ok()?;
        Some(Utc.from_utc_datetime(&naive).with_timezone(&Local))
    }

    pub(crate) fn merge_column(&mut self, column: &ColumnValue) -> Result<()> {
        self.insert("id", Json::from(column.id.as_str()));
        if !column.title.is_empty() {
            self.insert("title", Json::from(column.title.as_str()));
        }

        let settings = match column.settings_str.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => serde_json::from_str::<Json>(raw)?,
            _ => return Ok(()),
        };
        if let Json::Object(settings) = settings {
            tracing::trace!(column = %column.id, keys = settings.len(), "merging column settings");
            self.0.extend(settings);
        }
        Ok(())
    }

    /// Move the `changed_at` field of a decoded value into the metadata.
    /// Values that are not objects carry no timestamp.
    pub(crate) fn extract_changed_at(&mut self, value: &mut Json) {
        if let Json::Object(map) = value {
            match map.remove("changed_at") {
                Some(changed_at) => self.insert("changed_at", changed_at),
                None => {
                    self.0.remove("changed_at");
                }
            }
        }
    }
}

/// A converter bound to one column.
#[derive(Debug, Clone)]
pub struct Converter {
    kind: ColumnType,
    metadata: Metadata,
    original_value: Value,
    original_wire: Json,
}

impl Converter {
    /// Create a converter. At least one of `id` and `title` is required.
    pub fn new(kind: impl Into<ColumnType>, id: Option<&str>, title: Option<&str>) -> Result<Self> {
        let kind = kind.into();
        let mut metadata = Metadata::identity(id, title)?;

        match &kind {
            ColumnType::Mirror(mirror) => {
                let target = mirror.target().tag();
                if matches!(target, ColumnTag::Mirror | ColumnTag::Subitems) {
                    return Err(TypeError::InvalidMirrorTarget(format!(
                        "cannot mirror a {} column",
                        target
                    )));
                }
            }
            ColumnType::Subitems(subitems) => {
                if subitems.schema().is_empty() {
                    return Err(TypeError::InvalidModel(subitems.schema().name().to_string()));
                }
            }
            _ => {}
        }

        kind.init_metadata(&mut metadata);
        Ok(Self {
            kind,
            metadata,
            original_value: Value::Null,
            original_wire: Json::Null,
        })
    }

    /// Type tag.
    pub fn tag(&self) -> ColumnTag {
        self.kind.tag()
    }

    /// Type-specific configuration.
    pub fn kind(&self) -> &ColumnType {
        &self.kind
    }

    /// Conversion rules for this converter's type. A mirror keeps its own
    /// rules but takes the decode failure policy of the mirrored type.
    pub fn rules(&self) -> ConversionRules {
        match &self.kind {
            ColumnType::Mirror(mirror) => ConversionRules {
                on_decode_failure: mirror.target().rules().on_decode_failure,
                ..self.tag().rules()
            },
            _ => self.tag().rules(),
        }
    }

    /// Column metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The native value last decoded from a column payload.
    pub fn original_value(&self) -> &Value {
        &self.original_value
    }

    /// The wire value last decoded from a column payload.
    pub fn original_wire(&self) -> &Json {
        &self.original_wire
    }

    /// When the column value was last changed, if the payload said.
    pub fn changed_at(&self) -> Option<DateTime<Local>> {
        self.metadata.changed_at()
    }

    /// Convert a column payload or an application value to a native value.
    ///
    /// Column payloads update the metadata and the baseline. Application
    /// values are cast when the type allows it and never touch the baseline.
    pub fn to_native(&mut self, input: impl Into<Input>) -> Result<Value> {
        match input.into() {
            Input::Raw(value) => Ok(self.cast(value)),
            Input::Column(column) => self.decode(&column),
        }
    }

    fn cast(&self, value: Value) -> Value {
        if value.is_empty() {
            return value;
        }
        self.kind.cast(&value).unwrap_or(value)
    }

    fn decode(&mut self, column: &ColumnValue) -> Result<Value> {
        self.metadata.merge_column(column)?;
        let rules = self.rules();

        let decoded = match column.value.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => serde_json::from_str::<Json>(raw)
                .map_err(|e| TypeError::conversion(self.metadata.label(), e.to_string())),
            _ => Ok(Json::Null),
        };
        let mut decoded = match decoded {
            Ok(decoded) => decoded,
            Err(e) => return self.recover(rules, e, Json::Null),
        };
        self.metadata.extract_changed_at(&mut decoded);

        let additional_info = match column.additional_info.as_deref() {
            Some(raw) => serde_json::from_str::<Json>(raw).unwrap_or_else(|_| Json::from(raw)),
            None => Json::Null,
        };

        let cell = Cell {
            column,
            text: column.text.as_deref().unwrap_or_default(),
            value: &decoded,
            additional_info: &additional_info,
        };
        match self.kind.convert(&self.metadata, &cell) {
            Ok(native) => {
                self.original_value = native.clone();
                self.original_wire = decoded;
                Ok(native)
            }
            Err(e) => self.recover(rules, e, decoded),
        }
    }

    fn recover(&mut self, rules: ConversionRules, error: TypeError, decoded: Json) -> Result<Value> {
        match (&error, rules.on_decode_failure) {
            (TypeError::Conversion { .. }, DecodeFailure::FallbackToDefault) => {
                tracing::debug!(
                    column = %self.metadata.label(),
                    column_type = %self.tag(),
                    "falling back to default value: {}",
                    error
                );
                let native = self.kind.fallback();
                self.original_value = native.clone();
                self.original_wire = decoded;
                Ok(native)
            }
            _ => Err(error),
        }
    }

    /// Convert a native value to its wire value.
    pub fn to_primitive(&self, value: &Value) -> Json {
        let Some(null) = self.rules().null_value.to_json() else {
            return Json::Null;
        };
        if value.is_empty() {
            return self.kind.export_empty(null);
        }
        self.kind.export(&self.metadata, value, &self.original_wire)
    }

    /// Whether `candidate` differs from `baseline`.
    pub fn has_changed(&self, candidate: &Value, baseline: &Value) -> bool {
        if self.rules().read_only {
            return false;
        }
        match (candidate.is_empty(), baseline.is_empty()) {
            (true, true) => false,
            (true, false) | (false, true) => true,
            (false, false) => self.kind.compare(candidate, baseline),
        }
    }

    /// Whether `current` differs from the last decoded value.
    pub fn is_modified(&self, current: &Value) -> bool {
        self.has_changed(current, &self.original_value)
    }

    /// Check a native value against this column's rules. Null always passes.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), ValidationError> {
        if matches!(value, Value::Null) {
            return Ok(());
        }
        self.kind.validate(&self.metadata, value)
    }
}
