//! Per-column-type converters.
//!
//! Each type implements [`ColumnCodec`]; [`ColumnType`] is the closed set of
//! types and forwards every hook to the variant it holds.

use chrono::NaiveDate;
use moncol_core::format::DATE_FORMAT;
use moncol_core::{Json, Result, TypeError, ValidationError, Value};

use crate::contract::{Cell, Metadata};
use crate::registry::ColumnTag;

mod checkbox;
mod contact;
mod date;
mod dropdown;
mod item_link;
mod mirror;
mod number;
mod people;
mod period;
mod status;
mod subitems;
mod text;

pub use checkbox::CheckboxType;
pub use contact::{CountryType, EmailType, PhoneType};
pub use date::DateType;
pub use dropdown::DropdownType;
pub use item_link::ItemLinkType;
pub use mirror::MirrorType;
pub use number::NumberType;
pub use people::PeopleType;
pub use period::{TimelineType, WeekType};
pub use status::StatusType;
pub use subitems::SubitemsType;
pub use text::{LongTextType, TextType};

/// Type-specific conversion hooks driven by [`Converter`](crate::Converter).
pub(crate) trait ColumnCodec {
    /// Seed metadata at construction.
    fn init_metadata(&self, _metadata: &mut Metadata) {}

    /// Cast an application value into the native shape. `None` leaves the
    /// value unchanged.
    fn cast(&self, _value: &Value) -> Option<Value> {
        None
    }

    /// Native value used when a payload cannot be decoded leniently.
    fn fallback(&self) -> Value {
        Value::Null
    }

    /// Decode a column payload.
    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value>;

    /// Encode a non-empty native value.
    fn export(&self, metadata: &Metadata, value: &Value, baseline: &Json) -> Json;

    /// Encode an empty native value.
    fn export_empty(&self, null: Json) -> Json {
        null
    }

    /// Whether two non-empty values differ.
    fn compare(&self, candidate: &Value, baseline: &Value) -> bool {
        candidate != baseline
    }

    /// Check a non-null native value.
    fn validate(&self, metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError>;
}

/// The closed set of column types, with their type-specific configuration.
#[derive(Debug, Clone)]
pub enum ColumnType {
    /// Checkbox
    Checkbox(CheckboxType),
    /// Country
    Country(CountryType),
    /// Date
    Date(DateType),
    /// Dropdown
    Dropdown(DropdownType),
    /// Email
    Email(EmailType),
    /// Connected items
    ItemLink(ItemLinkType),
    /// Long text
    LongText(LongTextType),
    /// Mirror
    Mirror(MirrorType),
    /// Number
    Number(NumberType),
    /// People
    People(PeopleType),
    /// Phone
    Phone(PhoneType),
    /// Status
    Status(StatusType),
    /// Subitems
    Subitems(SubitemsType),
    /// Text
    Text(TextType),
    /// Timeline
    Timeline(TimelineType),
    /// Week
    Week(WeekType),
}

macro_rules! dispatch {
    ($kind:expr, $codec:ident => $body:expr) => {
        match $kind {
            ColumnType::Checkbox($codec) => $body,
            ColumnType::Country($codec) => $body,
            ColumnType::Date($codec) => $body,
            ColumnType::Dropdown($codec) => $body,
            ColumnType::Email($codec) => $body,
            ColumnType::ItemLink($codec) => $body,
            ColumnType::LongText($codec) => $body,
            ColumnType::Mirror($codec) => $body,
            ColumnType::Number($codec) => $body,
            ColumnType::People($codec) => $body,
            ColumnType::Phone($codec) => $body,
            ColumnType::Status($codec) => $body,
            ColumnType::Subitems($codec) => $body,
            ColumnType::Text($codec) => $body,
            ColumnType::Timeline($codec) => $body,
            ColumnType::Week($codec) => $body,
        }
    };
}

macro_rules! column_type_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ColumnType {
                fn from(codec: $ty) -> Self {
                    ColumnType::$variant(codec)
                }
            }
        )*
    };
}

column_type_from!(
    Checkbox(CheckboxType),
    Country(CountryType),
    Date(DateType),
    Dropdown(DropdownType),
    Email(EmailType),
    ItemLink(ItemLinkType),
    LongText(LongTextType),
    Mirror(MirrorType),
    Number(NumberType),
    People(PeopleType),
    Phone(PhoneType),
    Status(StatusType),
    Subitems(SubitemsType),
    Text(TextType),
    Timeline(TimelineType),
    Week(WeekType),
);

impl ColumnType {
    /// Type tag.
    pub fn tag(&self) -> ColumnTag {
        match self {
            ColumnType::Checkbox(_) => ColumnTag::Checkbox,
            ColumnType::Country(_) => ColumnTag::Country,
            ColumnType::Date(_) => ColumnTag::Date,
            ColumnType::Dropdown(_) => ColumnTag::Dropdown,
            ColumnType::Email(_) => ColumnTag::Email,
            ColumnType::ItemLink(_) => ColumnTag::ItemLink,
            ColumnType::LongText(_) => ColumnTag::LongText,
            ColumnType::Mirror(_) => ColumnTag::Mirror,
            ColumnType::Number(_) => ColumnTag::Number,
            ColumnType::People(_) => ColumnTag::People,
            ColumnType::Phone(_) => ColumnTag::Phone,
            ColumnType::Status(_) => ColumnTag::Status,
            ColumnType::Subitems(_) => ColumnTag::Subitems,
            ColumnType::Text(_) => ColumnTag::Text,
            ColumnType::Timeline(_) => ColumnTag::Timeline,
            ColumnType::Week(_) => ColumnTag::Week,
        }
    }
}

impl ColumnCodec for ColumnType {
    fn init_metadata(&self, metadata: &mut Metadata) {
        dispatch!(self, c => c.init_metadata(metadata))
    }

    fn cast(&self, value: &Value) -> Option<Value> {
        dispatch!(self, c => c.cast(value))
    }

    fn fallback(&self) -> Value {
        dispatch!(self, c => c.fallback())
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        dispatch!(self, c => c.convert(metadata, cell))
    }

    fn export(&self, metadata: &Metadata, value: &Value, baseline: &Json) -> Json {
        dispatch!(self, c => c.export(metadata, value, baseline))
    }

    fn export_empty(&self, null: Json) -> Json {
        dispatch!(self, c => c.export_empty(null))
    }

    fn compare(&self, candidate: &Value, baseline: &Value) -> bool {
        dispatch!(self, c => c.compare(candidate, baseline))
    }

    fn validate(&self, metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        dispatch!(self, c => c.validate(metadata, value))
    }
}

pub(crate) fn malformed(metadata: &Metadata, message: impl Into<String>) -> TypeError {
    TypeError::conversion(metadata.label(), message)
}

pub(crate) fn shape_error(expected: &str, value: &Value) -> ValidationError {
    ValidationError::new(format!(
        "Value is not a valid {} type: ({}).",
        expected,
        value.type_name()
    ))
}

/// Null, `{}` and `""` all mean "no value" in a decoded payload.
pub(crate) fn is_blank(value: &Json) -> bool {
    match value {
        Json::Null => true,
        Json::Object(map) => map.is_empty(),
        Json::String(s) => s.is_empty(),
        _ => false,
    }
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Identifiers arrive as numbers or strings.
pub(crate) fn id_string(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric identifiers are sent as numbers.
pub(crate) fn id_json(id: &str) -> Json {
    id.parse::<i64>()
        .map(Json::from)
        .unwrap_or_else(|_| Json::from(id))
}

/// Linked item ids from a `{"linkedPulseIds": [{"linkedPulseId": n}]}` value.
pub(crate) fn linked_item_ids(metadata: &Metadata, value: &Json) -> Result<Vec<String>> {
    let links = value
        .get("linkedPulseIds")
        .and_then(Json::as_array)
        .ok_or_else(|| malformed(metadata, "missing linkedPulseIds"))?;
    links
        .iter()
        .map(|link| {
            link.get("linkedPulseId")
                .and_then(id_string)
                .ok_or_else(|| malformed(metadata, format!("invalid linked item: {}", link)))
        })
        .collect()
}
