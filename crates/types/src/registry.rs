//! Column type tags and the per-tag dispatch table.

use moncol_core::{Result, TypeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::columns::{
    CheckboxType, CountryType, DateType, DropdownType, EmailType, ItemLinkType, LongTextType,
    NumberType, PeopleType, PhoneType, StatusType, TextType, TimelineType, WeekType,
};
use crate::contract::{ConversionRules, Converter, DecodeFailure, NullValue};

/// Converter type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnTag {
    /// Checkbox
    Checkbox,
    /// Country
    Country,
    /// Date with optional time
    Date,
    /// Multi-select dropdown
    Dropdown,
    /// Email
    Email,
    /// Connected items
    ItemLink,
    /// Long text
    LongText,
    /// Mirror of a connected column
    Mirror,
    /// Number
    Number,
    /// People
    People,
    /// Phone
    Phone,
    /// Status
    Status,
    /// Subitems
    Subitems,
    /// Text
    Text,
    /// Timeline
    Timeline,
    /// Week
    Week,
}

const COMPLEX: ConversionRules = ConversionRules {
    null_value: NullValue::EmptyObject,
    on_decode_failure: DecodeFailure::FallbackToDefault,
    read_only: false,
};

const SIMPLE: ConversionRules = ConversionRules {
    null_value: NullValue::EmptyString,
    on_decode_failure: DecodeFailure::FallbackToDefault,
    read_only: false,
};

impl ColumnTag {
    /// All tags.
    pub const ALL: [ColumnTag; 16] = [
        ColumnTag::Checkbox,
        ColumnTag::Country,
        ColumnTag::Date,
        ColumnTag::Dropdown,
        ColumnTag::Email,
        ColumnTag::ItemLink,
        ColumnTag::LongText,
        ColumnTag::Mirror,
        ColumnTag::Number,
        ColumnTag::People,
        ColumnTag::Phone,
        ColumnTag::Status,
        ColumnTag::Subitems,
        ColumnTag::Text,
        ColumnTag::Timeline,
        ColumnTag::Week,
    ];

    /// Conversion rules for the tag.
    pub const fn rules(self) -> ConversionRules {
        match self {
            ColumnTag::Number | ColumnTag::Text => SIMPLE,
            ColumnTag::Dropdown => ConversionRules {
                null_value: NullValue::EmptyList,
                ..COMPLEX
            },
            ColumnTag::Timeline => ConversionRules {
                on_decode_failure: DecodeFailure::Propagate,
                ..COMPLEX
            },
            ColumnTag::Mirror => ConversionRules {
                read_only: true,
                ..COMPLEX
            },
            ColumnTag::Subitems => ConversionRules {
                null_value: NullValue::None,
                read_only: true,
                ..COMPLEX
            },
            ColumnTag::Checkbox
            | ColumnTag::Country
            | ColumnTag::Date
            | ColumnTag::Email
            | ColumnTag::ItemLink
            | ColumnTag::LongText
            | ColumnTag::People
            | ColumnTag::Phone
            | ColumnTag::Status
            | ColumnTag::Week => COMPLEX,
        }
    }

    /// Tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnTag::Checkbox => "checkbox",
            ColumnTag::Country => "country",
            ColumnTag::Date => "date",
            ColumnTag::Dropdown => "dropdown",
            ColumnTag::Email => "email",
            ColumnTag::ItemLink => "item_link",
            ColumnTag::LongText => "long_text",
            ColumnTag::Mirror => "mirror",
            ColumnTag::Number => "number",
            ColumnTag::People => "people",
            ColumnTag::Phone => "phone",
            ColumnTag::Status => "status",
            ColumnTag::Subitems => "subitems",
            ColumnTag::Text => "text",
            ColumnTag::Timeline => "timeline",
            ColumnTag::Week => "week",
        }
    }

    /// Resolve a column type name as reported by the service.
    pub fn from_service_type(name: &str) -> Option<Self> {
        let tag = match name {
            "boolean" => ColumnTag::Checkbox,
            "country" => ColumnTag::Country,
            "date" => ColumnTag::Date,
            "dropdown" => ColumnTag::Dropdown,
            "email" => ColumnTag::Email,
            "board-relation" => ColumnTag::ItemLink,
            "long-text" => ColumnTag::LongText,
            "lookup" => ColumnTag::Mirror,
            "numeric" => ColumnTag::Number,
            "multiple-person" => ColumnTag::People,
            "phone" => ColumnTag::Phone,
            "color" => ColumnTag::Status,
            "subtasks" => ColumnTag::Subitems,
            "text" => ColumnTag::Text,
            "timerange" => ColumnTag::Timeline,
            "week" => ColumnTag::Week,
            _ => return None,
        };
        Some(tag)
    }
}

impl fmt::Display for ColumnTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnTag {
    type Err = TypeError;

    /// Accepts tag names and service type names.
    fn from_str(s: &str) -> Result<Self> {
        ColumnTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .or_else(|| ColumnTag::from_service_type(s))
            .ok_or_else(|| TypeError::UnknownColumnType(s.to_string()))
    }
}

impl Converter {
    /// Create a default-configured converter for a tag.
    ///
    /// Mirror and subitems columns need collaborators and are built with
    /// [`Converter::mirror`] and [`Converter::new`] instead.
    pub fn from_tag(tag: ColumnTag, id: Option<&str>, title: Option<&str>) -> Result<Self> {
        match tag {
            ColumnTag::Checkbox => Converter::new(CheckboxType, id, title),
            ColumnTag::Country => Converter::new(CountryType, id, title),
            ColumnTag::Date => Converter::new(DateType, id, title),
            ColumnTag::Dropdown => Converter::new(DropdownType::new(), id, title),
            ColumnTag::Email => Converter::new(EmailType, id, title),
            ColumnTag::ItemLink => Converter::new(ItemLinkType::new(true), id, title),
            ColumnTag::LongText => Converter::new(LongTextType, id, title),
            ColumnTag::Number => Converter::new(NumberType, id, title),
            ColumnTag::People => Converter::new(PeopleType, id, title),
            ColumnTag::Phone => Converter::new(PhoneType, id, title),
            ColumnTag::Status => Converter::new(StatusType::new(), id, title),
            ColumnTag::Text => Converter::new(TextType, id, title),
            ColumnTag::Timeline => Converter::new(TimelineType, id, title),
            ColumnTag::Week => Converter::new(WeekType, id, title),
            ColumnTag::Mirror => Err(TypeError::InvalidMirrorTarget(
                "mirror columns require a target type".to_string(),
            )),
            ColumnTag::Subitems => Err(TypeError::InvalidModel(
                "subitems columns require a record schema".to_string(),
            )),
        }
    }

    /// Create a mirror converter over a default-configured target type.
    pub fn mirror(target: ColumnTag, id: Option<&str>, title: Option<&str>) -> Result<Self> {
        if matches!(target, ColumnTag::Mirror | ColumnTag::Subitems) {
            return Err(TypeError::InvalidMirrorTarget(format!(
                "cannot mirror a {} column",
                target
            )));
        }
        let target = Converter::from_tag(target, id, title)?;
        Converter::new(crate::columns::MirrorType::new(target), id, title)
    }
}
