//! Column Types
//!
//! Converters between the service's per-column wire values and native
//! values, with change tracking for partial updates and the record model
//! binding that drives them.

#![warn(missing_docs)]

pub mod contract;
pub mod registry;
pub mod columns;
pub mod settings;
pub mod mapping;
pub mod iso;
pub mod config;
pub mod model;

pub use contract::{Converter, ConversionRules, DecodeFailure, Input, Metadata, NullValue};
pub use registry::ColumnTag;
pub use columns::{
    CheckboxType, ColumnType, CountryType, DateType, DropdownType, EmailType, ItemLinkType,
    LongTextType, MirrorType, NumberType, PeopleType, PhoneType, StatusType, SubitemsType,
    TextType, TimelineType, WeekType,
};
pub use settings::{DropdownLabel, DropdownSettings, PeopleSettings, StatusSettings};
pub use mapping::DataMapping;
pub use config::{FieldSpec, ModelSpec, SchemaRegistry};
pub use model::{FieldDecl, ItemModel, ModelSchema};

pub use moncol_core::{
    ColumnValue, Country, Email, Item, ItemClient, Json, Number, PeopleKind, PersonOrTeam, Phone,
    Record, Result, Timeline, TypeError, ValidationError, ValidationErrors, Value, Week,
};
