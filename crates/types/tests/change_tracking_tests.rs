mod common;

use chrono::{Local, NaiveDate, TimeZone};
use moncol_types::{
    ColumnTag, Converter, Country, DataMapping, DropdownType, Email, ItemLinkType, Number,
    PersonOrTeam, Phone, Timeline, Value, Week,
};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn samples(tag: ColumnTag) -> Vec<Value> {
    match tag {
        ColumnTag::Checkbox => vec![Value::Bool(true)],
        ColumnTag::Country => vec![Value::Country(Country::new("Japan", "JP"))],
        ColumnTag::Date => vec![Value::Date(
            Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).earliest().unwrap(),
        )],
        ColumnTag::Dropdown => vec![Value::Labels(vec!["a".into(), "b".into()])],
        ColumnTag::Email => vec![Value::Email(Email::new("a@example.com"))],
        ColumnTag::ItemLink => vec![Value::ItemIds(vec!["1".into(), "2".into()])],
        ColumnTag::LongText | ColumnTag::Text | ColumnTag::Status => vec![Value::from("x")],
        ColumnTag::Number => vec![Value::from(0i64), Value::from(3i64), Value::from(3.5)],
        ColumnTag::People => vec![
            Value::People(vec![PersonOrTeam::person("1"), PersonOrTeam::team("2")]),
            Value::Person(PersonOrTeam::person("1")),
        ],
        ColumnTag::Phone => vec![Value::Phone(Phone::new("555", "US"))],
        ColumnTag::Timeline => vec![Value::Timeline(
            Timeline::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap(),
        )],
        ColumnTag::Week => vec![Value::Week(Week::new(date(2024, 1, 17)))],
        ColumnTag::Mirror | ColumnTag::Subitems => vec![],
    }
}

#[test]
fn has_changed_is_reflexive() {
    for tag in ColumnTag::ALL {
        let Ok(converter) = Converter::from_tag(tag, Some("col"), None) else {
            continue;
        };
        assert!(!converter.has_changed(&Value::Null, &Value::Null), "{}", tag);
        for value in samples(tag) {
            assert!(
                !converter.has_changed(&value, &value.clone()),
                "{} {:?}",
                tag,
                value
            );
        }
    }
}

#[test]
fn exactly_one_empty_side_is_a_change() {
    let converter = Converter::from_tag(ColumnTag::Text, Some("col"), None).unwrap();
    assert!(converter.has_changed(&Value::from("x"), &Value::Null));
    assert!(converter.has_changed(&Value::Null, &Value::from("x")));
    assert!(!converter.has_changed(&Value::from(""), &Value::Null));
}

#[test]
fn number_zero_is_a_value() {
    let converter = Converter::from_tag(ColumnTag::Number, Some("col"), None).unwrap();
    assert!(converter.has_changed(&Value::from(0i64), &Value::Null));
    assert_eq!(converter.to_primitive(&Value::from(0i64)), json!("0"));
}

#[test]
fn item_link_sets_compare_without_order() {
    let converter = Converter::new(ItemLinkType::new(true), Some("col"), None).unwrap();
    let a = Value::ItemIds(vec!["1".into(), "2".into(), "3".into()]);
    let b = Value::ItemIds(vec!["3".into(), "1".into(), "2".into()]);
    let c = Value::ItemIds(vec!["1".into(), "2".into()]);
    assert!(!converter.has_changed(&a, &b));
    assert!(converter.has_changed(&a, &c));
}

#[test]
fn baseline_tracks_decoded_value_only() {
    let mut converter = Converter::from_tag(ColumnTag::Number, Some("col"), None).unwrap();
    converter
        .to_native(common::column("col", "Amount", json!("10")))
        .unwrap();
    assert_eq!(converter.original_value(), &Value::Number(Number::Int(10)));

    let assigned = converter.to_native(Value::from("11")).unwrap();
    assert_eq!(converter.original_value(), &Value::Number(Number::Int(10)));
    assert!(converter.is_modified(&assigned));
    assert!(!converter.is_modified(&Value::from(10.0)));
}

#[test]
fn mapped_dropdown_decodes_to_application_values() {
    let mapping = DataMapping::new().with("Done", "DONE");
    let mut converter =
        Converter::new(DropdownType::with_mapping(mapping), Some("col"), None).unwrap();

    let done = moncol_types::ColumnValue::new("col", "Stage")
        .with_text("Done")
        .with_value(&json!({"ids": [1]}));
    assert_eq!(
        converter.to_native(done).unwrap(),
        Value::Labels(vec!["DONE".into()])
    );

    let unknown = moncol_types::ColumnValue::new("col", "Stage")
        .with_text("Unknown")
        .with_value(&json!({"ids": [5]}));
    assert_eq!(converter.to_native(unknown).unwrap(), Value::Labels(vec![]));
}

#[test]
fn read_only_columns_never_change() {
    let mirror = Converter::mirror(ColumnTag::Text, Some("col"), None).unwrap();
    assert!(!mirror.has_changed(&Value::from("a"), &Value::from("b")));
    assert!(!mirror.has_changed(&Value::from("a"), &Value::Null));
}
