//! Email, country and phone columns.

use moncol_core::{Country, Email, Json, Phone, Result, ValidationError, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use super::{is_blank, malformed, shape_error, ColumnCodec};
use crate::contract::{Cell, Metadata};
use crate::iso;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").ok());

fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(address))
}

fn str_field<'a>(value: &'a Json, key: &str) -> &'a str {
    value.get(key).and_then(Json::as_str).unwrap_or_default()
}

/// Email column: `{"email": ..., "text": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailType;

impl ColumnCodec for EmailType {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Text(s) => Some(Value::Email(Email::new(s.trim()))),
            _ => None,
        }
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(Value::Null);
        }
        if !cell.value.is_object() {
            return Err(malformed(metadata, format!("unexpected email value: {}", cell.value)));
        }
        let email = str_field(cell.value, "email");
        if email.is_empty() {
            return Ok(Value::Null);
        }
        Ok(Value::Email(Email::with_text(email, str_field(cell.value, "text"))))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Email(e) if !e.email.is_empty() => json!({"email": e.email, "text": e.text}),
            _ => json!({}),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let Value::Email(email) = value else {
            return Err(shape_error("email", value));
        };
        if !is_valid_email(&email.email) {
            return Err(ValidationError::new(format!(
                "Value is not a valid email address: ({}).",
                email.email
            )));
        }
        Ok(())
    }
}

/// Country column: `{"countryCode": "US", "countryName": "United States"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryType;

impl ColumnCodec for CountryType {
    fn cast(&self, value: &Value) -> Option<Value> {
        let Value::Text(s) = value else {
            return None;
        };
        let raw = s.trim();
        let code = iso::country_code(raw)
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_ascii_uppercase());
        iso::country_name(&code).map(|name| Value::Country(Country::new(name, code)))
    }

    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(Value::Null);
        }
        let code = str_field(cell.value, "countryCode");
        if code.is_empty() {
            return Err(malformed(metadata, format!("missing country code: {}", cell.value)));
        }
        Ok(Value::Country(Country::new(str_field(cell.value, "countryName"), code)))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Country(c) => json!({"countryCode": c.code, "countryName": c.name}),
            _ => json!({}),
        }
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let Value::Country(country) = value else {
            return Err(shape_error("country", value));
        };
        if !iso::is_known_code(&country.code) {
            return Err(ValidationError::new(format!(
                "Unknown country code: ({}).",
                country.code
            )));
        }
        // Names outside the registry are accepted; a name of another country is not.
        match iso::country_code(&country.name) {
            Some(code) if !code.eq_ignore_ascii_case(country.code.trim()) => {
                Err(ValidationError::new(format!(
                    "Country name ({}) does not match code ({}).",
                    country.name, country.code
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Phone column: `{"phone": ..., "countryShortName": "US"}`.
///
/// An empty phone exports explicit empty strings rather than `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneType;

fn empty_phone() -> Json {
    json!({"phone": "", "countryShortName": ""})
}

impl ColumnCodec for PhoneType {
    fn convert(&mut self, metadata: &Metadata, cell: &Cell<'_>) -> Result<Value> {
        if is_blank(cell.value) {
            return Ok(Value::Null);
        }
        if !cell.value.is_object() {
            return Err(malformed(metadata, format!("unexpected phone value: {}", cell.value)));
        }
        let phone = str_field(cell.value, "phone");
        if phone.is_empty() {
            return Ok(Value::Null);
        }
        Ok(Value::Phone(Phone::new(phone, str_field(cell.value, "countryShortName"))))
    }

    fn export(&self, _metadata: &Metadata, value: &Value, _baseline: &Json) -> Json {
        match value {
            Value::Phone(p) if !p.is_blank() => {
                json!({"phone": p.phone, "countryShortName": p.country})
            }
            _ => empty_phone(),
        }
    }

    fn export_empty(&self, _null: Json) -> Json {
        empty_phone()
    }

    fn validate(&self, _metadata: &Metadata, value: &Value) -> std::result::Result<(), ValidationError> {
        let Value::Phone(phone) = value else {
            return Err(shape_error("phone", value));
        };
        if phone.is_blank() {
            return Ok(());
        }
        if !iso::is_known_code(&phone.country) {
            return Err(ValidationError::new(format!(
                "Unknown country code for phone: ({}).",
                phone.country
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnValue, Converter};

    fn column(id: &str, value: Json) -> ColumnValue {
        ColumnValue::new(id, id).with_value(&value)
    }

    #[test]
    fn test_email_decode_defaults_text() {
        let mut c = Converter::new(EmailType, Some("email"), None).unwrap();
        let value = c.to_native(column("email", json!({"email": "a@b.io"}))).unwrap();
        assert_eq!(value, Value::Email(Email::new("a@b.io")));
        assert_eq!(c.to_primitive(&value), json!({"email": "a@b.io", "text": "a@b.io"}));
    }

    #[test]
    fn test_email_decode_empty() {
        let mut c = Converter::new(EmailType, Some("email"), None).unwrap();
        assert_eq!(c.to_native(column("email", json!({}))).unwrap(), Value::Null);
        assert_eq!(c.to_primitive(&Value::Null), json!({}));
    }

    #[test]
    fn test_email_pattern_compiles() {
        assert!(EMAIL_RE.is_some());
    }

    #[test]
    fn test_email_validate() {
        let c = Converter::new(EmailType, Some("email"), None).unwrap();
        assert!(c.validate(&Value::Email(Email::new("jane.doe@example.com"))).is_ok());
        assert!(c.validate(&Value::Email(Email::new("not-an-email"))).is_err());
        assert!(c.validate(&Value::from("jane@example.com")).is_err());
    }

    #[test]
    fn test_country_round_trip() {
        let mut c = Converter::new(CountryType, Some("country"), None).unwrap();
        let wire = json!({"countryCode": "US", "countryName": "United States"});
        let value = c.to_native(column("country", wire.clone())).unwrap();
        assert_eq!(value, Value::Country(Country::new("United States", "US")));
        assert_eq!(c.to_primitive(&value), wire);
    }

    #[test]
    fn test_country_cast_from_code() {
        let mut c = Converter::new(CountryType, Some("country"), None).unwrap();
        assert_eq!(
            c.to_native(Value::from("fr")).unwrap(),
            Value::Country(Country::new("France", "FR"))
        );
        assert_eq!(
            c.to_native(Value::from("Germany")).unwrap(),
            Value::Country(Country::new("Germany", "DE"))
        );
    }

    #[test]
    fn test_country_validate() {
        let c = Converter::new(CountryType, Some("country"), None).unwrap();
        assert!(c.validate(&Value::Country(Country::new("France", "FR"))).is_ok());
        assert!(c.validate(&Value::Country(Country::new("", "DE"))).is_ok());
        assert!(c.validate(&Value::Country(Country::new("Spain", "FR"))).is_err());
        assert!(c.validate(&Value::Country(Country::new("Atlantis", "XX"))).is_err());
    }

    #[test]
    fn test_country_validate_registry_names() {
        let mut c = Converter::new(CountryType, Some("country"), None).unwrap();
        for (code, name) in [
            ("CI", "Côte d'Ivoire"),
            ("VN", "Viet Nam"),
            ("AX", "Åland Islands"),
            ("US", "United States of America"),
        ] {
            let wire = json!({"countryCode": code, "countryName": name});
            let value = c.to_native(column("country", wire)).unwrap();
            assert!(c.validate(&value).is_ok(), "{} {}", code, name);
        }
        assert!(c.validate(&Value::Country(Country::new("Viet Nam", "CI"))).is_err());
    }

    #[test]
    fn test_phone_round_trip() {
        let mut c = Converter::new(PhoneType, Some("phone"), None).unwrap();
        let wire = json!({"phone": "+15551234567", "countryShortName": "US"});
        let value = c.to_native(column("phone", wire.clone())).unwrap();
        assert_eq!(value, Value::Phone(Phone::new("+15551234567", "US")));
        assert_eq!(c.to_primitive(&value), wire);
    }

    #[test]
    fn test_phone_empty_exports_empty_strings() {
        let c = Converter::new(PhoneType, Some("phone"), None).unwrap();
        assert_eq!(
            c.to_primitive(&Value::Null),
            json!({"phone": "", "countryShortName": ""})
        );
        assert_eq!(
            c.to_primitive(&Value::Phone(Phone::default())),
            json!({"phone": "", "countryShortName": ""})
        );
    }

    #[test]
    fn test_phone_validate() {
        let c = Converter::new(PhoneType, Some("phone"), None).unwrap();
        assert!(c.validate(&Value::Phone(Phone::new("123", "GB"))).is_ok());
        assert!(c.validate(&Value::Phone(Phone::new("123", "ZZ"))).is_err());
    }

    #[test]
    fn test_compound_reflexive() {
        let c = Converter::new(PhoneType, Some("phone"), None).unwrap();
        let phone = Value::Phone(Phone::new("123", "GB"));
        assert!(!c.has_changed(&phone, &phone.clone()));
        assert!(c.has_changed(&phone, &Value::Phone(Phone::new("124", "GB"))));
    }
}
