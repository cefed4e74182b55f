//! Contact value objects - email, country and phone.

use serde::{Deserialize, Serialize};

/// An email address with its display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email {
    /// Address
    pub email: String,

    /// Display text, defaults to the address
    pub text: String,
}

impl Email {
    /// Create an email whose display text is the address itself.
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            text: email.clone(),
            email,
        }
    }

    /// Create an email with display text. Empty text falls back to the address.
    pub fn with_text(email: impl Into<String>, text: impl Into<String>) -> Self {
        let mut value = Self::new(email);
        let text = text.into();
        if !text.is_empty() {
            value.text = text;
        }
        value
    }
}

/// A country by ISO 3166-1 alpha-2 code and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// Country name
    pub name: String,

    /// Two-letter country code
    pub code: String,
}

impl Country {
    /// Create a country.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// A phone number with the country it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone {
    /// Phone number
    pub phone: String,

    /// Two-letter country code
    pub country: String,
}

impl Phone {
    /// Create a phone number.
    pub fn new(phone: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            country: country.into(),
        }
    }

    /// Whether no number is set.
    pub fn is_blank(&self) -> bool {
        self.phone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_text_defaults_to_address() {
        let email = Email::new("jane@example.com");
        assert_eq!(email.text, "jane@example.com");

        let email = Email::with_text("jane@example.com", "");
        assert_eq!(email.text, "jane@example.com");

        let email = Email::with_text("jane@example.com", "Jane");
        assert_eq!(email.text, "Jane");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Country::new("Canada", "CA"), Country::new("Canada", "CA"));
        assert_ne!(Country::new("Canada", "CA"), Country::new("Canada", "US"));
        assert_eq!(Phone::new("555", "US"), Phone::new("555", "US"));
        assert!(Phone::default().is_blank());
    }
}
