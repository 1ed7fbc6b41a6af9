use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{ValueObjectError, ValueObjectResult};

/// `local@domain.tld` with an ASCII local part and a TLD of at least two letters
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// A syntactically valid email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub const CONCEPT: &'static str = "email";

    pub fn new(value: impl Into<String>) -> ValueObjectResult<Self> {
        let value = value.into();
        if !EMAIL_PATTERN.is_match(&value) {
            return Err(ValueObjectError::invalid(Self::CONCEPT, value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails_keep_their_value() {
        for raw in [
            "guest@hotel.com",
            "first.last+tag@mail.example.org",
            "a_b-c%d@sub-domain.co.uk",
            "UPPER@CASE.IO",
        ] {
            let email = Email::new(raw).unwrap();
            assert_eq!(email.value(), raw);
        }
    }

    #[test]
    fn test_invalid_emails_are_rejected() {
        for raw in [
            "",
            "plainaddress",
            "@hotel.com",
            "guest@",
            "guest@hotel",
            "guest@hotel.c",
            "guest@@hotel.com",
            "gu est@hotel.com",
            "gäst@hotel.com",
            "guest@hotel.com ",
            "guest@.com",
        ] {
            let err = Email::new(raw).unwrap_err();
            assert_eq!(
                err,
                ValueObjectError::InvalidFormat {
                    concept: "email",
                    value: raw.to_string()
                },
                "expected rejection of {raw:?}"
            );
        }
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(
            Email::new("guest@hotel.com").unwrap(),
            "guest@hotel.com".parse::<Email>().unwrap()
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Email = serde_json::from_str(r#""guest@hotel.com""#).unwrap();
        assert_eq!(ok.to_string(), "guest@hotel.com");
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#""guest@hotel.com""#);

        assert!(serde_json::from_str::<Email>(r#""not-an-email""#).is_err());
    }
}
