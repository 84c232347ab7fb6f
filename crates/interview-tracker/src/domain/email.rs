use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::DomainError;

/// Validated e-mail address shared by users and candidate documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Accepts any value containing '@' that neither starts nor ends with it.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if !value.contains('@') || value.starts_with('@') || value.ends_with('@') {
            return Err(DomainError::InvalidEmail { value });
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_addresses_with_inner_at_sign() {
        for value in ["candidate@example.com", "a@b", "x@@y"] {
            let email = Email::parse(value).expect("valid email");
            assert_eq!(email.as_str(), value);
        }
    }

    #[test]
    fn rejects_missing_or_edge_at_sign() {
        for value in ["", "plainaddress", "@example.com", "candidate@", "@"] {
            match Email::parse(value) {
                Err(DomainError::InvalidEmail { value: rejected }) => assert_eq!(rejected, value),
                other => panic!("expected invalid email for '{value}', got {other:?}"),
            }
        }
    }

    #[test]
    fn deserialization_runs_validation() {
        let email: Email = serde_json::from_str("\"hr@example.com\"").expect("valid json email");
        assert_eq!(email.to_string(), "hr@example.com");

        assert!(serde_json::from_str::<Email>("\"hr.example.com\"").is_err());
    }
}
