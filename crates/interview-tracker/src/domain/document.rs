use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::error::{require_text, DomainError};

/// Snapshot of what a candidate submitted with their interview request.
///
/// `age` is the candidate's interview availability and must not lie in the past relative to
/// the instant the document is built or updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRecord")]
pub struct Document {
    name: String,
    email: Email,
    age: DateTime<Utc>,
    experience: i32,
}

#[derive(Deserialize)]
struct DocumentRecord {
    name: String,
    email: Email,
    age: DateTime<Utc>,
    experience: i32,
}

impl TryFrom<DocumentRecord> for Document {
    type Error = DomainError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        Self::new(&record.name, record.email, record.age, record.experience)
    }
}

impl Document {
    pub fn new(
        name: &str,
        email: Email,
        age: DateTime<Utc>,
        experience: i32,
    ) -> Result<Self, DomainError> {
        Self::new_at(name, email, age, experience, Utc::now())
    }

    /// Builds a document validating `age` against `now` instead of the system clock.
    pub fn new_at(
        name: &str,
        email: Email,
        age: DateTime<Utc>,
        experience: i32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_text(name, "name")?,
            email,
            age: check_age(age, now)?,
            experience: check_experience(experience)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn age(&self) -> DateTime<Utc> {
        self.age
    }

    pub fn experience(&self) -> i32 {
        self.experience
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = require_text(name, "name")?;
        Ok(())
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub fn set_age(&mut self, age: DateTime<Utc>) -> Result<(), DomainError> {
        self.set_age_at(age, Utc::now())
    }

    pub fn set_age_at(&mut self, age: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.age = check_age(age, now)?;
        Ok(())
    }

    pub fn set_experience(&mut self, experience: i32) -> Result<(), DomainError> {
        self.experience = check_experience(experience)?;
        Ok(())
    }
}

fn check_age(age: DateTime<Utc>, now: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
    if age < now {
        return Err(DomainError::PastDate { field: "age" });
    }
    Ok(age)
}

fn check_experience(experience: i32) -> Result<i32, DomainError> {
    if experience < 0 {
        return Err(DomainError::NegativeValue {
            field: "experience",
            value: i64::from(experience),
        });
    }
    Ok(experience)
}
