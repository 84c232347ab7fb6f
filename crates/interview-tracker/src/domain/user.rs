use serde::{Deserialize, Serialize};

use super::email::Email;
use super::error::{require_text, DomainError};
use super::ids::{RoleId, UserId};

/// Registered user who submits requests or acts on workflow steps.
///
/// Users reference their role by identifier only; deleting a role does not touch its users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    role_id: RoleId,
}

#[derive(Deserialize)]
struct UserRecord {
    id: UserId,
    name: String,
    email: Email,
    role_id: RoleId,
}

impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, &record.name, record.email, record.role_id)
    }
}

impl User {
    pub fn new(id: UserId, name: &str, email: Email, role_id: RoleId) -> Result<Self, DomainError> {
        Ok(Self {
            id: id.require()?,
            name: require_text(name, "name")?,
            email,
            role_id: role_id.require()?,
        })
    }

    pub fn create(name: &str, email: Email, role_id: RoleId) -> Result<Self, DomainError> {
        Self::new(UserId::generate(), name, email, role_id)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = require_text(name, "name")?;
        Ok(())
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub fn assign_role(&mut self, role_id: RoleId) -> Result<(), DomainError> {
        self.role_id = role_id.require()?;
        Ok(())
    }
}
