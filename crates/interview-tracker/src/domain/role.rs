use serde::{Deserialize, Serialize};

use super::error::{require_text, DomainError};
use super::ids::RoleId;

/// Approver role that workflow steps can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoleRecord")]
pub struct Role {
    id: RoleId,
    name: String,
}

#[derive(Deserialize)]
struct RoleRecord {
    id: RoleId,
    name: String,
}

impl TryFrom<RoleRecord> for Role {
    type Error = DomainError;

    fn try_from(record: RoleRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, &record.name)
    }
}

impl Role {
    pub fn new(id: RoleId, name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: id.require()?,
            name: require_text(name, "name")?,
        })
    }

    pub fn create(name: &str) -> Result<Self, DomainError> {
        Self::new(RoleId::generate(), name)
    }

    pub fn id(&self) -> RoleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = require_text(name, "name")?;
        Ok(())
    }
}
