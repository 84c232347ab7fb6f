//! UUID-backed identifiers for every entity in the tracker.
//!
//! The nil UUID stands for "no identifier" and is rejected wherever an entity is built
//! from an explicit id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::DomainError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub const fn nil() -> Self {
                Self(Uuid::nil())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            pub(crate) fn require(self) -> Result<Self, DomainError> {
                if self.is_nil() {
                    return Err(DomainError::EmptyIdentifier { field: $field });
                }
                Ok(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifier of an approver role.
    RoleId,
    "role_id"
);
entity_id!(
    /// Identifier of a registered user.
    UserId,
    "user_id"
);
entity_id!(
    /// Identifier of an interview request aggregate.
    RequestId,
    "request_id"
);
entity_id!(WorkflowId, "workflow_id");
entity_id!(WorkflowStepId, "step_id");
entity_id!(WorkflowTemplateId, "workflow_template_id");
entity_id!(EventId, "event_id");
