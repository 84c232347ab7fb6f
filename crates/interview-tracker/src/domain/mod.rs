//! Reference entities and value types shared by workflows and requests.

mod document;
mod email;
pub mod error;
pub mod ids;
mod role;
mod user;

pub use document::Document;
pub use email::Email;
pub use error::DomainError;
pub use ids::{
    EventId, RequestId, RoleId, UserId, WorkflowId, WorkflowStepId, WorkflowTemplateId,
};
pub use role::Role;
pub use user::User;
