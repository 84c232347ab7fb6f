use serde::Serialize;

use super::event::RequestEvent;
use super::request::Request;
use crate::domain::{Document, RequestId, Role, RoleId, User, UserId, WorkflowTemplateId};
use crate::workflows::{WorkflowStep, WorkflowTemplate};

/// Storage abstraction for request aggregates so the service can be exercised in isolation.
///
/// Implementations load and save the whole aggregate graph; one aggregate is handled per
/// call, and callers are expected to serialize writes to the same request.
pub trait RequestRepository: Send + Sync {
    fn insert(&self, request: Request) -> Result<Request, RepositoryError>;
    fn update(&self, request: Request) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RequestId) -> Result<Option<Request>, RepositoryError>;
    fn list(&self, limit: usize) -> Result<Vec<Request>, RepositoryError>;
}

/// Storage for the reference data requests point at: roles, users, and templates.
pub trait DirectoryRepository: Send + Sync {
    fn insert_role(&self, role: Role) -> Result<Role, RepositoryError>;
    fn fetch_role(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError>;
    fn insert_user(&self, user: User) -> Result<User, RepositoryError>;
    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn insert_template(&self, template: WorkflowTemplate)
        -> Result<WorkflowTemplate, RepositoryError>;
    fn update_template(&self, template: WorkflowTemplate) -> Result<(), RepositoryError>;
    fn fetch_template(
        &self,
        id: &WorkflowTemplateId,
    ) -> Result<Option<WorkflowTemplate>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} {id} already exists")]
    Conflict { entity: &'static str, id: String },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn conflict(entity: &'static str, id: impl ToString) -> Self {
        Self::Conflict {
            entity,
            id: id.to_string(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Serialized summary of a request for API responses and CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct RequestView {
    pub request_id: RequestId,
    pub workflow_name: String,
    pub workflow_template_id: WorkflowTemplateId,
    pub user_id: UserId,
    pub user_name: String,
    pub document: Document,
    pub steps: Vec<WorkflowStep>,
    pub pending_step: Option<String>,
    pub approved: bool,
    pub rejected: bool,
    pub events: Vec<RequestEvent>,
}

impl From<&Request> for RequestView {
    fn from(request: &Request) -> Self {
        let workflow = request.workflow();
        Self {
            request_id: request.id(),
            workflow_name: workflow.name().to_string(),
            workflow_template_id: workflow.workflow_template_id(),
            user_id: request.user().id(),
            user_name: request.user().name().to_string(),
            document: request.document().clone(),
            steps: workflow.steps().to_vec(),
            pending_step: workflow.first_pending().map(|step| step.name().to_string()),
            approved: workflow.is_approve(),
            rejected: workflow.is_reject(),
            events: request.events().to_vec(),
        }
    }
}
