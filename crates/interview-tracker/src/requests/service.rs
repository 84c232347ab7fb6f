use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use super::event::RequestEvent;
use super::repository::{DirectoryRepository, RepositoryError, RequestRepository};
use super::request::Request;
use crate::config::WorkflowConfig;
use crate::domain::{
    Document, DomainError, Email, RequestId, Role, RoleId, User, UserId, WorkflowTemplateId,
};
use crate::workflows::{StepStatus, WorkflowStep, WorkflowStepTemplate, WorkflowTemplate};

/// Candidate submission as received from a caller, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentDraft {
    pub name: String,
    pub email: String,
    pub age: DateTime<Utc>,
    pub experience: i32,
}

impl DocumentDraft {
    fn into_document(self) -> Result<Document, DomainError> {
        let email = Email::parse(self.email)?;
        Document::new(&self.name, email, self.age, self.experience)
    }
}

/// Step blueprint as received from a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct StepTemplateDraft {
    pub name: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub role_id: RoleId,
}

/// Ad-hoc step appended to a live request workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct StepDraft {
    pub name: String,
    #[serde(default = "pending")]
    pub status: StepStatus,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub role_id: Option<RoleId>,
    pub comment: String,
}

fn pending() -> StepStatus {
    StepStatus::Pending
}

/// Service loading aggregates from the repositories, applying one domain operation, and
/// saving the result.
pub struct InterviewRequestService<R, D> {
    requests: Arc<R>,
    directory: Arc<D>,
    config: WorkflowConfig,
}

impl<R, D> InterviewRequestService<R, D>
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    pub fn new(requests: Arc<R>, directory: Arc<D>, config: WorkflowConfig) -> Self {
        Self {
            requests,
            directory,
            config,
        }
    }

    pub fn register_role(&self, name: &str) -> Result<Role, RequestServiceError> {
        let role = self.directory.insert_role(Role::create(name)?)?;
        info!(role_id = %role.id(), name = role.name(), "role registered");
        Ok(role)
    }

    pub fn register_user(
        &self,
        name: &str,
        email: &str,
        role_id: RoleId,
    ) -> Result<User, RequestServiceError> {
        let role = self.role(&role_id)?;
        let user = User::create(name, Email::parse(email)?, role.id())?;
        let user = self.directory.insert_user(user)?;
        info!(user_id = %user.id(), role_id = %role.id(), "user registered");
        Ok(user)
    }

    pub fn create_template(
        &self,
        name: &str,
        steps: Vec<StepTemplateDraft>,
    ) -> Result<WorkflowTemplate, RequestServiceError> {
        let mut template = WorkflowTemplate::create(name)?;
        for draft in steps {
            template.add_step(self.step_template(draft)?);
        }

        let template = self.directory.insert_template(template)?;
        info!(
            template_id = %template.id(),
            steps = template.steps().len(),
            "workflow template created"
        );
        Ok(template)
    }

    pub fn add_template_step(
        &self,
        template_id: &WorkflowTemplateId,
        draft: StepTemplateDraft,
    ) -> Result<WorkflowTemplate, RequestServiceError> {
        let mut template = self.template(template_id)?;
        template.add_step(self.step_template(draft)?);
        self.directory.update_template(template.clone())?;
        debug!(template_id = %template.id(), steps = template.steps().len(), "template step added");
        Ok(template)
    }

    /// Instantiates `template_id` for `user_id`, storing the new request.
    pub fn create_request(
        &self,
        template_id: &WorkflowTemplateId,
        user_id: &UserId,
        document: DocumentDraft,
    ) -> Result<Request, RequestServiceError> {
        let template = self.template(template_id)?;
        let user = self.user(user_id)?;
        let document = document.into_document()?;

        let request = template.instantiate(&user, document, &self.config.step_comment)?;
        let request = self.requests.insert(request)?;
        info!(
            request_id = %request.id(),
            template_id = %template.id(),
            steps = request.workflow().steps().len(),
            "interview request created"
        );
        Ok(request)
    }

    pub fn approve(
        &self,
        request_id: &RequestId,
        actor_id: &UserId,
    ) -> Result<Request, RequestServiceError> {
        let actor = self.user(actor_id)?;
        let mut request = self.get(request_id)?;
        request.approve(Some(&actor))?;
        self.requests.update(request.clone())?;
        info!(request_id = %request.id(), actor_id = %actor.id(), "request step approved");
        Ok(request)
    }

    pub fn reject(
        &self,
        request_id: &RequestId,
        actor_id: &UserId,
    ) -> Result<Request, RequestServiceError> {
        let actor = self.user(actor_id)?;
        let mut request = self.get(request_id)?;
        request.reject(Some(&actor))?;
        self.requests.update(request.clone())?;
        info!(request_id = %request.id(), actor_id = %actor.id(), "request step rejected");
        Ok(request)
    }

    /// Resets every step to pending with the request's own user as the acting user.
    pub fn restart(&self, request_id: &RequestId) -> Result<Request, RequestServiceError> {
        let mut request = self.get(request_id)?;
        let owner = request.user().clone();
        request.restart(&owner)?;
        self.requests.update(request.clone())?;
        info!(request_id = %request.id(), "request workflow restarted");
        Ok(request)
    }

    pub fn add_step(
        &self,
        request_id: &RequestId,
        draft: StepDraft,
    ) -> Result<Request, RequestServiceError> {
        let mut request = self.get(request_id)?;
        let user = draft.user_id.as_ref().map(|id| self.user(id)).transpose()?;

        request.workflow_mut().add_step(
            &draft.name,
            draft.status,
            user.as_ref(),
            draft.role_id,
            &draft.comment,
        )?;
        self.requests.update(request.clone())?;
        debug!(request_id = %request.id(), step = %draft.name, "workflow step added");
        Ok(request)
    }

    pub fn get(&self, request_id: &RequestId) -> Result<Request, RequestServiceError> {
        let request = self
            .requests
            .fetch(request_id)?
            .ok_or_else(|| RepositoryError::not_found("request", request_id))?;
        Ok(request)
    }

    pub fn events(&self, request_id: &RequestId) -> Result<Vec<RequestEvent>, RequestServiceError> {
        Ok(self.get(request_id)?.events().to_vec())
    }

    pub fn steps(&self, request_id: &RequestId) -> Result<Vec<WorkflowStep>, RequestServiceError> {
        Ok(self.get(request_id)?.workflow().steps().to_vec())
    }

    pub fn list(&self, limit: usize) -> Result<Vec<Request>, RequestServiceError> {
        Ok(self.requests.list(limit)?)
    }

    fn step_template(
        &self,
        draft: StepTemplateDraft,
    ) -> Result<WorkflowStepTemplate, RequestServiceError> {
        let role = self.role(&draft.role_id)?;
        if let Some(user_id) = draft.user_id.as_ref() {
            self.user(user_id)?;
        }
        Ok(WorkflowStepTemplate::new(&draft.name, draft.user_id, role.id())?)
    }

    fn role(&self, id: &RoleId) -> Result<Role, RequestServiceError> {
        let role = self
            .directory
            .fetch_role(id)?
            .ok_or_else(|| RepositoryError::not_found("role", id))?;
        Ok(role)
    }

    fn user(&self, id: &UserId) -> Result<User, RequestServiceError> {
        let user = self
            .directory
            .fetch_user(id)?
            .ok_or_else(|| RepositoryError::not_found("user", id))?;
        Ok(user)
    }

    fn template(&self, id: &WorkflowTemplateId) -> Result<WorkflowTemplate, RequestServiceError> {
        let template = self
            .directory
            .fetch_template(id)?
            .ok_or_else(|| RepositoryError::not_found("workflow template", id))?;
        Ok(template)
    }
}

/// Error raised by the request service.
#[derive(Debug, thiserror::Error)]
pub enum RequestServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
