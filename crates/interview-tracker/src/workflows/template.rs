use serde::Serialize;

use super::step::{StepStatus, WorkflowStep};
use super::workflow::Workflow;
use crate::domain::error::{require_text, DomainError};
use crate::domain::{Document, RoleId, User, UserId, WorkflowId, WorkflowTemplateId};
use crate::requests::Request;

/// Comment stamped on every step generated from a template.
pub const DEFAULT_STEP_COMMENT: &str = "Add step";

/// Blueprint for one step of a generated workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStepTemplate {
    name: String,
    user_id: Option<UserId>,
    role_id: RoleId,
}

impl WorkflowStepTemplate {
    pub fn new(name: &str, user_id: Option<UserId>, role_id: RoleId) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_text(name, "name")?,
            user_id: user_id.map(UserId::require).transpose()?,
            role_id: role_id.require()?,
        })
    }

    pub fn for_user(name: &str, user_id: UserId, role_id: RoleId) -> Result<Self, DomainError> {
        Self::new(name, Some(user_id), role_id)
    }

    pub fn for_role(name: &str, role_id: RoleId) -> Result<Self, DomainError> {
        Self::new(name, None, role_id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    /// Generated steps go to the requesting user whenever the template names any user.
    /// The template's own `user_id` is only a marker for "user owned".
    fn instantiate(&self, requester: &User, comment: &str) -> Result<WorkflowStep, DomainError> {
        match self.user_id {
            Some(_) => WorkflowStep::for_user(&self.name, StepStatus::Pending, requester, comment),
            None => WorkflowStep::for_role(&self.name, StepStatus::Pending, self.role_id, comment),
        }
    }
}

/// Reusable approval chain from which requests are created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowTemplate {
    id: WorkflowTemplateId,
    name: String,
    steps: Vec<WorkflowStepTemplate>,
}

impl WorkflowTemplate {
    pub fn new(
        id: WorkflowTemplateId,
        name: &str,
        steps: Vec<WorkflowStepTemplate>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: id.require()?,
            name: require_text(name, "name")?,
            steps,
        })
    }

    pub fn create(name: &str) -> Result<Self, DomainError> {
        Self::new(WorkflowTemplateId::generate(), name, Vec::new())
    }

    pub fn id(&self) -> WorkflowTemplateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[WorkflowStepTemplate] {
        &self.steps
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = require_text(name, "name")?;
        Ok(())
    }

    pub fn add_step(&mut self, step: WorkflowStepTemplate) {
        self.steps.push(step);
    }

    /// Creates a request whose workflow mirrors this template, every step pending.
    pub fn create_request(&self, user: &User, document: Document) -> Result<Request, DomainError> {
        self.instantiate(user, document, DEFAULT_STEP_COMMENT)
    }

    /// Same as [`WorkflowTemplate::create_request`] with an explicit step comment.
    pub fn instantiate(
        &self,
        user: &User,
        document: Document,
        comment: &str,
    ) -> Result<Request, DomainError> {
        let steps = self
            .steps
            .iter()
            .map(|step| step.instantiate(user, comment))
            .collect::<Result<Vec<_>, _>>()?;
        let workflow = Workflow::new(WorkflowId::generate(), &self.name, self.id, steps)?;

        Request::create(user.clone(), document, workflow)
    }
}
