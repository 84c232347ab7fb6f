use chrono::Utc;
use serde::Serialize;

use super::event::{RequestEvent, RequestEventKind};
use crate::domain::{Document, DomainError, RequestId, User};
use crate::workflows::{StepStatus, Workflow};

/// Aggregate root tying a candidate document and its requester to an approval workflow.
///
/// The request owns its workflow, document, and event log. The log is append-only:
/// nothing here removes or rewrites an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    id: RequestId,
    user: User,
    document: Document,
    workflow: Workflow,
    events: Vec<RequestEvent>,
}

impl Request {
    /// Rehydrates a request without touching the event log.
    pub fn new(
        id: RequestId,
        user: User,
        document: Document,
        workflow: Workflow,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: id.require()?,
            user,
            document,
            workflow,
            events: Vec::new(),
        })
    }

    /// Starts a new request and records its creation event.
    pub fn create(user: User, document: Document, workflow: Workflow) -> Result<Self, DomainError> {
        let mut request = Self::new(RequestId::generate(), user, document, workflow)?;
        request.record(RequestEventKind::Created)?;
        Ok(request)
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut Workflow {
        &mut self.workflow
    }

    pub fn events(&self) -> &[RequestEvent] {
        &self.events
    }

    pub fn set_user(&mut self, user: User) {
        self.user = user;
    }

    pub fn set_document(&mut self, document: Document) {
        self.document = document;
    }

    pub fn set_workflow(&mut self, workflow: Workflow) {
        self.workflow = workflow;
    }

    /// Approves the first pending step on behalf of `actor`.
    ///
    /// Whether `actor` is the step's assignee is not checked.
    pub fn approve(&mut self, actor: Option<&User>) -> Result<(), DomainError> {
        self.decide(actor, StepStatus::Approve, RequestEventKind::Approved)
    }

    /// Rejects the first pending step on behalf of `actor`.
    pub fn reject(&mut self, actor: Option<&User>) -> Result<(), DomainError> {
        self.decide(actor, StepStatus::Reject, RequestEventKind::Rejected)
    }

    /// Puts every step back to pending, stamping `actor` as owner of each one.
    ///
    /// Existing steps are kept and the event log is untouched. The service passes
    /// [`Request::user`], handing every step back to the requester.
    pub fn restart(&mut self, actor: &User) -> Result<(), DomainError> {
        for step in self.workflow.steps_mut() {
            step.set_status(Some(actor), StepStatus::Pending)?;
        }
        Ok(())
    }

    fn decide(
        &mut self,
        actor: Option<&User>,
        status: StepStatus,
        kind: RequestEventKind,
    ) -> Result<(), DomainError> {
        let step = self
            .workflow
            .first_pending_mut()
            .ok_or(DomainError::NoPendingStep)?;
        step.set_status(actor, status)?;

        self.record(kind)
    }

    fn record(&mut self, kind: RequestEventKind) -> Result<(), DomainError> {
        let event = RequestEvent::record(kind, self.id, Utc::now())?;
        self.events.push(event);
        Ok(())
    }
}
