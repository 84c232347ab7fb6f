use serde::Serialize;

use super::step::{StepStatus, WorkflowStep};
use super::template::WorkflowTemplate;
use crate::domain::error::{require_text, DomainError};
use crate::domain::{RoleId, User, WorkflowId, WorkflowStepId, WorkflowTemplateId};

/// Ordered approval chain generated from a workflow template.
///
/// Step order is the approval sequence. At most one step is expected to be pending at a
/// time in normal operation, but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workflow {
    id: WorkflowId,
    name: String,
    workflow_template_id: WorkflowTemplateId,
    steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn new(
        id: WorkflowId,
        name: &str,
        workflow_template_id: WorkflowTemplateId,
        steps: Vec<WorkflowStep>,
    ) -> Result<Self, DomainError> {
        let mut workflow = Self {
            id: id.require()?,
            name: require_text(name, "name")?,
            workflow_template_id: workflow_template_id.require()?,
            steps,
        };
        workflow.renumber();
        Ok(workflow)
    }

    /// Empty workflow bound to `template`.
    pub fn create(name: &str, template: &WorkflowTemplate) -> Result<Self, DomainError> {
        Self::new(WorkflowId::generate(), name, template.id(), Vec::new())
    }

    pub fn id(&self) -> WorkflowId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workflow_template_id(&self) -> WorkflowTemplateId {
        self.workflow_template_id
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = require_text(name, "name")?;
        Ok(())
    }

    /// Appends a step owned by exactly one of `user` or `role_id`.
    ///
    /// A nil `role_id` counts as absent. Supplying both owners or neither fails with
    /// [`DomainError::InvalidStepAssignment`] and leaves the workflow unchanged.
    pub fn add_step(
        &mut self,
        name: &str,
        status: StepStatus,
        user: Option<&User>,
        role_id: Option<RoleId>,
        comment: &str,
    ) -> Result<&WorkflowStep, DomainError> {
        let mut step =
            WorkflowStep::new(WorkflowStepId::generate(), name, status, user, role_id, comment)?;

        step.set_order(self.next_order());
        self.steps.push(step);
        Ok(&self.steps[self.steps.len() - 1])
    }

    /// Drops every step. Statuses of the removed steps are not touched.
    pub fn restart(&mut self) {
        self.steps = Vec::new();
    }

    /// True when there are steps, the last one approved, and none pending or rejected.
    pub fn is_approve(&self) -> bool {
        matches!(self.steps.last(), Some(step) if step.status() == StepStatus::Approve)
            && !self
                .steps
                .iter()
                .any(|step| matches!(step.status(), StepStatus::Reject | StepStatus::Pending))
    }

    /// True when some step is rejected and none are approved or pending.
    ///
    /// Not the complement of [`Workflow::is_approve`]: a mix of approved and rejected steps
    /// with nothing pending satisfies neither.
    pub fn is_reject(&self) -> bool {
        self.steps
            .iter()
            .any(|step| step.status() == StepStatus::Reject)
            && !self
                .steps
                .iter()
                .any(|step| matches!(step.status(), StepStatus::Approve | StepStatus::Pending))
    }

    pub fn first_pending(&self) -> Option<&WorkflowStep> {
        self.steps
            .iter()
            .find(|step| step.status() == StepStatus::Pending)
    }

    pub(crate) fn first_pending_mut(&mut self) -> Option<&mut WorkflowStep> {
        self.steps
            .iter_mut()
            .find(|step| step.status() == StepStatus::Pending)
    }

    pub(crate) fn steps_mut(&mut self) -> impl Iterator<Item = &mut WorkflowStep> {
        self.steps.iter_mut()
    }

    fn next_order(&self) -> u32 {
        self.steps.last().map_or(1, |step| step.order() + 1)
    }

    fn renumber(&mut self) {
        for (order, step) in (1u32..).zip(self.steps.iter_mut()) {
            step.set_order(order);
        }
    }
}
