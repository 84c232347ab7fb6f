use serde::{Deserialize, Serialize};

use crate::domain::error::{require_text, DomainError};
use crate::domain::{RoleId, User, UserId, WorkflowStepId};

/// Status of a single approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Approve,
    Reject,
}

impl StepStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One approval stage of a workflow, owned by a user or by a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    id: WorkflowStepId,
    name: String,
    order: u32,
    status: StepStatus,
    user_id: Option<UserId>,
    role_id: Option<RoleId>,
    comment: String,
}

impl WorkflowStep {
    /// Builds a step owned by exactly one of `user` or `role_id`.
    ///
    /// A nil `role_id` counts as absent. Both owners or neither fails with
    /// [`DomainError::InvalidStepAssignment`].
    pub fn new(
        id: WorkflowStepId,
        name: &str,
        status: StepStatus,
        user: Option<&User>,
        role_id: Option<RoleId>,
        comment: &str,
    ) -> Result<Self, DomainError> {
        let role_id = role_id.filter(|id| !id.is_nil());
        if user.is_some() == role_id.is_some() {
            return Err(DomainError::InvalidStepAssignment);
        }

        Ok(Self {
            id: id.require()?,
            name: require_text(name, "name")?,
            order: 1,
            status,
            user_id: user.map(User::id),
            role_id,
            comment: require_text(comment, "comment")?,
        })
    }

    /// Builds a step assigned to `user`.
    pub fn for_user(
        name: &str,
        status: StepStatus,
        user: &User,
        comment: &str,
    ) -> Result<Self, DomainError> {
        Self::new(WorkflowStepId::generate(), name, status, Some(user), None, comment)
    }

    /// Builds a step assigned to every holder of `role_id`.
    pub fn for_role(
        name: &str,
        status: StepStatus,
        role_id: RoleId,
        comment: &str,
    ) -> Result<Self, DomainError> {
        let role_id = role_id.require()?;
        Self::new(WorkflowStepId::generate(), name, status, None, Some(role_id), comment)
    }

    pub fn id(&self) -> WorkflowStepId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based position of the step inside its workflow.
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = require_text(name, "name")?;
        Ok(())
    }

    pub fn set_comment(&mut self, comment: &str) -> Result<(), DomainError> {
        self.comment = require_text(comment, "comment")?;
        Ok(())
    }

    /// Records `actor` as the owner of the step and moves it to `status`.
    ///
    /// Both `user_id` and `role_id` are overwritten from the actor. Whether the step was
    /// already decided is not checked here.
    pub fn set_status(&mut self, actor: Option<&User>, status: StepStatus) -> Result<(), DomainError> {
        let actor = actor.ok_or(DomainError::MissingActor)?;

        self.user_id = Some(actor.id());
        self.role_id = Some(actor.role_id());
        self.status = status;
        Ok(())
    }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Email;

    fn user() -> User {
        User::create(
            "Morgan",
            Email::parse("morgan@example.com").expect("valid email"),
            RoleId::generate(),
        )
        .expect("valid user")
    }

    #[test]
    fn user_owned_step_leaves_role_unset() {
        let owner = user();
        let step = WorkflowStep::for_user("Screening", StepStatus::Pending, &owner, "Add step")
            .expect("valid step");

        assert_eq!(step.user_id(), Some(owner.id()));
        assert_eq!(step.role_id(), None);
        assert_eq!(step.status(), StepStatus::Pending);
        assert_eq!(step.order(), 1);
    }

    #[test]
    fn role_owned_step_rejects_nil_role() {
        assert_eq!(
            WorkflowStep::for_role("Panel", StepStatus::Pending, RoleId::nil(), "Add step"),
            Err(DomainError::EmptyIdentifier { field: "role_id" })
        );

        let role_id = RoleId::generate();
        let step = WorkflowStep::for_role("Panel", StepStatus::Pending, role_id, "Add step")
            .expect("valid step");
        assert_eq!(step.role_id(), Some(role_id));
        assert_eq!(step.user_id(), None);
    }

    #[test]
    fn blank_name_and_comment_are_rejected() {
        let owner = user();
        assert_eq!(
            WorkflowStep::for_user(" ", StepStatus::Pending, &owner, "Add step"),
            Err(DomainError::BlankField { field: "name" })
        );
        assert_eq!(
            WorkflowStep::for_user("Screening", StepStatus::Pending, &owner, ""),
            Err(DomainError::BlankField { field: "comment" })
        );
        assert_eq!(
            WorkflowStep::new(
                WorkflowStepId::nil(),
                "Screening",
                StepStatus::Pending,
                Some(&owner),
                None,
                "Add step"
            ),
            Err(DomainError::EmptyIdentifier { field: "step_id" })
        );
    }

    #[test]
    fn new_requires_exactly_one_owner() {
        let owner = user();
        let role_id = RoleId::generate();

        assert_eq!(
            WorkflowStep::new(
                WorkflowStepId::generate(),
                "Screening",
                StepStatus::Pending,
                Some(&owner),
                Some(role_id),
                "Add step"
            ),
            Err(DomainError::InvalidStepAssignment)
        );
        assert_eq!(
            WorkflowStep::new(
                WorkflowStepId::generate(),
                "Screening",
                StepStatus::Pending,
                None,
                None,
                "Add step"
            ),
            Err(DomainError::InvalidStepAssignment)
        );
        assert_eq!(
            WorkflowStep::new(
                WorkflowStepId::generate(),
                "Screening",
                StepStatus::Pending,
                None,
                Some(RoleId::nil()),
                "Add step"
            ),
            Err(DomainError::InvalidStepAssignment)
        );

        let step = WorkflowStep::new(
            WorkflowStepId::generate(),
            "Screening",
            StepStatus::Pending,
            Some(&owner),
            Some(RoleId::nil()),
            "Add step",
        )
        .expect("nil role is ignored");
        assert_eq!(step.user_id(), Some(owner.id()));
        assert_eq!(step.role_id(), None);
    }

    #[test]
    fn set_status_restamps_owner_from_actor() {
        let role_id = RoleId::generate();
        let mut step = WorkflowStep::for_role("Panel", StepStatus::Pending, role_id, "Add step")
            .expect("valid step");
        let actor = user();

        step.set_status(Some(&actor), StepStatus::Approve)
            .expect("actor present");

        assert_eq!(step.status(), StepStatus::Approve);
        assert_eq!(step.user_id(), Some(actor.id()));
        assert_eq!(step.role_id(), Some(actor.role_id()));
    }

    #[test]
    fn set_status_without_actor_fails_and_keeps_state() {
        let owner = user();
        let mut step = WorkflowStep::for_user("Screening", StepStatus::Pending, &owner, "Add step")
            .expect("valid step");

        assert_eq!(
            step.set_status(None, StepStatus::Reject),
            Err(DomainError::MissingActor)
        );
        assert_eq!(step.status(), StepStatus::Pending);
        assert_eq!(step.user_id(), Some(owner.id()));
    }

    #[test]
    fn decided_steps_can_be_overwritten() {
        let owner = user();
        let mut step = WorkflowStep::for_user("Screening", StepStatus::Approve, &owner, "Add step")
            .expect("valid step");

        step.set_status(Some(&owner), StepStatus::Reject)
            .expect("no guard on decided steps");
        assert_eq!(step.status(), StepStatus::Reject);
        assert!(step.status().is_decided());
        assert!(!StepStatus::Pending.is_decided());
    }
}
