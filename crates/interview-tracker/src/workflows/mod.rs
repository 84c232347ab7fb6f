//! Approval chains: templates, generated workflows, and the per-step state machine.

mod step;
pub mod template;
mod workflow;

pub use step::{StepStatus, WorkflowStep};
pub use template::{WorkflowStepTemplate, WorkflowTemplate, DEFAULT_STEP_COMMENT};
pub use workflow::Workflow;
