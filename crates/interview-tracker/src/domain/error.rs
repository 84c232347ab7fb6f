/// Validation failures raised by domain constructors, setters, and state transitions.
///
/// Every variant is reported at the point of violation; entities never hold a value that
/// failed one of these checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{field} cannot be empty")]
    EmptyIdentifier { field: &'static str },
    #[error("{field} cannot be blank")]
    BlankField { field: &'static str },
    #[error("email '{value}' is not valid")]
    InvalidEmail { value: String },
    #[error("{field} cannot be negative (found {value})")]
    NegativeValue { field: &'static str, value: i64 },
    #[error("{field} must not be in the past")]
    PastDate { field: &'static str },
    #[error("an acting user is required to change a step status")]
    MissingActor,
    #[error("no pending step found")]
    NoPendingStep,
    #[error("a step must be assigned to exactly one of a user or a role")]
    InvalidStepAssignment,
}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::BlankField { field });
    }

    Ok(value.to_string())
}
