//! Interview request aggregate, its event log, and the service/HTTP layers around it.
//!
//! Persistence stays behind [`RequestRepository`] and [`DirectoryRepository`]; concrete
//! adapters are supplied by the hosting binary.

mod event;
pub mod repository;
mod request;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use event::{RequestEvent, RequestEventKind};
pub use repository::{DirectoryRepository, RepositoryError, RequestRepository, RequestView};
pub use request::Request;
pub use router::request_router;
pub use service::{
    DocumentDraft, InterviewRequestService, RequestServiceError, StepDraft, StepTemplateDraft,
};
