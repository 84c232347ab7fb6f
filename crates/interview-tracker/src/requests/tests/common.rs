use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::config::WorkflowConfig;
use crate::domain::{RequestId, Role, RoleId, User, UserId, WorkflowTemplateId};
use crate::requests::repository::{DirectoryRepository, RepositoryError, RequestRepository};
use crate::requests::service::{DocumentDraft, StepTemplateDraft};
use crate::requests::{request_router, InterviewRequestService, Request};
use crate::workflows::WorkflowTemplate;

pub(super) type MemoryService = InterviewRequestService<MemoryRequests, MemoryDirectory>;

#[derive(Default, Clone)]
pub(super) struct MemoryRequests {
    pub(super) records: Arc<Mutex<HashMap<RequestId, Request>>>,
}

impl RequestRepository for MemoryRequests {
    fn insert(&self, request: Request) -> Result<Request, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&request.id()) {
            return Err(RepositoryError::conflict("request", request.id()));
        }
        guard.insert(request.id(), request.clone());
        Ok(request)
    }

    fn update(&self, request: Request) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(request.id(), request);
        Ok(())
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<Request>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<Request>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    roles: Arc<Mutex<HashMap<RoleId, Role>>>,
    users: Arc<Mutex<HashMap<UserId, User>>>,
    templates: Arc<Mutex<HashMap<WorkflowTemplateId, WorkflowTemplate>>>,
}

impl DirectoryRepository for MemoryDirectory {
    fn insert_role(&self, role: Role) -> Result<Role, RepositoryError> {
        self.roles
            .lock()
            .expect("directory mutex poisoned")
            .insert(role.id(), role.clone());
        Ok(role)
    }

    fn fetch_role(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        Ok(self
            .roles
            .lock()
            .expect("directory mutex poisoned")
            .get(id)
            .cloned())
    }

    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        self.users
            .lock()
            .expect("directory mutex poisoned")
            .insert(user.id(), user.clone());
        Ok(user)
    }

    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .expect("directory mutex poisoned")
            .get(id)
            .cloned())
    }

    fn insert_template(
        &self,
        template: WorkflowTemplate,
    ) -> Result<WorkflowTemplate, RepositoryError> {
        self.templates
            .lock()
            .expect("directory mutex poisoned")
            .insert(template.id(), template.clone());
        Ok(template)
    }

    fn update_template(&self, template: WorkflowTemplate) -> Result<(), RepositoryError> {
        self.templates
            .lock()
            .expect("directory mutex poisoned")
            .insert(template.id(), template);
        Ok(())
    }

    fn fetch_template(
        &self,
        id: &WorkflowTemplateId,
    ) -> Result<Option<WorkflowTemplate>, RepositoryError> {
        Ok(self
            .templates
            .lock()
            .expect("directory mutex poisoned")
            .get(id)
            .cloned())
    }
}

pub(super) struct UnavailableRequests;

impl RequestRepository for UnavailableRequests {
    fn insert(&self, _request: Request) -> Result<Request, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _request: Request) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<Request>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _limit: usize) -> Result<Vec<Request>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (MemoryService, Arc<MemoryRequests>, Arc<MemoryDirectory>) {
    let requests = Arc::new(MemoryRequests::default());
    let directory = Arc::new(MemoryDirectory::default());
    let service =
        InterviewRequestService::new(requests.clone(), directory.clone(), WorkflowConfig::default());
    (service, requests, directory)
}

/// Directory content most scenarios start from.
pub(super) struct Seed {
    pub(super) panel_role: Role,
    pub(super) candidate: User,
    pub(super) approver: User,
    pub(super) template: WorkflowTemplate,
}

/// Registers two roles, a requesting candidate, an approver, and a two-step template: one
/// user-owned screening step followed by a role-owned panel step.
pub(super) fn seed(service: &MemoryService) -> Seed {
    let candidate_role = service
        .register_role("Candidate")
        .expect("candidate role registers");
    let panel_role = service
        .register_role("Interview Panel")
        .expect("panel role registers");
    let candidate = service
        .register_user("Alex Candidate", "alex@example.com", candidate_role.id())
        .expect("candidate registers");
    let approver = service
        .register_user("Pat Recruiter", "pat@example.com", panel_role.id())
        .expect("approver registers");

    let template = service
        .create_template(
            "Backend engineer loop",
            vec![
                StepTemplateDraft {
                    name: "Recruiter screen".to_string(),
                    user_id: Some(approver.id()),
                    role_id: panel_role.id(),
                },
                StepTemplateDraft {
                    name: "Panel interview".to_string(),
                    user_id: None,
                    role_id: panel_role.id(),
                },
            ],
        )
        .expect("template creates");

    Seed {
        panel_role,
        candidate,
        approver,
        template,
    }
}

pub(super) fn document_draft() -> DocumentDraft {
    DocumentDraft {
        name: "Alex Candidate".to_string(),
        email: "alex@example.com".to_string(),
        age: Utc::now() + Duration::days(21),
        experience: 6,
    }
}

pub(super) fn create_request(service: &MemoryService, seed: &Seed) -> Request {
    service
        .create_request(&seed.template.id(), &seed.candidate.id(), document_draft())
        .expect("request creates")
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    request_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
