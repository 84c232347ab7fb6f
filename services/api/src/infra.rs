use chrono::{DateTime, NaiveDate, Utc};
use interview_tracker::domain::{RequestId, Role, RoleId, User, UserId, WorkflowTemplateId};
use interview_tracker::requests::{
    DirectoryRepository, RepositoryError, Request, RequestRepository,
};
use interview_tracker::workflows::WorkflowTemplate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Request store keeping whole aggregates behind one lock, so writes to a request are
/// serialized.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRequestRepository {
    records: Arc<Mutex<HashMap<RequestId, Request>>>,
}

impl RequestRepository for InMemoryRequestRepository {
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
        if guard.contains_key(&request.id()) {
            guard.insert(request.id(), request);
            Ok(())
        } else {
            Err(RepositoryError::not_found("request", request.id()))
        }
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<Request>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<Request>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut requests: Vec<Request> = guard.values().cloned().collect();
        requests.sort_by_key(|request| request.id());
        requests.truncate(limit);
        Ok(requests)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDirectory {
    roles: Arc<Mutex<HashMap<RoleId, Role>>>,
    users: Arc<Mutex<HashMap<UserId, User>>>,
    templates: Arc<Mutex<HashMap<WorkflowTemplateId, WorkflowTemplate>>>,
}

impl DirectoryRepository for InMemoryDirectory {
    fn insert_role(&self, role: Role) -> Result<Role, RepositoryError> {
        let mut guard = self.roles.lock().expect("directory mutex poisoned");
        if guard.contains_key(&role.id()) {
            return Err(RepositoryError::conflict("role", role.id()));
        }
        guard.insert(role.id(), role.clone());
        Ok(role)
    }

    fn fetch_role(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        let guard = self.roles.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.users.lock().expect("directory mutex poisoned");
        if guard.contains_key(&user.id()) {
            return Err(RepositoryError::conflict("user", user.id()));
        }
        guard.insert(user.id(), user.clone());
        Ok(user)
    }

    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.users.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_template(
        &self,
        template: WorkflowTemplate,
    ) -> Result<WorkflowTemplate, RepositoryError> {
        let mut guard = self.templates.lock().expect("directory mutex poisoned");
        if guard.contains_key(&template.id()) {
            return Err(RepositoryError::conflict("workflow template", template.id()));
        }
        guard.insert(template.id(), template.clone());
        Ok(template)
    }

    fn update_template(&self, template: WorkflowTemplate) -> Result<(), RepositoryError> {
        let mut guard = self.templates.lock().expect("directory mutex poisoned");
        if guard.contains_key(&template.id()) {
            guard.insert(template.id(), template);
            Ok(())
        } else {
            Err(RepositoryError::not_found("workflow template", template.id()))
        }
    }

    fn fetch_template(
        &self,
        id: &WorkflowTemplateId,
    ) -> Result<Option<WorkflowTemplate>, RepositoryError> {
        let guard = self.templates.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Start of `date` in UTC, the instant demo availability dates are compared at.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
