use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{DirectoryRepository, RepositoryError, RequestRepository, RequestView};
use super::service::{
    DocumentDraft, InterviewRequestService, RequestServiceError, StepDraft, StepTemplateDraft,
};
use crate::domain::{RequestId, RoleId, UserId, WorkflowTemplateId};

const LIST_LIMIT: usize = 100;

type SharedService<R, D> = Arc<InterviewRequestService<R, D>>;

#[derive(Debug, Deserialize)]
pub struct RolePayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub role_id: RoleId,
}

#[derive(Debug, Deserialize)]
pub struct TemplatePayload {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<StepTemplateDraft>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequestPayload {
    pub user_id: UserId,
    pub document: DocumentDraft,
}

#[derive(Debug, Deserialize)]
pub struct DecisionPayload {
    pub actor_id: UserId,
}

/// Router builder exposing the directory, template, and request endpoints.
pub fn request_router<R, D>(service: SharedService<R, D>) -> Router
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/roles", post(create_role_handler::<R, D>))
        .route("/api/v1/users", post(create_user_handler::<R, D>))
        .route("/api/v1/templates", post(create_template_handler::<R, D>))
        .route(
            "/api/v1/templates/:template_id/steps",
            post(add_template_step_handler::<R, D>),
        )
        .route(
            "/api/v1/templates/:template_id/requests",
            post(create_request_handler::<R, D>),
        )
        .route("/api/v1/requests", get(list_handler::<R, D>))
        .route("/api/v1/requests/:request_id", get(status_handler::<R, D>))
        .route(
            "/api/v1/requests/:request_id/approve",
            post(approve_handler::<R, D>),
        )
        .route(
            "/api/v1/requests/:request_id/reject",
            post(reject_handler::<R, D>),
        )
        .route(
            "/api/v1/requests/:request_id/restart",
            post(restart_handler::<R, D>),
        )
        .route(
            "/api/v1/requests/:request_id/steps",
            get(steps_handler::<R, D>).post(add_step_handler::<R, D>),
        )
        .route(
            "/api/v1/requests/:request_id/events",
            get(events_handler::<R, D>),
        )
        .with_state(service)
}

pub(crate) async fn create_role_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Json(payload): Json<RolePayload>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.register_role(&payload.name) {
        Ok(role) => (StatusCode::CREATED, Json(role)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_user_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Json(payload): Json<UserPayload>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.register_user(&payload.name, &payload.email, payload.role_id) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_template_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Json(payload): Json<TemplatePayload>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.create_template(&payload.name, payload.steps) {
        Ok(template) => (StatusCode::CREATED, Json(template)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_template_step_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(template_id): Path<WorkflowTemplateId>,
    Json(draft): Json<StepTemplateDraft>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.add_template_step(&template_id, draft) {
        Ok(template) => (StatusCode::OK, Json(template)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_request_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(template_id): Path<WorkflowTemplateId>,
    Json(payload): Json<CreateRequestPayload>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.create_request(&template_id, &payload.user_id, payload.document) {
        Ok(request) => (StatusCode::CREATED, Json(RequestView::from(&request))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, D>(State(service): State<SharedService<R, D>>) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.list(LIST_LIMIT) {
        Ok(requests) => {
            let views: Vec<RequestView> = requests.iter().map(RequestView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(request_id): Path<RequestId>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    view_response(service.get(&request_id))
}

pub(crate) async fn approve_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(request_id): Path<RequestId>,
    Json(payload): Json<DecisionPayload>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    view_response(service.approve(&request_id, &payload.actor_id))
}

pub(crate) async fn reject_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(request_id): Path<RequestId>,
    Json(payload): Json<DecisionPayload>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    view_response(service.reject(&request_id, &payload.actor_id))
}

pub(crate) async fn restart_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(request_id): Path<RequestId>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    view_response(service.restart(&request_id))
}

pub(crate) async fn add_step_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(request_id): Path<RequestId>,
    Json(draft): Json<StepDraft>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    view_response(service.add_step(&request_id, draft))
}

pub(crate) async fn steps_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(request_id): Path<RequestId>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.steps(&request_id) {
        Ok(steps) => (StatusCode::OK, Json(steps)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn events_handler<R, D>(
    State(service): State<SharedService<R, D>>,
    Path(request_id): Path<RequestId>,
) -> Response
where
    R: RequestRepository + 'static,
    D: DirectoryRepository + 'static,
{
    match service.events(&request_id) {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(error) => error_response(error),
    }
}

fn view_response(result: Result<super::Request, RequestServiceError>) -> Response {
    match result {
        Ok(request) => (StatusCode::OK, Json(RequestView::from(&request))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn error_response(error: RequestServiceError) -> Response {
    let status = match &error {
        RequestServiceError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RequestServiceError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
        RequestServiceError::Repository(RepositoryError::Conflict { .. }) => StatusCode::CONFLICT,
        RequestServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
