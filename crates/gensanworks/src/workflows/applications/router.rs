use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ApplicationId;
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{ApplicationLifecycleService, ApplicationServiceError, NewApplication};
use super::transitions::TransitionError;

/// Body of `PUT /api/v1/applications/:id/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Router builder exposing HTTP endpoints for the application lifecycle.
pub fn application_router<R>(service: Arc<ApplicationLifecycleService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(create_handler::<R>))
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            put(update_status_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/transitions",
            get(transitions_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ApplicationLifecycleService<R>>>,
    axum::Json(request): axum::Json<NewApplication>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.create(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ApplicationLifecycleService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn transitions_handler<R>(
    State(service): State<Arc<ApplicationLifecycleService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.transition_options(&ApplicationId(application_id)) {
        Ok(options) => (StatusCode::OK, axum::Json(options)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_status_handler<R>(
    State(service): State<Arc<ApplicationLifecycleService<R>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<StatusUpdateRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_status(&id, &request.status, request.notes) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ApplicationServiceError) -> Response {
    let (status, payload) = match &error {
        ApplicationServiceError::BlankField { field } => (
            StatusCode::BAD_REQUEST,
            json!({
                "error": error.to_string(),
                "field": field,
            }),
        ),
        ApplicationServiceError::Transition(TransitionError::InvalidTransition { from, to }) => (
            StatusCode::BAD_REQUEST,
            json!({
                "error": error.to_string(),
                "field": "status",
                "from": from,
                "to": to,
            }),
        ),
        ApplicationServiceError::Transition(TransitionError::UnknownStatus { value }) => (
            StatusCode::BAD_REQUEST,
            json!({
                "error": error.to_string(),
                "field": "status",
                "value": value,
            }),
        ),
        ApplicationServiceError::Repository(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            json!({ "error": "application not found" }),
        ),
        ApplicationServiceError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            json!({ "error": "application already exists" }),
        ),
        ApplicationServiceError::Repository(RepositoryError::StaleStatus { expected, actual }) => (
            StatusCode::CONFLICT,
            json!({
                "error": error.to_string(),
                "expected": expected,
                "actual": actual,
            }),
        ),
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    };

    (status, axum::Json(payload)).into_response()
}
