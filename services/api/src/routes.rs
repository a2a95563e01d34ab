use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use gensanworks::workflows::applications::{
    allowed_transitions, application_router, map_to_referral_status, ApplicationLifecycleService,
    ApplicationRepository, ApplicationStatus, ReferralStatus,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// One row of the published transition table.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TransitionTableEntry {
    pub(crate) status: ApplicationStatus,
    pub(crate) terminal: bool,
    pub(crate) referral_status: ReferralStatus,
    pub(crate) allowed: &'static [ApplicationStatus],
}

pub(crate) fn transition_table() -> Vec<TransitionTableEntry> {
    ApplicationStatus::ALL
        .into_iter()
        .map(|status| TransitionTableEntry {
            status,
            terminal: status.is_terminal(),
            referral_status: map_to_referral_status(status),
            allowed: allowed_transitions(status),
        })
        .collect()
}

pub(crate) fn with_application_routes<R>(
    service: Arc<ApplicationLifecycleService<R>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
{
    application_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/application-statuses",
            axum::routing::get(transition_table_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn transition_table_endpoint() -> Json<Vec<TransitionTableEntry>> {
    Json(transition_table())
}
