use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::applications::router::{
    status_handler, update_status_handler, StatusUpdateRequest,
};
use crate::workflows::applications::domain::ApplicationId;
use crate::workflows::applications::repository::ApplicationRepository;
use crate::workflows::applications::status::ApplicationStatus;
use crate::workflows::applications::ApplicationLifecycleService;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

#[tokio::test]
async fn create_route_opens_pending_application() {
    let (service, _) = build_service();
    let router = application_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({ "applicant_id": "user-ana", "job_id": "job-7", "referral_id": "R-77" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["application_id"], json!("app_ref_R-77"));
    assert_eq!(payload["status"], json!("pending"));
    assert_eq!(payload["referral_status"], json!("Pending"));
}

#[tokio::test]
async fn update_route_returns_synced_outcome() {
    let (service, repository) = build_service();
    repository.seed_applicant("user-ben", "Unemployed");
    let record = service
        .create(referred_application("user-ben", "R-88"))
        .expect("application opens");
    let router = application_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/applications/{}/status", record.id.0),
            json!({ "status": "HIRED", "notes": "Welcome aboard" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["application"]["status"], json!("hired"));
    assert_eq!(payload["previous_status"], json!("pending"));
    assert_eq!(payload["referral_status"], json!("Hired"));
    assert_eq!(payload["referral"]["feedback"], json!("Welcome aboard"));
    assert_eq!(
        payload["employment_update"],
        json!({ "action": "set", "value": "Employed" })
    );
    assert_eq!(payload["applicant_employment_status"], json!("Employed"));
}

#[tokio::test]
async fn invalid_transition_is_a_bad_request_naming_the_pair() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let record = service
        .create(new_application("user-cy"))
        .expect("application opens");
    service
        .update_status(&record.id, "hired", None)
        .expect("pending can hire");

    let response = update_status_handler::<MemoryRepository>(
        State(service.clone()),
        Path(record.id.0.clone()),
        axum::Json(StatusUpdateRequest {
            status: "pending".to_string(),
            notes: None,
        }),
    )
    .await;

    assert_bad_request(&response);
    let payload = read_json_body(response).await;
    assert_eq!(payload["from"], json!("hired"));
    assert_eq!(payload["to"], json!("pending"));
    assert_eq!(payload["field"], json!("status"));

    let stored = service.get(&record.id).expect("record present");
    assert_eq!(stored.status.label(), "hired");
}

#[tokio::test]
async fn unknown_status_is_a_bad_request() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let record = service
        .create(new_application("user-dee"))
        .expect("application opens");

    let response = update_status_handler::<MemoryRepository>(
        State(service),
        Path(record.id.0.clone()),
        axum::Json(StatusUpdateRequest {
            status: "accepted".to_string(),
            notes: None,
        }),
    )
    .await;

    assert_bad_request(&response);
    let payload = read_json_body(response).await;
    assert_eq!(payload["value"], json!("accepted"));
}

#[tokio::test]
async fn missing_application_is_not_found() {
    let (service, _) = build_service();

    let response =
        status_handler::<MemoryRepository>(State(Arc::new(service)), Path("nope".to_string()))
            .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stale_commit_is_a_conflict() {
    let inner = MemoryRepository::default();
    let service = Arc::new(ApplicationLifecycleService::new(Arc::new(
        RacingRepository {
            inner,
            concurrent_status: ApplicationStatus::Withdrawn,
        },
    )));
    let record = service
        .create(new_application("user-eve"))
        .expect("application opens");

    let response = update_status_handler::<RacingRepository>(
        State(service),
        Path(record.id.0.clone()),
        axum::Json(StatusUpdateRequest {
            status: "rejected".to_string(),
            notes: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert_eq!(payload["expected"], json!("pending"));
    assert_eq!(payload["actual"], json!("withdrawn"));
}

#[tokio::test]
async fn transitions_route_lists_next_statuses() {
    let (service, _) = build_service();
    let record = service
        .create(new_application("user-fin"))
        .expect("application opens");
    let router = application_router_with_service(service);

    let response = router
        .oneshot(
            Request::get(format!("/api/v1/applications/{}/transitions", record.id.0))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["allowed"],
        json!(["reviewed", "shortlisted", "hired", "rejected", "withdrawn"])
    );
}

#[tokio::test]
async fn outage_is_an_internal_error() {
    let service = Arc::new(ApplicationLifecycleService::new(Arc::new(
        UnavailableRepository,
    )));

    let response = status_handler::<UnavailableRepository>(State(service), Path("app-1".into()))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn blank_referral_id_is_a_bad_request() {
    let (service, repository) = build_service();
    let router = application_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({ "applicant_id": "user-gus", "job_id": "job-7", "referral_id": "" }),
        ))
        .await
        .expect("route executes");

    assert_bad_request(&response);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("referral_id"));
    assert!(repository
        .fetch(&ApplicationId("app_ref_".to_string()))
        .expect("fetch succeeds")
        .is_none());
}
