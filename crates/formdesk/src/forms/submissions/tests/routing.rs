use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::FormsConfig;
use crate::forms::submissions::router::{submit_eligibility_handler, SubmitRequest};
use crate::forms::submissions::{
    ReviewService, SubmissionFilter, SubmissionId, SubmissionRepository, SubmissionScope,
};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(ReviewService::new(
        Arc::new(UnavailableSubmissions),
        Arc::new(MemoryForms::default()),
        FormsConfig::default(),
    ));

    let response = submit_eligibility_handler::<UnavailableSubmissions, MemoryForms>(
        State(service),
        axum::Json(SubmitRequest {
            programme_id: None,
            form_data: eligibility_answers("Ada Obi"),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn eligibility_submission_is_created() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/eligibility-applications",
            json!({ "formData": eligibility_answers("Ada Obi") }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["kind"], json!("eligibility"));
    assert_eq!(payload["applicantName"], json!("Ada Obi"));
    assert_eq!(payload["seen"], json!(false));
    assert_eq!(
        repository
            .list(&SubmissionFilter::default())
            .expect("list")
            .len(),
        1
    );
}

#[tokio::test]
async fn invalid_submission_lists_field_errors() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({ "programmeId": PROGRAMME, "formData": { "Full Name": "" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let errors = payload["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["fieldId"], json!("field-name"));
    assert_eq!(errors[0]["kind"], json!("missing_required"));
    assert_eq!(errors[0]["message"], json!("Full Name is required"));
}

#[tokio::test]
async fn application_without_programme_is_rejected() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({ "formData": { "Full Name": "Ada Obi" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_supports_search_and_unseen_filters() {
    let (service, repository) = build_service();
    for submission in [
        stored("1", programme_scope(), "Alice Smith", 1, true),
        stored("2", programme_scope(), "Alan Smithee", 2, false),
        stored("3", programme_scope(), "Bob Jones", 3, false),
        stored("4", SubmissionScope::Eligibility, "Alice Eligible", 4, false),
    ] {
        repository.insert(submission).expect("insert");
    }
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/applications?search=smith"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ids: Vec<&str> = payload
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["2", "1"]);

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/v1/applications?unseen=true&programmeId=programme-data",
        ))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    let ids: Vec<&str> = payload
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["3", "2"]);
}

#[tokio::test]
async fn mark_seen_and_delete_round_trip() {
    let (service, repository) = build_service();
    repository
        .insert(stored("e-1", SubmissionScope::Eligibility, "Ada", 1, false))
        .expect("insert");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request(
            "PATCH",
            "/api/v1/eligibility-applications/e-1/seen",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["seen"], json!(true));

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", "/api/v1/eligibility-applications/e-1"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(repository
        .fetch(&SubmissionId::from("e-1"))
        .expect("fetch")
        .is_none());

    let response = router
        .oneshot(empty_request("GET", "/api/v1/eligibility-applications/e-1"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn eligibility_ids_are_not_reachable_as_applications() {
    let (service, repository) = build_service();
    repository
        .insert(stored("e-1", SubmissionScope::Eligibility, "Ada", 1, false))
        .expect("insert");
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/applications/e-1"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
