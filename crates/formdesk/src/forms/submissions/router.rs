use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::domain::{ScopeFilter, Submission, SubmissionFilter, SubmissionId, SubmissionScope};
use super::repository::SubmissionRepository;
use super::service::{ReviewService, ReviewServiceError};
use crate::forms::http::{error_response, repository_response};
use crate::forms::programmes::ProgrammeId;
use crate::forms::repository::FormRepository;

/// Query string accepted by the list endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub unseen: bool,
    #[serde(default)]
    pub programme_id: Option<String>,
}

/// Body of an intake request. `programmeId` is required on the programme collection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub programme_id: Option<ProgrammeId>,
    pub form_data: Map<String, Value>,
}

/// Router builder exposing intake and review endpoints for both collections.
pub fn submission_router<S, F>(service: Arc<ReviewService<S, F>>) -> Router
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/eligibility-applications",
            get(list_eligibility_handler::<S, F>).post(submit_eligibility_handler::<S, F>),
        )
        .route(
            "/api/v1/eligibility-applications/:submission_id",
            get(get_eligibility_handler::<S, F>).delete(delete_eligibility_handler::<S, F>),
        )
        .route(
            "/api/v1/eligibility-applications/:submission_id/seen",
            patch(seen_eligibility_handler::<S, F>),
        )
        .route(
            "/api/v1/applications",
            get(list_applications_handler::<S, F>).post(submit_application_handler::<S, F>),
        )
        .route(
            "/api/v1/applications/:submission_id",
            get(get_application_handler::<S, F>).delete(delete_application_handler::<S, F>),
        )
        .route(
            "/api/v1/applications/:submission_id/seen",
            patch(seen_application_handler::<S, F>),
        )
        .with_state(service)
}

impl IntoResponse for ReviewServiceError {
    fn into_response(self) -> Response {
        match self {
            ReviewServiceError::Validation(report) => {
                let payload = json!({
                    "error": "submission failed validation",
                    "errors": report.errors,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
            }
            ReviewServiceError::Repository(error) => repository_response(&error),
        }
    }
}

fn list_response<S, F>(
    service: &ReviewService<S, F>,
    scope: ScopeFilter,
    query: &ListQuery,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    let mut filter = SubmissionFilter::scoped(scope);
    filter.unseen_only = query.unseen;

    let result = match query.search.as_deref() {
        Some(term) => service.search(&filter, term),
        None => service.list(&filter),
    };
    match result {
        Ok(submissions) => (StatusCode::OK, axum::Json(submissions)).into_response(),
        Err(error) => error.into_response(),
    }
}

fn submit_response<S, F>(
    service: &ReviewService<S, F>,
    scope: SubmissionScope,
    form_data: Map<String, Value>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    match service.submit(scope, form_data) {
        Ok(submission) => (StatusCode::CREATED, axum::Json(submission)).into_response(),
        Err(error) => error.into_response(),
    }
}

fn record_response(result: Result<Submission, ReviewServiceError>) -> Response {
    match result {
        Ok(submission) => (StatusCode::OK, axum::Json(submission)).into_response(),
        Err(error) => error.into_response(),
    }
}

fn delete_response(result: Result<Submission, ReviewServiceError>) -> Response {
    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn list_eligibility_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    list_response(&service, ScopeFilter::Eligibility, &query)
}

pub(crate) async fn submit_eligibility_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    submit_response(&service, SubmissionScope::Eligibility, request.form_data)
}

pub(crate) async fn get_eligibility_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    record_response(service.get(&ScopeFilter::Eligibility, &SubmissionId(submission_id)))
}

pub(crate) async fn seen_eligibility_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    record_response(service.mark_seen(&ScopeFilter::Eligibility, &SubmissionId(submission_id)))
}

pub(crate) async fn delete_eligibility_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    delete_response(service.delete(&ScopeFilter::Eligibility, &SubmissionId(submission_id)))
}

pub(crate) async fn list_applications_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    let scope = match &query.programme_id {
        Some(programme_id) => ScopeFilter::Programme(ProgrammeId(programme_id.clone())),
        None => ScopeFilter::AllProgrammes,
    };
    list_response(&service, scope, &query)
}

pub(crate) async fn submit_application_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    let Some(programme_id) = request.programme_id else {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, "programmeId is required");
    };
    submit_response(
        &service,
        SubmissionScope::Programme { programme_id },
        request.form_data,
    )
}

pub(crate) async fn get_application_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    record_response(service.get(&ScopeFilter::AllProgrammes, &SubmissionId(submission_id)))
}

pub(crate) async fn seen_application_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    record_response(service.mark_seen(&ScopeFilter::AllProgrammes, &SubmissionId(submission_id)))
}

pub(crate) async fn delete_application_handler<S, F>(
    State(service): State<Arc<ReviewService<S, F>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    delete_response(service.delete(&ScopeFilter::AllProgrammes, &SubmissionId(submission_id)))
}
