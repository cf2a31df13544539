use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{FormAuthoringService, FormServiceError};
use crate::forms::builder::{BuilderError, FormEdit};
use crate::forms::http::{error_response, repository_response};
use crate::forms::programmes::ProgrammeId;
use crate::forms::repository::{FormKey, FormRepository};
use crate::forms::schema::FormSchema;

/// One builder edit, applied to `schema` when given or to the stored form otherwise.
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub schema: Option<FormSchema>,
    pub edit: FormEdit,
}

pub fn form_router<F>(service: Arc<FormAuthoringService<F>>) -> Router
where
    F: FormRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/eligibility-form",
            get(eligibility_load_handler::<F>).put(eligibility_save_handler::<F>),
        )
        .route(
            "/api/v1/eligibility-form/edits",
            post(eligibility_edit_handler::<F>),
        )
        .route(
            "/api/v1/programmes/:programme_id/form",
            get(programme_load_handler::<F>).put(programme_save_handler::<F>),
        )
        .route(
            "/api/v1/programmes/:programme_id/form/edits",
            post(programme_edit_handler::<F>),
        )
        .with_state(service)
}

impl IntoResponse for FormServiceError {
    fn into_response(self) -> Response {
        match &self {
            FormServiceError::NotFound(_) => error_response(StatusCode::NOT_FOUND, &self),
            FormServiceError::Schema(error) => {
                let payload = json!({
                    "error": error.to_string(),
                    "issues": error.issues,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
            }
            FormServiceError::Builder(BuilderError::InvalidOperation(_)) => {
                error_response(StatusCode::CONFLICT, &self)
            }
            FormServiceError::Builder(_) => error_response(StatusCode::NOT_FOUND, &self),
            FormServiceError::Repository(error) => repository_response(error),
        }
    }
}

fn schema_response(result: Result<FormSchema, FormServiceError>) -> Response {
    match result {
        Ok(schema) => (StatusCode::OK, axum::Json(schema)).into_response(),
        Err(error) => error.into_response(),
    }
}

fn programme_key(programme_id: String) -> FormKey {
    FormKey::programme(ProgrammeId(programme_id))
}

pub(crate) async fn eligibility_load_handler<F>(
    State(service): State<Arc<FormAuthoringService<F>>>,
) -> Response
where
    F: FormRepository + 'static,
{
    schema_response(service.load(&FormKey::Eligibility))
}

pub(crate) async fn eligibility_save_handler<F>(
    State(service): State<Arc<FormAuthoringService<F>>>,
    axum::Json(schema): axum::Json<FormSchema>,
) -> Response
where
    F: FormRepository + 'static,
{
    schema_response(service.save(&FormKey::Eligibility, schema))
}

pub(crate) async fn eligibility_edit_handler<F>(
    State(service): State<Arc<FormAuthoringService<F>>>,
    axum::Json(request): axum::Json<EditRequest>,
) -> Response
where
    F: FormRepository + 'static,
{
    schema_response(service.edit(&FormKey::Eligibility, request.schema, &request.edit))
}

pub(crate) async fn programme_load_handler<F>(
    State(service): State<Arc<FormAuthoringService<F>>>,
    Path(programme_id): Path<String>,
) -> Response
where
    F: FormRepository + 'static,
{
    schema_response(service.load(&programme_key(programme_id)))
}

pub(crate) async fn programme_save_handler<F>(
    State(service): State<Arc<FormAuthoringService<F>>>,
    Path(programme_id): Path<String>,
    axum::Json(schema): axum::Json<FormSchema>,
) -> Response
where
    F: FormRepository + 'static,
{
    schema_response(service.save(&programme_key(programme_id), schema))
}

pub(crate) async fn programme_edit_handler<F>(
    State(service): State<Arc<FormAuthoringService<F>>>,
    Path(programme_id): Path<String>,
    axum::Json(request): axum::Json<EditRequest>,
) -> Response
where
    F: FormRepository + 'static,
{
    schema_response(service.edit(
        &programme_key(programme_id),
        request.schema,
        &request.edit,
    ))
}
