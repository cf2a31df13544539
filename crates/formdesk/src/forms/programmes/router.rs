use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::domain::{ProgrammeDraft, ProgrammeId};
use super::repository::ProgrammeRepository;
use super::service::{ProgrammeService, ProgrammeServiceError};
use crate::forms::http::{error_response, repository_response};

pub fn programme_router<P>(service: Arc<ProgrammeService<P>>) -> Router
where
    P: ProgrammeRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/programmes",
            get(list_handler::<P>).post(create_handler::<P>),
        )
        .route(
            "/api/v1/programmes/:programme_id",
            get(get_handler::<P>)
                .put(update_handler::<P>)
                .delete(delete_handler::<P>),
        )
        .with_state(service)
}

impl IntoResponse for ProgrammeServiceError {
    fn into_response(self) -> Response {
        match &self {
            ProgrammeServiceError::MissingTitle | ProgrammeServiceError::Schema(_) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &self)
            }
            ProgrammeServiceError::Repository(error) => repository_response(error),
        }
    }
}

pub(crate) async fn list_handler<P>(State(service): State<Arc<ProgrammeService<P>>>) -> Response
where
    P: ProgrammeRepository + 'static,
{
    match service.list() {
        Ok(programmes) => (StatusCode::OK, axum::Json(programmes)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn create_handler<P>(
    State(service): State<Arc<ProgrammeService<P>>>,
    axum::Json(draft): axum::Json<ProgrammeDraft>,
) -> Response
where
    P: ProgrammeRepository + 'static,
{
    match service.create(draft) {
        Ok(programme) => (StatusCode::CREATED, axum::Json(programme)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn get_handler<P>(
    State(service): State<Arc<ProgrammeService<P>>>,
    Path(programme_id): Path<String>,
) -> Response
where
    P: ProgrammeRepository + 'static,
{
    match service.get(&ProgrammeId(programme_id)) {
        Ok(programme) => (StatusCode::OK, axum::Json(programme)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn update_handler<P>(
    State(service): State<Arc<ProgrammeService<P>>>,
    Path(programme_id): Path<String>,
    axum::Json(draft): axum::Json<ProgrammeDraft>,
) -> Response
where
    P: ProgrammeRepository + 'static,
{
    match service.update(&ProgrammeId(programme_id), draft) {
        Ok(programme) => (StatusCode::OK, axum::Json(programme)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn delete_handler<P>(
    State(service): State<Arc<ProgrammeService<P>>>,
    Path(programme_id): Path<String>,
) -> Response
where
    P: ProgrammeRepository + 'static,
{
    match service.delete(&ProgrammeId(programme_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}
