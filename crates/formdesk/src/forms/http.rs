use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::repository::RepositoryError;

pub(crate) fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": message.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) fn repository_response(error: &RepositoryError) -> Response {
    let status = match error {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error)
}
