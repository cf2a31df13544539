use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::domain::{BlogDraft, BlogId};
use super::repository::BlogRepository;
use super::service::{BlogService, BlogServiceError};
use crate::forms::http::{error_response, repository_response};

pub fn blog_router<B>(service: Arc<BlogService<B>>) -> Router
where
    B: BlogRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/blogs",
            get(list_handler::<B>).post(create_handler::<B>),
        )
        .route(
            "/api/v1/blogs/:blog_id",
            get(get_handler::<B>)
                .put(update_handler::<B>)
                .delete(delete_handler::<B>),
        )
        .with_state(service)
}

impl IntoResponse for BlogServiceError {
    fn into_response(self) -> Response {
        match &self {
            BlogServiceError::MissingTitle
            | BlogServiceError::MissingContent
            | BlogServiceError::MissingCoverImage => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, &self)
            }
            BlogServiceError::Repository(error) => repository_response(error),
        }
    }
}

async fn list_handler<B>(State(service): State<Arc<BlogService<B>>>) -> Response
where
    B: BlogRepository + 'static,
{
    match service.list() {
        Ok(blogs) => (StatusCode::OK, axum::Json(blogs)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn create_handler<B>(
    State(service): State<Arc<BlogService<B>>>,
    axum::Json(draft): axum::Json<BlogDraft>,
) -> Response
where
    B: BlogRepository + 'static,
{
    match service.create(draft) {
        Ok(blog) => (StatusCode::CREATED, axum::Json(blog)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn get_handler<B>(
    State(service): State<Arc<BlogService<B>>>,
    Path(blog_id): Path<String>,
) -> Response
where
    B: BlogRepository + 'static,
{
    match service.get(&BlogId(blog_id)) {
        Ok(blog) => (StatusCode::OK, axum::Json(blog)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn update_handler<B>(
    State(service): State<Arc<BlogService<B>>>,
    Path(blog_id): Path<String>,
    axum::Json(draft): axum::Json<BlogDraft>,
) -> Response
where
    B: BlogRepository + 'static,
{
    match service.update(&BlogId(blog_id), draft) {
        Ok(blog) => (StatusCode::OK, axum::Json(blog)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn delete_handler<B>(
    State(service): State<Arc<BlogService<B>>>,
    Path(blog_id): Path<String>,
) -> Response
where
    B: BlogRepository + 'static,
{
    match service.delete(&BlogId(blog_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}
