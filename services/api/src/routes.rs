use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use formdesk::blogs::{blog_router, BlogRepository, BlogService};
use formdesk::config::FormsConfig;
use formdesk::forms::authoring::{form_router, FormAuthoringService};
use formdesk::forms::programmes::{programme_router, ProgrammeRepository, ProgrammeService};
use formdesk::forms::repository::FormRepository;
use formdesk::forms::submissions::{submission_router, ReviewService, SubmissionRepository};
use serde_json::json;
use std::sync::Arc;

/// The services behind the HTTP surface, all sharing one store.
pub(crate) struct Services<S> {
    pub(crate) blogs: Arc<BlogService<S>>,
    pub(crate) forms: Arc<FormAuthoringService<S>>,
    pub(crate) programmes: Arc<ProgrammeService<S>>,
    pub(crate) review: Arc<ReviewService<S, S>>,
}

impl<S> Services<S>
where
    S: BlogRepository
        + FormRepository
        + ProgrammeRepository
        + SubmissionRepository
        + 'static,
{
    pub(crate) fn new(store: Arc<S>, config: FormsConfig) -> Self {
        Self {
            blogs: Arc::new(BlogService::new(store.clone())),
            forms: Arc::new(FormAuthoringService::new(store.clone(), config.clone())),
            programmes: Arc::new(ProgrammeService::new(store.clone())),
            review: Arc::new(ReviewService::new(store.clone(), store, config)),
        }
    }
}

struct StatsSources<S> {
    blogs: Arc<BlogService<S>>,
    programmes: Arc<ProgrammeService<S>>,
    review: Arc<ReviewService<S, S>>,
}

pub(crate) fn with_form_routes<S>(services: Services<S>) -> Router
where
    S: BlogRepository
        + FormRepository
        + ProgrammeRepository
        + SubmissionRepository
        + 'static,
{
    let stats = Router::new()
        .route("/api/v1/stats", get(stats_endpoint::<S>))
        .with_state(Arc::new(StatsSources {
            blogs: services.blogs.clone(),
            programmes: services.programmes.clone(),
            review: services.review.clone(),
        }));

    form_router(services.forms)
        .merge(programme_router(services.programmes))
        .merge(blog_router(services.blogs))
        .merge(submission_router(services.review))
        .merge(stats)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

async fn stats_endpoint<S>(State(sources): State<Arc<StatsSources<S>>>) -> Response
where
    S: BlogRepository
        + FormRepository
        + ProgrammeRepository
        + SubmissionRepository
        + 'static,
{
    let blogs = match sources.blogs.count() {
        Ok(blogs) => blogs,
        Err(error) => return error.into_response(),
    };
    let programmes = match sources.programmes.list() {
        Ok(programmes) => programmes.len(),
        Err(error) => return error.into_response(),
    };
    match sources.review.stats(blogs, programmes) {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => error.into_response(),
    }
}
