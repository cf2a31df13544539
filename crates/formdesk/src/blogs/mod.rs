//! Blog posts: a title, a cover image, and block content shared with programme pages.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Blog, BlogDraft, BlogId};
pub use repository::BlogRepository;
pub use router::blog_router;
pub use service::{BlogService, BlogServiceError};
