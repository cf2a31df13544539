use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Blog, BlogDraft, BlogId};
use super::repository::BlogRepository;
use crate::forms::repository::RepositoryError;

/// CRUD over blog posts.
///
/// A post needs a non-blank title, at least one content block and, when created, a cover
/// image. Updates may omit the cover image to keep the stored one.
pub struct BlogService<B> {
    repository: Arc<B>,
}

impl<B> BlogService<B>
where
    B: BlogRepository + 'static,
{
    pub fn new(repository: Arc<B>) -> Self {
        Self { repository }
    }

    pub fn create(&self, draft: BlogDraft) -> Result<Blog, BlogServiceError> {
        let title = checked_title(&draft)?;
        if draft.content.is_empty() {
            return Err(BlogServiceError::MissingContent);
        }
        let cover_image = checked_cover_image(draft.cover_image.as_deref())
            .ok_or(BlogServiceError::MissingCoverImage)?;

        let now = Utc::now();
        let blog = Blog {
            id: BlogId::generate(),
            title,
            content: draft.content,
            cover_image,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(blog)?;
        info!(blog = %stored.id, title = %stored.title, "blog created");
        Ok(stored)
    }

    pub fn get(&self, id: &BlogId) -> Result<Blog, BlogServiceError> {
        let blog = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(blog)
    }

    /// Newest first.
    pub fn list(&self) -> Result<Vec<Blog>, BlogServiceError> {
        let mut blogs = self.repository.list()?;
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(blogs)
    }

    pub fn count(&self) -> Result<usize, BlogServiceError> {
        Ok(self.repository.list()?.len())
    }

    pub fn update(&self, id: &BlogId, draft: BlogDraft) -> Result<Blog, BlogServiceError> {
        let title = checked_title(&draft)?;
        if draft.content.is_empty() {
            return Err(BlogServiceError::MissingContent);
        }
        let mut blog = self.get(id)?;

        if let Some(cover_image) = checked_cover_image(draft.cover_image.as_deref()) {
            blog.cover_image = cover_image;
        }
        blog.title = title;
        blog.content = draft.content;
        blog.updated_at = Utc::now();

        let stored = self.repository.update(blog)?;
        info!(blog = %stored.id, "blog updated");
        Ok(stored)
    }

    pub fn delete(&self, id: &BlogId) -> Result<Blog, BlogServiceError> {
        let removed = self.repository.delete(id)?;
        info!(blog = %removed.id, "blog deleted");
        Ok(removed)
    }
}

fn checked_title(draft: &BlogDraft) -> Result<String, BlogServiceError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(BlogServiceError::MissingTitle);
    }
    Ok(title.to_string())
}

fn checked_cover_image(cover_image: Option<&str>) -> Option<String> {
    cover_image
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[derive(Debug, thiserror::Error)]
pub enum BlogServiceError {
    #[error("blog title must not be blank")]
    MissingTitle,
    #[error("blog content must have at least one block")]
    MissingContent,
    #[error("blog cover image is required")]
    MissingCoverImage,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
