use super::domain::{Blog, BlogId};
use crate::forms::repository::RepositoryError;

pub trait BlogRepository: Send + Sync {
    fn insert(&self, blog: Blog) -> Result<Blog, RepositoryError>;
    fn fetch(&self, id: &BlogId) -> Result<Option<Blog>, RepositoryError>;
    fn list(&self) -> Result<Vec<Blog>, RepositoryError>;
    /// Replace an existing post; `NotFound` when the id is unknown.
    fn update(&self, blog: Blog) -> Result<Blog, RepositoryError>;
    fn delete(&self, id: &BlogId) -> Result<Blog, RepositoryError>;
}
