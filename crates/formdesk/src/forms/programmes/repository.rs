use super::domain::{Programme, ProgrammeId};
use crate::forms::repository::RepositoryError;

/// Storage abstraction for programme documents, including their embedded forms.
pub trait ProgrammeRepository: Send + Sync {
    fn insert(&self, programme: Programme) -> Result<Programme, RepositoryError>;
    fn fetch(&self, id: &ProgrammeId) -> Result<Option<Programme>, RepositoryError>;
    fn list(&self) -> Result<Vec<Programme>, RepositoryError>;
    /// Replace an existing programme; `NotFound` when the id is unknown.
    fn update(&self, programme: Programme) -> Result<Programme, RepositoryError>;
    fn delete(&self, id: &ProgrammeId) -> Result<Programme, RepositoryError>;
}
