use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Programme, ProgrammeDraft, ProgrammeId};
use super::repository::ProgrammeRepository;
use crate::forms::repository::RepositoryError;
use crate::forms::schema::SchemaError;

/// CRUD over programmes. Titles are trimmed and must not be blank.
pub struct ProgrammeService<P> {
    repository: Arc<P>,
}

impl<P> ProgrammeService<P>
where
    P: ProgrammeRepository + 'static,
{
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    pub fn create(&self, draft: ProgrammeDraft) -> Result<Programme, ProgrammeServiceError> {
        let title = checked_title(&draft)?;
        if let Some(form) = &draft.form {
            form.check()?;
        }

        let now = Utc::now();
        let programme = Programme {
            id: ProgrammeId::generate(),
            title,
            description: draft.description,
            cover_image: draft.cover_image,
            content: draft.content,
            form: draft.form,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(programme)?;
        info!(programme = %stored.id, title = %stored.title, "programme created");
        Ok(stored)
    }

    pub fn get(&self, id: &ProgrammeId) -> Result<Programme, ProgrammeServiceError> {
        let programme = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(programme)
    }

    /// Newest first.
    pub fn list(&self) -> Result<Vec<Programme>, ProgrammeServiceError> {
        let mut programmes = self.repository.list()?;
        programmes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(programmes)
    }

    /// Replace the author-editable fields. A draft without a form keeps the stored one.
    pub fn update(
        &self,
        id: &ProgrammeId,
        draft: ProgrammeDraft,
    ) -> Result<Programme, ProgrammeServiceError> {
        let title = checked_title(&draft)?;
        let mut programme = self.get(id)?;

        if let Some(form) = draft.form {
            form.check()?;
            programme.form = Some(form);
        }
        programme.title = title;
        programme.description = draft.description;
        programme.cover_image = draft.cover_image;
        programme.content = draft.content;
        programme.updated_at = Utc::now();

        let stored = self.repository.update(programme)?;
        info!(programme = %stored.id, "programme updated");
        Ok(stored)
    }

    /// Submissions that reference the programme are left in place.
    pub fn delete(&self, id: &ProgrammeId) -> Result<Programme, ProgrammeServiceError> {
        let removed = self.repository.delete(id)?;
        info!(programme = %removed.id, "programme deleted");
        Ok(removed)
    }
}

fn checked_title(draft: &ProgrammeDraft) -> Result<String, ProgrammeServiceError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ProgrammeServiceError::MissingTitle);
    }
    Ok(title.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ProgrammeServiceError {
    #[error("programme title must not be blank")]
    MissingTitle,
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
