use serde::{Deserialize, Serialize};

use super::programmes::ProgrammeId;
use super::schema::FormSchema;

/// Error enumeration shared by the document-store abstractions.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Which stored form a caller means: the global eligibility form or a programme's own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FormKey {
    Eligibility,
    Programme { programme_id: ProgrammeId },
}

impl FormKey {
    pub fn programme(programme_id: ProgrammeId) -> Self {
        Self::Programme { programme_id }
    }
}

impl std::fmt::Display for FormKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormKey::Eligibility => f.write_str("eligibility"),
            FormKey::Programme { programme_id } => write!(f, "programme:{}", programme_id.0),
        }
    }
}

/// Storage for form schemas. Writes replace the whole document (last write wins).
pub trait FormRepository: Send + Sync {
    /// `Ok(None)` when no form is stored; `Err(NotFound)` when a programme key names a
    /// programme that does not exist.
    fn fetch_form(&self, key: &FormKey) -> Result<Option<FormSchema>, RepositoryError>;
    fn store_form(&self, key: &FormKey, schema: FormSchema) -> Result<(), RepositoryError>;
}
