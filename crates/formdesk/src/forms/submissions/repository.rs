use chrono::{DateTime, Utc};

use super::domain::{Submission, SubmissionFilter, SubmissionId};
use crate::forms::repository::RepositoryError;

/// Storage abstraction for submitted answers so the review service can be exercised in isolation.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError>;
    /// Matching submissions in no particular order.
    fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, RepositoryError>;
    /// Set `seen` in a single write. `updated_at` moves only when the flag actually flips,
    /// so repeating the call leaves the record unchanged.
    fn mark_seen(&self, id: &SubmissionId, at: DateTime<Utc>)
        -> Result<Submission, RepositoryError>;
    fn delete(&self, id: &SubmissionId) -> Result<Submission, RepositoryError>;
}
