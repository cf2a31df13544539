use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::domain::{
    ReviewStats, ScopeFilter, Submission, SubmissionFilter, SubmissionId, SubmissionScope,
};
use super::repository::SubmissionRepository;
use crate::config::FormsConfig;
use crate::forms::applicant::{applicant_name, search_with_min_chars};
use crate::forms::authoring::resolve_form;
use crate::forms::repository::{FormRepository, RepositoryError};
use crate::forms::validation::{Answers, FormValidator, ValidationReport};

/// Service composing form lookup, answer validation, and the submission store.
pub struct ReviewService<S, F> {
    submissions: Arc<S>,
    forms: Arc<F>,
    config: FormsConfig,
}

impl<S, F> ReviewService<S, F>
where
    S: SubmissionRepository + 'static,
    F: FormRepository + 'static,
{
    pub fn new(submissions: Arc<S>, forms: Arc<F>, config: FormsConfig) -> Self {
        Self {
            submissions,
            forms,
            config,
        }
    }

    /// Validate label-keyed `form_data` against the scope's current form and store it unseen.
    ///
    /// A scope without a form accepts any answers. A programme scope naming an unknown
    /// programme fails with `NotFound`.
    pub fn submit(
        &self,
        scope: SubmissionScope,
        form_data: Map<String, Value>,
    ) -> Result<Submission, ReviewServiceError> {
        let key = scope.form_key();
        if let Some(schema) = resolve_form(self.forms.as_ref(), &key, &self.config)? {
            let answers = Answers::from_form_data(&schema, &form_data);
            let report = FormValidator::new(&schema).validate(&answers);
            if !report.is_accepted() {
                warn!(
                    form = %key,
                    errors = report.errors.len(),
                    "submission rejected by validation"
                );
                return Err(ReviewServiceError::Validation(report));
            }
        }

        let now = Utc::now();
        let submission = Submission {
            id: SubmissionId::generate(),
            applicant_name: applicant_name(&form_data),
            scope,
            form_data,
            seen: false,
            created_at: now,
            updated_at: now,
        };

        let stored = self.submissions.insert(submission)?;
        info!(submission = %stored.id, scope = %stored.scope, "submission received");
        Ok(stored)
    }

    pub fn get(
        &self,
        scope: &ScopeFilter,
        id: &SubmissionId,
    ) -> Result<Submission, ReviewServiceError> {
        let submission = self
            .submissions
            .fetch(id)?
            .filter(|submission| scope.matches(&submission.scope))
            .ok_or(RepositoryError::NotFound)?;
        Ok(submission)
    }

    /// Matching submissions, newest first. Equal timestamps fall back to id order.
    pub fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, ReviewServiceError> {
        let mut submissions = self.submissions.list(filter)?;
        submissions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(submissions)
    }

    /// [`list`](Self::list) narrowed to applicant names containing `term`.
    pub fn search(
        &self,
        filter: &SubmissionFilter,
        term: &str,
    ) -> Result<Vec<Submission>, ReviewServiceError> {
        let submissions = self.list(filter)?;
        Ok(search_with_min_chars(
            submissions,
            term,
            self.config.search_min_chars,
        ))
    }

    /// Idempotent; marking an already-seen submission returns it unchanged.
    pub fn mark_seen(
        &self,
        scope: &ScopeFilter,
        id: &SubmissionId,
    ) -> Result<Submission, ReviewServiceError> {
        let current = self.get(scope, id)?;
        if current.seen {
            return Ok(current);
        }

        let updated = self.submissions.mark_seen(id, Utc::now())?;
        info!(submission = %updated.id, "submission marked seen");
        Ok(updated)
    }

    pub fn delete(
        &self,
        scope: &ScopeFilter,
        id: &SubmissionId,
    ) -> Result<Submission, ReviewServiceError> {
        self.get(scope, id)?;
        let removed = self.submissions.delete(id)?;
        info!(submission = %removed.id, scope = %removed.scope, "submission deleted");
        Ok(removed)
    }

    /// Submission counters; the `blogs` and `programmes` totals are supplied by the caller.
    pub fn stats(
        &self,
        blogs: usize,
        programmes: usize,
    ) -> Result<ReviewStats, ReviewServiceError> {
        let all = self.submissions.list(&SubmissionFilter::default())?;
        let mut stats = ReviewStats {
            blogs,
            programmes,
            ..ReviewStats::default()
        };

        for submission in &all {
            match submission.scope {
                SubmissionScope::Eligibility => {
                    stats.eligibility_submissions += 1;
                    if !submission.seen {
                        stats.unseen_eligibility_submissions += 1;
                    }
                }
                SubmissionScope::Programme { .. } => {
                    stats.applications += 1;
                    if !submission.seen {
                        stats.unseen_applications += 1;
                    }
                }
            }
        }

        Ok(stats)
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("submission rejected: {0}")]
    Validation(ValidationReport),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
