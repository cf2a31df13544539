use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::forms::applicant::HasFormData;
use crate::forms::programmes::ProgrammeId;
use crate::forms::repository::FormKey;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl From<&str> for SubmissionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The collection a submission belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SubmissionScope {
    Eligibility,
    Programme { programme_id: ProgrammeId },
}

impl SubmissionScope {
    /// The form whose current schema governs intake for this scope.
    pub fn form_key(&self) -> FormKey {
        match self {
            SubmissionScope::Eligibility => FormKey::Eligibility,
            SubmissionScope::Programme { programme_id } => {
                FormKey::programme(programme_id.clone())
            }
        }
    }
}

impl std::fmt::Display for SubmissionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionScope::Eligibility => f.write_str("eligibility"),
            SubmissionScope::Programme { programme_id } => write!(f, "programme:{programme_id}"),
        }
    }
}

/// A stored set of answers. `form_data` stays keyed by field label, as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    #[serde(flatten)]
    pub scope: SubmissionScope,
    pub applicant_name: String,
    pub form_data: Map<String, Value>,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasFormData for Submission {
    fn form_data(&self) -> &Map<String, Value> {
        &self.form_data
    }
}

/// Which collection(s) a listing covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScopeFilter {
    #[default]
    All,
    Eligibility,
    AllProgrammes,
    Programme(ProgrammeId),
}

impl ScopeFilter {
    pub fn matches(&self, scope: &SubmissionScope) -> bool {
        match (self, scope) {
            (ScopeFilter::All, _) => true,
            (ScopeFilter::Eligibility, SubmissionScope::Eligibility) => true,
            (ScopeFilter::AllProgrammes, SubmissionScope::Programme { .. }) => true,
            (ScopeFilter::Programme(wanted), SubmissionScope::Programme { programme_id }) => {
                wanted == programme_id
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub scope: ScopeFilter,
    pub unseen_only: bool,
}

impl SubmissionFilter {
    pub fn scoped(scope: ScopeFilter) -> Self {
        Self {
            scope,
            unseen_only: false,
        }
    }

    pub fn unseen(mut self) -> Self {
        self.unseen_only = true;
        self
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        self.scope.matches(&submission.scope) && (!self.unseen_only || !submission.seen)
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub blogs: usize,
    pub programmes: usize,
    pub applications: usize,
    pub unseen_applications: usize,
    pub eligibility_submissions: usize,
    pub unseen_eligibility_submissions: usize,
}
