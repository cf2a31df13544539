use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::config::FormsConfig;
use crate::forms::programmes::ProgrammeId;
use crate::forms::repository::{FormKey, FormRepository, RepositoryError};
use crate::forms::schema::{FieldType, FormField, FormSchema, FormSection};
use crate::forms::submissions::{
    submission_router, ReviewService, Submission, SubmissionFilter, SubmissionId,
    SubmissionRepository, SubmissionScope,
};

pub(super) const PROGRAMME: &str = "programme-data";

#[derive(Default, Clone)]
pub(super) struct MemorySubmissions {
    pub(super) records: Arc<Mutex<HashMap<SubmissionId, Submission>>>,
}

impl SubmissionRepository for MemorySubmissions {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|submission| filter.matches(submission))
            .cloned()
            .collect())
    }

    fn mark_seen(
        &self,
        id: &SubmissionId,
        at: DateTime<Utc>,
    ) -> Result<Submission, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if !record.seen {
            record.seen = true;
            record.updated_at = at;
        }
        Ok(record.clone())
    }

    fn delete(&self, id: &SubmissionId) -> Result<Submission, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryForms {
    forms: Arc<Mutex<HashMap<FormKey, FormSchema>>>,
    programmes: Arc<Mutex<HashSet<ProgrammeId>>>,
}

impl MemoryForms {
    pub(super) fn with_programme(self, programme_id: &str, form: Option<FormSchema>) -> Self {
        let programme_id = ProgrammeId::from(programme_id);
        self.programmes
            .lock()
            .expect("forms mutex poisoned")
            .insert(programme_id.clone());
        if let Some(form) = form {
            self.forms
                .lock()
                .expect("forms mutex poisoned")
                .insert(FormKey::programme(programme_id), form);
        }
        self
    }
}

impl FormRepository for MemoryForms {
    fn fetch_form(&self, key: &FormKey) -> Result<Option<FormSchema>, RepositoryError> {
        if let FormKey::Programme { programme_id } = key {
            let programmes = self.programmes.lock().expect("forms mutex poisoned");
            if !programmes.contains(programme_id) {
                return Err(RepositoryError::NotFound);
            }
        }
        Ok(self
            .forms
            .lock()
            .expect("forms mutex poisoned")
            .get(key)
            .cloned())
    }

    fn store_form(&self, key: &FormKey, schema: FormSchema) -> Result<(), RepositoryError> {
        self.forms
            .lock()
            .expect("forms mutex poisoned")
            .insert(key.clone(), schema);
        Ok(())
    }
}

pub(super) struct UnavailableSubmissions;

impl SubmissionRepository for UnavailableSubmissions {
    fn insert(&self, _submission: Submission) -> Result<Submission, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &SubmissionFilter) -> Result<Vec<Submission>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_seen(
        &self,
        _id: &SubmissionId,
        _at: DateTime<Utc>,
    ) -> Result<Submission, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &SubmissionId) -> Result<Submission, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// One required "Full Name" text field (min 2) and one optional email field.
pub(super) fn programme_form() -> FormSchema {
    let mut name = FormField::blank(FieldType::Text);
    name.id = "field-name".into();
    name.label = "Full Name".to_string();
    name.required = true;
    name.validation = Some(crate::forms::schema::FieldValidation {
        min_length: Some(2),
        ..Default::default()
    });

    let mut email = FormField::blank(FieldType::Email);
    email.id = "field-email".into();
    email.label = "Email".to_string();

    let mut section = FormSection::empty();
    section.id = "section-main".into();
    section.title = "Applicant".to_string();
    section.fields = vec![name, email];

    FormSchema {
        sections: vec![section],
        ..FormSchema::new()
    }
}

pub(super) fn build_service() -> (
    ReviewService<MemorySubmissions, MemoryForms>,
    Arc<MemorySubmissions>,
) {
    build_service_with(FormsConfig::default())
}

pub(super) fn build_service_with(
    config: FormsConfig,
) -> (
    ReviewService<MemorySubmissions, MemoryForms>,
    Arc<MemorySubmissions>,
) {
    let submissions = Arc::new(MemorySubmissions::default());
    let forms = Arc::new(MemoryForms::default().with_programme(PROGRAMME, Some(programme_form())));
    let service = ReviewService::new(submissions.clone(), forms, config);
    (service, submissions)
}

pub(super) fn form_data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// Answers that satisfy the default eligibility form.
pub(super) fn eligibility_answers(name: &str) -> Map<String, Value> {
    form_data(json!({
        "Full Name": name,
        "Email Address": "applicant@example.com",
        "Phone Number": "+234 800 000 0000",
        "Highest Qualification": "Bachelor's Degree",
        "Institution Name": "University of Lagos",
        "Year of Graduation": 2021
    }))
}

pub(super) fn stored(
    id: &str,
    scope: SubmissionScope,
    name: &str,
    minute: u32,
    seen: bool,
) -> Submission {
    let at = Utc
        .with_ymd_and_hms(2025, 3, 1, 9, minute, 0)
        .single()
        .expect("valid timestamp");
    Submission {
        id: SubmissionId::from(id),
        scope,
        applicant_name: name.to_string(),
        form_data: form_data(json!({ "Full Name": name })),
        seen,
        created_at: at,
        updated_at: at,
    }
}

pub(super) fn programme_scope() -> SubmissionScope {
    SubmissionScope::Programme {
        programme_id: ProgrammeId::from(PROGRAMME),
    }
}

pub(super) fn router_with_service(
    service: ReviewService<MemorySubmissions, MemoryForms>,
) -> axum::Router {
    submission_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
