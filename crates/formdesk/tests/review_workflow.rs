//! End-to-end scenarios through the public services: a programme is created, its form is
//! authored with builder edits and saved, applicants submit, and staff review the results.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Utc};
    use formdesk::config::FormsConfig;
    use formdesk::forms::authoring::FormAuthoringService;
    use formdesk::forms::programmes::{Programme, ProgrammeId, ProgrammeRepository, ProgrammeService};
    use formdesk::forms::repository::{FormKey, FormRepository, RepositoryError};
    use formdesk::forms::schema::FormSchema;
    use formdesk::forms::submissions::{
        ReviewService, Submission, SubmissionFilter, SubmissionId, SubmissionRepository,
    };

    #[derive(Default)]
    struct Documents {
        eligibility: Option<FormSchema>,
        programmes: HashMap<ProgrammeId, Programme>,
        submissions: HashMap<SubmissionId, Submission>,
    }

    #[derive(Default, Clone)]
    pub struct MemoryStore {
        documents: Arc<Mutex<Documents>>,
    }

    impl MemoryStore {
        fn with<T>(&self, f: impl FnOnce(&mut Documents) -> T) -> T {
            let mut guard = self.documents.lock().expect("store mutex poisoned");
            f(&mut guard)
        }
    }

    impl FormRepository for MemoryStore {
        fn fetch_form(&self, key: &FormKey) -> Result<Option<FormSchema>, RepositoryError> {
            self.with(|docs| match key {
                FormKey::Eligibility => Ok(docs.eligibility.clone()),
                FormKey::Programme { programme_id } => docs
                    .programmes
                    .get(programme_id)
                    .map(|programme| programme.form.clone())
                    .ok_or(RepositoryError::NotFound),
            })
        }

        fn store_form(&self, key: &FormKey, schema: FormSchema) -> Result<(), RepositoryError> {
            self.with(|docs| match key {
                FormKey::Eligibility => {
                    docs.eligibility = Some(schema);
                    Ok(())
                }
                FormKey::Programme { programme_id } => {
                    let programme = docs
                        .programmes
                        .get_mut(programme_id)
                        .ok_or(RepositoryError::NotFound)?;
                    programme.form = Some(schema);
                    Ok(())
                }
            })
        }
    }

    impl ProgrammeRepository for MemoryStore {
        fn insert(&self, programme: Programme) -> Result<Programme, RepositoryError> {
            self.with(|docs| {
                docs.programmes
                    .insert(programme.id.clone(), programme.clone());
                Ok(programme)
            })
        }

        fn fetch(&self, id: &ProgrammeId) -> Result<Option<Programme>, RepositoryError> {
            self.with(|docs| Ok(docs.programmes.get(id).cloned()))
        }

        fn list(&self) -> Result<Vec<Programme>, RepositoryError> {
            self.with(|docs| Ok(docs.programmes.values().cloned().collect()))
        }

        fn update(&self, programme: Programme) -> Result<Programme, RepositoryError> {
            self.with(|docs| {
                let slot = docs
                    .programmes
                    .get_mut(&programme.id)
                    .ok_or(RepositoryError::NotFound)?;
                *slot = programme.clone();
                Ok(programme)
            })
        }

        fn delete(&self, id: &ProgrammeId) -> Result<Programme, RepositoryError> {
            self.with(|docs| docs.programmes.remove(id).ok_or(RepositoryError::NotFound))
        }
    }

    impl SubmissionRepository for MemoryStore {
        fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError> {
            self.with(|docs| {
                docs.submissions
                    .insert(submission.id.clone(), submission.clone());
                Ok(submission)
            })
        }

        fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
            self.with(|docs| Ok(docs.submissions.get(id).cloned()))
        }

        fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, RepositoryError> {
            self.with(|docs| {
                Ok(docs
                    .submissions
                    .values()
                    .filter(|submission| filter.matches(submission))
                    .cloned()
                    .collect())
            })
        }

        fn mark_seen(
            &self,
            id: &SubmissionId,
            at: DateTime<Utc>,
        ) -> Result<Submission, RepositoryError> {
            self.with(|docs| {
                let submission = docs
                    .submissions
                    .get_mut(id)
                    .ok_or(RepositoryError::NotFound)?;
                if !submission.seen {
                    submission.seen = true;
                    submission.updated_at = at;
                }
                Ok(submission.clone())
            })
        }

        fn delete(&self, id: &SubmissionId) -> Result<Submission, RepositoryError> {
            self.with(|docs| docs.submissions.remove(id).ok_or(RepositoryError::NotFound))
        }
    }

    pub struct Backoffice {
        pub forms: FormAuthoringService<MemoryStore>,
        pub programmes: ProgrammeService<MemoryStore>,
        pub review: ReviewService<MemoryStore, MemoryStore>,
    }

    pub fn backoffice() -> Backoffice {
        let store = Arc::new(MemoryStore::default());
        let config = FormsConfig::default();
        Backoffice {
            forms: FormAuthoringService::new(store.clone(), config.clone()),
            programmes: ProgrammeService::new(store.clone()),
            review: ReviewService::new(store.clone(), store, config),
        }
    }
}

use common::backoffice;
use formdesk::forms::builder::{self, FieldPatch};
use formdesk::forms::programmes::ProgrammeDraft;
use formdesk::forms::repository::FormKey;
use formdesk::forms::schema::{FieldType, FormSchema};
use formdesk::forms::submissions::{
    ReviewServiceError, ScopeFilter, SubmissionFilter, SubmissionScope,
};
use serde_json::{json, Map, Value};

fn form_data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn authored_form() -> FormSchema {
    let schema = FormSchema::new();
    let section = schema.sections[0].id.clone();

    let schema = builder::add_field(&schema, &section, FieldType::Text);
    let name = schema.sections[0].fields[0].id.clone();
    let schema = builder::update_field(
        &schema,
        &section,
        &name,
        FieldPatch {
            label: Some("Full Name".to_string()),
            required: Some(true),
            ..FieldPatch::default()
        },
    );

    let schema = builder::add_field(&schema, &section, FieldType::Radio);
    let track = schema.sections[0].fields[1].id.clone();
    let schema = builder::update_field(
        &schema,
        &section,
        &track,
        FieldPatch {
            label: Some("Track".to_string()),
            required: Some(true),
            ..FieldPatch::default()
        },
    );
    let schema = builder::add_option(&schema, &section, &track, "Data");
    builder::add_option(&schema, &section, &track, "Design")
}

#[test]
fn programme_applications_are_validated_and_reviewed() {
    let office = backoffice();
    let programme = office
        .programmes
        .create(ProgrammeDraft::titled("Fellowship"))
        .expect("programme created");
    let key = FormKey::programme(programme.id.clone());

    office
        .forms
        .save(&key, authored_form())
        .expect("authored form passes its check");

    let scope = SubmissionScope::Programme {
        programme_id: programme.id.clone(),
    };
    let rejected = office.review.submit(
        scope.clone(),
        form_data(json!({ "Full Name": "Ada Obi", "Track": "Music" })),
    );
    match rejected {
        Err(ReviewServiceError::Validation(report)) => {
            assert_eq!(report.errors.len(), 1);
            assert_eq!(report.errors[0].message, "Track must be one of: Data, Design");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    let accepted = office
        .review
        .submit(
            scope,
            form_data(json!({ "Full Name": "Ada Obi", "Track": "Data" })),
        )
        .expect("valid application");
    assert!(!accepted.seen);

    let filter = SubmissionFilter::scoped(ScopeFilter::Programme(programme.id.clone()));
    let unseen = office.review.list(&filter.clone().unseen()).expect("list");
    assert_eq!(unseen.len(), 1);

    office
        .review
        .mark_seen(&ScopeFilter::AllProgrammes, &accepted.id)
        .expect("mark seen");
    assert!(office.review.list(&filter.clone().unseen()).expect("list").is_empty());

    let found = office.review.search(&filter, "obi").expect("search");
    assert_eq!(found.len(), 1);
    assert!(found[0].seen);

    office
        .review
        .delete(&ScopeFilter::AllProgrammes, &accepted.id)
        .expect("delete");
    assert!(office.review.list(&filter).expect("list").is_empty());
}

#[test]
fn stored_answers_survive_later_form_edits() {
    let office = backoffice();
    let submission = office
        .review
        .submit(
            SubmissionScope::Eligibility,
            form_data(json!({
                "Full Name": "Kemi Adeyemi",
                "Email Address": "kemi@example.com",
                "Phone Number": "0800",
                "Highest Qualification": "Master's Degree",
                "Institution Name": "OAU",
                "Year of Graduation": 2020
            })),
        )
        .expect("seeded eligibility form accepts answers");

    let current = office.forms.load(&FormKey::Eligibility).expect("load");
    let trimmed = builder::remove_section(&current, &current.sections[1].id);
    office
        .forms
        .save(&FormKey::Eligibility, trimmed)
        .expect("save");

    let stored = office
        .review
        .get(&ScopeFilter::Eligibility, &submission.id)
        .expect("still stored");
    assert_eq!(stored.form_data, submission.form_data);
    assert_eq!(stored.applicant_name, "Kemi Adeyemi");
}

#[test]
fn deleting_a_programme_closes_its_intake() {
    let office = backoffice();
    let programme = office
        .programmes
        .create(ProgrammeDraft::titled("Short course"))
        .expect("created");
    office.programmes.delete(&programme.id).expect("deleted");

    let result = office.review.submit(
        SubmissionScope::Programme {
            programme_id: programme.id,
        },
        form_data(json!({ "Full Name": "Late Applicant" })),
    );
    assert!(matches!(result, Err(ReviewServiceError::Repository(_))));
}
