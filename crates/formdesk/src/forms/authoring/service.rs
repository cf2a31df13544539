use std::sync::Arc;

use tracing::info;

use crate::forms::builder::{self, BuilderError, FormEdit};
use crate::forms::repository::{FormKey, FormRepository, RepositoryError};
use crate::forms::schema::{FormSchema, SchemaError};
use crate::config::FormsConfig;

/// Resolve the schema that governs `key`, substituting the built-in eligibility form when
/// seeding is enabled and nothing has been saved.
pub(crate) fn resolve_form<F: FormRepository + ?Sized>(
    forms: &F,
    key: &FormKey,
    config: &FormsConfig,
) -> Result<Option<FormSchema>, RepositoryError> {
    let stored = forms.fetch_form(key)?;
    Ok(match (stored, key) {
        (Some(schema), _) => Some(schema),
        (None, FormKey::Eligibility) if config.seed_default_eligibility => {
            Some(FormSchema::default_eligibility())
        }
        (None, _) => None,
    })
}

/// Loads, edits, and saves form schemas on behalf of the builder UI.
pub struct FormAuthoringService<F> {
    forms: Arc<F>,
    config: FormsConfig,
}

impl<F> FormAuthoringService<F>
where
    F: FormRepository + 'static,
{
    pub fn new(forms: Arc<F>, config: FormsConfig) -> Self {
        Self { forms, config }
    }

    /// Current schema for `key`. A programme without a form starts from a fresh schema.
    pub fn load(&self, key: &FormKey) -> Result<FormSchema, FormServiceError> {
        match resolve_form(self.forms.as_ref(), key, &self.config)? {
            Some(schema) => Ok(schema),
            None => match key {
                FormKey::Eligibility => Err(FormServiceError::NotFound(key.clone())),
                FormKey::Programme { .. } => Ok(FormSchema::new()),
            },
        }
    }

    /// Persist `schema` after its structural check; replaces whatever was stored.
    pub fn save(&self, key: &FormKey, schema: FormSchema) -> Result<FormSchema, FormServiceError> {
        schema.check()?;
        self.forms.store_form(key, schema.clone())?;
        info!(
            form = %key,
            sections = schema.sections.len(),
            fields = schema.field_count(),
            "form schema saved"
        );
        Ok(schema)
    }

    /// Apply one edit to `base`, or to the stored schema when no base is given.
    /// The result is returned, not persisted; the caller saves when ready.
    pub fn edit(
        &self,
        key: &FormKey,
        base: Option<FormSchema>,
        edit: &FormEdit,
    ) -> Result<FormSchema, FormServiceError> {
        let base = match base {
            Some(schema) => schema,
            None => self.load(key)?,
        };
        Ok(builder::apply(&base, edit)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormServiceError {
    #[error("no form stored for {0}")]
    NotFound(FormKey),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Builder(#[from] BuilderError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::builder::BuilderError;
    use crate::forms::programmes::ProgrammeId;
    use crate::forms::schema::{FieldType, SchemaIssue, SectionId};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryForms {
        programmes: Vec<ProgrammeId>,
        forms: Mutex<HashMap<FormKey, FormSchema>>,
    }

    impl FormRepository for MemoryForms {
        fn fetch_form(&self, key: &FormKey) -> Result<Option<FormSchema>, RepositoryError> {
            if let FormKey::Programme { programme_id } = key {
                if !self.programmes.contains(programme_id) {
                    return Err(RepositoryError::NotFound);
                }
            }
            Ok(self.forms.lock().expect("forms mutex poisoned").get(key).cloned())
        }

        fn store_form(&self, key: &FormKey, schema: FormSchema) -> Result<(), RepositoryError> {
            self.forms
                .lock()
                .expect("forms mutex poisoned")
                .insert(key.clone(), schema);
            Ok(())
        }
    }

    fn service(seed: bool) -> FormAuthoringService<MemoryForms> {
        let forms = MemoryForms {
            programmes: vec![ProgrammeId::from("p-1")],
            ..MemoryForms::default()
        };
        FormAuthoringService::new(
            Arc::new(forms),
            FormsConfig {
                seed_default_eligibility: seed,
                ..FormsConfig::default()
            },
        )
    }

    #[test]
    fn eligibility_falls_back_to_the_built_in_form() {
        let loaded = service(true).load(&FormKey::Eligibility).expect("seeded");
        assert_eq!(loaded, FormSchema::default_eligibility());
    }

    #[test]
    fn unseeded_eligibility_is_not_found() {
        assert!(matches!(
            service(false).load(&FormKey::Eligibility),
            Err(FormServiceError::NotFound(FormKey::Eligibility))
        ));
    }

    #[test]
    fn programme_without_form_starts_fresh() {
        let loaded = service(true)
            .load(&FormKey::programme(ProgrammeId::from("p-1")))
            .expect("fresh schema");
        assert_eq!(loaded.sections.len(), 1);
        assert_eq!(loaded.field_count(), 0);
    }

    #[test]
    fn unknown_programme_is_a_repository_not_found() {
        assert!(matches!(
            service(true).load(&FormKey::programme(ProgrammeId::from("p-9"))),
            Err(FormServiceError::Repository(RepositoryError::NotFound))
        ));
    }

    #[test]
    fn save_rejects_structural_issues_and_keeps_the_old_form() {
        let service = service(true);
        let mut broken = FormSchema::default_eligibility();
        broken.sections[1].fields[0].options.clear();

        match service.save(&FormKey::Eligibility, broken) {
            Err(FormServiceError::Schema(error)) => {
                assert!(matches!(error.issues[0], SchemaIssue::MissingOptions { .. }));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
        let loaded = service.load(&FormKey::Eligibility).expect("load");
        assert_eq!(loaded, FormSchema::default_eligibility());
    }

    #[test]
    fn last_save_wins() {
        let service = service(true);
        let mut first = FormSchema::default_eligibility();
        first.settings.submit_button_text = "First".to_string();
        let mut second = first.clone();
        second.settings.submit_button_text = "Second".to_string();

        service.save(&FormKey::Eligibility, first).expect("save");
        service.save(&FormKey::Eligibility, second).expect("save");
        let loaded = service.load(&FormKey::Eligibility).expect("load");
        assert_eq!(loaded.settings.submit_button_text, "Second");
    }

    #[test]
    fn edits_apply_without_persisting() {
        let service = service(true);
        let edit = FormEdit::AddField {
            section_id: SectionId::from("personal-info"),
            field_type: FieldType::Date,
        };

        let edited = service
            .edit(&FormKey::Eligibility, None, &edit)
            .expect("edit applies");
        assert_eq!(edited.sections[0].fields.len(), 4);

        let stored = service.load(&FormKey::Eligibility).expect("load");
        assert_eq!(stored.sections[0].fields.len(), 3);
    }

    #[test]
    fn edits_report_missing_targets() {
        let edit = FormEdit::RemoveSection {
            section_id: SectionId::from("nope"),
        };
        assert!(matches!(
            service(true).edit(&FormKey::Eligibility, Some(FormSchema::new()), &edit),
            Err(FormServiceError::Builder(BuilderError::SectionNotFound(_)))
        ));
    }
}
