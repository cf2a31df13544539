//! Answer validation against a form schema.
//!
//! Every field is checked in section-then-field authoring order and every failure is
//! collected, so callers can render a complete, stable error list inline.

mod answers;
mod rules;

pub use answers::Answers;

use serde::{Deserialize, Serialize};

use super::schema::{FieldId, FormField, FormSchema, SectionId};
use rules::{check_field, TextRules};

/// Why a single answer was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    MissingRequired,
    TooShort { min: usize },
    TooLong { max: usize },
    PatternMismatch,
    InvalidPattern { reason: String },
    InvalidEmail,
    NotANumber,
    NotAnOption,
    TypeMismatch,
}

impl FieldErrorKind {
    /// Text constraint failures may carry an author-supplied message instead.
    pub const fn honours_custom_error(&self) -> bool {
        matches!(
            self,
            FieldErrorKind::TooShort { .. }
                | FieldErrorKind::TooLong { .. }
                | FieldErrorKind::PatternMismatch
        )
    }

    pub fn summary(&self, field: &FormField) -> String {
        let name = field.display_name();
        match self {
            FieldErrorKind::MissingRequired => format!("{name} is required"),
            FieldErrorKind::TooShort { min } => {
                format!("{name} must be at least {min} characters")
            }
            FieldErrorKind::TooLong { max } => {
                format!("{name} must be at most {max} characters")
            }
            FieldErrorKind::PatternMismatch => format!("{name} is not in the expected format"),
            FieldErrorKind::InvalidPattern { .. } => {
                format!("{name} has a validation pattern that cannot be evaluated")
            }
            FieldErrorKind::InvalidEmail => format!("{name} must be a valid email address"),
            FieldErrorKind::NotANumber => format!("{name} must be a number"),
            FieldErrorKind::NotAnOption => {
                format!("{name} must be one of: {}", field.options.join(", "))
            }
            FieldErrorKind::TypeMismatch => format!("{name} has an unsupported answer type"),
        }
    }
}

/// One rejected answer, ready to render next to its field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_id: FieldId,
    pub section_id: SectionId,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
    pub message: String,
}

/// Ordered list of field errors; empty means the answers were accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Validator bound to one schema, with text patterns compiled up front.
pub struct FormValidator<'a> {
    schema: &'a FormSchema,
    rules: Vec<Option<TextRules>>,
}

impl<'a> FormValidator<'a> {
    pub fn new(schema: &'a FormSchema) -> Self {
        let rules = schema
            .fields()
            .map(|(_, field)| TextRules::for_field(field))
            .collect();
        Self { schema, rules }
    }

    pub fn validate(&self, answers: &Answers) -> ValidationReport {
        let errors = self
            .schema
            .fields()
            .zip(&self.rules)
            .filter_map(|((section, field), rules)| {
                let answer = answers.get(&section.id, &field.id);
                let kind = check_field(field, rules.as_ref(), answer)?;
                let custom = field
                    .validation
                    .as_ref()
                    .and_then(|validation| validation.custom_error.as_deref())
                    .filter(|message| !message.trim().is_empty());
                let message = match custom {
                    Some(message) if kind.honours_custom_error() => message.to_string(),
                    _ => kind.summary(field),
                };

                Some(FieldError {
                    field_id: field.id.clone(),
                    section_id: section.id.clone(),
                    kind,
                    message,
                })
            })
            .collect();

        ValidationReport { errors }
    }
}

/// Validate `answers` against the current `schema`.
pub fn validate(schema: &FormSchema, answers: &Answers) -> ValidationReport {
    FormValidator::new(schema).validate(answers)
}
