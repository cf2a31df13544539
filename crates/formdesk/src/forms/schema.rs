use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a section, unique within its form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

/// Identifier of a field, unique within its section and stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub String);

impl SectionId {
    pub fn generate() -> Self {
        Self(format!("section-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FieldId {
    pub fn generate() -> Self {
        Self(format!("field-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Input kinds supported by the form renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Select,
    Checkbox,
    Tel,
    Date,
    File,
    Textarea,
    Radio,
}

impl FieldType {
    pub const fn label(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Tel => "tel",
            FieldType::Date => "date",
            FieldType::File => "file",
            FieldType::Textarea => "textarea",
            FieldType::Radio => "radio",
        }
    }

    /// Length and pattern rules only apply to these kinds.
    pub const fn is_text_like(self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }

    pub const fn requires_options(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }

    pub const fn accepts_options(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox
        )
    }
}

/// Optional constraints on text answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_error: Option<String>,
}

impl FieldValidation {
    /// Compile `pattern` anchored at both ends so it must match the whole answer.
    pub fn compiled_pattern(&self) -> Option<Result<Regex, regex::Error>> {
        self.pattern
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| Regex::new(&format!("^(?:{pattern})$")))
    }
}

/// One input definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FormField {
    /// A blank, optional field of the given kind with a fresh identifier.
    pub fn blank(field_type: FieldType) -> Self {
        Self {
            id: FieldId::generate(),
            field_type,
            label: String::new(),
            placeholder: None,
            help_text: None,
            options: Vec::new(),
            required: false,
            validation: None,
        }
    }

    fn preset(
        id: FieldId,
        field_type: FieldType,
        label: &str,
        placeholder: Option<&str>,
    ) -> Self {
        Self {
            id,
            field_type,
            label: label.to_string(),
            placeholder: placeholder.map(str::to_string),
            help_text: None,
            options: Vec::new(),
            required: true,
            validation: None,
        }
    }

    /// Name used in messages; falls back to the id for unlabeled fields.
    pub fn display_name(&self) -> &str {
        let label = self.label.trim();
        if label.is_empty() {
            self.id.as_str()
        } else {
            label
        }
    }
}

/// Ordered group of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    pub id: SectionId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSection {
    pub fn empty() -> Self {
        Self {
            id: SectionId::generate(),
            title: String::new(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn field(&self, field_id: &FieldId) -> Option<&FormField> {
        self.fields.iter().find(|field| &field.id == field_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub submit_button_text: String,
    pub success_message: String,
    #[serde(default)]
    pub enable_email_notifications: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            submit_button_text: "Submit".to_string(),
            success_message: "Thank you for your submission.".to_string(),
            enable_email_notifications: false,
            notification_email: None,
        }
    }
}

/// A complete form: ordered sections plus submission settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    #[serde(default)]
    pub sections: Vec<FormSection>,
    #[serde(default)]
    pub settings: FormSettings,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema {
    /// Fresh schema holding a single empty section.
    pub fn new() -> Self {
        Self {
            sections: vec![FormSection::empty()],
            settings: FormSettings::default(),
        }
    }

    /// The eligibility form offered before staff have saved their own.
    pub fn default_eligibility() -> Self {
        let mut full_name = FormField::preset(
            FieldId::from("full-name"),
            FieldType::Text,
            "Full Name",
            Some("Enter your full name"),
        );
        full_name.validation = Some(FieldValidation {
            min_length: Some(2),
            max_length: Some(100),
            ..FieldValidation::default()
        });

        let mut qualification = FormField::preset(
            FieldId::from("highest-qualification"),
            FieldType::Select,
            "Highest Qualification",
            None,
        );
        qualification.options = [
            "High School",
            "Bachelor's Degree",
            "Master's Degree",
            "PhD",
            "Other",
        ]
        .iter()
        .map(|option| option.to_string())
        .collect();

        Self {
            sections: vec![
                FormSection {
                    id: SectionId::from("personal-info"),
                    title: "Personal Information".to_string(),
                    description: Some("Please provide your basic personal details".to_string()),
                    fields: vec![
                        full_name,
                        FormField::preset(
                            FieldId::from("email"),
                            FieldType::Email,
                            "Email Address",
                            Some("Enter your email address"),
                        ),
                        FormField::preset(
                            FieldId::from("phone"),
                            FieldType::Tel,
                            "Phone Number",
                            Some("Enter your phone number"),
                        ),
                    ],
                },
                FormSection {
                    id: SectionId::from("education"),
                    title: "Educational Background".to_string(),
                    description: Some(
                        "Tell us about your educational qualifications".to_string(),
                    ),
                    fields: vec![
                        qualification,
                        FormField::preset(
                            FieldId::from("institution"),
                            FieldType::Text,
                            "Institution Name",
                            Some("Enter your institution name"),
                        ),
                        FormField::preset(
                            FieldId::from("graduation-year"),
                            FieldType::Number,
                            "Year of Graduation",
                            Some("YYYY"),
                        ),
                    ],
                },
            ],
            settings: FormSettings {
                submit_button_text: "Submit Application".to_string(),
                success_message: "Your eligibility application has been submitted successfully!"
                    .to_string(),
                enable_email_notifications: false,
                notification_email: None,
            },
        }
    }

    pub fn section(&self, section_id: &SectionId) -> Option<&FormSection> {
        self.sections
            .iter()
            .find(|section| &section.id == section_id)
    }

    /// Every field in section-then-field authoring order.
    pub fn fields(&self) -> impl Iterator<Item = (&FormSection, &FormField)> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter().map(move |field| (section, field)))
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|section| section.fields.len()).sum()
    }

    /// List every structural problem, in authoring order.
    pub fn issues(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        let mut section_ids = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(&section.id) {
                issues.push(SchemaIssue::DuplicateSectionId {
                    section_id: section.id.clone(),
                });
            }

            let mut field_ids = HashSet::new();
            for field in &section.fields {
                if !field_ids.insert(&field.id) {
                    issues.push(SchemaIssue::DuplicateFieldId {
                        section_id: section.id.clone(),
                        field_id: field.id.clone(),
                    });
                }

                if field.label.trim().is_empty() {
                    issues.push(SchemaIssue::MissingLabel {
                        field_id: field.id.clone(),
                    });
                }

                if field.field_type.requires_options() && field.options.is_empty() {
                    issues.push(SchemaIssue::MissingOptions {
                        field_id: field.id.clone(),
                    });
                }

                if let Some(validation) = &field.validation {
                    if let (Some(min), Some(max)) = (validation.min_length, validation.max_length)
                    {
                        if min > max {
                            issues.push(SchemaIssue::InvertedLengthBounds {
                                field_id: field.id.clone(),
                                min,
                                max,
                            });
                        }
                    }

                    if let Some(Err(err)) = validation.compiled_pattern() {
                        issues.push(SchemaIssue::InvalidPattern {
                            field_id: field.id.clone(),
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }

        let settings = &self.settings;
        let notification_missing = settings
            .notification_email
            .as_deref()
            .map(|email| email.trim().is_empty())
            .unwrap_or(true);
        if settings.enable_email_notifications && notification_missing {
            issues.push(SchemaIssue::MissingNotificationEmail);
        }

        issues
    }

    /// Structural check run before a schema is persisted.
    pub fn check(&self) -> Result<(), SchemaError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SchemaError { issues })
        }
    }
}

/// A single structural defect in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SchemaIssue {
    DuplicateSectionId {
        section_id: SectionId,
    },
    DuplicateFieldId {
        section_id: SectionId,
        field_id: FieldId,
    },
    MissingLabel {
        field_id: FieldId,
    },
    MissingOptions {
        field_id: FieldId,
    },
    InvertedLengthBounds {
        field_id: FieldId,
        min: usize,
        max: usize,
    },
    InvalidPattern {
        field_id: FieldId,
        reason: String,
    },
    MissingNotificationEmail,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::DuplicateSectionId { section_id } => {
                write!(f, "section id '{section_id}' is repeated")
            }
            SchemaIssue::DuplicateFieldId {
                section_id,
                field_id,
            } => write!(
                f,
                "field id '{field_id}' is repeated in section '{section_id}'"
            ),
            SchemaIssue::MissingLabel { field_id } => write!(f, "field '{field_id}' has no label"),
            SchemaIssue::MissingOptions { field_id } => {
                write!(f, "field '{field_id}' needs at least one option")
            }
            SchemaIssue::InvertedLengthBounds { field_id, min, max } => write!(
                f,
                "field '{field_id}' has minLength {min} greater than maxLength {max}"
            ),
            SchemaIssue::InvalidPattern { field_id, reason } => {
                write!(f, "field '{field_id}' has an invalid pattern: {reason}")
            }
            SchemaIssue::MissingNotificationEmail => write!(
                f,
                "email notifications are enabled without a notification address"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("form schema has {} structural issue(s): {}", .issues.len(), summarize(.issues))]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

fn summarize(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Canned field groups offered by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredefinedGroup {
    PersonalInfo,
    Education,
}

impl PredefinedGroup {
    /// Fields for the group, each with a fresh identifier.
    pub fn fields(self) -> Vec<FormField> {
        let presets: &[(FieldType, &str, &str)] = match self {
            PredefinedGroup::PersonalInfo => &[
                (FieldType::Text, "Full Name", "Enter your full name"),
                (FieldType::Email, "Email Address", "Enter your email address"),
                (FieldType::Tel, "Phone Number", "Enter your phone number"),
            ],
            PredefinedGroup::Education => &[
                (
                    FieldType::Text,
                    "Previous Institution",
                    "Enter your previous institution",
                ),
                (FieldType::Text, "Qualification", "Enter your qualification"),
                (
                    FieldType::Number,
                    "Year of Completion",
                    "Enter year of completion",
                ),
            ],
        };

        presets
            .iter()
            .map(|(field_type, label, placeholder)| {
                FormField::preset(FieldId::generate(), *field_type, label, Some(placeholder))
            })
            .collect()
    }
}
