//! Authoring edits applied to a form schema.
//!
//! Each edit takes the current schema by reference and returns a new value; the caller owns
//! the live schema and decides when to persist it. Identifiers already present are never
//! regenerated and sections or fields an edit does not target come back unchanged.

use serde::{Deserialize, Serialize};

use super::schema::{
    FieldId, FieldType, FieldValidation, FormField, FormSchema, FormSection, PredefinedGroup,
    SectionId,
};

/// Partial update for a section's display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a field; `None` leaves the attribute as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub validation: Option<FieldValidation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub submit_button_text: Option<String>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub enable_email_notifications: Option<bool>,
    #[serde(default)]
    pub notification_email: Option<String>,
}

/// One authoring operation, as sent by the builder UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FormEdit {
    AddSection,
    UpdateSection {
        section_id: SectionId,
        patch: SectionPatch,
    },
    RemoveSection {
        section_id: SectionId,
    },
    AddField {
        section_id: SectionId,
        field_type: FieldType,
    },
    AddPredefinedFields {
        section_id: SectionId,
        group: PredefinedGroup,
    },
    UpdateField {
        section_id: SectionId,
        field_id: FieldId,
        patch: FieldPatch,
    },
    RemoveField {
        section_id: SectionId,
        field_id: FieldId,
    },
    AddOption {
        section_id: SectionId,
        field_id: FieldId,
        option: String,
    },
    RemoveOption {
        section_id: SectionId,
        field_id: FieldId,
        option: String,
    },
    ReorderField {
        section_id: SectionId,
        from_index: usize,
        to_index: usize,
    },
    /// Drag-and-drop move; only moves within one section are accepted.
    MoveField {
        from_section: SectionId,
        to_section: SectionId,
        field_id: FieldId,
        to_index: usize,
    },
    UpdateSettings {
        patch: SettingsPatch,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("section '{0}' does not exist")]
    SectionNotFound(SectionId),
    #[error("field '{field_id}' does not exist in section '{section_id}'")]
    FieldNotFound {
        section_id: SectionId,
        field_id: FieldId,
    },
    #[error("invalid form edit: {0}")]
    InvalidOperation(String),
}

/// Apply `edit` to a copy of `schema`, reporting unknown targets and rejected operations.
pub fn apply(schema: &FormSchema, edit: &FormEdit) -> Result<FormSchema, BuilderError> {
    let mut next = schema.clone();

    match edit {
        FormEdit::AddSection => next.sections.push(FormSection::empty()),
        FormEdit::UpdateSection { section_id, patch } => {
            let section = section_mut(&mut next, section_id)?;
            if let Some(title) = &patch.title {
                section.title = title.clone();
            }
            if let Some(description) = &patch.description {
                section.description = Some(description.clone());
            }
        }
        FormEdit::RemoveSection { section_id } => {
            let index = next
                .sections
                .iter()
                .position(|section| &section.id == section_id)
                .ok_or_else(|| BuilderError::SectionNotFound(section_id.clone()))?;
            next.sections.remove(index);
        }
        FormEdit::AddField {
            section_id,
            field_type,
        } => {
            section_mut(&mut next, section_id)?
                .fields
                .push(FormField::blank(*field_type));
        }
        FormEdit::AddPredefinedFields { section_id, group } => {
            section_mut(&mut next, section_id)?
                .fields
                .extend(group.fields());
        }
        FormEdit::UpdateField {
            section_id,
            field_id,
            patch,
        } => patch_field(field_mut(&mut next, section_id, field_id)?, patch),
        FormEdit::RemoveField {
            section_id,
            field_id,
        } => {
            let section = section_mut(&mut next, section_id)?;
            let index = field_index(section, field_id)?;
            section.fields.remove(index);
        }
        FormEdit::AddOption {
            section_id,
            field_id,
            option,
        } => {
            let field = field_mut(&mut next, section_id, field_id)?;
            if !option.trim().is_empty() {
                if !field.field_type.accepts_options() {
                    return Err(BuilderError::InvalidOperation(format!(
                        "{} fields do not take options",
                        field.field_type.label()
                    )));
                }
                field.options.push(option.clone());
            }
        }
        FormEdit::RemoveOption {
            section_id,
            field_id,
            option,
        } => {
            let field = field_mut(&mut next, section_id, field_id)?;
            if let Some(index) = field.options.iter().position(|existing| existing == option) {
                field.options.remove(index);
            }
        }
        FormEdit::ReorderField {
            section_id,
            from_index,
            to_index,
        } => {
            let section = section_mut(&mut next, section_id)?;
            move_within(section, *from_index, *to_index)?;
        }
        FormEdit::MoveField {
            from_section,
            to_section,
            field_id,
            to_index,
        } => {
            if from_section != to_section {
                return Err(BuilderError::InvalidOperation(format!(
                    "cannot move field '{field_id}' from section '{from_section}' to '{to_section}'"
                )));
            }
            let section = section_mut(&mut next, from_section)?;
            let from_index = field_index(section, field_id)?;
            move_within(section, from_index, *to_index)?;
        }
        FormEdit::UpdateSettings { patch } => {
            let settings = &mut next.settings;
            if let Some(text) = &patch.submit_button_text {
                settings.submit_button_text = text.clone();
            }
            if let Some(message) = &patch.success_message {
                settings.success_message = message.clone();
            }
            if let Some(enabled) = patch.enable_email_notifications {
                settings.enable_email_notifications = enabled;
            }
            if let Some(email) = &patch.notification_email {
                settings.notification_email = Some(email.clone());
            }
        }
    }

    Ok(next)
}

fn section_mut<'a>(
    schema: &'a mut FormSchema,
    section_id: &SectionId,
) -> Result<&'a mut FormSection, BuilderError> {
    schema
        .sections
        .iter_mut()
        .find(|section| &section.id == section_id)
        .ok_or_else(|| BuilderError::SectionNotFound(section_id.clone()))
}

fn field_index(section: &FormSection, field_id: &FieldId) -> Result<usize, BuilderError> {
    section
        .fields
        .iter()
        .position(|field| &field.id == field_id)
        .ok_or_else(|| BuilderError::FieldNotFound {
            section_id: section.id.clone(),
            field_id: field_id.clone(),
        })
}

fn field_mut<'a>(
    schema: &'a mut FormSchema,
    section_id: &SectionId,
    field_id: &FieldId,
) -> Result<&'a mut FormField, BuilderError> {
    let section = section_mut(schema, section_id)?;
    let index = field_index(section, field_id)?;
    Ok(&mut section.fields[index])
}

fn patch_field(field: &mut FormField, patch: &FieldPatch) {
    if let Some(field_type) = patch.field_type {
        field.field_type = field_type;
        if !field_type.accepts_options() {
            field.options.clear();
        }
    }
    if let Some(label) = &patch.label {
        field.label = label.clone();
    }
    if let Some(placeholder) = &patch.placeholder {
        field.placeholder = Some(placeholder.clone());
    }
    if let Some(help_text) = &patch.help_text {
        field.help_text = Some(help_text.clone());
    }
    if let Some(options) = &patch.options {
        if field.field_type.accepts_options() {
            field.options = options.clone();
        }
    }
    if let Some(required) = patch.required {
        field.required = required;
    }
    if let Some(validation) = &patch.validation {
        field.validation = Some(validation.clone());
    }
}

fn move_within(
    section: &mut FormSection,
    from_index: usize,
    to_index: usize,
) -> Result<(), BuilderError> {
    let len = section.fields.len();
    if from_index >= len || to_index >= len {
        return Err(BuilderError::InvalidOperation(format!(
            "field position {from_index} -> {to_index} is outside section '{}' ({len} fields)",
            section.id
        )));
    }
    let field = section.fields.remove(from_index);
    section.fields.insert(to_index, field);
    Ok(())
}

/// Like [`apply`], but a rejected edit leaves the schema unchanged.
fn apply_or_keep(schema: &FormSchema, edit: FormEdit) -> FormSchema {
    apply(schema, &edit).unwrap_or_else(|_| schema.clone())
}

pub fn add_section(schema: &FormSchema) -> FormSchema {
    apply_or_keep(schema, FormEdit::AddSection)
}

pub fn update_section(
    schema: &FormSchema,
    section_id: &SectionId,
    patch: SectionPatch,
) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::UpdateSection {
            section_id: section_id.clone(),
            patch,
        },
    )
}

pub fn remove_section(schema: &FormSchema, section_id: &SectionId) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::RemoveSection {
            section_id: section_id.clone(),
        },
    )
}

pub fn add_field(schema: &FormSchema, section_id: &SectionId, field_type: FieldType) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::AddField {
            section_id: section_id.clone(),
            field_type,
        },
    )
}

pub fn update_field(
    schema: &FormSchema,
    section_id: &SectionId,
    field_id: &FieldId,
    patch: FieldPatch,
) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::UpdateField {
            section_id: section_id.clone(),
            field_id: field_id.clone(),
            patch,
        },
    )
}

pub fn remove_field(schema: &FormSchema, section_id: &SectionId, field_id: &FieldId) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::RemoveField {
            section_id: section_id.clone(),
            field_id: field_id.clone(),
        },
    )
}

pub fn add_option(
    schema: &FormSchema,
    section_id: &SectionId,
    field_id: &FieldId,
    option: &str,
) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::AddOption {
            section_id: section_id.clone(),
            field_id: field_id.clone(),
            option: option.to_string(),
        },
    )
}

pub fn remove_option(
    schema: &FormSchema,
    section_id: &SectionId,
    field_id: &FieldId,
    option: &str,
) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::RemoveOption {
            section_id: section_id.clone(),
            field_id: field_id.clone(),
            option: option.to_string(),
        },
    )
}

pub fn reorder_field(
    schema: &FormSchema,
    section_id: &SectionId,
    from_index: usize,
    to_index: usize,
) -> FormSchema {
    apply_or_keep(
        schema,
        FormEdit::ReorderField {
            section_id: section_id.clone(),
            from_index,
            to_index,
        },
    )
}
