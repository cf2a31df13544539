use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::forms::schema::{FieldId, FormSchema, SectionId};

/// Answer set keyed by section and field id, the shape the validator works on.
///
/// Field ids only need to be unique within a section, so the section is part of the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers(BTreeMap<(SectionId, FieldId), Value>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, section_id: &SectionId, field_id: &FieldId) -> Option<&Value> {
        self.0.get(&(section_id.clone(), field_id.clone()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take raw `formData` whose keys are already field ids.
    ///
    /// A key answers every field carrying that id, whichever section it sits in.
    pub fn by_field_id(schema: &FormSchema, form_data: &Map<String, Value>) -> Self {
        let mut answers = Self::new();
        for (section, field) in schema.fields() {
            if let Some(value) = form_data.get(field.id.as_str()) {
                answers
                    .0
                    .insert((section.id.clone(), field.id.clone()), value.clone());
            }
        }
        answers
    }

    /// Map label-keyed `formData` onto fields.
    ///
    /// A key resolves to the field with that exact id first, otherwise to the first field
    /// (in authoring order) whose trimmed label matches case-insensitively. When several
    /// keys land on the same field the later key wins. Keys that match nothing are dropped.
    pub fn from_form_data(schema: &FormSchema, form_data: &Map<String, Value>) -> Self {
        let mut answers = Self::new();

        for (key, value) in form_data {
            if let Some(slot) = resolve_key(schema, key) {
                answers.0.insert(slot, value.clone());
            }
        }

        answers
    }
}

fn resolve_key(schema: &FormSchema, key: &str) -> Option<(SectionId, FieldId)> {
    if let Some((section, field)) = schema.fields().find(|(_, field)| field.id.as_str() == key) {
        return Some((section.id.clone(), field.id.clone()));
    }

    let wanted = key.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    schema
        .fields()
        .find(|(_, field)| field.label.trim().to_lowercase() == wanted)
        .map(|(section, field)| (section.id.clone(), field.id.clone()))
}
