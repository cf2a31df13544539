use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::FieldErrorKind;
use crate::forms::schema::{FieldType, FormField};

fn email_shape() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape regex is valid")
    })
}

/// Text rules compiled once per field.
pub(crate) struct TextRules {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Result<Regex, String>>,
}

impl TextRules {
    pub(crate) fn for_field(field: &FormField) -> Option<Self> {
        if !field.field_type.is_text_like() {
            return None;
        }
        let validation = field.validation.as_ref()?;

        Some(Self {
            min_length: validation.min_length,
            max_length: validation.max_length,
            pattern: validation
                .compiled_pattern()
                .map(|compiled| compiled.map_err(|err| err.to_string())),
        })
    }
}

/// An answer counts as absent when it is null, blank text, an empty list, or an unticked box.
pub(crate) fn is_blank(field_type: FieldType, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(checked) => field_type == FieldType::Checkbox && !checked,
        Value::Number(_) | Value::Object(_) => false,
    }
}

pub(crate) fn check_field(
    field: &FormField,
    rules: Option<&TextRules>,
    answer: Option<&Value>,
) -> Option<FieldErrorKind> {
    let Some(value) = answer.filter(|value| !is_blank(field.field_type, value)) else {
        return field.required.then_some(FieldErrorKind::MissingRequired);
    };

    match field.field_type {
        FieldType::Text | FieldType::Textarea => check_text(rules, value),
        FieldType::Email => check_email(value),
        FieldType::Number => check_number(value),
        FieldType::Select | FieldType::Radio => check_choice(field, value),
        FieldType::Checkbox => check_checkbox(field, value),
        FieldType::Tel | FieldType::Date | FieldType::File => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn check_text(rules: Option<&TextRules>, value: &Value) -> Option<FieldErrorKind> {
    let Some(text) = scalar_text(value) else {
        return Some(FieldErrorKind::TypeMismatch);
    };
    let rules = rules?;
    let length = text.chars().count();

    if let Some(min) = rules.min_length {
        if length < min {
            return Some(FieldErrorKind::TooShort { min });
        }
    }

    if let Some(max) = rules.max_length {
        if length > max {
            return Some(FieldErrorKind::TooLong { max });
        }
    }

    match &rules.pattern {
        Some(Ok(pattern)) if !pattern.is_match(&text) => Some(FieldErrorKind::PatternMismatch),
        Some(Err(reason)) => Some(FieldErrorKind::InvalidPattern {
            reason: reason.clone(),
        }),
        _ => None,
    }
}

fn check_email(value: &Value) -> Option<FieldErrorKind> {
    match value {
        Value::String(text) if email_shape().is_match(text.trim()) => None,
        Value::String(_) => Some(FieldErrorKind::InvalidEmail),
        _ => Some(FieldErrorKind::TypeMismatch),
    }
}

fn check_number(value: &Value) -> Option<FieldErrorKind> {
    match value {
        Value::Number(_) => None,
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => None,
            _ => Some(FieldErrorKind::NotANumber),
        },
        _ => Some(FieldErrorKind::NotANumber),
    }
}

fn check_choice(field: &FormField, value: &Value) -> Option<FieldErrorKind> {
    let Some(choice) = scalar_text(value) else {
        return Some(FieldErrorKind::TypeMismatch);
    };

    if field.options.iter().any(|option| option == &choice) {
        None
    } else {
        Some(FieldErrorKind::NotAnOption)
    }
}

fn check_checkbox(field: &FormField, value: &Value) -> Option<FieldErrorKind> {
    let allowed = |choice: &str| {
        field.options.is_empty() || field.options.iter().any(|option| option == choice)
    };

    match value {
        Value::Bool(_) => None,
        Value::String(choice) if allowed(choice) => None,
        Value::String(_) => Some(FieldErrorKind::NotAnOption),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(choice) if allowed(choice) => {}
                    Value::String(_) => return Some(FieldErrorKind::NotAnOption),
                    _ => return Some(FieldErrorKind::TypeMismatch),
                }
            }
            None
        }
        _ => Some(FieldErrorKind::TypeMismatch),
    }
}
