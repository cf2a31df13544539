//! Applicant display names derived from free-form answers, and name search.

use serde_json::{Map, Value};

pub const UNKNOWN_APPLICANT: &str = "Unknown Applicant";

const FULL_NAME_KEYS: [&str; 5] = [
    "full name",
    "fullname",
    "name",
    "applicant name",
    "applicantname",
];
const FIRST_NAME_KEYS: [&str; 4] = ["first name", "firstname", "given name", "givenname"];
const MIDDLE_NAME_KEYS: [&str; 4] = ["middle name", "middlename", "middle initial", "middleinitial"];
const LAST_NAME_KEYS: [&str; 5] = ["last name", "lastname", "surname", "family name", "familyname"];

/// Best-effort display name for a submission's `formData`; never fails.
pub fn extract_applicant_name(form_data: &Value) -> String {
    match form_data {
        Value::Object(map) => applicant_name(map),
        _ => UNKNOWN_APPLICANT.to_string(),
    }
}

pub fn applicant_name(form_data: &Map<String, Value>) -> String {
    // Keys collide after lower-casing; the later value wins but keeps the first position.
    let mut lowered = Map::new();
    for (key, value) in form_data {
        lowered.insert(key.to_lowercase(), value.clone());
    }

    if let Some(full_name) = first_text(&lowered, &FULL_NAME_KEYS) {
        return full_name.to_string();
    }

    let parts: Vec<&str> = [
        first_text(&lowered, &FIRST_NAME_KEYS),
        first_text(&lowered, &MIDDLE_NAME_KEYS),
        first_text(&lowered, &LAST_NAME_KEYS),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !parts.is_empty() {
        return parts.join(" ");
    }

    lowered
        .keys()
        .filter(|key| key.contains("name"))
        .find_map(|key| text_value(&lowered, key))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_APPLICANT.to_string())
}

fn text_value<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn first_text<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| text_value(map, key))
}

/// Anything carrying free-form answers that can be searched by applicant name.
pub trait HasFormData {
    fn form_data(&self) -> &Map<String, Value>;
}

/// Keep the items whose applicant name contains `term`, case-insensitively.
///
/// A blank term returns `items` untouched; survivors keep their input order.
pub fn search<T: HasFormData>(items: Vec<T>, term: &str) -> Vec<T> {
    search_with_min_chars(items, term, 1)
}

/// As [`search`], but terms shorter than `min_chars` after trimming do not filter.
pub fn search_with_min_chars<T: HasFormData>(items: Vec<T>, term: &str, min_chars: usize) -> Vec<T> {
    let term = term.trim().to_lowercase();
    if term.is_empty() || term.chars().count() < min_chars {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            applicant_name(item.form_data())
                .to_lowercase()
                .contains(&term)
        })
        .collect()
}
