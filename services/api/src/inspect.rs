use clap::Args;
use formdesk::error::AppError;
use formdesk::forms::schema::FormSchema;
use formdesk::forms::validation::{Answers, FormValidator, ValidationReport};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Path to the schema document
    pub(crate) schema: PathBuf,
    /// Path to a JSON object of answers
    pub(crate) answers: PathBuf,
    /// Treat answer keys as field labels, as stored submissions are
    #[arg(long)]
    pub(crate) by_label: bool,
}

fn read_schema(path: &Path) -> Result<FormSchema, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn run_form_check(path: &Path) -> Result<(), AppError> {
    let schema = read_schema(path)?;
    let issues = schema.issues();
    println!(
        "{}: {} section(s), {} field(s)",
        path.display(),
        schema.sections.len(),
        schema.field_count()
    );

    if issues.is_empty() {
        println!("No structural issues found");
        return Ok(());
    }
    for issue in &issues {
        println!("- {issue}");
    }
    schema.check()?;
    Ok(())
}

pub(crate) fn run_form_validate(args: ValidateArgs) -> Result<(), AppError> {
    let schema = read_schema(&args.schema)?;
    let raw = fs::read_to_string(&args.answers)?;
    let form_data: Map<String, Value> = serde_json::from_str(&raw)?;

    let report = validate_answers(&schema, &form_data, args.by_label);
    if report.is_accepted() {
        println!("Answers accepted");
        return Ok(());
    }

    println!("Answers rejected with {} error(s)", report.errors.len());
    for error in &report.errors {
        println!("- [{}/{}] {}", error.section_id, error.field_id, error.message);
    }
    Err(AppError::Rejected(report))
}

pub(crate) fn validate_answers(
    schema: &FormSchema,
    form_data: &Map<String, Value>,
    by_label: bool,
) -> ValidationReport {
    let answers = if by_label {
        Answers::from_form_data(schema, form_data)
    } else {
        Answers::by_field_id(schema, form_data)
    };
    FormValidator::new(schema).validate(&answers)
}

pub(crate) fn run_form_default() -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(&FormSchema::default_eligibility())?;
    println!("{rendered}");
    Ok(())
}
