//! Form schemas, the builder's edit reducers, validation, and the services that store
//! forms and the submissions made against them.
//!
//! Schemas are plain data. Answers arrive keyed by field label, are validated by field id
//! against the form's current schema, and are stored exactly as submitted.

pub mod applicant;
pub mod authoring;
pub mod builder;
pub(crate) mod http;
pub mod programmes;
pub mod repository;
pub mod schema;
pub mod submissions;
pub mod validation;

pub use applicant::{extract_applicant_name, search, HasFormData, UNKNOWN_APPLICANT};
pub use authoring::{form_router, FormAuthoringService, FormServiceError};
pub use builder::{apply, BuilderError, FormEdit};
pub use programmes::{programme_router, Programme, ProgrammeId, ProgrammeService};
pub use repository::{FormKey, FormRepository, RepositoryError};
pub use schema::{
    FieldId, FieldType, FormField, FormSchema, FormSection, FormSettings, SchemaError,
    SchemaIssue, SectionId,
};
pub use submissions::{submission_router, ReviewService, Submission, SubmissionScope};
pub use validation::{validate, Answers, FieldError, ValidationReport};
