//! Loading, editing, and saving the eligibility form and per-programme forms.

pub mod router;
pub mod service;

pub use router::form_router;
pub use service::{FormAuthoringService, FormServiceError};
pub(crate) use service::resolve_form;
