//! Programmes: marketing content plus an optional per-programme application form.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{ContentBlock, Feature, Programme, ProgrammeDraft, ProgrammeId};
pub use repository::ProgrammeRepository;
pub use router::programme_router;
pub use service::{ProgrammeService, ProgrammeServiceError};
