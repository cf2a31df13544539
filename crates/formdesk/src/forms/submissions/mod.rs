//! Submission intake and the back-office review workflow.
//!
//! Eligibility submissions and programme applications share one shape and one service;
//! they differ only in [`SubmissionScope`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ReviewStats, ScopeFilter, Submission, SubmissionFilter, SubmissionId, SubmissionScope,
};
pub use repository::SubmissionRepository;
pub use router::submission_router;
pub use service::{ReviewService, ReviewServiceError};
