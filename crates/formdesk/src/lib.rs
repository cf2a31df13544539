//! Dynamic application forms for a back-office: schema authoring, answer validation,
//! and the review workflow for eligibility submissions and programme applications.
//! Blog posts share the programme pages' block content.

pub mod blogs;
pub mod config;
pub mod error;
pub mod forms;
pub mod telemetry;
