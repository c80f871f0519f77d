//! AgriConnect domain - identity-proof submissions and their review
//!
//! Applicants submit a form with an identity proof (and optionally an
//! additional proof); an administrator later approves or rejects it.

pub mod actions;
pub mod models;

pub use models::{NotificationStatus, Submission, VerificationStatus};
