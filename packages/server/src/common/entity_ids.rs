//! Typed ID definitions for the persisted entities.
//!
//! ```rust
//! use agriconnect_core::common::{SubmissionId, UserId};
//!
//! let user_id = UserId::from_i64(1);
//! let submission_id = SubmissionId::from_i64(1);
//! assert_eq!(user_id.as_i64(), submission_id.as_i64());
//! ```

pub use super::id::Id;

/// Marker type for registered users.
pub struct User;

/// Marker type for AgriConnect verification submissions.
pub struct Submission;

/// Typed ID for rows in `users`.
pub type UserId = Id<User>;

/// Typed ID for rows in `agriconnect_submissions`.
pub type SubmissionId = Id<Submission>;
