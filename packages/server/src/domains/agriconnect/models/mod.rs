pub mod submission;

pub use submission::{NewSubmission, NotificationStatus, Submission, VerificationStatus};
