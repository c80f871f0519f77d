//! AgriConnect domain actions - business logic functions

mod list;
mod review;
mod submit;

pub use list::{list_submissions, public_url, SubmissionView, UPLOADS_URL_PREFIX};
pub use review::{approve, reject};
pub use submit::{
    confirmation_message, submit, SubmissionForm, SubmitOutcome, UploadedFile,
    CONFIRMATION_SUBJECT,
};
