//! Submit action - AgriConnect verification intake
//!
//! Two phases:
//! 1. Persist: store the proof blobs, insert the row (status `pending`).
//! 2. Notify: best-effort confirmation email, outcome recorded on the row.
//!
//! A failed notification never undoes phase 1 and never fails the request.

use tracing::{error, info, warn};

use crate::common::{AppError, AppResult, SubmissionId};
use crate::domains::agriconnect::models::{NewSubmission, NotificationStatus, Submission};
use crate::kernel::ServerDeps;

/// Subject of the intake confirmation email
pub const CONFIRMATION_SUBJECT: &str = "AgriConnect Registration";

/// A file part received with the form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Intake form as parsed from the request; every field may be missing
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub identity_proof: Option<UploadedFile>,
    pub additional_proof: Option<UploadedFile>,
}

/// Result of a successful intake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub submission_id: SubmissionId,
    /// Whether the confirmation email went out
    pub notified: bool,
}

/// Body of the intake confirmation email
pub fn confirmation_message(name: &str) -> String {
    format!(
        "Hello {name}, your AgriConnect registration has been successfully submitted. \
         Please check your email for further instructions."
    )
}

/// Accept a verification application.
pub async fn submit(form: SubmissionForm, deps: &ServerDeps) -> AppResult<SubmitOutcome> {
    let (name, email, phone, role, identity_proof) = match (
        present(form.name),
        present(form.email),
        present(form.phone),
        present(form.role),
        form.identity_proof,
    ) {
        (Some(name), Some(email), Some(phone), Some(role), Some(identity_proof)) => {
            (name, email, phone, role, identity_proof)
        }
        _ => {
            return Err(AppError::Validation(
                "All fields are required, especially identity proof.".to_string(),
            ))
        }
    };

    // Phase 1: persist
    let mut stored_keys = Vec::with_capacity(2);
    let persisted = persist(
        &name,
        &email,
        &phone,
        &role,
        &identity_proof,
        form.additional_proof.as_ref(),
        &mut stored_keys,
        deps,
    )
    .await;

    let submission_id = match persisted {
        Ok(persisted) => persisted,
        Err(e) => {
            discard_blobs(&stored_keys, deps).await;
            return Err(e);
        }
    };
    info!(submission_id = %submission_id, "submission stored");

    // Phase 2: notify
    let (status, reason) = match deps
        .notifier
        .send(&email, CONFIRMATION_SUBJECT, &confirmation_message(&name))
        .await
    {
        Ok(()) => (NotificationStatus::Sent, None),
        Err(e) => {
            error!(submission_id = %submission_id, error = ?e, "confirmation email failed");
            (NotificationStatus::Failed, Some(format!("{e:#}")))
        }
    };

    if let Err(e) =
        Submission::record_notification(submission_id, status, reason.as_deref(), &deps.db_pool)
            .await
    {
        // The row stays `pending`; the submission itself is already stored
        error!(submission_id = %submission_id, error = ?e, "failed to record notification outcome");
    }

    let notified = status == NotificationStatus::Sent;
    Ok(SubmitOutcome {
        submission_id,
        notified,
    })
}

/// Store the blobs and insert the row on one pooled connection.
///
/// The connection is released before this returns; nothing is held across
/// the notification send.
#[allow(clippy::too_many_arguments)]
async fn persist(
    name: &str,
    email: &str,
    phone: &str,
    role: &str,
    identity_proof: &UploadedFile,
    additional_proof: Option<&UploadedFile>,
    stored_keys: &mut Vec<String>,
    deps: &ServerDeps,
) -> AppResult<SubmissionId> {
    let identity_key = deps
        .blob_store
        .put(&identity_proof.file_name, &identity_proof.bytes)
        .await?;
    stored_keys.push(identity_key.clone());

    let additional_key = match additional_proof {
        Some(file) => {
            let key = deps.blob_store.put(&file.file_name, &file.bytes).await?;
            stored_keys.push(key.clone());
            Some(key)
        }
        None => None,
    };

    let new_submission = NewSubmission {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        role: role.to_string(),
        identity_proof: identity_key,
        additional_proof: additional_key,
    };

    let mut conn = deps.db_pool.acquire().await?;
    let submission_id = Submission::insert(&new_submission, &mut conn).await?;
    Ok(submission_id)
}

/// Remove blobs stored for a submission whose row was never written
async fn discard_blobs(keys: &[String], deps: &ServerDeps) {
    for key in keys {
        if let Err(e) = deps.blob_store.delete(key).await {
            warn!(key = %key, error = %e, "failed to discard orphaned upload");
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
