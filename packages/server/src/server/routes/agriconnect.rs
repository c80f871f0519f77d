//! AgriConnect routes: submission intake, listing, and review.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Extension, Multipart, Path,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{Actor, AdminCapability, AppError, AppResult, SubmissionId};
use crate::domains::agriconnect::actions::{self, SubmissionForm, SubmissionView, UploadedFile};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::auth::{parse_id, MessageResponse};

/// Largest accepted intake request body
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: String,
    pub submission_id: SubmissionId,
    pub notified: bool,
}

/// POST /agriconnect (multipart)
pub async fn submit_handler(
    Extension(state): Extension<AxumAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SubmitResponse>> {
    let multipart = multipart.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let form = read_form(multipart).await?;

    let outcome = actions::submit(form, &state.deps).await?;
    Ok(Json(SubmitResponse {
        message: "Registration successful. Data stored in the database.".to_string(),
        submission_id: outcome.submission_id,
        notified: outcome.notified,
    }))
}

/// GET /submissions
pub async fn list_submissions_handler(
    Extension(state): Extension<AxumAppState>,
) -> AppResult<Json<Vec<SubmissionView>>> {
    Ok(Json(actions::list_submissions(&state.deps).await?))
}

/// POST /submissions/:id/approve (admin: `ReviewSubmissions`)
pub async fn approve_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    Actor::from_claims(&auth.claims)
        .can(AdminCapability::ReviewSubmissions)
        .check()?;

    actions::approve(parse_id(&id)?, &state.deps).await?;
    Ok(MessageResponse::new("Submission approved!"))
}

/// POST /submissions/:id/reject (admin: `ReviewSubmissions`)
pub async fn reject_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    Actor::from_claims(&auth.claims)
        .can(AdminCapability::ReviewSubmissions)
        .check()?;

    actions::reject(parse_id(&id)?, &state.deps).await?;
    Ok(MessageResponse::new("Submission rejected!"))
}

/// Collect the intake form fields. Unknown fields are ignored; a file part
/// with neither a filename nor content (an empty file input) counts as absent.
async fn read_form(mut multipart: Multipart) -> AppResult<SubmissionForm> {
    let invalid = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(format!(
                "Upload exceeds {} MiB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            ))
        } else {
            AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
        }
    };

    let mut form = SubmissionForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field_name.as_str() {
            "identityProof" | "additionalProof" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(invalid)?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }

                let file = UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                };
                if field_name == "identityProof" {
                    form.identity_proof = Some(file);
                } else {
                    form.additional_proof = Some(file);
                }
            }
            "name" | "email" | "phone" | "role" => {
                let value = Some(field.text().await.map_err(invalid)?);
                match field_name.as_str() {
                    "name" => form.name = value,
                    "email" => form.email = value,
                    "phone" => form.phone = value,
                    _ => form.role = value,
                }
            }
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}
