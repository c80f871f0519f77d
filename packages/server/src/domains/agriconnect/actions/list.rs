//! List submissions action

use serde::{Deserialize, Serialize};

use crate::common::{AppResult, SubmissionId};
use crate::domains::agriconnect::models::{NotificationStatus, Submission, VerificationStatus};
use crate::kernel::ServerDeps;

/// URL prefix under which stored uploads are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// A submission as shown to reviewers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub role: String,
    pub id_proof: Option<String>,
    pub additional_proof: Option<String>,
    pub status: VerificationStatus,
    pub notification_status: NotificationStatus,
}

impl From<Submission> for SubmissionView {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            name: submission.name,
            email: submission.email,
            mobile: submission.phone,
            role: submission.role,
            id_proof: public_url(Some(&submission.identity_proof)),
            additional_proof: public_url(submission.additional_proof.as_deref()),
            status: submission.verification_status,
            notification_status: submission.notification_status,
        }
    }
}

/// Map a stored blob key to the path it is served from
pub fn public_url(key: Option<&str>) -> Option<String> {
    key.filter(|k| !k.is_empty())
        .map(|k| format!("{UPLOADS_URL_PREFIX}/{k}"))
}

/// Return every submission; no pagination.
pub async fn list_submissions(deps: &ServerDeps) -> AppResult<Vec<SubmissionView>> {
    let submissions = Submission::find_all(&deps.db_pool).await?;
    Ok(submissions.into_iter().map(SubmissionView::from).collect())
}
