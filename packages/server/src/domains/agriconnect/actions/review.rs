//! Approve / reject actions

use tracing::info;

use crate::common::{AppError, AppResult, SubmissionId};
use crate::domains::agriconnect::models::{Submission, VerificationStatus};
use crate::kernel::ServerDeps;

/// Approve a submission. Callers must hold `AdminCapability::ReviewSubmissions`.
pub async fn approve(id: SubmissionId, deps: &ServerDeps) -> AppResult<()> {
    set_status(id, VerificationStatus::Approved, deps).await
}

/// Reject a submission. Callers must hold `AdminCapability::ReviewSubmissions`.
pub async fn reject(id: SubmissionId, deps: &ServerDeps) -> AppResult<()> {
    set_status(id, VerificationStatus::Rejected, deps).await
}

async fn set_status(id: SubmissionId, status: VerificationStatus, deps: &ServerDeps) -> AppResult<()> {
    let updated = Submission::set_verification_status(id, status, &deps.db_pool).await?;
    if updated == 0 {
        return Err(AppError::NotFound("Submission not found".to_string()));
    }

    info!(submission_id = %id, status = %status, "submission reviewed");
    Ok(())
}
