use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use std::fmt;

use crate::common::SubmissionId;

/// Review state of a submission
///
/// Moves one way: `pending` to `approved` or `rejected`. Re-reviewing an
/// already reviewed submission overwrites the status (last write wins).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "verification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Outcome of the confirmation email sent after intake
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Row persisted, notification not attempted yet
    Pending,
    Sent,
    Failed,
}

/// Submission model - SQL persistence layer
///
/// Proof documents live in the blob store; the row only holds their keys.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub identity_proof: String,
    pub additional_proof: Option<String>,
    pub verification_status: VerificationStatus,
    pub notification_status: NotificationStatus,
    pub notification_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a validated submission, with blob keys already assigned
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub identity_proof: String,
    pub additional_proof: Option<String>,
}

impl Submission {
    /// Find all submissions, oldest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM agriconnect_submissions ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Find submission by ID
    pub async fn find_by_id(id: SubmissionId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM agriconnect_submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new pending submission
    pub async fn insert(new: &NewSubmission, conn: &mut PgConnection) -> Result<SubmissionId> {
        sqlx::query_scalar::<_, SubmissionId>(
            "INSERT INTO agriconnect_submissions
                (name, email, phone, role, identity_proof, additional_proof)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.role)
        .bind(&new.identity_proof)
        .bind(&new.additional_proof)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Record how the confirmation email went
    pub async fn record_notification(
        id: SubmissionId,
        status: NotificationStatus,
        error: Option<&str>,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE agriconnect_submissions
             SET notification_status = $2, notification_error = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(error)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Set the review status unconditionally
    ///
    /// Returns the number of rows affected (0 or 1).
    pub async fn set_verification_status(
        id: SubmissionId,
        status: VerificationStatus,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE agriconnect_submissions
             SET verification_status = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count all submissions
    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM agriconnect_submissions")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
