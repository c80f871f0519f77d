use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::UserId;

/// User model - SQL persistence layer
///
/// `mobile_number` is the login key and is unique across all users.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub mobile_number: String,
    pub password_hash: String,

    // Free-text location
    pub village: String,
    pub district: String,
    pub state: String,

    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied at registration (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub village: String,
    pub district: String,
    pub state: String,
}

impl User {
    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by mobile number (the login key)
    pub async fn find_by_mobile_number(mobile_number: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE mobile_number = $1")
            .bind(mobile_number)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new unverified user
    ///
    /// Returns `None` when the mobile number is already registered. The
    /// uniqueness check and the insert are one statement, so concurrent
    /// registrations of the same number cannot both succeed.
    pub async fn insert_if_absent(new_user: &NewUser, pool: &PgPool) -> Result<Option<UserId>> {
        sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (name, mobile_number, password_hash, village, district, state)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (mobile_number) DO NOTHING
             RETURNING id",
        )
        .bind(&new_user.name)
        .bind(&new_user.mobile_number)
        .bind(&new_user.password_hash)
        .bind(&new_user.village)
        .bind(&new_user.district)
        .bind(&new_user.state)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace the password hash for a mobile number
    ///
    /// Returns the number of rows affected (0 or 1).
    pub async fn update_password_hash(
        mobile_number: &str,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE mobile_number = $1",
        )
        .bind(mobile_number)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Set the verified flag
    ///
    /// Returns the number of rows affected (0 or 1).
    pub async fn set_verified(id: UserId, verified: bool, pool: &PgPool) -> Result<u64> {
        let result =
            sqlx::query("UPDATE users SET verified = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(verified)
                .execute(pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Count users holding a mobile number (0 or 1 by the unique constraint)
    pub async fn count_by_mobile_number(mobile_number: &str, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE mobile_number = $1")
            .bind(mobile_number)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
