//! Salted password hashing (bcrypt).
//!
//! Hashing is deliberately slow, so both directions run on the blocking pool
//! instead of a runtime worker.

use anyhow::{Context, Result};

/// bcrypt work factor for stored passwords
pub const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password for storage
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("password hashing task failed")?
        .context("Failed to hash password")
}

/// Check a plaintext password against a stored hash
///
/// A malformed stored hash counts as a mismatch rather than an error.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &stored_hash))
        .await
        .context("password verification task failed")?;

    Ok(matched.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stored password hash is malformed");
        false
    }))
}
