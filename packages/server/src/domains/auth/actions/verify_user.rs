//! Verify user action

use tracing::info;

use crate::common::{AppError, AppResult, UserId};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Set a user's verified flag. Callers must hold `AdminCapability::VerifyUsers`.
pub async fn verify_user(user_id: UserId, verified: bool, deps: &ServerDeps) -> AppResult<()> {
    let updated = User::set_verified(user_id, verified, &deps.db_pool).await?;
    if updated == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    info!(user_id = %user_id, verified, "user verification updated");
    Ok(())
}
