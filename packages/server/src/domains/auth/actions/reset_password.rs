//! Reset password action

use tracing::{info, warn};

use crate::common::{AppError, AppResult};
use crate::domains::auth::password::hash_password;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Overwrite the password for a mobile number.
///
/// Neither the old password nor a session is required, and an unknown mobile
/// number still succeeds. Both are known gaps of the public reset contract.
pub async fn reset_password(mobile_number: &str, new_password: &str, deps: &ServerDeps) -> AppResult<()> {
    if new_password.is_empty() {
        return Err(AppError::Validation("newPassword is required".to_string()));
    }

    let password_hash = hash_password(new_password).await?;
    let updated = User::update_password_hash(mobile_number, &password_hash, &deps.db_pool).await?;

    if updated == 0 {
        warn!("password reset requested for unknown mobile number");
    } else {
        info!("password reset");
    }
    Ok(())
}
