//! Login user action

use tracing::{debug, info};

use crate::common::{AppError, AppResult};
use crate::domains::auth::password::verify_password;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Check a mobile number / password pair and issue a session token.
pub async fn login_user(mobile_number: &str, password: &str, deps: &ServerDeps) -> AppResult<String> {
    let user = User::find_by_mobile_number(mobile_number, &deps.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(password, &user.password_hash).await? {
        debug!(user_id = %user.id, "password mismatch");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    let token = deps.jwt_service.create_user_token(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(token)
}
