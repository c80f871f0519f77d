//! Get user name action

use tracing::debug;

use crate::common::{AppError, AppResult};
use crate::domains::auth::Claims;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Resolve the display name of the user a verified token was issued to.
///
/// Admin tokens carry no user id and are rejected as unauthorized.
pub async fn get_user_name(claims: &Claims, deps: &ServerDeps) -> AppResult<String> {
    let user_id = claims
        .user_id
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let user = User::find_by_id(user_id, &deps.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    debug!(user_id = %user_id, "fetched user name");
    Ok(user.name)
}
