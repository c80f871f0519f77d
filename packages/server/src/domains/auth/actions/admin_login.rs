//! Admin login action

use tracing::{info, warn};

use crate::common::{AppError, AppResult};
use crate::domains::auth::admin::admin_credentials_match;
use crate::kernel::ServerDeps;

/// Issue an admin session token for the configured admin credentials.
pub async fn admin_login(email: &str, password: &str, deps: &ServerDeps) -> AppResult<String> {
    if !admin_credentials_match(&deps.admin, email, password) {
        warn!("admin login rejected");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = deps.jwt_service.create_admin_token(&deps.admin.email)?;
    info!("admin logged in");
    Ok(token)
}
