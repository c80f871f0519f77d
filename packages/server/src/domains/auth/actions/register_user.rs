//! Register user action

use tracing::info;

use crate::common::{AppError, AppResult, UserId};
use crate::domains::auth::password::hash_password;
use crate::domains::users::{NewUser, User};
use crate::kernel::ServerDeps;

/// Registration input as received from the client
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub mobile_number: String,
    pub password: String,
    pub village: String,
    pub district: String,
    pub state: String,
}

/// Register a new, unverified user.
///
/// Fails with `Conflict` when the mobile number is already registered; the
/// existing row is left untouched.
pub async fn register_user(registration: Registration, deps: &ServerDeps) -> AppResult<UserId> {
    for (field, value) in [
        ("name", &registration.name),
        ("mobileNumber", &registration.mobile_number),
        ("password", &registration.password),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }

    let password_hash = hash_password(&registration.password).await?;

    let new_user = NewUser {
        name: registration.name,
        mobile_number: registration.mobile_number,
        password_hash,
        village: registration.village,
        district: registration.district,
        state: registration.state,
    };

    let user_id = User::insert_if_absent(&new_user, &deps.db_pool)
        .await?
        .ok_or_else(|| AppError::Conflict("User already exists".to_string()))?;

    info!(user_id = %user_id, "user registered");
    Ok(user_id)
}
