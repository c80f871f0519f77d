use thiserror::Error;

use super::AdminCapability;

/// Authentication and authorization failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin access required: {0}")]
    AdminRequired(AdminCapability),
}
